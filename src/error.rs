//! Setup-time error types.
//!
//! Per the emulation model, errors are confined to cartridge construction:
//! once a ROM is loaded, every runtime bus access is infallible (open-bus
//! reads, dropped writes). See [`crate::cartridge`] for where these are
//! raised.

use std::io;
use std::path::PathBuf;

/// Failure modes that can occur while loading an iNES ROM image.
#[derive(Debug, thiserror::Error)]
pub enum NesError {
    /// The ROM file could not be opened or read.
    #[error("failed to read ROM file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The file is shorter than its header claims, or shorter than the
    /// 16-byte iNES header itself.
    #[error("truncated ROM: expected at least {expected} bytes, found {found}")]
    Truncated {
        /// Minimum byte count the header promised.
        expected: usize,
        /// Bytes actually present.
        found: usize,
    },

    /// The first four bytes are not the iNES magic `"NES\x1A"`.
    #[error("bad iNES magic number")]
    BadMagic,

    /// The mapper id encoded in the header has no implementation.
    #[error("unsupported mapper id {0}")]
    UnsupportedMapper(u8),
}

/// Convenience alias for fallible cartridge-construction operations.
pub type Result<T> = std::result::Result<T, NesError>;
