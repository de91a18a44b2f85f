//! Cartridge address-translation policies.
//!
//! A [`Mapper`] is a tagged variant with one case per supported cartridge
//! family. Each case exposes four pure-ish functions —
//! `cpu_read`, `cpu_write`, `ppu_read`, `ppu_write` — that translate a bus
//! address into either [`MapResult::Hit`] (an offset into the cartridge's
//! PRG or CHR byte array, plus whether the region is writable) or
//! [`MapResult::Miss`] (the mapper does not claim this address).
//!
//! The mapper never owns PRG/CHR bytes itself; [`crate::cartridge::Cartridge`]
//! owns the storage and consults the mapper for where to look. This keeps
//! growing the variant set a pure addition: the bus and cartridge never
//! need downcasting or RTTI to add a new family.

mod cnrom;
mod nrom;
mod sxrom;
mod txrom;

pub use cnrom::Cnrom;
pub use nrom::Nrom;
pub use sxrom::Sxrom;
pub use txrom::Txrom;

/// Which cartridge-owned array a [`MapResult::Hit`] offset indexes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Program ROM/RAM.
    Prg,
    /// Character ROM/RAM (pattern tables).
    Chr,
}

/// The outcome of translating a single bus address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapResult {
    /// The mapper claims this address.
    Hit {
        /// Which array the offset belongs to.
        region: Region,
        /// Byte offset within that array.
        offset: u32,
        /// Whether a write at this offset should actually be stored.
        writable: bool,
    },
    /// The mapper does not claim this address; the bus falls through to its
    /// own decoding (WRAM, PPU MMIO, etc).
    Miss,
}

/// Nametable mirroring a mapper may force regardless of the cartridge
/// header, used by bank-switching mappers (MMC1) that can flip to
/// single-screen mirroring at runtime. `None` means "defer to the
/// cartridge's static header mirroring".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirroringOverride {
    /// Use the cartridge header's mirroring mode.
    None,
    /// Force a specific mode.
    Forced(crate::cartridge::MirroringMode),
}

/// Cartridge-family address-translation policy.
///
/// Mapper 0 (NROM) is the baseline, fixed-bank variant; the others add
/// runtime bank switching on top of the same four-function contract.
#[derive(Debug, Clone)]
pub enum Mapper {
    /// Mapper 0.
    Nrom(Nrom),
    /// Mapper 3.
    Cnrom(Cnrom),
    /// Mapper 1 (MMC1).
    Sxrom(Sxrom),
    /// Mapper 4 (MMC3, without its scanline IRQ counter — see DESIGN.md).
    Txrom(Txrom),
}

impl Mapper {
    /// Construct the mapper for a given iNES mapper id and bank counts.
    /// Returns `None` for unsupported ids so the caller can fail cleanly.
    pub fn from_id(id: u8, num_prg_banks: u8, num_chr_banks: u8) -> Option<Mapper> {
        match id {
            0 => Some(Mapper::Nrom(Nrom::new(num_prg_banks, num_chr_banks))),
            1 => Some(Mapper::Sxrom(Sxrom::new(num_prg_banks, num_chr_banks))),
            3 => Some(Mapper::Cnrom(Cnrom::new(num_prg_banks, num_chr_banks))),
            4 => Some(Mapper::Txrom(Txrom::new(num_prg_banks, num_chr_banks))),
            _ => None,
        }
    }

    /// Translate a CPU-bus read address.
    pub fn cpu_read(&mut self, addr: u16) -> MapResult {
        match self {
            Mapper::Nrom(m) => m.cpu_read(addr),
            Mapper::Cnrom(m) => m.cpu_read(addr),
            Mapper::Sxrom(m) => m.cpu_read(addr),
            Mapper::Txrom(m) => m.cpu_read(addr),
        }
    }

    /// Translate a CPU-bus write address. May mutate internal bank
    /// registers even when it returns `Miss` (bank-select writes are
    /// claimed by the mapper and never reach PRG-ROM storage).
    pub fn cpu_write(&mut self, addr: u16, value: u8) -> MapResult {
        match self {
            Mapper::Nrom(m) => m.cpu_write(addr, value),
            Mapper::Cnrom(m) => m.cpu_write(addr, value),
            Mapper::Sxrom(m) => m.cpu_write(addr, value),
            Mapper::Txrom(m) => m.cpu_write(addr, value),
        }
    }

    /// Translate a PPU-bus read address ($0000-$1FFF pattern tables).
    pub fn ppu_read(&mut self, addr: u16) -> MapResult {
        match self {
            Mapper::Nrom(m) => m.ppu_read(addr),
            Mapper::Cnrom(m) => m.ppu_read(addr),
            Mapper::Sxrom(m) => m.ppu_read(addr),
            Mapper::Txrom(m) => m.ppu_read(addr),
        }
    }

    /// Translate a PPU-bus write address ($0000-$1FFF pattern tables).
    pub fn ppu_write(&mut self, addr: u16) -> MapResult {
        match self {
            Mapper::Nrom(m) => m.ppu_write(addr),
            Mapper::Cnrom(m) => m.ppu_write(addr),
            Mapper::Sxrom(m) => m.ppu_write(addr),
            Mapper::Txrom(m) => m.ppu_write(addr),
        }
    }

    /// Mapper-forced mirroring override, if any (only MMC1 produces one).
    pub fn mirroring_override(&self) -> MirroringOverride {
        match self {
            Mapper::Sxrom(m) => m.mirroring_override(),
            Mapper::Txrom(m) => m.mirroring_override(),
            _ => MirroringOverride::None,
        }
    }
}
