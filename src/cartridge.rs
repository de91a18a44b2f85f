//! iNES cartridge loading: header parsing, PRG/CHR storage, mirroring, and
//! the CPU/PPU-facing read/write surface that consults the cartridge's
//! [`Mapper`] for address translation.

use std::fs;
use std::path::Path;

use log::{debug, trace, warn};

use crate::error::{NesError, Result};
use crate::mapper::{MapResult, Mapper, MirroringOverride, Region};

const HEADER_LEN: usize = 16;
const TRAINER_LEN: usize = 512;
const PRG_BANK_LEN: usize = 16 * 1024;
const CHR_BANK_LEN: usize = 8 * 1024;

/// Nametable layout selected by the cartridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirroringMode {
    Horizontal,
    Vertical,
    OneScreenLo,
    OneScreenHi,
}

/// A loaded iNES ROM image: PRG/CHR storage plus its mapper.
#[derive(Debug, Clone)]
pub struct Cartridge {
    prg: Vec<u8>,
    prg_ram: Vec<u8>,
    chr: Vec<u8>,
    chr_is_ram: bool,
    mirroring: MirroringMode,
    mapper: Mapper,
    mapper_id: u8,
}

impl Cartridge {
    /// Parse and load an iNES ROM from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Cartridge> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| NesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Parse and load an iNES ROM already held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Cartridge> {
        if bytes.len() < HEADER_LEN {
            return Err(NesError::Truncated {
                expected: HEADER_LEN,
                found: bytes.len(),
            });
        }
        let header = &bytes[..HEADER_LEN];
        if &header[0..4] != b"NES\x1A" {
            return Err(NesError::BadMagic);
        }

        let prg_banks = header[4];
        let chr_banks = header[5];
        let flags6 = header[6];
        let flags7 = header[7];

        let has_trainer = flags6 & 0x04 != 0;
        let mirroring = if flags6 & 0x01 != 0 {
            MirroringMode::Vertical
        } else {
            MirroringMode::Horizontal
        };
        let mapper_id = (flags7 & 0xF0) | (flags6 >> 4);

        let mut offset = HEADER_LEN;
        if has_trainer {
            offset += TRAINER_LEN;
        }

        let prg_len = prg_banks as usize * PRG_BANK_LEN;
        let prg_end = offset + prg_len;
        if bytes.len() < prg_end {
            return Err(NesError::Truncated {
                expected: prg_end,
                found: bytes.len(),
            });
        }
        let prg = bytes[offset..prg_end].to_vec();
        offset = prg_end;

        let (chr, chr_is_ram) = if chr_banks == 0 {
            (vec![0u8; CHR_BANK_LEN], true)
        } else {
            let chr_len = chr_banks as usize * CHR_BANK_LEN;
            let chr_end = offset + chr_len;
            if bytes.len() < chr_end {
                return Err(NesError::Truncated {
                    expected: chr_end,
                    found: bytes.len(),
                });
            }
            (bytes[offset..chr_end].to_vec(), false)
        };

        let mapper = Mapper::from_id(mapper_id, prg_banks, chr_banks).ok_or_else(|| {
            warn!("rejecting ROM: unsupported mapper id {mapper_id}");
            NesError::UnsupportedMapper(mapper_id)
        })?;

        debug!(
            "loaded cartridge: mapper={mapper_id} prg_banks={prg_banks} chr_banks={chr_banks} mirroring={mirroring:?}"
        );

        Ok(Cartridge {
            prg,
            prg_ram: vec![0u8; 8 * 1024],
            chr,
            chr_is_ram,
            mirroring,
            mapper,
            mapper_id,
        })
    }

    /// The mapper id declared in the header.
    pub fn mapper_id(&self) -> u8 {
        self.mapper_id
    }

    /// The cartridge's nametable mirroring, accounting for any mapper
    /// override (e.g. MMC1's runtime-selectable single-screen modes).
    pub fn mirroring(&self) -> MirroringMode {
        match self.mapper.mirroring_override() {
            MirroringOverride::Forced(mode) => mode,
            MirroringOverride::None => self.mirroring,
        }
    }

    /// CPU-bus read at any address; consults the mapper first, then falls
    /// through to PRG-RAM ($6000-$7FFF) if the mapper does not claim it.
    pub fn cpu_read(&mut self, addr: u16) -> u8 {
        self.try_cpu_read(addr).unwrap_or(0)
    }

    /// CPU-bus write. The mapper gets first refusal (bank-select
    /// registers); PRG-RAM is the fallback for unclaimed addresses.
    pub fn cpu_write(&mut self, addr: u16, value: u8) {
        self.try_cpu_write(addr, value);
    }

    /// Attempt a CPU-bus read through the cartridge's own decoding (mapper
    /// hit, or the PRG-RAM window at $6000-$7FFF). Returns `None` when the
    /// cartridge does not claim `addr` at all, so the bus can fall through
    /// to its own decoding (WRAM, PPU MMIO, controllers) — the cartridge is
    /// consulted first on every access, never last.
    pub fn try_cpu_read(&mut self, addr: u16) -> Option<u8> {
        match self.mapper.cpu_read(addr) {
            MapResult::Hit { region: Region::Prg, offset, .. } => {
                Some(self.prg.get(offset as usize % self.prg.len().max(1)).copied().unwrap_or(0))
            }
            MapResult::Hit { region: Region::Chr, .. } => Some(0),
            MapResult::Miss => {
                if (0x6000..=0x7FFF).contains(&addr) {
                    Some(self.prg_ram[(addr - 0x6000) as usize % self.prg_ram.len()])
                } else {
                    None
                }
            }
        }
    }

    /// Attempt a CPU-bus write through the cartridge's own decoding.
    /// Returns whether the cartridge claimed `addr` (even if the write was
    /// dropped because the claimed region is read-only) — a `false` result
    /// means the bus should fall through to its own decoding.
    pub fn try_cpu_write(&mut self, addr: u16, value: u8) -> bool {
        match self.mapper.cpu_write(addr, value) {
            MapResult::Hit { region: Region::Prg, offset, writable: true } => {
                let len = self.prg.len().max(1);
                self.prg[offset as usize % len] = value;
                true
            }
            MapResult::Hit { .. } => true,
            MapResult::Miss => {
                if (0x6000..=0x7FFF).contains(&addr) {
                    let len = self.prg_ram.len();
                    self.prg_ram[(addr - 0x6000) as usize % len] = value;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// PPU-bus read at $0000-$1FFF (pattern tables).
    pub fn ppu_read(&mut self, addr: u16) -> u8 {
        match self.mapper.ppu_read(addr) {
            MapResult::Hit { offset, .. } => {
                let len = self.chr.len().max(1);
                self.chr[offset as usize % len]
            }
            MapResult::Miss => 0,
        }
    }

    /// PPU-bus write at $0000-$1FFF; succeeds only if the mapper reports
    /// the targeted bank as writable (CHR-RAM).
    pub fn ppu_write(&mut self, addr: u16, value: u8) {
        match self.mapper.ppu_write(addr) {
            MapResult::Hit { offset, writable: true, .. } => {
                let len = self.chr.len();
                self.chr[offset as usize % len] = value;
            }
            _ => trace!("dropped PPU write to read-only CHR at {addr:#06x}"),
        }
    }

    /// Whether CHR storage is RAM (true) or ROM (false).
    pub fn chr_is_ram(&self) -> bool {
        self.chr_is_ram
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Build a minimal valid iNES image: `prg_banks` × 16 KiB (each bank
    /// filled with its index for distinguishability) and one 8 KiB CHR
    /// bank, mapper 0, horizontal mirroring.
    pub fn nrom_image(prg_banks: u8) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(b"NES\x1A");
        bytes[4] = prg_banks;
        bytes[5] = 1;
        bytes[6] = 0;
        bytes[7] = 0;
        for bank in 0..prg_banks {
            let mut block = vec![bank; PRG_BANK_LEN];
            bytes.append(&mut block);
        }
        bytes.extend(vec![0u8; CHR_BANK_LEN]);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::nrom_image;
    use super::*;

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = nrom_image(1);
        bytes[0] = b'X';
        assert!(matches!(Cartridge::from_bytes(&bytes), Err(NesError::BadMagic)));
    }

    #[test]
    fn rejects_truncated_prg() {
        let mut bytes = nrom_image(2);
        bytes.truncate(HEADER_LEN + PRG_BANK_LEN);
        assert!(matches!(Cartridge::from_bytes(&bytes), Err(NesError::Truncated { .. })));
    }

    #[test]
    fn rejects_unknown_mapper() {
        let mut bytes = nrom_image(1);
        bytes[6] = 0xF0; // mapper id 0xFF once combined with flags7
        bytes[7] = 0xF0;
        assert!(matches!(
            Cartridge::from_bytes(&bytes),
            Err(NesError::UnsupportedMapper(_))
        ));
    }

    #[test]
    fn reads_mirror_16k_bank() {
        let bytes = nrom_image(1);
        let mut cart = Cartridge::from_bytes(&bytes).unwrap();
        assert_eq!(cart.cpu_read(0x8000), 0);
        assert_eq!(cart.cpu_read(0xC000), 0);
    }

    #[test]
    fn prg_ram_is_read_write() {
        let bytes = nrom_image(1);
        let mut cart = Cartridge::from_bytes(&bytes).unwrap();
        cart.cpu_write(0x6000, 0x42);
        assert_eq!(cart.cpu_read(0x6000), 0x42);
    }

    #[test]
    fn rom_writes_are_dropped() {
        let bytes = nrom_image(1);
        let mut cart = Cartridge::from_bytes(&bytes).unwrap();
        cart.cpu_write(0x8000, 0xFF);
        assert_eq!(cart.cpu_read(0x8000), 0);
    }

    #[test]
    fn chr_ram_substituted_when_no_chr_banks() {
        let mut bytes = nrom_image(1);
        bytes[5] = 0; // no CHR banks in header
        bytes.truncate(HEADER_LEN + PRG_BANK_LEN); // drop the CHR bytes too
        let mut cart = Cartridge::from_bytes(&bytes).unwrap();
        assert!(cart.chr_is_ram());
        cart.ppu_write(0x0000, 0x55);
        assert_eq!(cart.ppu_read(0x0000), 0x55);
    }
}
