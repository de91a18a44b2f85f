//! Mapper 4 (MMC3 / TxROM): 8 KiB PRG banking windows, 1/2 KiB CHR banking.
//!
//! The scanline IRQ counter real MMC3 boards use to time mid-frame raster
//! effects is not implemented — it would require the PPU to expose its
//! A12 line toggles to the mapper, which is outside the bus/PPU contract
//! this crate defines. See DESIGN.md for the record of this omission.

use super::{MapResult, MirroringOverride, Region};
use crate::cartridge::MirroringMode;

#[derive(Debug, Clone, Copy)]
pub struct Txrom {
    num_prg_banks: u8, // 16 KiB banks as reported by the header
    num_chr_banks: u8, // 8 KiB banks as reported by the header
    bank_select: u8,
    regs: [u8; 8],
    mirroring: MirroringMode,
    chr_is_ram: bool,
}

impl Txrom {
    pub(super) fn new(num_prg_banks: u8, num_chr_banks: u8) -> Self {
        Self {
            num_prg_banks,
            num_chr_banks: num_chr_banks.max(1),
            bank_select: 0,
            regs: [0; 8],
            mirroring: MirroringMode::Vertical,
            chr_is_ram: num_chr_banks == 0,
        }
    }

    pub(super) fn mirroring_override(&self) -> MirroringOverride {
        MirroringOverride::Forced(self.mirroring)
    }

    fn prg_8k_banks(&self) -> u32 {
        self.num_prg_banks.max(1) as u32 * 2
    }

    fn prg_bank_offset(&self, addr: u16) -> u32 {
        let total = self.prg_8k_banks();
        let r6 = self.regs[6] as u32 % total;
        let r7 = self.regs[7] as u32 % total;
        let second_last = total.saturating_sub(2);
        let last = total.saturating_sub(1);
        let window = (addr - 0x8000) / 0x2000;
        let bank = if self.bank_select & 0x40 == 0 {
            match window {
                0 => r6,
                1 => r7,
                2 => second_last,
                _ => last,
            }
        } else {
            match window {
                0 => second_last,
                1 => r7,
                2 => r6,
                _ => last,
            }
        };
        bank * 0x2000 + (addr & 0x1FFF) as u32
    }

    fn chr_bank_offset(&self, addr: u16) -> u32 {
        let total_1k = self.num_chr_banks.max(1) as u32 * 8;
        let r = |i: usize, mask_even: bool| -> u32 {
            let v = self.regs[i] as u32;
            if mask_even { v & !1 } else { v }
        };
        let inverted = self.bank_select & 0x80 != 0;
        let (bank1k, within) = if !inverted {
            match addr {
                0x0000..=0x03FF => (r(0, true), addr),
                0x0400..=0x07FF => (r(0, true) + 1, addr - 0x0400),
                0x0800..=0x0BFF => (r(1, true), addr - 0x0800),
                0x0C00..=0x0FFF => (r(1, true) + 1, addr - 0x0C00),
                0x1000..=0x13FF => (r(2, false), addr - 0x1000),
                0x1400..=0x17FF => (r(3, false), addr - 0x1400),
                0x1800..=0x1BFF => (r(4, false), addr - 0x1800),
                _ => (r(5, false), addr - 0x1C00),
            }
        } else {
            match addr {
                0x0000..=0x03FF => (r(2, false), addr),
                0x0400..=0x07FF => (r(3, false), addr - 0x0400),
                0x0800..=0x0BFF => (r(4, false), addr - 0x0800),
                0x0C00..=0x0FFF => (r(5, false), addr - 0x0C00),
                0x1000..=0x13FF => (r(0, true), addr - 0x1000),
                0x1400..=0x17FF => (r(0, true) + 1, addr - 0x1400),
                0x1800..=0x1BFF => (r(1, true), addr - 0x1800),
                _ => (r(1, true) + 1, addr - 0x1C00),
            }
        };
        (bank1k % total_1k) * 0x0400 + within as u32
    }

    pub(super) fn cpu_read(&mut self, addr: u16) -> MapResult {
        match addr {
            0x8000..=0xFFFF => MapResult::Hit {
                region: Region::Prg,
                offset: self.prg_bank_offset(addr),
                writable: false,
            },
            _ => MapResult::Miss,
        }
    }

    pub(super) fn cpu_write(&mut self, addr: u16, value: u8) -> MapResult {
        match (addr, addr & 1) {
            (0x8000..=0x9FFF, 0) => self.bank_select = value,
            (0x8000..=0x9FFF, _) => {
                let idx = (self.bank_select & 0x07) as usize;
                self.regs[idx] = value;
            }
            (0xA000..=0xBFFF, 0) => {
                self.mirroring = if value & 1 == 0 {
                    MirroringMode::Vertical
                } else {
                    MirroringMode::Horizontal
                };
            }
            (0xA000..=0xBFFF, _) => { /* PRG-RAM protect: not modeled */ }
            (0xC000..=0xFFFF, _) => { /* IRQ latch/reload/enable/disable: not modeled */ }
            _ => {}
        }
        MapResult::Miss
    }

    pub(super) fn ppu_read(&mut self, addr: u16) -> MapResult {
        match addr {
            0x0000..=0x1FFF => MapResult::Hit {
                region: Region::Chr,
                offset: self.chr_bank_offset(addr),
                writable: false,
            },
            _ => MapResult::Miss,
        }
    }

    pub(super) fn ppu_write(&mut self, addr: u16) -> MapResult {
        match addr {
            0x0000..=0x1FFF => MapResult::Hit {
                region: Region::Chr,
                offset: self.chr_bank_offset(addr),
                writable: self.chr_is_ram,
            },
            _ => MapResult::Miss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{MapResult, Mapper, Region};

    #[test]
    fn last_bank_is_fixed_at_top_of_address_space() {
        let mut m = Mapper::from_id(4, 8, 1).unwrap(); // 8 * 16KiB = 16 * 8KiB banks
        assert_eq!(
            m.cpu_read(0xE000),
            MapResult::Hit { region: Region::Prg, offset: 15 * 0x2000, writable: false }
        );
    }

    #[test]
    fn bank_select_then_data_sets_r6() {
        let mut m = Mapper::from_id(4, 8, 1).unwrap();
        m.cpu_write(0x8000, 0x00); // select R0 first just to exercise the latch
        m.cpu_write(0x8001, 0x02);
        m.cpu_write(0x8000, 0x06); // select R6
        m.cpu_write(0x8001, 0x05);
        assert_eq!(
            m.cpu_read(0x8000),
            MapResult::Hit { region: Region::Prg, offset: 5 * 0x2000, writable: false }
        );
    }

    #[test]
    fn mirroring_register_forces_mode() {
        let mut m = Mapper::from_id(4, 8, 1).unwrap();
        m.cpu_write(0xA000, 1);
        assert_eq!(
            m.mirroring_override(),
            super::super::MirroringOverride::Forced(crate::cartridge::MirroringMode::Horizontal)
        );
    }
}
