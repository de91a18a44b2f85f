//! PPU bus decoding: pattern tables via the cartridge, 2×1 KiB
//! nametable RAM with mirroring, and the 32-byte palette table.

use crate::cartridge::{Cartridge, MirroringMode};

use super::Ppu;

impl Ppu {
    pub(super) fn ppu_bus_read(&mut self, cart: &mut Cartridge, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => cart.ppu_read(addr),
            0x2000..=0x3EFF => self.nametables[self.nametable_index(cart, addr) as usize],
            _ => self.palette[self.palette_index(addr) as usize],
        }
    }

    pub(super) fn ppu_bus_write(&mut self, cart: &mut Cartridge, addr: u16, value: u8) {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => cart.ppu_write(addr, value),
            0x2000..=0x3EFF => {
                let idx = self.nametable_index(cart, addr);
                self.nametables[idx as usize] = value;
            }
            _ => {
                let idx = self.palette_index(addr);
                self.palette[idx as usize] = value;
            }
        }
    }

    /// Flatten a $2000-$3EFF address into an index over the two
    /// 1 KiB nametables per the cartridge's mirroring mode.
    fn nametable_index(&self, cart: &Cartridge, addr: u16) -> u16 {
        let masked = addr & 0x0FFF;
        let table = match cart.mirroring() {
            MirroringMode::Vertical => {
                if masked < 0x0400 || (0x0800..0x0C00).contains(&masked) {
                    0
                } else {
                    1
                }
            }
            MirroringMode::Horizontal => {
                if masked < 0x0800 {
                    0
                } else {
                    1
                }
            }
            MirroringMode::OneScreenLo => 0,
            MirroringMode::OneScreenHi => 1,
        };
        table * 0x0400 + (masked & 0x03FF)
    }

    fn palette_index(&self, addr: u16) -> u16 {
        let mut idx = addr & 0x001F;
        if matches!(idx, 0x10 | 0x14 | 0x18 | 0x1C) {
            idx &= !0x10;
        }
        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::Cartridge;

    fn nrom_cart(mirroring_flag: u8) -> Cartridge {
        let mut bytes = vec![0u8; 16];
        bytes[0..4].copy_from_slice(b"NES\x1A");
        bytes[4] = 1;
        bytes[5] = 1;
        bytes[6] = mirroring_flag;
        bytes.extend(vec![0u8; 16 * 1024]);
        bytes.extend(vec![0u8; 8 * 1024]);
        Cartridge::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn palette_mirrors_every_fourth_entry() {
        let ppu = Ppu::new();
        assert_eq!(ppu.palette_index(0x3F10), 0x00);
        assert_eq!(ppu.palette_index(0x3F14), 0x04);
        assert_eq!(ppu.palette_index(0x3F04), 0x04);
    }

    #[test]
    fn vertical_mirroring_aliases_top_and_bottom() {
        let cart = nrom_cart(0x01);
        let ppu = Ppu::new();
        assert_eq!(ppu.nametable_index(&cart, 0x2000), ppu.nametable_index(&cart, 0x2800));
        assert_eq!(ppu.nametable_index(&cart, 0x2400), ppu.nametable_index(&cart, 0x2C00));
    }

    #[test]
    fn horizontal_mirroring_aliases_left_and_right() {
        let cart = nrom_cart(0x00);
        let ppu = Ppu::new();
        assert_eq!(ppu.nametable_index(&cart, 0x2000), ppu.nametable_index(&cart, 0x2400));
        assert_eq!(ppu.nametable_index(&cart, 0x2800), ppu.nametable_index(&cart, 0x2C00));
    }
}
