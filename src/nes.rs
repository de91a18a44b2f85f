//! Top-level host-facing facade: owns a [`Bus`], loads ROMs, and
//! exposes the stepped and framed APIs a debugger or frontend drives.

use std::path::Path;

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::error::Result;
use crate::ppu::{FrameBuffer, PixelSink};

pub struct Nes {
    bus: Bus,
}

impl Default for Nes {
    fn default() -> Self {
        Self::new()
    }
}

impl Nes {
    pub fn new() -> Self {
        Nes { bus: Bus::new() }
    }

    pub fn load_cartridge<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let cartridge = Cartridge::load(path)?;
        self.bus.load_cartridge(cartridge);
        Ok(())
    }

    pub fn load_cartridge_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let cartridge = Cartridge::from_bytes(bytes)?;
        self.bus.load_cartridge(cartridge);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.bus.reset();
    }

    pub fn set_controller_state(&mut self, port: usize, buttons: u8) {
        self.bus.set_controller_state(port, buttons);
    }

    /// Advance the bus until the CPU reaches an instruction boundary.
    pub fn step_instruction(&mut self, sink: &mut dyn PixelSink) {
        self.bus.tick(sink);
        while !self.bus.cpu().at_instruction_boundary() {
            self.bus.tick(sink);
        }
    }

    /// Advance the bus until the PPU reports a completed frame.
    pub fn step_frame(&mut self, sink: &mut dyn PixelSink) {
        loop {
            self.bus.tick(sink);
            if self.bus.take_frame_completed() {
                break;
            }
        }
    }

    /// Convenience wrapper: run one frame into a fresh [`FrameBuffer`].
    pub fn render_frame(&mut self) -> FrameBuffer {
        let mut fb = FrameBuffer::new();
        self.step_frame(&mut fb);
        fb
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::test_support::nrom_image;

    #[test]
    fn step_frame_produces_a_full_framebuffer() {
        let mut nes = Nes::new();
        nes.load_cartridge_bytes(&nrom_image(2)).unwrap();
        let fb = nes.render_frame();
        assert_eq!(fb.as_rgb().len(), 256 * 240 * 3);
    }

    #[test]
    fn step_instruction_advances_past_reset_debt() {
        let mut nes = Nes::new();
        nes.load_cartridge_bytes(&nrom_image(2)).unwrap();
        let mut fb = FrameBuffer::new();
        let start = nes.bus().cpu().clock_count();
        nes.step_instruction(&mut fb);
        assert!(nes.bus().cpu().clock_count() > start);
        assert!(nes.bus().cpu().at_instruction_boundary());
    }

    #[test]
    fn rejects_bad_rom_bytes() {
        let mut nes = Nes::new();
        assert!(nes.load_cartridge_bytes(&[0u8; 4]).is_err());
    }
}
