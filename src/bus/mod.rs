//! The bus wires the three chips and 2 KiB of work RAM, arbitrates every
//! master tick, and owns the OAM-DMA state machine and the two
//! controller ports.

mod cpu_interface;
mod dma;

use crate::cartridge::Cartridge;
use crate::controller::Controller;
use crate::cpu::Cpu;
use crate::ppu::{Ppu, PixelSink};

use dma::DmaState;

pub struct Bus {
    wram: [u8; 2048],
    cartridge: Option<Cartridge>,
    cpu: Cpu,
    ppu: Ppu,
    controllers: [Controller; 2],
    dma: DmaState,
    master_counter: u32,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    pub fn new() -> Self {
        Bus {
            wram: [0; 2048],
            cartridge: None,
            cpu: Cpu::new(),
            ppu: Ppu::new(),
            controllers: [Controller::new(), Controller::new()],
            dma: DmaState::default(),
            master_counter: 0,
        }
    }

    pub fn load_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = Some(cartridge);
        self.reset();
    }

    /// Reset cancels any in-flight DMA, clears the master counter, and
    /// resets all three chips to their documented post-power state.
    pub fn reset(&mut self) {
        self.master_counter = 0;
        self.dma.reset();
        self.ppu.reset();
        let mut cpu = std::mem::replace(&mut self.cpu, Cpu::new());
        cpu.reset(self);
        self.cpu = cpu;
    }

    pub fn set_controller_state(&mut self, port: usize, mask: u8) {
        self.controllers[port].set_state_mask(mask);
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn take_frame_completed(&mut self) -> bool {
        self.ppu.take_frame_completed()
    }

    /// Advance one master tick: clock the PPU, clock the CPU or step DMA
    /// every third tick, then deliver any pending vblank NMI.
    pub fn tick(&mut self, sink: &mut dyn PixelSink) {
        if self.cartridge.is_none() {
            // Nothing to clock before a ROM is loaded; the host should not
            // be driving ticks yet, but treat it as a harmless no-op.
            self.master_counter = self.master_counter.wrapping_add(1);
            return;
        }

        {
            let mut cart = self.cartridge.take();
            self.ppu.clock(cart.as_mut().expect("checked above"), sink);
            self.cartridge = cart;
        }

        if self.master_counter % 3 == 0 {
            if self.dma.active {
                self.step_dma();
            } else {
                let mut cpu = std::mem::replace(&mut self.cpu, Cpu::new());
                cpu.clock(self);
                self.cpu = cpu;
            }
        }

        if self.ppu.take_pending_nmi() {
            let mut cpu = std::mem::replace(&mut self.cpu, Cpu::new());
            cpu.nmi(self);
            self.cpu = cpu;
        }

        self.master_counter = self.master_counter.wrapping_add(1);
    }

    fn step_dma(&mut self) {
        if self.dma.idle {
            if self.master_counter % 2 == 1 {
                self.dma.idle = false;
            }
            return;
        }

        if self.master_counter % 2 == 0 {
            let addr = self.dma.source_addr();
            self.dma.data = self.cpu_bus_read(addr);
        } else {
            let data = self.dma.data;
            let addr = self.dma.addr;
            self.ppu.oam_mut()[addr as usize] = data;
            self.dma.addr = self.dma.addr.wrapping_add(1);
            if self.dma.addr == 0 {
                self.dma.active = false;
                self.dma.idle = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::test_support::nrom_image;

    fn bus_with_rom() -> Bus {
        let mut bus = Bus::new();
        let cart = Cartridge::from_bytes(&nrom_image(2)).unwrap();
        bus.load_cartridge(cart);
        bus
    }

    struct NullSink;
    impl PixelSink for NullSink {
        fn put_pixel(&mut self, _x: u8, _y: u8, _r: u8, _g: u8, _b: u8) {}
    }

    #[test]
    fn cpu_clocks_on_exactly_one_third_of_ticks() {
        let mut bus = bus_with_rom();
        let mut sink = NullSink;
        let start = bus.cpu().clock_count();
        for _ in 0..9 {
            bus.tick(&mut sink);
        }
        assert_eq!(bus.cpu().clock_count() - start, 3);
    }

    #[test]
    fn oam_dma_copies_256_bytes_in_order() {
        let mut bus = bus_with_rom();
        let mut sink = NullSink;
        for i in 0..256u16 {
            bus.wram[0x0200 + i as usize] = i as u8;
        }
        // Align to an even, %3==0 master tick before triggering DMA.
        while bus.master_counter % 3 != 0 || bus.master_counter % 2 != 0 {
            bus.tick(&mut sink);
        }
        bus.cpu_bus_write(0x4014, 0x02);
        assert!(bus.dma.active);

        while bus.dma.active {
            bus.tick(&mut sink);
        }

        for i in 0..256usize {
            assert_eq!(bus.ppu.oam_mut()[i], i as u8);
        }
    }

    #[test]
    fn wram_mirrors_every_0x800() {
        let mut bus = bus_with_rom();
        bus.cpu_bus_write(0x0000, 0x55);
        assert_eq!(bus.cpu_bus_read(0x0800), 0x55);
    }

    #[test]
    fn reset_clears_dma_and_master_counter() {
        let mut bus = bus_with_rom();
        bus.cpu_bus_write(0x4014, 0x02);
        bus.master_counter = 42;
        bus.reset();
        assert_eq!(bus.master_counter, 0);
        assert!(!bus.dma.active);
    }
}
