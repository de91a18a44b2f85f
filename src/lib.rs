#![doc = r#"
nesquik: a cycle-driven NES (6502 + 2C02) emulation core.

This crate exposes the emulator core modules for use by binaries, tools,
and tests. There is no built-in APU; the bus and CPU timing model is
cycle-driven rather than instruction-driven, matching how a real NES
interleaves CPU, PPU, and OAM-DMA work on a shared master clock.

Modules:
- error: ROM-loading failure modes (`NesError`, `Result`)
- mapper: the `Mapper` enum and its per-board address translation
- cartridge: iNES v1 loader, PRG/CHR storage, mirroring
- cpu: 6502 interpreter with cycle-debt timing and the `CpuBus` seam
- ppu: 2C02 background/foreground pixel pipeline, MMIO, `PixelSink`
- controller: two-port NES controller shift registers
- bus: wires CPU/PPU/cartridge/controllers, owns OAM-DMA and master timing
- nes: host-facing facade (`Nes`) driving stepped or framed playback

In tests, a shared iNES builder is available under
`crate::cartridge::test_support`.
"#]

pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod error;
pub mod mapper;
pub mod nes;
pub mod ppu;

pub use error::{NesError, Result};
pub use nes::Nes;
pub use ppu::{FrameBuffer, PixelSink};
