//! The 6502 processor status register (`P`).

use bitflags::bitflags;

bitflags! {
    /// CPU status flags, laid out exactly as they sit in the `P` register
    /// (bit 7 down to bit 0): N V U B D I Z C.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Status: u8 {
        /// Carry.
        const C = 1 << 0;
        /// Zero.
        const Z = 1 << 1;
        /// Interrupt disable.
        const I = 1 << 2;
        /// Decimal mode. Cosmetic on the NES's 6502: ADC/SBC never consult it.
        const D = 1 << 3;
        /// Break, set only on the copy of `P` pushed by PHP/BRK.
        const B = 1 << 4;
        /// Unused, always reads back as 1.
        const U = 1 << 5;
        /// Overflow.
        const V = 1 << 6;
        /// Negative.
        const N = 1 << 7;
    }
}

impl Status {
    /// Recompute Z and N from a result byte, leaving all other flags alone.
    pub fn set_zn(&mut self, value: u8) {
        self.set(Status::Z, value == 0);
        self.set(Status::N, value & 0x80 != 0);
    }
}
