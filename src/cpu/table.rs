//! The static 256-entry opcode table.
//!
//! Each entry names the mnemonic (for disassembly), the addressing-mode
//! resolver, the operation handler, and the base cycle count. Dispatch is
//! a single array index — no vtables, no per-instruction allocation.

use super::addressing as am;
use super::instructions as op;
use super::{Cpu, CpuBus};

/// Function pointer shape shared by every addressing-mode resolver and
/// every operation handler: mutate `cpu`/`bus` and report whether a
/// page-cross bonus cycle is being requested.
pub type OpFn = fn(&mut Cpu, &mut dyn CpuBus) -> u8;

/// One row of the opcode table.
#[derive(Clone, Copy)]
pub struct OpcodeInfo {
    /// Mnemonic, exposed read-only for disassembly.
    pub mnemonic: &'static str,
    /// Addressing-mode resolver.
    pub addr_mode: OpFn,
    /// Operation handler.
    pub operate: OpFn,
    /// Base cycle count before any page-cross/branch bonuses.
    pub cycles: u8,
}

impl OpcodeInfo {
    /// Addressing mode name, for disassembly. Derived from the resolver
    /// function pointer rather than stored redundantly in every row.
    pub fn mode_name(&self) -> &'static str {
        addr_mode_shape(self.addr_mode).0
    }

    /// Instruction length in bytes (opcode + operand), for disassembly.
    pub fn byte_len(&self) -> u8 {
        addr_mode_shape(self.addr_mode).1
    }
}

fn addr_mode_shape(f: OpFn) -> (&'static str, u8) {
    if f == am::imp as OpFn {
        ("implied", 1)
    } else if f == am::imm as OpFn {
        ("immediate", 2)
    } else if f == am::zp0 as OpFn {
        ("zero_page", 2)
    } else if f == am::zpx as OpFn {
        ("zero_page_x", 2)
    } else if f == am::zpy as OpFn {
        ("zero_page_y", 2)
    } else if f == am::rel as OpFn {
        ("relative", 2)
    } else if f == am::abx as OpFn {
        ("absolute_x", 3)
    } else if f == am::aby as OpFn {
        ("absolute_y", 3)
    } else if f == am::ind as OpFn {
        ("indirect", 3)
    } else if f == am::izx as OpFn {
        ("indirect_x", 2)
    } else if f == am::izy as OpFn {
        ("indirect_y", 2)
    } else if f == am::abs as OpFn {
        ("absolute", 3)
    } else {
        ("implied", 1)
    }
}

/// Look up the mnemonic/addressing-mode/cycle metadata for a single opcode
/// byte. A thin, disassembly-friendly wrapper around [`OPCODES`] — the
/// pretty-printer itself is out of scope, but the table it would consult
/// is already here.
pub fn opcode_info(opcode: u8) -> OpcodeInfo {
    OPCODES[opcode as usize]
}

macro_rules! row {
    ($mnemonic:expr, $amode:expr, $op:expr, $cycles:expr) => {
        OpcodeInfo { mnemonic: $mnemonic, addr_mode: $amode, operate: $op, cycles: $cycles }
    };
}

const XXX: OpcodeInfo = row!("NOP", am::imp, op::nop, 2);

/// The 256-entry dispatch table, indexed directly by opcode byte.
pub static OPCODES: [OpcodeInfo; 256] = {
    let mut t = [XXX; 256];
    t[0x00] = row!("BRK", am::imm, op::brk, 7);
    t[0x01] = row!("ORA", am::izx, op::ora, 6);
    t[0x05] = row!("ORA", am::zp0, op::ora, 3);
    t[0x06] = row!("ASL", am::zp0, op::asl, 5);
    t[0x08] = row!("PHP", am::imp, op::php, 3);
    t[0x09] = row!("ORA", am::imm, op::ora, 2);
    t[0x0A] = row!("ASL", am::imp, op::asl, 2);
    t[0x0D] = row!("ORA", am::abs, op::ora, 4);
    t[0x0E] = row!("ASL", am::abs, op::asl, 6);
    t[0x10] = row!("BPL", am::rel, op::bpl, 2);
    t[0x11] = row!("ORA", am::izy, op::ora, 5);
    t[0x15] = row!("ORA", am::zpx, op::ora, 4);
    t[0x16] = row!("ASL", am::zpx, op::asl, 6);
    t[0x18] = row!("CLC", am::imp, op::clc, 2);
    t[0x19] = row!("ORA", am::aby, op::ora, 4);
    t[0x1C] = row!("NOP", am::abx, op::nop, 4);
    t[0x1D] = row!("ORA", am::abx, op::ora, 4);
    t[0x1E] = row!("ASL", am::abx, op::asl, 7);

    t[0x20] = row!("JSR", am::abs, op::jsr, 6);
    t[0x21] = row!("AND", am::izx, op::and, 6);
    t[0x24] = row!("BIT", am::zp0, op::bit, 3);
    t[0x25] = row!("AND", am::zp0, op::and, 3);
    t[0x26] = row!("ROL", am::zp0, op::rol, 5);
    t[0x28] = row!("PLP", am::imp, op::plp, 4);
    t[0x29] = row!("AND", am::imm, op::and, 2);
    t[0x2A] = row!("ROL", am::imp, op::rol, 2);
    t[0x2C] = row!("BIT", am::abs, op::bit, 4);
    t[0x2D] = row!("AND", am::abs, op::and, 4);
    t[0x2E] = row!("ROL", am::abs, op::rol, 6);
    t[0x30] = row!("BMI", am::rel, op::bmi, 2);
    t[0x31] = row!("AND", am::izy, op::and, 5);
    t[0x35] = row!("AND", am::zpx, op::and, 4);
    t[0x36] = row!("ROL", am::zpx, op::rol, 6);
    t[0x38] = row!("SEC", am::imp, op::sec, 2);
    t[0x39] = row!("AND", am::aby, op::and, 4);
    t[0x3C] = row!("NOP", am::abx, op::nop, 4);
    t[0x3D] = row!("AND", am::abx, op::and, 4);
    t[0x3E] = row!("ROL", am::abx, op::rol, 7);

    t[0x40] = row!("RTI", am::imp, op::rti, 6);
    t[0x41] = row!("EOR", am::izx, op::eor, 6);
    t[0x45] = row!("EOR", am::zp0, op::eor, 3);
    t[0x46] = row!("LSR", am::zp0, op::lsr, 5);
    t[0x48] = row!("PHA", am::imp, op::pha, 3);
    t[0x49] = row!("EOR", am::imm, op::eor, 2);
    t[0x4A] = row!("LSR", am::imp, op::lsr, 2);
    t[0x4C] = row!("JMP", am::abs, op::jmp, 3);
    t[0x4D] = row!("EOR", am::abs, op::eor, 4);
    t[0x4E] = row!("LSR", am::abs, op::lsr, 6);
    t[0x50] = row!("BVC", am::rel, op::bvc, 2);
    t[0x51] = row!("EOR", am::izy, op::eor, 5);
    t[0x55] = row!("EOR", am::zpx, op::eor, 4);
    t[0x56] = row!("LSR", am::zpx, op::lsr, 6);
    t[0x58] = row!("CLI", am::imp, op::cli, 2);
    t[0x59] = row!("EOR", am::aby, op::eor, 4);
    t[0x5C] = row!("NOP", am::abx, op::nop, 4);
    t[0x5D] = row!("EOR", am::abx, op::eor, 4);
    t[0x5E] = row!("LSR", am::abx, op::lsr, 7);

    t[0x60] = row!("RTS", am::imp, op::rts, 6);
    t[0x61] = row!("ADC", am::izx, op::adc, 6);
    t[0x65] = row!("ADC", am::zp0, op::adc, 3);
    t[0x66] = row!("ROR", am::zp0, op::ror, 5);
    t[0x68] = row!("PLA", am::imp, op::pla, 4);
    t[0x69] = row!("ADC", am::imm, op::adc, 2);
    t[0x6A] = row!("ROR", am::imp, op::ror, 2);
    t[0x6C] = row!("JMP", am::ind, op::jmp, 5);
    t[0x6D] = row!("ADC", am::abs, op::adc, 4);
    t[0x6E] = row!("ROR", am::abs, op::ror, 6);
    t[0x70] = row!("BVS", am::rel, op::bvs, 2);
    t[0x71] = row!("ADC", am::izy, op::adc, 5);
    t[0x75] = row!("ADC", am::zpx, op::adc, 4);
    t[0x76] = row!("ROR", am::zpx, op::ror, 6);
    t[0x78] = row!("SEI", am::imp, op::sei, 2);
    t[0x79] = row!("ADC", am::aby, op::adc, 4);
    t[0x7C] = row!("NOP", am::abx, op::nop, 4);
    t[0x7D] = row!("ADC", am::abx, op::adc, 4);
    t[0x7E] = row!("ROR", am::abx, op::ror, 7);

    t[0x81] = row!("STA", am::izx, op::sta, 6);
    t[0x84] = row!("STY", am::zp0, op::sty, 3);
    t[0x85] = row!("STA", am::zp0, op::sta, 3);
    t[0x86] = row!("STX", am::zp0, op::stx, 3);
    t[0x88] = row!("DEY", am::imp, op::dey, 2);
    t[0x8A] = row!("TXA", am::imp, op::txa, 2);
    t[0x8C] = row!("STY", am::abs, op::sty, 4);
    t[0x8D] = row!("STA", am::abs, op::sta, 4);
    t[0x8E] = row!("STX", am::abs, op::stx, 4);
    t[0x90] = row!("BCC", am::rel, op::bcc, 2);
    t[0x91] = row!("STA", am::izy, op::sta, 6);
    t[0x94] = row!("STY", am::zpx, op::sty, 4);
    t[0x95] = row!("STA", am::zpx, op::sta, 4);
    t[0x96] = row!("STX", am::zpy, op::stx, 4);
    t[0x98] = row!("TYA", am::imp, op::tya, 2);
    t[0x99] = row!("STA", am::aby, op::sta, 5);
    t[0x9A] = row!("TXS", am::imp, op::txs, 2);
    t[0x9D] = row!("STA", am::abx, op::sta, 5);

    t[0xA0] = row!("LDY", am::imm, op::ldy, 2);
    t[0xA1] = row!("LDA", am::izx, op::lda, 6);
    t[0xA2] = row!("LDX", am::imm, op::ldx, 2);
    t[0xA4] = row!("LDY", am::zp0, op::ldy, 3);
    t[0xA5] = row!("LDA", am::zp0, op::lda, 3);
    t[0xA6] = row!("LDX", am::zp0, op::ldx, 3);
    t[0xA8] = row!("TAY", am::imp, op::tay, 2);
    t[0xA9] = row!("LDA", am::imm, op::lda, 2);
    t[0xAA] = row!("TAX", am::imp, op::tax, 2);
    t[0xAC] = row!("LDY", am::abs, op::ldy, 4);
    t[0xAD] = row!("LDA", am::abs, op::lda, 4);
    t[0xAE] = row!("LDX", am::abs, op::ldx, 4);
    t[0xB0] = row!("BCS", am::rel, op::bcs, 2);
    t[0xB1] = row!("LDA", am::izy, op::lda, 5);
    t[0xB4] = row!("LDY", am::zpx, op::ldy, 4);
    t[0xB5] = row!("LDA", am::zpx, op::lda, 4);
    t[0xB6] = row!("LDX", am::zpy, op::ldx, 4);
    t[0xB8] = row!("CLV", am::imp, op::clv, 2);
    t[0xB9] = row!("LDA", am::aby, op::lda, 4);
    t[0xBA] = row!("TSX", am::imp, op::tsx, 2);
    t[0xBC] = row!("LDY", am::abx, op::ldy, 4);
    t[0xBD] = row!("LDA", am::abx, op::lda, 4);
    t[0xBE] = row!("LDX", am::aby, op::ldx, 4);

    t[0xC0] = row!("CPY", am::imm, op::cpy, 2);
    t[0xC1] = row!("CMP", am::izx, op::cmp, 6);
    t[0xC4] = row!("CPY", am::zp0, op::cpy, 3);
    t[0xC5] = row!("CMP", am::zp0, op::cmp, 3);
    t[0xC6] = row!("DEC", am::zp0, op::dec, 5);
    t[0xC8] = row!("INY", am::imp, op::iny, 2);
    t[0xC9] = row!("CMP", am::imm, op::cmp, 2);
    t[0xCA] = row!("DEX", am::imp, op::dex, 2);
    t[0xCC] = row!("CPY", am::abs, op::cpy, 4);
    t[0xCD] = row!("CMP", am::abs, op::cmp, 4);
    t[0xCE] = row!("DEC", am::abs, op::dec, 6);
    t[0xD0] = row!("BNE", am::rel, op::bne, 2);
    t[0xD1] = row!("CMP", am::izy, op::cmp, 5);
    t[0xD5] = row!("CMP", am::zpx, op::cmp, 4);
    t[0xD6] = row!("DEC", am::zpx, op::dec, 6);
    t[0xD8] = row!("CLD", am::imp, op::cld, 2);
    t[0xD9] = row!("CMP", am::aby, op::cmp, 4);
    t[0xDC] = row!("NOP", am::abx, op::nop, 4);
    t[0xDD] = row!("CMP", am::abx, op::cmp, 4);
    t[0xDE] = row!("DEC", am::abx, op::dec, 7);

    t[0xE0] = row!("CPX", am::imm, op::cpx, 2);
    t[0xE1] = row!("SBC", am::izx, op::sbc, 6);
    t[0xE4] = row!("CPX", am::zp0, op::cpx, 3);
    t[0xE5] = row!("SBC", am::zp0, op::sbc, 3);
    t[0xE6] = row!("INC", am::zp0, op::inc, 5);
    t[0xE8] = row!("INX", am::imp, op::inx, 2);
    t[0xE9] = row!("SBC", am::imm, op::sbc, 2);
    t[0xEA] = row!("NOP", am::imp, op::nop, 2);
    t[0xEC] = row!("CPX", am::abs, op::cpx, 4);
    t[0xED] = row!("SBC", am::abs, op::sbc, 4);
    t[0xEE] = row!("INC", am::abs, op::inc, 6);
    t[0xF0] = row!("BEQ", am::rel, op::beq, 2);
    t[0xF1] = row!("SBC", am::izy, op::sbc, 5);
    t[0xF5] = row!("SBC", am::zpx, op::sbc, 4);
    t[0xF6] = row!("INC", am::zpx, op::inc, 6);
    t[0xF8] = row!("SED", am::imp, op::sed, 2);
    t[0xF9] = row!("SBC", am::aby, op::sbc, 4);
    t[0xFC] = row!("NOP", am::abx, op::nop, 4);
    t[0xFD] = row!("SBC", am::abx, op::sbc, 4);
    t[0xFE] = row!("INC", am::abx, op::inc, 7);

    t
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_info_matches_known_rows() {
        let lda_imm = opcode_info(0xA9);
        assert_eq!(lda_imm.mnemonic, "LDA");
        assert_eq!(lda_imm.mode_name(), "immediate");
        assert_eq!(lda_imm.byte_len(), 2);

        let jmp_abs = opcode_info(0x4C);
        assert_eq!(jmp_abs.mode_name(), "absolute");
        assert_eq!(jmp_abs.byte_len(), 3);

        let brk = opcode_info(0x00);
        assert_eq!(brk.mnemonic, "BRK");
        assert_eq!(brk.byte_len(), 2);
    }

    #[test]
    fn unused_opcodes_fall_back_to_nop() {
        let row = opcode_info(0x02);
        assert_eq!(row.mnemonic, "NOP");
        assert_eq!(row.mode_name(), "implied");
    }
}
