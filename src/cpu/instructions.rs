//! Opcode operation handlers. Each function consumes the operand
//! `addr_mode` already resolved into `cpu.addr_abs`/`cpu.fetched`, performs
//! its effect, and returns 1 if it wants the page-cross bonus cycle
//! considered (only taken branches and a few memory ops do).

use super::status::Status;
use super::{Cpu, CpuBus};

fn set_zn(cpu: &mut Cpu, value: u8) {
    cpu.status.set_zn(value);
}

fn branch_if(cpu: &mut Cpu, condition: bool) -> u8 {
    if !condition {
        return 0;
    }
    cpu.cycles += 1;
    let target = cpu.pc.wrapping_add(cpu.addr_rel);
    let page_cross = (target & 0xFF00) != (cpu.pc & 0xFF00);
    cpu.pc = target;
    if page_cross {
        cpu.cycles += 1;
    }
    0
}

pub fn adc(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let m = cpu.fetch(bus);
    let carry_in = cpu.status.contains(Status::C) as u16;
    let sum = cpu.a as u16 + m as u16 + carry_in;
    let result = sum as u8;
    cpu.status.set(Status::C, sum > 0xFF);
    let overflow = (!(cpu.a ^ m) & (cpu.a ^ result)) & 0x80 != 0;
    cpu.status.set(Status::V, overflow);
    cpu.a = result;
    set_zn(cpu, cpu.a);
    1
}

pub fn sbc(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let m = cpu.fetch(bus) ^ 0xFF;
    let carry_in = cpu.status.contains(Status::C) as u16;
    let sum = cpu.a as u16 + m as u16 + carry_in;
    let result = sum as u8;
    cpu.status.set(Status::C, sum > 0xFF);
    let overflow = (!(cpu.a ^ m) & (cpu.a ^ result)) & 0x80 != 0;
    cpu.status.set(Status::V, overflow);
    cpu.a = result;
    set_zn(cpu, cpu.a);
    1
}

pub fn and(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let m = cpu.fetch(bus);
    cpu.a &= m;
    set_zn(cpu, cpu.a);
    1
}

pub fn ora(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let m = cpu.fetch(bus);
    cpu.a |= m;
    set_zn(cpu, cpu.a);
    1
}

pub fn eor(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let m = cpu.fetch(bus);
    cpu.a ^= m;
    set_zn(cpu, cpu.a);
    1
}

pub fn bit(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let m = cpu.fetch(bus);
    cpu.status.set(Status::Z, (cpu.a & m) == 0);
    cpu.status.set(Status::N, m & 0x80 != 0);
    cpu.status.set(Status::V, m & 0x40 != 0);
    0
}

pub fn cmp(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let m = cpu.fetch(bus);
    let result = cpu.a.wrapping_sub(m);
    cpu.status.set(Status::C, cpu.a >= m);
    set_zn(cpu, result);
    1
}

pub fn cpx(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let m = cpu.fetch(bus);
    let result = cpu.x.wrapping_sub(m);
    cpu.status.set(Status::C, cpu.x >= m);
    set_zn(cpu, result);
    0
}

pub fn cpy(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let m = cpu.fetch(bus);
    let result = cpu.y.wrapping_sub(m);
    cpu.status.set(Status::C, cpu.y >= m);
    set_zn(cpu, result);
    0
}

pub fn inc(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let m = bus.read(cpu.addr_abs).wrapping_add(1);
    bus.write(cpu.addr_abs, m);
    set_zn(cpu, m);
    0
}

pub fn inx(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.x = cpu.x.wrapping_add(1);
    set_zn(cpu, cpu.x);
    0
}

pub fn iny(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.y = cpu.y.wrapping_add(1);
    set_zn(cpu, cpu.y);
    0
}

pub fn dec(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let m = bus.read(cpu.addr_abs).wrapping_sub(1);
    bus.write(cpu.addr_abs, m);
    set_zn(cpu, m);
    0
}

pub fn dex(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.x = cpu.x.wrapping_sub(1);
    set_zn(cpu, cpu.x);
    0
}

pub fn dey(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.y = cpu.y.wrapping_sub(1);
    set_zn(cpu, cpu.y);
    0
}

fn shift_left(cpu: &mut Cpu, bus: &mut dyn CpuBus, rotate: bool) -> u8 {
    let m = cpu.fetch(bus);
    let carry_in = cpu.status.contains(Status::C) as u8;
    cpu.status.set(Status::C, m & 0x80 != 0);
    let result = (m << 1) | if rotate { carry_in } else { 0 };
    set_zn(cpu, result);
    cpu.write_back(bus, result);
    0
}

fn shift_right(cpu: &mut Cpu, bus: &mut dyn CpuBus, rotate: bool) -> u8 {
    let m = cpu.fetch(bus);
    let carry_in = cpu.status.contains(Status::C) as u8;
    cpu.status.set(Status::C, m & 0x01 != 0);
    let result = (m >> 1) | if rotate { carry_in << 7 } else { 0 };
    set_zn(cpu, result);
    cpu.write_back(bus, result);
    0
}

pub fn asl(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    shift_left(cpu, bus, false)
}
pub fn rol(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    shift_left(cpu, bus, true)
}
pub fn lsr(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    shift_right(cpu, bus, false)
}
pub fn ror(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    shift_right(cpu, bus, true)
}

pub fn lda(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    cpu.a = cpu.fetch(bus);
    set_zn(cpu, cpu.a);
    1
}
pub fn ldx(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    cpu.x = cpu.fetch(bus);
    set_zn(cpu, cpu.x);
    1
}
pub fn ldy(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    cpu.y = cpu.fetch(bus);
    set_zn(cpu, cpu.y);
    1
}
pub fn sta(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    bus.write(cpu.addr_abs, cpu.a);
    0
}
pub fn stx(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    bus.write(cpu.addr_abs, cpu.x);
    0
}
pub fn sty(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    bus.write(cpu.addr_abs, cpu.y);
    0
}

pub fn tax(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.x = cpu.a;
    set_zn(cpu, cpu.x);
    0
}
pub fn tay(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.y = cpu.a;
    set_zn(cpu, cpu.y);
    0
}
pub fn txa(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.a = cpu.x;
    set_zn(cpu, cpu.a);
    0
}
pub fn tya(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.a = cpu.y;
    set_zn(cpu, cpu.a);
    0
}
pub fn tsx(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.x = cpu.sp;
    set_zn(cpu, cpu.x);
    0
}
pub fn txs(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.sp = cpu.x;
    0
}

pub fn pha(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    cpu.push(bus, cpu.a);
    0
}
pub fn pla(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    cpu.a = cpu.pop(bus);
    set_zn(cpu, cpu.a);
    0
}
pub fn php(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let value = (cpu.status | Status::B | Status::U).bits();
    cpu.push(bus, value);
    0
}
pub fn plp(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let value = cpu.pop(bus);
    cpu.status = Status::from_bits_truncate(value);
    cpu.status.insert(Status::U);
    0
}

pub fn jmp(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.pc = cpu.addr_abs;
    0
}
pub fn jsr(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let ret = cpu.pc.wrapping_sub(1);
    cpu.push(bus, (ret >> 8) as u8);
    cpu.push(bus, ret as u8);
    cpu.pc = cpu.addr_abs;
    0
}
pub fn rts(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let lo = cpu.pop(bus) as u16;
    let hi = cpu.pop(bus) as u16;
    cpu.pc = ((hi << 8) | lo).wrapping_add(1);
    0
}

pub fn brk(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    cpu.pc = cpu.pc.wrapping_add(1);
    cpu.push(bus, (cpu.pc >> 8) as u8);
    cpu.push(bus, cpu.pc as u8);
    let value = (cpu.status | Status::B | Status::U).bits();
    cpu.push(bus, value);
    cpu.status.insert(Status::I);
    let lo = bus.read(0xFFFE) as u16;
    let hi = bus.read(0xFFFF) as u16;
    cpu.pc = (hi << 8) | lo;
    0
}

pub fn rti(cpu: &mut Cpu, bus: &mut dyn CpuBus) -> u8 {
    let value = cpu.pop(bus);
    cpu.status = Status::from_bits_truncate(value);
    cpu.status.remove(Status::B);
    cpu.status.insert(Status::U);
    let lo = cpu.pop(bus) as u16;
    let hi = cpu.pop(bus) as u16;
    cpu.pc = (hi << 8) | lo;
    0
}

pub fn bcc(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    branch_if(cpu, !cpu.status.contains(Status::C))
}
pub fn bcs(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    branch_if(cpu, cpu.status.contains(Status::C))
}
pub fn bne(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    branch_if(cpu, !cpu.status.contains(Status::Z))
}
pub fn beq(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    branch_if(cpu, cpu.status.contains(Status::Z))
}
pub fn bpl(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    branch_if(cpu, !cpu.status.contains(Status::N))
}
pub fn bmi(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    branch_if(cpu, cpu.status.contains(Status::N))
}
pub fn bvc(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    branch_if(cpu, !cpu.status.contains(Status::V))
}
pub fn bvs(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    branch_if(cpu, cpu.status.contains(Status::V))
}

pub fn clc(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.status.remove(Status::C);
    0
}
pub fn cld(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.status.remove(Status::D);
    0
}
pub fn cli(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.status.remove(Status::I);
    0
}
pub fn clv(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.status.remove(Status::V);
    0
}
pub fn sec(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.status.insert(Status::C);
    0
}
pub fn sed(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.status.insert(Status::D);
    0
}
pub fn sei(cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    cpu.status.insert(Status::I);
    0
}

/// Covers both the official NOP ($EA) and the unofficial NOP variants at
/// $1C/$3C/$5C/$7C/$DC/$FC, which use absolute-X addressing and therefore
/// want the page-cross bonus like any other ABX read.
pub fn nop(_cpu: &mut Cpu, _bus: &mut dyn CpuBus) -> u8 {
    1
}
