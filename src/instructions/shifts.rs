//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR, on the accumulator or on memory. The bit shifted
//! out lands in carry; Z and N reflect the result.

use crate::cpu::Operand;
use crate::{MemoryBus, CPU};

/// Read-modify-write helper: `op` maps the old value to `(result, carry)`.
fn modify<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand, op: impl FnOnce(u8) -> (u8, bool)) {
    let (result, carry) = op(cpu.load(operand));
    cpu.store(operand, result);
    cpu.flag_c = carry;
    cpu.set_zn(result);
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    modify(cpu, operand, |value| (value << 1, value & 0x80 != 0));
}

/// Executes the LSR (Logical Shift Right) instruction.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    modify(cpu, operand, |value| (value >> 1, value & 0x01 != 0));
}

/// Executes the ROL (Rotate Left) instruction.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let carry_in = cpu.flag_c as u8;
    modify(cpu, operand, |value| ((value << 1) | carry_in, value & 0x80 != 0));
}

/// Executes the ROR (Rotate Right) instruction.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let carry_in = (cpu.flag_c as u8) << 7;
    modify(cpu, operand, |value| ((value >> 1) | carry_in, value & 0x01 != 0));
}
