//! # Load Instructions
//!
//! LDA, LDX and LDY copy the operand into a register and update Z and N.
//! Stores (STA, STX, STY) affect no flags and are a plain
//! [`CPU::store`](crate::CPU) in the dispatcher.

use crate::cpu::Operand;
use crate::{MemoryBus, CPU};

/// Executes the LDA (Load Accumulator) instruction.
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.a = cpu.load(operand);
    cpu.set_zn(cpu.a);
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.x = cpu.load(operand);
    cpu.set_zn(cpu.x);
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.y = cpu.load(operand);
    cpu.set_zn(cpu.y);
}
