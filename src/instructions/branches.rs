//! # Branch Instructions
//!
//! Conditional relative branches (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS).
//!
//! The operand arrives already resolved to the branch target. A taken branch
//! costs one extra cycle, and one more if the target lies on a different page
//! than the instruction that follows the branch.

use crate::cpu::Operand;
use crate::{Instruction, MemoryBus, CPU};

/// Returns true if `instruction`'s condition holds for the current flags.
fn condition_met<M: MemoryBus>(cpu: &CPU<M>, instruction: Instruction) -> bool {
    match instruction {
        Instruction::Bcc => !cpu.flag_c,
        Instruction::Bcs => cpu.flag_c,
        Instruction::Bne => !cpu.flag_z,
        Instruction::Beq => cpu.flag_z,
        Instruction::Bpl => !cpu.flag_n,
        Instruction::Bmi => cpu.flag_n,
        Instruction::Bvc => !cpu.flag_v,
        Instruction::Bvs => cpu.flag_v,
        _ => false,
    }
}

/// Executes a branch and returns the extra cycles it costs.
pub(crate) fn execute_branch<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: Instruction,
    operand: Operand,
) -> u8 {
    let Operand::Memory { addr, page_crossed } = operand else {
        return 0;
    };
    if !condition_met(cpu, instruction) {
        return 0;
    }

    cpu.pc = addr;
    if page_crossed {
        2
    } else {
        1
    }
}
