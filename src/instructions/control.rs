//! # Control Flow Instructions
//!
//! JMP, JSR, RTS, RTI and BRK. NOP has no effect and is handled by the
//! dispatcher.

use crate::cpu::{Operand, IRQ_VECTOR};
use crate::{MemoryBus, CPU};

/// Executes the JMP instruction (absolute or indirect).
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    if let Operand::Memory { addr, .. } = operand {
        cpu.pc = addr;
    }
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last byte of the JSR (return address - 1),
/// high byte first, then jumps.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    if let Operand::Memory { addr, .. } = operand {
        let last_byte = cpu.pc.wrapping_sub(1);
        cpu.push_word(last_byte);
        cpu.pc = addr;
    }
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.pc = cpu.pop_word().wrapping_add(1);
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status register (ignoring B and bit 5), then the program counter.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>) {
    let status = cpu.pop();
    cpu.set_status(status);
    cpu.pc = cpu.pop_word();
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// BRK is a two-byte instruction: the byte after the opcode is skipped on
/// return. The pushed status has B set.
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>) {
    // PC already points past the opcode
    let return_addr = cpu.pc.wrapping_add(1);
    tracing::debug!(
        pc = format_args!("${:04X}", return_addr.wrapping_sub(2)),
        "BRK"
    );
    cpu.enter_interrupt(IRQ_VECTOR, return_addr, true);
}
