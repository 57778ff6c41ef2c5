//! # Stack Instructions
//!
//! PHA, PHP, PLA and PLP. The stack lives in page one and grows downward.

use crate::cpu::status;
use crate::{MemoryBus, CPU};

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.push(cpu.a);
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed copy has B and bit 5 set.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.push(cpu.status() | status::BREAK | status::UNUSED);
}

/// Executes the PLA (Pull Accumulator) instruction.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.a = cpu.pop();
    cpu.set_zn(cpu.a);
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>) {
    let value = cpu.pop();
    cpu.set_status(value);
}
