//! # Transfer Instructions
//!
//! Register-to-register copies. All except TXS update Z and N.

use crate::{MemoryBus, CPU};

/// TAX: A -> X
pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.a;
    cpu.set_zn(cpu.x);
}

/// TAY: A -> Y
pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.a;
    cpu.set_zn(cpu.y);
}

/// TXA: X -> A
pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.a = cpu.x;
    cpu.set_zn(cpu.a);
}

/// TYA: Y -> A
pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.a = cpu.y;
    cpu.set_zn(cpu.a);
}

/// TSX: SP -> X
pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.sp;
    cpu.set_zn(cpu.x);
}

/// TXS: X -> SP (flags unaffected)
pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.sp = cpu.x;
}
