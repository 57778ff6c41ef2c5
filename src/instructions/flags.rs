//! # Flag Instructions
//!
//! Set and clear individual status flags (CLC, SEC, CLI, SEI, CLD, SED, CLV).

use crate::{MemoryBus, CPU};

/// CLC: clear carry.
pub(crate) fn execute_clc<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.flag_c = false;
}

/// SEC: set carry.
pub(crate) fn execute_sec<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.flag_c = true;
}

/// CLI: clear interrupt disable.
pub(crate) fn execute_cli<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.flag_i = false;
}

/// SEI: set interrupt disable.
pub(crate) fn execute_sei<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.flag_i = true;
}

/// CLD: clear decimal mode.
pub(crate) fn execute_cld<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.flag_d = false;
}

/// SED: set decimal mode.
pub(crate) fn execute_sed<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.flag_d = true;
}

/// CLV: clear overflow.
pub(crate) fn execute_clv<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.flag_v = false;
}
