//! Interrupt request lines shared between the CPU and peripherals.
//!
//! The 6502 has two interrupt inputs:
//!
//! - **NMI** (non-maskable): edge-triggered. Serviced once at the next
//!   instruction boundary after the line goes from released to asserted,
//!   regardless of the I flag.
//! - **IRQ** (maskable): level-sensitive. The CPU re-enters the handler at
//!   every instruction boundary while the line is asserted and I is clear, so
//!   the device that raised it must drop it once acknowledged.
//!
//! A line is a cheap, clonable handle. The CPU owns one handle per line and
//! peripherals such as the [`Pia`](super::Pia) receive clones at construction,
//! which keeps device ownership with the [`Bus`](crate::Bus) and avoids any
//! pointer from a device back to the CPU.
//!
//! Lines are wired-OR: every handle is a separate source, and the line reads
//! asserted while any source holds it. Lowering a handle only withdraws that
//! handle's own request.
//!
//! # Example
//!
//! ```rust
//! use emu6502::InterruptLine;
//!
//! let line = InterruptLine::new();
//! let device_a = line.clone();
//! let device_b = line.clone();
//!
//! device_a.raise();
//! device_b.raise();
//! assert!(line.is_raised());
//!
//! device_a.lower();
//! assert!(line.is_raised());
//!
//! device_b.lower();
//! assert!(!line.is_raised());
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// One source's handle on an interrupt request line.
///
/// Clones share the line but not the request: each handle asserts or
/// releases only its own contribution, and dropping a handle releases it.
/// Handles are `!Send`; the emulation core is single-threaded.
#[derive(Default)]
pub struct InterruptLine {
    /// Number of handles currently asserting the line
    sources: Rc<Cell<u32>>,
    asserting: Cell<bool>,
}

impl InterruptLine {
    /// Creates a released line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Asserts the line on behalf of this handle.
    pub fn raise(&self) {
        self.set(true);
    }

    /// Withdraws this handle's request.
    pub fn lower(&self) {
        self.set(false);
    }

    /// Drives this handle's request to `asserted`.
    pub fn set(&self, asserted: bool) {
        if asserted == self.asserting.get() {
            return;
        }
        self.asserting.set(asserted);
        let sources = self.sources.get();
        self.sources.set(if asserted { sources + 1 } else { sources - 1 });
    }

    /// Returns true while any handle asserts the line.
    pub fn is_raised(&self) -> bool {
        self.sources.get() > 0
    }

    /// Returns true if this handle is one of the sources asserting the line.
    pub fn is_asserting(&self) -> bool {
        self.asserting.get()
    }
}

impl Clone for InterruptLine {
    /// A new, released source on the same line.
    fn clone(&self) -> Self {
        Self {
            sources: Rc::clone(&self.sources),
            asserting: Cell::new(false),
        }
    }
}

impl Drop for InterruptLine {
    fn drop(&mut self) {
        self.lower();
    }
}

impl fmt::Debug for InterruptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterruptLine")
            .field("raised", &self.is_raised())
            .field("asserting", &self.is_asserting())
            .finish()
    }
}

/// The CPU's pair of interrupt inputs.
///
/// Build this first when peripherals need a line before the CPU exists, then
/// hand it to [`CPU::with_lines`](crate::CPU::with_lines).
#[derive(Debug, Clone, Default)]
pub struct InterruptLines {
    /// Non-maskable interrupt request.
    pub nmi: InterruptLine,

    /// Maskable interrupt request.
    pub irq: InterruptLine,
}

impl InterruptLines {
    /// Creates both lines released.
    pub fn new() -> Self {
        Self::default()
    }
}
