//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the clock-driven fetch/execute state machine.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, D, I, Z, C (individual bool fields)
//! - **Cycle budget**: cycles left before the in-flight instruction completes
//! - **Interrupt lines**: NMI and IRQ request inputs
//!
//! ## Execution Model
//!
//! Each call to `exec()` is one clock tick. When no instruction is in flight
//! the tick samples the interrupt lines, then decodes and fully executes the
//! next opcode and loads the cycle budget with its cost. Subsequent ticks only
//! count the budget down. `step()` ticks until the next instruction boundary.

use crate::addressing::AddressingMode;
use crate::devices::{InterruptLine, InterruptLines};
use crate::instructions;
use crate::opcodes;
use crate::{EmulationError, MemoryBus};

/// Address of the NMI vector (low byte; high byte follows).
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Address of the reset vector (low byte; high byte follows).
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Address of the IRQ/BRK vector (low byte; high byte follows).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles spent entering an NMI or IRQ handler.
pub const INTERRUPT_CYCLES: u8 = 8;

/// Base address of the hardware stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// Status register bit masks (NV-BDIZC).
pub mod status {
    /// Carry
    pub const CARRY: u8 = 0b0000_0001;
    /// Zero
    pub const ZERO: u8 = 0b0000_0010;
    /// Interrupt disable
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100;
    /// Decimal mode
    pub const DECIMAL: u8 = 0b0000_1000;
    /// Break: only ever present in a pushed copy of the status register
    pub const BREAK: u8 = 0b0001_0000;
    /// Unused, always reads as 1
    pub const UNUSED: u8 = 0b0010_0000;
    /// Overflow
    pub const OVERFLOW: u8 = 0b0100_0000;
    /// Negative
    pub const NEGATIVE: u8 = 0b1000_0000;
}

/// A resolved instruction operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    /// No operand.
    Implied,
    /// The accumulator register.
    Accumulator,
    /// A constant from the instruction stream.
    Immediate(u8),
    /// An effective address; for branches, the branch target.
    Memory { addr: u16, page_crossed: bool },
}

impl Operand {
    fn at(addr: u16) -> Self {
        Operand::Memory {
            addr,
            page_crossed: false,
        }
    }

    fn indexed((addr, page_crossed): (u16, bool)) -> Self {
        Operand::Memory { addr, page_crossed }
    }

    /// Returns true if indexing crossed a page boundary.
    pub(crate) fn page_crossed(&self) -> bool {
        matches!(
            self,
            Operand::Memory {
                page_crossed: true,
                ..
            }
        )
    }
}

/// 6502 CPU state and execution context.
///
/// The CPU struct contains all processor state including registers, flags,
/// program counter, stack pointer, cycle budget and interrupt lines. It is
/// generic over the memory implementation via the `MemoryBus` trait.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use emu6502::{AddressRange, Bus, MemoryBus, Ram, CPU};
///
/// let mut bus = Bus::new();
/// bus.add_device(Box::new(Ram::new(AddressRange::with_size(0x0000, 0x10000).unwrap())));
/// bus.write(0xFFFC, 0x00); // Reset vector low byte
/// bus.write(0xFFFD, 0x80); // Reset vector high byte (PC = 0x8000)
///
/// let cpu = CPU::new(bus);
///
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFF);
/// assert_eq!(cpu.status(), 0x20);
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Negative flag (set if bit 7 of result is 1)
    pub(crate) flag_n: bool,

    /// Overflow flag (set on signed overflow)
    pub(crate) flag_v: bool,

    /// Decimal mode flag (enables BCD arithmetic)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag (blocks IRQ when set)
    pub(crate) flag_i: bool,

    /// Zero flag (set if result is zero)
    pub(crate) flag_z: bool,

    /// Carry flag (set on unsigned overflow/underflow)
    pub(crate) flag_c: bool,

    /// Cycles remaining for the in-flight instruction (0 = fetch next)
    pub(crate) cycles: u8,

    /// Clock ticks executed since construction
    pub(crate) total_cycles: u64,

    /// NMI and IRQ request lines
    pub(crate) lines: InterruptLines,

    /// The current NMI assertion has been serviced; cleared when the line
    /// is released
    pub(crate) nmi_serviced: bool,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU bound to `memory`, with its own released interrupt
    /// lines, and resets it.
    ///
    /// Peripherals that need to raise interrupts can be given a handle from
    /// [`irq_line`](CPU::irq_line) or [`nmi_line`](CPU::nmi_line).
    pub fn new(memory: M) -> Self {
        Self::with_lines(memory, InterruptLines::new())
    }

    /// Creates a new CPU driven by pre-built interrupt lines, and resets it.
    ///
    /// Use this when devices on the bus were wired to the lines before the CPU
    /// existed.
    ///
    /// # Examples
    ///
    /// ```
    /// use emu6502::{Bus, InterruptLines, Pia, CPU};
    ///
    /// let lines = InterruptLines::new();
    /// let mut bus = Bus::new();
    /// bus.add_device(Box::new(Pia::new(0xD010, lines.irq.clone()).unwrap()));
    ///
    /// let cpu = CPU::with_lines(bus, lines);
    /// assert!(!cpu.irq_line().is_raised());
    /// ```
    pub fn with_lines(memory: M, lines: InterruptLines) -> Self {
        let mut cpu = Self {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: 0,
            flag_n: false,
            flag_v: false,
            flag_d: false,
            flag_i: false,
            flag_z: false,
            flag_c: false,
            cycles: 0,
            total_cycles: 0,
            lines,
            nmi_serviced: false,
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Reinitializes the processor.
    ///
    /// - PC is loaded from the reset vector at 0xFFFC/0xFFFD (little-endian)
    /// - A, X and Y are zeroed
    /// - SP is set to 0xFF
    /// - Status is set to 0x20 (all flags clear)
    /// - Any in-flight instruction is abandoned
    ///
    /// The NMI and IRQ lines are left as they are.
    pub fn reset(&mut self) {
        self.pc = self.read_word(RESET_VECTOR);
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFF;
        self.set_status(status::UNUSED);
        self.cycles = 0;
        tracing::debug!(pc = format_args!("${:04X}", self.pc), "cpu reset");
    }

    /// Advances the CPU by one clock tick.
    ///
    /// With no instruction in flight this samples the interrupt lines, then
    /// either enters a pending interrupt or executes the next instruction in
    /// full, and loads the cycle budget with its cost. Otherwise it just
    /// consumes one cycle of the budget.
    ///
    /// # Errors
    ///
    /// Returns [`EmulationError::IllegalOpcode`] if the byte at PC is not a
    /// documented opcode. PC is left pointing at that byte and no cycle is
    /// consumed; the caller must stop running the CPU.
    pub fn exec(&mut self) -> Result<(), EmulationError> {
        if self.cycles == 0 {
            self.cycles = self.fetch()?;
        }
        self.cycles -= 1;
        self.total_cycles += 1;
        Ok(())
    }

    /// Runs clock ticks until the next instruction boundary.
    ///
    /// Returns the number of ticks consumed. From a boundary that is the full
    /// cost of one instruction (or interrupt entry); from the middle of an
    /// instruction it is the remainder of that instruction.
    ///
    /// # Examples
    ///
    /// ```
    /// use emu6502::{AddressRange, Bus, MemoryBus, Ram, CPU};
    ///
    /// let mut bus = Bus::new();
    /// bus.add_device(Box::new(Ram::new(AddressRange::with_size(0x0000, 0x10000).unwrap())));
    /// bus.write(0xFFFD, 0x80);
    /// bus.write(0x8000, 0xA9); // LDA #$42
    /// bus.write(0x8001, 0x42);
    ///
    /// let mut cpu = CPU::new(bus);
    /// assert_eq!(cpu.step().unwrap(), 2);
    /// assert_eq!(cpu.a(), 0x42);
    /// assert_eq!(cpu.pc(), 0x8002);
    /// ```
    pub fn step(&mut self) -> Result<u32, EmulationError> {
        let mut ticks = 0;
        loop {
            self.exec()?;
            ticks += 1;
            if self.cycles == 0 {
                return Ok(ticks);
            }
        }
    }

    /// Runs the CPU for at least `cycle_budget` clock ticks.
    ///
    /// Whole instructions are executed, so the returned tick count may exceed
    /// the budget by up to one instruction. This is useful for frame-locked
    /// execution models.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, EmulationError> {
        let start_cycles = self.total_cycles;
        let target_cycles = start_cycles + cycle_budget;

        while self.total_cycles < target_cycles {
            self.step()?;
        }

        Ok(self.total_cycles - start_cycles)
    }

    /// Decodes and executes one instruction or interrupt entry, returning its
    /// total cycle cost.
    fn fetch(&mut self) -> Result<u8, EmulationError> {
        if !self.lines.nmi.is_raised() {
            self.nmi_serviced = false;
        } else if !self.nmi_serviced {
            self.nmi_serviced = true;
            // Withdraw a request made through set_nmi; devices holding the
            // line keep it asserted until they release it
            self.lines.nmi.lower();
            tracing::debug!(pc = format_args!("${:04X}", self.pc), "servicing NMI");
            self.enter_interrupt(NMI_VECTOR, self.pc, false);
            return Ok(INTERRUPT_CYCLES);
        }
        if self.lines.irq.is_raised() && !self.flag_i {
            tracing::debug!(pc = format_args!("${:04X}", self.pc), "servicing IRQ");
            self.enter_interrupt(IRQ_VECTOR, self.pc, false);
            return Ok(INTERRUPT_CYCLES);
        }

        let pc = self.pc;
        let opcode = self.memory.read(pc);
        let Some(metadata) = opcodes::lookup(opcode) else {
            tracing::warn!(
                pc = format_args!("${:04X}", pc),
                opcode = format_args!("${:02X}", opcode),
                "illegal opcode"
            );
            return Err(EmulationError::IllegalOpcode { opcode, pc });
        };

        tracing::trace!(
            pc = format_args!("${:04X}", pc),
            opcode = format_args!("${:02X}", opcode),
            mnemonic = metadata.mnemonic(),
            "execute"
        );

        let operand = self.resolve_operand(metadata.addressing_mode);
        self.pc = pc.wrapping_add(metadata.size_bytes() as u16);

        let mut cycles = metadata.base_cycles;
        if metadata.instruction.has_page_penalty() && operand.page_crossed() {
            cycles += 1;
        }
        cycles += instructions::execute(self, metadata.instruction, operand);

        Ok(cycles)
    }

    /// Pushes a return address and status, sets I and jumps through `vector`.
    ///
    /// `brk` selects the B bit of the pushed status: set for BRK, clear for
    /// hardware interrupts.
    pub(crate) fn enter_interrupt(&mut self, vector: u16, return_addr: u16, brk: bool) {
        self.push_word(return_addr);
        let pushed = if brk {
            self.status() | status::BREAK
        } else {
            self.status()
        };
        self.push(pushed);
        self.flag_i = true;
        self.pc = self.read_word(vector);
    }

    // ========== Addressing-Mode Resolvers ==========

    /// Resolves the operand of the instruction at PC.
    pub(crate) fn resolve_operand(&self, mode: AddressingMode) -> Operand {
        match mode {
            AddressingMode::Implicit => Operand::Implied,
            AddressingMode::Accumulator => Operand::Accumulator,
            AddressingMode::Immediate => Operand::Immediate(self.operand_byte()),
            AddressingMode::ZeroPage => Operand::at(self.zero_page_address(0)),
            AddressingMode::ZeroPageX => Operand::at(self.zero_page_address(self.x)),
            AddressingMode::ZeroPageY => Operand::at(self.zero_page_address(self.y)),
            AddressingMode::Relative => Operand::indexed(self.relative_address()),
            AddressingMode::Absolute => Operand::at(self.operand_word()),
            AddressingMode::AbsoluteX => Operand::indexed(self.absolute_indexed_address(self.x)),
            AddressingMode::AbsoluteY => Operand::indexed(self.absolute_indexed_address(self.y)),
            AddressingMode::Indirect => Operand::at(self.indirect_address()),
            AddressingMode::IndirectX => Operand::at(self.indexed_indirect_address()),
            AddressingMode::IndirectY => Operand::indexed(self.indirect_indexed_address()),
        }
    }

    fn operand_byte(&self) -> u8 {
        self.memory.read(self.pc.wrapping_add(1))
    }

    fn operand_word(&self) -> u16 {
        self.read_word(self.pc.wrapping_add(1))
    }

    /// `zp + index`, wrapping within the zero page.
    fn zero_page_address(&self, index: u8) -> u16 {
        self.operand_byte().wrapping_add(index) as u16
    }

    /// `abs + index` and whether the addition crossed a page.
    fn absolute_indexed_address(&self, index: u8) -> (u16, bool) {
        let base = self.operand_word();
        let addr = base.wrapping_add(index as u16);
        (addr, pages_differ(base, addr))
    }

    /// Branch target (`PC + 2 + offset`) and whether it lies on another page
    /// than the following instruction.
    fn relative_address(&self) -> (u16, bool) {
        let next = self.pc.wrapping_add(2);
        let target = next.wrapping_add_signed(self.operand_byte() as i8 as i16);
        (target, pages_differ(next, target))
    }

    /// `JMP ($xxxx)` target.
    ///
    /// NMOS quirk: a pointer at $xxFF takes its high byte from $xx00, not from
    /// the next page.
    fn indirect_address(&self) -> u16 {
        let ptr = self.operand_word();
        let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
        u16::from_le_bytes([self.memory.read(ptr), self.memory.read(hi_addr)])
    }

    /// `(zp,X)`: pointer at `zp + X`, both bytes read from the zero page.
    fn indexed_indirect_address(&self) -> u16 {
        self.read_zero_page_word(self.operand_byte().wrapping_add(self.x))
    }

    /// `(zp),Y`: pointer at `zp`, plus Y, and whether that crossed a page.
    fn indirect_indexed_address(&self) -> (u16, bool) {
        let base = self.read_zero_page_word(self.operand_byte());
        let addr = base.wrapping_add(self.y as u16);
        (addr, pages_differ(base, addr))
    }

    fn read_zero_page_word(&self, zp: u8) -> u16 {
        u16::from_le_bytes([
            self.memory.read(zp as u16),
            self.memory.read(zp.wrapping_add(1) as u16),
        ])
    }

    pub(crate) fn read_word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.memory.read(addr), self.memory.read(addr.wrapping_add(1))])
    }

    // ========== Operand Access ==========

    /// Reads the value an operand refers to.
    pub(crate) fn load(&self, operand: Operand) -> u8 {
        match operand {
            Operand::Immediate(value) => value,
            Operand::Memory { addr, .. } => self.memory.read(addr),
            Operand::Accumulator => self.a,
            Operand::Implied => 0,
        }
    }

    /// Writes back to the location an operand refers to.
    pub(crate) fn store(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::Memory { addr, .. } => self.memory.write(addr, value),
            Operand::Accumulator => self.a = value,
            Operand::Immediate(_) | Operand::Implied => {}
        }
    }

    /// Sets Z and N from `value`.
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = value & 0x80 != 0;
    }

    // ========== Stack ==========

    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(STACK_PAGE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_PAGE | self.sp as u16)
    }

    /// Pushes high byte, then low byte.
    pub(crate) fn push_word(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(hi);
        self.push(lo);
    }

    /// Pops low byte, then high byte.
    pub(crate) fn pop_word(&mut self) -> u16 {
        let lo = self.pop();
        let hi = self.pop();
        u16::from_le_bytes([lo, hi])
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, always 1)
    /// - Bit 4: B (Break, always 0 here; only set in pushed copies)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    pub fn status(&self) -> u8 {
        let mut sr = status::UNUSED;

        if self.flag_n {
            sr |= status::NEGATIVE;
        }
        if self.flag_v {
            sr |= status::OVERFLOW;
        }
        if self.flag_d {
            sr |= status::DECIMAL;
        }
        if self.flag_i {
            sr |= status::INTERRUPT_DISABLE;
        }
        if self.flag_z {
            sr |= status::ZERO;
        }
        if self.flag_c {
            sr |= status::CARRY;
        }

        sr
    }

    /// Returns the cycles left before the in-flight instruction completes.
    ///
    /// Zero means the next `exec()` fetches a new instruction.
    pub fn cycles(&self) -> u8 {
        self.cycles
    }

    /// Returns the number of clock ticks executed since construction.
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Register Setters ==========

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Loads all flags from a packed status byte. Bits 4 and 5 are ignored.
    pub fn set_status(&mut self, value: u8) {
        self.flag_n = value & status::NEGATIVE != 0;
        self.flag_v = value & status::OVERFLOW != 0;
        self.flag_d = value & status::DECIMAL != 0;
        self.flag_i = value & status::INTERRUPT_DISABLE != 0;
        self.flag_z = value & status::ZERO != 0;
        self.flag_c = value & status::CARRY != 0;
    }

    /// Sets the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    /// Sets the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    /// Sets the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    /// Sets the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    /// Sets the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    /// Sets the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    // ========== Interrupt Lines ==========

    /// Drives the CPU's own request on the NMI line.
    ///
    /// Raising a released line is an edge and is serviced at the next
    /// instruction boundary; the request is withdrawn once serviced.
    pub fn set_nmi(&mut self, asserted: bool) {
        if asserted && !self.lines.nmi.is_raised() {
            self.nmi_serviced = false;
        }
        self.lines.nmi.set(asserted);
    }

    /// Drives the CPU's own request on the IRQ line. Devices holding the line
    /// keep it asserted regardless.
    pub fn set_irq(&mut self, asserted: bool) {
        self.lines.irq.set(asserted);
    }

    /// A new source on the NMI line, for peripherals.
    ///
    /// The handle's requests last only as long as the handle; dropping it
    /// withdraws them.
    pub fn nmi_line(&self) -> InterruptLine {
        self.lines.nmi.clone()
    }

    /// A new source on the IRQ line, for peripherals.
    pub fn irq_line(&self) -> InterruptLine {
        self.lines.irq.clone()
    }

    // ========== Memory Access ==========

    /// Returns a reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }
}

fn pages_differ(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}
