//! # 6502 Emulator Core
//!
//! A cycle-counting NMOS 6502 CPU emulator with a memory-mapped device bus,
//! an assembler and a disassembler.
//!
//! This crate provides the CPU (including decimal mode and NMI/IRQ
//! interrupts), a trait-based memory bus with RAM, ROM, PIA and Screen
//! devices, and a table-driven opcode metadata system shared by the CPU,
//! the assembler and the disassembler.
//!
//! ## Quick Start
//!
//! ```rust
//! use emu6502::{AddressRange, Assembler, Bus, MemoryBus, Ram, CPU};
//!
//! let program = Assembler::with_origin(0x8000)
//!     .assemble("LDA #$42\nSTA $0200\nloop: JMP loop")
//!     .unwrap();
//!
//! // 64KB of RAM
//! let mut ram = Ram::new(AddressRange::new(0x0000, 0xFFFF).unwrap());
//! ram.load(0x8000, &program.bytes);
//! ram.load(0xFFFC, &[0x00, 0x80]); // Reset vector -> 0x8000
//!
//! let mut bus = Bus::new();
//! bus.add_device(Box::new(ram));
//!
//! // Initialize CPU - it loads PC from the reset vector
//! let mut cpu = CPU::new(bus);
//! assert_eq!(cpu.pc(), 0x8000);
//!
//! // One instruction per step, then one clock action for the devices
//! for _ in 0..2 {
//!     cpu.step().unwrap();
//!     cpu.memory_mut().perform_clock_actions();
//! }
//!
//! assert_eq!(cpu.memory().read(0x0200), 0x42);
//! ```
//!
//! ## Architecture
//!
//! - **Modularity**: CPU state is separated from memory implementation via the `MemoryBus` trait
//! - **Cycle Counting**: every `exec()` call is one clock tick
//! - **Table-Driven Design**: All opcode metadata in a single source of truth
//!
//! ## Modules
//!
//! - `cpu` - CPU state and execution logic
//! - `memory` - MemoryBus trait and the device-dispatching `Bus`
//! - `devices` - Device trait, RAM, ROM, PIA, Screen, interrupt lines
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing mode enumeration, operand parsing and formatting
//! - `instruction` - The 56 instruction mnemonics
//! - `assembler` / `disassembler` - Text to bytes and back
//! - `config` - JSON machine description

pub mod addressing;
pub mod assembler;
pub mod config;
pub mod cpu;
pub mod devices;
pub mod disassembler;
pub mod instruction;
pub mod memory;
pub mod opcodes;

// Internal instruction implementations (not part of public API)
mod instructions;

use thiserror::Error;

// Re-export public API
pub use addressing::AddressingMode;
pub use assembler::{assemble, Assembler, AssemblerError, AssemblerOutput, ErrorType, Symbol};
pub use config::{ConfigError, DeviceConfig, MachineConfig};
pub use cpu::CPU;
pub use devices::{
    AddressRange, Device, DeviceError, InterruptLine, InterruptLines, Pia, Ram, Rom, Screen,
};
pub use disassembler::{disassemble, disassemble_one, DisassembledLine, Disassembler};
pub use instruction::{Instruction, UnknownMnemonic};
pub use memory::{Bus, MemoryBus};
pub use opcodes::{OpcodeMetadata, OPCODE_TABLE};

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmulationError {
    /// The byte at `pc` is not a documented opcode.
    ///
    /// PC is left pointing at the offending byte.
    #[error("illegal opcode ${opcode:02X} at ${pc:04X}")]
    IllegalOpcode {
        /// The opcode byte
        opcode: u8,
        /// Address it was fetched from
        pc: u16,
    },
}
