//! Instruction decoder for the 6502 disassembler

use crate::addressing::AddressingMode;
use crate::opcodes::{self, OpcodeMetadata};

/// A single decoded instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value
    pub opcode: u8,

    /// Table entry for the opcode
    pub metadata: &'static OpcodeMetadata,

    /// Operand bytes (0-2 bytes depending on addressing mode)
    pub operand: Vec<u8>,
}

impl DecodedInstruction {
    /// Addressing mode used by this instruction
    pub fn addressing_mode(&self) -> AddressingMode {
        self.metadata.addressing_mode
    }

    /// Total size in bytes (opcode + operands)
    pub fn size_bytes(&self) -> usize {
        self.metadata.size_bytes() as usize
    }

    /// Branch destination, for relative-mode instructions.
    pub fn branch_target(&self) -> Option<u16> {
        if self.addressing_mode() != AddressingMode::Relative {
            return None;
        }
        let offset = *self.operand.first()? as i8;
        Some(
            self.address
                .wrapping_add(2)
                .wrapping_add_signed(offset as i16),
        )
    }
}

/// Decode a single instruction from the start of `bytes`.
///
/// Returns `None` for an undefined opcode or when `bytes` ends before the
/// instruction does.
pub fn decode_instruction(bytes: &[u8], address: u16) -> Option<DecodedInstruction> {
    let (&opcode, rest) = bytes.split_first()?;
    let metadata = opcodes::lookup(opcode)?;

    let operand_len = metadata.addressing_mode.operand_size() as usize;
    let operand = rest.get(..operand_len)?.to_vec();

    Some(DecodedInstruction {
        address,
        opcode,
        metadata,
        operand,
    })
}
