//! Formatting functions for disassembled instructions
//!
//! Output uses the operand syntax the assembler accepts, so a listing can be
//! assembled again at the same origin.

use crate::addressing::AddressingMode;
use crate::disassembler::decoder::DecodedInstruction;
use crate::disassembler::DisassembledLine;

/// Format a single instruction as assembly text
///
/// Branch operands are shown as their 4-digit target address.
pub fn format_instruction(instr: &DecodedInstruction) -> String {
    let mnemonic = instr.metadata.mnemonic();
    let operand = match (instr.addressing_mode(), instr.branch_target()) {
        (AddressingMode::Relative, Some(target)) => format!("${:04X}", target),
        (mode, _) => mode.format_operand(&instr.operand),
    };

    if operand.is_empty() {
        mnemonic.to_string()
    } else {
        format!("{} {}", mnemonic, operand)
    }
}

/// Format a byte that does not start a decodable instruction.
pub fn format_data_byte(value: u8) -> String {
    format!(".byte ${:02X}", value)
}

/// Format a listing line: address, raw bytes, then the text.
///
/// ```text
/// $8000  A9 42     LDA #$42
/// ```
pub fn format_listing_line(line: &DisassembledLine) -> String {
    let hex = line
        .bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ");
    format!("${:04X}  {:<8}  {}", line.address, hex, line.text)
}
