//! 6502 Assembler Module
//!
//! Converts assembly language source code into binary machine code.
//!
//! ## Syntax
//!
//! One statement per line: `[LABEL:] [MNEMONIC [OPERAND]] [; comment]`.
//! Mnemonics are case-insensitive, labels are case-sensitive. Operands use
//! `$`-prefixed hex with exact digit counts (two for 8-bit, four for 16-bit):
//!
//! | Mode              | Syntax     |
//! |-------------------|------------|
//! | Immediate         | `#$XX`     |
//! | Zero page         | `$XX`      |
//! | Zero page indexed | `$XX,X` `$XX,Y` |
//! | Absolute          | `$XXXX` or `label` |
//! | Absolute indexed  | `$XXXX,X` `$XXXX,Y` `label,X` `label,Y` |
//! | Indirect          | `($XXXX)`  |
//! | Indexed indirect  | `($XX,X)`  |
//! | Indirect indexed  | `($XX),Y`  |
//! | Accumulator       | empty or `A` |
//! | Branch            | `label`, `$XXXX` target, or `$XX` raw offset |
//!
//! The `.byte $XX[,$YY...]` directive emits literal bytes.
//!
//! Assembly runs in two passes: the first encodes every statement and records
//! label addresses, the second patches label references.

pub mod encoder;
pub mod parser;
pub mod symbol_table;

use std::str::FromStr;

use thiserror::Error;

use crate::instruction::Instruction;
use encoder::{ByteCode, EncodeError};
use symbol_table::{validate_label, SymbolTable};

/// Complete output from assembling source code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerOutput {
    /// Assembled machine code bytes
    pub bytes: Vec<u8>,

    /// Every label defined in the source, in definition order
    pub symbols: Vec<Symbol>,

    /// Address of the first byte
    pub origin: u16,
}

impl AssemblerOutput {
    /// Look up a symbol by name
    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }
}

/// A symbol table entry mapping a label to an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Label name (case-sensitive)
    pub name: String,

    /// Resolved memory address for this label
    pub address: u16,

    /// Source line where label was defined
    pub defined_at: usize,
}

/// An error encountered during assembly
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message} in `{text}`")]
pub struct AssemblerError {
    /// Error type classification
    pub error_type: ErrorType,

    /// Line number where error occurred (1-indexed)
    pub line: usize,

    /// The offending source line, trimmed
    pub text: String,

    /// Human-readable error message
    pub message: String,
}

impl AssemblerError {
    fn new(error_type: ErrorType, line: usize, text: &str, message: impl Into<String>) -> Self {
        Self {
            error_type,
            line,
            text: text.trim().to_string(),
            message: message.into(),
        }
    }

    fn from_encode(error: EncodeError, line: usize, text: &str) -> Self {
        Self::new(error.error_type, line, text, error.message)
    }
}

/// Classification of assembly errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Undefined label reference
    UndefinedLabel,

    /// Duplicate label definition
    DuplicateLabel,

    /// Invalid label name (too long, starts with digit, etc.)
    InvalidLabel,

    /// Invalid mnemonic (not a recognized instruction)
    InvalidMnemonic,

    /// Invalid operand format for addressing mode
    InvalidOperand,

    /// Value out of range (branch too far, program past $FFFF)
    RangeError,

    /// Invalid directive usage
    InvalidDirective,
}

/// Two-pass assembler with a configurable origin.
///
/// # Examples
///
/// ```
/// use emu6502::Assembler;
///
/// let source = "
///     start: LDX #$05
///     loop:  DEX
///            BNE loop
///            JMP start
/// ";
/// let output = Assembler::with_origin(0x8000).assemble(source).unwrap();
///
/// assert_eq!(
///     output.bytes,
///     vec![0xA2, 0x05, 0xCA, 0xD0, 0xFD, 0x4C, 0x00, 0x80]
/// );
/// assert_eq!(output.lookup_symbol("loop").unwrap().address, 0x8002);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Assembler {
    origin: u16,
}

impl Assembler {
    /// An assembler placing code at `$0000`.
    pub fn new() -> Self {
        Self::default()
    }

    /// An assembler placing the first byte at `origin`.
    pub fn with_origin(origin: u16) -> Self {
        Self { origin }
    }

    /// Address of the first emitted byte.
    pub fn origin(&self) -> u16 {
        self.origin
    }

    /// Assemble source code into machine code.
    ///
    /// # Errors
    ///
    /// Returns the first error found, with the line number and text of the
    /// offending line.
    pub fn assemble(&self, source: &str) -> Result<AssemblerOutput, AssemblerError> {
        let lines: Vec<&str> = source.lines().collect();
        let mut symbols = SymbolTable::new();
        let mut program: Vec<ByteCode> = Vec::new();
        let mut position = self.origin as u32;

        // Pass 1: encode statements and record label addresses
        for (index, text) in lines.iter().enumerate() {
            let line_number = index + 1;
            let line = parser::parse_line(text);

            if let Some(label) = &line.label {
                validate_label(label).map_err(|message| {
                    AssemblerError::new(ErrorType::InvalidLabel, line_number, text, message)
                })?;
                if position > 0xFFFF {
                    return Err(AssemblerError::new(
                        ErrorType::RangeError,
                        line_number,
                        text,
                        format!("label `{}` past $FFFF", label),
                    ));
                }
                symbols
                    .define(label, position as u16, line_number)
                    .map_err(|existing| {
                        AssemblerError::new(
                            ErrorType::DuplicateLabel,
                            line_number,
                            text,
                            format!(
                                "label `{}` already defined on line {}",
                                label, existing.defined_at
                            ),
                        )
                    })?;
            }

            let Some(mnemonic) = &line.mnemonic else {
                continue;
            };

            let code = self
                .encode_statement(mnemonic, &line.operand, position as u16, line_number)
                .map_err(|error| AssemblerError::from_encode(error, line_number, text))?;

            position += code.bytes.len() as u32;
            if position > 0x1_0000 {
                return Err(AssemblerError::new(
                    ErrorType::RangeError,
                    line_number,
                    text,
                    "program extends past $FFFF",
                ));
            }
            program.push(code);
        }

        // Pass 2: resolve label references
        let mut bytes = Vec::with_capacity((position - self.origin as u32) as usize);
        for mut code in program {
            if let Some(label) = &code.label {
                let text = lines[code.line - 1];
                let target = symbols.resolve(&label.name).ok_or_else(|| {
                    AssemblerError::new(
                        ErrorType::UndefinedLabel,
                        code.line,
                        text,
                        format!("undefined label `{}`", label.name),
                    )
                })?;
                code.patch(target)
                    .map_err(|error| AssemblerError::from_encode(error, code.line, text))?;
            }
            bytes.extend_from_slice(&code.bytes);
        }

        tracing::debug!(
            origin = format_args!("${:04X}", self.origin),
            bytes = bytes.len(),
            "assembly complete"
        );

        Ok(AssemblerOutput {
            bytes,
            symbols: symbols.into_symbols(),
            origin: self.origin,
        })
    }

    fn encode_statement(
        &self,
        mnemonic: &str,
        operand: &str,
        position: u16,
        line: usize,
    ) -> Result<ByteCode, EncodeError> {
        if let Some(directive) = mnemonic.strip_prefix('.') {
            return if directive.eq_ignore_ascii_case("byte") {
                encoder::encode_byte_directive(operand, position, line)
            } else {
                Err(EncodeError {
                    error_type: ErrorType::InvalidDirective,
                    message: format!("unknown directive `{}`", mnemonic),
                })
            };
        }

        let instruction = Instruction::from_str(mnemonic).map_err(|error| EncodeError {
            error_type: ErrorType::InvalidMnemonic,
            message: error.to_string(),
        })?;

        encoder::encode_instruction(instruction, operand, position, line)
    }
}

/// Assemble source code at origin `$0000`.
///
/// # Examples
///
/// ```
/// use emu6502::assemble;
///
/// let output = assemble("LDA #$42\nSTA $0200").unwrap();
/// assert_eq!(output.bytes, vec![0xA9, 0x42, 0x8D, 0x00, 0x02]);
/// ```
pub fn assemble(source: &str) -> Result<AssemblerOutput, AssemblerError> {
    Assembler::new().assemble(source)
}
