//! Instruction encoder for the 6502 assembler
//!
//! Turns one mnemonic and operand into a [`ByteCode`]: the emitted bytes plus,
//! when the operand names a label, a reference the second pass patches once
//! every label address is known.

use crate::addressing::AddressingMode;
use crate::assembler::symbol_table::validate_label;
use crate::assembler::ErrorType;
use crate::instruction::Instruction;

/// How a label reference is patched into its instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch {
    /// Little-endian 16-bit address in bytes 1 and 2.
    Absolute,
    /// Signed branch offset in byte 1, relative to the next instruction.
    Relative,
}

/// A label an instruction refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRef {
    /// Referenced label name
    pub name: String,
    /// Where the resolved address goes
    pub patch: Patch,
}

/// Intermediate encoding of one source statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteCode {
    /// Emitted bytes; label operands hold zero placeholders
    pub bytes: Vec<u8>,

    /// Label the operand refers to, if any
    pub label: Option<LabelRef>,

    /// Address of the first byte
    pub position: u16,

    /// Source line number (1-indexed)
    pub line: usize,
}

/// Why a statement could not be encoded. The assembler attaches line context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeError {
    pub error_type: ErrorType,
    pub message: String,
}

impl EncodeError {
    fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

impl ByteCode {
    fn new(bytes: Vec<u8>, position: u16, line: usize) -> Self {
        Self {
            bytes,
            label: None,
            position,
            line,
        }
    }

    fn with_label(mut self, name: &str, patch: Patch) -> Self {
        self.label = Some(LabelRef {
            name: name.to_string(),
            patch,
        });
        self
    }

    /// Writes the resolved `target` of the label reference into the bytes.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorType::RangeError`] if a branch target is farther than
    /// a signed byte can reach.
    pub fn patch(&mut self, target: u16) -> Result<(), EncodeError> {
        let Some(label) = &self.label else {
            return Ok(());
        };
        match label.patch {
            Patch::Absolute => {
                let [lo, hi] = target.to_le_bytes();
                self.bytes[1] = lo;
                self.bytes[2] = hi;
            }
            Patch::Relative => {
                self.bytes[1] = branch_offset(self.position, target)?;
            }
        }
        Ok(())
    }
}

/// Signed offset from the instruction after a branch at `position` to `target`.
pub fn branch_offset(position: u16, target: u16) -> Result<u8, EncodeError> {
    let next = position.wrapping_add(2);
    // The address space wraps, so measure the shorter way round
    let offset = target.wrapping_sub(next) as i16;
    if !(i8::MIN as i16..=i8::MAX as i16).contains(&offset) {
        return Err(EncodeError::new(
            ErrorType::RangeError,
            format!(
                "branch target ${:04X} out of range ({} bytes from ${:04X})",
                target, offset, next
            ),
        ));
    }
    Ok(offset as i8 as u8)
}

/// Encode an instruction into bytes.
///
/// Candidate addressing modes are tried in [`AddressingMode::PRIORITY`] order
/// and the first whose syntax matches the operand wins, so `$10` picks zero
/// page over absolute when both exist. A bare label name encodes as absolute
/// (optionally `,X` / `,Y` indexed); branch instructions are handled by
/// [`encode_branch`].
pub fn encode_instruction(
    instruction: Instruction,
    operand: &str,
    position: u16,
    line: usize,
) -> Result<ByteCode, EncodeError> {
    if instruction.is_branch() {
        return encode_branch(instruction, operand, position, line);
    }

    let normalized = operand.to_ascii_uppercase();
    for mode in AddressingMode::PRIORITY {
        let Some(opcode) = instruction.opcode(mode) else {
            continue;
        };
        if let Some(operand_bytes) = mode.parse_operand(&normalized) {
            let mut bytes = vec![opcode];
            bytes.extend(operand_bytes);
            return Ok(ByteCode::new(bytes, position, line));
        }
    }

    if let Some((name, mode)) = label_operand(operand) {
        if let Some(opcode) = instruction.opcode(mode) {
            return Ok(ByteCode::new(vec![opcode, 0, 0], position, line)
                .with_label(name, Patch::Absolute));
        }
    }

    Err(EncodeError::new(
        ErrorType::InvalidOperand,
        if operand.is_empty() {
            format!("{} requires an operand", instruction)
        } else {
            format!("no addressing mode of {} accepts `{}`", instruction, operand)
        },
    ))
}

/// Encode a branch. The operand is a raw `$XX` offset, a `$XXXX` target
/// address, or a label.
pub fn encode_branch(
    instruction: Instruction,
    operand: &str,
    position: u16,
    line: usize,
) -> Result<ByteCode, EncodeError> {
    let opcode = instruction.opcode(AddressingMode::Relative).ok_or_else(|| {
        EncodeError::new(
            ErrorType::InvalidOperand,
            format!("{} is not a branch", instruction),
        )
    })?;

    if let Some(offset) = AddressingMode::Relative.parse_operand(operand) {
        let mut bytes = vec![opcode];
        bytes.extend(offset);
        return Ok(ByteCode::new(bytes, position, line));
    }

    if let Some(target) = AddressingMode::Absolute.parse_operand(operand) {
        let target = u16::from_le_bytes([target[0], target[1]]);
        let offset = branch_offset(position, target)?;
        return Ok(ByteCode::new(vec![opcode, offset], position, line));
    }

    if validate_label(operand).is_ok() {
        return Ok(ByteCode::new(vec![opcode, 0], position, line)
            .with_label(operand, Patch::Relative));
    }

    Err(EncodeError::new(
        ErrorType::InvalidOperand,
        format!(
            "{} expects a label, $XX offset or $XXXX target, got `{}`",
            instruction, operand
        ),
    ))
}

/// Encode the operand list of a `.byte` directive.
pub fn encode_byte_directive(
    operand: &str,
    position: u16,
    line: usize,
) -> Result<ByteCode, EncodeError> {
    if operand.is_empty() {
        return Err(EncodeError::new(
            ErrorType::InvalidDirective,
            ".byte requires at least one value",
        ));
    }

    let bytes = operand
        .split(',')
        .map(|value| {
            AddressingMode::ZeroPage
                .parse_operand(value)
                .map(|bytes| bytes[0])
                .ok_or_else(|| {
                    EncodeError::new(
                        ErrorType::InvalidDirective,
                        format!(".byte expects $XX values, got `{}`", value),
                    )
                })
        })
        .collect::<Result<Vec<u8>, EncodeError>>()?;

    Ok(ByteCode::new(bytes, position, line))
}

/// Splits `name`, `name,X` or `name,Y` into the label and the absolute mode
/// it implies.
fn label_operand(operand: &str) -> Option<(&str, AddressingMode)> {
    let (name, mode) = if let Some(name) = operand
        .strip_suffix(",X")
        .or_else(|| operand.strip_suffix(",x"))
    {
        (name, AddressingMode::AbsoluteX)
    } else if let Some(name) = operand
        .strip_suffix(",Y")
        .or_else(|| operand.strip_suffix(",y"))
    {
        (name, AddressingMode::AbsoluteY)
    } else {
        (operand, AddressingMode::Absolute)
    };

    validate_label(name).is_ok().then_some((name, mode))
}
