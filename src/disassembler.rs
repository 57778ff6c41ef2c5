//! 6502 Disassembler Module
//!
//! Converts binary machine code into human-readable assembly mnemonics.
//!
//! Bytes that do not start a defined opcode, or an instruction cut short by
//! the end of the buffer, come out as a one-byte `.byte $XX` directive so
//! decoding always makes progress.

pub mod decoder;
pub mod formatter;

use std::fmt;

/// One line of disassembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassembledLine {
    /// Memory address of the first byte
    pub address: u16,

    /// The bytes this line consumed
    pub bytes: Vec<u8>,

    /// Assembly text, e.g. `LDA #$42` or `.byte $FF`
    pub text: String,
}

impl fmt::Display for DisassembledLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&formatter::format_listing_line(self))
    }
}

/// Decode the instruction at `*cursor` and advance the cursor past it.
///
/// `origin` is the address of `bytes[0]`. Returns `None` once the cursor has
/// reached the end of the buffer.
///
/// # Examples
///
/// ```
/// use emu6502::disassemble_one;
///
/// let program = [0xA9, 0x42, 0xD0, 0xFC];
/// let mut cursor = 0;
///
/// let first = disassemble_one(&program, &mut cursor, 0x8000).unwrap();
/// assert_eq!(first.text, "LDA #$42");
/// assert_eq!(cursor, 2);
///
/// let second = disassemble_one(&program, &mut cursor, 0x8000).unwrap();
/// assert_eq!(second.text, "BNE $8000");
/// assert!(disassemble_one(&program, &mut cursor, 0x8000).is_none());
/// ```
pub fn disassemble_one(bytes: &[u8], cursor: &mut usize, origin: u16) -> Option<DisassembledLine> {
    let start = *cursor;
    let remaining = bytes.get(start..).filter(|rest| !rest.is_empty())?;
    let address = origin.wrapping_add(start as u16);

    let line = match decoder::decode_instruction(remaining, address) {
        Some(instr) => DisassembledLine {
            address,
            bytes: remaining[..instr.size_bytes()].to_vec(),
            text: formatter::format_instruction(&instr),
        },
        None => DisassembledLine {
            address,
            bytes: vec![remaining[0]],
            text: formatter::format_data_byte(remaining[0]),
        },
    };

    *cursor += line.bytes.len();
    Some(line)
}

/// Iterator over the lines of a buffer.
#[derive(Debug, Clone)]
pub struct Disassembler<'a> {
    bytes: &'a [u8],
    cursor: usize,
    origin: u16,
}

impl<'a> Disassembler<'a> {
    /// Disassemble `bytes`, the first of which sits at `origin`.
    pub fn new(bytes: &'a [u8], origin: u16) -> Self {
        Self {
            bytes,
            cursor: 0,
            origin,
        }
    }

    /// Offset of the next byte to decode.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Iterator for Disassembler<'_> {
    type Item = DisassembledLine;

    fn next(&mut self) -> Option<Self::Item> {
        disassemble_one(self.bytes, &mut self.cursor, self.origin)
    }
}

/// Disassemble a whole buffer.
pub fn disassemble(bytes: &[u8], origin: u16) -> Vec<DisassembledLine> {
    Disassembler::new(bytes, origin).collect()
}
