//! # Addressing Modes
//!
//! This module defines the 13 addressing modes used by the 6502 opcode table.
//! Eleven of them have an operand syntax in assembly source; `Implicit` and
//! `Relative` are distinguished by the instruction itself.
//!
//! Each mode knows how to parse its operand token into raw operand bytes and
//! how to format raw bytes back into operand text. Parsing is strict: a token
//! must match the exact prefix, suffix and hex digit count of the mode.

/// 6502 addressing mode enumeration.
///
/// The addressing mode determines how the CPU interprets the operand bytes
/// that follow an opcode and how it calculates the effective memory address
/// for the operation.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions, relative to PC+2.
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Every addressing mode in encoding-priority order.
    ///
    /// The assembler tries candidate modes in this order and emits the first
    /// one whose operand syntax matches.
    pub const PRIORITY: [AddressingMode; 13] = [
        AddressingMode::Implicit,
        AddressingMode::Accumulator,
        AddressingMode::Immediate,
        AddressingMode::ZeroPage,
        AddressingMode::ZeroPageX,
        AddressingMode::ZeroPageY,
        AddressingMode::Relative,
        AddressingMode::Absolute,
        AddressingMode::AbsoluteX,
        AddressingMode::AbsoluteY,
        AddressingMode::Indirect,
        AddressingMode::IndirectX,
        AddressingMode::IndirectY,
    ];

    /// Number of operand bytes following the opcode.
    pub const fn operand_size(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
            _ => 1,
        }
    }

    /// Total instruction size in bytes (opcode + operands).
    pub const fn instruction_size(self) -> u8 {
        self.operand_size() + 1
    }

    /// Position of this mode in [`AddressingMode::PRIORITY`].
    pub fn encoding_priority(self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|&mode| mode == self)
            .unwrap_or(Self::PRIORITY.len())
    }

    /// Parses an operand token written in this mode's syntax.
    ///
    /// Returns the little-endian operand bytes, or `None` if the token does
    /// not have this mode's shape. A mismatch is not an error: the caller is
    /// expected to try the next candidate mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use emu6502::AddressingMode;
    ///
    /// assert_eq!(AddressingMode::Immediate.parse_operand("#$42"), Some(vec![0x42]));
    /// assert_eq!(AddressingMode::AbsoluteX.parse_operand("$1234,X"), Some(vec![0x34, 0x12]));
    /// assert_eq!(AddressingMode::ZeroPage.parse_operand("$1234"), None);
    /// ```
    pub fn parse_operand(self, token: &str) -> Option<Vec<u8>> {
        match self {
            AddressingMode::Implicit => token.is_empty().then(Vec::new),
            AddressingMode::Accumulator => (token.is_empty() || token == "A").then(Vec::new),
            AddressingMode::Immediate => byte(token.strip_prefix("#$")?),
            AddressingMode::ZeroPage | AddressingMode::Relative => byte(token.strip_prefix('$')?),
            AddressingMode::ZeroPageX => byte(token.strip_prefix('$')?.strip_suffix(",X")?),
            AddressingMode::ZeroPageY => byte(token.strip_prefix('$')?.strip_suffix(",Y")?),
            AddressingMode::Absolute => word(token.strip_prefix('$')?),
            AddressingMode::AbsoluteX => word(token.strip_prefix('$')?.strip_suffix(",X")?),
            AddressingMode::AbsoluteY => word(token.strip_prefix('$')?.strip_suffix(",Y")?),
            AddressingMode::Indirect => word(token.strip_prefix("($")?.strip_suffix(')')?),
            AddressingMode::IndirectX => byte(token.strip_prefix("($")?.strip_suffix(",X)")?),
            AddressingMode::IndirectY => byte(token.strip_prefix("($")?.strip_suffix("),Y")?),
        }
    }

    /// Formats raw operand bytes in this mode's syntax.
    ///
    /// Relative operands are shown as the raw offset byte; the disassembler
    /// renders them as a target address instead because it knows the
    /// instruction's position.
    ///
    /// # Examples
    ///
    /// ```
    /// use emu6502::AddressingMode;
    ///
    /// assert_eq!(AddressingMode::IndirectY.format_operand(&[0x40]), "($40),Y");
    /// assert_eq!(AddressingMode::Indirect.format_operand(&[0xFC, 0xFF]), "($FFFC)");
    /// ```
    pub fn format_operand(self, operand: &[u8]) -> String {
        let lo = operand.first().copied().unwrap_or(0);
        let word = u16::from_le_bytes([lo, operand.get(1).copied().unwrap_or(0)]);

        match self {
            AddressingMode::Implicit => String::new(),
            AddressingMode::Accumulator => "A".to_string(),
            AddressingMode::Immediate => format!("#${:02X}", lo),
            AddressingMode::ZeroPage | AddressingMode::Relative => format!("${:02X}", lo),
            AddressingMode::ZeroPageX => format!("${:02X},X", lo),
            AddressingMode::ZeroPageY => format!("${:02X},Y", lo),
            AddressingMode::Absolute => format!("${:04X}", word),
            AddressingMode::AbsoluteX => format!("${:04X},X", word),
            AddressingMode::AbsoluteY => format!("${:04X},Y", word),
            AddressingMode::Indirect => format!("(${:04X})", word),
            AddressingMode::IndirectX => format!("(${:02X},X)", lo),
            AddressingMode::IndirectY => format!("(${:02X}),Y", lo),
        }
    }
}

/// Parses exactly `N` hex digits.
fn hex<const N: usize>(digits: &str) -> Option<u16> {
    if digits.len() != N || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

fn byte(digits: &str) -> Option<Vec<u8>> {
    hex::<2>(digits).map(|value| vec![value as u8])
}

fn word(digits: &str) -> Option<Vec<u8>> {
    hex::<4>(digits).map(|value| value.to_le_bytes().to_vec())
}
