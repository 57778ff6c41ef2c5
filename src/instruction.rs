//! # Instruction Mnemonics
//!
//! The 56 documented 6502 instructions. Each instruction knows its mnemonic
//! and, through [`OPCODE_TABLE`](crate::OPCODE_TABLE), the legal
//! `(opcode, addressing mode)` pairs it can be encoded with.

use std::fmt;
use std::str::FromStr;

use crate::addressing::AddressingMode;
use crate::opcodes::OPCODE_TABLE;

macro_rules! instructions {
    ($($variant:ident => $mnemonic:literal,)*) => {
        /// A documented 6502 instruction.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Instruction {
            $(
                #[doc = $mnemonic]
                $variant,
            )*
        }

        impl Instruction {
            /// All 56 instructions in alphabetical order.
            pub const ALL: [Instruction; 56] = [$(Instruction::$variant,)*];

            /// Three-letter upper-case mnemonic.
            pub const fn mnemonic(self) -> &'static str {
                match self {
                    $(Instruction::$variant => $mnemonic,)*
                }
            }
        }
    };
}

instructions! {
    Adc => "ADC", And => "AND", Asl => "ASL", Bcc => "BCC", Bcs => "BCS", Beq => "BEQ",
    Bit => "BIT", Bmi => "BMI", Bne => "BNE", Bpl => "BPL", Brk => "BRK", Bvc => "BVC",
    Bvs => "BVS", Clc => "CLC", Cld => "CLD", Cli => "CLI", Clv => "CLV", Cmp => "CMP",
    Cpx => "CPX", Cpy => "CPY", Dec => "DEC", Dex => "DEX", Dey => "DEY", Eor => "EOR",
    Inc => "INC", Inx => "INX", Iny => "INY", Jmp => "JMP", Jsr => "JSR", Lda => "LDA",
    Ldx => "LDX", Ldy => "LDY", Lsr => "LSR", Nop => "NOP", Ora => "ORA", Pha => "PHA",
    Php => "PHP", Pla => "PLA", Plp => "PLP", Rol => "ROL", Ror => "ROR", Rti => "RTI",
    Rts => "RTS", Sbc => "SBC", Sec => "SEC", Sed => "SED", Sei => "SEI", Sta => "STA",
    Stx => "STX", Sty => "STY", Tax => "TAX", Tay => "TAY", Tsx => "TSX", Txa => "TXA",
    Txs => "TXS", Tya => "TYA",
}

impl Instruction {
    /// Iterates over every `(opcode, addressing mode)` pair that encodes this
    /// instruction, in opcode order.
    ///
    /// # Examples
    ///
    /// ```
    /// use emu6502::{AddressingMode, Instruction};
    ///
    /// let modes: Vec<_> = Instruction::Jmp.opcodes().collect();
    /// assert_eq!(
    ///     modes,
    ///     vec![(0x4C, AddressingMode::Absolute), (0x6C, AddressingMode::Indirect)]
    /// );
    /// ```
    pub fn opcodes(self) -> impl Iterator<Item = (u8, AddressingMode)> {
        OPCODE_TABLE
            .iter()
            .enumerate()
            .filter_map(move |(opcode, entry)| match entry {
                Some(meta) if meta.instruction == self => {
                    Some((opcode as u8, meta.addressing_mode))
                }
                _ => None,
            })
    }

    /// Looks up the opcode for this instruction in the given mode.
    pub fn opcode(self, mode: AddressingMode) -> Option<u8> {
        self.opcodes()
            .find(|&(_, candidate)| candidate == mode)
            .map(|(opcode, _)| opcode)
    }

    /// Returns true if the instruction can be encoded with `mode`.
    pub fn supports(self, mode: AddressingMode) -> bool {
        self.opcode(mode).is_some()
    }

    /// Returns true for the eight conditional branches.
    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Instruction::Bcc
                | Instruction::Bcs
                | Instruction::Beq
                | Instruction::Bmi
                | Instruction::Bne
                | Instruction::Bpl
                | Instruction::Bvc
                | Instruction::Bvs
        )
    }

    /// Returns true if an indexed read that crosses a page costs one extra
    /// cycle for this instruction.
    ///
    /// Stores and read-modify-write instructions always pay the worst case in
    /// their base cycle count instead.
    pub const fn has_page_penalty(self) -> bool {
        matches!(
            self,
            Instruction::Adc
                | Instruction::And
                | Instruction::Cmp
                | Instruction::Eor
                | Instruction::Lda
                | Instruction::Ldx
                | Instruction::Ldy
                | Instruction::Ora
                | Instruction::Sbc
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Error returned when a mnemonic names no 6502 instruction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mnemonic '{0}'")]
pub struct UnknownMnemonic(pub String);

impl FromStr for Instruction {
    type Err = UnknownMnemonic;

    /// Parses a mnemonic, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instruction::ALL
            .iter()
            .copied()
            .find(|instruction| instruction.mnemonic().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMnemonic(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mnemonic() {
        assert_eq!("LDA".parse::<Instruction>(), Ok(Instruction::Lda));
        assert_eq!("lda".parse::<Instruction>(), Ok(Instruction::Lda));
        assert_eq!("Txs".parse::<Instruction>(), Ok(Instruction::Txs));
        assert_eq!(
            "XYZ".parse::<Instruction>(),
            Err(UnknownMnemonic("XYZ".to_string()))
        );
    }

    #[test]
    fn test_every_instruction_has_an_opcode() {
        for instruction in Instruction::ALL {
            assert!(
                instruction.opcodes().next().is_some(),
                "{} has no opcode",
                instruction
            );
        }
    }

    #[test]
    fn test_operandless_instructions_have_one_opcode() {
        assert_eq!(
            Instruction::Brk.opcodes().collect::<Vec<_>>(),
            vec![(0x00, AddressingMode::Implicit)]
        );
        assert_eq!(
            Instruction::Nop.opcodes().collect::<Vec<_>>(),
            vec![(0xEA, AddressingMode::Implicit)]
        );
        assert_eq!(Instruction::Txs.opcode(AddressingMode::Implicit), Some(0x9A));
    }

    #[test]
    fn test_opcode_lookup() {
        assert_eq!(Instruction::Lda.opcode(AddressingMode::Immediate), Some(0xA9));
        assert_eq!(Instruction::Ldx.opcode(AddressingMode::ZeroPageY), Some(0xB6));
        assert_eq!(Instruction::Sta.opcode(AddressingMode::Immediate), None);
        assert!(Instruction::Asl.supports(AddressingMode::Accumulator));
        assert!(!Instruction::Bit.supports(AddressingMode::AbsoluteX));
    }

    #[test]
    fn test_branches() {
        let branches: Vec<_> = Instruction::ALL
            .iter()
            .filter(|instruction| instruction.is_branch())
            .collect();
        assert_eq!(branches.len(), 8);
        for branch in branches {
            assert_eq!(
                branch.opcodes().map(|(_, mode)| mode).collect::<Vec<_>>(),
                vec![AddressingMode::Relative]
            );
        }
    }
}
