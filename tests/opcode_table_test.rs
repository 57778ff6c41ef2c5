//! Consistency checks between the opcode table, the instruction set and the
//! addressing modes.

use std::collections::HashSet;

use emu6502::{AddressingMode, Instruction, OPCODE_TABLE};

#[test]
fn test_documented_opcodes() {
    assert_eq!(OPCODE_TABLE.iter().flatten().count(), 151);
}

#[test]
fn test_instruction_mode_pairs_unique() {
    let mut seen = HashSet::new();
    for meta in OPCODE_TABLE.iter().flatten() {
        assert!(
            seen.insert((meta.instruction, meta.addressing_mode)),
            "{} {:?} appears twice",
            meta.mnemonic(),
            meta.addressing_mode
        );
    }
}

#[test]
fn test_opcode_lookup_agrees_with_table() {
    for (byte, entry) in OPCODE_TABLE.iter().enumerate() {
        if let Some(meta) = entry {
            assert_eq!(
                meta.instruction.opcode(meta.addressing_mode),
                Some(byte as u8)
            );
            assert_eq!(meta.size_bytes(), meta.addressing_mode.instruction_size());
        }
    }
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
fn test_branches_are_relative_only() {
    for instruction in Instruction::ALL {
        let modes: Vec<_> = instruction.opcodes().map(|(_, mode)| mode).collect();
        if instruction.is_branch() {
            assert_eq!(modes, vec![AddressingMode::Relative]);
        } else {
            assert!(!modes.contains(&AddressingMode::Relative));
        }
    }
}

#[test]
fn test_mnemonics_parse_back() {
    for instruction in Instruction::ALL {
        let parsed: Instruction = instruction.mnemonic().parse().unwrap();
        assert_eq!(parsed, instruction);

        let lower: Instruction = instruction.mnemonic().to_lowercase().parse().unwrap();
        assert_eq!(lower, instruction);
    }
    assert!("XYZ".parse::<Instruction>().is_err());
}

#[test]
fn test_known_cycle_counts() {
    let cases = [
        (0xA9, 2), // LDA #
        (0xA5, 3), // LDA zp
        (0xAD, 4), // LDA abs
        (0xB1, 5), // LDA (zp),Y
        (0xA1, 6), // LDA (zp,X)
        (0x9D, 5), // STA abs,X
        (0x91, 6), // STA (zp),Y
        (0x1E, 7), // ASL abs,X
        (0x4C, 3), // JMP abs
        (0x6C, 5), // JMP (ind)
        (0x00, 7), // BRK
        (0xD0, 2), // BNE
    ];
    for (opcode, cycles) in cases {
        let meta = OPCODE_TABLE[opcode].unwrap();
        assert_eq!(meta.base_cycles, cycles, "opcode {:02X}", opcode);
    }
}
