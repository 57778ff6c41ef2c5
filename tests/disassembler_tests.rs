//! Integration tests for the disassembler and its agreement with the
//! assembler.

use emu6502::{disassemble, disassemble_one, Assembler, Disassembler};

fn texts(bytes: &[u8], origin: u16) -> Vec<String> {
    disassemble(bytes, origin)
        .into_iter()
        .map(|line| line.text)
        .collect()
}

#[test]
fn test_program_listing() {
    let program = [
        0xA2, 0x00, // LDX #$00
        0xBD, 0x00, 0x90, // LDA $9000,X
        0xF0, 0x06, // BEQ +6
        0x20, 0xEE, 0xFF, // JSR $FFEE
        0xE8, // INX
        0xD0, 0xF5, // BNE -11
        0x60, // RTS
    ];

    assert_eq!(
        texts(&program, 0x8000),
        vec![
            "LDX #$00",
            "LDA $9000,X",
            "BEQ $800D",
            "JSR $FFEE",
            "INX",
            "BNE $8002",
            "RTS",
        ]
    );
}

#[test]
fn test_all_operand_syntaxes() {
    let program = [
        0x0A, // ASL A
        0x06, 0x10, // ASL $10
        0x16, 0x10, // ASL $10,X
        0xB6, 0x10, // LDX $10,Y
        0x6C, 0x34, 0x12, // JMP ($1234)
        0x01, 0x20, // ORA ($20,X)
        0x11, 0x20, // ORA ($20),Y
        0x19, 0x34, 0x12, // ORA $1234,Y
    ];

    assert_eq!(
        texts(&program, 0),
        vec![
            "ASL A",
            "ASL $10",
            "ASL $10,X",
            "LDX $10,Y",
            "JMP ($1234)",
            "ORA ($20,X)",
            "ORA ($20),Y",
            "ORA $1234,Y",
        ]
    );
}

#[test]
fn test_data_bytes_keep_decoding_in_step() {
    let lines = disassemble(&[0xFF, 0xA9, 0x01, 0x4C, 0x02], 0x2000);

    let addresses: Vec<u16> = lines.iter().map(|l| l.address).collect();
    assert_eq!(addresses, vec![0x2000, 0x2001, 0x2003, 0x2004]);
    assert_eq!(lines[0].text, ".byte $FF");
    assert_eq!(lines[1].text, "LDA #$01");
    // JMP cut short by the end of the buffer
    assert_eq!(lines[2].text, ".byte $4C");
    assert_eq!(lines[3].text, ".byte $02");
}

#[test]
fn test_listing_display() {
    let lines = disassemble(&[0xA9, 0x42, 0x8D, 0x00, 0x02, 0xEA], 0x8000);
    let listing: Vec<String> = lines.iter().map(|l| l.to_string()).collect();

    assert_eq!(
        listing,
        vec![
            "$8000  A9 42     LDA #$42",
            "$8002  8D 00 02  STA $0200",
            "$8005  EA        NOP",
        ]
    );
}

#[test]
fn test_disassemble_one_cursor() {
    let bytes = [0xEA, 0xAD, 0x00, 0x10];
    let mut cursor = 1;

    let line = disassemble_one(&bytes, &mut cursor, 0x0400).unwrap();
    assert_eq!(line.address, 0x0401);
    assert_eq!(line.bytes, vec![0xAD, 0x00, 0x10]);
    assert_eq!(cursor, 4);

    assert!(disassemble_one(&bytes, &mut cursor, 0x0400).is_none());
    // Past the end stays None
    let mut past = 10;
    assert!(disassemble_one(&bytes, &mut past, 0x0400).is_none());
}

#[test]
fn test_iterator_tracks_cursor() {
    let bytes = [0xA9, 0x00, 0xEA];
    let mut lines = Disassembler::new(&bytes, 0);

    assert_eq!(lines.cursor(), 0);
    lines.next();
    assert_eq!(lines.cursor(), 2);
    lines.next();
    assert_eq!(lines.cursor(), 3);
    assert!(lines.next().is_none());
}

#[test]
fn test_branch_target_wraps() {
    assert_eq!(texts(&[0xD0, 0x80], 0x0010), vec!["BNE $FF92"]);
    assert_eq!(texts(&[0xD0, 0x7F], 0xFFF0), vec!["BNE $0071"]);
}

#[test]
fn test_listing_reassembles() {
    let source = "
    start:  LDY #$10
    loop:   LDA ($40),Y
            STA $0300,Y
            DEY
            BPL loop
            BIT $2002
            ROR A
            JMP start
    table:  .byte $00,$C0
    ";
    let program = Assembler::with_origin(0xC000).assemble(source).unwrap();

    let listing: Vec<String> = disassemble(&program.bytes, 0xC000)
        .into_iter()
        .map(|line| line.text)
        .collect();
    let reassembled = Assembler::with_origin(0xC000)
        .assemble(&listing.join("\n"))
        .unwrap();

    assert_eq!(reassembled.bytes, program.bytes);
}
