//! Integration tests for the two-pass assembler.

use emu6502::{assemble, Assembler, ErrorType};

fn bytes(source: &str) -> Vec<u8> {
    assemble(source).unwrap().bytes
}

// ========== Addressing Mode Syntax ==========

#[test]
fn test_every_addressing_mode() {
    assert_eq!(bytes("NOP"), vec![0xEA]);
    assert_eq!(bytes("ASL A"), vec![0x0A]);
    assert_eq!(bytes("ASL"), vec![0x0A]);
    assert_eq!(bytes("LDA #$42"), vec![0xA9, 0x42]);
    assert_eq!(bytes("LDA $42"), vec![0xA5, 0x42]);
    assert_eq!(bytes("LDA $42,X"), vec![0xB5, 0x42]);
    assert_eq!(bytes("LDX $42,Y"), vec![0xB6, 0x42]);
    assert_eq!(bytes("LDA $1234"), vec![0xAD, 0x34, 0x12]);
    assert_eq!(bytes("LDA $1234,X"), vec![0xBD, 0x34, 0x12]);
    assert_eq!(bytes("LDA $1234,Y"), vec![0xB9, 0x34, 0x12]);
    assert_eq!(bytes("JMP ($1234)"), vec![0x6C, 0x34, 0x12]);
    assert_eq!(bytes("LDA ($20,X)"), vec![0xA1, 0x20]);
    assert_eq!(bytes("LDA ($20),Y"), vec![0xB1, 0x20]);
}

#[test]
fn test_digit_count_selects_mode() {
    assert_eq!(bytes("STA $00FF"), vec![0x8D, 0xFF, 0x00]);
    assert_eq!(bytes("STA $FF"), vec![0x85, 0xFF]);
}

#[test]
fn test_wrong_digit_counts_rejected() {
    for source in [
        "LDA #$1",
        "LDA #$123",
        "LDA $123",
        "LDA $12345",
        "LDA ($1234,X)",
        "LDA ($2,X)",
        "LDA ($2),Y",
        "JMP ($12)",
    ] {
        let err = assemble(source).unwrap_err();
        assert_eq!(err.error_type, ErrorType::InvalidOperand, "{}", source);
    }
}

#[test]
fn test_mode_not_supported_by_instruction() {
    // STA has no immediate form, JMP no zero page
    assert_eq!(
        assemble("STA #$01").unwrap_err().error_type,
        ErrorType::InvalidOperand
    );
    assert_eq!(
        assemble("LDX $10,X").unwrap_err().error_type,
        ErrorType::InvalidOperand
    );
    assert_eq!(
        assemble("NOP $10").unwrap_err().error_type,
        ErrorType::InvalidOperand
    );
}

// ========== Source Format ==========

#[test]
fn test_case_and_whitespace() {
    assert_eq!(bytes("  lda   #$ff  "), vec![0xA9, 0xFF]);
    assert_eq!(bytes("Lda $10 , x"), vec![0xB5, 0x10]);
    assert_eq!(bytes("sta ($20), y"), vec![0x91, 0x20]);
    assert_eq!(bytes("rol a"), vec![0x2A]);
}

#[test]
fn test_comments_and_blank_lines() {
    let source = "
        ; header comment

        LDA #$01 ; load
        ; trailing
    ";
    assert_eq!(bytes(source), vec![0xA9, 0x01]);
}

#[test]
fn test_byte_directive() {
    assert_eq!(bytes(".byte $01,$02, $FF"), vec![0x01, 0x02, 0xFF]);
    assert_eq!(bytes(".BYTE $10"), vec![0x10]);

    let output = Assembler::with_origin(0x1000)
        .assemble("table: .byte $0A,$0B\nLDA table,X")
        .unwrap();
    assert_eq!(output.bytes, vec![0x0A, 0x0B, 0xBD, 0x00, 0x10]);

    assert_eq!(
        assemble(".byte").unwrap_err().error_type,
        ErrorType::InvalidDirective
    );
    assert_eq!(
        assemble(".byte #$01").unwrap_err().error_type,
        ErrorType::InvalidDirective
    );
}

// ========== Labels ==========

#[test]
fn test_labels_and_symbols() {
    let source = "
    start:  LDX #$00
    loop:   INX
            BNE loop
    end:
            JMP start
    ";
    let output = Assembler::with_origin(0x0600).assemble(source).unwrap();

    assert_eq!(
        output.bytes,
        vec![0xA2, 0x00, 0xE8, 0xD0, 0xFD, 0x4C, 0x00, 0x06]
    );
    let names: Vec<_> = output.symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["start", "loop", "end"]);
    assert_eq!(output.lookup_symbol("end").unwrap().address, 0x0605);
    assert_eq!(output.lookup_symbol("loop").unwrap().defined_at, 3);
    assert!(output.lookup_symbol("LOOP").is_none());
}

#[test]
fn test_labels_are_case_sensitive() {
    let output = assemble("a: NOP\nA: NOP\nJMP A").unwrap();
    assert_eq!(output.bytes, vec![0xEA, 0xEA, 0x4C, 0x01, 0x00]);
}

#[test]
fn test_label_operand_forms() {
    let output = Assembler::with_origin(0x0300)
        .assemble("JSR sub\nLDA data,Y\nSTA data,X\nsub: RTS\ndata: .byte $00")
        .unwrap();
    assert_eq!(
        output.bytes,
        vec![0x20, 0x09, 0x03, 0xB9, 0x0A, 0x03, 0x9D, 0x0A, 0x03, 0x60, 0x00]
    );
}

#[test]
fn test_label_too_long() {
    let long = "a".repeat(33);
    let err = assemble(&format!("{}: NOP", long)).unwrap_err();
    assert_eq!(err.error_type, ErrorType::InvalidLabel);

    let ok = "a".repeat(32);
    assert!(assemble(&format!("{}: NOP", ok)).is_ok());
}

// ========== Branches ==========

#[test]
fn test_branch_forward_and_backward() {
    let output = Assembler::with_origin(0x8000)
        .assemble("top: BEQ skip\nNOP\nskip: BCC top")
        .unwrap();
    assert_eq!(output.bytes, vec![0xF0, 0x01, 0xEA, 0x90, 0xFB]);
}

#[test]
fn test_branch_limits() {
    // 127 bytes forward is the farthest reach
    let mut source = String::from("BNE far\n");
    source.push_str(&"NOP\n".repeat(127));
    source.push_str("far: NOP");
    assert_eq!(bytes(&source)[1], 0x7F);

    let mut source = String::from("BNE far\n");
    source.push_str(&"NOP\n".repeat(128));
    source.push_str("far: NOP");
    let err = assemble(&source).unwrap_err();
    assert_eq!(err.error_type, ErrorType::RangeError);
    assert_eq!(err.line, 1);

    // 128 bytes back
    let mut source = String::from("back: ");
    source.push_str(&"NOP\n".repeat(126));
    source.push_str("BNE back");
    assert_eq!(*bytes(&source).last().unwrap(), 0x80);
}

#[test]
fn test_branch_to_address() {
    let output = Assembler::with_origin(0x8000)
        .assemble("BNE $8010\nBPL $FE")
        .unwrap();
    assert_eq!(output.bytes, vec![0xD0, 0x0E, 0x10, 0xFE]);
}

#[test]
fn test_branch_wraps_address_space() {
    let output = Assembler::with_origin(0xFFF0)
        .assemble("BNE $0010")
        .unwrap();
    assert_eq!(output.bytes, vec![0xD0, 0x1E]);
}

// ========== Errors ==========

#[test]
fn test_error_reporting() {
    let err = assemble("NOP\nLDA #$01\nXYZ $10").unwrap_err();
    assert_eq!(err.error_type, ErrorType::InvalidMnemonic);
    assert_eq!(err.line, 3);
    assert_eq!(err.text, "XYZ $10");
    assert!(err.to_string().starts_with("line 3:"));
}

#[test]
fn test_undefined_label_reported_at_use() {
    let err = assemble("NOP\nNOP\nBEQ missing").unwrap_err();
    assert_eq!(err.error_type, ErrorType::UndefinedLabel);
    assert_eq!(err.line, 3);
    assert!(err.message.contains("missing"));
}

#[test]
fn test_duplicate_label_names_first_definition() {
    let err = assemble("x: NOP\nNOP\nx: NOP").unwrap_err();
    assert_eq!(err.error_type, ErrorType::DuplicateLabel);
    assert_eq!(err.line, 3);
    assert!(err.message.contains("line 1"));
}

#[test]
fn test_first_error_wins() {
    let err = assemble("LDA #$1\nFOO").unwrap_err();
    assert_eq!(err.line, 1);
}

#[test]
fn test_program_fills_to_end_of_memory() {
    let output = Assembler::with_origin(0xFFFE).assemble("NOP\nNOP").unwrap();
    assert_eq!(output.bytes.len(), 2);

    let err = Assembler::with_origin(0xFFFE)
        .assemble("JMP $1234")
        .unwrap_err();
    assert_eq!(err.error_type, ErrorType::RangeError);
}
