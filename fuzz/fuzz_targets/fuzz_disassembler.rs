//! Fuzz target for the disassembler.
//!
//! Feeds arbitrary byte sequences to the disassembler and checks that lines
//! tile the input exactly and that the listing assembles back to the input.

#![no_main]

use arbitrary::Arbitrary;
use emu6502::{disassemble, Assembler};
use libfuzzer_sys::fuzz_target;

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    origin: u16,
    bytes: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    // Keep the program inside the address space so it can be reassembled
    let room = 0x1_0000 - input.origin as usize;
    let bytes = &input.bytes[..input.bytes.len().min(room).min(4096)];

    let lines = disassemble(bytes, input.origin);

    let mut total_size = 0;
    let mut expected_address = input.origin;
    for line in &lines {
        assert_eq!(line.address, expected_address);
        assert!((1..=3).contains(&line.bytes.len()));

        total_size += line.bytes.len();
        expected_address = expected_address.wrapping_add(line.bytes.len() as u16);
    }
    assert_eq!(total_size, bytes.len());

    let listing: Vec<String> = lines.into_iter().map(|line| line.text).collect();
    let output = Assembler::with_origin(input.origin)
        .assemble(&listing.join("\n"))
        .expect("disassembly listing must assemble");
    assert_eq!(output.bytes, bytes);
});
