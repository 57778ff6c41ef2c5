//! Fuzz target for the assembler.
//!
//! Feeds arbitrary text to the assembler. Errors are fine; panics are not.
//! Whatever assembles must also disassemble and assemble again to the same
//! bytes.

#![no_main]

use emu6502::{disassemble, Assembler};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);
    let assembler = Assembler::with_origin(0x0200);

    let Ok(output) = assembler.assemble(&source) else {
        return;
    };

    let listing: Vec<String> = disassemble(&output.bytes, output.origin)
        .into_iter()
        .map(|line| line.text)
        .collect();
    let again = assembler
        .assemble(&listing.join("\n"))
        .expect("disassembly listing must assemble");
    assert_eq!(again.bytes, output.bytes);
});
