//! Fuzz target for CPU execution.
//!
//! Builds a machine with RAM, a PIA and a screen from arbitrary contents and
//! register state, then runs a bounded number of clock ticks while toggling
//! the interrupt lines.

#![no_main]

use arbitrary::Arbitrary;
use emu6502::{AddressRange, Bus, InterruptLines, MemoryBus, Pia, Ram, Screen, CPU};
use libfuzzer_sys::fuzz_target;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    /// Code placed at 0x8000
    program: Vec<u8>,
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
    /// Tick on which to pulse NMI, and tick on which to raise IRQ
    nmi_at: u16,
    irq_at: u16,
    /// Number of ticks to run
    ticks: u16,
}

fuzz_target!(|input: FuzzInput| {
    let lines = InterruptLines::new();

    let mut ram = Ram::new(AddressRange::new(0x0000, 0xFFFF).unwrap());
    ram.load(0x0000, &input.zero_page);
    ram.load(0x0100, &input.stack_page);
    ram.load(0x8000, &input.program[..input.program.len().min(0x7000)]);
    ram.load(0xFFFA, &[0x00, 0x90, 0x00, 0x80, 0x00, 0xA0]);

    let mut bus = Bus::new();
    bus.add_device(Box::new(Pia::new(0xD010, lines.irq.clone()).unwrap()));
    bus.add_device(Box::new(Screen::new(0xD000).unwrap()));
    bus.add_device(Box::new(ram));

    let mut cpu = CPU::with_lines(bus, lines);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    for tick in 0..input.ticks.min(10_000) {
        if tick == input.nmi_at {
            cpu.set_nmi(true);
        }
        if tick == input.irq_at {
            cpu.set_irq(true);
        }

        let before = cpu.total_cycles();
        if cpu.exec().is_err() {
            // Illegal opcodes stop the machine without consuming a tick
            assert_eq!(cpu.total_cycles(), before);
            break;
        }
        assert_eq!(cpu.total_cycles(), before + 1);
        cpu.memory_mut().perform_clock_actions();

        // Bit 5 always reads set, B never does
        assert_eq!(cpu.status() & 0x30, 0x20);
    }
});
