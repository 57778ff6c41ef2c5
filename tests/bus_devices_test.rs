//! Integration tests for the device bus: memory maps mixing RAM, ROM and
//! peripherals, driven by the CPU.

use emu6502::{
    AddressRange, Assembler, Bus, InterruptLines, MachineConfig, MemoryBus, Pia, Ram, Rom, Screen,
    CPU,
};

/// RAM at $0000-$0FFF, `image` in ROM at $F000-$FFFF with the reset vector
/// pointing at $F000.
fn rom_machine(image: &[u8]) -> Bus {
    let mut rom_image = vec![0xEA; 0x1000];
    rom_image[..image.len()].copy_from_slice(image);
    rom_image[0x0FFC] = 0x00;
    rom_image[0x0FFD] = 0xF0;

    let mut bus = Bus::new();
    bus.add_device(Box::new(Ram::new(
        AddressRange::new(0x0000, 0x0FFF).unwrap(),
    )));
    bus.add_device(Box::new(
        Rom::new(AddressRange::new(0xF000, 0xFFFF).unwrap(), rom_image).unwrap(),
    ));
    bus
}

#[test]
fn test_ram_rom_unmapped() {
    let mut bus = rom_machine(&[0xA9, 0x01]);

    bus.write(0x0FFF, 0x42);
    assert_eq!(bus.read(0x0FFF), 0x42);

    bus.write(0xF000, 0x00);
    assert_eq!(bus.read(0xF000), 0xA9);

    bus.write(0x4000, 0x99);
    assert_eq!(bus.read(0x4000), 0x00);
}

#[test]
fn test_program_runs_from_rom() {
    let program = Assembler::with_origin(0xF000)
        .assemble(
            "
            LDX #$00
    loop:   TXA
            STA $0200,X
            INX
            CPX #$10
            BNE loop
    done:   JMP done
            ",
        )
        .unwrap();

    let mut cpu = CPU::new(rom_machine(&program.bytes));
    assert_eq!(cpu.pc(), 0xF000);

    let done = program.lookup_symbol("done").unwrap().address;
    while cpu.pc() != done {
        cpu.step().unwrap();
    }

    for i in 0..0x10u16 {
        assert_eq!(cpu.memory().read(0x0200 + i), i as u8);
    }
}

#[test]
fn test_self_modifying_write_to_rom_is_dropped() {
    // STA $F000 then LDA $F000
    let mut cpu = CPU::new(rom_machine(&[0xA9, 0x00, 0x8D, 0x00, 0xF0, 0xAD, 0x00, 0xF0]));
    cpu.step().unwrap();
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0xA9);
}

#[test]
fn test_pia_output_through_bus() {
    let lines = InterruptLines::new();
    let mut bus = Bus::new();
    let pia = bus.add_device(Box::new(Pia::new(0xD010, lines.irq.clone()).unwrap()));

    // Port B is an input from the CPU side: the peripheral collects it
    bus.write(0xD011, b'H');
    assert_eq!(bus.read(0xD013) & Pia::RDYB, Pia::RDYB);
    assert_eq!(bus.device_as::<Pia>(pia).unwrap().take_port_b(), Some(b'H'));
    assert_eq!(bus.read(0xD013) & Pia::RDYB, 0);

    // Port A driven by the peripheral
    bus.write(0xD012, Pia::OUTA);
    bus.device_as::<Pia>(pia).unwrap().drive_port_a(b'!');
    assert_eq!(bus.read(0xD010), b'!');
    assert!(!lines.irq.is_raised());
}

#[test]
fn test_screen_commits_on_clock() {
    let program = Assembler::with_origin(0x0200)
        .assemble(
            "
            LDA #$05
            STA $D000
            LDA #$07
            STA $D001
            LDA #$FF
            STA $D002
            STA $D003
            ",
        )
        .unwrap();

    let mut ram = Ram::new(AddressRange::new(0x0000, 0x0FFF).unwrap());
    ram.load(0x0200, &program.bytes);
    let mut vectors = Ram::new(AddressRange::new(0xFFFC, 0xFFFF).unwrap());
    vectors.load(0, &[0x00, 0x02]);

    let mut bus = Bus::new();
    bus.add_device(Box::new(ram));
    let screen = bus.add_device(Box::new(Screen::new(0xD000).unwrap()));
    bus.add_device(Box::new(vectors));

    let mut cpu = CPU::new(bus);
    for _ in 0..7 {
        cpu.step().unwrap();
    }

    let bus = cpu.memory_mut();
    assert!(bus.device_as::<Screen>(screen).unwrap().is_pending());
    assert_eq!(bus.device_as::<Screen>(screen).unwrap().pixel(5, 7), 0);

    bus.perform_clock_actions();

    let screen = bus.device_as::<Screen>(screen).unwrap();
    assert_eq!(screen.pixel(5, 7), 0xFF);
    assert!(!screen.is_pending());
    assert_eq!(bus.read(0xD003), 0);
}

#[test]
fn test_first_registered_device_wins() {
    let mut low = Ram::new(AddressRange::new(0x0000, 0x00FF).unwrap());
    low.load(0x10, &[0x11]);
    let mut high = Ram::new(AddressRange::new(0x0000, 0x01FF).unwrap());
    high.load(0x10, &[0x22]);
    high.load(0x110, &[0x33]);

    let mut bus = Bus::new();
    bus.add_device(Box::new(low));
    bus.add_device(Box::new(high));

    assert_eq!(bus.read(0x0010), 0x11);
    assert_eq!(bus.read(0x0110), 0x33);

    bus.write(0x0010, 0x44);
    assert_eq!(bus.device_as::<Ram>(1).unwrap().data()[0x10], 0x22);
}

#[test]
fn test_machine_from_config() {
    let program = Assembler::with_origin(0xF000)
        .assemble("LDA #$2A\nSTA $0010\nhalt: JMP halt")
        .unwrap();

    let mut image = program.bytes.clone();
    image.resize(0x1000, 0xEA);
    image[0x0FFC] = 0x00;
    image[0x0FFD] = 0xF0;

    let json = format!(
        r#"{{ "devices": [
            {{ "kind": "ram", "start": 0, "end": 4095 }},
            {{ "kind": "rom", "start": 61440, "end": 65535, "image": {:?} }}
        ] }}"#,
        image
    );

    let config = MachineConfig::from_json(&json).unwrap();
    let lines = InterruptLines::new();
    let bus = config.build_bus(&lines).unwrap();
    let mut cpu = CPU::with_lines(bus, lines);

    cpu.run_for_cycles(20).unwrap();
    assert_eq!(cpu.memory().read(0x0010), 0x2A);
    assert_eq!(cpu.pc(), 0xF005);
}
