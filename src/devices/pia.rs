//! Peripheral Interface Adapter (PIA) device implementation.
//!
//! Two 8-bit parallel ports with a ready-flag handshake and optional IRQ
//! generation.

use std::any::Any;
use std::cell::Cell;

use super::{AddressRange, Device, DeviceError, InterruptLine};

/// Two-port parallel interface with ready-flag handshake.
///
/// ## Register Map (offsets from device base address)
///
/// | Offset | Register | Description |
/// |--------|----------|-------------|
/// | 0      | PORTA    | Port A data |
/// | 1      | PORTB    | Port B data |
/// | 2      | CONTROL  | Direction and interrupt enables |
/// | 3      | STATUS   | Ready flags |
///
/// ## Control Register (Offset 2)
///
/// | Bit | Name  | Description |
/// |-----|-------|-------------|
/// | 0   | OUTA  | Port A is driven by the peripheral (read-only to the bus) |
/// | 1   | OUTB  | Port B is driven by the peripheral (read-only to the bus) |
/// | 2   | IRQA  | Raise IRQ while RDYA is set |
/// | 3   | IRQB  | Raise IRQ while RDYB is set |
///
/// ## Status Register (Offset 3)
///
/// | Bit | Name | Description |
/// |-----|------|-------------|
/// | 0   | RDYA | New data on port A |
/// | 1   | RDYB | New data on port B |
///
/// ## Handshake
///
/// - **Output port** (OUT bit set): the peripheral drives the port with
///   [`drive_port_a`](Pia::drive_port_a), which sets the ready flag. Bus writes
///   to the port and to its ready bit are ignored; bus reads return the driven
///   value and leave the flag alone.
/// - **Input port** (OUT bit clear): bus writes store the value and set the
///   ready flag for the peripheral, which collects it with
///   [`take_port_a`](Pia::take_port_a). Bus reads return the port and clear the
///   ready flag.
///
/// # Example
///
/// ```rust
/// use emu6502::{Device, InterruptLine, Pia};
///
/// let irq = InterruptLine::new();
/// let mut pia = Pia::new(0xD010, irq.clone()).unwrap();
///
/// // Port A driven by the peripheral, with interrupts
/// pia.write(Pia::CONTROL, Pia::OUTA | Pia::IRQA);
/// pia.drive_port_a(b'K');
/// assert!(irq.is_raised());
///
/// // The bus cannot overwrite an output port
/// pia.write(Pia::PORTA, 0x00);
/// assert_eq!(pia.read(Pia::PORTA), b'K');
/// ```
pub struct Pia {
    range: AddressRange,
    porta: Cell<u8>,
    portb: Cell<u8>,
    control: Cell<u8>,
    rdya: Cell<bool>,
    rdyb: Cell<bool>,
    irq: InterruptLine,
}

/// One of the two ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Port {
    A,
    B,
}

impl Pia {
    /// Port A data register offset.
    pub const PORTA: u16 = 0;
    /// Port B data register offset.
    pub const PORTB: u16 = 1;
    /// Control register offset.
    pub const CONTROL: u16 = 2;
    /// Status register offset.
    pub const STATUS: u16 = 3;

    /// Control bit: port A is an output.
    pub const OUTA: u8 = 0x01;
    /// Control bit: port B is an output.
    pub const OUTB: u8 = 0x02;
    /// Control bit: IRQ on port A ready.
    pub const IRQA: u8 = 0x04;
    /// Control bit: IRQ on port B ready.
    pub const IRQB: u8 = 0x08;

    /// Status bit: port A ready.
    pub const RDYA: u8 = 0x01;
    /// Status bit: port B ready.
    pub const RDYB: u8 = 0x02;

    /// Number of registers in the window.
    pub const SIZE: usize = 4;

    /// Create a PIA whose registers start at `base`, signalling on `irq`.
    ///
    /// # Errors
    ///
    /// Fails if the four-register window would run past `$FFFF`.
    pub fn new(base: u16, irq: InterruptLine) -> Result<Self, DeviceError> {
        Ok(Self {
            range: AddressRange::with_size(base, Self::SIZE)?,
            porta: Cell::new(0),
            portb: Cell::new(0),
            control: Cell::new(0),
            rdya: Cell::new(false),
            rdyb: Cell::new(false),
            irq,
        })
    }

    /// Peripheral side: drive port A and flag it ready.
    ///
    /// Has no effect unless port A is an output.
    pub fn drive_port_a(&self, value: u8) {
        self.drive(Port::A, value);
    }

    /// Peripheral side: drive port B and flag it ready.
    ///
    /// Has no effect unless port B is an output.
    pub fn drive_port_b(&self, value: u8) {
        self.drive(Port::B, value);
    }

    /// Peripheral side: collect data the bus wrote to input port A.
    ///
    /// Returns `None` unless port A is an input with its ready flag set;
    /// collecting clears the flag.
    pub fn take_port_a(&self) -> Option<u8> {
        self.take(Port::A)
    }

    /// Peripheral side: collect data the bus wrote to input port B.
    pub fn take_port_b(&self) -> Option<u8> {
        self.take(Port::B)
    }

    /// Current port A value.
    pub fn port_a(&self) -> u8 {
        self.porta.get()
    }

    /// Current port B value.
    pub fn port_b(&self) -> u8 {
        self.portb.get()
    }

    /// Current status register (ready flags).
    pub fn status(&self) -> u8 {
        let mut status = 0;
        if self.rdya.get() {
            status |= Self::RDYA;
        }
        if self.rdyb.get() {
            status |= Self::RDYB;
        }
        status
    }

    fn cells(&self, port: Port) -> (&Cell<u8>, &Cell<bool>, u8) {
        match port {
            Port::A => (&self.porta, &self.rdya, Self::OUTA),
            Port::B => (&self.portb, &self.rdyb, Self::OUTB),
        }
    }

    fn is_output(&self, port: Port) -> bool {
        let (_, _, out_bit) = self.cells(port);
        self.control.get() & out_bit != 0
    }

    fn drive(&self, port: Port, value: u8) {
        if !self.is_output(port) {
            return;
        }
        let (data, ready, _) = self.cells(port);
        data.set(value);
        ready.set(true);
        self.update_irq();
    }

    fn take(&self, port: Port) -> Option<u8> {
        let (data, ready, _) = self.cells(port);
        if self.is_output(port) || !ready.get() {
            return None;
        }
        ready.set(false);
        self.update_irq();
        Some(data.get())
    }

    fn bus_read_port(&self, port: Port) -> u8 {
        let (data, ready, _) = self.cells(port);
        if !self.is_output(port) && ready.get() {
            ready.set(false);
            self.update_irq();
        }
        data.get()
    }

    fn bus_write_port(&self, port: Port, value: u8) {
        if self.is_output(port) {
            return;
        }
        let (data, ready, _) = self.cells(port);
        data.set(value);
        ready.set(true);
        self.update_irq();
    }

    fn bus_write_status(&self, value: u8) {
        if !self.is_output(Port::A) {
            self.rdya.set(value & Self::RDYA != 0);
        }
        if !self.is_output(Port::B) {
            self.rdyb.set(value & Self::RDYB != 0);
        }
        self.update_irq();
    }

    /// Drives this PIA's request on the IRQ line from the ready flags and
    /// enables.
    fn update_irq(&self) {
        let control = self.control.get();
        let pending = (self.rdya.get() && control & Self::IRQA != 0)
            || (self.rdyb.get() && control & Self::IRQB != 0);
        self.irq.set(pending);
    }
}

impl Device for Pia {
    fn range(&self) -> AddressRange {
        self.range
    }

    fn read(&self, offset: u16) -> u8 {
        match offset {
            Self::PORTA => self.bus_read_port(Port::A),
            Self::PORTB => self.bus_read_port(Port::B),
            Self::CONTROL => self.control.get(),
            Self::STATUS => self.status(),
            _ => 0,
        }
    }

    fn write(&mut self, offset: u16, value: u8) {
        match offset {
            Self::PORTA => self.bus_write_port(Port::A, value),
            Self::PORTB => self.bus_write_port(Port::B, value),
            Self::CONTROL => {
                self.control.set(value & 0x0F);
                self.update_irq();
            }
            Self::STATUS => self.bus_write_status(value),
            _ => {}
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
