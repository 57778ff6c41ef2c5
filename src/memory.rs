//! # Memory Bus
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from
//! specific memory implementations, and [`Bus`], the device-dispatching
//! implementation used to assemble a machine from RAM, ROM and peripherals.
//!
//! ## Design Principles
//!
//! The bus follows 6502 hardware behavior:
//! - No bus errors - reads/writes always succeed
//! - Unmapped reads return `0` (open bus)
//! - Unmapped writes are dropped
//! - The first registered device that claims an address wins

use std::fmt;

use crate::devices::Device;

/// Memory bus trait for CPU to read/write bytes.
///
/// The CPU accesses all memory (RAM, ROM, I/O) through this abstraction.
///
/// # Design
///
/// - `read(&self)`: Immutable reference allows shared reads
/// - `write(&mut self)`: Mutable reference makes side effects explicit
/// - No error types: 6502 hardware has no bus error mechanism
///
/// ## Implementing Custom Memory
///
/// ```
/// use emu6502::MemoryBus;
///
/// struct FlatMemory {
///     data: Vec<u8>,
/// }
///
/// impl MemoryBus for FlatMemory {
///     fn read(&self, addr: u16) -> u8 {
///         self.data[addr as usize]
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         self.data[addr as usize] = value;
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// This method must never panic.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// This method must never panic. Read-only or unmapped addresses may
    /// ignore the write.
    fn write(&mut self, addr: u16, value: u8);

    /// Runs one clock action on every attached peripheral.
    ///
    /// Default implementation does nothing, for memories without devices.
    fn perform_clock_actions(&mut self) {}
}

/// Value returned for reads no device claims.
pub const OPEN_BUS_VALUE: u8 = 0x00;

/// Memory bus that routes read/write operations to registered devices.
///
/// `Bus` owns its devices and dispatches each access to the first device,
/// in registration order, whose range contains the address. Ranges may
/// overlap; earlier registrations shadow later ones.
///
/// # Examples
///
/// ```rust
/// use emu6502::{AddressRange, Bus, MemoryBus, Ram};
///
/// let mut bus = Bus::new();
///
/// // 16KB RAM at 0x0000
/// bus.add_device(Box::new(Ram::new(AddressRange::with_size(0x0000, 0x4000).unwrap())));
///
/// bus.write(0x1234, 0x42);
/// assert_eq!(bus.read(0x1234), 0x42);
///
/// // Unmapped address reads as 0
/// assert_eq!(bus.read(0x8000), 0x00);
/// ```
#[derive(Default)]
pub struct Bus {
    devices: Vec<Box<dyn Device>>,
}

impl Bus {
    /// Create a bus with no devices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device and return its index.
    ///
    /// Indices are stable for the life of the bus and can be used with
    /// [`device_as`](Bus::device_as) to reach the concrete device later.
    pub fn add_device(&mut self, device: Box<dyn Device>) -> usize {
        tracing::debug!(range = ?device.range(), index = self.devices.len(), "device registered");
        self.devices.push(device);
        self.devices.len() - 1
    }

    /// Number of registered devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// The device registered at `index`.
    pub fn device(&self, index: usize) -> Option<&dyn Device> {
        self.devices.get(index).map(|device| device.as_ref())
    }

    /// The device at `index`, downcast to its concrete type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use emu6502::{Bus, MemoryBus, Screen};
    ///
    /// let mut bus = Bus::new();
    /// let screen = bus.add_device(Box::new(Screen::new(0xD000).unwrap()));
    ///
    /// bus.write(0xD002, 0x7F);
    /// bus.write(0xD003, 0x01);
    /// bus.perform_clock_actions();
    ///
    /// assert_eq!(bus.device_as::<Screen>(screen).unwrap().pixel(0, 0), 0x7F);
    /// ```
    pub fn device_as<T: 'static>(&self, index: usize) -> Option<&T> {
        self.devices.get(index)?.as_any().downcast_ref::<T>()
    }

    /// Mutable variant of [`device_as`](Bus::device_as).
    pub fn device_as_mut<T: 'static>(&mut self, index: usize) -> Option<&mut T> {
        self.devices.get_mut(index)?.as_any_mut().downcast_mut::<T>()
    }

    /// Find the device that claims `addr`.
    fn find_device(&self, addr: u16) -> Option<&dyn Device> {
        self.devices
            .iter()
            .find(|device| device.request(addr))
            .map(|device| device.as_ref())
    }

    /// Mutable variant of `find_device`.
    fn find_device_mut(&mut self, addr: u16) -> Option<&mut Box<dyn Device>> {
        self.devices.iter_mut().find(|device| device.request(addr))
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.devices.iter().map(|device| device.range()))
            .finish()
    }
}

impl MemoryBus for Bus {
    fn read(&self, addr: u16) -> u8 {
        match self.find_device(addr) {
            Some(device) => device.read(device.range().offset(addr)),
            None => OPEN_BUS_VALUE,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if let Some(device) = self.find_device_mut(addr) {
            let offset = device.range().offset(addr);
            device.write(offset, value);
        }
        // Unmapped writes are silently ignored (open bus)
    }

    fn perform_clock_actions(&mut self) {
        for device in &mut self.devices {
            device.clock();
        }
    }
}
