//! RAM device implementation.
//!
//! Provides readable and writable memory storage via the Device trait.

use std::any::Any;

use super::{AddressRange, Device};

/// Simple RAM device with readable and writable storage.
///
/// `Ram` keeps one byte per address in its range; every address is readable
/// and writable.
///
/// # Examples
///
/// ```rust
/// use emu6502::{AddressRange, Device, Ram};
///
/// let mut ram = Ram::new(AddressRange::with_size(0x0200, 1024).unwrap());
///
/// // Offsets are relative to the start of the range
/// ram.write(0x42, 0xAA);
/// assert_eq!(ram.read(0x42), 0xAA);
/// ```
pub struct Ram {
    range: AddressRange,
    data: Vec<u8>,
}

impl Ram {
    /// Create a RAM device covering `range`, zero-filled.
    pub fn new(range: AddressRange) -> Self {
        Self {
            range,
            data: vec![0; range.len()],
        }
    }

    /// Load bytes into RAM starting at `offset`.
    ///
    /// This is useful for initializing RAM contents with program data or
    /// interrupt vectors. Bytes that would fall past the end of the device
    /// are dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use emu6502::{AddressRange, Device, Ram};
    ///
    /// let mut ram = Ram::new(AddressRange::with_size(0x0000, 1024).unwrap());
    /// ram.load(0x100, &[0x01, 0x02, 0x03]);
    ///
    /// assert_eq!(ram.read(0x100), 0x01);
    /// assert_eq!(ram.read(0x102), 0x03);
    /// ```
    pub fn load(&mut self, offset: u16, bytes: &[u8]) {
        let start = (offset as usize).min(self.data.len());
        let end = (start + bytes.len()).min(self.data.len());
        self.data[start..end].copy_from_slice(&bytes[..end - start]);
    }

    /// The backing store.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Device for Ram {
    fn range(&self) -> AddressRange {
        self.range
    }

    fn read(&self, offset: u16) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0)
    }

    fn write(&mut self, offset: u16, value: u8) {
        if let Some(cell) = self.data.get_mut(offset as usize) {
            *cell = value;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
