//! ROM device implementation.
//!
//! Provides read-only memory storage via the Device trait.

use std::any::Any;

use super::{AddressRange, Device, DeviceError};

/// Read-only memory device.
///
/// `Rom` serves a preloaded image. Bus writes are dropped and reported with a
/// `tracing` warning; they never fail the access.
///
/// # Examples
///
/// ```rust
/// use emu6502::{AddressRange, Device, Rom};
///
/// let range = AddressRange::new(0xFFFC, 0xFFFF).unwrap();
/// let mut rom = Rom::new(range, vec![0x00, 0x80]).unwrap();
///
/// // Reads serve the image, zero-padded to the range
/// assert_eq!(rom.read(1), 0x80);
/// assert_eq!(rom.read(3), 0x00);
///
/// // Writes are ignored
/// rom.write(0, 0xFF);
/// assert_eq!(rom.read(0), 0x00);
/// ```
pub struct Rom {
    range: AddressRange,
    data: Vec<u8>,
}

impl Rom {
    /// Create a ROM covering `range` with the given image.
    ///
    /// A shorter image is zero-padded to the size of the range.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::ImageTooLarge`] if the image does not fit.
    pub fn new(range: AddressRange, mut image: Vec<u8>) -> Result<Self, DeviceError> {
        if image.len() > range.len() {
            return Err(DeviceError::ImageTooLarge {
                image_len: image.len(),
                capacity: range.len(),
            });
        }
        image.resize(range.len(), 0);
        Ok(Self { range, data: image })
    }

    /// The ROM contents.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Device for Rom {
    fn range(&self) -> AddressRange {
        self.range
    }

    fn read(&self, offset: u16) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0)
    }

    fn write(&mut self, offset: u16, value: u8) {
        tracing::warn!(
            address = format_args!("${:04X}", self.range.start().wrapping_add(offset)),
            value = format_args!("${:02X}", value),
            "write to ROM ignored"
        );
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rom_new() {
        let rom = Rom::new(AddressRange::with_size(0xC000, 256).unwrap(), vec![0xEA; 256]).unwrap();

        assert_eq!(rom.data().len(), 256);
        assert_eq!(rom.read(0), 0xEA);
        assert_eq!(rom.read(255), 0xEA);
    }

    #[test]
    fn test_rom_padding() {
        let rom = Rom::new(AddressRange::with_size(0xC000, 4).unwrap(), vec![0x01, 0x02]).unwrap();
        assert_eq!(rom.data(), &[0x01, 0x02, 0x00, 0x00]);
    }

    #[test]
    fn test_rom_image_too_large() {
        let result = Rom::new(AddressRange::with_size(0xC000, 2).unwrap(), vec![0; 3]);
        assert_eq!(
            result.err(),
            Some(DeviceError::ImageTooLarge {
                image_len: 3,
                capacity: 2
            })
        );
    }

    #[test]
    fn test_rom_write_ignored() {
        let range = AddressRange::with_size(0xC000, 4).unwrap();
        let mut rom = Rom::new(range, vec![0x01, 0x02, 0x03, 0x04]).unwrap();

        rom.write(0, 0xFF);
        rom.write(3, 0xFF);

        assert_eq!(rom.read(0), 0x01);
        assert_eq!(rom.read(3), 0x04);
    }
}
