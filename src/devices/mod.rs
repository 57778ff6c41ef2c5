//! Memory-mapped device support for the 6502 emulator.
//!
//! This module provides the `Device` trait implemented by every peripheral
//! attached to the [`Bus`](crate::Bus), the inclusive [`AddressRange`] each
//! device claims, and the four stock devices.
//!
//! # Architecture
//!
//! - **Device trait**: read/write by offset within the device, plus a
//!   per-clock action the bus runs after each CPU step
//! - **AddressRange**: fixed `start..=end` bounds, chosen at construction
//! - **Device implementations**: RAM, ROM, PIA (parallel I/O with handshake)
//!   and Screen (pixel sink)
//!
//! # Example
//!
//! ```rust
//! use emu6502::{AddressRange, Bus, MemoryBus, Ram, Rom};
//!
//! let mut bus = Bus::new();
//!
//! // 4KB RAM at 0x0000-0x0FFF
//! bus.add_device(Box::new(Ram::new(AddressRange::new(0x0000, 0x0FFF).unwrap())));
//!
//! // 4KB ROM at 0xF000-0xFFFF
//! let rom = Rom::new(AddressRange::new(0xF000, 0xFFFF).unwrap(), vec![0xEA; 0x1000]).unwrap();
//! bus.add_device(Box::new(rom));
//!
//! bus.write(0x0500, 0x42);
//! assert_eq!(bus.read(0x0500), 0x42);
//! assert_eq!(bus.read(0xF000), 0xEA);
//! ```

use std::any::Any;
use std::fmt;

use thiserror::Error;

pub mod interrupts;
pub mod pia;
pub mod ram;
pub mod rom;
pub mod screen;

pub use interrupts::{InterruptLine, InterruptLines};
pub use pia::Pia;
pub use ram::Ram;
pub use rom::Rom;
pub use screen::Screen;

/// Error returned when a device cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// The range's start lies after its end.
    #[error("invalid address range ${start:04X}-${end:04X}: start is after end")]
    InvalidRange {
        /// First address of the requested range
        start: u16,
        /// Last address of the requested range
        end: u16,
    },

    /// A sized range is empty or runs past the top of the address space.
    #[error("a {size}-byte device cannot start at ${start:04X}")]
    RangeOverflow {
        /// First address of the requested range
        start: u16,
        /// Requested size in bytes
        size: usize,
    },

    /// A ROM image does not fit the range it was mapped to.
    #[error("ROM image of {image_len} bytes does not fit a {capacity}-byte range")]
    ImageTooLarge {
        /// Size of the supplied image
        image_len: usize,
        /// Size of the device's range
        capacity: usize,
    },
}

/// An inclusive address range claimed by a device.
///
/// # Examples
///
/// ```rust
/// use emu6502::AddressRange;
///
/// let range = AddressRange::with_size(0xF000, 0x1000).unwrap();
/// assert_eq!(range.end(), 0xFFFF);
/// assert!(range.contains(0xF123));
/// assert!(!range.contains(0xEFFF));
/// assert_eq!(range.len(), 0x1000);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange {
    start: u16,
    end: u16,
}

impl AddressRange {
    /// Creates the range `start..=end`.
    pub fn new(start: u16, end: u16) -> Result<Self, DeviceError> {
        if start > end {
            return Err(DeviceError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates the range of `size` bytes beginning at `start`.
    pub fn with_size(start: u16, size: usize) -> Result<Self, DeviceError> {
        let last = (start as usize + size).checked_sub(1);
        match last {
            Some(end) if size > 0 && end <= u16::MAX as usize => Ok(Self {
                start,
                end: end as u16,
            }),
            _ => Err(DeviceError::RangeOverflow { start, size }),
        }
    }

    /// First address in the range.
    pub fn start(&self) -> u16 {
        self.start
    }

    /// Last address in the range.
    pub fn end(&self) -> u16 {
        self.end
    }

    /// Number of addresses covered (1 to 65536).
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// Always false: a range covers at least one address.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true iff `start <= addr <= end`.
    pub fn contains(&self, addr: u16) -> bool {
        self.start <= addr && addr <= self.end
    }

    /// Offset of `addr` from the start of the range.
    pub fn offset(&self, addr: u16) -> u16 {
        addr.wrapping_sub(self.start)
    }
}

impl fmt::Debug for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:04X}-${:04X}", self.start, self.end)
    }
}

/// Abstract interface for memory-mapped hardware devices.
///
/// The bus calls `read`/`write` with the offset of the accessed address from
/// the start of the device's range, so a device never needs to know where it
/// is mapped.
///
/// # Design
///
/// - **Offset-based**: Device receives offset (0 to len-1), not absolute address
/// - **No panics**: All operations must succeed or fail gracefully
/// - **Immutable read**: Read-time side effects use interior mutability
/// - **Mutable write**: Explicit side effects (buffer updates, flag changes)
///
/// # Examples
///
/// ```rust
/// use emu6502::{AddressRange, Device};
/// use std::any::Any;
///
/// struct Latch {
///     range: AddressRange,
///     value: u8,
/// }
///
/// impl Device for Latch {
///     fn range(&self) -> AddressRange {
///         self.range
///     }
///
///     fn read(&self, _offset: u16) -> u8 {
///         self.value
///     }
///
///     fn write(&mut self, _offset: u16, value: u8) {
///         self.value = value;
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn as_any_mut(&mut self) -> &mut dyn Any {
///         self
///     }
/// }
/// ```
pub trait Device {
    /// The inclusive address range this device answers to.
    fn range(&self) -> AddressRange;

    /// Returns true if this device claims `addr`.
    fn request(&self, addr: u16) -> bool {
        self.range().contains(addr)
    }

    /// Read byte at `offset` from the start of the device's range.
    fn read(&self, offset: u16) -> u8;

    /// Write byte at `offset` from the start of the device's range.
    fn write(&mut self, offset: u16, value: u8);

    /// Per-clock side effects, run by
    /// [`Bus::perform_clock_actions`](crate::Bus::perform_clock_actions).
    fn clock(&mut self) {}

    /// Upcast for typed access through the bus.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed access through the bus.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_new() {
        let range = AddressRange::new(0x1000, 0x10FF).unwrap();
        assert_eq!(range.start(), 0x1000);
        assert_eq!(range.end(), 0x10FF);
        assert_eq!(range.len(), 256);

        let single = AddressRange::new(0x2000, 0x2000).unwrap();
        assert_eq!(single.len(), 1);

        assert_eq!(
            AddressRange::new(0x2000, 0x1FFF),
            Err(DeviceError::InvalidRange {
                start: 0x2000,
                end: 0x1FFF
            })
        );
    }

    #[test]
    fn test_range_with_size() {
        let full = AddressRange::with_size(0x0000, 0x10000).unwrap();
        assert_eq!(full.end(), 0xFFFF);
        assert_eq!(full.len(), 0x10000);

        assert!(AddressRange::with_size(0xFFFF, 1).is_ok());
        assert!(AddressRange::with_size(0xFFFF, 2).is_err());
        assert!(AddressRange::with_size(0x1000, 0).is_err());
    }

    #[test]
    fn test_range_request_bounds() {
        let range = AddressRange::new(0x1000, 0x10FF).unwrap();
        assert!(!range.contains(0x0FFF));
        assert!(range.contains(0x1000));
        assert!(range.contains(0x10FF));
        assert!(!range.contains(0x1100));
        assert_eq!(range.offset(0x1042), 0x42);
    }
}
