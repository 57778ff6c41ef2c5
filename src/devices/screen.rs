//! Screen device implementation.
//!
//! A pixel sink: the CPU writes coordinates and an intensity into a small
//! register window, then sets the ready register. The next clock action
//! commits the pixel to the bitmap and clears ready.

use std::any::Any;

use super::{AddressRange, Device, DeviceError};

/// Memory-mapped pixel sink with a 256x256 intensity bitmap.
///
/// ## Register Map (offsets from device base address)
///
/// | Offset | Register  | Description |
/// |--------|-----------|-------------|
/// | 0      | X         | Column of the pending pixel |
/// | 1      | Y         | Row of the pending pixel |
/// | 2      | INTENSITY | Value to store |
/// | 3      | READY     | Non-zero: commit on next clock, then cleared |
///
/// # Example
///
/// ```rust
/// use emu6502::{Device, Screen};
///
/// let mut screen = Screen::new(0xD000).unwrap();
/// screen.write(Screen::X, 10);
/// screen.write(Screen::Y, 20);
/// screen.write(Screen::INTENSITY, 0xFF);
/// screen.write(Screen::READY, 1);
///
/// screen.clock();
///
/// assert_eq!(screen.pixel(10, 20), 0xFF);
/// assert_eq!(screen.read(Screen::READY), 0);
/// ```
pub struct Screen {
    range: AddressRange,
    registers: [u8; 4],
    bitmap: Vec<u8>,
}

impl Screen {
    /// Pixel column register offset.
    pub const X: u16 = 0;
    /// Pixel row register offset.
    pub const Y: u16 = 1;
    /// Intensity register offset.
    pub const INTENSITY: u16 = 2;
    /// Ready register offset.
    pub const READY: u16 = 3;

    /// Bitmap width and height in pixels.
    pub const DIMENSION: usize = 256;

    /// Create a screen whose registers start at `base`.
    ///
    /// # Errors
    ///
    /// Fails if the four-register window would run past `$FFFF`.
    pub fn new(base: u16) -> Result<Self, DeviceError> {
        Ok(Self {
            range: AddressRange::with_size(base, 4)?,
            registers: [0; 4],
            bitmap: vec![0; Self::DIMENSION * Self::DIMENSION],
        })
    }

    /// Intensity of the committed pixel at (`x`, `y`).
    pub fn pixel(&self, x: u8, y: u8) -> u8 {
        self.bitmap[Self::index(x, y)]
    }

    /// Row-major bitmap, `DIMENSION * DIMENSION` bytes.
    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    /// Returns true if a pixel is waiting for the next clock action.
    pub fn is_pending(&self) -> bool {
        self.registers[Self::READY as usize] != 0
    }

    fn index(x: u8, y: u8) -> usize {
        y as usize * Self::DIMENSION + x as usize
    }
}

impl Device for Screen {
    fn range(&self) -> AddressRange {
        self.range
    }

    fn read(&self, offset: u16) -> u8 {
        self.registers.get(offset as usize).copied().unwrap_or(0)
    }

    fn write(&mut self, offset: u16, value: u8) {
        if let Some(register) = self.registers.get_mut(offset as usize) {
            *register = value;
        }
    }

    fn clock(&mut self) {
        if !self.is_pending() {
            return;
        }
        let [x, y, intensity, _] = self.registers;
        self.bitmap[Self::index(x, y)] = intensity;
        self.registers[Self::READY as usize] = 0;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
