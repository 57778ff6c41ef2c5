//! # Machine Configuration
//!
//! A serializable description of a memory map, used to build a [`Bus`]
//! without writing the device wiring by hand.
//!
//! ```json
//! { "devices": [
//!   { "kind": "ram",    "start": 0,     "end": 4095 },
//!   { "kind": "rom",    "start": 61440, "end": 65535, "image": [234, 234] },
//!   { "kind": "pia",    "start": 53264 },
//!   { "kind": "screen", "start": 53248 }
//! ] }
//! ```
//!
//! Devices are registered in the order listed, so earlier entries shadow
//! later ones where ranges overlap.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::devices::{AddressRange, DeviceError, InterruptLines, Pia, Ram, Rom, Screen};
use crate::memory::Bus;

/// Error raised while loading a configuration or building its bus.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid machine configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("device {index} ({kind}): {source}")]
    Device {
        index: usize,
        kind: &'static str,
        #[source]
        source: DeviceError,
    },
}

/// One device in the memory map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeviceConfig {
    /// Read/write memory covering `start..=end`.
    Ram { start: u16, end: u16 },

    /// Read-only memory covering `start..=end`, preloaded with `image`.
    Rom {
        start: u16,
        end: u16,
        #[serde(default)]
        image: Vec<u8>,
    },

    /// Four-register PIA at `start`, wired to the IRQ line.
    Pia { start: u16 },

    /// Four-register screen at `start`.
    Screen { start: u16 },
}

impl DeviceConfig {
    /// Lower-case device kind, as written in the configuration.
    pub fn kind(&self) -> &'static str {
        match self {
            DeviceConfig::Ram { .. } => "ram",
            DeviceConfig::Rom { .. } => "rom",
            DeviceConfig::Pia { .. } => "pia",
            DeviceConfig::Screen { .. } => "screen",
        }
    }
}

/// Full memory map of a machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Devices in registration order.
    pub devices: Vec<DeviceConfig>,
}

impl MachineConfig {
    /// Parses a configuration from JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use emu6502::{InterruptLines, MachineConfig, MemoryBus};
    ///
    /// let config = MachineConfig::from_json(
    ///     r#"{ "devices": [ { "kind": "ram", "start": 0, "end": 255 } ] }"#,
    /// ).unwrap();
    ///
    /// let mut bus = config.build_bus(&InterruptLines::new()).unwrap();
    /// bus.write(0x0010, 0x42);
    /// assert_eq!(bus.read(0x0010), 0x42);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds a bus with every configured device, in order.
    ///
    /// PIAs are wired to `lines.irq`; pass the same lines to
    /// [`CPU::with_lines`](crate::CPU::with_lines).
    pub fn build_bus(&self, lines: &InterruptLines) -> Result<Bus, ConfigError> {
        let mut bus = Bus::new();

        for (index, device) in self.devices.iter().enumerate() {
            let wrap = |source| ConfigError::Device {
                index,
                kind: device.kind(),
                source,
            };

            match device {
                DeviceConfig::Ram { start, end } => {
                    let range = AddressRange::new(*start, *end).map_err(wrap)?;
                    bus.add_device(Box::new(Ram::new(range)));
                }
                DeviceConfig::Rom { start, end, image } => {
                    let range = AddressRange::new(*start, *end).map_err(wrap)?;
                    let rom = Rom::new(range, image.clone()).map_err(wrap)?;
                    bus.add_device(Box::new(rom));
                }
                DeviceConfig::Pia { start } => {
                    let pia = Pia::new(*start, lines.irq.clone()).map_err(wrap)?;
                    bus.add_device(Box::new(pia));
                }
                DeviceConfig::Screen { start } => {
                    bus.add_device(Box::new(Screen::new(*start).map_err(wrap)?));
                }
            }
        }

        tracing::debug!(devices = bus.device_count(), "machine bus built");
        Ok(bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBus;

    const SAMPLE: &str = r#"{ "devices": [
        { "kind": "ram",    "start": 0,     "end": 4095 },
        { "kind": "rom",    "start": 61440, "end": 65535, "image": [234, 234] },
        { "kind": "pia",    "start": 53264 },
        { "kind": "screen", "start": 53248 }
    ] }"#;

    #[test]
    fn test_parse_sample() {
        let config = MachineConfig::from_json(SAMPLE).unwrap();
        assert_eq!(config.devices.len(), 4);
        assert_eq!(
            config.devices[1],
            DeviceConfig::Rom {
                start: 0xF000,
                end: 0xFFFF,
                image: vec![0xEA, 0xEA]
            }
        );
    }

    #[test]
    fn test_rom_image_defaults_to_empty() {
        let json = r#"{ "devices": [ { "kind": "rom", "start": 0, "end": 1 } ] }"#;
        let config = MachineConfig::from_json(json).unwrap();
        assert_eq!(
            config.devices[0],
            DeviceConfig::Rom {
                start: 0,
                end: 1,
                image: vec![]
            }
        );
    }

    #[test]
    fn test_build_bus() {
        let config = MachineConfig::from_json(SAMPLE).unwrap();
        let mut bus = config.build_bus(&InterruptLines::new()).unwrap();

        assert_eq!(bus.device_count(), 4);
        bus.write(0x0100, 0x42);
        assert_eq!(bus.read(0x0100), 0x42);
        assert_eq!(bus.read(0xF001), 0xEA);
        assert_eq!(bus.read(0xF002), 0x00);
    }

    #[test]
    fn test_pia_wired_to_irq() {
        let config = MachineConfig::from_json(SAMPLE).unwrap();
        let lines = InterruptLines::new();
        let mut bus = config.build_bus(&lines).unwrap();

        bus.write(0xD012, Pia::IRQA);
        bus.write(0xD010, 0x01);
        assert!(lines.irq.is_raised());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = MachineConfig::from_json(r#"{ "devices": [ { "kind": "uart", "start": 0 } ] }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_invalid_range_reported_with_index() {
        let config = MachineConfig {
            devices: vec![
                DeviceConfig::Ram { start: 0, end: 15 },
                DeviceConfig::Ram {
                    start: 0x2000,
                    end: 0x1000,
                },
            ],
        };
        let err = config.build_bus(&InterruptLines::new()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Device {
                index: 1,
                kind: "ram",
                ..
            }
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = MachineConfig::from_json(SAMPLE).unwrap();
        let json = config.to_json().unwrap();
        assert_eq!(MachineConfig::from_json(&json).unwrap(), config);
    }
}
