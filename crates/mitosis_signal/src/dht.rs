//! # Sensor Frame Decoding
//!
//! DHT-family sensors answer a query with 40 bits: four data bytes and a
//! checksum byte. On the wire each bit is a fixed-length low followed by a
//! high whose duration encodes the value - roughly 27 us for a 0, 70 us for
//! a 1. Classifying those highs and interpreting the bytes is pure logic;
//! this module does both.
//!
//! ## Frame Layout
//!
//! ```text
//! byte 0     byte 1     byte 2     byte 3     byte 4
//! humidity   humidity   temp       temp       checksum
//! (high)     (low)      (high)     (low)      (sum of bytes 0-3, low 8 bits)
//! ```
//!
//! The two models share the layout but not the scaling: the DHT22 packs
//! 16-bit tenths (temperature sign in bit 7 of byte 2), the DHT11 packs an
//! integer byte plus a fractional byte per reading.

use thiserror::Error;

/// High-pulse duration above which a bit is a 1, in microseconds.
///
/// Datasheet nominals are 26-28 us for a 0 and 70 us for a 1; 50 sits
/// comfortably between them.
pub const BIT_THRESHOLD_US: u16 = 50;

/// Number of pulses in a complete response: 32 data bits plus 8 checksum
/// bits.
pub const FRAME_BITS: usize = 40;

/// Errors produced while decoding a sensor response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    /// The pulse train did not contain exactly 40 bits.
    #[error("expected {FRAME_BITS} pulses, got {got}")]
    TruncatedFrame {
        /// Number of pulses actually supplied.
        got: usize,
    },

    /// The checksum byte does not match the sum of the data bytes.
    #[error("checksum mismatch: frame says {expected:#04x}, data sums to {computed:#04x}")]
    ChecksumMismatch {
        /// Checksum carried in the frame.
        expected: u8,
        /// Low eight bits of the data-byte sum.
        computed: u8,
    },
}

/// Which sensor produced the frame; decides how the bytes are scaled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorModel {
    /// DHT11: integer + 1/100 fractional byte per reading, always positive.
    Dht11,
    /// DHT22: 16-bit tenths, temperature sign in the high byte's top bit.
    Dht22,
}

/// A decoded humidity/temperature pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Relative humidity in percent.
    pub humidity: f32,
    /// Temperature in degrees Celsius.
    pub temperature: f32,
}

/// One raw 40-bit sensor response: 32 data bits and the checksum byte, as
/// the bit-timing front end delivers them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensorFrame {
    /// The four data bytes, most significant first.
    pub data: u32,
    /// The trailing checksum byte.
    pub checksum: u8,
}

impl SensorFrame {
    /// Classifies a train of 40 high-pulse widths into a frame.
    ///
    /// Pulses longer than [`BIT_THRESHOLD_US`] are ones; bits arrive most
    /// significant first.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::TruncatedFrame`] unless exactly 40 pulses are
    /// supplied.
    pub fn classify_pulses(high_pulses_us: &[u16]) -> Result<Self, SensorError> {
        if high_pulses_us.len() != FRAME_BITS {
            return Err(SensorError::TruncatedFrame {
                got: high_pulses_us.len(),
            });
        }
        let mut bits = 0u64;
        for &width in high_pulses_us {
            bits = bits << 1 | u64::from(width > BIT_THRESHOLD_US);
        }
        Ok(Self {
            data: (bits >> 8) as u32,
            checksum: (bits & 0xFF) as u8,
        })
    }

    /// The four data bytes, most significant first.
    #[must_use]
    pub const fn bytes(self) -> [u8; 4] {
        self.data.to_be_bytes()
    }

    /// Verifies the checksum and scales the bytes for the given model.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::ChecksumMismatch`] if the trailing byte does
    /// not equal the low eight bits of the data-byte sum.
    pub fn decode(self, model: SensorModel) -> Result<Reading, SensorError> {
        let bytes = self.bytes();
        let computed = bytes
            .iter()
            .fold(0u8, |sum, &byte| sum.wrapping_add(byte));
        if computed != self.checksum {
            return Err(SensorError::ChecksumMismatch {
                expected: self.checksum,
                computed,
            });
        }

        let reading = match model {
            SensorModel::Dht22 => {
                let humidity = f32::from(u16::from_be_bytes([bytes[0], bytes[1]])) / 10.0;
                let sign = if bytes[2] & 0x80 == 0 { 1.0 } else { -1.0 };
                let magnitude = u16::from_be_bytes([bytes[2] & 0x7F, bytes[3]]);
                Reading {
                    humidity,
                    temperature: f32::from(magnitude) / 10.0 * sign,
                }
            }
            SensorModel::Dht11 => Reading {
                humidity: f32::from(bytes[0]) + f32::from(bytes[1]) / 100.0,
                temperature: f32::from(bytes[2]) + f32::from(bytes[3]) / 100.0,
            },
        };
        Ok(reading)
    }
}
