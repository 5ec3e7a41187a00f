//! # MITOSIS Signal
//!
//! Pure codecs for the teaching peripherals that sit alongside the life
//! engine: decoding humidity/temperature sensor frames and encoding
//! addressable-LED bit streams.
//!
//! Everything here is plain bit arithmetic. Pin handling, peripheral state
//! machines, and electrical timing belong to whatever transport consumes
//! these frames; they are deliberately absent.

pub mod dht;
pub mod neopixel;

pub use dht::{Reading, SensorError, SensorFrame, SensorModel};
pub use neopixel::{wheel, LedStrip, Rgb};
