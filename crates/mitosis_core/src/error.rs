//! # Configuration Errors
//!
//! Everything that can be rejected at engine construction time. The running
//! engine has no recoverable error classes: queue exhaustion is normal
//! control flow and render calls are infallible by contract.

use thiserror::Error;

/// Errors raised while validating or parsing a simulation configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Grid dimensions must both be at least one cell.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension {
        /// Configured grid width in cells.
        width: usize,
        /// Configured grid height in cells.
        height: usize,
    },

    /// A birth or survival entry names an impossible neighbor count.
    #[error("{set} set contains neighbor count {value}, valid range is 0-8")]
    NeighborCountOutOfRange {
        /// Which rule set the offending value came from.
        set: &'static str,
        /// The rejected neighbor count.
        value: u8,
    },

    /// Initial live-cell density is a fraction of the board.
    #[error("initial density {value} outside 0.0-1.0")]
    DensityOutOfRange {
        /// The rejected density.
        value: f64,
    },

    /// Configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration and construction operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
