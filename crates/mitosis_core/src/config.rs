//! # Simulation Configuration
//!
//! Everything the engine needs is decided once, at startup: grid geometry,
//! the rule sets, the initial fill, and the seed. Configs parse from TOML
//! (loaded once, never re-read) and are validated before any buffer is
//! allocated.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::rules::RuleSet;

/// Startup configuration for one simulation run.
///
/// The defaults reproduce the reference demo: a 42x21 cell grid rendered as
/// 3-pixel blocks, Conway's rule, a quarter of the board initially alive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Rendered size of one cell, in pixels per side.
    pub cell_size: u32,
    /// Neighbor counts at which a dead cell becomes alive.
    pub birth: Vec<u8>,
    /// Neighbor counts at which a live cell stays alive.
    pub survival: Vec<u8>,
    /// Fraction of cells initially alive, 0.0-1.0.
    pub initial_density: f64,
    /// Seed for the deterministic initial fill.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 42,
            height: 21,
            cell_size: 3,
            birth: vec![3],
            survival: vec![2, 3],
            initial_density: 0.25,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and the relevant
    /// validation error otherwise.
    pub fn from_toml(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every construction-time invariant.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroDimension`] if width or height is zero
    /// - [`ConfigError::NeighborCountOutOfRange`] for counts above eight
    /// - [`ConfigError::DensityOutOfRange`] for a density outside 0.0-1.0
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        let _ = self.rule_set()?;
        if !(0.0..=1.0).contains(&self.initial_density) {
            return Err(ConfigError::DensityOutOfRange {
                value: self.initial_density,
            });
        }
        Ok(())
    }

    /// Builds the validated rule set described by `birth` and `survival`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NeighborCountOutOfRange`] for counts above
    /// eight.
    pub fn rule_set(&self) -> ConfigResult<RuleSet> {
        RuleSet::new(&self.birth, &self.survival)
    }

    /// Total cell count `width * height`.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }
}
