//! # MITOSIS Core
//!
//! Data model for the dual-core generation engine:
//! - Double-buffered toroidal cell board with an atomic front index
//! - Pure birth/survival rule evaluation
//! - The lock-guarded work queue both execution contexts claim indices from
//! - Startup configuration with construction-time validation
//!
//! ## Architecture Rules
//!
//! 1. **One lock** - the work queue's claim operation is the only point of
//!    mutual exclusion in the engine
//! 2. **No locked board** - the front buffer is read-only during a phase;
//!    back-buffer writes go only to indices a context claimed for itself
//! 3. **Deterministic** - identical seed, identical board, identical
//!    next generation, regardless of how the two contexts split the work

pub mod board;
pub mod config;
pub mod error;
pub mod queue;
pub mod rules;

pub use board::Board;
pub use config::SimulationConfig;
pub use error::ConfigError;
pub use queue::WorkQueue;
pub use rules::{NeighborMask, RuleSet};
