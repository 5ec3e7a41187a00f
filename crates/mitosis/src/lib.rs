//! # MITOSIS Engine
//!
//! Dual-core cellular automaton engine. Two execution contexts race to claim
//! cell indices from a lock-guarded work queue, first to draw the current
//! generation and then to compute the next one into the board's back buffer;
//! a busy-wait barrier joins them at each phase boundary and the board swaps
//! once per generation.
//!
//! ```text
//!  Rendering ──► Barrier1 ──► Computing ──► Barrier2 ──► Swapping ──┐
//!      ▲                                                            │
//!      └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The split between the two contexts is dynamic and self-balancing: each
//! context claims one index at a time until the queue runs dry. Because a
//! claim is atomic and each index yields at most once, the back buffer is
//! written race-free without ever locking the board.

pub mod engine;
pub mod observer;
pub mod render;

pub use engine::Engine;
pub use observer::{
    ConsoleObserver, GenerationObserver, GenerationStats, NullObserver, StatsChannel,
};
pub use render::{FrameBuffer, NullRender, RenderAdapter};
