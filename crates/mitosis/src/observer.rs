//! # Generation Statistics
//!
//! Once per completed generation the engine emits a small stats record to an
//! observer. Observers are fire-and-forget: nothing here may block or slow
//! the generation cycle, which is why the channel sink drops on a full
//! buffer instead of waiting.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Statistics for one completed generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationStats {
    /// Generation number after the swap; monotonically increasing.
    pub generation: u64,
    /// Live cells on the board that was just made current.
    pub living: usize,
    /// Wall-clock time of the compute phase, in whole milliseconds.
    pub compute_elapsed_ms: u64,
}

/// Receives the stats record emitted at each generation boundary.
pub trait GenerationObserver {
    /// Called once per completed generation, after the buffer swap.
    fn on_generation(&mut self, stats: GenerationStats);
}

/// Ignores every record. For benches.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl GenerationObserver for NullObserver {
    fn on_generation(&mut self, _stats: GenerationStats) {}
}

/// Prints the classic per-generation console line.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleObserver;

impl GenerationObserver for ConsoleObserver {
    fn on_generation(&mut self, stats: GenerationStats) {
        println!(
            "Gen {}: {} cell(s) ({} ms)",
            stats.generation, stats.living, stats.compute_elapsed_ms
        );
    }
}

/// Ships stats records over a bounded channel to another thread.
///
/// When the buffer is full the record is dropped rather than blocking the
/// generation cycle; a slow consumer loses samples, never slows the engine.
pub struct StatsChannel {
    tx: Sender<GenerationStats>,
    dropped: u64,
}

impl StatsChannel {
    /// Creates a channel sink with room for `capacity` in-flight records,
    /// returning the sink and its receiving end.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, Receiver<GenerationStats>) {
        let (tx, rx) = bounded(capacity);
        (Self { tx, dropped: 0 }, rx)
    }

    /// Records dropped so far because the buffer was full.
    #[must_use]
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl GenerationObserver for StatsChannel {
    fn on_generation(&mut self, stats: GenerationStats) {
        match self.tx.try_send(stats) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => self.dropped += 1,
            // Receiver gone: stats are diagnostics, the engine keeps going.
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}
