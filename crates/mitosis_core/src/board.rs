//! # Double-Buffered Board
//!
//! The board keeps two complete cell buffers:
//! - The **front** buffer, read by everyone during a generation
//! - The **back** buffer, written during the compute phase
//!
//! At the generation boundary the buffers are swapped by toggling an atomic
//! index, so no reader ever observes a buffer mid-swap.
//!
//! ```text
//!                 ┌───────────────────────────┐
//!                 │           Board           │
//!                 │                           │
//!                 │  ┌────────┐  ┌────────┐   │
//!                 │  │ Buf A  │  │ Buf B  │   │
//!                 │  └───┬────┘  └───┬────┘   │
//!                 │      │           │        │
//!                 │  ┌───┴───────────┴────┐   │
//!                 │  │ Atomic Front (0/1) │   │
//!                 │  └────────────────────┘   │
//!                 └───────────────────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! Cells are atomic bytes. During a phase the front buffer is only read and
//! the back buffer is written only at indices a context exclusively claimed
//! from the work queue, so no cell is ever written concurrently. Cross-phase
//! ordering comes from the scheduler's completion barrier, not from here.

use std::sync::atomic::{AtomicU8, AtomicU64, AtomicUsize, Ordering};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{ConfigError, ConfigResult};

/// Double-buffered toroidal cell board.
///
/// Grid positions `(x, y)` flatten to row-major indices `i = y * width + x`.
/// Stored values are always 0 (dead) or 1 (alive).
pub struct Board {
    /// The two cell buffers; `front` selects which one is current.
    buffers: [Box<[AtomicU8]>; 2],
    /// Index of the current (read) buffer, 0 or 1. Back is `front ^ 1`.
    front: AtomicUsize,
    /// Completed generations since construction. Never reset.
    generation: AtomicU64,
    width: usize,
    height: usize,
}

fn zeroed_buffer(len: usize) -> Box<[AtomicU8]> {
    (0..len).map(|_| AtomicU8::new(0)).collect()
}

impl Board {
    /// Creates an all-dead board.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDimension`] if either dimension is zero.
    pub fn new(width: usize, height: usize) -> ConfigResult<Self> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        let len = width * height;
        Ok(Self {
            buffers: [zeroed_buffer(len), zeroed_buffer(len)],
            front: AtomicUsize::new(0),
            generation: AtomicU64::new(0),
            width,
            height,
        })
    }

    /// Creates a board from an explicit cell slice (row-major, 0 or 1).
    ///
    /// Used for preset patterns and tests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDimension`] if either dimension is zero.
    ///
    /// # Panics
    ///
    /// Panics if `cells.len() != width * height` or any value is not 0 or 1.
    pub fn from_cells(width: usize, height: usize, cells: &[u8]) -> ConfigResult<Self> {
        let board = Self::new(width, height)?;
        assert_eq!(
            cells.len(),
            board.len(),
            "cell slice does not cover the {width}x{height} grid"
        );
        for (slot, &value) in board.buffers[0].iter().zip(cells) {
            assert!(value <= 1, "cell values must be 0 or 1, got {value}");
            slot.store(value, Ordering::Relaxed);
        }
        Ok(board)
    }

    /// Creates a board with roughly `density` of the cells alive, drawn from
    /// a deterministic stream: the same seed and density always reproduce
    /// the same board.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDimension`] for an empty grid and
    /// [`ConfigError::DensityOutOfRange`] if `density` is not in 0.0-1.0.
    pub fn seeded(width: usize, height: usize, density: f64, seed: u64) -> ConfigResult<Self> {
        if !(0.0..=1.0).contains(&density) {
            return Err(ConfigError::DensityOutOfRange { value: density });
        }
        let board = Self::new(width, height)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for slot in board.buffers[0].iter() {
            slot.store(u8::from(rng.gen_bool(density)), Ordering::Relaxed);
        }
        Ok(board)
    }

    /// Grid width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total cell count `width * height`.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// A board is never empty; construction rejects zero dimensions.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Completed generations since construction.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    #[inline]
    fn front_index(&self) -> usize {
        self.front.load(Ordering::Acquire)
    }

    /// Whether cell `i` is alive in the current buffer.
    ///
    /// Valid for any `i` in `[0, len)`.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, i: usize) -> bool {
        self.buffers[self.front_index()][i].load(Ordering::Relaxed) == 1
    }

    /// Writes cell `i` of the back buffer.
    ///
    /// Protocol: during one compute phase every index is written exactly
    /// once, by the context that claimed it from the work queue. The board
    /// does not enforce this; the queue's partition invariant does.
    #[inline]
    pub fn write_next(&self, i: usize, alive: bool) {
        self.buffers[self.front_index() ^ 1][i].store(u8::from(alive), Ordering::Relaxed);
    }

    /// Exchanges the front and back buffers and increments the generation
    /// counter.
    ///
    /// Called exactly once per generation, only after both phases' barriers
    /// have resolved; at that point the back buffer holds a complete next
    /// generation and nobody is reading.
    pub fn swap_and_advance(&self) {
        self.front.fetch_xor(1, Ordering::AcqRel);
        self.generation.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of live cells in the current buffer.
    #[must_use]
    pub fn living_count(&self) -> usize {
        let front = &self.buffers[self.front_index()];
        front
            .iter()
            .map(|slot| slot.load(Ordering::Relaxed) as usize)
            .sum()
    }

    /// Snapshot of the current buffer as plain bytes, for tests and
    /// diagnostics.
    #[must_use]
    pub fn cells(&self) -> Vec<u8> {
        let front = &self.buffers[self.front_index()];
        front.iter().map(|slot| slot.load(Ordering::Relaxed)).collect()
    }

    /// Live cells among the 8 toroidal neighbors of cell `i`.
    ///
    /// Horizontal neighbors wrap within the same row: a column-0 cell's left
    /// neighbor is the column `width - 1` cell of the *same row*. Vertical
    /// and diagonal neighbors wrap within the same column ring.
    #[must_use]
    pub fn neighbor_count(&self, i: usize) -> u8 {
        let front = &self.buffers[self.front_index()];
        let (w, h) = (self.width, self.height);
        let row = i / w;
        let col = i % w;
        let up = (row + h - 1) % h;
        let down = (row + 1) % h;
        let left = (col + w - 1) % w;
        let right = (col + 1) % w;

        let mut count = 0;
        for r in [up, row, down] {
            for c in [left, col, right] {
                if r == row && c == col {
                    continue;
                }
                count += front[r * w + c].load(Ordering::Relaxed);
            }
        }
        count
    }

    /// Fills the entire back buffer with `value`.
    ///
    /// Test support: integration tests plant a sentinel here and then prove
    /// a compute phase overwrote every index.
    #[doc(hidden)]
    pub fn fill_next(&self, value: u8) {
        let back = &self.buffers[self.front_index() ^ 1];
        for slot in back.iter() {
            slot.store(value, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_dimensions() {
        assert!(matches!(
            Board::new(0, 10),
            Err(ConfigError::ZeroDimension { width: 0, height: 10 })
        ));
        assert!(matches!(
            Board::new(10, 0),
            Err(ConfigError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn test_new_board_is_dead() {
        let board = Board::new(8, 4).unwrap();
        assert_eq!(board.len(), 32);
        assert_eq!(board.living_count(), 0);
        assert_eq!(board.generation(), 0);
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let a = Board::seeded(16, 16, 0.25, 42).unwrap();
        let b = Board::seeded(16, 16, 0.25, 42).unwrap();
        assert_eq!(a.cells(), b.cells());

        let c = Board::seeded(16, 16, 0.25, 43).unwrap();
        assert_ne!(a.cells(), c.cells(), "different seeds should diverge");
    }

    #[test]
    fn test_seeded_density_bounds() {
        assert!(matches!(
            Board::seeded(4, 4, 1.5, 0),
            Err(ConfigError::DensityOutOfRange { .. })
        ));
        let full = Board::seeded(4, 4, 1.0, 0).unwrap();
        assert_eq!(full.living_count(), 16);
        let empty = Board::seeded(4, 4, 0.0, 0).unwrap();
        assert_eq!(empty.living_count(), 0);
    }

    #[test]
    fn test_swap_isolation() {
        // Writes to the back buffer stay invisible until the swap.
        let board = Board::from_cells(2, 2, &[1, 0, 0, 0]).unwrap();
        board.write_next(0, false);
        board.write_next(1, true);
        board.write_next(2, false);
        board.write_next(3, true);

        assert!(board.is_alive(0));
        assert!(!board.is_alive(1));
        assert_eq!(board.living_count(), 1);

        board.swap_and_advance();
        assert_eq!(board.generation(), 1);
        assert_eq!(board.cells(), vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_wrap_left_edge_stays_in_row() {
        // 4x3 grid, one live cell at the right edge of the middle row.
        // The column-0 cell of the SAME row must see it as its left
        // neighbor; the column-0 cells of other rows see it only
        // diagonally via the column ring.
        let mut cells = vec![0u8; 12];
        cells[1 * 4 + 3] = 1; // (3, 1)
        let board = Board::from_cells(4, 3, &cells).unwrap();

        assert_eq!(board.neighbor_count(1 * 4 + 0), 1, "(0,1) wraps to (3,1)");
        assert_eq!(board.neighbor_count(0 * 4 + 0), 1, "(0,0) sees (3,1) diagonally");
        assert_eq!(board.neighbor_count(2 * 4 + 0), 1, "(0,2) sees (3,1) diagonally");
        // A cell two columns away shares no neighborhood with it.
        assert_eq!(board.neighbor_count(1 * 4 + 1), 0);
    }

    #[test]
    fn test_wrap_vertical_column_ring() {
        // 3x4 grid, live cell at the bottom of column 1: (1, 3).
        let mut cells = vec![0u8; 12];
        cells[3 * 3 + 1] = 1;
        let board = Board::from_cells(3, 4, &cells).unwrap();

        // Top-row cell in the same column wraps down to it.
        assert_eq!(board.neighbor_count(0 * 3 + 1), 1);
        // Top-row diagonal neighbors through the ring.
        assert_eq!(board.neighbor_count(0 * 3 + 0), 1);
        assert_eq!(board.neighbor_count(0 * 3 + 2), 1);
        // A middle-row cell is too far away.
        assert_eq!(board.neighbor_count(1 * 3 + 1), 0);
    }

    #[test]
    fn test_neighbor_count_excludes_self() {
        let board = Board::from_cells(3, 3, &[1, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(board.neighbor_count(0), 0);
    }

    #[test]
    #[should_panic(expected = "cell slice does not cover")]
    fn test_from_cells_length_mismatch_panics() {
        let _ = Board::from_cells(3, 3, &[0; 8]);
    }
}
