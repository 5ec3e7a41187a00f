//! # Work Queue
//!
//! The shared pool of pending cell indices for the active phase. Both
//! execution contexts loop on [`WorkQueue::claim_next`] until it returns
//! `None`; because a claim removes the index under the lock, the indices are
//! partitioned disjointly and exhaustively between the contexts at runtime -
//! a dynamic, self-balancing split with no pre-assigned shares.
//!
//! This claim is the single point of mutual exclusion in the engine. It is
//! also what makes concurrent back-buffer access race-free without locking
//! the board: each context only writes indices it, alone, claimed.

use parking_lot::Mutex;

/// Lock-guarded pool of pending cell indices.
pub struct WorkQueue {
    pending: Mutex<Vec<usize>>,
}

impl WorkQueue {
    /// Creates a queue with capacity for `capacity` indices.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Repopulates the queue with indices `0..n` for a new phase.
    ///
    /// Any indices left from a previous phase are discarded. Order is
    /// irrelevant to correctness: it only affects which context happens to
    /// process which cell.
    pub fn refill(&self, n: usize) {
        let mut pending = self.pending.lock();
        pending.clear();
        pending.extend(0..n);
    }

    /// Atomically removes and returns one pending index.
    ///
    /// `None` is the normal phase-complete signal, not an error: it means
    /// the caller should stop claiming and report completion. The
    /// check-and-remove happens under one lock acquisition, so a claim can
    /// never spuriously fail under contention.
    #[inline]
    pub fn claim_next(&self) -> Option<usize> {
        self.pending.lock().pop()
    }

    /// Number of indices not yet claimed this phase.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.lock().len()
    }
}
