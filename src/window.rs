//! Bounded window of unique numbers
//!
//! Keeps the most recently accepted values in arrival order:
//! - Values already present are ignored (no reordering)
//! - New values are appended at the back
//! - When the window grows past its capacity the oldest value is evicted
//!
//! The window itself is plain data. Callers that share it between tasks
//! wrap it in a mutex (see `average::service`).

use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Capacity used by the average service unless `WINDOW_SIZE` overrides it
pub const DEFAULT_WINDOW_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct NumberWindow {
    items: VecDeque<f64>,
    capacity: NonZeroUsize,
}

impl NumberWindow {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.get() + 1),
            capacity,
        }
    }

    /// Copy of the current contents, oldest first
    pub fn snapshot(&self) -> Vec<f64> {
        self.items.iter().copied().collect()
    }

    /// Offer candidates to the window in arrival order
    ///
    /// Duplicates (against the window or earlier candidates in the same
    /// batch) are skipped. Each accepted value evicts at most one old value.
    pub fn ingest(&mut self, candidates: &[f64]) {
        for &value in candidates {
            if self.items.contains(&value) {
                continue;
            }

            self.items.push_back(value);

            if self.items.len() > self.capacity.get() {
                self.items.pop_front();
            }
        }
    }

    /// Mean of the current contents rounded to two decimals, `0` when empty
    pub fn average(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }

        let sum: f64 = self.items.iter().sum();
        let mean = sum / self.items.len() as f64;
        (mean * 100.0).round() / 100.0
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }
}

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_WINDOW_SIZE) {
    Some(capacity) => capacity,
    None => panic!("DEFAULT_WINDOW_SIZE must be non-zero"),
};

impl Default for NumberWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
