//! Fixed-Capacity Rolling Window of Scalar Samples
//!
//! ## Overview
//!
//! Outlier detection needs the recent history of a channel but must never
//! grow without bound: a gate runs for the lifetime of the process, fed one
//! reading every few seconds. This window keeps the most recent `N` samples in
//! a `heapless::Deque`, so its footprint is fixed at compile time.
//!
//! ```text
//! RollingWindow<5> after pushing 1..=7:
//! ┌───┬───┬───┬───┬───┐
//! │ 3 │ 4 │ 5 │ 6 │ 7 │   oldest → newest
//! └───┴───┴───┴───┴───┘
//!   1 and 2 were evicted when the window was full
//! ```
//!
//! ## Thread Safety
//!
//! Not synchronized. Each window belongs to exactly one gate; share gates
//! through [`crate::registry::StreamRegistry`] when several threads feed the
//! same stream.

use heapless::Deque;

/// Sliding window of the last `N` samples
#[derive(Clone)]
pub struct RollingWindow<const N: usize> {
    samples: Deque<f32, N>,
}

impl<const N: usize> RollingWindow<N> {
    /// Create an empty window
    pub const fn new() -> Self {
        Self {
            samples: Deque::new(),
        }
    }

    /// Append a sample, evicting and returning the oldest when full
    pub fn push(&mut self, value: f32) -> Option<f32> {
        let evicted = if self.samples.is_full() {
            self.samples.pop_front()
        } else {
            None
        };
        // Capacity was just made available above
        let _ = self.samples.push_back(value);
        evicted
    }

    /// Number of samples held
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples are held
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True once the window has reached capacity
    pub fn is_full(&self) -> bool {
        self.samples.is_full()
    }

    /// Maximum number of samples
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Most recent sample
    pub fn last(&self) -> Option<f32> {
        self.samples.back().copied()
    }

    /// Samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Mean of the held samples
    pub fn mean(&self) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        Some(self.iter().sum::<f32>() / self.len() as f32)
    }

    /// Population standard deviation of the held samples
    pub fn std_dev(&self) -> Option<f32> {
        let mean = self.mean()?;
        let sum_sq: f32 = self.iter().map(|v| (v - mean) * (v - mean)).sum();
        Some(libm::sqrtf(sum_sq / self.len() as f32))
    }
}

impl<const N: usize> Default for RollingWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for RollingWindow<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RollingWindow")
            .field("len", &self.len())
            .field("capacity", &N)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_when_full() {
        let mut window = RollingWindow::<3>::new();
        assert_eq!(window.push(1.0), None);
        assert_eq!(window.push(2.0), None);
        assert_eq!(window.push(3.0), None);
        assert!(window.is_full());

        assert_eq!(window.push(4.0), Some(1.0));
        let held: heapless::Vec<f32, 3> = window.iter().collect();
        assert_eq!(held.as_slice(), &[2.0, 3.0, 4.0]);
        assert_eq!(window.last(), Some(4.0));
    }

    #[test]
    fn moments() {
        let mut window = RollingWindow::<8>::new();
        assert_eq!(window.mean(), None);
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            window.push(v);
        }
        assert_eq!(window.mean(), Some(5.0));
        assert_eq!(window.std_dev(), Some(2.0));

        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.capacity(), 8);
    }
}
