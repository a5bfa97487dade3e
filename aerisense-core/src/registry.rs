//! Per-Stream Ownership of Stateful Estimators
//!
//! ## Overview
//!
//! Filters and cleaners carry state that belongs to one logical stream: one
//! device's temperature, one location's PM2.5. Request handlers running in
//! parallel must never share a filter through a bare global. The registry
//! hands out one lock per stream instead:
//!
//! ```text
//! StreamRegistry
//! ├── (lab-01, temperature) ──► Arc<Mutex<ScalarKalmanFilter>>
//! ├── (lab-01, pm25)        ──► Arc<Mutex<ScalarKalmanFilter>>
//! └── (roof-02, pm25)       ──► Arc<Mutex<ScalarKalmanFilter>>
//! ```
//!
//! Updates to one stream are serialized by its own lock. Distinct streams
//! only contend on the outer map for the duration of a lookup.
//!
//! A poisoned lock is recovered rather than propagated: the protected values
//! are plain numeric state and every operation leaves them consistent.
//!
//! ## Example
//!
//! ```rust
//! use aerisense_core::{StreamKey, StreamRegistry, filters::presets};
//!
//! let registry = StreamRegistry::new();
//! let key = StreamKey::new("lab-01", "temperature");
//! let (value, _) = registry.with_stream(key, presets::temperature_filter, |kf| kf.update(22.4));
//! assert_eq!(value, 22.4);
//! ```

use std::{
    collections::BTreeMap,
    sync::{Arc, LockResult, Mutex, MutexGuard},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identity of a logical stream: one metric of one device or location
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StreamKey {
    /// Device or location identifier
    pub device: String,
    /// Metric name
    pub metric: String,
}

impl StreamKey {
    /// Build a key
    pub fn new(device: impl Into<String>, metric: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            metric: metric.into(),
        }
    }
}

/// Lazily-populated map of independently locked stream states
#[derive(Debug)]
pub struct StreamRegistry<T, K = StreamKey> {
    streams: Mutex<BTreeMap<K, Arc<Mutex<T>>>>,
}

impl<T, K: Ord> Default for StreamRegistry<T, K> {
    fn default() -> Self {
        Self {
            streams: Mutex::new(BTreeMap::new()),
        }
    }
}

fn recover<V>(result: LockResult<MutexGuard<'_, V>>) -> MutexGuard<'_, V> {
    result.unwrap_or_else(|poisoned| {
        log_warn!("stream lock was poisoned, recovering inner state");
        poisoned.into_inner()
    })
}

impl<T, K: Ord + Clone> StreamRegistry<T, K> {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to a stream's state, creating it with `init` on first use
    pub fn stream(&self, key: K, init: impl FnOnce() -> T) -> Arc<Mutex<T>> {
        let mut streams = recover(self.streams.lock());
        Arc::clone(
            streams
                .entry(key)
                .or_insert_with(|| Arc::new(Mutex::new(init()))),
        )
    }

    /// Run `f` on a stream's state under its lock
    ///
    /// The outer map lock is released before `f` runs, so a slow update on
    /// one stream never blocks lookups of another.
    pub fn with_stream<R>(&self, key: K, init: impl FnOnce() -> T, f: impl FnOnce(&mut T) -> R) -> R {
        let handle = self.stream(key, init);
        let mut state = recover(handle.lock());
        f(&mut *state)
    }

    /// Whether a stream exists
    pub fn contains(&self, key: &K) -> bool {
        recover(self.streams.lock()).contains_key(key)
    }

    /// Forget a stream; existing handles stay valid but detached
    pub fn remove(&self, key: &K) -> Option<Arc<Mutex<T>>> {
        recover(self.streams.lock()).remove(key)
    }

    /// Keys of every live stream, in order
    pub fn keys(&self) -> Vec<K> {
        recover(self.streams.lock()).keys().cloned().collect()
    }

    /// Number of live streams
    pub fn len(&self) -> usize {
        recover(self.streams.lock()).len()
    }

    /// Whether no stream exists
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every stream
    pub fn clear(&self) {
        recover(self.streams.lock()).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::ScalarKalmanFilter;
    use std::thread;

    #[test]
    fn streams_are_created_once() {
        let registry: StreamRegistry<ScalarKalmanFilter> = StreamRegistry::new();
        let key = StreamKey::new("lab-01", "temperature");

        registry.with_stream(key.clone(), ScalarKalmanFilter::default, |kf| kf.update(20.0));
        let (_, confidence) =
            registry.with_stream(key.clone(), ScalarKalmanFilter::default, |kf| kf.update(20.0));

        // Second reading went through the same filter, so it is calibrated
        assert!(confidence > 0.5);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&key));
    }

    #[test]
    fn distinct_keys_are_independent() {
        let registry: StreamRegistry<u32, (u8, u8)> = StreamRegistry::new();
        registry.with_stream((1, 1), || 0, |n| *n += 1);
        registry.with_stream((1, 2), || 0, |n| *n += 5);
        assert_eq!(registry.keys(), vec![(1, 1), (1, 2)]);

        let handle = registry.remove(&(1, 2));
        assert_eq!(handle.map(|h| *h.lock().unwrap()), Some(5));
        assert_eq!(registry.len(), 1);
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn concurrent_updates_are_serialized() {
        let registry: Arc<StreamRegistry<u64, &'static str>> = Arc::new(StreamRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        registry.with_stream("pm25", || 0, |n| *n += 1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(registry.with_stream("pm25", || 0, |n| *n), 8000);
    }

    #[test]
    fn poisoned_stream_is_recovered() {
        let registry: Arc<StreamRegistry<u32, u8>> = Arc::new(StreamRegistry::new());
        let r = Arc::clone(&registry);
        let _ = thread::spawn(move || {
            r.with_stream(0, || 7, |_| panic!("handler crashed"));
        })
        .join();

        assert_eq!(registry.with_stream(0, || 0, |n| *n), 7);
    }
}
