//! Statistical Outlier Rejection and Smoothing
//!
//! ## Overview
//!
//! Low-cost gas and particulate sensors produce occasional wild readings
//! (electrical interference, a bug crawling over the inlet). Before such a
//! channel is shown or fused it goes through two stages:
//!
//! ```text
//! raw ──► OutlierGate ──► substitute if rejected ──► EMA ──► smoothed
//!            │
//!            └── z = |v − mean| / std over the last 30 accepted readings
//! ```
//!
//! [`SignalCleaner`] reports every intermediate value in a
//! [`CleanedReading`] so dashboards can show raw and cleaned side by side.

pub mod cleaner;
pub mod outlier;

pub use cleaner::{CleanedReading, SignalCleaner};
pub use outlier::OutlierGate;
