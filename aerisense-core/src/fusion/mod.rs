//! Multi-Source Sensor Fusion
//!
//! ## Overview
//!
//! The same quantity usually reaches us from several places: the on-site
//! ESP32 board, a weather API, an air-quality API. Each has its own noise and
//! its own outages. Fusion turns them into one value with an honest
//! uncertainty:
//!
//! ```text
//! esp32       ──► Kalman(R=0.8) ──┐
//! openweather ──► Kalman(R=0.3) ──┼─► inverse-variance weights ─► FusionResult
//! openaq      ──► Kalman(R=0.5) ──┘
//! ```
//!
//! ### Inverse-Variance Weighting
//!
//! ```text
//! wᵢ     = (1/Pᵢ) / Σ(1/Pⱼ)
//! value  = Σ wᵢ·x̂ᵢ
//! P      = 1 / Σ(1/Pⱼ)
//! confidence = 1 / (1 + P)
//! ```
//!
//! Missing sources are left out of the sum, never treated as zero. When no
//! source has a value the result is [`FusionResult::unavailable`].
//!
//! ### Pair Fusion
//!
//! [`fuse_pair`] is the stateless local-vs-regional blend used for the
//! comparison view; see [`pair`].

pub mod config;
pub mod measurement;
pub mod multi;
pub mod pair;
pub mod result;

pub use config::FusionConfig;
pub use measurement::{Measurement, Timestamp};
pub use multi::MultiSourceFusion;
pub use pair::{fuse_pair, PairFusion, PairProfile, PairSource};
pub use result::{FusionQuality, FusionResult};
