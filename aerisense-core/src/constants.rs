//! Default Tunings and Reference Thresholds
//!
//! This module collects the numeric defaults shared by the filters, the
//! cleaner and the fusion engine. Each value is the tuning the field
//! deployment runs with; config structs start from these and may override.

// ===== SCALAR KALMAN FILTER =====

/// Default process variance (Q) for a scalar filter.
///
/// Models slow drift of the underlying quantity between readings.
pub const DEFAULT_PROCESS_VARIANCE: f32 = 0.01;

/// Default measurement variance (R) for a scalar filter.
pub const DEFAULT_MEASUREMENT_VARIANCE: f32 = 0.1;

/// Error covariance (P) of a freshly reset filter.
pub const INITIAL_ERROR_COVARIANCE: f32 = 1.0;

/// Confidence reported for the very first reading of a filter.
///
/// The estimate is just the raw reading at that point, so the filter has
/// nothing to vouch for yet.
pub const UNCALIBRATED_CONFIDENCE: f32 = 0.5;

// ===== ADAPTIVE KALMAN FILTER =====

/// Residual magnitude above which the adaptive filter switches to the
/// fast-tracking regime.
pub const ADAPTIVE_RESIDUAL_THRESHOLD: f32 = 2.0;

/// Value-variance process noise in the fast-tracking regime.
pub const ADAPTIVE_HIGH_PROCESS_NOISE: f32 = 1.0;

/// Value-variance process noise in the steady regime.
pub const ADAPTIVE_LOW_PROCESS_NOISE: f32 = 0.01;

/// Measurement variance of the adaptive filter.
///
/// Deliberately high: the filter leans on its motion model for smoothing.
pub const ADAPTIVE_MEASUREMENT_VARIANCE: f32 = 5.0;

/// Diagonal of the adaptive filter's initial covariance.
pub const ADAPTIVE_INITIAL_COVARIANCE: f32 = 10.0;

// ===== OUTLIER GATE =====

/// Accepted-sample window of the outlier gate.
pub const OUTLIER_WINDOW: usize = 30;

/// Samples admitted unconditionally before z-scores are computed.
pub const OUTLIER_MIN_BASELINE: usize = 5;

/// Z-score above which a reading is rejected.
pub const OUTLIER_Z_THRESHOLD: f32 = 3.0;

/// Standard deviation treated as a flat (degenerate) baseline.
pub const STD_EPSILON: f32 = 1e-6;

// ===== SMOOTHING =====

/// Default EMA factor of the signal cleaner.
pub const DEFAULT_SMOOTHING_ALPHA: f32 = 0.3;

/// EMA factor for the MQ-135 gas channel, which is noisier.
pub const GAS_SMOOTHING_ALPHA: f32 = 0.4;

// ===== FUSION =====

/// Floor applied to a per-source variance before inversion.
pub const VARIANCE_FLOOR: f32 = 1e-6;

/// Confidence above which a fused value is rated HIGH.
pub const QUALITY_HIGH_CONFIDENCE: f32 = 0.8;

/// Confidence above which a fused value is rated MEDIUM.
pub const QUALITY_MEDIUM_CONFIDENCE: f32 = 0.5;

/// Measurement-variance prior of the on-site ESP32 node.
///
/// Cheap sensors next to the enclosure: the least trusted source.
pub const ESP32_MEASUREMENT_VARIANCE: f32 = 0.8;

/// Measurement-variance prior of the OpenWeather feed.
pub const OPENWEATHER_MEASUREMENT_VARIANCE: f32 = 0.3;

/// Measurement-variance prior of the OpenAQ feed.
pub const OPENAQ_MEASUREMENT_VARIANCE: f32 = 0.5;

// ===== DIAGNOSTICS =====

/// Minimum readings before a channel's health can be judged.
pub const HEALTH_MIN_SAMPLES: usize = 5;

/// Leading readings inspected by the flatline check.
pub const FLATLINE_WINDOW: usize = 10;

/// Variance below which a channel is considered stuck.
pub const FLATLINE_VARIANCE: f32 = 1e-4;

/// Successive-difference multiple of the std that counts as a spike.
pub const NOISE_SPIKE_FACTOR: f32 = 5.0;

/// Slope magnitude separating a trend from a stable signal.
pub const TREND_SLOPE_THRESHOLD: f32 = 0.05;
