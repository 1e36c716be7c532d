//! Pod admission and growth forecast constants.

// ─── Safety margin ────────────────────────────────────────────────────────

/// Fraction subtracted from the raw admission estimate when the caller's
/// margin is missing or outside `[0, 1]`.
pub const DEFAULT_SAFETY_MARGIN: f64 = 0.15;

// ─── Pod profile presets (millicores / MiB) ───────────────────────────────

pub const SMALL_POD_CPU_MILLIS: u64 = 100;
pub const SMALL_POD_MEMORY_MB: u64 = 64;

pub const MEDIUM_POD_CPU_MILLIS: u64 = 200;
pub const MEDIUM_POD_MEMORY_MB: u64 = 128;

pub const LARGE_POD_CPU_MILLIS: u64 = 500;
pub const LARGE_POD_MEMORY_MB: u64 = 512;

// ─── Generous quota used when a namespace has no quota object ─────────────

/// 100 cores.
pub const DEFAULT_QUOTA_CPU_MILLIS: u64 = 100_000;

/// 256 GiB.
pub const DEFAULT_QUOTA_MEMORY_BYTES: u64 = 256 * crate::units::GIB;

pub const DEFAULT_QUOTA_PODS: u32 = 500;

// ─── Growth forecast ──────────────────────────────────────────────────────

/// CPU growth assumed when there is no usable history (percentage points/day).
pub const DEFAULT_DAILY_CPU_GROWTH_PERCENT: f64 = 1.0;

/// Memory growth assumed when there is no usable history (percentage points/day).
pub const DEFAULT_DAILY_MEMORY_GROWTH_PERCENT: f64 = 1.5;

/// Usage level the forecaster counts down to.
pub const FORECAST_THRESHOLD_PERCENT: f64 = 85.0;

/// Forecast horizon cap; flat or shrinking usage reports this value.
pub const MAX_FORECAST_DAYS: u32 = 365;
