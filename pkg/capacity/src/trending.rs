//! Linear growth forecast over quota usage history.
//!
//! Growth is the endpoint slope `(last - first) / days`, one sample per
//! day. It is deliberately not a regression: two noisy endpoints move the
//! estimate, which the caller should keep in mind for short series.

use pkg_constants::capacity::{
    DEFAULT_DAILY_CPU_GROWTH_PERCENT, DEFAULT_DAILY_MEMORY_GROWTH_PERCENT,
    FORECAST_THRESHOLD_PERCENT, MAX_FORECAST_DAYS,
};
use pkg_types::capacity::TrendingInfo;
use tracing::debug;

/// Forecast from daily usage samples (percent of quota).
pub fn forecast(
    historical_cpu: &[f64],
    historical_memory: &[f64],
    current_cpu: f64,
    current_memory: f64,
) -> TrendingInfo {
    let cpu_growth = daily_growth(historical_cpu).unwrap_or(DEFAULT_DAILY_CPU_GROWTH_PERCENT);
    let memory_growth =
        daily_growth(historical_memory).unwrap_or(DEFAULT_DAILY_MEMORY_GROWTH_PERCENT);

    let cpu_days = days_until_threshold(current_cpu, cpu_growth);
    let memory_days = days_until_threshold(current_memory, memory_growth);

    let info = TrendingInfo {
        daily_cpu_growth_percent: cpu_growth,
        daily_memory_growth_percent: memory_growth,
        days_until_85_percent: cpu_days.days.min(memory_days.days),
        threshold_reached: cpu_days.reached || memory_days.reached,
    };
    debug!(
        "Trend: cpu {:+.2}%/day, memory {:+.2}%/day, {} days until {}%",
        info.daily_cpu_growth_percent,
        info.daily_memory_growth_percent,
        info.days_until_85_percent,
        FORECAST_THRESHOLD_PERCENT
    );
    info
}

/// Endpoint slope per day; `None` with fewer than two usable samples.
///
/// Non-finite samples are gaps: they keep their day slot, so `[40, NaN, 44]`
/// spans two days.
pub fn daily_growth(samples: &[f64]) -> Option<f64> {
    let mut finite = samples.iter().enumerate().filter(|(_, v)| v.is_finite());
    let (first_day, first) = finite.next()?;
    let (last_day, last) = finite.last()?;
    Some((last - first) / (last_day - first_day) as f64)
}

struct Horizon {
    days: u32,
    reached: bool,
}

fn days_until_threshold(current: f64, growth: f64) -> Horizon {
    if current.is_finite() && current >= FORECAST_THRESHOLD_PERCENT {
        return Horizon {
            days: 0,
            reached: true,
        };
    }
    if !current.is_finite() || !growth.is_finite() || growth <= 0.0 {
        return Horizon {
            days: MAX_FORECAST_DAYS,
            reached: false,
        };
    }

    let days = ((FORECAST_THRESHOLD_PERCENT - current) / growth).ceil();
    Horizon {
        days: if days >= MAX_FORECAST_DAYS as f64 {
            MAX_FORECAST_DAYS
        } else {
            days.max(1.0) as u32
        },
        reached: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_history_uses_default_growth() {
        let info = forecast(&[], &[], 40.0, 40.0);
        assert_eq!(info.daily_cpu_growth_percent, 1.0);
        assert_eq!(info.daily_memory_growth_percent, 1.5);
        // Memory at 1.5/day: ceil(45 / 1.5) = 30 days beats cpu's 45.
        assert_eq!(info.days_until_85_percent, 30);
        assert!(!info.threshold_reached);
    }

    #[test]
    fn single_sample_is_not_a_trend() {
        assert_eq!(daily_growth(&[42.0]), None);
        assert_eq!(daily_growth(&[]), None);
    }

    #[test]
    fn endpoint_slope() {
        assert_eq!(daily_growth(&[40.0, 41.0, 45.0, 46.0]), Some(2.0));
        assert_eq!(daily_growth(&[60.0, 50.0]), Some(-10.0));
    }

    #[test]
    fn gaps_keep_their_day() {
        assert_eq!(daily_growth(&[40.0, f64::NAN, 44.0]), Some(2.0));
        assert_eq!(daily_growth(&[f64::NAN, 40.0, 43.0, f64::INFINITY]), Some(3.0));
        assert_eq!(daily_growth(&[f64::NAN, 40.0, f64::NAN]), None);
    }

    #[test]
    fn increasing_series_lands_inside_horizon() {
        let cpu = [40.0, 42.0, 44.0, 46.0, 48.0, 50.0, 52.0];
        let memory = [30.0, 32.1, 33.9, 36.0, 38.2, 40.0, 42.0];
        let info = forecast(&cpu, &memory, 52.0, 42.0);
        assert_eq!(info.daily_cpu_growth_percent, 2.0);
        assert!(info.days_until_85_percent > 0);
        assert!(info.days_until_85_percent <= 365);
        // cpu: ceil(33 / 2) = 17
        assert_eq!(info.days_until_85_percent, 17);
    }

    #[test]
    fn flat_or_shrinking_usage_caps_horizon() {
        let flat = [50.0, 50.0, 50.0];
        let shrinking = [60.0, 55.0, 50.0];
        let info = forecast(&flat, &shrinking, 50.0, 50.0);
        assert_eq!(info.days_until_85_percent, 365);
    }

    #[test]
    fn slow_growth_caps_horizon() {
        let info = forecast(&[10.0, 10.01], &[10.0, 10.01], 10.0, 10.0);
        assert_eq!(info.days_until_85_percent, 365);
    }

    #[test]
    fn already_above_threshold_is_flagged() {
        let info = forecast(&[80.0, 90.0], &[10.0, 11.0], 90.0, 11.0);
        assert_eq!(info.days_until_85_percent, 0);
        assert!(info.threshold_reached);
    }
}
