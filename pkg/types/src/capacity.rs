use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::pod::PodProfile;
use crate::quality::DataQuality;

// --- Limiting factor ---

/// The resource dimension that constrains a result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LimitingFactor {
    Cpu,
    Memory,
    PodCount,
}

impl LimitingFactor {
    /// Admission strategy: the constraint that admits the fewest pods.
    ///
    /// Ties go to cpu, then memory, then pod count.
    pub fn by_smallest_count(by_cpu: u64, by_memory: u64, by_slots: u64) -> Self {
        if by_cpu <= by_memory && by_cpu <= by_slots {
            LimitingFactor::Cpu
        } else if by_memory <= by_slots {
            LimitingFactor::Memory
        } else {
            LimitingFactor::PodCount
        }
    }

    /// Projection strategy: the dimension with the higher quota usage.
    ///
    /// Memory only wins when strictly higher; equal usage reports cpu.
    /// Never yields `PodCount`.
    pub fn by_highest_percentage(cpu_percent: f64, memory_percent: f64) -> Self {
        if memory_percent > cpu_percent {
            LimitingFactor::Memory
        } else {
            LimitingFactor::Cpu
        }
    }
}

impl std::fmt::Display for LimitingFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitingFactor::Cpu => write!(f, "cpu"),
            LimitingFactor::Memory => write!(f, "memory"),
            LimitingFactor::PodCount => write!(f, "podCount"),
        }
    }
}

// --- Capacity result ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailableCapacity {
    pub cpu_millicores: u64,
    pub memory_bytes: u64,
    pub pod_slots: u32,
    /// Display form of `cpu_millicores`
    pub cpu: String,
    /// Display form of `memory_bytes`
    pub memory: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PodEstimate {
    pub max_pods: u64,
    /// `max_pods` reduced by the safety margin; never above `max_pods`
    pub safe_pods: u64,
    pub limiting_factor: LimitingFactor,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendedLimit {
    pub profile: PodProfile,
    pub max_pods: u64,
    pub safe_pods: u64,
    pub limiting_factor: LimitingFactor,
}

/// Current quota consumption, in percent of each hard limit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct QuotaUtilization {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub pods_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapacityResult {
    pub namespace: String,
    pub available_capacity: AvailableCapacity,
    pub pod_estimates: BTreeMap<PodProfile, PodEstimate>,
    pub recommended_limit: RecommendedLimit,
    /// Safety margin actually applied
    pub safety_margin: f64,
    pub current_utilization: QuotaUtilization,
    pub quota_source: DataQuality,
}

// --- Trending ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrendingInfo {
    /// Percentage points per day
    pub daily_cpu_growth_percent: f64,
    /// Percentage points per day
    pub daily_memory_growth_percent: f64,
    /// Days until the first resource crosses 85%, capped at 365
    pub days_until_85_percent: u32,
    /// True when a resource already sits at or above 85%; the day count is then 0
    pub threshold_reached: bool,
}
