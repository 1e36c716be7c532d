//! Resource-state and namespace-impact math for a replica change.
//!
//! CPU is carried in millicores and memory in MiB through the state; memory
//! is converted to bytes only when it meets the quota, which is in bytes.

use pkg_constants::units::MIB;
use pkg_types::capacity::LimitingFactor;
use pkg_types::config::ScalingTunables;
use pkg_types::quota::{NamespaceQuota, usage_percent};
use pkg_types::scaling::{NamespaceImpact, ResourceState};

/// Per-pod usage the projection scales from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PodBaseline {
    pub cpu_millicores: f64,
    /// MiB
    pub memory_mb: f64,
}

/// Per-pod cost inflation when running `replicas` instead of `current`.
///
/// `1 + per_replica * (replicas - current)`, clamped to `[1, max]`: scaling
/// down never discounts below the measured baseline.
pub fn overhead_factor(current: u32, replicas: u32, tunables: &ScalingTunables) -> f64 {
    let delta = f64::from(replicas) - f64::from(current);
    let factor = 1.0 + tunables.overhead_per_replica * delta;
    if !factor.is_finite() {
        return 1.0;
    }
    factor.clamp(1.0, tunables.max_overhead_factor.max(1.0))
}

/// Footprint of the deployment at `replicas`.
pub fn resource_state(
    baseline: PodBaseline,
    current: u32,
    replicas: u32,
    tunables: &ScalingTunables,
) -> ResourceState {
    let factor = overhead_factor(current, replicas, tunables);
    let n = f64::from(replicas);
    ResourceState {
        replicas,
        overhead_factor: factor,
        per_pod_cpu_millicores: baseline.cpu_millicores,
        per_pod_memory_mb: baseline.memory_mb,
        total_cpu_millicores: baseline.cpu_millicores * factor * n,
        total_memory_mb: baseline.memory_mb * factor * n,
    }
}

/// Quota consumption once `projected` replaces `current`.
///
/// `quota` should already carry effective limits. Percentages may exceed 100;
/// a zero limit yields 0% for that dimension.
pub fn namespace_impact(
    current: &ResourceState,
    projected: &ResourceState,
    quota: &NamespaceQuota,
) -> NamespaceImpact {
    let additional_cpu = projected.total_cpu_millicores - current.total_cpu_millicores;
    let additional_memory_bytes =
        (projected.total_memory_mb - current.total_memory_mb) * MIB as f64;

    let projected_cpu = (quota.cpu_used_millis as f64 + additional_cpu).max(0.0);
    let projected_memory = (quota.memory_used_bytes as f64 + additional_memory_bytes).max(0.0);

    let cpu_percent = usage_percent(projected_cpu, quota.cpu_limit_millis as f64);
    let memory_percent = usage_percent(projected_memory, quota.memory_limit_bytes as f64);
    let usage = cpu_percent.max(memory_percent);

    NamespaceImpact {
        additional_cpu_millicores: additional_cpu,
        additional_memory_bytes,
        cpu_usage_percent: cpu_percent,
        memory_usage_percent: memory_percent,
        usage_percent: usage,
        quota_exceeded: cpu_percent > 100.0 || memory_percent > 100.0,
        headroom_remaining_percent: (100.0 - usage).max(0.0),
        limiting_factor: LimitingFactor::by_highest_percentage(cpu_percent, memory_percent),
    }
}
