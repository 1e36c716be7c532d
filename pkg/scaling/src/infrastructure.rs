//! Control-plane impact heuristics for a replica change.
//!
//! Severities are ordinal buckets over the replica delta and the target
//! size. They are not measured; the bucket boundaries are tunables.

use pkg_constants::scaling::INFRASTRUCTURE_NAMESPACE_PREFIXES;
use pkg_types::config::InfrastructureThresholds;
use pkg_types::scaling::{InfrastructureImpact, Severity};

pub fn is_infrastructure_namespace(namespace: &str) -> bool {
    INFRASTRUCTURE_NAMESPACE_PREFIXES
        .iter()
        .any(|prefix| namespace.starts_with(prefix))
}

pub fn assess(
    namespace: &str,
    current: u32,
    target: u32,
    thresholds: &InfrastructureThresholds,
) -> InfrastructureImpact {
    let delta = current.abs_diff(target);

    // Every pod add/remove is a handful of object writes.
    let etcd = bucket(delta, thresholds.etcd_medium_delta, thresholds.etcd_high_delta);
    let api_server = bucket(
        delta,
        thresholds.api_server_medium_delta,
        thresholds.api_server_high_delta,
    );
    let scheduler =
        if delta >= thresholds.scheduler_high_delta && target >= thresholds.scheduler_high_target {
            Severity::High
        } else if delta >= thresholds.scheduler_medium_delta
            || target >= thresholds.scheduler_medium_target
        {
            Severity::Medium
        } else {
            Severity::Low
        };

    let (etcd, api_server, scheduler) = if is_infrastructure_namespace(namespace) {
        (raise_floor(etcd), raise_floor(api_server), raise_floor(scheduler))
    } else {
        (etcd, api_server, scheduler)
    };

    InfrastructureImpact {
        etcd,
        api_server,
        scheduler,
        estimated_overhead: estimated_overhead(current, target, thresholds),
    }
}

fn bucket(delta: u32, medium: u32, high: u32) -> Severity {
    if delta >= high {
        Severity::High
    } else if delta >= medium {
        Severity::Medium
    } else {
        Severity::Low
    }
}

fn raise_floor(severity: Severity) -> Severity {
    severity.max(Severity::Medium)
}

/// Scale-up costs about `per_replica`% per replica up to the cap; scale-down
/// reports half of that as load removed.
fn estimated_overhead(current: u32, target: u32, thresholds: &InfrastructureThresholds) -> String {
    let delta = current.abs_diff(target);
    if delta == 0 {
        return "negligible".to_string();
    }
    let percent = (thresholds.overhead_percent_per_replica * f64::from(delta))
        .min(thresholds.max_overhead_percent);
    if target > current {
        format!("~{:.0}% additional control-plane load", percent)
    } else {
        format!("~{:.0}% reduced control-plane load", percent / 2.0)
    }
}
