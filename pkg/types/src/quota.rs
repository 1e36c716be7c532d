use pkg_constants::capacity::{
    DEFAULT_QUOTA_CPU_MILLIS, DEFAULT_QUOTA_MEMORY_BYTES, DEFAULT_QUOTA_PODS,
};
use serde::{Deserialize, Serialize};

use crate::quality::DataQuality;

/// Quota snapshot for a namespace: hard limits and current usage for
/// pod count, CPU, and memory.
///
/// `has_quota == false` means the namespace has no quota object at all, which
/// is different from a quota whose limits are zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamespaceQuota {
    pub namespace: String,
    /// CPU hard limit in millicores
    #[serde(default, alias = "cpu-limit-millis")]
    pub cpu_limit_millis: u64,
    /// CPU requested by running pods, in millicores
    #[serde(default, alias = "cpu-used-millis")]
    pub cpu_used_millis: u64,
    /// Memory hard limit in bytes
    #[serde(default, alias = "memory-limit-bytes")]
    pub memory_limit_bytes: u64,
    /// Memory requested by running pods, in bytes
    #[serde(default, alias = "memory-used-bytes")]
    pub memory_used_bytes: u64,
    /// Maximum number of pods allowed
    #[serde(default, alias = "pod-limit")]
    pub pod_limit: u32,
    #[serde(default, alias = "current-pods")]
    pub current_pods: u32,
    #[serde(default = "default_has_quota", alias = "has-quota")]
    pub has_quota: bool,
}

fn default_has_quota() -> bool {
    true
}

impl NamespaceQuota {
    /// Generous quota with no recorded usage, substituted when the quota
    /// lookup itself failed.
    pub fn unbounded(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            cpu_limit_millis: DEFAULT_QUOTA_CPU_MILLIS,
            cpu_used_millis: 0,
            memory_limit_bytes: DEFAULT_QUOTA_MEMORY_BYTES,
            memory_used_bytes: 0,
            pod_limit: DEFAULT_QUOTA_PODS,
            current_pods: 0,
            has_quota: false,
        }
    }

    /// The limits calculations should run against.
    ///
    /// A namespace without a quota object keeps its observed usage but gets
    /// the generous default limits; a real quota is returned unchanged, zero
    /// limits included.
    pub fn effective(&self) -> Self {
        if self.has_quota {
            return self.clone();
        }
        Self {
            cpu_limit_millis: DEFAULT_QUOTA_CPU_MILLIS,
            memory_limit_bytes: DEFAULT_QUOTA_MEMORY_BYTES,
            pod_limit: DEFAULT_QUOTA_PODS,
            ..self.clone()
        }
    }

    pub fn available_cpu_millis(&self) -> u64 {
        self.cpu_limit_millis.saturating_sub(self.cpu_used_millis)
    }

    pub fn available_memory_bytes(&self) -> u64 {
        self.memory_limit_bytes.saturating_sub(self.memory_used_bytes)
    }

    pub fn available_pod_slots(&self) -> u32 {
        self.pod_limit.saturating_sub(self.current_pods)
    }
}

/// Quota ready for calculation, tagged with where its numbers came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuota {
    /// Effective limits already applied
    pub quota: NamespaceQuota,
    pub source: DataQuality,
}

impl ResolvedQuota {
    /// Stand-in for a quota that could not be fetched at all.
    pub fn unavailable(namespace: &str) -> Self {
        Self {
            quota: NamespaceQuota::unbounded(namespace),
            source: DataQuality::Default,
        }
    }
}

impl From<NamespaceQuota> for ResolvedQuota {
    /// A fetched snapshot: measured when a quota object exists, estimated
    /// when the generous default limits had to be filled in.
    fn from(quota: NamespaceQuota) -> Self {
        let source = if quota.has_quota {
            DataQuality::Measured
        } else {
            DataQuality::Estimated
        };
        Self {
            quota: quota.effective(),
            source,
        }
    }
}

/// `used / limit * 100`, or 0 when the limit is 0.
///
/// May exceed 100 to signal an over-quota namespace.
pub fn usage_percent(used: f64, limit: f64) -> f64 {
    if limit <= 0.0 || !limit.is_finite() || !used.is_finite() {
        return 0.0;
    }
    used / limit * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_constants::units::GIB;

    fn quota() -> NamespaceQuota {
        NamespaceQuota {
            namespace: "team-a".to_string(),
            cpu_limit_millis: 4000,
            cpu_used_millis: 5000,
            memory_limit_bytes: 8 * GIB,
            memory_used_bytes: 2 * GIB,
            pod_limit: 10,
            current_pods: 12,
            has_quota: true,
        }
    }

    #[test]
    fn over_quota_clamps_available_to_zero() {
        let q = quota();
        assert_eq!(q.available_cpu_millis(), 0);
        assert_eq!(q.available_memory_bytes(), 6 * GIB);
        assert_eq!(q.available_pod_slots(), 0);
    }

    #[test]
    fn effective_keeps_real_quota_with_zero_limits() {
        let mut q = quota();
        q.cpu_limit_millis = 0;
        assert_eq!(q.effective(), q);
    }

    #[test]
    fn effective_fills_limits_when_no_quota_object() {
        let mut q = quota();
        q.has_quota = false;
        let eff = q.effective();
        assert_eq!(eff.cpu_limit_millis, DEFAULT_QUOTA_CPU_MILLIS);
        assert_eq!(eff.memory_limit_bytes, DEFAULT_QUOTA_MEMORY_BYTES);
        assert_eq!(eff.pod_limit, DEFAULT_QUOTA_PODS);
        assert_eq!(eff.cpu_used_millis, 5000);
        assert_eq!(eff.current_pods, 12);
    }

    #[test]
    fn resolved_quota_tags_its_source() {
        assert_eq!(ResolvedQuota::from(quota()).source, DataQuality::Measured);

        let mut missing = quota();
        missing.has_quota = false;
        let resolved = ResolvedQuota::from(missing);
        assert_eq!(resolved.source, DataQuality::Estimated);
        assert_eq!(resolved.quota.cpu_limit_millis, DEFAULT_QUOTA_CPU_MILLIS);

        let fallback = ResolvedQuota::unavailable("team-a");
        assert_eq!(fallback.source, DataQuality::Default);
        assert_eq!(fallback.quota.namespace, "team-a");
        assert_eq!(fallback.quota.cpu_used_millis, 0);
    }

    #[test]
    fn usage_percent_guards_zero_limit() {
        assert_eq!(usage_percent(50.0, 0.0), 0.0);
        assert_eq!(usage_percent(50.0, 200.0), 25.0);
        assert_eq!(usage_percent(300.0, 200.0), 150.0);
    }

    #[test]
    fn has_quota_defaults_to_true_when_omitted() {
        let q: NamespaceQuota = serde_yaml::from_str(
            "namespace: team-a\ncpu-limit-millis: 1000\nmemory-limit-bytes: 1024\n",
        )
        .unwrap();
        assert!(q.has_quota);
        assert_eq!(q.cpu_limit_millis, 1000);
        assert_eq!(q.pod_limit, 0);
    }
}
