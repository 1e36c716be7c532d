//! Multi-constraint pod admission estimates and linear growth forecasts for
//! a namespace quota.
//!
//! Everything here is a pure function of the snapshot passed in: the
//! calculator holds only its default safety margin, so one instance can be
//! shared freely between callers.

pub mod trending;

use pkg_constants::capacity::DEFAULT_SAFETY_MARGIN;
use pkg_types::capacity::{
    AvailableCapacity, CapacityResult, LimitingFactor, PodEstimate, QuotaUtilization,
    RecommendedLimit, TrendingInfo,
};
use pkg_types::error::{CapacityError, Result};
use pkg_types::format::{format_cpu, format_memory};
use pkg_types::pod::{PodProfile, PodResources};
use pkg_types::quota::{NamespaceQuota, ResolvedQuota, usage_percent};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Estimates how many pods of each profile still fit in a namespace quota.
#[derive(Debug, Clone, Copy)]
pub struct CapacityCalculator {
    safety_margin: f64,
}

impl CapacityCalculator {
    /// Create a calculator. A margin outside `[0, 1]` is replaced with 0.15.
    pub fn new(safety_margin: f64) -> Self {
        let safety_margin = if is_valid_margin(safety_margin) {
            safety_margin
        } else {
            warn!(
                "Safety margin {} outside [0, 1], using {}",
                safety_margin, DEFAULT_SAFETY_MARGIN
            );
            DEFAULT_SAFETY_MARGIN
        };
        Self { safety_margin }
    }

    pub fn safety_margin(&self) -> f64 {
        self.safety_margin
    }

    /// Estimate pod admission for every applicable profile.
    ///
    /// The presets are always estimated; `custom` is added when custom
    /// resources are supplied and then also becomes the recommended limit.
    /// An out-of-range `margin_override` falls back to the calculator's margin.
    pub fn calculate_pod_capacity(
        &self,
        quota: Option<&NamespaceQuota>,
        profile: PodProfile,
        custom: Option<PodResources>,
        margin_override: Option<f64>,
    ) -> Result<CapacityResult> {
        let quota = quota.ok_or_else(|| {
            CapacityError::InvalidQuota("a namespace quota snapshot is required".to_string())
        })?;
        self.calculate_resolved(
            &ResolvedQuota::from(quota.clone()),
            profile,
            custom,
            margin_override,
        )
    }

    /// [`Self::calculate_pod_capacity`] for a quota whose source the caller
    /// already knows, such as [`ResolvedQuota::unavailable`] after a failed
    /// fetch. `quota_source` in the result is taken from `resolved`.
    pub fn calculate_resolved(
        &self,
        resolved: &ResolvedQuota,
        profile: PodProfile,
        custom: Option<PodResources>,
        margin_override: Option<f64>,
    ) -> Result<CapacityResult> {
        if profile == PodProfile::Custom && custom.is_none() {
            return Err(CapacityError::InvalidInput(
                "profile 'custom' requires custom pod resources".to_string(),
            ));
        }
        if let Some(res) = custom
            && (res.cpu_millicores == 0 || res.memory_mb == 0)
        {
            return Err(CapacityError::InvalidInput(format!(
                "custom pod resources must be positive (cpu={}m, memory={}Mi)",
                res.cpu_millicores, res.memory_mb
            )));
        }

        let margin = self.effective_margin(margin_override);
        let quota_source = resolved.source;
        let quota = resolved.quota.effective();

        let available_cpu = quota.available_cpu_millis();
        let available_memory = quota.available_memory_bytes();
        let available_slots = quota.available_pod_slots();

        let mut pod_estimates = BTreeMap::new();
        for preset in PodProfile::PRESETS {
            if let Some(res) = preset.preset() {
                pod_estimates.insert(
                    preset,
                    estimate_pods(available_cpu, available_memory, available_slots, res, margin),
                );
            }
        }
        if let Some(res) = custom {
            pod_estimates.insert(
                PodProfile::Custom,
                estimate_pods(available_cpu, available_memory, available_slots, res, margin),
            );
        }

        let recommended_profile = if custom.is_some() {
            PodProfile::Custom
        } else {
            PodProfile::Medium
        };
        let recommended = pod_estimates[&recommended_profile];

        debug!(
            "Capacity for {}: cpu={}m memory={}B slots={} → {} x {} (limited by {})",
            quota.namespace,
            available_cpu,
            available_memory,
            available_slots,
            recommended.max_pods,
            recommended_profile,
            recommended.limiting_factor
        );

        Ok(CapacityResult {
            namespace: quota.namespace.clone(),
            available_capacity: AvailableCapacity {
                cpu_millicores: available_cpu,
                memory_bytes: available_memory,
                pod_slots: available_slots,
                cpu: format_cpu(available_cpu),
                memory: format_memory(available_memory),
            },
            pod_estimates,
            recommended_limit: RecommendedLimit {
                profile: recommended_profile,
                max_pods: recommended.max_pods,
                safe_pods: recommended.safe_pods,
                limiting_factor: recommended.limiting_factor,
            },
            safety_margin: margin,
            current_utilization: QuotaUtilization {
                cpu_percent: usage_percent(
                    quota.cpu_used_millis as f64,
                    quota.cpu_limit_millis as f64,
                ),
                memory_percent: usage_percent(
                    quota.memory_used_bytes as f64,
                    quota.memory_limit_bytes as f64,
                ),
                pods_percent: usage_percent(quota.current_pods as f64, quota.pod_limit as f64),
            },
            quota_source,
        })
    }

    /// Forecast daily growth and the days left until usage crosses 85%.
    ///
    /// All values are percentages of quota.
    pub fn calculate_trending(
        &self,
        historical_cpu: &[f64],
        historical_memory: &[f64],
        current_cpu: f64,
        current_memory: f64,
    ) -> TrendingInfo {
        trending::forecast(historical_cpu, historical_memory, current_cpu, current_memory)
    }

    fn effective_margin(&self, margin_override: Option<f64>) -> f64 {
        match margin_override {
            Some(m) if is_valid_margin(m) => m,
            Some(m) => {
                warn!(
                    "Safety margin override {} outside [0, 1], using {}",
                    m, self.safety_margin
                );
                self.safety_margin
            }
            None => self.safety_margin,
        }
    }
}

impl Default for CapacityCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_SAFETY_MARGIN)
    }
}

fn is_valid_margin(margin: f64) -> bool {
    (0.0..=1.0).contains(&margin)
}

/// Pods of `resources` that fit in the available capacity.
///
/// `resources` must be non-zero in both dimensions.
pub fn estimate_pods(
    available_cpu_millis: u64,
    available_memory_bytes: u64,
    available_slots: u32,
    resources: PodResources,
    margin: f64,
) -> PodEstimate {
    let by_cpu = available_cpu_millis / resources.cpu_millicores.max(1);
    let by_memory = available_memory_bytes / resources.memory_bytes().max(1);
    let by_slots = u64::from(available_slots);

    let max_pods = by_cpu.min(by_memory).min(by_slots);
    let safe_pods = ((max_pods as f64 * (1.0 - margin)).floor() as u64).min(max_pods);

    PodEstimate {
        max_pods,
        safe_pods,
        limiting_factor: LimitingFactor::by_smallest_count(by_cpu, by_memory, by_slots),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_constants::units::{GIB, MIB};
    use pkg_types::quality::DataQuality;
    use proptest::prelude::*;

    fn make_quota(
        cpu_limit: u64,
        cpu_used: u64,
        mem_limit: u64,
        mem_used: u64,
        pods: u32,
        current: u32,
    ) -> NamespaceQuota {
        NamespaceQuota {
            namespace: "team-a".to_string(),
            cpu_limit_millis: cpu_limit,
            cpu_used_millis: cpu_used,
            memory_limit_bytes: mem_limit,
            memory_used_bytes: mem_used,
            pod_limit: pods,
            current_pods: current,
            has_quota: true,
        }
    }

    fn reference_quota() -> NamespaceQuota {
        make_quota(10_000, 6_000, 10 * GIB, 7 * GIB, 50, 8)
    }

    #[test]
    fn test_reference_quota_medium_is_cpu_bound() {
        let calc = CapacityCalculator::default();
        let result = calc
            .calculate_pod_capacity(Some(&reference_quota()), PodProfile::Medium, None, None)
            .unwrap();

        let medium = result.pod_estimates[&PodProfile::Medium];
        assert!((15..=25).contains(&medium.max_pods));
        assert_eq!(medium.max_pods, 20);
        assert_eq!(medium.safe_pods, 17);
        assert_eq!(medium.limiting_factor, LimitingFactor::Cpu);

        assert_eq!(result.available_capacity.cpu_millicores, 4_000);
        assert_eq!(result.available_capacity.memory_bytes, 3 * GIB);
        assert_eq!(result.available_capacity.pod_slots, 42);
        assert_eq!(result.available_capacity.cpu, "4 cores");
        assert_eq!(result.available_capacity.memory, "3.0Gi");
        assert_eq!(result.recommended_limit.profile, PodProfile::Medium);
        assert_eq!(result.recommended_limit.max_pods, 20);
        assert_eq!(result.quota_source, DataQuality::Measured);
        assert_eq!(result.current_utilization.cpu_percent, 60.0);
        assert_eq!(result.current_utilization.memory_percent, 70.0);
        assert_eq!(result.current_utilization.pods_percent, 16.0);
    }

    #[test]
    fn test_presets_always_estimated_custom_only_when_supplied() {
        let calc = CapacityCalculator::default();
        let result = calc
            .calculate_pod_capacity(Some(&reference_quota()), PodProfile::Small, None, None)
            .unwrap();
        assert_eq!(result.pod_estimates.len(), 3);
        assert!(!result.pod_estimates.contains_key(&PodProfile::Custom));

        let custom = PodResources {
            cpu_millicores: 1000,
            memory_mb: 256,
        };
        let result = calc
            .calculate_pod_capacity(Some(&reference_quota()), PodProfile::Custom, Some(custom), None)
            .unwrap();
        assert_eq!(result.pod_estimates.len(), 4);
        assert_eq!(result.recommended_limit.profile, PodProfile::Custom);
        assert_eq!(result.recommended_limit.max_pods, 4);
    }

    #[test]
    fn test_memory_and_pod_count_limits() {
        let calc = CapacityCalculator::new(0.0);
        // Plenty of CPU, 1Gi memory left: 8 medium pods by memory.
        let q = make_quota(100_000, 0, 2 * GIB, GIB, 100, 0);
        let r = calc
            .calculate_pod_capacity(Some(&q), PodProfile::Medium, None, None)
            .unwrap();
        let medium = r.pod_estimates[&PodProfile::Medium];
        assert_eq!(medium.max_pods, 8);
        assert_eq!(medium.limiting_factor, LimitingFactor::Memory);
        assert_eq!(medium.safe_pods, 8);

        // Only three pod slots left.
        let q = make_quota(100_000, 0, 100 * GIB, 0, 10, 7);
        let r = calc
            .calculate_pod_capacity(Some(&q), PodProfile::Medium, None, None)
            .unwrap();
        let medium = r.pod_estimates[&PodProfile::Medium];
        assert_eq!(medium.max_pods, 3);
        assert_eq!(medium.limiting_factor, LimitingFactor::PodCount);
    }

    #[test]
    fn test_tie_prefers_cpu_then_memory() {
        let calc = CapacityCalculator::default();
        // 1000m / 200m = 5 and 640Mi / 128Mi = 5, 5 slots: three-way tie.
        let q = make_quota(1_000, 0, 640 * MIB, 0, 5, 0);
        let r = calc
            .calculate_pod_capacity(Some(&q), PodProfile::Medium, None, None)
            .unwrap();
        assert_eq!(r.pod_estimates[&PodProfile::Medium].limiting_factor, LimitingFactor::Cpu);

        // Memory and slots tie below cpu.
        let q = make_quota(2_000, 0, 640 * MIB, 0, 5, 0);
        let r = calc
            .calculate_pod_capacity(Some(&q), PodProfile::Medium, None, None)
            .unwrap();
        assert_eq!(
            r.pod_estimates[&PodProfile::Medium].limiting_factor,
            LimitingFactor::Memory
        );
    }

    #[test]
    fn test_fully_consumed_quota_admits_nothing() {
        let calc = CapacityCalculator::default();
        let q = make_quota(4_000, 4_000, 8 * GIB, 8 * GIB, 20, 20);
        let r = calc
            .calculate_pod_capacity(Some(&q), PodProfile::Medium, None, None)
            .unwrap();
        for estimate in r.pod_estimates.values() {
            assert_eq!(estimate.max_pods, 0);
            assert_eq!(estimate.safe_pods, 0);
        }
    }

    #[test]
    fn test_over_quota_clamps_to_zero() {
        let calc = CapacityCalculator::default();
        let q = make_quota(4_000, 6_000, 8 * GIB, GIB, 20, 2);
        let r = calc
            .calculate_pod_capacity(Some(&q), PodProfile::Small, None, None)
            .unwrap();
        assert_eq!(r.available_capacity.cpu_millicores, 0);
        assert!(r.pod_estimates.values().all(|e| e.max_pods == 0));
        assert!(r.current_utilization.cpu_percent > 100.0);
    }

    #[test]
    fn test_zero_limit_quota_is_not_replaced() {
        let calc = CapacityCalculator::default();
        let q = make_quota(0, 0, 0, 0, 0, 0);
        let r = calc
            .calculate_pod_capacity(Some(&q), PodProfile::Medium, None, None)
            .unwrap();
        assert!(r.pod_estimates.values().all(|e| e.max_pods == 0));
        assert_eq!(r.current_utilization.cpu_percent, 0.0);
    }

    #[test]
    fn test_missing_quota_object_uses_generous_defaults() {
        let calc = CapacityCalculator::default();
        let mut q = make_quota(0, 1_000, 0, GIB, 0, 3);
        q.has_quota = false;
        let r = calc
            .calculate_pod_capacity(Some(&q), PodProfile::Medium, None, None)
            .unwrap();
        assert_eq!(r.quota_source, DataQuality::Estimated);
        assert_eq!(r.available_capacity.cpu_millicores, 99_000);
        assert!(r.recommended_limit.max_pods > 0);
    }

    #[test]
    fn test_unavailable_quota_is_tagged_default() {
        let calc = CapacityCalculator::default();
        let fallback = ResolvedQuota::unavailable("shop");
        let r = calc
            .calculate_resolved(&fallback, PodProfile::Medium, None, None)
            .unwrap();
        assert_eq!(r.namespace, "shop");
        assert_eq!(r.quota_source, DataQuality::Default);
        assert_eq!(r.available_capacity.cpu_millicores, 100_000);
        assert_eq!(r.current_utilization.cpu_percent, 0.0);

        let mut no_object = make_quota(0, 1_000, 0, GIB, 0, 3);
        no_object.has_quota = false;
        let r = calc
            .calculate_resolved(&ResolvedQuota::from(no_object), PodProfile::Medium, None, None)
            .unwrap();
        assert_eq!(r.quota_source, DataQuality::Estimated);
    }

    #[test]
    fn test_invalid_inputs() {
        let calc = CapacityCalculator::default();
        assert!(matches!(
            calc.calculate_pod_capacity(None, PodProfile::Medium, None, None),
            Err(CapacityError::InvalidQuota(_))
        ));
        assert!(matches!(
            calc.calculate_pod_capacity(Some(&reference_quota()), PodProfile::Custom, None, None),
            Err(CapacityError::InvalidInput(_))
        ));
        let zero_cpu = PodResources {
            cpu_millicores: 0,
            memory_mb: 128,
        };
        assert!(matches!(
            calc.calculate_pod_capacity(
                Some(&reference_quota()),
                PodProfile::Custom,
                Some(zero_cpu),
                None
            ),
            Err(CapacityError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_margin_clamp_and_override() {
        assert_eq!(CapacityCalculator::new(-0.5).safety_margin(), DEFAULT_SAFETY_MARGIN);
        assert_eq!(CapacityCalculator::new(1.5).safety_margin(), DEFAULT_SAFETY_MARGIN);
        assert_eq!(CapacityCalculator::new(f64::NAN).safety_margin(), DEFAULT_SAFETY_MARGIN);
        assert_eq!(CapacityCalculator::new(0.0).safety_margin(), 0.0);
        assert_eq!(CapacityCalculator::new(1.0).safety_margin(), 1.0);

        let calc = CapacityCalculator::new(0.3);
        let r = calc
            .calculate_pod_capacity(Some(&reference_quota()), PodProfile::Medium, None, Some(0.5))
            .unwrap();
        assert_eq!(r.safety_margin, 0.5);
        assert_eq!(r.pod_estimates[&PodProfile::Medium].safe_pods, 10);

        let r = calc
            .calculate_pod_capacity(Some(&reference_quota()), PodProfile::Medium, None, Some(2.0))
            .unwrap();
        assert_eq!(r.safety_margin, 0.3);
    }

    #[test]
    fn test_identical_inputs_serialize_identically() {
        let calc = CapacityCalculator::default();
        let q = reference_quota();
        let a = calc
            .calculate_pod_capacity(Some(&q), PodProfile::Large, None, None)
            .unwrap();
        let b = calc
            .calculate_pod_capacity(Some(&q), PodProfile::Large, None, None)
            .unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    proptest! {
        #[test]
        fn prop_exhausted_dimension_admits_nothing(
            cpu_limit in 0u64..50_000,
            mem_limit in 0u64..(64 * GIB),
            pod_limit in 0u32..200,
            which in 0usize..3,
        ) {
            let mut q = make_quota(cpu_limit, 0, mem_limit, 0, pod_limit, 0);
            match which {
                0 => q.cpu_used_millis = cpu_limit,
                1 => q.memory_used_bytes = mem_limit + 1,
                _ => q.current_pods = pod_limit,
            }
            let r = CapacityCalculator::default()
                .calculate_pod_capacity(Some(&q), PodProfile::Small, None, None)
                .unwrap();
            prop_assert!(r.pod_estimates.values().all(|e| e.max_pods == 0));
        }

        #[test]
        fn prop_safe_never_exceeds_max(
            cpu in 0u64..200_000,
            mem in 0u64..(512 * GIB),
            slots in 0u32..1_000,
            margin in 0.0f64..=1.0,
        ) {
            for profile in PodProfile::PRESETS {
                let e = estimate_pods(cpu, mem, slots, profile.preset().unwrap(), margin);
                prop_assert!(e.safe_pods <= e.max_pods);
            }
        }

        #[test]
        fn prop_larger_margin_never_admits_more(
            cpu in 0u64..200_000,
            mem in 0u64..(512 * GIB),
            slots in 0u32..1_000,
            a in 0.0f64..=1.0,
            b in 0.0f64..=1.0,
        ) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let res = PodProfile::Medium.preset().unwrap();
            let loose = estimate_pods(cpu, mem, slots, res, low);
            let tight = estimate_pods(cpu, mem, slots, res, high);
            prop_assert_eq!(loose.max_pods, tight.max_pods);
            prop_assert!(tight.safe_pods <= loose.safe_pods);
        }
    }
}
