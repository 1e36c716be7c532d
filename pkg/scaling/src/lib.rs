//! What-if analysis for changing a deployment's replica count.
//!
//! The analyzer reads three snapshots once per call (deployment, pod usage,
//! namespace quota), projects the deployment's footprint at the target
//! replica count and reports what that does to the namespace quota and the
//! control plane. Lookup failures never abort an analysis: a conservative
//! default is substituted and tagged in `data_quality`.

pub mod advice;
pub mod infrastructure;
pub mod projection;
pub mod snapshots;

use chrono::Utc;
use pkg_constants::scaling::DEFAULT_CURRENT_REPLICAS;
use pkg_types::config::ScalingTunables;
use pkg_types::deployment::DeploymentSnapshot;
use pkg_types::error::Result;
use pkg_types::pod::average_usage_for;
use pkg_types::quality::DataQuality;
use pkg_types::quota::{NamespaceQuota, ResolvedQuota};
use pkg_types::scaling::{
    AlternativeScenario, DataQualityReport, ResourceState, ScalingImpactInput,
    ScalingImpactOutput,
};
use pkg_types::validate::{validate_identifier, validate_namespace, validate_target_replicas};
use tracing::{debug, info, warn};

use crate::advice::RecommendationContext;
use crate::projection::{PodBaseline, namespace_impact, resource_state};
use crate::snapshots::ClusterSnapshots;

pub struct ScalingImpactAnalyzer<'a, S: ClusterSnapshots + ?Sized> {
    snapshots: &'a S,
    tunables: ScalingTunables,
}

impl<'a, S: ClusterSnapshots + ?Sized> ScalingImpactAnalyzer<'a, S> {
    pub fn new(snapshots: &'a S, tunables: ScalingTunables) -> Self {
        Self {
            snapshots,
            tunables,
        }
    }

    /// Project the effect of scaling `input.deployment` to `input.target_replicas`.
    ///
    /// Fails only on invalid input; see [`pkg_types::error::CapacityError`].
    pub fn execute(&self, input: &ScalingImpactInput) -> Result<ScalingImpactOutput> {
        validate_identifier("deployment", &input.deployment)?;
        validate_namespace(&input.namespace)?;
        validate_target_replicas(input.target_replicas)?;

        let namespace = input.namespace.as_str();
        let target = input.target_replicas;

        let deployment = match self.snapshots.deployment(namespace, &input.deployment) {
            Ok(d) => Some(d),
            Err(e) => {
                warn!(
                    "Deployment lookup failed for {}/{}: {:#}",
                    namespace, input.deployment, e
                );
                None
            }
        };

        let (current, replicas_quality) =
            resolve_current_replicas(input.current_replicas, deployment.as_ref());
        let (baseline, usage_quality) = self.resolve_baseline(input, deployment.as_ref());
        let ResolvedQuota {
            quota,
            source: quota_quality,
        } = self.resolve_quota(namespace);

        let current_state = resource_state(baseline, current, current, &self.tunables);
        let projected_state = resource_state(baseline, current, target, &self.tunables);
        let impact = namespace_impact(&current_state, &projected_state, &quota);

        let infrastructure = input.include_infrastructure.then(|| {
            infrastructure::assess(namespace, current, target, &self.tunables.infrastructure)
        });

        let warnings = advice::warnings(
            &impact,
            infrastructure.as_ref(),
            current.abs_diff(target),
            &self.tunables,
        );
        let recommendation = advice::recommendation(
            &RecommendationContext {
                deployment: &input.deployment,
                current_replicas: current,
                target_replicas: target,
                impact: &impact,
                infrastructure: infrastructure.as_ref(),
            },
            &self.tunables,
        );
        let alternative_scenarios =
            self.alternative_scenarios(baseline, current, target, &current_state, &quota);

        info!(
            "Scaling impact {}/{}: {} → {} replicas, usage {:.1}% ({}), exceeded={}",
            namespace,
            input.deployment,
            current,
            target,
            impact.usage_percent,
            impact.limiting_factor,
            impact.quota_exceeded
        );

        Ok(ScalingImpactOutput {
            deployment: input.deployment.clone(),
            namespace: input.namespace.clone(),
            current_replicas: current,
            target_replicas: target,
            current_state,
            projected_state,
            namespace_impact: impact,
            infrastructure_impact: infrastructure,
            warnings,
            recommendation,
            alternative_scenarios,
            data_quality: DataQualityReport {
                current_replicas: replicas_quality,
                per_pod_usage: usage_quality,
                quota: quota_quality,
            },
            analyzed_at: Utc::now(),
        })
    }

    /// Average usage of the deployment's running pods, falling back to the
    /// first container's requests and then to the fixed default.
    fn resolve_baseline(
        &self,
        input: &ScalingImpactInput,
        deployment: Option<&DeploymentSnapshot>,
    ) -> (PodBaseline, DataQuality) {
        match self.snapshots.pod_usage(&input.namespace) {
            Ok(pods) => {
                if let Some(avg) = average_usage_for(&pods, &input.deployment) {
                    debug!(
                        "Per-pod baseline for {}: {:.0}m / {:.0}Mi from {} pods",
                        input.deployment, avg.cpu_millicores, avg.memory_mb, avg.pod_count
                    );
                    return (
                        PodBaseline {
                            cpu_millicores: avg.cpu_millicores,
                            memory_mb: avg.memory_mb,
                        },
                        DataQuality::Measured,
                    );
                }
                debug!("No running pods matched {}", input.deployment);
            }
            Err(e) => warn!("Pod metrics lookup failed for {}: {:#}", input.namespace, e),
        }

        if let Some(requests) = deployment.and_then(|d| d.requests)
            && requests.is_set()
        {
            return (
                PodBaseline {
                    cpu_millicores: requests.cpu_millicores,
                    memory_mb: requests.memory_mb,
                },
                DataQuality::Estimated,
            );
        }

        (
            PodBaseline {
                cpu_millicores: self.tunables.default_pod_cpu_millicores,
                memory_mb: self.tunables.default_pod_memory_mb,
            },
            DataQuality::Default,
        )
    }

    fn resolve_quota(&self, namespace: &str) -> ResolvedQuota {
        match self.snapshots.namespace_quota(namespace) {
            Ok(q) => ResolvedQuota::from(q),
            Err(e) => {
                warn!("Quota lookup failed for {}: {:#}", namespace, e);
                ResolvedQuota::unavailable(namespace)
            }
        }
    }

    /// `target - 1` and `target - 2` while still above `current`, then the
    /// current replica count as a reference point when scaling up.
    fn alternative_scenarios(
        &self,
        baseline: PodBaseline,
        current: u32,
        target: u32,
        current_state: &ResourceState,
        quota: &NamespaceQuota,
    ) -> Vec<AlternativeScenario> {
        let at = |replicas: u32, is_baseline: bool| {
            let state = resource_state(baseline, current, replicas, &self.tunables);
            let impact = namespace_impact(current_state, &state, quota);
            advice::scenario(replicas, &impact, is_baseline, &self.tunables)
        };

        let mut scenarios: Vec<AlternativeScenario> = (1..=2)
            .filter_map(|step| target.checked_sub(step))
            .filter(|&replicas| replicas > current)
            .map(|replicas| at(replicas, false))
            .collect();
        if target > current {
            scenarios.push(at(current, true));
        }
        scenarios
    }
}

fn resolve_current_replicas(
    explicit: Option<u32>,
    deployment: Option<&DeploymentSnapshot>,
) -> (u32, DataQuality) {
    match (explicit, deployment) {
        (Some(n), _) => (n, DataQuality::Measured),
        (None, Some(d)) => (d.replicas, DataQuality::Measured),
        (None, None) => (DEFAULT_CURRENT_REPLICAS, DataQuality::Default),
    }
}
