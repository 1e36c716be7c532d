//! Warnings, the recommendation text, and alternative-scenario labelling.

use pkg_constants::scaling::QUOTA_EXCEEDED_PERCENT;
use pkg_types::config::ScalingTunables;
use pkg_types::scaling::{AlternativeScenario, InfrastructureImpact, NamespaceImpact, Severity};

pub fn warnings(
    impact: &NamespaceImpact,
    infrastructure: Option<&InfrastructureImpact>,
    replica_delta: u32,
    tunables: &ScalingTunables,
) -> Vec<String> {
    let mut warnings = Vec::new();
    let usage = impact.usage_percent;

    if usage >= QUOTA_EXCEEDED_PERCENT {
        warnings.push(format!(
            "CRITICAL: projected {} usage {:.1}% is at or above the namespace quota",
            impact.limiting_factor, usage
        ));
    } else if usage >= tunables.critical_usage_percent {
        warnings.push(format!(
            "CRITICAL: projected usage {:.1}% is approaching the namespace quota limit",
            usage
        ));
    } else if usage >= tunables.warning_usage_percent {
        warnings.push(format!(
            "WARNING: projected usage {:.1}% is above the {:.0}% threshold",
            usage, tunables.warning_usage_percent
        ));
    }

    if impact.headroom_remaining_percent < tunables.low_headroom_percent {
        warnings.push(format!(
            "WARNING: only {:.1}% quota headroom remains; {} is the limiting resource",
            impact.headroom_remaining_percent, impact.limiting_factor
        ));
    }

    if let Some(infra) = infrastructure {
        let components = [
            ("etcd", infra.etcd),
            ("API server", infra.api_server),
            ("scheduler", infra.scheduler),
        ];
        for (component, severity) in components {
            if severity == Severity::High {
                warnings.push(format!(
                    "WARNING: high {} impact from changing {} replicas at once",
                    component, replica_delta
                ));
            }
        }
    }

    warnings
}

/// Replica count that brings projected usage back to the safe target.
///
/// Stays within `[1, target - 1]` so it always differs from the request
/// (except at target 1, where 1 is the only option).
pub fn safe_replica_count(target: u32, usage_percent: f64, tunables: &ScalingTunables) -> u32 {
    let upper = target.saturating_sub(1).max(1);
    if usage_percent <= 0.0 || !usage_percent.is_finite() {
        return upper;
    }
    let ratio = tunables.safe_target_usage_percent / usage_percent;
    let safe = (f64::from(target) * ratio).floor();
    if !safe.is_finite() || safe < 1.0 {
        return 1;
    }
    (safe.min(f64::from(u32::MAX)) as u32).clamp(1, upper)
}

pub struct RecommendationContext<'a> {
    pub deployment: &'a str,
    pub current_replicas: u32,
    pub target_replicas: u32,
    pub impact: &'a NamespaceImpact,
    pub infrastructure: Option<&'a InfrastructureImpact>,
}

pub fn recommendation(ctx: &RecommendationContext<'_>, tunables: &ScalingTunables) -> String {
    let impact = ctx.impact;
    let usage = impact.usage_percent;

    if impact.quota_exceeded {
        return format!(
            "Do not scale {} to {} replicas: projected {} usage {:.1}% exceeds the namespace quota. \
             Reduce the target replica count or increase the namespace quota before scaling.",
            ctx.deployment, ctx.target_replicas, impact.limiting_factor, usage
        );
    }

    if usage >= tunables.critical_usage_percent {
        let safe = safe_replica_count(ctx.target_replicas, usage, tunables);
        return format!(
            "Projected usage {:.1}% leaves almost no headroom. Consider scaling {} to {} replicas \
             instead, which keeps usage near {:.0}%, or increase the namespace quota.",
            usage, ctx.deployment, safe, tunables.safe_target_usage_percent
        );
    }

    if usage >= tunables.warning_usage_percent {
        return format!(
            "Proceed with caution: projected usage {:.1}% is above {:.0}%. Monitor {} consumption \
             closely after scaling {} to {} replicas.",
            usage,
            tunables.warning_usage_percent,
            impact.limiting_factor,
            ctx.deployment,
            ctx.target_replicas
        );
    }

    if ctx.infrastructure.is_some_and(InfrastructureImpact::any_high) {
        return format!(
            "Quota has room ({:.1}% headroom) but control-plane impact is high. Roll {} out \
             gradually, a few replicas at a time, instead of jumping from {} to {} replicas.",
            impact.headroom_remaining_percent,
            ctx.deployment,
            ctx.current_replicas,
            ctx.target_replicas
        );
    }

    format!(
        "Scaling {} from {} to {} replicas is safe: projected usage {:.1}% leaves {:.1}% headroom \
         (cpu {:.1}%, memory {:.1}%).",
        ctx.deployment,
        ctx.current_replicas,
        ctx.target_replicas,
        usage,
        impact.headroom_remaining_percent,
        impact.cpu_usage_percent,
        impact.memory_usage_percent
    )
}

pub fn scenario(
    replicas: u32,
    impact: &NamespaceImpact,
    baseline: bool,
    tunables: &ScalingTunables,
) -> AlternativeScenario {
    let usage = impact.usage_percent;
    let safe = usage <= tunables.warning_usage_percent;
    let description = if baseline {
        format!("Stay at the current {} replicas ({:.1}% usage)", replicas, usage)
    } else if safe {
        format!("Scale to {} replicas ({:.1}% usage, within limits)", replicas, usage)
    } else {
        format!("Scale to {} replicas ({:.1}% usage, above the safe threshold)", replicas, usage)
    };
    AlternativeScenario {
        replicas,
        usage_percent: usage.min(tunables.scenario_usage_display_cap_percent),
        safe,
        description,
    }
}
