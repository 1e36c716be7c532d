use pkg_constants::capacity::DEFAULT_SAFETY_MARGIN;
use pkg_constants::scaling as defaults;
use serde::{Deserialize, Serialize};

/// Engine configuration file (YAML).
///
/// Example `capctl.yaml`:
/// ```yaml
/// safety-margin: 0.2
/// include-infrastructure: true
/// scaling:
///   overhead-per-replica: 0.03
///   max-overhead-factor: 1.2
///   infrastructure:
///     etcd-high-delta: 30
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfigFile {
    #[serde(default, alias = "safety-margin")]
    pub safety_margin: Option<f64>,
    #[serde(default, alias = "include-infrastructure")]
    pub include_infrastructure: Option<bool>,
    #[serde(default)]
    pub scaling: ScalingTunables,
}

impl EngineConfigFile {
    pub fn safety_margin_or_default(&self) -> f64 {
        self.safety_margin.unwrap_or(DEFAULT_SAFETY_MARGIN)
    }
}

/// Heuristic constants of the scaling-impact projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScalingTunables {
    #[serde(alias = "overhead-per-replica")]
    pub overhead_per_replica: f64,
    #[serde(alias = "max-overhead-factor")]
    pub max_overhead_factor: f64,
    #[serde(alias = "warning-usage-percent")]
    pub warning_usage_percent: f64,
    #[serde(alias = "critical-usage-percent")]
    pub critical_usage_percent: f64,
    #[serde(alias = "low-headroom-percent")]
    pub low_headroom_percent: f64,
    #[serde(alias = "safe-target-usage-percent")]
    pub safe_target_usage_percent: f64,
    #[serde(alias = "scenario-usage-display-cap-percent")]
    pub scenario_usage_display_cap_percent: f64,
    #[serde(alias = "default-pod-cpu-millicores")]
    pub default_pod_cpu_millicores: f64,
    #[serde(alias = "default-pod-memory-mb")]
    pub default_pod_memory_mb: f64,
    pub infrastructure: InfrastructureThresholds,
}

impl Default for ScalingTunables {
    fn default() -> Self {
        Self {
            overhead_per_replica: defaults::OVERHEAD_PER_REPLICA,
            max_overhead_factor: defaults::MAX_OVERHEAD_FACTOR,
            warning_usage_percent: defaults::WARNING_USAGE_PERCENT,
            critical_usage_percent: defaults::CRITICAL_USAGE_PERCENT,
            low_headroom_percent: defaults::LOW_HEADROOM_PERCENT,
            safe_target_usage_percent: defaults::SAFE_TARGET_USAGE_PERCENT,
            scenario_usage_display_cap_percent: defaults::SCENARIO_USAGE_DISPLAY_CAP_PERCENT,
            default_pod_cpu_millicores: defaults::DEFAULT_POD_CPU_MILLIS,
            default_pod_memory_mb: defaults::DEFAULT_POD_MEMORY_MB,
            infrastructure: InfrastructureThresholds::default(),
        }
    }
}

/// Bucket boundaries for the control-plane impact estimate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InfrastructureThresholds {
    #[serde(alias = "etcd-medium-delta")]
    pub etcd_medium_delta: u32,
    #[serde(alias = "etcd-high-delta")]
    pub etcd_high_delta: u32,
    #[serde(alias = "api-server-medium-delta")]
    pub api_server_medium_delta: u32,
    #[serde(alias = "api-server-high-delta")]
    pub api_server_high_delta: u32,
    #[serde(alias = "scheduler-medium-delta")]
    pub scheduler_medium_delta: u32,
    #[serde(alias = "scheduler-medium-target")]
    pub scheduler_medium_target: u32,
    #[serde(alias = "scheduler-high-delta")]
    pub scheduler_high_delta: u32,
    #[serde(alias = "scheduler-high-target")]
    pub scheduler_high_target: u32,
    #[serde(alias = "overhead-percent-per-replica")]
    pub overhead_percent_per_replica: f64,
    #[serde(alias = "max-overhead-percent")]
    pub max_overhead_percent: f64,
}

impl Default for InfrastructureThresholds {
    fn default() -> Self {
        Self {
            etcd_medium_delta: defaults::ETCD_MEDIUM_DELTA,
            etcd_high_delta: defaults::ETCD_HIGH_DELTA,
            api_server_medium_delta: defaults::API_SERVER_MEDIUM_DELTA,
            api_server_high_delta: defaults::API_SERVER_HIGH_DELTA,
            scheduler_medium_delta: defaults::SCHEDULER_MEDIUM_DELTA,
            scheduler_medium_target: defaults::SCHEDULER_MEDIUM_TARGET,
            scheduler_high_delta: defaults::SCHEDULER_HIGH_DELTA,
            scheduler_high_target: defaults::SCHEDULER_HIGH_TARGET,
            overhead_percent_per_replica: defaults::CONTROL_PLANE_OVERHEAD_PERCENT_PER_REPLICA,
            max_overhead_percent: defaults::MAX_CONTROL_PLANE_OVERHEAD_PERCENT,
        }
    }
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T: serde::de::DeserializeOwned + Default>(path: &str) -> anyhow::Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    let config: T = serde_yaml::from_str(&content)?;
    Ok(config)
}
