use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::capacity::LimitingFactor;
use crate::quality::DataQuality;

// --- Input ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScalingImpactInput {
    pub deployment: String,
    pub namespace: String,
    /// Overrides the replica count observed on the deployment
    #[serde(default)]
    pub current_replicas: Option<u32>,
    pub target_replicas: u32,
    #[serde(default = "default_include_infrastructure")]
    pub include_infrastructure: bool,
}

fn default_include_infrastructure() -> bool {
    true
}

impl ScalingImpactInput {
    pub fn new(deployment: &str, namespace: &str, target_replicas: u32) -> Self {
        Self {
            deployment: deployment.to_string(),
            namespace: namespace.to_string(),
            current_replicas: None,
            target_replicas,
            include_infrastructure: true,
        }
    }
}

// --- Resource state ---

/// Resource footprint of a deployment at one replica count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ResourceState {
    pub replicas: u32,
    pub overhead_factor: f64,
    pub per_pod_cpu_millicores: f64,
    /// MiB
    pub per_pod_memory_mb: f64,
    pub total_cpu_millicores: f64,
    /// MiB
    pub total_memory_mb: f64,
}

// --- Namespace impact ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NamespaceImpact {
    pub additional_cpu_millicores: f64,
    pub additional_memory_bytes: f64,
    /// May exceed 100
    pub cpu_usage_percent: f64,
    /// May exceed 100
    pub memory_usage_percent: f64,
    /// max(cpu, memory)
    pub usage_percent: f64,
    pub quota_exceeded: bool,
    pub headroom_remaining_percent: f64,
    pub limiting_factor: LimitingFactor,
}

// --- Infrastructure impact ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InfrastructureImpact {
    pub etcd: Severity,
    pub api_server: Severity,
    pub scheduler: Severity,
    /// Textual heuristic, not a measurement
    pub estimated_overhead: String,
}

impl InfrastructureImpact {
    pub fn any_high(&self) -> bool {
        [self.etcd, self.api_server, self.scheduler].contains(&Severity::High)
    }
}

// --- Alternative scenario ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlternativeScenario {
    pub replicas: u32,
    /// Clamped to 150 for display
    pub usage_percent: f64,
    pub safe: bool,
    pub description: String,
}

// --- Data quality ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataQualityReport {
    pub current_replicas: DataQuality,
    pub per_pod_usage: DataQuality,
    pub quota: DataQuality,
}

// --- Output ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScalingImpactOutput {
    pub deployment: String,
    pub namespace: String,
    pub current_replicas: u32,
    pub target_replicas: u32,
    pub current_state: ResourceState,
    pub projected_state: ResourceState,
    pub namespace_impact: NamespaceImpact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infrastructure_impact: Option<InfrastructureImpact>,
    pub warnings: Vec<String>,
    pub recommendation: String,
    pub alternative_scenarios: Vec<AlternativeScenario>,
    pub data_quality: DataQualityReport,
    pub analyzed_at: DateTime<Utc>,
}
