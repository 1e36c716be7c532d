use pkg_constants::capacity::{
    LARGE_POD_CPU_MILLIS, LARGE_POD_MEMORY_MB, MEDIUM_POD_CPU_MILLIS, MEDIUM_POD_MEMORY_MB,
    SMALL_POD_CPU_MILLIS, SMALL_POD_MEMORY_MB,
};
use pkg_constants::units::MIB;
use serde::{Deserialize, Serialize};

use crate::error::CapacityError;

// --- Resource requirements ---

/// Per-pod resource requirement used for admission estimates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PodResources {
    /// CPU in millicores (1000 = 1 core)
    #[serde(alias = "cpu-millicores")]
    pub cpu_millicores: u64,
    /// Memory in MiB
    #[serde(alias = "memory-mb")]
    pub memory_mb: u64,
}

impl PodResources {
    pub fn memory_bytes(&self) -> u64 {
        self.memory_mb.saturating_mul(MIB)
    }
}

// --- Pod profile ---

/// Named resource preset, or a caller-supplied requirement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PodProfile {
    Small,
    Medium,
    Large,
    Custom,
}

impl PodProfile {
    /// The three fixed presets, in ascending size.
    pub const PRESETS: [PodProfile; 3] = [PodProfile::Small, PodProfile::Medium, PodProfile::Large];

    /// Preset resources; `None` for `Custom`.
    pub fn preset(&self) -> Option<PodResources> {
        let (cpu_millicores, memory_mb) = match self {
            PodProfile::Small => (SMALL_POD_CPU_MILLIS, SMALL_POD_MEMORY_MB),
            PodProfile::Medium => (MEDIUM_POD_CPU_MILLIS, MEDIUM_POD_MEMORY_MB),
            PodProfile::Large => (LARGE_POD_CPU_MILLIS, LARGE_POD_MEMORY_MB),
            PodProfile::Custom => return None,
        };
        Some(PodResources {
            cpu_millicores,
            memory_mb,
        })
    }
}

impl std::fmt::Display for PodProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PodProfile::Small => write!(f, "small"),
            PodProfile::Medium => write!(f, "medium"),
            PodProfile::Large => write!(f, "large"),
            PodProfile::Custom => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for PodProfile {
    type Err = CapacityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(PodProfile::Small),
            "medium" => Ok(PodProfile::Medium),
            "large" => Ok(PodProfile::Large),
            "custom" => Ok(PodProfile::Custom),
            other => Err(CapacityError::InvalidInput(format!(
                "unknown pod profile '{}' (expected small, medium, large or custom)",
                other
            ))),
        }
    }
}

// --- Pod usage ---

/// Observed usage of one pod, as reported by the metrics provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PodUsage {
    pub name: String,
    #[serde(alias = "cpu-millicores")]
    pub cpu_millicores: f64,
    /// Working-set memory in MiB
    #[serde(alias = "memory-mb")]
    pub memory_mb: f64,
    #[serde(default = "default_running")]
    pub running: bool,
}

fn default_running() -> bool {
    true
}

/// Average usage across the pods attributed to one deployment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AveragePodUsage {
    pub cpu_millicores: f64,
    pub memory_mb: f64,
    pub pod_count: usize,
}

/// Average usage of running pods whose name contains `deployment`.
///
/// Name matching is a heuristic, not an owner-reference lookup: a deployment
/// named `web` also claims pods of `web-cache`. Returns `None` when no
/// running pod matches.
pub fn average_usage_for(pods: &[PodUsage], deployment: &str) -> Option<AveragePodUsage> {
    let matched: Vec<&PodUsage> = pods
        .iter()
        .filter(|p| p.running && p.name.contains(deployment))
        .filter(|p| p.cpu_millicores.is_finite() && p.memory_mb.is_finite())
        .collect();

    if matched.is_empty() {
        return None;
    }

    let n = matched.len() as f64;
    let cpu: f64 = matched.iter().map(|p| p.cpu_millicores).sum();
    let mem: f64 = matched.iter().map(|p| p.memory_mb).sum();
    Some(AveragePodUsage {
        cpu_millicores: cpu / n,
        memory_mb: mem / n,
        pod_count: matched.len(),
    })
}
