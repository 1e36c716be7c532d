//! Scaling-impact projection constants.
//!
//! None of the overhead or infrastructure numbers are measured quantities;
//! they are heuristics and are exposed as tunables for that reason.

// ─── Fallback inputs ──────────────────────────────────────────────────────

/// Per-pod CPU assumed when neither pod metrics nor container requests exist.
pub const DEFAULT_POD_CPU_MILLIS: f64 = 100.0;

/// Per-pod memory (MiB) assumed when neither pod metrics nor requests exist.
pub const DEFAULT_POD_MEMORY_MB: f64 = 128.0;

/// Replica count assumed when the deployment lookup fails and no override is given.
pub const DEFAULT_CURRENT_REPLICAS: u32 = 1;

// ─── Overhead model ───────────────────────────────────────────────────────

/// Per-pod cost inflation per replica added (service discovery, mesh registration).
pub const OVERHEAD_PER_REPLICA: f64 = 0.02;

/// Upper bound of the overhead factor.
pub const MAX_OVERHEAD_FACTOR: f64 = 1.15;

// ─── Usage thresholds (percent of quota) ──────────────────────────────────

pub const WARNING_USAGE_PERCENT: f64 = 85.0;
pub const CRITICAL_USAGE_PERCENT: f64 = 95.0;
pub const QUOTA_EXCEEDED_PERCENT: f64 = 100.0;

/// Headroom below which an extra warning names the limiting resource.
pub const LOW_HEADROOM_PERCENT: f64 = 10.0;

/// Usage a back-calculated safe replica count aims for.
pub const SAFE_TARGET_USAGE_PERCENT: f64 = 85.0;

/// Displayed usage of alternative scenarios is clamped to this value.
pub const SCENARIO_USAGE_DISPLAY_CAP_PERCENT: f64 = 150.0;

// ─── Infrastructure impact buckets (|Δreplicas| / target size) ────────────

pub const ETCD_MEDIUM_DELTA: u32 = 10;
pub const ETCD_HIGH_DELTA: u32 = 20;

pub const API_SERVER_MEDIUM_DELTA: u32 = 5;
pub const API_SERVER_HIGH_DELTA: u32 = 15;

pub const SCHEDULER_MEDIUM_DELTA: u32 = 8;
pub const SCHEDULER_MEDIUM_TARGET: u32 = 15;
pub const SCHEDULER_HIGH_DELTA: u32 = 10;
pub const SCHEDULER_HIGH_TARGET: u32 = 20;

/// Control-plane load estimate per replica added, in percent.
pub const CONTROL_PLANE_OVERHEAD_PERCENT_PER_REPLICA: f64 = 2.0;

/// Cap on the scale-up control-plane load estimate, in percent.
pub const MAX_CONTROL_PLANE_OVERHEAD_PERCENT: f64 = 20.0;

/// Namespace prefixes treated as cluster infrastructure.
pub const INFRASTRUCTURE_NAMESPACE_PREFIXES: &[&str] = &["openshift-", "kube-"];
