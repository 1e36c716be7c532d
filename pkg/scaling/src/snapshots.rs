//! Read-only snapshot sources consumed by the analyzer.

use anyhow::{Context, anyhow};
use pkg_types::deployment::DeploymentSnapshot;
use pkg_types::pod::PodUsage;
use pkg_types::quota::NamespaceQuota;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source of the three snapshots a scaling analysis reads.
///
/// Each lookup is made at most once per analysis. Implementations own any
/// timeout or retry policy; the analyzer treats every error the same way and
/// substitutes a conservative default.
pub trait ClusterSnapshots {
    fn namespace_quota(&self, namespace: &str) -> anyhow::Result<NamespaceQuota>;

    fn deployment(&self, namespace: &str, name: &str) -> anyhow::Result<DeploymentSnapshot>;

    /// Usage of every pod in the namespace; attribution to a deployment is
    /// left to the caller.
    fn pod_usage(&self, namespace: &str) -> anyhow::Result<Vec<PodUsage>>;
}

/// Cluster snapshot file (YAML).
///
/// Example `cluster.yaml`:
/// ```yaml
/// quotas:
///   - namespace: shop
///     cpu-limit-millis: 10000
///     cpu-used-millis: 1000
///     memory-limit-bytes: 10737418240
///     memory-used-bytes: 1073741824
///     pod-limit: 50
///     current-pods: 2
/// deployments:
///   - name: web
///     namespace: shop
///     replicas: 2
/// pods:
///   shop:
///     - name: web-7d9f-abc
///       cpu-millicores: 100
///       memory-mb: 128
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterSnapshotFile {
    #[serde(default)]
    pub quotas: Vec<NamespaceQuota>,
    #[serde(default)]
    pub deployments: Vec<DeploymentSnapshot>,
    /// Pod usage keyed by namespace; a missing key means metrics are unavailable
    #[serde(default)]
    pub pods: BTreeMap<String, Vec<PodUsage>>,
}

/// In-memory snapshot source backed by a [`ClusterSnapshotFile`].
#[derive(Debug, Clone, Default)]
pub struct StaticSnapshots {
    snapshot: ClusterSnapshotFile,
}

impl StaticSnapshots {
    pub fn new(snapshot: ClusterSnapshotFile) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot file. Unlike engine config, the file must exist.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read cluster snapshot {}", path))?;
        let snapshot: ClusterSnapshotFile = serde_yaml::from_str(&content)
            .with_context(|| format!("parse cluster snapshot {}", path))?;
        Ok(Self::new(snapshot))
    }
}

impl ClusterSnapshots for StaticSnapshots {
    fn namespace_quota(&self, namespace: &str) -> anyhow::Result<NamespaceQuota> {
        self.snapshot
            .quotas
            .iter()
            .find(|q| q.namespace == namespace)
            .cloned()
            .ok_or_else(|| anyhow!("no quota snapshot for namespace {}", namespace))
    }

    fn deployment(&self, namespace: &str, name: &str) -> anyhow::Result<DeploymentSnapshot> {
        self.snapshot
            .deployments
            .iter()
            .find(|d| d.namespace == namespace && d.name == name)
            .cloned()
            .ok_or_else(|| anyhow!("deployment {}/{} not found", namespace, name))
    }

    fn pod_usage(&self, namespace: &str) -> anyhow::Result<Vec<PodUsage>> {
        self.snapshot
            .pods
            .get(namespace)
            .cloned()
            .ok_or_else(|| anyhow!("no pod metrics for namespace {}", namespace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"
quotas:
  - namespace: shop
    cpu-limit-millis: 10000
    cpu-used-millis: 1000
    memory-limit-bytes: 10737418240
    memory-used-bytes: 1073741824
    pod-limit: 50
    current-pods: 2
deployments:
  - name: web
    namespace: shop
    replicas: 2
pods:
  shop:
    - name: web-7d9f-abc
      cpu-millicores: 100
      memory-mb: 128
"#;

    #[test]
    fn loads_and_serves_snapshot_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", SNAPSHOT).unwrap();

        let snapshots = StaticSnapshots::from_file(file.path().to_str().unwrap()).unwrap();
        let quota = snapshots.namespace_quota("shop").unwrap();
        assert_eq!(quota.cpu_limit_millis, 10_000);
        assert!(quota.has_quota);
        assert_eq!(snapshots.deployment("shop", "web").unwrap().replicas, 2);
        assert_eq!(snapshots.pod_usage("shop").unwrap().len(), 1);
    }

    #[test]
    fn missing_entries_are_errors() {
        let snapshots = StaticSnapshots::default();
        assert!(snapshots.namespace_quota("shop").is_err());
        assert!(snapshots.deployment("shop", "web").is_err());
        assert!(snapshots.pod_usage("shop").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cluster.yaml");
        assert!(StaticSnapshots::from_file(path.to_str().unwrap()).is_err());
    }
}
