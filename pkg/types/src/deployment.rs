use serde::{Deserialize, Serialize};

// --- Container resources ---

/// Requests or limits of a deployment's first container.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ContainerResources {
    /// CPU in millicores (1000 = 1 core)
    #[serde(default, alias = "cpu-millicores")]
    pub cpu_millicores: f64,
    /// Memory in MiB
    #[serde(default, alias = "memory-mb")]
    pub memory_mb: f64,
}

impl ContainerResources {
    /// True when both dimensions carry a usable positive value.
    pub fn is_set(&self) -> bool {
        self.cpu_millicores.is_finite()
            && self.memory_mb.is_finite()
            && self.cpu_millicores > 0.0
            && self.memory_mb > 0.0
    }
}

// --- Deployment snapshot ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeploymentSnapshot {
    pub name: String,
    pub namespace: String,
    /// Replica count observed on the deployment
    pub replicas: u32,
    #[serde(default, alias = "available-replicas")]
    pub available_replicas: u32,
    /// First-container resource requests
    #[serde(default)]
    pub requests: Option<ContainerResources>,
    /// First-container resource limits
    #[serde(default)]
    pub limits: Option<ContainerResources>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_need_both_dimensions() {
        assert!(!ContainerResources::default().is_set());
        assert!(
            !ContainerResources {
                cpu_millicores: 250.0,
                memory_mb: 0.0
            }
            .is_set()
        );
        assert!(
            ContainerResources {
                cpu_millicores: 250.0,
                memory_mb: 256.0
            }
            .is_set()
        );
    }

    #[test]
    fn deserializes_from_yaml() {
        let d: DeploymentSnapshot = serde_yaml::from_str(
            "name: web\nnamespace: shop\nreplicas: 3\nrequests:\n  cpu-millicores: 250\n  memory-mb: 256\n",
        )
        .unwrap();
        assert_eq!(d.replicas, 3);
        assert_eq!(d.available_replicas, 0);
        assert!(d.requests.unwrap().is_set());
        assert!(d.limits.is_none());
    }
}
