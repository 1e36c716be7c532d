use serde::{Deserialize, Serialize};

/// Where a resolved input came from.
///
/// A namespace that genuinely uses little of its quota looks the same as a
/// namespace whose quota lookup failed once defaults are substituted; this
/// tag keeps the two apart in every output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    /// Read from a live snapshot.
    Measured,
    /// Derived from a related snapshot (e.g. container requests instead of metrics).
    Estimated,
    /// A fixed fallback value; the upstream lookup failed.
    Default,
}

impl std::fmt::Display for DataQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataQuality::Measured => write!(f, "measured"),
            DataQuality::Estimated => write!(f, "estimated"),
            DataQuality::Default => write!(f, "default"),
        }
    }
}
