//! Display formatting for resource quantities.

use pkg_constants::units::{GIB, KIB, MIB, MILLICORES_PER_CORE, TIB};

/// Format millicores for display.
///
/// # Examples
/// - 250 -> "250m"
/// - 2000 -> "2 cores"
/// - 2500 -> "2.5 cores"
pub fn format_cpu(millicores: u64) -> String {
    if millicores < MILLICORES_PER_CORE {
        format!("{}m", millicores)
    } else if millicores % MILLICORES_PER_CORE == 0 {
        format!("{} cores", millicores / MILLICORES_PER_CORE)
    } else {
        format!(
            "{:.1} cores",
            millicores as f64 / MILLICORES_PER_CORE as f64
        )
    }
}

/// Format bytes using binary units, one decimal place from `Gi` upward.
///
/// # Examples
/// - 512 -> "512B"
/// - 1024 -> "1Ki"
/// - 1048576 -> "1Mi"
/// - 1073741824 -> "1.0Gi"
pub fn format_memory(bytes: u64) -> String {
    if bytes >= TIB {
        format!("{:.1}Ti", bytes as f64 / TIB as f64)
    } else if bytes >= GIB {
        format!("{:.1}Gi", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{}Mi", bytes / MIB)
    } else if bytes >= KIB {
        format!("{}Ki", bytes / KIB)
    } else {
        format!("{}B", bytes)
    }
}
