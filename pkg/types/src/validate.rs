use crate::error::{CapacityError, Result};

/// Validate a deployment (or other object) name.
/// Rules: DNS-1123 subdomain, lowercase `[a-z0-9-]` with optional `.`
/// separators, max 253 chars, no leading/trailing hyphens or dots.
pub fn validate_identifier(kind: &str, name: &str) -> Result<()> {
    check_dns_name(kind, name, 253, true)
}

/// Validate a namespace name.
/// Rules: DNS-1123 label, lowercase `[a-z0-9-]`, max 63 chars, no dots.
pub fn validate_namespace(name: &str) -> Result<()> {
    check_dns_name("namespace", name, 63, false)
}

fn check_dns_name(kind: &str, name: &str, max_len: usize, allow_dots: bool) -> Result<()> {
    let invalid = |reason: String| Err(CapacityError::InvalidInput(reason));

    if name.is_empty() {
        return invalid(format!("{} name must not be empty", kind));
    }
    if name.len() > max_len {
        return invalid(format!(
            "{} name '{}' exceeds {} characters (got {})",
            kind,
            name,
            max_len,
            name.len()
        ));
    }
    let is_separator = |c: char| c == '-' || c == '.';
    if name.starts_with(is_separator) || name.ends_with(is_separator) {
        return invalid(format!(
            "{} name '{}' must start and end with a letter or digit",
            kind, name
        ));
    }
    let allowed = |c: char| {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || (allow_dots && c == '.')
    };
    if !name.chars().all(allowed) {
        let charset = if allow_dots {
            "lowercase letters, digits, '-' and '.'"
        } else {
            "lowercase letters, digits and '-'"
        };
        return invalid(format!("{} name '{}' must contain only {}", kind, name, charset));
    }
    Ok(())
}

/// Validate a requested replica count.
pub fn validate_target_replicas(target: u32) -> Result<()> {
    if target < 1 {
        return Err(CapacityError::InvalidInput(format!(
            "target_replicas must be at least 1 (got {})",
            target
        )));
    }
    Ok(())
}
