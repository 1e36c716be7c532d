//! Shared snapshot, result and configuration types for the capacity engine.

pub mod capacity;
pub mod config;
pub mod deployment;
pub mod error;
pub mod format;
pub mod pod;
pub mod quality;
pub mod quota;
pub mod scaling;
pub mod validate;
