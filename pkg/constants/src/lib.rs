//! Centralized constants for the capacity planning engine.
//!
//! Every threshold, preset and fallback value the engine uses lives here.
//! Change a value in one place and it applies everywhere; the tunable ones
//! can also be overridden per deployment through the engine config file.

pub mod capacity;
pub mod scaling;
pub mod units;
