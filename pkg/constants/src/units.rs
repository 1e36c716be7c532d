//! Unit conversion constants.

/// Millicores in one CPU core.
pub const MILLICORES_PER_CORE: u64 = 1000;

/// Bytes in one KiB.
pub const KIB: u64 = 1024;

/// Bytes in one MiB. Every "MB" quantity in the engine is a MiB.
pub const MIB: u64 = 1024 * KIB;

/// Bytes in one GiB.
pub const GIB: u64 = 1024 * MIB;

/// Bytes in one TiB.
pub const TIB: u64 = 1024 * GIB;
