//! Filesystem and fingerprint helpers.

pub mod fingerprint;
pub mod fs;
