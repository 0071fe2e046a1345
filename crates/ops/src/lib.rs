//! Seed and copy operations behind the `atelier-ops` binary.

pub mod copy;
pub mod seed;
