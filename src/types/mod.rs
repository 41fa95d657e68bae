// Tab deduplication shared type definitions
// Each submodule defines types used across the crate.

pub mod errors;
pub mod settings;
pub mod summary;
pub mod tab;
