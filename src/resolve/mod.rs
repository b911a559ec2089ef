//! Version resolution
//!
//! Pure function of (records, timeline): identical inputs always produce
//! identical results. Safe to run in parallel across features and browsers.

mod engine;
mod errors;

pub use engine::{resolve_added, resolve_detailed, Resolution, VersionAdded};
pub use errors::{ResolveError, ResolveResult};
