//! Adapters layer: Concrete implementations of ports.
//!
//! - `cache`: moka-backed and no-op result caches
//! - `redact`: clinical value and PII filtering for logs

pub mod cache;
pub mod redact;

pub use cache::{CacheConfig, MokaReportCache, NoopCache};
