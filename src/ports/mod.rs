//! Ports layer: Trait definitions for external collaborators.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and replaceable infrastructure.

mod cache;

pub use cache::{InputFingerprint, ReportCache};
