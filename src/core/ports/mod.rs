//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core business logic
//! and external systems (test metadata extraction, storage formats).
//!
//! Implementations live in the `adapters` module.

mod reference_source;

pub use reference_source::ReferenceSource;
#[cfg(test)]
pub use reference_source::MockReferenceSource;
