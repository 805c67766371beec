//! Business logic services
//!
//! Pure orchestration logic that operates on domain models.
//! These services have no I/O dependencies - they operate on
//! data passed in and return results.
//!
//! - [`id_generator`] - Generate hierarchical section ids from levels
//! - [`section_order`] - Order and relate hierarchical section ids
//! - [`correlator`] - Match test references to assertions and aggregate coverage
//! - [`audit`] - Correlate several documents against one reference source
//! - [`markup`] - Inline markup of assertion text

pub mod audit;
pub mod correlator;
pub mod id_generator;
pub mod markup;
pub mod section_order;

pub use audit::{audit_documents, split_by_spec};
pub use correlator::{CoverageConfig, Correlator, LinkSettings};
pub use id_generator::SectionIdGenerator;
pub use markup::{Fragment, FragmentKind, Markup};
pub use section_order::{compare_optional_section_ids, compare_section_ids};
