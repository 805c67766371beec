//! JSON reference files
//!
//! Implements `ReferenceSource` over files holding arrays of references.

mod source;

pub use source::JsonReferenceSource;
