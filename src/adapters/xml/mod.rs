//! XML audit documents
//!
//! Parses the audit format into an [`AuditDocument`](crate::core::models::AuditDocument).

mod parser;
mod tree;

pub use parser::{ParseError, load_file, parse_reader, parse_str};
