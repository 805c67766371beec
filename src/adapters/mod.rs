//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - [`xml`] - Audit document parsing
//! - [`json`] - Reference files in JSON

pub mod json;
pub mod xml;
