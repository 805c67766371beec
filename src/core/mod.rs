//! Core domain logic for specaudit
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (AuditDocument, Section, Assertion, TableData)
//! - `services/` - Id generation, id ordering, correlation and rollup
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
