//! specaudit - Specification assertion coverage for conformance test suites
//!
//! Correlates the assertions of specification audit documents with the test
//! methods that claim to exercise them and reports coverage per chapter.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_debug_implementations,
    unsafe_code
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

mod cli;

/// Main entry point for the specaudit CLI
fn main() {
    if let Err(e) = cli::run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
