//! Command implementations

mod lookup;
mod report;
mod sections;

pub use lookup::lookup;
pub use report::{ReportArgs, report};
pub use sections::sections;
