//! Coverage status of a single assertion

use serde::{Deserialize, Serialize};

/// Coverage status computed for an assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageStatus {
    /// At least one reference with no excluded test group
    Covered,
    /// No references at all
    Uncovered,
    /// Only references tagged with an excluded test group
    Unimplemented,
    /// Assertion is declared non-testable
    Untestable,
}

impl CoverageStatus {
    /// Upper-case label used in reports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Covered => "COVERED",
            Self::Uncovered => "UNCOVERED",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::Untestable => "UNTESTABLE",
        }
    }
}

impl std::fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CoverageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "COVERED" => Ok(Self::Covered),
            "UNCOVERED" => Ok(Self::Uncovered),
            "UNIMPLEMENTED" => Ok(Self::Unimplemented),
            "UNTESTABLE" => Ok(Self::Untestable),
            _ => Err(format!(
                "Invalid status: {s}. Use: covered, uncovered, unimplemented, untestable"
            )),
        }
    }
}
