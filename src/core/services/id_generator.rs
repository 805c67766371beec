//! Section id generator
//!
//! Builds dotted hierarchical ids (`2.1.3`) from the declared nesting level of
//! each section, in document order. Top-level sections have level 1, a
//! subsection has its parent's level plus one.

use std::collections::BTreeMap;

/// Stateful generator of hierarchical section ids
///
/// One generator serves one document; [`SectionIdGenerator::reset`] starts over.
#[derive(Debug, Clone, Default)]
pub struct SectionIdGenerator {
    /// Counter per level. A level has no entry until it is first used.
    counters: BTreeMap<u32, u32>,
}

impl SectionIdGenerator {
    /// Create a generator with no counters
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counters: BTreeMap::new(),
        }
    }

    /// Generate the id of the next section at `level`
    ///
    /// Increments the counter at `level`, resets every deeper counter to zero
    /// and joins the counters of all shallower levels seen so far with the new
    /// value. Levels that were never used contribute no segment.
    pub fn next_id(&mut self, level: u32) -> String {
        let counter = self.counters.entry(level).or_insert(0);
        *counter = counter.saturating_add(1);
        let value = *counter;

        if let Some(next) = level.checked_add(1) {
            for (_, deeper) in self.counters.range_mut(next..) {
                *deeper = 0;
            }
        }

        self.counters
            .range(..level)
            .map(|(_, v)| v.to_string())
            .chain(std::iter::once(value.to_string()))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Forget all counters
    pub fn reset(&mut self) {
        self.counters.clear();
    }
}
