//! Once-per-pair diagnostics shared by concurrent scans.

use crate::summary::pair_label;
use blocksub_types::Identifier;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// Remembers which diagnostics were already emitted.
///
/// Missing attributes are keyed by `"<source> -> <replacement>"` plus the
/// attribute name; unresolved replacements by the pair alone. Inserts happen
/// under one lock, so among concurrent first occurrences exactly one caller
/// sees `true`.
#[derive(Debug, Default)]
pub struct DiagnosticDeduplicator {
    missing: Mutex<HashMap<String, HashSet<String>>>,
    unresolved: Mutex<HashSet<String>>,
}

impl DiagnosticDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time `attribute` is reported for the pair.
    pub fn report_once(
        &self,
        source: &Identifier,
        replacement: &Identifier,
        attribute: &str,
    ) -> bool {
        let mut missing = self.missing.lock();
        missing
            .entry(pair_label(source, replacement))
            .or_default()
            .insert(attribute.to_string())
    }

    /// Returns true the first time the pair's replacement is found unresolvable.
    pub fn report_unresolved_once(&self, source: &Identifier, replacement: &Identifier) -> bool {
        self.unresolved.lock().insert(pair_label(source, replacement))
    }

    /// Forgets everything reported so far.
    pub fn clear(&self) {
        self.missing.lock().clear();
        self.unresolved.lock().clear();
    }

    /// Attribute names already reported for the pair, sorted.
    pub fn reported(&self, source: &Identifier, replacement: &Identifier) -> Vec<String> {
        let missing = self.missing.lock();
        let mut names: Vec<String> = missing
            .get(&pair_label(source, replacement))
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}
