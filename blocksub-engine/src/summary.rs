//! Per-pair replacement counts produced by region scans.

use blocksub_types::Identifier;
use std::collections::BTreeMap;

/// Label of a rule pair in summaries and diagnostics.
pub fn pair_label(source: &Identifier, replacement: &Identifier) -> String {
    format!("{source} -> {replacement}")
}

/// Replacement counts per `"<source> -> <replacement>"` label, in label order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementSummary {
    counts: BTreeMap<String, usize>,
}

impl ReplacementSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, source: &Identifier, replacement: &Identifier) {
        *self.counts.entry(pair_label(source, replacement)).or_insert(0) += 1;
    }

    pub fn get(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Cells replaced across all pairs.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }

    /// Adds every count of `other` into this summary.
    pub fn merge(&mut self, other: &ReplacementSummary) {
        for (label, count) in &other.counts {
            *self.counts.entry(label.clone()).or_insert(0) += count;
        }
    }
}
