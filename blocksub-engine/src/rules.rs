//! Normalized source → replacement rule table.

use blocksub_config::SubstitutionConfig;
use blocksub_types::Identifier;
use std::collections::HashMap;
use tracing::warn;

/// Maps source cell types to their replacements.
///
/// Built once per configuration and never mutated while a scan reads it;
/// reloads build a new table and swap it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: HashMap<Identifier, Identifier>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from raw `(source, replacement)` strings.
    ///
    /// Entries where either side is blank or fails normalization are dropped
    /// with a warning; the remaining entries still form a valid table. When
    /// two entries normalize to the same source, the later one wins.
    pub fn build<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = Self::new();
        for (source, replacement) in entries {
            let (source, replacement) = (source.as_ref(), replacement.as_ref());
            match (
                Identifier::normalize(source),
                Identifier::normalize(replacement),
            ) {
                (Ok(source), Ok(replacement)) => table.insert(source, replacement),
                _ => warn!(
                    "Dropping invalid mapping {:?} -> {:?}",
                    source, replacement
                ),
            }
        }
        table
    }

    pub fn from_config(config: &SubstitutionConfig) -> Self {
        Self::build(&config.block_mappings)
    }

    pub fn insert(&mut self, source: Identifier, replacement: Identifier) {
        self.rules.insert(source, replacement);
    }

    pub fn lookup(&self, source: &Identifier) -> Option<&Identifier> {
        self.rules.get(source)
    }

    /// Adds every rule of `defaults` whose source is absent here.
    ///
    /// Existing rules are never overwritten. Returns how many were added.
    ///
    /// Table-level form of [`SubstitutionConfig::repair`]: for documents
    /// with valid mappings, building a table from the repaired document
    /// equals building the loaded table and merging the defaults table.
    pub fn merge_defaults(&mut self, defaults: &RuleTable) -> usize {
        let mut added = 0;
        for (source, replacement) in &defaults.rules {
            if !self.rules.contains_key(source) {
                self.rules.insert(source.clone(), replacement.clone());
                added += 1;
            }
        }
        added
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &Identifier)> {
        self.rules.iter()
    }
}
