//! Plain-text mapping format used by editors.
//!
//! One rule per line, `source = replacement` or `source -> replacement`.
//! Blank lines and lines starting with `#` or `//` are comments. Both sides
//! are normalized, so bare names land in the default namespace.

use blocksub_types::Identifier;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Parses editor text into normalized `source -> replacement` mappings.
///
/// Malformed lines are skipped. A later line for the same source wins.
pub fn parse_mapping_text(text: &str) -> BTreeMap<String, String> {
    let mut mappings = BTreeMap::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        let parts = if line.contains('=') {
            line.split_once('=')
        } else {
            line.split_once("->")
        };
        let Some((raw_source, raw_replacement)) = parts else {
            debug!("Skipping mapping line {}: no separator in {:?}", index + 1, line);
            continue;
        };

        match (
            Identifier::normalize(raw_source),
            Identifier::normalize(raw_replacement),
        ) {
            (Ok(source), Ok(replacement)) => {
                mappings.insert(source.to_string(), replacement.to_string());
            }
            _ => warn!(
                "Skipping mapping line {}: invalid identifier in {:?}",
                index + 1,
                line
            ),
        }
    }

    mappings
}

/// Renders mappings as editor text, one `source = replacement` per line.
pub fn format_mapping_text(mappings: &BTreeMap<String, String>) -> String {
    mappings
        .iter()
        .map(|(source, replacement)| format!("{source} = {replacement}"))
        .collect::<Vec<_>>()
        .join("\n")
}
