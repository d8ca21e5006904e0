//! The persisted configuration document.

use blocksub_types::Identifier;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{error, warn};

/// Schema version written by this build.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

const BAKED_DEFAULTS: &str = include_str!("../defaults.json");

/// Configuration document.
///
/// ```json
/// {
///   "configVersion": 1,
///   "blockMappings": { "minecraft:crafter": "minecraft:crafting_table" },
///   "logReplacements": true,
///   "scanOverworldOnStartup": true
/// }
/// ```
///
/// Mapping keys and values are kept as written; normalization happens when
/// the engine builds its rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstitutionConfig {
    #[serde(default = "default_config_version")]
    pub config_version: u32,
    #[serde(default, deserialize_with = "lenient_mappings")]
    pub block_mappings: BTreeMap<String, String>,
    #[serde(default = "default_true")]
    pub log_replacements: bool,
    #[serde(default = "default_true")]
    pub scan_overworld_on_startup: bool,
}

fn default_config_version() -> u32 {
    CURRENT_CONFIG_VERSION
}

fn default_true() -> bool {
    true
}

/// Keeps string-valued mapping entries and skips anything else, so one bad
/// value does not discard the whole document.
fn lenient_mappings<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(source, value)| match value {
            serde_json::Value::String(replacement) => Some((source, replacement)),
            other => {
                warn!("Ignoring non-string mapping for {:?}: {}", source, other);
                None
            }
        })
        .collect())
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_CONFIG_VERSION,
            block_mappings: BTreeMap::new(),
            log_replacements: true,
            scan_overworld_on_startup: true,
        }
    }
}

impl SubstitutionConfig {
    /// The baked-in defaults document.
    ///
    /// Falls back to a hard-coded table if the embedded document cannot be
    /// parsed.
    pub fn defaults() -> Self {
        match serde_json::from_str::<Self>(BAKED_DEFAULTS) {
            Ok(defaults) => defaults,
            Err(e) => {
                error!("Baked-in default config is invalid: {}. Using fallback table.", e);
                Self::fallback()
            }
        }
    }

    /// Hard-coded defaults used when the embedded document is unusable.
    pub fn fallback() -> Self {
        let block_mappings = [
            ("minecraft:crafter", "minecraft:crafting_table"),
            ("minecraft:copper_door", "minecraft:iron_door"),
            ("minecraft:copper_bulb", "minecraft:ochre_froglight"),
            ("minecraft:resin_clump", "minecraft:nether_brick"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            block_mappings,
            ..Self::default()
        }
    }

    /// Validates and repairs the document against `defaults`.
    ///
    /// - entries with a blank source or replacement are removed
    /// - every default mapping whose source is absent is added; a source
    ///   already present (compared after normalization) is never overwritten
    /// - the version is bumped to [`CURRENT_CONFIG_VERSION`]
    pub fn repair(&mut self, defaults: &SubstitutionConfig) {
        self.block_mappings.retain(|source, replacement| {
            !source.trim().is_empty() && !replacement.trim().is_empty()
        });

        let present: HashSet<String> = self
            .block_mappings
            .keys()
            .map(|source| normalized_key(source))
            .collect();

        for (source, replacement) in &defaults.block_mappings {
            if !present.contains(&normalized_key(source)) {
                self.block_mappings
                    .insert(source.clone(), replacement.clone());
            }
        }

        self.config_version = CURRENT_CONFIG_VERSION;
    }

    /// Replaces the mappings with those parsed from editor text.
    pub fn apply_mapping_text(&mut self, text: &str) {
        self.block_mappings = crate::parse_mapping_text(text);
    }
}

fn normalized_key(raw: &str) -> String {
    Identifier::normalize(raw)
        .map(|id| id.to_string())
        .unwrap_or_else(|_| raw.trim().to_string())
}
