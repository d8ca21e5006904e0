//! Configuration for the block substitution engine.
//!
//! - [`SubstitutionConfig`]: the persisted JSON document (mappings + flags)
//! - [`ConfigStore`]: loads, repairs, and writes the document on disk
//! - [`parse_mapping_text`] / [`format_mapping_text`]: the one-rule-per-line
//!   text format used by mapping editors
//!
//! Loading never fails: a missing file is populated from the baked-in
//! defaults, and an unreadable or malformed file falls back to them.

mod document;
mod error;
mod mapping_text;
mod store;

pub use document::{CURRENT_CONFIG_VERSION, SubstitutionConfig};
pub use error::{ConfigError, ConfigResult};
pub use mapping_text::{format_mapping_text, parse_mapping_text};
pub use store::{CONFIG_FILE_NAME, ConfigStore};
