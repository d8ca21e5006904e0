//! Namespaced identifiers for cell types.
//!
//! An identifier is always stored in its normalized `namespace:path` form.
//! Bare paths pick up the default namespace, so `stone` and `minecraft:stone`
//! are the same key everywhere a table or registry is indexed by identifier.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Namespace prepended to identifiers written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Separator between namespace and path.
pub const NAMESPACE_SEPARATOR: char = ':';

/// A normalized, fully namespaced cell type identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Normalizes `raw` against [`DEFAULT_NAMESPACE`].
    pub fn normalize(raw: &str) -> Result<Self> {
        Self::normalize_in(raw, DEFAULT_NAMESPACE)
    }

    /// Normalizes `raw`, prepending `default_namespace` when no namespace is
    /// given. A leading separator (`:stone`) also means the default namespace.
    ///
    /// Fails when the trimmed input is empty or either half contains
    /// characters outside the identifier grammar.
    pub fn normalize_in(raw: &str, default_namespace: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidIdentifier(raw.to_string()));
        }

        let (namespace, path) = match trimmed.split_once(NAMESPACE_SEPARATOR) {
            Some(("", path)) => (default_namespace, path),
            Some((namespace, path)) => (namespace, path),
            None => (default_namespace, trimmed),
        };

        if !is_valid_namespace(namespace) || !is_valid_path(path) {
            return Err(Error::InvalidIdentifier(raw.to_string()));
        }

        Ok(Self(format!("{namespace}{NAMESPACE_SEPARATOR}{path}")))
    }

    /// Returns the normalized `namespace:path` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the namespace half.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.split().0
    }

    /// Returns the path half.
    #[must_use]
    pub fn path(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        // Normalized identifiers always contain exactly one separator.
        self.0
            .split_once(NAMESPACE_SEPARATOR)
            .unwrap_or((DEFAULT_NAMESPACE, self.0.as_str()))
    }
}

fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty()
        && namespace
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.'))
}

fn is_valid_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b'/'))
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::normalize(s)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::normalize(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_halves() {
        let id = Identifier::normalize("create:brass_casing").unwrap();
        assert_eq!(id.namespace(), "create");
        assert_eq!(id.path(), "brass_casing");
    }

    #[test]
    fn grammar_rejects_uppercase_and_spaces() {
        assert!(!is_valid_path("Stone"));
        assert!(!is_valid_path("oak log"));
        assert!(is_valid_path("textures/oak_log"));
        assert!(!is_valid_namespace("my/ns"));
    }
}
