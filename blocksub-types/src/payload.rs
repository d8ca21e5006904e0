//! Attached payloads: structured data bound to a single cell coordinate.

use crate::Result;
use serde::{Deserialize, Serialize};

/// Opaque structured record attached to a cell, keyed by a type tag.
///
/// The engine never looks inside `data`; it only moves the record from the
/// old cell to the new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    tag: String,
    data: serde_json::Value,
}

impl Payload {
    pub fn new(tag: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            tag: tag.into(),
            data,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }

    /// Canonical byte encoding, used to compare payloads before and after a move.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
