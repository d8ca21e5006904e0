//! Core type definitions for the block substitution engine.
//!
//! This crate defines the host-agnostic types every other crate speaks:
//! - Namespaced cell type identifiers and their normalization
//! - Typed attributes (boolean, bounded integer, enumerated symbol)
//! - Cell types, cell states, and the registry that resolves them
//! - Attached payloads carried across substitution
//! - Region and cell coordinates
//!
//! Nothing here talks to a world; the engine crate owns that.

mod attribute;
mod cell;
mod coords;
mod ids;
mod payload;

pub use attribute::{AssignmentRejected, AttributeDomain, AttributeValue};
pub use cell::{AttributeSpec, CellState, CellType, CellTypeBuilder, CellTypeRegistry};
pub use coords::{CellPos, REGION_MAX, REGION_MIN, REGION_WIDTH, RegionPos};
pub use ids::{DEFAULT_NAMESPACE, Identifier, NAMESPACE_SEPARATOR};
pub use payload::Payload;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("attribute '{attribute}' declared twice on {cell_type}")]
    DuplicateAttribute {
        cell_type: Identifier,
        attribute: String,
    },

    #[error("default {value} for attribute '{attribute}' on {cell_type} is outside its domain")]
    InvalidAttributeDefault {
        cell_type: Identifier,
        attribute: String,
        value: AttributeValue,
    },

    #[error("region ({x}, {z}) lies outside the addressable cell grid")]
    RegionOutOfRange { x: i32, z: i32 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
