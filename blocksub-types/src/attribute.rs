//! Typed cell attributes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single attribute value carried by a cell state.
///
/// Serialized untagged so fixtures and payloads read naturally:
/// `{"powered": true, "age": 3, "facing": "north"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i32),
    Symbol(String),
}

impl AttributeValue {
    /// Shorthand for a symbol value.
    pub fn symbol(value: impl Into<String>) -> Self {
        Self::Symbol(value.into())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Symbol(s) => f.write_str(s),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Symbol(value.to_string())
    }
}

/// The legal values of one attribute on one cell type.
///
/// Two cell types may both declare `facing` with different domains; an
/// assignment across types is only accepted when the target domain admits
/// the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributeDomain {
    Bool,
    Int { min: i32, max: i32 },
    Symbol { values: Vec<String> },
}

impl AttributeDomain {
    /// Shorthand for a symbol domain.
    pub fn symbols<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Symbol {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `value` is a member of this domain.
    pub fn admits(&self, value: &AttributeValue) -> bool {
        match (self, value) {
            (Self::Bool, AttributeValue::Bool(_)) => true,
            (Self::Int { min, max }, AttributeValue::Int(v)) => (*min..=*max).contains(v),
            (Self::Symbol { values }, AttributeValue::Symbol(s)) => values.iter().any(|v| v == s),
            _ => false,
        }
    }
}

/// A cell type refused an attribute value.
///
/// Returned by [`CellState::try_assign`](crate::CellState::try_assign) when
/// the attribute is unknown to the type or the value lies outside its domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("attribute '{attribute}' rejected value {value}")]
pub struct AssignmentRejected {
    pub attribute: String,
    pub value: AttributeValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_domain_is_inclusive() {
        let domain = AttributeDomain::Int { min: 0, max: 7 };
        assert!(domain.admits(&AttributeValue::Int(0)));
        assert!(domain.admits(&AttributeValue::Int(7)));
        assert!(!domain.admits(&AttributeValue::Int(8)));
        assert!(!domain.admits(&AttributeValue::Bool(true)));
    }

    #[test]
    fn untagged_values_parse_by_shape() {
        let values: Vec<AttributeValue> = serde_json::from_str(r#"[true, 3, "north"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                AttributeValue::Bool(true),
                AttributeValue::Int(3),
                AttributeValue::symbol("north"),
            ]
        );
    }
}
