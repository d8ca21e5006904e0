//! Cell types, cell states, and the registry that resolves them.

use crate::{AssignmentRejected, AttributeDomain, AttributeValue, Error, Identifier, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Declaration of one attribute on a cell type: its domain and default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub domain: AttributeDomain,
    pub default: AttributeValue,
}

/// The schema of a cell type: which attributes it supports and their domains.
#[derive(Debug, PartialEq, Eq)]
pub struct CellType {
    id: Identifier,
    attributes: BTreeMap<String, AttributeSpec>,
}

impl CellType {
    /// Creates a cell type, checking that every default lies in its domain.
    pub fn new(id: Identifier, attributes: BTreeMap<String, AttributeSpec>) -> Result<Self> {
        for (name, spec) in &attributes {
            if !spec.domain.admits(&spec.default) {
                return Err(Error::InvalidAttributeDefault {
                    cell_type: id,
                    attribute: name.clone(),
                    value: spec.default.clone(),
                });
            }
        }
        Ok(Self { id, attributes })
    }

    /// Starts a builder for a cell type.
    pub fn builder(id: Identifier) -> CellTypeBuilder {
        CellTypeBuilder {
            id,
            attributes: BTreeMap::new(),
            duplicate: None,
        }
    }

    /// A cell type with no attributes.
    pub fn plain(id: Identifier) -> Self {
        Self {
            id,
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Capability query: does this type declare `attribute`?
    pub fn supports(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }

    pub fn domain(&self, attribute: &str) -> Option<&AttributeDomain> {
        self.attributes.get(attribute).map(|spec| &spec.domain)
    }

    pub fn attributes(&self) -> &BTreeMap<String, AttributeSpec> {
        &self.attributes
    }

    /// The state a freshly placed cell of this type has.
    pub fn default_state(self: &Arc<Self>) -> CellState {
        CellState {
            values: self
                .attributes
                .iter()
                .map(|(name, spec)| (name.clone(), spec.default.clone()))
                .collect(),
            cell_type: Arc::clone(self),
        }
    }
}

/// Fluent construction of a [`CellType`].
#[derive(Debug)]
pub struct CellTypeBuilder {
    id: Identifier,
    attributes: BTreeMap<String, AttributeSpec>,
    duplicate: Option<String>,
}

impl CellTypeBuilder {
    /// Declares an attribute with an explicit domain.
    pub fn attribute(
        mut self,
        name: &str,
        domain: AttributeDomain,
        default: impl Into<AttributeValue>,
    ) -> Self {
        let spec = AttributeSpec {
            domain,
            default: default.into(),
        };
        if self.attributes.insert(name.to_string(), spec).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(name.to_string());
        }
        self
    }

    pub fn boolean(self, name: &str, default: bool) -> Self {
        self.attribute(name, AttributeDomain::Bool, default)
    }

    pub fn int(self, name: &str, min: i32, max: i32, default: i32) -> Self {
        self.attribute(name, AttributeDomain::Int { min, max }, default)
    }

    pub fn symbol(self, name: &str, values: &[&str], default: &str) -> Self {
        self.attribute(name, AttributeDomain::symbols(values.iter().copied()), default)
    }

    pub fn build(self) -> Result<CellType> {
        if let Some(attribute) = self.duplicate {
            return Err(Error::DuplicateAttribute {
                cell_type: self.id,
                attribute,
            });
        }
        CellType::new(self.id, self.attributes)
    }
}

/// The state of one cell: its type plus a value for every attribute the
/// type declares.
#[derive(Debug, Clone)]
pub struct CellState {
    cell_type: Arc<CellType>,
    values: BTreeMap<String, AttributeValue>,
}

impl CellState {
    #[must_use]
    pub fn id(&self) -> &Identifier {
        self.cell_type.id()
    }

    pub fn cell_type(&self) -> &Arc<CellType> {
        &self.cell_type
    }

    pub fn supports(&self, attribute: &str) -> bool {
        self.cell_type.supports(attribute)
    }

    pub fn get(&self, attribute: &str) -> Option<&AttributeValue> {
        self.values.get(attribute)
    }

    /// Iterates `(name, value)` pairs in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns a copy of this state with `attribute` set to `value`.
    ///
    /// Rejected when the type does not declare the attribute or the value is
    /// outside the declared domain; the receiver is left untouched either way.
    pub fn try_assign(
        &self,
        attribute: &str,
        value: AttributeValue,
    ) -> std::result::Result<Self, AssignmentRejected> {
        match self.cell_type.domain(attribute) {
            Some(domain) if domain.admits(&value) => {
                let mut next = self.clone();
                next.values.insert(attribute.to_string(), value);
                Ok(next)
            }
            _ => Err(AssignmentRejected {
                attribute: attribute.to_string(),
                value,
            }),
        }
    }
}

impl PartialEq for CellState {
    fn eq(&self, other: &Self) -> bool {
        self.cell_type.id() == other.cell_type.id() && self.values == other.values
    }
}

impl Eq for CellState {}

/// Lookup table from identifier to cell type.
#[derive(Debug, Default, Clone)]
pub struct CellTypeRegistry {
    types: HashMap<Identifier, Arc<CellType>>,
}

impl CellTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type, replacing any previous type with the same id.
    pub fn register(&mut self, cell_type: CellType) -> Arc<CellType> {
        let cell_type = Arc::new(cell_type);
        self.types
            .insert(cell_type.id().clone(), Arc::clone(&cell_type));
        cell_type
    }

    pub fn get(&self, id: &Identifier) -> Option<&Arc<CellType>> {
        self.types.get(id)
    }

    /// Default state for `id`, or `None` if the id is unknown.
    pub fn default_state(&self, id: &Identifier) -> Option<CellState> {
        self.types.get(id).map(CellType::default_state)
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.types.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
