//! JSON description of a small world.
//!
//! ```json
//! {
//!   "name": "overworld",
//!   "bottomY": 0,
//!   "topY": 8,
//!   "cellTypes": {
//!     "crafter": { "crafting": { "domain": { "kind": "bool" }, "default": false } },
//!     "crafting_table": {}
//!   },
//!   "regions": [
//!     { "x": 0, "z": 0, "cells": [
//!       { "pos": [1, 2, 3], "type": "crafter", "payload": { "tag": "crafter", "data": {} } }
//!     ] },
//!     { "x": 1, "z": 0, "available": false, "cells": [] }
//!   ]
//! }
//! ```
//!
//! Regions marked `"available": false` are loaded after startup.

use blocksub_engine::MemoryWorld;
use blocksub_types::{
    AssignmentRejected, AttributeSpec, AttributeValue, CellPos, CellType, CellTypeRegistry,
    Identifier, Payload, RegionPos,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error(transparent)]
    Types(#[from] blocksub_types::Error),

    #[error("cell {pos} uses unknown type {cell_type}")]
    UnknownCellType { pos: CellPos, cell_type: Identifier },

    #[error("region ({x}, {z}) lies outside the addressable cell grid")]
    RegionOutOfRange { x: i32, z: i32 },

    #[error("cell {pos} lies outside region {region}")]
    OutsideRegion { pos: CellPos, region: RegionPos },

    #[error("cell {pos}: {source}")]
    Attribute {
        pos: CellPos,
        source: AssignmentRejected,
    },

    #[error("vertical extent {bottom}..{top} is empty")]
    EmptyExtent { bottom: i32, top: i32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldFixture {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub bottom_y: i32,
    #[serde(default = "default_top")]
    pub top_y: i32,
    #[serde(default)]
    pub cell_types: BTreeMap<String, BTreeMap<String, AttributeSpec>>,
    #[serde(default)]
    pub regions: Vec<RegionFixture>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionFixture {
    pub x: i32,
    pub z: i32,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub cells: Vec<CellFixture>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellFixture {
    pub pos: [i32; 3],
    #[serde(rename = "type")]
    pub cell_type: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

fn default_name() -> String {
    "overworld".to_string()
}

fn default_top() -> i32 {
    16
}

fn default_true() -> bool {
    true
}

impl RegionFixture {
    pub fn pos(&self) -> RegionPos {
        RegionPos::new(self.x, self.z)
    }
}

impl CellFixture {
    pub fn pos(&self) -> CellPos {
        let [x, y, z] = self.pos;
        CellPos::new(x, y, z)
    }
}

impl WorldFixture {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Builds the type registry declared by `cellTypes`.
    pub fn registry(&self) -> Result<CellTypeRegistry, FixtureError> {
        let mut registry = CellTypeRegistry::new();
        for (raw, attributes) in &self.cell_types {
            let id = Identifier::normalize(raw)?;
            registry.register(CellType::new(id, attributes.clone())?);
        }
        Ok(registry)
    }

    /// Builds the world. Regions flagged available are marked so without
    /// firing any callbacks.
    pub fn build(&self) -> Result<MemoryWorld, FixtureError> {
        if self.bottom_y >= self.top_y {
            return Err(FixtureError::EmptyExtent {
                bottom: self.bottom_y,
                top: self.top_y,
            });
        }

        let world = MemoryWorld::new(
            self.name.clone(),
            self.registry()?,
            self.bottom_y..self.top_y,
        )?;

        for region in &self.regions {
            let region_pos = RegionPos::try_new(region.x, region.z).map_err(|_| {
                FixtureError::RegionOutOfRange {
                    x: region.x,
                    z: region.z,
                }
            })?;

            for cell in &region.cells {
                let pos = cell.pos();
                if !region_pos.contains(pos) {
                    return Err(FixtureError::OutsideRegion {
                        pos,
                        region: region_pos,
                    });
                }

                let id = Identifier::normalize(&cell.cell_type)?;
                let mut state = world
                    .registry()
                    .default_state(&id)
                    .ok_or(FixtureError::UnknownCellType {
                        pos,
                        cell_type: id,
                    })?;
                for (name, value) in &cell.attributes {
                    state = state
                        .try_assign(name, value.clone())
                        .map_err(|source| FixtureError::Attribute { pos, source })?;
                }

                world.set_cell(pos, state);
                if let Some(payload) = &cell.payload {
                    world.set_payload(pos, payload.clone());
                }
            }

            if region.available {
                world.make_available(region_pos);
            }
        }

        Ok(world)
    }

    /// Regions that become available only after startup.
    pub fn deferred_regions(&self) -> Vec<RegionPos> {
        self.regions
            .iter()
            .filter(|region| !region.available)
            .map(RegionFixture::pos)
            .collect()
    }

    /// Captures `world` back into fixture form, keeping this fixture's
    /// type declarations and region order. Fill cells are omitted.
    pub fn capture(&self, world: &MemoryWorld) -> Self {
        let fill = world.fill().id();
        let regions = self
            .regions
            .iter()
            .map(|region| {
                let payloads: BTreeMap<CellPos, Payload> =
                    world.region_payloads(region.pos()).into_iter().collect();
                let cells = world
                    .region_cells(region.pos())
                    .into_iter()
                    .filter(|(_, state)| state.id() != fill)
                    .map(|(pos, state)| CellFixture {
                        pos: [pos.x, pos.y, pos.z],
                        cell_type: state.id().to_string(),
                        attributes: state
                            .attributes()
                            .map(|(name, value)| (name.to_string(), value.clone()))
                            .collect(),
                        payload: payloads.get(&pos).cloned(),
                    })
                    .collect();

                RegionFixture {
                    x: region.x,
                    z: region.z,
                    available: world.is_available(region.pos()),
                    cells,
                }
            })
            .collect();

        Self {
            regions,
            ..self.clone()
        }
    }
}
