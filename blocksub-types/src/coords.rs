//! Region and cell coordinates.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Horizontal edge length of a region, in cells.
pub const REGION_WIDTH: i32 = 16;

/// Smallest region coordinate whose cells are addressable as `i32`.
pub const REGION_MIN: i32 = i32::MIN / REGION_WIDTH;

/// Largest region coordinate whose far edge is addressable as `i32`.
pub const REGION_MAX: i32 = (i32::MAX - (REGION_WIDTH - 1)) / REGION_WIDTH;

/// A region address: a full vertical column of `REGION_WIDTH`² cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionPos {
    pub x: i32,
    pub z: i32,
}

impl RegionPos {
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Like [`new`](Self::new), but rejects regions whose cells fall outside
    /// the `i32` cell grid.
    pub fn try_new(x: i32, z: i32) -> Result<Self> {
        let region = Self::new(x, z);
        if region.is_addressable() {
            Ok(region)
        } else {
            Err(Error::RegionOutOfRange { x, z })
        }
    }

    /// True when every cell of this region has an `i32` coordinate.
    #[must_use]
    pub const fn is_addressable(&self) -> bool {
        REGION_MIN <= self.x && self.x <= REGION_MAX && REGION_MIN <= self.z && self.z <= REGION_MAX
    }

    /// The region holding `cell`.
    #[must_use]
    pub const fn containing(cell: CellPos) -> Self {
        Self {
            x: cell.x.div_euclid(REGION_WIDTH),
            z: cell.z.div_euclid(REGION_WIDTH),
        }
    }

    /// Lowest cell x of the region, saturated for unaddressable regions.
    #[must_use]
    pub const fn origin_x(&self) -> i32 {
        self.x.saturating_mul(REGION_WIDTH)
    }

    /// Lowest cell z of the region, saturated for unaddressable regions.
    #[must_use]
    pub const fn origin_z(&self) -> i32 {
        self.z.saturating_mul(REGION_WIDTH)
    }

    pub fn contains(&self, cell: CellPos) -> bool {
        Self::containing(cell) == *self
    }

    /// Every cell in this region over the `vertical` extent.
    ///
    /// Ordered x-major, then z, then y (bottom to top). Empty when the region
    /// is not [addressable](Self::is_addressable).
    pub fn cells(self, vertical: Range<i32>) -> impl Iterator<Item = CellPos> {
        let (ox, oz) = (self.origin_x(), self.origin_z());
        let width = if self.is_addressable() { REGION_WIDTH } else { 0 };
        (0..width).flat_map(move |dx| {
            let vertical = vertical.clone();
            (0..width).flat_map(move |dz| {
                vertical
                    .clone()
                    .map(move |y| CellPos::new(ox + dx, y, oz + dz))
            })
        })
    }
}

impl fmt::Display for RegionPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.z)
    }
}

/// An absolute cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellPos {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn region(&self) -> RegionPos {
        RegionPos::containing(*self)
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_cells_round_down() {
        assert_eq!(CellPos::new(-1, 0, -16).region(), RegionPos::new(-1, -1));
        assert_eq!(CellPos::new(15, 0, 16).region(), RegionPos::new(0, 1));
    }

    #[test]
    fn cells_cover_the_column() {
        let region = RegionPos::new(2, -1);
        let cells: Vec<_> = region.cells(-2..3).collect();
        assert_eq!(cells.len(), (REGION_WIDTH * REGION_WIDTH * 5) as usize);
        assert!(cells.iter().all(|c| region.contains(*c)));
        assert_eq!(cells[0], CellPos::new(32, -2, -16));
    }
}
