//! Hexagonal board: the fixed cell set of a centered hexagon, its
//! precomputed axis-line partition, and per-snapshot occupancy.
//!
//! Geometry is built once per grid and shared through an `Arc`; occupancy
//! changes produce a new `HexGrid` value that points at the same geometry.

use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::error::GridError;

use super::hex::AxialCoord;

/// Default board radius: 61 cells, side length 5, diameter 9.
pub const DEFAULT_RADIUS: i32 = 4;

/// Largest supported radius: 30 301 cells, 121 cells per central run.
pub const MAX_RADIUS: i32 = 100;

/// Color/owner id stamped on an occupied cell.
pub type CellColor = u8;

/// One of the 3 line axes, named by the cube component held constant
/// along the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Constant q; traversed along (0, 1).
    Q,
    /// Constant r; traversed along (1, 0).
    R,
    /// Constant s; traversed along (1, -1).
    S,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Q, Axis::R, Axis::S];

    /// Unit step between consecutive cells of a run on this axis.
    pub fn step(self) -> AxialCoord {
        match self {
            Axis::Q => AxialCoord::new(0, 1),
            Axis::R => AxialCoord::new(1, 0),
            Axis::S => AxialCoord::new(1, -1),
        }
    }

    fn component(self, c: AxialCoord) -> i32 {
        match self {
            Axis::Q => c.q,
            Axis::R => c.r,
            Axis::S => c.s(),
        }
    }
}

/// A maximal collinear run of grid cells. Its length is fixed by geometry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Line {
    /// Position in the grid's line partition.
    pub id: usize,
    pub axis: Axis,
    /// Value of the constant cube component along this run.
    pub offset: i32,
    pub cells: Vec<AxialCoord>,
}

impl Line {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: AxialCoord) -> bool {
        self.cells.contains(&coord)
    }
}

/// A board cell as seen through a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HexCell {
    pub coord: AxialCoord,
    pub owner: Option<CellColor>,
}

impl HexCell {
    pub fn is_occupied(&self) -> bool {
        self.owner.is_some()
    }
}

#[derive(Debug)]
struct Geometry {
    radius: i32,
    /// Cells in enumeration order: q ascending, then r ascending.
    cells: Vec<AxialCoord>,
    /// Dense (2R+1)² lookup from coordinate to cell index.
    slots: Vec<Option<usize>>,
    lines: Vec<Line>,
}

impl Geometry {
    fn build(radius: i32) -> Self {
        let side = (2 * radius + 1) as usize;
        let mut cells = Vec::with_capacity((3 * radius * radius + 3 * radius + 1) as usize);
        let mut slots = vec![None; side * side];

        for q in -radius..=radius {
            let r_min = (-radius).max(-q - radius);
            let r_max = radius.min(-q + radius);
            for r in r_min..=r_max {
                let slot = (q + radius) as usize * side + (r + radius) as usize;
                slots[slot] = Some(cells.len());
                cells.push(AxialCoord::new(q, r));
            }
        }

        let mut lines = Vec::with_capacity(3 * side);
        for axis in Axis::ALL {
            for offset in -radius..=radius {
                let run: Vec<AxialCoord> = cells
                    .iter()
                    .copied()
                    .filter(|&c| axis.component(c) == offset)
                    .collect();
                lines.push(Line {
                    id: lines.len(),
                    axis,
                    offset,
                    cells: run,
                });
            }
        }

        Self {
            radius,
            cells,
            slots,
            lines,
        }
    }

    fn index_of(&self, c: AxialCoord) -> Option<usize> {
        let radius = self.radius;
        if c.q.abs() > radius || c.r.abs() > radius || c.s().abs() > radius {
            return None;
        }
        let side = (2 * radius + 1) as usize;
        self.slots[(c.q + radius) as usize * side + (c.r + radius) as usize]
    }
}

/// Immutable board snapshot.
#[derive(Debug, Clone)]
pub struct HexGrid {
    geometry: Arc<Geometry>,
    occupancy: Vec<Option<CellColor>>,
}

impl HexGrid {
    /// Build an empty board of the given radius (3R² + 3R + 1 cells).
    pub fn new(radius: i32) -> Result<Self, GridError> {
        if radius < 1 {
            return Err(GridError::NonPositiveRadius(radius));
        }
        if radius > MAX_RADIUS {
            return Err(GridError::RadiusTooLarge {
                radius,
                max: MAX_RADIUS,
            });
        }
        let geometry = Arc::new(Geometry::build(radius));
        let occupancy = vec![None; geometry.cells.len()];
        Ok(Self {
            geometry,
            occupancy,
        })
    }

    pub fn radius(&self) -> i32 {
        self.geometry.radius
    }

    pub fn cell_count(&self) -> usize {
        self.geometry.cells.len()
    }

    /// All coordinates in enumeration order.
    pub fn coords(&self) -> &[AxialCoord] {
        &self.geometry.cells
    }

    pub fn contains(&self, coord: AxialCoord) -> bool {
        self.geometry.index_of(coord).is_some()
    }

    pub fn get_cell(&self, coord: AxialCoord) -> Option<HexCell> {
        self.geometry.index_of(coord).map(|i| HexCell {
            coord,
            owner: self.occupancy[i],
        })
    }

    /// False for out-of-range coordinates.
    pub fn is_occupied(&self, coord: AxialCoord) -> bool {
        self.geometry
            .index_of(coord)
            .is_some_and(|i| self.occupancy[i].is_some())
    }

    /// True iff the coordinate is on the board and empty.
    pub fn is_free(&self, coord: AxialCoord) -> bool {
        self.geometry
            .index_of(coord)
            .is_some_and(|i| self.occupancy[i].is_none())
    }

    pub fn cells(&self) -> impl Iterator<Item = HexCell> + '_ {
        self.geometry
            .cells
            .iter()
            .zip(&self.occupancy)
            .map(|(&coord, &owner)| HexCell { coord, owner })
    }

    /// On-board neighbors of `coord`; off-board directions are omitted.
    pub fn neighbors(&self, coord: AxialCoord) -> Vec<HexCell> {
        coord
            .neighbors()
            .into_iter()
            .filter_map(|n| self.get_cell(n))
            .collect()
    }

    /// The static axis-line partition, computed at construction.
    pub fn axis_lines(&self) -> &[Line] {
        &self.geometry.lines
    }

    pub fn min_line_length(&self) -> usize {
        (self.radius() + 1) as usize
    }

    pub fn max_line_length(&self) -> usize {
        (2 * self.radius() + 1) as usize
    }

    pub fn occupied_count(&self) -> usize {
        self.occupancy.iter().filter(|o| o.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy.iter().all(|o| o.is_none())
    }

    /// New snapshot with `coords` marked occupied by `color`.
    /// Off-board coordinates are ignored.
    pub fn with_occupied(&self, coords: &[AxialCoord], color: CellColor) -> HexGrid {
        self.with_owner(coords, Some(color))
    }

    /// New snapshot with `coords` emptied. Off-board coordinates are ignored.
    pub fn with_cleared(&self, coords: &[AxialCoord]) -> HexGrid {
        self.with_owner(coords, None)
    }

    fn with_owner(&self, coords: &[AxialCoord], owner: Option<CellColor>) -> HexGrid {
        let mut occupancy = self.occupancy.clone();
        for &c in coords {
            if let Some(i) = self.geometry.index_of(c) {
                occupancy[i] = owner;
            }
        }
        HexGrid {
            geometry: Arc::clone(&self.geometry),
            occupancy,
        }
    }

    /// Whether two snapshots share the same immutable geometry.
    pub fn shares_geometry(&self, other: &HexGrid) -> bool {
        Arc::ptr_eq(&self.geometry, &other.geometry)
    }
}

impl PartialEq for HexGrid {
    fn eq(&self, other: &Self) -> bool {
        self.radius() == other.radius() && self.occupancy == other.occupancy
    }
}

impl Eq for HexGrid {}

#[derive(Serialize)]
struct GridView {
    radius: i32,
    occupied: Vec<HexCell>,
}

impl Serialize for HexGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GridView {
            radius: self.radius(),
            occupied: self.cells().filter(HexCell::is_occupied).collect(),
        }
        .serialize(serializer)
    }
}
