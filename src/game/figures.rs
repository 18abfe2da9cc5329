//! Polyhex figures (1 to 4 cells) and their 6 rotations.
//!
//! A shape stores its base offsets once together with the 6 precomputed
//! 60° rotations. Figures reference a shared shape and carry a rotation
//! index; rotating a figure yields a new value and never touches the shape.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::FigureError;

use super::grid::CellColor;
use super::hex::AxialCoord;
use super::types::FigureId;

pub const MAX_FIGURE_CELLS: usize = 4;
pub const NUM_ROTATIONS: u8 = 6;

/// Base offsets plus all 6 rotations of a polyhex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureShape {
    name: String,
    rotations: [Vec<AxialCoord>; 6],
}

impl FigureShape {
    pub fn new(name: impl Into<String>, base: &[AxialCoord]) -> Result<Self, FigureError> {
        if base.is_empty() {
            return Err(FigureError::Empty);
        }
        if base.len() > MAX_FIGURE_CELLS {
            return Err(FigureError::TooManyCells(base.len()));
        }
        let mut seen = HashSet::new();
        for &c in base {
            if !seen.insert(c) {
                return Err(FigureError::DuplicateOffset(c));
            }
        }

        let rotations = std::array::from_fn(|steps| {
            base.iter().map(|c| c.rotate_cw_by(steps as u8)).collect()
        });

        Ok(Self {
            name: name.into(),
            rotations,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> &[AxialCoord] {
        &self.rotations[0]
    }

    pub fn cell_count(&self) -> usize {
        self.rotations[0].len()
    }

    pub fn rotation(&self, index: u8) -> &[AxialCoord] {
        &self.rotations[(index % NUM_ROTATIONS) as usize]
    }
}

/// A figure in play: a shared shape, the active rotation and a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    pub id: FigureId,
    shape: Arc<FigureShape>,
    rotation: u8,
    pub color: CellColor,
}

impl Figure {
    pub fn new(id: FigureId, shape: Arc<FigureShape>, rotation: u8, color: CellColor) -> Self {
        Self {
            id,
            shape,
            rotation: rotation % NUM_ROTATIONS,
            color,
        }
    }

    /// Build a figure from raw offsets, validating them.
    pub fn from_offsets(
        id: FigureId,
        offsets: &[AxialCoord],
        color: CellColor,
    ) -> Result<Self, FigureError> {
        let shape = FigureShape::new("custom", offsets)?;
        Ok(Self::new(id, Arc::new(shape), 0, color))
    }

    pub fn shape(&self) -> &FigureShape {
        &self.shape
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Offsets relative to the anchor in the active rotation.
    pub fn cells(&self) -> &[AxialCoord] {
        self.shape.rotation(self.rotation)
    }

    pub fn cell_count(&self) -> usize {
        self.shape.cell_count()
    }

    /// Absolute target cells when placed at `anchor`.
    pub fn placed_at(&self, anchor: AxialCoord) -> Vec<AxialCoord> {
        self.cells().iter().map(|&o| anchor + o).collect()
    }

    /// This figure rotated clockwise by `steps` × 60°.
    pub fn rotated(&self, steps: u8) -> Figure {
        Figure {
            id: self.id,
            shape: Arc::clone(&self.shape),
            rotation: (self.rotation + steps % NUM_ROTATIONS) % NUM_ROTATIONS,
            color: self.color,
        }
    }

    /// The same figure at rotation `index`.
    pub fn with_rotation(&self, index: u8) -> Figure {
        Figure::new(self.id, Arc::clone(&self.shape), index, self.color)
    }
}

impl Serialize for Figure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Figure", 5)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("shape", self.shape.name())?;
        s.serialize_field("rotation", &self.rotation)?;
        s.serialize_field("color", &self.color)?;
        s.serialize_field("cells", self.cells())?;
        s.end()
    }
}

/// A catalog shape and its default selection weight.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub shape: Arc<FigureShape>,
    pub weight: u32,
}

const fn c(q: i32, r: i32) -> AxialCoord {
    AxialCoord::new(q, r)
}

const CATALOG_SHAPES: [(&str, &[AxialCoord], u32); 9] = [
    ("mono", &[c(0, 0)], 6),
    ("duo", &[c(0, 0), c(1, 0)], 10),
    ("tri_line", &[c(0, 0), c(1, 0), c(2, 0)], 10),
    ("tri_triangle", &[c(0, 0), c(1, 0), c(0, 1)], 8),
    ("tri_bend", &[c(0, 0), c(1, 0), c(1, 1)], 8),
    ("tetra_line", &[c(0, 0), c(1, 0), c(2, 0), c(3, 0)], 5),
    ("tetra_rhombus", &[c(0, 0), c(1, 0), c(0, 1), c(1, 1)], 6),
    ("tetra_wave", &[c(0, 0), c(1, 0), c(1, 1), c(2, 1)], 5),
    ("tetra_arch", &[c(0, 0), c(1, 0), c(2, -1), c(3, -1)], 4),
];

/// Built-in polyhex catalog.
pub static CATALOG: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    CATALOG_SHAPES
        .iter()
        .filter_map(|&(name, cells, weight)| {
            FigureShape::new(name, cells).ok().map(|shape| CatalogEntry {
                shape: Arc::new(shape),
                weight,
            })
        })
        .collect()
});

pub fn catalog_shape(name: &str) -> Option<Arc<FigureShape>> {
    CATALOG
        .iter()
        .find(|e| e.shape.name() == name)
        .map(|e| Arc::clone(&e.shape))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_connected(cells: &[AxialCoord]) -> bool {
        let set: HashSet<_> = cells.iter().copied().collect();
        let mut stack = vec![cells[0]];
        let mut seen = HashSet::new();
        while let Some(cur) = stack.pop() {
            if !seen.insert(cur) {
                continue;
            }
            for n in cur.neighbors() {
                if set.contains(&n) {
                    stack.push(n);
                }
            }
        }
        seen.len() == set.len()
    }

    #[test]
    fn test_catalog_complete() {
        assert_eq!(CATALOG.len(), CATALOG_SHAPES.len());
    }

    #[test]
    fn test_catalog_shapes_connected_and_small() {
        for entry in CATALOG.iter() {
            let n = entry.shape.cell_count();
            assert!((1..=MAX_FIGURE_CELLS).contains(&n), "{} has {n} cells", entry.shape.name());
            for rot in 0..NUM_ROTATIONS {
                assert!(is_connected(entry.shape.rotation(rot)), "{} rot {rot}", entry.shape.name());
            }
        }
    }

    #[test]
    fn test_shape_rejects_empty() {
        assert_eq!(FigureShape::new("x", &[]).unwrap_err(), FigureError::Empty);
    }

    #[test]
    fn test_shape_rejects_five_cells() {
        let cells = [c(0, 0), c(1, 0), c(2, 0), c(3, 0), c(4, 0)];
        assert_eq!(FigureShape::new("x", &cells).unwrap_err(), FigureError::TooManyCells(5));
    }

    #[test]
    fn test_shape_rejects_duplicates() {
        let cells = [c(0, 0), c(1, 0), c(0, 0)];
        assert_eq!(
            FigureShape::new("x", &cells).unwrap_err(),
            FigureError::DuplicateOffset(c(0, 0))
        );
    }

    #[test]
    fn test_rotations_preserve_distinct_offsets() {
        for entry in CATALOG.iter() {
            for rot in 0..NUM_ROTATIONS {
                let cells = entry.shape.rotation(rot);
                let set: HashSet<_> = cells.iter().collect();
                assert_eq!(set.len(), cells.len());
            }
        }
    }

    #[test]
    fn test_rotated_does_not_mutate_original() {
        let shape = catalog_shape("tri_line").unwrap();
        let f = Figure::new(FigureId(1), shape, 0, 2);
        let g = f.rotated(1);
        assert_eq!(f.rotation(), 0);
        assert_eq!(g.rotation(), 1);
        assert_eq!(f.cells(), &[c(0, 0), c(1, 0), c(2, 0)]);
        assert_eq!(g.cells(), &[c(0, 0), c(0, 1), c(0, 2)]);
        assert_eq!(f.rotated(6), f);
        assert_eq!(f.rotated(4).rotated(2), f);
    }

    #[test]
    fn test_rotation_index_wraps() {
        let shape = catalog_shape("duo").unwrap();
        let f = Figure::new(FigureId(1), shape, 8, 0);
        assert_eq!(f.rotation(), 2);
        assert_eq!(f.rotated(5).rotation(), 1);
        assert_eq!(f.with_rotation(13).rotation(), 1);
    }

    #[test]
    fn test_placed_at() {
        let f = Figure::from_offsets(FigureId(7), &[c(0, 0), c(1, 0)], 1).unwrap();
        assert_eq!(f.placed_at(c(2, -1)), vec![c(2, -1), c(3, -1)]);
    }

    #[test]
    fn test_serialize_shows_active_cells() {
        let f = Figure::new(FigureId(3), catalog_shape("duo").unwrap(), 1, 4);
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["shape"], "duo");
        assert_eq!(json["rotation"], 1);
        assert_eq!(json["cells"][1]["q"], 0);
        assert_eq!(json["cells"][1]["r"], 1);
    }
}
