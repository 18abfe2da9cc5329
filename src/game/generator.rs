//! Figure generation. The rule engine only needs the `FigureSource`
//! capability; selection policy lives here.

use std::sync::Arc;

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ConfigError;

use super::figures::{CatalogEntry, Figure, FigureShape, CATALOG, NUM_ROTATIONS};
use super::grid::CellColor;
use super::types::FigureId;

pub const PALETTE_SIZE: CellColor = 6;

/// Produces fresh figures with unique ids.
pub trait FigureSource {
    fn generate_figure(&mut self) -> Figure;
}

/// Weighted random selection over a set of shapes, with a random
/// rotation and color. Deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct WeightedFigureGenerator {
    rng: StdRng,
    shapes: Vec<Arc<FigureShape>>,
    dist: WeightedIndex<u32>,
    next_id: u32,
}

impl WeightedFigureGenerator {
    pub fn new(entries: &[CatalogEntry], seed: u64) -> Result<Self, ConfigError> {
        let dist = WeightedIndex::new(entries.iter().map(|e| e.weight))
            .map_err(|e| ConfigError::Invalid(format!("figure weights: {e}")))?;
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            shapes: entries.iter().map(|e| Arc::clone(&e.shape)).collect(),
            dist,
            next_id: 1,
        })
    }

    /// Generator over the built-in catalog with its default weights.
    pub fn from_catalog(seed: u64) -> Result<Self, ConfigError> {
        Self::new(&CATALOG, seed)
    }
}

impl FigureSource for WeightedFigureGenerator {
    fn generate_figure(&mut self) -> Figure {
        let shape = Arc::clone(&self.shapes[self.dist.sample(&mut self.rng)]);
        let rotation = self.rng.gen_range(0..NUM_ROTATIONS);
        let color = self.rng.gen_range(0..PALETTE_SIZE);
        let id = FigureId(self.next_id);
        self.next_id += 1;
        Figure::new(id, shape, rotation, color)
    }
}

/// Deals the given shapes in order, repeating, at rotation 0.
#[derive(Debug, Clone)]
pub struct CyclingFigureSource {
    shapes: Vec<Arc<FigureShape>>,
    cursor: usize,
    next_id: u32,
}

impl CyclingFigureSource {
    pub fn new(shapes: Vec<Arc<FigureShape>>) -> Result<Self, ConfigError> {
        if shapes.is_empty() {
            return Err(ConfigError::Invalid("no figure shapes to cycle through".into()));
        }
        Ok(Self {
            shapes,
            cursor: 0,
            next_id: 1,
        })
    }
}

impl FigureSource for CyclingFigureSource {
    fn generate_figure(&mut self) -> Figure {
        let shape = Arc::clone(&self.shapes[self.cursor % self.shapes.len()]);
        let color = (self.cursor % PALETTE_SIZE as usize) as CellColor;
        self.cursor += 1;
        let id = FigureId(self.next_id);
        self.next_id += 1;
        Figure::new(id, shape, 0, color)
    }
}
