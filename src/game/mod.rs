//! Hexfall rules core: board geometry, placement, line detection,
//! scoring and the state-transition engine.

pub mod figures;
pub mod generator;
pub mod grid;
pub mod hex;
pub mod lines;
pub mod placement;
pub mod rules;
pub mod scoring;
pub mod types;

pub use figures::Figure;
pub use grid::{HexGrid, Line, DEFAULT_RADIUS};
pub use hex::AxialCoord;
pub use rules::RuleEngine;
pub use types::{FigureId, GameEvent, GameState, Outcome, PlayerAction, Transition};
