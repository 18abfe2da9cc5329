//! Error types for contract violations.
//!
//! Ordinary gameplay outcomes (an illegal placement, an action after game
//! over) are not errors; they are reported through `Outcome::Rejected`.

use std::path::PathBuf;

use thiserror::Error;

use crate::game::hex::AxialCoord;
use crate::game::types::FigureId;

/// Board construction errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Radius must be at least 1
    #[error("Grid radius must be positive, got {0}")]
    NonPositiveRadius(i32),

    #[error("Grid radius {radius} exceeds the maximum of {max}")]
    RadiusTooLarge { radius: i32, max: i32 },
}

/// Figure construction errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FigureError {
    #[error("Figure must have at least one cell")]
    Empty,

    #[error("Figure has {0} cells, at most 4 are allowed")]
    TooManyCells(usize),

    #[error("Figure offset {0} appears more than once")]
    DuplicateOffset(AxialCoord),
}

/// Rule engine contract violations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The referenced figure is not in the active set
    #[error("Figure {0} is not in the active set")]
    UnknownFigure(FigureId),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
