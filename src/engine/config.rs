//! Engine configuration: board size, score rules and figure weights.
//! Loaded from TOML at runtime by the CLIs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::figures::{catalog_shape, CatalogEntry, CATALOG};
use crate::game::generator::WeightedFigureGenerator;
use crate::game::grid::{HexGrid, DEFAULT_RADIUS, MAX_RADIUS};
use crate::game::rules::RuleEngine;
use crate::game::scoring::{ScoreEngine, ScoreRules};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub radius: i32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
        }
    }
}

/// Weight override for a catalog shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureWeight {
    pub name: String,
    pub weight: u32,
}

/// Top-level TOML file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub board: BoardConfig,
    pub scoring: ScoreRules,
    /// Shapes to deal and their weights. Empty means the whole catalog.
    pub figures: Vec<FigureWeight>,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_RADIUS).contains(&self.board.radius) {
            return Err(ConfigError::Invalid(format!(
                "board.radius must be between 1 and {MAX_RADIUS}, got {}",
                self.board.radius
            )));
        }
        if self.scoring.combo_half_steps.is_empty() {
            return Err(ConfigError::Invalid("scoring.combo_half_steps is empty".into()));
        }
        for fw in &self.figures {
            if catalog_shape(&fw.name).is_none() {
                return Err(ConfigError::Invalid(format!("unknown figure '{}'", fw.name)));
            }
        }
        Ok(())
    }

    pub fn build_grid(&self) -> Result<HexGrid, ConfigError> {
        HexGrid::new(self.board.radius).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn build_engine(&self, grid: &HexGrid) -> RuleEngine {
        RuleEngine::new(ScoreEngine::for_grid(self.scoring.clone(), grid))
    }

    /// Catalog entries selected by `figures`, with their weights.
    pub fn figure_entries(&self) -> Result<Vec<CatalogEntry>, ConfigError> {
        if self.figures.is_empty() {
            return Ok(CATALOG.to_vec());
        }
        self.figures
            .iter()
            .map(|fw| {
                catalog_shape(&fw.name)
                    .map(|shape| CatalogEntry {
                        shape,
                        weight: fw.weight,
                    })
                    .ok_or_else(|| ConfigError::Invalid(format!("unknown figure '{}'", fw.name)))
            })
            .collect()
    }

    pub fn figure_generator(&self, seed: u64) -> Result<WeightedFigureGenerator, ConfigError> {
        WeightedFigureGenerator::new(&self.figure_entries()?, seed)
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: EngineConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Try well-known paths, returning defaults if none loads.
pub fn load_default_config() -> EngineConfig {
    let candidates = [
        "hexfall.toml",
        "../hexfall.toml",
        "/etc/hexfall/hexfall.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_config(p) {
                Ok(config) => {
                    tracing::info!(path = %p.display(), radius = config.board.radius, "loaded engine config");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load engine config");
                }
            }
        }
    }
    tracing::info!("no hexfall.toml found, using built-in defaults");
    EngineConfig::default()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_defaults() {
        let c = EngineConfig::default();
        assert_eq!(c.board.radius, 4);
        assert_eq!(c.scoring.points_per_cell, 10);
        assert!(c.validate().is_ok());
        assert_eq!(c.figure_entries().unwrap().len(), CATALOG.len());
    }

    #[test]
    fn test_load_partial_file() {
        let f = write_config(
            r#"
[board]
radius = 3

[scoring]
base_line_points = 50

[[figures]]
name = "mono"
weight = 1

[[figures]]
name = "tri_line"
weight = 4
"#,
        );
        let c = load_config(f.path()).unwrap();
        assert_eq!(c.board.radius, 3);
        assert_eq!(c.scoring.base_line_points, 50);
        assert_eq!(c.scoring.points_per_cell, 10);
        let entries = c.figure_entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].weight, 4);
        assert_eq!(c.build_grid().unwrap().cell_count(), 37);
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let f = write_config("[board]\nradius = 0\n");
        assert!(matches!(load_config(f.path()), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_oversized_radius_rejected() {
        let f = write_config("[board]\nradius = 30000\n");
        assert!(matches!(load_config(f.path()), Err(ConfigError::Invalid(_))));
        let mut c = EngineConfig::default();
        c.board.radius = MAX_RADIUS;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_unknown_figure_rejected() {
        let f = write_config("[[figures]]\nname = \"pentagon\"\nweight = 1\n");
        assert!(matches!(load_config(f.path()), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_error() {
        let f = write_config("[board\nradius = ");
        assert!(matches!(load_config(f.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/hexfall.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_engine_uses_scoring_rules() {
        let mut c = EngineConfig::default();
        c.scoring.points_per_cell = 3;
        let grid = c.build_grid().unwrap();
        let engine = c.build_engine(&grid);
        assert_eq!(engine.scoring().rules().points_per_cell, 3);
    }
}
