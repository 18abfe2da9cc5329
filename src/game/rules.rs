//! RuleEngine: the pure state transition for a hexfall session.
//!
//! A placement runs: validate → occupy → detect lines → clear → score →
//! replenish → terminal check. Each step works on new values; the input
//! state is never modified. Events come back in the order they happened.

use super::figures::{Figure, NUM_ROTATIONS};
use super::generator::FigureSource;
use super::grid::{HexGrid, Line};
use super::hex::AxialCoord;
use super::lines::{cleared_cells, detect_lines};
use super::placement::{fits_in_any_rotation, get_valid_placements, is_valid_placement};
use super::scoring::{ComboMultiplier, ScoreEngine, ScoreRules};
use super::types::*;
use crate::error::RuleError;

/// What a placement would do, computed without changing any state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementPreview {
    pub figure_id: FigureId,
    pub anchor: AxialCoord,
    pub cells: Vec<AxialCoord>,
    pub placement_points: u64,
    pub lines: Vec<Line>,
    pub combo: ComboMultiplier,
    pub line_points: u64,
}

impl PlacementPreview {
    pub fn score_delta(&self) -> u64 {
        self.placement_points + self.line_points
    }
}

#[derive(Debug, Clone)]
pub struct RuleEngine {
    scoring: ScoreEngine,
}

impl RuleEngine {
    pub fn new(scoring: ScoreEngine) -> Self {
        Self { scoring }
    }

    /// Engine with default score rules sized to `grid`.
    pub fn for_grid(grid: &HexGrid) -> Self {
        Self::new(ScoreEngine::for_grid(ScoreRules::default(), grid))
    }

    pub fn scoring(&self) -> &ScoreEngine {
        &self.scoring
    }

    /// Deal the initial figures on `grid`. The events carry `GameOver` if
    /// nothing dealt fits.
    pub fn start_game(&self, grid: HexGrid, source: &mut dyn FigureSource) -> Transition {
        self.deal(&GameState::new(grid), source)
    }

    /// Fresh state on `grid` with the initial figures dealt.
    pub fn new_game(&self, grid: HexGrid, source: &mut dyn FigureSource) -> GameState {
        self.start_game(grid, source).state
    }

    pub fn apply_action(
        &self,
        state: &GameState,
        action: &PlayerAction,
        source: &mut dyn FigureSource,
    ) -> Result<Transition, RuleError> {
        match *action {
            PlayerAction::GenerateInitialFigures => Ok(self.deal(state, source)),
            PlayerAction::SelectFigure { figure_id } => {
                resolve_figure(state, figure_id)?;
                if state.terminal {
                    return Ok(Transition::rejected(state, RejectReason::GameOver));
                }
                Ok(Transition::unchanged(state))
            }
            PlayerAction::RotateFigure { figure_id, steps } => {
                self.rotate(state, figure_id, steps)
            }
            PlayerAction::PlaceFigure { figure_id, anchor } => {
                self.place(state, figure_id, anchor, source)
            }
        }
    }

    /// Score and lines a placement would produce; None if it is illegal.
    pub fn preview_placement(
        &self,
        state: &GameState,
        figure_id: FigureId,
        anchor: AxialCoord,
    ) -> Result<Option<PlacementPreview>, RuleError> {
        let figure = resolve_figure(state, figure_id)?;
        if state.terminal || !is_valid_placement(&state.grid, figure, anchor) {
            return Ok(None);
        }
        let cells = figure.placed_at(anchor);
        let lines = detect_lines(&state.grid.with_occupied(&cells, figure.color));
        let combo = self.scoring.combo_multiplier(lines.len());
        let line_points = self.scoring.calculate_line_score(&lines, combo);
        Ok(Some(PlacementPreview {
            figure_id,
            anchor,
            cells,
            placement_points: self.scoring.placement_score(figure),
            lines,
            combo,
            line_points,
        }))
    }

    /// Every legal rotate-then-place move: figures in active order, then
    /// rotation steps, then anchors in grid order.
    pub fn legal_moves(&self, state: &GameState) -> Vec<Move> {
        if state.terminal {
            return Vec::new();
        }
        let mut moves = Vec::new();
        for figure in &state.figures {
            for steps in 0..NUM_ROTATIONS {
                let rotated = figure.rotated(steps);
                moves.extend(
                    get_valid_placements(&state.grid, &rotated)
                        .into_iter()
                        .map(|anchor| Move {
                            figure_id: figure.id,
                            rotation_steps: steps,
                            anchor,
                        }),
                );
            }
        }
        moves
    }

    fn deal(&self, state: &GameState, source: &mut dyn FigureSource) -> Transition {
        if state.terminal {
            return Transition::rejected(state, RejectReason::GameOver);
        }
        if state.figures.len() >= ACTIVE_FIGURES {
            return Transition::rejected(state, RejectReason::FiguresAlreadyDealt);
        }

        let figures = replenish(state.figures.clone(), source);
        tracing::debug!(
            figures = ?figures.iter().map(|f| f.shape().name()).collect::<Vec<_>>(),
            "dealt figures"
        );
        let mut events = Vec::new();
        let terminal = !any_figure_fits(&state.grid, &figures);
        if terminal {
            events.push(game_over_event(state.score.total));
        }

        Transition {
            state: GameState {
                grid: state.grid.clone(),
                figures,
                score: state.score.clone(),
                terminal,
            },
            events,
            outcome: Outcome::Accepted,
        }
    }

    fn rotate(&self, state: &GameState, figure_id: FigureId, steps: u8) -> Result<Transition, RuleError> {
        resolve_figure(state, figure_id)?;
        if state.terminal {
            return Ok(Transition::rejected(state, RejectReason::GameOver));
        }
        let figures = state
            .figures
            .iter()
            .map(|f| if f.id == figure_id { f.rotated(steps) } else { f.clone() })
            .collect();
        Ok(Transition {
            state: GameState {
                figures,
                ..state.clone()
            },
            events: Vec::new(),
            outcome: Outcome::Accepted,
        })
    }

    fn place(
        &self,
        state: &GameState,
        figure_id: FigureId,
        anchor: AxialCoord,
        source: &mut dyn FigureSource,
    ) -> Result<Transition, RuleError> {
        let figure = resolve_figure(state, figure_id)?;
        if state.terminal {
            return Ok(Transition::rejected(state, RejectReason::GameOver));
        }
        if !is_valid_placement(&state.grid, figure, anchor) {
            tracing::trace!(figure = %figure_id, %anchor, "placement rejected");
            return Ok(Transition::rejected(state, RejectReason::IllegalPlacement));
        }

        let cells = figure.placed_at(anchor);
        let mut grid = state.grid.with_occupied(&cells, figure.color);
        let remaining: Vec<Figure> = state
            .figures
            .iter()
            .filter(|f| f.id != figure_id)
            .cloned()
            .collect();
        let score = self.scoring.score_placement(&state.score, figure);
        let mut events = vec![GameEvent::FigurePlaced {
            figure: figure.clone(),
            anchor,
        }];

        let lines = detect_lines(&grid);
        let (score, clear) = self.scoring.score_lines(&score, &lines);
        if !lines.is_empty() {
            let cleared = cleared_cells(&lines);
            tracing::debug!(
                lines = lines.len(),
                cells = cleared.len(),
                combo = clear.combo.as_f64(),
                delta = clear.delta,
                "lines cleared"
            );
            grid = grid.with_cleared(&cleared);
            events.push(GameEvent::LineCleared {
                lines,
                combo_multiplier: clear.combo,
                score_delta: clear.delta,
            });
        }

        let figures = replenish(remaining, source);
        let terminal = !any_figure_fits(&grid, &figures);
        if terminal {
            tracing::info!(
                final_score = score.total,
                placements = score.placements,
                "game over"
            );
            events.push(game_over_event(score.total));
        }

        Ok(Transition {
            state: GameState {
                grid,
                figures,
                score,
                terminal,
            },
            events,
            outcome: Outcome::Accepted,
        })
    }
}

fn resolve_figure(state: &GameState, figure_id: FigureId) -> Result<&Figure, RuleError> {
    state
        .figure(figure_id)
        .ok_or(RuleError::UnknownFigure(figure_id))
}

fn replenish(mut figures: Vec<Figure>, source: &mut dyn FigureSource) -> Vec<Figure> {
    while figures.len() < ACTIVE_FIGURES {
        figures.push(source.generate_figure());
    }
    figures
}

/// False iff no figure has a legal anchor in any rotation.
fn any_figure_fits(grid: &HexGrid, figures: &[Figure]) -> bool {
    figures.iter().any(|f| fits_in_any_rotation(grid, f))
}

fn game_over_event(final_score: u64) -> GameEvent {
    GameEvent::GameOver { final_score }
}
