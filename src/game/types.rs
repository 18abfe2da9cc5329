//! Domain types for a hexfall session: state snapshots, actions, events.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::figures::{Figure, NUM_ROTATIONS};
use super::grid::{HexGrid, Line};
use super::hex::AxialCoord;
use super::scoring::{ComboMultiplier, ScoreState};

/// Number of figures offered to the player at any time.
pub const ACTIVE_FIGURES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FigureId(pub u32);

impl fmt::Display for FigureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Full game snapshot. Every accepted action produces a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    pub grid: HexGrid,
    pub figures: Vec<Figure>,
    pub score: ScoreState,
    pub terminal: bool,
}

impl GameState {
    /// Empty board with no figures dealt yet.
    pub fn new(grid: HexGrid) -> Self {
        Self {
            grid,
            figures: Vec::new(),
            score: ScoreState::default(),
            terminal: false,
        }
    }

    pub fn figure(&self, id: FigureId) -> Option<&Figure> {
        self.figures.iter().find(|f| f.id == id)
    }

    pub fn final_score(&self) -> u64 {
        self.score.total
    }
}

/// Inbound actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "snake_case")]
pub enum PlayerAction {
    GenerateInitialFigures,
    /// Presentation-only; leaves the state untouched.
    SelectFigure { figure_id: FigureId },
    RotateFigure { figure_id: FigureId, steps: u8 },
    PlaceFigure { figure_id: FigureId, anchor: AxialCoord },
}

/// Outbound events, in the order they happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum GameEvent {
    FigurePlaced {
        figure: Figure,
        anchor: AxialCoord,
    },
    LineCleared {
        lines: Vec<Line>,
        combo_multiplier: ComboMultiplier,
        score_delta: u64,
    },
    GameOver {
        final_score: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// A target cell is off the board or occupied.
    IllegalPlacement,
    /// The game already ended.
    GameOver,
    /// Figures were already dealt for this game.
    FiguresAlreadyDealt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    Accepted,
    Rejected(RejectReason),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted)
    }
}

/// A legal move: rotate an active figure by `rotation_steps` from its
/// current rotation, then place it at `anchor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    pub figure_id: FigureId,
    pub rotation_steps: u8,
    pub anchor: AxialCoord,
}

impl Move {
    /// The actions that carry out this move, in order.
    pub fn to_actions(self) -> Vec<PlayerAction> {
        let mut actions = Vec::with_capacity(2);
        if self.rotation_steps % NUM_ROTATIONS != 0 {
            actions.push(PlayerAction::RotateFigure {
                figure_id: self.figure_id,
                steps: self.rotation_steps,
            });
        }
        actions.push(PlayerAction::PlaceFigure {
            figure_id: self.figure_id,
            anchor: self.anchor,
        });
        actions
    }
}

/// Result of applying one action.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: GameState,
    pub events: Vec<GameEvent>,
    pub outcome: Outcome,
}

impl Transition {
    pub(crate) fn rejected(state: &GameState, reason: RejectReason) -> Self {
        Self {
            state: state.clone(),
            events: Vec::new(),
            outcome: Outcome::Rejected(reason),
        }
    }

    pub(crate) fn unchanged(state: &GameState) -> Self {
        Self {
            state: state.clone(),
            events: Vec::new(),
            outcome: Outcome::Accepted,
        }
    }

    pub fn game_over(&self) -> bool {
        self.state.terminal
    }
}
