//! Sequential session driver: owns the current snapshot and the figure
//! source, applies actions strictly in submission order and keeps the
//! ordered event log.

use crate::error::RuleError;
use crate::game::generator::FigureSource;
use crate::game::grid::HexGrid;
use crate::game::rules::RuleEngine;
use crate::game::types::{GameEvent, GameState, Outcome, PlayerAction};

pub struct Session<S: FigureSource> {
    engine: RuleEngine,
    state: GameState,
    source: S,
    log: Vec<GameEvent>,
    accepted: usize,
}

impl<S: FigureSource> Session<S> {
    /// Start a game on `grid` and deal the initial figures.
    pub fn start(engine: RuleEngine, grid: HexGrid, mut source: S) -> Self {
        let dealt = engine.start_game(grid, &mut source);
        Self {
            engine,
            state: dealt.state,
            source,
            log: dealt.events,
            accepted: 0,
        }
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Every event emitted so far, oldest first.
    pub fn events(&self) -> &[GameEvent] {
        &self.log
    }

    /// Number of accepted actions.
    pub fn accepted_actions(&self) -> usize {
        self.accepted
    }

    pub fn is_over(&self) -> bool {
        self.state.terminal
    }

    /// Apply one action. On acceptance the snapshot is replaced and the
    /// new events are appended to the log and returned.
    pub fn apply(&mut self, action: &PlayerAction) -> Result<(Outcome, &[GameEvent]), RuleError> {
        let transition = self
            .engine
            .apply_action(&self.state, action, &mut self.source)?;
        let start = self.log.len();
        if transition.outcome.is_accepted() {
            self.accepted += 1;
            self.state = transition.state;
            self.log.extend(transition.events);
        }
        Ok((transition.outcome, &self.log[start..]))
    }

    /// Apply actions in order, stopping at the first contract violation.
    pub fn apply_all<'a>(
        &mut self,
        actions: impl IntoIterator<Item = &'a PlayerAction>,
    ) -> Result<Vec<Outcome>, RuleError> {
        actions
            .into_iter()
            .map(|a| self.apply(a).map(|(outcome, _)| outcome))
            .collect()
    }

    pub fn into_state(self) -> GameState {
        self.state
    }
}
