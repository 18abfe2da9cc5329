//! Scoring: placement points, line values with length bonus, and the
//! combo multiplier keyed by how many lines cleared in one placement.
//!
//! Multipliers are kept as integer half-steps so ×1.5 stays exact; line
//! score is floored after multiplying.

use serde::{Deserialize, Serialize, Serializer};

use super::figures::Figure;
use super::grid::{HexGrid, Line};

/// Combo multiplier in half-steps: 2 = ×1, 3 = ×1.5, 10 = ×5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComboMultiplier(u32);

impl ComboMultiplier {
    pub const BASELINE: ComboMultiplier = ComboMultiplier(2);

    pub fn from_half_steps(half_steps: u32) -> Self {
        Self(half_steps)
    }

    pub fn half_steps(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 2.0
    }

    /// `points × multiplier`, floored.
    pub fn apply(self, points: u64) -> u64 {
        points * self.0 as u64 / 2
    }
}

impl Default for ComboMultiplier {
    fn default() -> Self {
        Self::BASELINE
    }
}

impl Serialize for ComboMultiplier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Tunable scoring constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRules {
    pub points_per_cell: u64,
    pub base_line_points: u64,
    /// Bonus for a maximum-length line, as a percentage of the base value.
    pub max_length_bonus_percent: u64,
    /// Multiplier half-steps for 1, 2, 3, ... simultaneous lines; counts past
    /// the end clamp to the last entry.
    pub combo_half_steps: Vec<u32>,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            points_per_cell: 10,
            base_line_points: 100,
            max_length_bonus_percent: 100,
            combo_half_steps: vec![2, 3, 4, 6, 10],
        }
    }
}

/// Running score. Only `ScoreEngine` produces new values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreState {
    pub(crate) total: u64,
    pub(crate) combo: ComboMultiplier,
    pub(crate) lines_last_placement: usize,
    pub(crate) placements: u32,
    pub(crate) lines_cleared_total: u32,
}

impl ScoreState {
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn combo(&self) -> ComboMultiplier {
        self.combo
    }

    pub fn lines_last_placement(&self) -> usize {
        self.lines_last_placement
    }

    pub fn placements(&self) -> u32 {
        self.placements
    }

    pub fn lines_cleared_total(&self) -> u32 {
        self.lines_cleared_total
    }
}

/// Score of one line-clear step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClearScore {
    pub combo: ComboMultiplier,
    pub delta: u64,
}

#[derive(Debug, Clone)]
pub struct ScoreEngine {
    rules: ScoreRules,
    min_line_length: usize,
    max_line_length: usize,
}

impl ScoreEngine {
    pub fn new(rules: ScoreRules, min_line_length: usize, max_line_length: usize) -> Self {
        Self {
            rules,
            min_line_length,
            max_line_length,
        }
    }

    /// Engine whose length bonus spans the grid's shortest and longest runs.
    pub fn for_grid(rules: ScoreRules, grid: &HexGrid) -> Self {
        Self::new(rules, grid.min_line_length(), grid.max_line_length())
    }

    pub fn rules(&self) -> &ScoreRules {
        &self.rules
    }

    pub fn placement_score(&self, figure: &Figure) -> u64 {
        self.rules.points_per_cell * figure.cell_count() as u64
    }

    /// Linear from 0 at the shortest run to the full bonus at the longest.
    pub fn length_bonus(&self, length: usize) -> u64 {
        if length <= self.min_line_length || self.max_line_length <= self.min_line_length {
            return 0;
        }
        let span = (self.max_line_length - self.min_line_length) as u64;
        let extra = (length.min(self.max_line_length) - self.min_line_length) as u64;
        self.rules.base_line_points * self.rules.max_length_bonus_percent * extra / span / 100
    }

    pub fn line_value(&self, length: usize) -> u64 {
        self.rules.base_line_points + self.length_bonus(length)
    }

    pub fn combo_multiplier(&self, lines_this_turn: usize) -> ComboMultiplier {
        if lines_this_turn == 0 {
            return ComboMultiplier::BASELINE;
        }
        let table = &self.rules.combo_half_steps;
        match table.get(lines_this_turn.min(table.len()).saturating_sub(1)) {
            Some(&half_steps) => ComboMultiplier(half_steps),
            None => ComboMultiplier::BASELINE,
        }
    }

    pub fn calculate_line_score(&self, lines: &[Line], combo: ComboMultiplier) -> u64 {
        let sum: u64 = lines.iter().map(|l| self.line_value(l.len())).sum();
        combo.apply(sum)
    }

    pub fn score_placement(&self, score: &ScoreState, figure: &Figure) -> ScoreState {
        ScoreState {
            total: score.total + self.placement_score(figure),
            placements: score.placements + 1,
            ..score.clone()
        }
    }

    /// Score a clear of `lines`. Zero lines resets the combo to baseline.
    pub fn score_lines(&self, score: &ScoreState, lines: &[Line]) -> (ScoreState, LineClearScore) {
        let combo = self.combo_multiplier(lines.len());
        let delta = self.calculate_line_score(lines, combo);
        let next = ScoreState {
            total: score.total + delta,
            combo,
            lines_last_placement: lines.len(),
            placements: score.placements,
            lines_cleared_total: score.lines_cleared_total + lines.len() as u32,
        };
        (next, LineClearScore { combo, delta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::{Axis, DEFAULT_RADIUS};
    use crate::game::hex::AxialCoord;
    use crate::game::types::FigureId;

    fn engine() -> ScoreEngine {
        let grid = HexGrid::new(DEFAULT_RADIUS).unwrap();
        ScoreEngine::for_grid(ScoreRules::default(), &grid)
    }

    fn line_of(len: usize) -> Line {
        Line {
            id: 0,
            axis: Axis::R,
            offset: 0,
            cells: (0..len as i32).map(|q| AxialCoord::new(q, 0)).collect(),
        }
    }

    #[test]
    fn test_placement_score_per_cell() {
        let e = engine();
        let four = Figure::from_offsets(
            FigureId(1),
            &[(0, 0).into(), (1, 0).into(), (2, 0).into(), (3, 0).into()],
            0,
        )
        .unwrap();
        let one = Figure::from_offsets(FigureId(2), &[(0, 0).into()], 0).unwrap();
        assert_eq!(e.placement_score(&four), 40);
        assert_eq!(e.placement_score(&one), 10);
    }

    #[test]
    fn test_length_bonus_anchor_points() {
        let e = engine();
        assert_eq!(e.length_bonus(5), 0);
        assert_eq!(e.length_bonus(7), 50);
        assert_eq!(e.length_bonus(9), 100);
    }

    #[test]
    fn test_length_bonus_interpolates_monotonically() {
        let e = engine();
        assert_eq!(e.length_bonus(6), 25);
        assert_eq!(e.length_bonus(8), 75);
        for len in 5..9 {
            assert!(e.length_bonus(len) < e.length_bonus(len + 1));
        }
    }

    #[test]
    fn test_combo_table() {
        let e = engine();
        assert_eq!(e.combo_multiplier(0), ComboMultiplier::BASELINE);
        assert_eq!(e.combo_multiplier(1).as_f64(), 1.0);
        assert_eq!(e.combo_multiplier(2).as_f64(), 1.5);
        assert_eq!(e.combo_multiplier(3).as_f64(), 2.0);
        assert_eq!(e.combo_multiplier(4).as_f64(), 3.0);
        assert_eq!(e.combo_multiplier(5).as_f64(), 5.0);
        assert_eq!(e.combo_multiplier(9).as_f64(), 5.0);
    }

    #[test]
    fn test_line_score_examples() {
        let e = engine();
        let one = [line_of(5)];
        assert_eq!(e.calculate_line_score(&one, e.combo_multiplier(1)), 100);

        let two = [line_of(5), line_of(5)];
        assert_eq!(e.calculate_line_score(&two, e.combo_multiplier(2)), 300);

        let mixed = [line_of(9), line_of(7), line_of(6)];
        // (200 + 150 + 125) × 2
        assert_eq!(e.calculate_line_score(&mixed, e.combo_multiplier(3)), 950);
    }

    #[test]
    fn test_fractional_multiplier_floors() {
        assert_eq!(ComboMultiplier::from_half_steps(3).apply(125), 187);
    }

    #[test]
    fn test_score_lines_updates_state() {
        let e = engine();
        let s = ScoreState::default();
        let (s, clear) = e.score_lines(&s, &[line_of(5), line_of(9)]);
        assert_eq!(clear.delta, 450);
        assert_eq!(s.total(), 450);
        assert_eq!(s.combo().as_f64(), 1.5);
        assert_eq!(s.lines_last_placement(), 2);
        assert_eq!(s.lines_cleared_total(), 2);

        let (s, clear) = e.score_lines(&s, &[]);
        assert_eq!(clear.delta, 0);
        assert_eq!(s.total(), 450);
        assert_eq!(s.combo(), ComboMultiplier::BASELINE);
        assert_eq!(s.lines_last_placement(), 0);
    }

    #[test]
    fn test_score_placement_counts() {
        let e = engine();
        let f = Figure::from_offsets(FigureId(1), &[(0, 0).into(), (1, 0).into()], 0).unwrap();
        let s = e.score_placement(&ScoreState::default(), &f);
        assert_eq!(s.total(), 20);
        assert_eq!(s.placements(), 1);
    }

    #[test]
    fn test_custom_rules() {
        let rules = ScoreRules {
            points_per_cell: 1,
            base_line_points: 10,
            max_length_bonus_percent: 50,
            combo_half_steps: vec![2, 4],
        };
        let e = ScoreEngine::new(rules, 5, 9);
        assert_eq!(e.line_value(9), 15);
        assert_eq!(e.combo_multiplier(7).as_f64(), 2.0);
    }

    #[test]
    fn test_empty_combo_table_falls_back_to_baseline() {
        let rules = ScoreRules {
            combo_half_steps: vec![],
            ..ScoreRules::default()
        };
        let e = ScoreEngine::new(rules, 5, 9);
        assert_eq!(e.combo_multiplier(3), ComboMultiplier::BASELINE);
    }
}
