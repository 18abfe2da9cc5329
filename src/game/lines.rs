//! Complete-line detection over the grid's static axis-line partition.

use std::collections::BTreeSet;

use super::grid::{HexGrid, Line};
use super::hex::AxialCoord;

/// Every axis-line whose cells are all occupied, in partition order.
pub fn detect_lines(grid: &HexGrid) -> Vec<Line> {
    grid.axis_lines()
        .iter()
        .filter(|line| line.cells.iter().all(|&c| grid.is_occupied(c)))
        .cloned()
        .collect()
}

/// Union of the cells of `lines`, each cell once, sorted.
/// Cells at line intersections appear in several lines but are cleared once.
pub fn cleared_cells(lines: &[Line]) -> Vec<AxialCoord> {
    lines
        .iter()
        .flat_map(|l| l.cells.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
