//! Placement legality: a figure fits at an anchor iff every target cell
//! exists and is empty. Figures are checked in their current rotation.

use super::figures::{Figure, NUM_ROTATIONS};
use super::grid::HexGrid;
use super::hex::AxialCoord;

pub fn is_valid_placement(grid: &HexGrid, figure: &Figure, anchor: AxialCoord) -> bool {
    figure.cells().iter().all(|&offset| grid.is_free(anchor + offset))
}

/// All legal anchors for `figure`, in grid enumeration order.
pub fn get_valid_placements(grid: &HexGrid, figure: &Figure) -> Vec<AxialCoord> {
    grid.coords()
        .iter()
        .copied()
        .filter(|&anchor| is_valid_placement(grid, figure, anchor))
        .collect()
}

/// Short-circuiting form of `!get_valid_placements(..).is_empty()`.
pub fn has_valid_placement(grid: &HexGrid, figure: &Figure) -> bool {
    grid.coords()
        .iter()
        .any(|&anchor| is_valid_placement(grid, figure, anchor))
}

/// Whether some rotation of `figure` has a legal anchor. A player can
/// rotate before placing, so this is the test for "the figure still fits".
pub fn fits_in_any_rotation(grid: &HexGrid, figure: &Figure) -> bool {
    (0..NUM_ROTATIONS).any(|steps| has_valid_placement(grid, &figure.rotated(steps)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::figures::catalog_shape;
    use crate::game::grid::DEFAULT_RADIUS;
    use crate::game::types::FigureId;

    fn grid() -> HexGrid {
        HexGrid::new(DEFAULT_RADIUS).unwrap()
    }

    fn figure(cells: &[(i32, i32)]) -> Figure {
        let offsets: Vec<AxialCoord> = cells.iter().map(|&c| c.into()).collect();
        Figure::from_offsets(FigureId(1), &offsets, 1).unwrap()
    }

    #[test]
    fn test_single_cell_fits_everywhere_on_empty_grid() {
        let g = grid();
        let anchors = get_valid_placements(&g, &figure(&[(0, 0)]));
        assert_eq!(anchors, g.coords().to_vec());
    }

    #[test]
    fn test_off_board_offset_rejected() {
        let g = grid();
        let f = figure(&[(0, 0), (1, 0)]);
        assert!(is_valid_placement(&g, &f, AxialCoord::new(3, 0)));
        assert!(!is_valid_placement(&g, &f, AxialCoord::new(4, 0)));
        assert!(!is_valid_placement(&g, &f, AxialCoord::new(9, 9)));
    }

    #[test]
    fn test_occupied_offset_rejected() {
        let g = grid().with_occupied(&[AxialCoord::new(1, 0)], 2);
        let f = figure(&[(0, 0), (1, 0), (2, 0)]);
        assert!(!is_valid_placement(&g, &f, AxialCoord::new(0, 0)));
        assert!(!is_valid_placement(&g, &f, AxialCoord::new(-1, 0)));
        assert!(is_valid_placement(&g, &f, AxialCoord::new(-2, 0)));
        assert!(is_valid_placement(&g, &f, AxialCoord::new(2, 0)));
    }

    #[test]
    fn test_rotation_changes_valid_anchors() {
        let g = grid();
        let f = Figure::new(FigureId(1), catalog_shape("tetra_line").unwrap(), 0, 1);
        // Horizontal bar cannot start at q = 2; after rotating to run along r it can.
        assert!(!is_valid_placement(&g, &f, AxialCoord::new(2, -2)));
        assert!(is_valid_placement(&g, &f.rotated(1), AxialCoord::new(2, -2)));
    }

    #[test]
    fn test_valid_placements_counts() {
        let g = grid();
        // A domino along q fits once per adjacent pair on each R-axis run.
        let duo = figure(&[(0, 0), (1, 0)]);
        let expected: usize = g
            .axis_lines()
            .iter()
            .filter(|l| l.axis == crate::game::grid::Axis::R)
            .map(|l| l.len() - 1)
            .sum();
        assert_eq!(get_valid_placements(&g, &duo).len(), expected);
    }

    #[test]
    fn test_full_grid_has_no_placements() {
        let g = grid();
        let full = g.with_occupied(g.coords(), 1);
        let f = figure(&[(0, 0)]);
        assert!(get_valid_placements(&full, &f).is_empty());
        assert!(!has_valid_placement(&full, &f));
    }

    #[test]
    fn test_rotated_fit_counts() {
        // Only a vertical pair is free: (0, 0) and (0, 1).
        let g = grid();
        let free = [AxialCoord::new(0, 0), AxialCoord::new(0, 1)];
        let blocked: Vec<AxialCoord> = g.coords().iter().copied().filter(|c| !free.contains(c)).collect();
        let g = g.with_occupied(&blocked, 1);
        let duo = figure(&[(0, 0), (1, 0)]);
        assert!(!has_valid_placement(&g, &duo));
        assert!(fits_in_any_rotation(&g, &duo));
        assert!(!fits_in_any_rotation(&g, &figure(&[(0, 0), (1, 0), (2, 0)])));
    }

    #[test]
    fn test_deterministic_order() {
        let g = grid().with_occupied(&[AxialCoord::new(0, 0)], 1);
        let f = figure(&[(0, 0), (0, 1)]);
        assert_eq!(get_valid_placements(&g, &f), get_valid_placements(&g, &f));
    }
}
