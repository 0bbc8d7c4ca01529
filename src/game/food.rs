use rand::Rng;

use super::grid::{Cell, Grid};

/// Pick a uniformly random cell that is not in `occupied`.
///
/// Samples until a free cell turns up. Returns `None` when `occupied`
/// already covers the whole grid, since rejection sampling would never
/// terminate there; the session treats that as a won game. `occupied` is
/// assumed duplicate-free (the snake body, plus at most the incoming head).
pub fn spawn<R: Rng>(rng: &mut R, grid: &Grid, occupied: &[Cell]) -> Option<Cell> {
    if occupied.len() >= grid.cell_count() {
        return None;
    }

    loop {
        let cell = Cell::new(
            rng.gen_range(0..grid.width()),
            rng.gen_range(0..grid.height()),
        );

        if !occupied.contains(&cell) {
            return Some(cell);
        }
    }
}
