use super::grid::{Cell, Grid};

/// What the snake ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// The candidate head left the grid
    Wall,
    /// The candidate head landed on the snake's own body
    Body,
}

/// Test a candidate head against the grid bounds and against the body as it
/// will be *after* this tick's move: when the snake is not growing, the tail
/// cell vacates in the same tick and is excluded from the check.
pub fn detect(
    grid: &Grid,
    body: &[Cell],
    candidate: Cell,
    growing: bool,
) -> Option<CollisionKind> {
    if !grid.in_bounds(candidate) {
        return Some(CollisionKind::Wall);
    }

    let kept = if growing {
        body.len()
    } else {
        body.len().saturating_sub(1)
    };
    if body[..kept].contains(&candidate) {
        return Some(CollisionKind::Body);
    }

    None
}
