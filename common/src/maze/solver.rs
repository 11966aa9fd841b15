use std::fmt;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::maze::{Direction, Grid};
use crate::stack::TraversalStack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    EntryOutOfRange { x: usize, y: usize },
    ExitOutOfRange { x: usize, y: usize },
    NoPathFound,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::EntryOutOfRange { x, y } => {
                write!(f, "entry point ({}, {}) is outside the maze", x, y)
            }
            SolveError::ExitOutOfRange { x, y } => {
                write!(f, "exit point ({}, {}) is outside the maze", x, y)
            }
            SolveError::NoPathFound => {
                write!(f, "search exhausted without reaching the exit")
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// Walks the carved corridors from `entry` toward `exit`, backtracking out
/// of dead ends, and returns the discovered route in visit order.
///
/// The walk respects walls: a move is legal only when the facing wall flag
/// on the neighbor cell is clear. Both endpoints are checked against the
/// grid before the walk starts, since the blocked-coordinate predicate
/// would otherwise quietly treat an outside endpoint as unreachable and
/// report no route instead of the real mistake.
pub fn discover_path<R: Rng>(
    grid: &mut Grid,
    entry: (usize, usize),
    exit: (usize, usize),
    rng: &mut R,
) -> Result<Vec<(usize, usize)>, SolveError> {
    if !grid.in_bounds(entry.0 as isize, entry.1 as isize) {
        return Err(SolveError::EntryOutOfRange {
            x: entry.0,
            y: entry.1,
        });
    }
    if !grid.in_bounds(exit.0 as isize, exit.1 as isize) {
        return Err(SolveError::ExitOutOfRange {
            x: exit.0,
            y: exit.1,
        });
    }

    grid.reset_visited();

    let mut stack = TraversalStack::new();
    stack.push(grid.visit(entry.0, entry.1));

    while let Some(&current) = stack.peek() {
        if (current.x, current.y) == exit {
            return Ok(stack
                .into_cells()
                .into_iter()
                .map(|cell| (cell.x, cell.y))
                .collect());
        }

        if grid.is_dead_end(current.x, current.y, true) {
            stack.pop();
            continue;
        }

        let passable: Vec<(usize, usize)> = Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                let (nx, ny) = grid.step(current.x, current.y, direction)?;
                let neighbor = grid.cell(nx, ny);
                (!neighbor.visited && !neighbor.has_wall(direction.opposite()))
                    .then_some((nx, ny))
            })
            .collect();

        match passable.choose(rng) {
            Some(&(nx, ny)) => stack.push(grid.visit(nx, ny)),
            // A record carved on only one side of an edge can get past the
            // dead-end check yet offer no legal move. Treat the cell as a
            // dead end so the walk stays bounded.
            None => {
                stack.pop();
            }
        }
    }

    Err(SolveError::NoPathFound)
}
