use rand::Rng;
use rand::seq::IndexedRandom;

use crate::maze::{Direction, Grid};
use crate::stack::TraversalStack;

/// Carves a `rows x columns` maze with a randomized depth-first walk.
///
/// Every cell starts fully walled in. From the origin `(0, 0)` the walk
/// repeatedly moves to a random unvisited neighbor, opening the shared
/// edge from both sides, and backtracks out of dead ends. Each successful
/// move visits exactly one new cell, so the walk terminates with the open
/// edges forming a spanning tree over the grid.
pub fn carve<R: Rng>(rows: usize, columns: usize, rng: &mut R) -> Grid {
    let mut grid = Grid::new(rows, columns);
    let mut stack = TraversalStack::new();
    let mut visited = 1;

    stack.push(grid.visit(0, 0));

    while let Some(&current) = stack.peek() {
        if visited == grid.cell_count() {
            break;
        }

        if grid.is_dead_end(current.x, current.y, false) {
            stack.pop();
            continue;
        }

        let open: Vec<(Direction, usize, usize)> = Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                let (nx, ny) = grid.step(current.x, current.y, direction)?;
                (!grid.cell(nx, ny).visited).then_some((direction, nx, ny))
            })
            .collect();

        let &(direction, nx, ny) = open
            .choose(rng)
            .expect("cell is not a dead end, so it has an unvisited neighbor");

        // Open the shared edge from both sides: on the cell being left, in
        // the grid and on the stack's copy, and on the cell being entered
        // before its copy is pushed.
        grid.cell_mut(current.x, current.y).open(direction);
        stack.open_top(direction);
        grid.cell_mut(nx, ny).open(direction.opposite());

        stack.push(grid.visit(nx, ny));
        visited += 1;
    }

    grid
}
