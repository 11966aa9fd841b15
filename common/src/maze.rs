pub mod carver;
pub mod solver;

/// The four moves available from a cell, under one fixed grid mapping:
/// `Right` increases `x`, `Up` increases `y`. Both the carver and the
/// solver use this same mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// One grid position: its coordinates, a wall flag per side (`true` means
/// the wall is still standing), and a `visited` flag that is only
/// meaningful during a single traversal run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub visited: bool,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            up: true,
            down: true,
            left: true,
            right: true,
            visited: false,
        }
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        match direction {
            Direction::Right => self.right,
            Direction::Left => self.left,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// Clears the wall on the given side. Walls only ever open; nothing
    /// closes one again.
    pub fn open(&mut self, direction: Direction) {
        match direction {
            Direction::Right => self.right = false,
            Direction::Left => self.left = false,
            Direction::Up => self.up = false,
            Direction::Down => self.down = false,
        }
    }
}

/// A `columns x rows` field of cells, indexed `[x][y]`, owned by whichever
/// traversal is currently running. The grid keeps the canonical wall and
/// visited state; traversal stacks only keep path history.
pub struct Grid {
    columns: usize,
    rows: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// A grid of fully walled-in, unvisited cells.
    pub fn new(rows: usize, columns: usize) -> Self {
        let cells = (0..columns)
            .map(|x| (0..rows).map(|y| Cell::new(x, y)).collect())
            .collect();

        Self {
            columns,
            rows,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[x][y]
    }

    pub fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        &mut self.cells[x][y]
    }

    /// Marks the cell visited and returns a copy for a traversal stack.
    pub fn visit(&mut self, x: usize, y: usize) -> Cell {
        let cell = &mut self.cells[x][y];
        cell.visited = true;
        *cell
    }

    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && (x as usize) < self.columns && y >= 0 && (y as usize) < self.rows
    }

    /// True when the coordinate cannot be entered: outside the grid, or
    /// already visited. Out-of-range coordinates read as permanently
    /// blocked, so callers can probe all four sides without separate
    /// bounds checks.
    pub fn is_blocked(&self, x: isize, y: isize) -> bool {
        !self.in_bounds(x, y) || self.cells[x as usize][y as usize].visited
    }

    /// Steps one cell from `(x, y)` in `direction`, if that lands inside
    /// the grid.
    pub fn step(&self, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.offset();
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        self.in_bounds(nx, ny).then(|| (nx as usize, ny as usize))
    }

    /// Whether the cell has no viable unexplored neighbor left. While
    /// carving (`wall_aware` false) walls are irrelevant, since the carver
    /// may cut through to any unvisited neighbor. While following
    /// corridors (`wall_aware` true) a side the cell is still walled off
    /// on counts as impassable even if the neighbor is unvisited.
    pub fn is_dead_end(&self, x: usize, y: usize, wall_aware: bool) -> bool {
        let cell = self.cells[x][y];
        Direction::ALL.into_iter().all(|direction| {
            let (dx, dy) = direction.offset();
            self.is_blocked(x as isize + dx, y as isize + dy)
                || (wall_aware && cell.has_wall(direction))
        })
    }

    pub fn all_visited(&self) -> bool {
        self.cells.iter().flatten().all(|cell| cell.visited)
    }

    /// Clears every `visited` flag ahead of a fresh traversal.
    pub fn reset_visited(&mut self) {
        for column in &mut self.cells {
            for cell in column {
                cell.visited = false;
            }
        }
    }
}
