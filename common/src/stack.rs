use crate::maze::{Cell, Direction};

/// LIFO history of a walk from its start cell to the current frontier. The
/// top element is always the cell under consideration; popping it is a
/// backtrack. Canonical wall and visited state lives in the grid; the
/// stack keeps the path only.
#[derive(Debug, Default)]
pub struct TraversalStack {
    cells: Vec<Cell>,
}

impl TraversalStack {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    pub fn pop(&mut self) -> Option<Cell> {
        self.cells.pop()
    }

    pub fn peek(&self) -> Option<&Cell> {
        self.cells.last()
    }

    /// Opens a wall on the top element in place: carve from here in the
    /// given direction. Does nothing on an empty stack.
    pub fn open_top(&mut self, direction: Direction) {
        if let Some(cell) = self.cells.last_mut() {
            cell.open(direction);
        }
    }

    /// Consumes the stack bottom-to-top: the order the cells were entered.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}
