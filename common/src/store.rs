use std::{
    env, fmt, fs, io,
    path::{Path, PathBuf},
};

use crate::maze::{Cell, Grid};

/// Where maze and path records live. Honors a `.env` file, then the
/// `CLEW_DIR` variable, and falls back to the working directory.
pub fn record_dir() -> PathBuf {
    dotenvy::dotenv().ok();

    env::var("CLEW_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

pub fn maze_file_name(maze_id: u32) -> String {
    format!("maze_{}.txt", maze_id)
}

/// Path records carry the maze identifier and all four endpoint
/// coordinates, so distinct queries against one maze never collide.
pub fn path_file_name(maze_id: u32, entry: (usize, usize), exit: (usize, usize)) -> String {
    format!(
        "maze_{}_path_{}_{}_{}_{}.txt",
        maze_id, entry.0, entry.1, exit.0, exit.1
    )
}

/// Writes one maze record: a `rows columns` header, then one tagged line
/// per cell, column by column.
pub fn write_maze(dir: &Path, maze_id: u32, grid: &Grid) -> io::Result<PathBuf> {
    let path = dir.join(maze_file_name(maze_id));

    let mut record = format!("{} {}\n", grid.rows(), grid.columns());
    for x in 0..grid.columns() {
        for y in 0..grid.rows() {
            let cell = grid.cell(x, y);
            record.push_str(&format!(
                "x={} y={} l={} r={} u={} d={}\n",
                cell.x, cell.y, cell.left as u8, cell.right as u8, cell.up as u8, cell.down as u8
            ));
        }
    }

    fs::write(&path, record)?;
    Ok(path)
}

/// Writes one path record: an `x y` line per visited cell, entry first.
pub fn write_path(
    dir: &Path,
    maze_id: u32,
    entry: (usize, usize),
    exit: (usize, usize),
    path: &[(usize, usize)],
) -> io::Result<PathBuf> {
    let file = dir.join(path_file_name(maze_id, entry, exit));

    let mut record = String::new();
    for (x, y) in path {
        record.push_str(&format!("{} {}\n", x, y));
    }

    fs::write(&file, record)?;
    Ok(file)
}

#[derive(Debug)]
pub enum MazeLoadError {
    Io(io::Error),
    MissingHeader,
    BadHeader(String),
    BadCell { line: usize, text: String },
    CellOutOfRange { line: usize, x: usize, y: usize },
    WrongCellCount { expected: usize, found: usize },
}

impl fmt::Display for MazeLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeLoadError::Io(e) => write!(f, "could not read maze record: {}", e),
            MazeLoadError::MissingHeader => write!(f, "maze record is empty"),
            MazeLoadError::BadHeader(header) => {
                write!(f, "malformed size header '{}'", header)
            }
            MazeLoadError::BadCell { line, text } => {
                write!(f, "malformed cell on line {}: '{}'", line, text)
            }
            MazeLoadError::CellOutOfRange { line, x, y } => {
                write!(
                    f,
                    "cell ({}, {}) on line {} is outside the declared size",
                    x, y, line
                )
            }
            MazeLoadError::WrongCellCount { expected, found } => {
                write!(f, "expected {} cells, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for MazeLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MazeLoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MazeLoadError {
    fn from(e: io::Error) -> Self {
        MazeLoadError::Io(e)
    }
}

/// Reads a maze record back into a grid. Wall flags round-trip exactly;
/// `visited` is never persisted and is false on every loaded cell.
pub fn read_maze(dir: &Path, maze_id: u32) -> Result<Grid, MazeLoadError> {
    let text = fs::read_to_string(dir.join(maze_file_name(maze_id)))?;
    parse_maze(&text)
}

fn parse_maze(text: &str) -> Result<Grid, MazeLoadError> {
    let mut lines = text.lines();
    let header = lines.next().ok_or(MazeLoadError::MissingHeader)?;

    let mut sizes = header.split_whitespace();
    let (rows, columns) = match (sizes.next(), sizes.next(), sizes.next()) {
        (Some(rows), Some(columns), None) => {
            match (rows.parse::<usize>(), columns.parse::<usize>()) {
                (Ok(rows), Ok(columns)) if rows >= 1 && columns >= 1 => (rows, columns),
                _ => return Err(MazeLoadError::BadHeader(header.to_string())),
            }
        }
        _ => return Err(MazeLoadError::BadHeader(header.to_string())),
    };

    let mut grid = Grid::new(rows, columns);
    let mut found = 0;

    for (index, line) in lines.enumerate() {
        let line_number = index + 2; // 1-based, counting the header.
        let cell = parse_cell(line).ok_or_else(|| MazeLoadError::BadCell {
            line: line_number,
            text: line.to_string(),
        })?;
        if !grid.in_bounds(cell.x as isize, cell.y as isize) {
            return Err(MazeLoadError::CellOutOfRange {
                line: line_number,
                x: cell.x,
                y: cell.y,
            });
        }
        *grid.cell_mut(cell.x, cell.y) = cell;
        found += 1;
    }

    let expected = grid.cell_count();
    if found != expected {
        return Err(MazeLoadError::WrongCellCount { expected, found });
    }

    Ok(grid)
}

/// One record line holds six tagged fields: `x=_ y=_ l=_ r=_ u=_ d=_`.
/// Each tag is two characters; the value is parsed after stripping it.
fn parse_cell(line: &str) -> Option<Cell> {
    let mut fields = line.split_whitespace();
    let x = tagged_value(fields.next()?, "x=")?;
    let y = tagged_value(fields.next()?, "y=")?;
    let left = tagged_flag(fields.next()?, "l=")?;
    let right = tagged_flag(fields.next()?, "r=")?;
    let up = tagged_flag(fields.next()?, "u=")?;
    let down = tagged_flag(fields.next()?, "d=")?;
    if fields.next().is_some() {
        return None;
    }

    Some(Cell {
        x,
        y,
        up,
        down,
        left,
        right,
        visited: false,
    })
}

fn tagged_value(token: &str, tag: &str) -> Option<usize> {
    token.strip_prefix(tag)?.parse().ok()
}

fn tagged_flag(token: &str, tag: &str) -> Option<bool> {
    match token.strip_prefix(tag)? {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::tempdir;

    use super::*;
    use crate::maze::Direction;
    use crate::maze::carver::carve;

    #[test]
    fn wall_flags_round_trip_and_visited_resets() {
        let dir = tempdir().expect("temp dir");
        let mut rng = StdRng::seed_from_u64(41);
        let grid = carve(4, 3, &mut rng);

        write_maze(dir.path(), 1, &grid).expect("write maze record");
        let loaded = read_maze(dir.path(), 1).expect("load maze record");

        assert_eq!(loaded.rows(), 4);
        assert_eq!(loaded.columns(), 3);
        for x in 0..3 {
            for y in 0..4 {
                let before = grid.cell(x, y);
                let after = loaded.cell(x, y);
                assert_eq!(
                    (before.left, before.right, before.up, before.down),
                    (after.left, after.right, after.up, after.down),
                    "walls of cell ({}, {})",
                    x,
                    y
                );
                assert!(!after.visited);
            }
        }
    }

    #[test]
    fn record_layout_matches_the_fixed_token_order() {
        let dir = tempdir().expect("temp dir");
        let mut grid = Grid::new(1, 2);
        grid.cell_mut(0, 0).open(Direction::Right);
        grid.cell_mut(1, 0).open(Direction::Left);

        let path = write_maze(dir.path(), 9, &grid).expect("write maze record");
        let text = fs::read_to_string(path).expect("read back");
        assert_eq!(
            text,
            "1 2\nx=0 y=0 l=1 r=0 u=1 d=1\nx=1 y=0 l=0 r=1 u=1 d=1\n"
        );
    }

    #[test]
    fn file_names_embed_the_query() {
        assert_eq!(maze_file_name(3), "maze_3.txt");
        assert_eq!(path_file_name(3, (0, 1), (4, 2)), "maze_3_path_0_1_4_2.txt");
    }

    #[test]
    fn missing_record_is_an_io_error() {
        let dir = tempdir().expect("temp dir");
        assert!(matches!(
            read_maze(dir.path(), 77),
            Err(MazeLoadError::Io(_))
        ));
    }

    #[test]
    fn empty_record_is_missing_its_header() {
        assert!(matches!(parse_maze(""), Err(MazeLoadError::MissingHeader)));
    }

    #[test]
    fn non_numeric_or_degenerate_headers_are_rejected() {
        assert!(matches!(
            parse_maze("two three\n"),
            Err(MazeLoadError::BadHeader(_))
        ));
        assert!(matches!(
            parse_maze("3\n"),
            Err(MazeLoadError::BadHeader(_))
        ));
        assert!(matches!(
            parse_maze("0 4\n"),
            Err(MazeLoadError::BadHeader(_))
        ));
    }

    #[test]
    fn malformed_cell_lines_are_rejected() {
        // Too few fields.
        let text = "1 1\nx=0 y=0 l=1 r=1\n";
        assert!(matches!(
            parse_maze(text),
            Err(MazeLoadError::BadCell { line: 2, .. })
        ));

        // Unexpected tag.
        let text = "1 1\nq=0 y=0 l=1 r=1 u=1 d=1\n";
        assert!(matches!(parse_maze(text), Err(MazeLoadError::BadCell { .. })));

        // A wall flag must be 0 or 1.
        let text = "1 1\nx=0 y=0 l=2 r=1 u=1 d=1\n";
        assert!(matches!(parse_maze(text), Err(MazeLoadError::BadCell { .. })));
    }

    #[test]
    fn out_of_range_cells_are_rejected() {
        let text = "1 1\nx=4 y=0 l=1 r=1 u=1 d=1\n";
        assert!(matches!(
            parse_maze(text),
            Err(MazeLoadError::CellOutOfRange { x: 4, y: 0, .. })
        ));
    }

    #[test]
    fn truncated_records_are_rejected() {
        let text = "2 2\nx=0 y=0 l=1 r=1 u=1 d=1\n";
        assert!(matches!(
            parse_maze(text),
            Err(MazeLoadError::WrongCellCount {
                expected: 4,
                found: 1
            })
        ));
    }

    #[test]
    fn path_record_lists_cells_entry_first() {
        let dir = tempdir().expect("temp dir");
        let file = write_path(dir.path(), 2, (0, 0), (1, 1), &[(0, 0), (0, 1), (1, 1)])
            .expect("write path record");
        let text = fs::read_to_string(file).expect("read back");
        assert_eq!(text, "0 0\n0 1\n1 1\n");
    }
}
