use std::io::{self, Write};
use std::process;

use common::maze::carver::carve;
use common::maze::solver::{SolveError, discover_path};
use common::store;

fn main() {
    let mut rng = rand::rng();
    let dir = store::record_dir();

    let count: u32 = prompt_number("Enter the number of mazes: ");
    let (rows, columns) = prompt_dimensions("Enter the number of rows and columns (M and N): ");

    for maze_id in 1..=count {
        let grid = carve(rows, columns, &mut rng);
        match store::write_maze(&dir, maze_id, &grid) {
            Ok(path) => println!("Maze {} written to {}.", maze_id, path.display()),
            Err(e) => {
                eprintln!("Error: failed to write maze {}.", maze_id);
                eprintln!("Details: {}.", e);
                process::exit(1);
            }
        }
    }
    println!("All mazes are generated.");

    if count == 0 {
        return;
    }

    let maze_id = loop {
        let id: u32 = prompt_number(&format!(
            "Enter a maze ID between 1 and {} inclusive to find a path: ",
            count
        ));
        if (1..=count).contains(&id) {
            break id;
        }
        println!("That maze was not generated in this run.");
    };

    let entry = prompt_pair("Enter x and y coordinates of the entry point (column row): ");
    let exit = prompt_pair("Enter x and y coordinates of the exit point (column row): ");

    let mut grid = match store::read_maze(&dir, maze_id) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error: could not load maze {}.", maze_id);
            eprintln!("Details: {}.", e);
            process::exit(1);
        }
    };

    match discover_path(&mut grid, entry, exit, &mut rng) {
        Ok(route) => match store::write_path(&dir, maze_id, entry, exit, &route) {
            Ok(file) => {
                println!("Path with {} cells written to {}.", route.len(), file.display());
            }
            Err(e) => {
                eprintln!("Error: failed to write the path record.");
                eprintln!("Details: {}.", e);
                process::exit(1);
            }
        },
        Err(SolveError::NoPathFound) => {
            eprintln!(
                "No path from ({}, {}) to ({}, {}) in maze {}.",
                entry.0, entry.1, exit.0, exit.1, maze_id
            );
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(1);
        }
    }
}

fn prompt(message: &str) -> String {
    print!("{}", message);
    io::stdout().flush().expect("failed to flush stdout");

    let mut input = String::new();
    let bytes = io::stdin()
        .read_line(&mut input)
        .expect("failed to read stdin");
    if bytes == 0 {
        eprintln!("Input ended before the run was configured.");
        process::exit(1);
    }

    input.trim().to_string()
}

fn prompt_number(message: &str) -> u32 {
    loop {
        match prompt(message).parse() {
            Ok(value) => return value,
            Err(_) => println!("Please enter a whole number."),
        }
    }
}

fn prompt_pair(message: &str) -> (usize, usize) {
    loop {
        match parse_pair(&prompt(message)) {
            Some(pair) => return pair,
            None => println!("Please enter two whole numbers separated by a space."),
        }
    }
}

fn prompt_dimensions(message: &str) -> (usize, usize) {
    loop {
        let (rows, columns) = prompt_pair(message);
        if rows >= 1 && columns >= 1 {
            return (rows, columns);
        }
        println!("Both dimensions must be at least 1.");
    }
}

fn parse_pair(input: &str) -> Option<(usize, usize)> {
    let mut parts = input.split_whitespace();
    let first = parts.next()?.parse().ok()?;
    let second = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pair_accepts_two_numbers() {
        assert_eq!(parse_pair("3 4"), Some((3, 4)));
        assert_eq!(parse_pair("  12   7  "), Some((12, 7)));
    }

    #[test]
    fn parse_pair_rejects_everything_else() {
        assert_eq!(parse_pair(""), None);
        assert_eq!(parse_pair("3"), None);
        assert_eq!(parse_pair("3 4 5"), None);
        assert_eq!(parse_pair("three four"), None);
        assert_eq!(parse_pair("-1 2"), None);
    }
}
