#![cfg(feature = "std")]

use std::io::{self, Write};
use std::string::String;

use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::attack::Attack;
use crate::board::Board;
use crate::common::Cell;
use crate::config::GRID_SIZE;
use crate::placement::{self, Direction};
use crate::player::Player;

/// Line-oriented human player on stdin/stdout.
///
/// Owns a small RNG for the "press enter for a random berth" shortcut.
pub struct CliPlayer {
    rng: SmallRng,
}

impl CliPlayer {
    pub fn new() -> Self {
        CliPlayer {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// Seeded variant so interactive sessions can be replayed.
    pub fn seeded(seed: u64) -> Self {
        CliPlayer {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for CliPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// `(2, 0)` renders as `A3`: letter column, 1-based row.
pub fn cell_to_string(cell: Cell) -> String {
    let col = (b'A' + cell.col()) as char;
    format!("{}{}", col, cell.row() + 1)
}

fn parse_coord(input: &str) -> Option<Cell> {
    if input.len() < 2 {
        return None;
    }
    let mut chars = input.chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    let col = (col_ch as u8).wrapping_sub(b'A');
    let row_str: String = chars.collect();
    let row: u8 = row_str.parse().ok()?;
    if row == 0 {
        return None;
    }
    Cell::new(row - 1, col)
}

fn parse_direction(input: &str) -> Option<Direction> {
    match input.chars().next()?.to_ascii_uppercase() {
        'R' => Some(Direction::Right),
        'D' => Some(Direction::Down),
        'L' => Some(Direction::Left),
        'U' => Some(Direction::Up),
        _ => None,
    }
}

fn print_header() {
    print!("   ");
    for col in 0..GRID_SIZE {
        let ch = (b'A' + col) as char;
        print!(" {}", ch);
    }
    println!();
}

/// Own waters: ship size digits, `X` where shots struck, `o` where they
/// missed.
pub fn print_own_board(board: &Board) {
    print_header();
    for row in 0..GRID_SIZE {
        print!("{:2} ", row + 1);
        for col in 0..GRID_SIZE {
            let cell = Cell::new(row, col).expect("grid scan stays in bounds");
            let ch = if board.struck().contains(cell) {
                'X'
            } else if board.blocked().contains(cell) {
                'o'
            } else if let Some(size) = board.size_at(cell) {
                (b'0' + size) as char
            } else {
                '.'
            };
            print!(" {}", ch);
        }
        println!();
    }
}

/// Shots fired so far: `X` hits on live ships, `o` misses.
pub fn print_shot_map(attack: &Attack) {
    print_header();
    for row in 0..GRID_SIZE {
        print!("{:2} ", row + 1);
        for col in 0..GRID_SIZE {
            let cell = Cell::new(row, col).expect("grid scan stays in bounds");
            let ch = if attack.hits().contains(cell) {
                'X'
            } else if attack.misses().contains(cell) {
                'o'
            } else {
                '.'
            };
            print!(" {}", ch);
        }
        println!();
    }
}

fn read_line() -> String {
    io::stdout().flush().unwrap();
    let mut line = String::new();
    io::stdin().read_line(&mut line).unwrap();
    line.trim().to_string()
}

impl Player for CliPlayer {
    fn request_placement(&mut self, board: &Board, size: u8) -> Vec<Cell> {
        println!("\nYour waters:");
        print_own_board(board);
        loop {
            print!(
                "Place a size-{} ship (origin and direction, e.g. C7 R; enter for random): ",
                size
            );
            let line = read_line();
            if line.is_empty() {
                let runs = placement::enumerate(board, size);
                let cells = runs
                    .choose(&mut self.rng)
                    .expect("asked to berth an unplaceable hull");
                return cells.clone();
            }
            let mut parts = line.split_whitespace();
            let origin = parts.next().and_then(parse_coord);
            let direction = parts.next().and_then(parse_direction);
            let (origin, direction) = match (origin, direction) {
                (Some(origin), Some(direction)) => (origin, direction),
                _ => {
                    println!("Could not read that; try something like C7 R");
                    continue;
                }
            };
            match placement::line(origin, direction, size) {
                Some(cells) if placement::is_legal(board, &cells) => return cells,
                Some(_) => println!("That spot overlaps a ship or blocked water"),
                None => println!("That runs off the grid"),
            }
        }
    }

    fn request_shot(&mut self, attack: &Attack, own: &Board) -> Cell {
        println!("\nShot map:");
        print_shot_map(attack);
        println!("\nYour waters:");
        print_own_board(own);
        loop {
            print!("Fire at (e.g. C7): ");
            let line = read_line();
            match parse_coord(&line) {
                Some(cell) if attack.is_spent_shot(cell) => {
                    println!("{} is already resolved", cell_to_string(cell));
                }
                Some(cell) => return cell,
                None => println!("Invalid coordinate"),
            }
        }
    }
}
