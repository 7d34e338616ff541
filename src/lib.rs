// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

pub mod config;
pub mod grid;
pub mod moves;
pub mod puzzle;
pub mod solution_formatter;
pub mod solver;
pub mod state;

mod data;
mod fs;
mod parser;
mod vec2d;

use std::error::Error;

pub use crate::data::{Color, Dir, Pos, DIRECTIONS, EMPTY};
pub use crate::parser::ParserErr;

use crate::config::{Format, Mode};
use crate::puzzle::Puzzle;
use crate::solver::{SolverErr, SolverOk};

pub trait LoadPuzzle {
    /// Reads a puzzle file, guessing the format.
    fn load_puzzle(&self) -> Result<Puzzle, Box<dyn Error>>;

    fn load_puzzle_as(&self, format: Format) -> Result<Puzzle, Box<dyn Error>>;
}

pub trait Solve {
    fn solve(&self, mode: Mode, print_status: bool) -> Result<SolverOk, SolverErr>;
}
