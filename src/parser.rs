use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::config::Format;
use crate::grid::{self, Grid, GridErr};
use crate::puzzle::Puzzle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    /// Line and cell index of something that's not a color
    Pos(usize, usize),
    MissingGoal,
    TooManyGrids,
    Grid(GridErr),
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::MissingGoal => write!(f, "No goal grid after the initial grid"),
            ParserErr::TooManyGrids => write!(f, "More than two grids"),
            ParserErr::Grid(ref err) => write!(f, "{}", err),
        }
    }
}

impl Error for ParserErr {}

impl From<GridErr> for ParserErr {
    fn from(err: GridErr) -> Self {
        ParserErr::Grid(err)
    }
}

impl FromStr for Puzzle {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Guesses the format - numeric cells are separated by whitespace, compact cells aren't.
///
/// One column numeric grids have no whitespace either
/// so numeric is tried again when compact doesn't parse.
pub(crate) fn parse(puzzle: &str) -> Result<Puzzle, ParserErr> {
    let numeric = puzzle
        .lines()
        .map(str::trim)
        .filter(|line| !is_comment(line))
        .any(|line| line.contains(char::is_whitespace));
    if numeric {
        return parse_format(puzzle, Format::Numeric);
    }
    parse_format(puzzle, Format::Compact)
        .or_else(|err| parse_format(puzzle, Format::Numeric).map_err(|_| err))
}

pub(crate) fn parse_format(puzzle: &str, format: Format) -> Result<Puzzle, ParserErr> {
    let mut grids = Vec::new();
    let mut rows = Vec::new();

    for (r, line) in puzzle.lines().enumerate() {
        let line = line.trim();
        if is_comment(line) {
            continue;
        }
        if line.is_empty() {
            // any number of empty lines separates grids
            if !rows.is_empty() {
                grids.push(Grid::new(rows)?);
                rows = Vec::new();
            }
            continue;
        }

        rows.push(match format {
            Format::Numeric => parse_numeric_row(r, line)?,
            Format::Compact => parse_compact_row(r, line)?,
        });
    }
    if !rows.is_empty() {
        grids.push(Grid::new(rows)?);
    }

    let mut grids = grids.into_iter();
    let initial = match grids.next() {
        Some(grid) => grid,
        None => return Err(ParserErr::Grid(GridErr::Empty)),
    };
    let goal = grids.next().ok_or(ParserErr::MissingGoal)?;
    if grids.next().is_some() {
        return Err(ParserErr::TooManyGrids);
    }
    Ok(Puzzle::new(initial, goal))
}

fn is_comment(line: &str) -> bool {
    line.starts_with(';')
}

fn parse_numeric_row(r: usize, line: &str) -> Result<Vec<i64>, ParserErr> {
    line.split_whitespace()
        .enumerate()
        .map(|(c, cell)| cell.parse().map_err(|_| ParserErr::Pos(r, c)))
        .collect()
}

fn parse_compact_row(r: usize, line: &str) -> Result<Vec<i64>, ParserErr> {
    line.chars()
        .enumerate()
        .map(|(c, cell)| {
            grid::char_to_color(cell)
                .map(i64::from)
                .ok_or(ParserErr::Pos(r, c))
        })
        .collect()
}
