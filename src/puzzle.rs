use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::grid::Grid;
use crate::moves::Moves;
use crate::solution_formatter::SolutionFormatter;

/// Initial grid and goal grid. Empty goal cells can hold anything.
#[derive(Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub initial: Grid,
    pub goal: Grid,
}

impl Puzzle {
    pub fn new(initial: Grid, goal: Grid) -> Self {
        Puzzle { initial, goal }
    }

    pub fn format(&self, format: Format) -> PuzzleFormatter<'_> {
        PuzzleFormatter {
            puzzle: self,
            format,
        }
    }

    pub fn format_solution<'a>(&'a self, format: Format, moves: &'a Moves) -> SolutionFormatter<'a> {
        SolutionFormatter::new(&self.initial, moves, format)
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(Format::Numeric))
    }
}

impl Debug for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

pub struct PuzzleFormatter<'a> {
    puzzle: &'a Puzzle,
    format: Format,
}

impl Display for PuzzleFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.puzzle.initial.format(self.format))?;
        write!(f, "{}", self.puzzle.goal.format(self.format))
    }
}

impl Debug for PuzzleFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
