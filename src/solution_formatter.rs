use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::grid::Grid;
use crate::moves::Moves;

/// Every grid from the initial one to the last one, separated by empty lines.
pub struct SolutionFormatter<'a> {
    initial: &'a Grid,
    moves: &'a Moves,
    format: Format,
}

impl<'a> SolutionFormatter<'a> {
    pub(crate) fn new(initial: &'a Grid, moves: &'a Moves, format: Format) -> Self {
        Self {
            initial,
            moves,
            format,
        }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.initial.format(self.format))?;
        let mut last = self.initial.clone();
        for mov in self.moves {
            // moves could come from a different puzzle
            last = match last.shifted(mov.color, mov.dir) {
                Some(grid) => grid,
                None => return writeln!(f, "Can't apply move {}", mov),
            };
            writeln!(f, "{}", last.format(self.format))?;
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
