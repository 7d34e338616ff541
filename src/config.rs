use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Whitespace separated integers, one grid row per line
    Numeric,
    /// One character per cell: `.` is empty, `1`-`9` and `a`-`z` are colors
    Compact,
}

/// Which end of the frontier the search takes the next state from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Depth first - the frontier is a stack
    Dfs,
    /// Breadth first - the frontier is a queue
    Bfs,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Mode::Dfs => write!(f, "dfs"),
            Mode::Bfs => write!(f, "bfs"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dfs" => Ok(Mode::Dfs),
            "bfs" => Ok(Mode::Bfs),
            _ => Err(format!("Unknown search mode: {}", s)),
        }
    }
}
