use std::fmt::{self, Display, Formatter};

/// Block identifier, `EMPTY` marks a free cell.
pub type Color = u32;

pub const EMPTY: Color = 0;

/// Grids are indexed by u8 so this is the max number of rows and columns.
pub(crate) const MAX_SIZE: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: u8,
    pub c: u8,
}

impl Pos {
    pub fn new(r: u8, c: u8) -> Pos {
        Pos { r, c }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Right,
    Left,
}

/// The order in which moves are generated - affects DFS exploration order.
pub const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Right, Dir::Left];

impl Dir {
    /// Row and column delta.
    pub fn offset(self) -> (i16, i16) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Right => (0, 1),
            Dir::Left => (0, -1),
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "u"),
            Dir::Down => write!(f, "d"),
            Dir::Right => write!(f, "r"),
            Dir::Left => write!(f, "l"),
        }
    }
}
