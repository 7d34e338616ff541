use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::data::{Dir, Pos};

#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct Vec2d<T> {
    data: Vec<T>,
    rows: u8,
    cols: u8,
}

impl<T> Vec2d<T> {
    /// Rows must be non-empty, equally long and fit into u8 - the caller validates that.
    pub(crate) fn from_rows(grid: Vec<Vec<T>>) -> Self {
        assert!(!grid.is_empty() && !grid[0].is_empty());

        let rows = grid.len();
        let cols = grid[0].len();
        let mut data = Vec::with_capacity(rows * cols);
        for row in grid {
            assert_eq!(row.len(), cols);
            data.extend(row);
        }
        Vec2d {
            data,
            rows: rows as u8,
            cols: cols as u8,
        }
    }

    pub(crate) fn rows(&self) -> u8 {
        self.rows
    }

    pub(crate) fn cols(&self) -> u8 {
        self.cols
    }

    /// Cells in row-major order.
    pub(crate) fn cells(&self) -> &[T] {
        &self.data
    }

    /// All positions in row-major order.
    pub(crate) fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| Pos::new(r, c)))
    }

    /// The neighboring position in `dir` or `None` if it's outside the grid.
    pub(crate) fn step(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dr, dc) = dir.offset();
        let r = i16::from(pos.r) + dr;
        let c = i16::from(pos.c) + dc;
        if r < 0 || c < 0 || r >= i16::from(self.rows) || c >= i16::from(self.cols) {
            None
        } else {
            Some(Pos::new(r as u8, c as u8))
        }
    }

    pub(crate) fn same_shape<U>(&self, other: &Vec2d<U>) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }
}

impl<T: Display> Display for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols.into()) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Display> Debug for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl<T> Index<Pos> for Vec2d<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        let index = usize::from(index.r) * usize::from(self.cols) + usize::from(index.c);
        &self.data[index]
    }
}

impl<T> IndexMut<Pos> for Vec2d<T> {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        let index = usize::from(index.r) * usize::from(self.cols) + usize::from(index.c);
        &mut self.data[index]
    }
}
