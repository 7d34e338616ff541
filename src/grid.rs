use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use fnv::FnvHashSet;

use crate::config::Format;
use crate::data::{Color, Dir, Pos, EMPTY, MAX_SIZE};
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridErr {
    Empty,
    /// Index of the first row whose length differs from the first row
    RowLength(usize),
    Negative(usize, usize),
    ColorTooLarge(usize, usize),
    TooLarge,
}

impl Display for GridErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            GridErr::Empty => write!(f, "Empty grid"),
            GridErr::RowLength(r) => write!(f, "Row {} has a different length than row 0", r),
            GridErr::Negative(r, c) => write!(f, "Negative value at pos: [{}, {}]", r, c),
            GridErr::ColorTooLarge(r, c) => {
                write!(f, "Value too large for a color at pos: [{}, {}]", r, c)
            }
            GridErr::TooLarge => write!(f, "Grid larger than {} rows/columns", MAX_SIZE),
        }
    }
}

impl Error for GridErr {}

/// Rectangular matrix of colors, `EMPTY` cells are free.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec2d<Color>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<i64>>) -> Result<Self, GridErr> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(GridErr::Empty);
        }
        if rows.len() > MAX_SIZE || rows[0].len() > MAX_SIZE {
            return Err(GridErr::TooLarge);
        }

        let cols = rows[0].len();
        let mut colors = Vec::with_capacity(rows.len());
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(GridErr::RowLength(r));
            }
            let mut color_row = Vec::with_capacity(cols);
            for (c, value) in row.into_iter().enumerate() {
                if value < 0 {
                    return Err(GridErr::Negative(r, c));
                }
                if value > i64::from(Color::max_value()) {
                    return Err(GridErr::ColorTooLarge(r, c));
                }
                color_row.push(value as Color);
            }
            colors.push(color_row);
        }

        Ok(Grid {
            cells: Vec2d::from_rows(colors),
        })
    }

    pub fn rows(&self) -> usize {
        usize::from(self.cells.rows())
    }

    pub fn cols(&self) -> usize {
        usize::from(self.cells.cols())
    }

    pub fn get(&self, r: usize, c: usize) -> Option<Color> {
        if r < self.rows() && c < self.cols() {
            Some(self.cells[Pos::new(r as u8, c as u8)])
        } else {
            None
        }
    }

    pub fn same_shape(&self, other: &Grid) -> bool {
        self.cells.same_shape(&other.cells)
    }

    pub(crate) fn cells(&self) -> &Vec2d<Color> {
        &self.cells
    }

    pub fn to_rows(&self) -> Vec<Vec<Color>> {
        self.cells
            .cells()
            .chunks(self.cols())
            .map(|row| row.to_vec())
            .collect()
    }

    /// Distinct non-empty colors in the order they're first found
    /// scanning rows top to bottom and columns left to right.
    pub fn colors(&self) -> Vec<Color> {
        let mut seen = FnvHashSet::default();
        let mut colors = Vec::new();
        for &color in self.cells.cells() {
            if color != EMPTY && seen.insert(color) {
                colors.push(color);
            }
        }
        colors
    }

    pub fn count(&self, color: Color) -> usize {
        self.cells.cells().iter().filter(|&&c| c == color).count()
    }

    /// Every cell of `color` stays inside the grid and lands on an empty cell or one of its own.
    pub fn can_shift(&self, color: Color, dir: Dir) -> bool {
        self.cells
            .positions()
            .filter(|&pos| self.cells[pos] == color)
            .all(|pos| match self.cells.step(pos, dir) {
                Some(dest) => {
                    let dest_color = self.cells[dest];
                    dest_color == EMPTY || dest_color == color
                }
                None => false,
            })
    }

    /// A copy with the whole block moved by one cell or `None` if it's blocked.
    pub fn shifted(&self, color: Color, dir: Dir) -> Option<Grid> {
        let mut sources = Vec::new();
        let mut dests = Vec::new();
        for pos in self.cells.positions() {
            if self.cells[pos] != color {
                continue;
            }
            let dest = self.cells.step(pos, dir)?;
            let dest_color = self.cells[dest];
            if dest_color != EMPTY && dest_color != color {
                return None;
            }
            sources.push(pos);
            dests.push(dest);
        }

        // vacate everything first, otherwise we'd overwrite cells that were just moved into
        let mut cells = self.cells.clone();
        for &pos in &sources {
            cells[pos] = EMPTY;
        }
        for &pos in &dests {
            cells[pos] = color;
        }
        Some(Grid { cells })
    }

    pub fn format(&self, format: Format) -> GridFormatter<'_> {
        GridFormatter::new(self, format)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(Format::Numeric))
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

pub struct GridFormatter<'a> {
    grid: &'a Grid,
    format: Format,
}

impl<'a> GridFormatter<'a> {
    fn new(grid: &'a Grid, format: Format) -> Self {
        Self { grid, format }
    }

    fn write_numeric(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let width = self
            .grid
            .cells
            .cells()
            .iter()
            .map(|color| color.to_string().len())
            .max()
            .unwrap_or(1);

        for row in self.grid.cells.cells().chunks(self.grid.cols()) {
            for (i, color) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", color, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_compact(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.grid.cells.cells().chunks(self.grid.cols()) {
            for &color in row {
                write!(f, "{}", color_to_char(color).unwrap_or('#'))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Display for GridFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.format {
            Format::Numeric => self.write_numeric(f),
            Format::Compact => self.write_compact(f),
        }
    }
}

impl Debug for GridFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Compact format can only represent colors up to 35.
pub(crate) fn color_to_char(color: Color) -> Option<char> {
    if color == EMPTY {
        Some('.')
    } else {
        std::char::from_digit(color, 36)
    }
}

pub(crate) fn char_to_color(c: char) -> Option<Color> {
    match c {
        '.' | '-' => Some(EMPTY),
        'A'..='Z' => None,
        _ => c.to_digit(36),
    }
}
