use std::fmt::{self, Debug, Display, Formatter};

use prettytable::format::consts::FORMAT_CLEAN;
use prettytable::{Cell, Row, Table};
use separator::Separatable;

use crate::state::PuzzleState;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<usize>,
    visited_states: Vec<usize>,
    duplicate_states: Vec<usize>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_created(&self) -> usize {
        self.created_states.iter().sum()
    }

    pub fn total_unique_visited(&self) -> usize {
        self.visited_states.iter().sum()
    }

    pub fn total_reached_duplicates(&self) -> usize {
        self.duplicate_states.iter().sum()
    }

    /// States pushed to the frontier but never taken out of it.
    pub fn total_left(&self) -> usize {
        self.total_created() - self.total_unique_visited() - self.total_reached_duplicates()
    }

    /// Returns true when this is the first state at its depth.
    pub(crate) fn add_created(&mut self, state: &PuzzleState<'_>) -> bool {
        Self::add(&mut self.created_states, state)
    }

    pub(crate) fn add_unique_visited(&mut self, state: &PuzzleState<'_>) -> bool {
        Self::add(&mut self.visited_states, state)
    }

    pub(crate) fn add_reached_duplicate(&mut self, state: &PuzzleState<'_>) -> bool {
        Self::add(&mut self.duplicate_states, state)
    }

    fn add(counts: &mut Vec<usize>, state: &PuzzleState<'_>) -> bool {
        let depth = state.depth() as usize;
        let mut ret = false;

        // while because DFS can reach deep states before visiting all the shallow ones
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }

    fn depth_table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*FORMAT_CLEAN);
        table.set_titles(Row::new(vec![
            Cell::new("Depth"),
            Cell::new("Created"),
            Cell::new("Unique"),
            Cell::new("Duplicates"),
            Cell::new("Unknown (not reached)"),
        ]));

        // created states is the longest vec - everything visited was created first
        for depth in 0..self.created_states.len() {
            let created = self.created_states[depth];
            let visited = self.visited_states.get(depth).cloned().unwrap_or(0);
            let duplicates = self.duplicate_states.get(depth).cloned().unwrap_or(0);
            let left = created - visited - duplicates;
            table.add_row(Row::new(vec![
                Cell::new(&format!("{}:", depth)),
                Cell::new(&created.separated_string()),
                Cell::new(&visited.separated_string()),
                Cell::new(&duplicates.separated_string()),
                Cell::new(&left.separated_string()),
            ]));
        }
        table
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "total created / unique visited / reached duplicates:")?;
        writeln!(
            f,
            "{:<16}{:<17}{}",
            self.total_created().separated_string(),
            self.total_unique_visited().separated_string(),
            self.total_reached_duplicates().separated_string()
        )
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "States created total: {}", self.total_created().separated_string())?;
        writeln!(
            f,
            "Unique visited total: {}",
            self.total_unique_visited().separated_string()
        )?;
        writeln!(
            f,
            "Reached duplicates total: {}",
            self.total_reached_duplicates().separated_string()
        )?;
        writeln!(
            f,
            "Created but not reached total: {}",
            self.total_left().separated_string()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.depth_table())
    }
}
