use std::fmt::{self, Debug, Formatter};

use crate::data::{Color, EMPTY, DIRECTIONS};
use crate::grid::Grid;
use crate::moves::{Move, Moves};

/// Identity of a grid used for detecting duplicate states.
///
/// Encodes the shape and then every cell in row-major order
/// so two grids have the same key exactly when they're equal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StateKey(Box<[u8]>);

impl StateKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for StateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

pub fn canonical_key(grid: &Grid) -> StateKey {
    let cells = grid.cells();
    let mut bytes = Vec::with_capacity(2 + cells.cells().len() * 4);
    bytes.push(cells.rows());
    bytes.push(cells.cols());
    for &color in cells.cells() {
        bytes.extend_from_slice(&color.to_le_bytes());
    }
    StateKey(bytes.into_boxed_slice())
}

/// Immutable snapshot of the grid with a link to the state it was reached from.
///
/// States reached during a search live in an arena so the links are plain references.
#[derive(Clone)]
pub struct PuzzleState<'a> {
    grid: Grid,
    id: StateKey,
    parent: Option<&'a PuzzleState<'a>>,
    mov: Option<Move>,
    depth: u32,
}

impl<'a> PuzzleState<'a> {
    /// A root state - no parent and no move.
    pub fn new(grid: Grid) -> Self {
        let id = canonical_key(&grid);
        PuzzleState {
            grid,
            id,
            parent: None,
            mov: None,
            depth: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn id(&self) -> &StateKey {
        &self.id
    }

    pub fn parent(&self) -> Option<&'a PuzzleState<'a>> {
        self.parent
    }

    pub fn mov(&self) -> Option<Move> {
        self.mov
    }

    /// Number of moves from the root.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// All moves where the whole block stays inside the grid
    /// and only lands on empty cells or cells of its own color.
    ///
    /// Colors come in the order they're first found scanning row by row,
    /// each tried in the order up, down, right, left.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for color in self.grid.colors() {
            for &dir in &DIRECTIONS {
                if self.grid.can_shift(color, dir) {
                    moves.push(Move::new(color, dir));
                }
            }
        }
        moves
    }

    /// Moves the block and links the result to `self`.
    ///
    /// A blocked move returns an unchanged copy of `self` (same id, parent and move)
    /// so callers detect rejection by comparing ids.
    pub fn apply_move(&'a self, mov: Move) -> PuzzleState<'a> {
        match self.grid.shifted(mov.color, mov.dir) {
            Some(grid) => {
                let id = canonical_key(&grid);
                PuzzleState {
                    grid,
                    id,
                    parent: Some(self),
                    mov: Some(mov),
                    depth: self.depth + 1,
                }
            }
            None => self.clone(),
        }
    }

    /// Empty cells in the goal match anything.
    pub fn is_goal(&self, goal: &PuzzleState<'_>) -> bool {
        let goal_cells = goal.grid.cells();
        let cells = self.grid.cells();
        if !cells.same_shape(goal_cells) {
            return false;
        }
        goal_cells
            .positions()
            .all(|pos| goal_cells[pos] == EMPTY || cells[pos] == goal_cells[pos])
    }

    /// Moves leading from the root to this state.
    pub fn trace_path(&self) -> Moves {
        let mut moves = Moves::default();
        let mut cur = self;
        while let (Some(parent), Some(mov)) = (cur.parent, cur.mov) {
            moves.add(mov);
            cur = parent;
        }
        moves.reverse();
        moves
    }

    pub fn count(&self, color: Color) -> usize {
        self.grid.count(color)
    }
}

impl Debug for PuzzleState<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.mov {
            Some(mov) => writeln!(f, "depth {} after {}:", self.depth, mov)?,
            None => writeln!(f, "depth {}:", self.depth)?,
        }
        write!(f, "{}", self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dir::{self, *};

    fn grid(rows: &[&[i64]]) -> Grid {
        Grid::new(rows.iter().map(|row| row.to_vec()).collect()).unwrap()
    }

    fn state(rows: &[&[i64]]) -> PuzzleState<'static> {
        PuzzleState::new(grid(rows))
    }

    fn mv(color: Color, dir: Dir) -> Move {
        Move::new(color, dir)
    }

    #[test]
    fn keys_follow_contents() {
        let a = state(&[&[1, 1], &[0, 2]]);
        let b = state(&[&[1, 1], &[0, 2]]);
        let c = state(&[&[1, 1], &[2, 0]]);
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
        assert_eq!(canonical_key(a.grid()), *a.id());
    }

    #[test]
    fn keys_include_shape() {
        // same cells in row-major order, different shape
        let wide = state(&[&[1, 0, 0, 2]]);
        let square = state(&[&[1, 0], &[0, 2]]);
        let tall = state(&[&[1], &[0], &[0], &[2]]);
        assert_ne!(wide.id(), square.id());
        assert_ne!(wide.id(), tall.id());
        assert_ne!(square.id(), tall.id());
    }

    #[test]
    fn keys_distinguish_large_colors() {
        let a = state(&[&[256, 0]]);
        let b = state(&[&[0, 1]]);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id().as_bytes().len(), 2 + 2 * 4);
    }

    #[test]
    fn legal_moves_order() {
        let s = state(&[&[1, 1, 0], &[0, 0, 0], &[0, 0, 2]]);
        assert_eq!(
            s.legal_moves(),
            vec![mv(1, Down), mv(1, Right), mv(2, Up), mv(2, Left)]
        );
    }

    #[test]
    fn legal_moves_discovery_order() {
        // 6 is found before 2 because it appears in an earlier row
        let s = state(&[&[0, 6], &[2, 0]]);
        assert_eq!(
            s.legal_moves(),
            vec![mv(6, Down), mv(6, Left), mv(2, Up), mv(2, Right)]
        );
    }

    #[test]
    fn legal_moves_none() {
        let s = state(&[&[1, 2], &[3, 4]]);
        assert!(s.legal_moves().is_empty());
        let empty = state(&[&[0, 0], &[0, 0]]);
        assert!(empty.legal_moves().is_empty());
    }

    #[test]
    fn legal_moves_initial_example() {
        let s = state(&[&[1, 1, 0, 0], &[0, 0, 0, 0], &[2, 0, 6, 6], &[2, 2, 0, 6]]);
        assert_eq!(
            s.legal_moves(),
            vec![
                mv(1, Down),
                mv(1, Right),
                mv(2, Up),
                mv(2, Right),
                mv(6, Up),
                mv(6, Left),
            ]
        );
    }

    #[test]
    fn applying_moves() {
        let root = state(&[&[2, 0, 6, 6], &[2, 2, 0, 6]]);
        let next = root.apply_move(mv(6, Left));

        assert_eq!(*next.grid(), grid(&[&[2, 6, 6, 0], &[2, 2, 6, 0]]));
        assert_ne!(next.id(), root.id());
        assert_eq!(next.mov(), Some(mv(6, Left)));
        assert_eq!(next.depth(), 1);
        assert!(std::ptr::eq(next.parent().unwrap(), &root));

        // moving preserves the block size and vacates the old cells
        assert_eq!(next.count(6), root.count(6));
        assert_eq!(next.count(2), root.count(2));
        assert_eq!(next.grid().get(0, 3), Some(0));
        assert_eq!(next.grid().get(1, 3), Some(0));

        // the source is untouched
        assert_eq!(*root.grid(), grid(&[&[2, 0, 6, 6], &[2, 2, 0, 6]]));
    }

    #[test]
    fn applying_rejected_moves() {
        let root = state(&[&[1, 2], &[1, 0]]);
        let next = root.apply_move(mv(2, Down));

        for &bad in &[mv(1, Right), mv(1, Up), mv(1, Left), mv(2, Left), mv(2, Down), mv(2, Right)] {
            let same = next.apply_move(bad);
            assert_eq!(same.id(), next.id());
            assert_eq!(same.grid(), next.grid());
            assert_eq!(same.mov(), next.mov());
            assert_eq!(same.depth(), next.depth());
            assert!(std::ptr::eq(same.parent().unwrap(), &root));
        }
    }

    #[test]
    fn applying_without_checking_legality() {
        // the block would leave the grid - nothing moves, nothing disappears
        let root = state(&[&[0, 0, 3], &[0, 0, 3]]);
        let same = root.apply_move(mv(3, Right));
        assert_eq!(same.id(), root.id());
        assert_eq!(same.count(3), 2);
        assert!(same.parent().is_none());
    }

    #[test]
    fn goal_wildcards() {
        let goal = state(&[&[0, 0], &[0, 5]]);
        assert!(state(&[&[1, 1], &[0, 5]]).is_goal(&goal));
        assert!(state(&[&[9, 9], &[0, 5]]).is_goal(&goal));
        assert!(state(&[&[0, 0], &[0, 5]]).is_goal(&goal));
        assert!(!state(&[&[0, 5], &[0, 0]]).is_goal(&goal));
        assert!(!state(&[&[0, 0], &[0, 4]]).is_goal(&goal));

        // an all empty goal is always reached
        let anything = state(&[&[0, 0], &[0, 0]]);
        assert!(state(&[&[3, 3], &[3, 0]]).is_goal(&anything));
    }

    #[test]
    fn goal_different_shape() {
        let goal = state(&[&[0, 0, 0], &[0, 0, 0]]);
        assert!(!state(&[&[0, 0], &[0, 0]]).is_goal(&goal));
    }

    #[test]
    fn tracing_paths() {
        let root = state(&[&[1, 0, 0], &[0, 0, 0]]);
        assert!(root.trace_path().is_empty());

        let s1 = root.apply_move(mv(1, Right));
        let s2 = s1.apply_move(mv(1, Down));
        let s3 = s2.apply_move(mv(1, Right));
        assert_eq!(s3.depth(), 3);
        assert_eq!(
            s3.trace_path(),
            Moves::new(vec![mv(1, Right), mv(1, Down), mv(1, Right)])
        );

        // replaying the path reproduces the grid
        let mut replayed = root.grid().clone();
        for m in &s3.trace_path() {
            replayed = replayed.shifted(m.color, m.dir).unwrap();
        }
        assert_eq!(replayed, *s3.grid());
        assert_eq!(replayed, grid(&[&[0, 0, 0], &[0, 0, 1]]));
    }
}
