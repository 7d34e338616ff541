mod frontier;
#[cfg(feature = "graph")]
mod graph;
mod stats;

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use fnv::FnvHashSet;
use log::{debug, trace};
use typed_arena::Arena;

use crate::config::Mode;
use crate::grid::Grid;
use crate::moves::Moves;
use crate::puzzle::Puzzle;
use crate::state::{PuzzleState, StateKey};
use crate::Solve;

use self::frontier::Frontier;
#[cfg(feature = "graph")]
use self::graph::Graph;

pub use self::stats::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    /// Rows and columns of the initial grid and the goal
    DimensionMismatch((usize, usize), (usize, usize)),
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::DimensionMismatch((r1, c1), (r2, c2)) => write!(
                f,
                "Initial grid is {}x{} but goal is {}x{}",
                r1, c1, r2, c2
            ),
        }
    }
}

impl Error for SolverErr {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Solved,
    Exhausted,
}

/// What happened during one call to `SearchEngine::advance`.
#[derive(Debug, Clone, Copy)]
pub enum Step<'a> {
    /// A new state was visited and its successors pushed to the frontier.
    /// `new_depth` is set when it's the first visited state at its depth.
    Expanded {
        state: &'a PuzzleState<'a>,
        new_depth: bool,
    },
    /// The state was already visited through another path, nothing changed.
    Duplicate(&'a PuzzleState<'a>),
    /// The state satisfies the goal. Repeated for every call after solving.
    Solved(&'a PuzzleState<'a>),
    /// The frontier is empty. Repeated for every call after exhausting.
    Exhausted,
}

impl<'a> Step<'a> {
    /// The state examined in this step.
    pub fn state(&self) -> Option<&'a PuzzleState<'a>> {
        match *self {
            Step::Expanded { state, .. } | Step::Duplicate(state) | Step::Solved(state) => {
                Some(state)
            }
            Step::Exhausted => None,
        }
    }
}

/// DFS or BFS over puzzle states, driven one step at a time.
///
/// States are allocated in `arena` and stay there after the engine is dropped
/// so they can be handed out as plain references.
pub struct SearchEngine<'a> {
    arena: &'a Arena<PuzzleState<'a>>,
    goal: PuzzleState<'a>,
    mode: Mode,
    frontier: Frontier<&'a PuzzleState<'a>>,
    visited: FnvHashSet<&'a StateKey>,
    status: Status,
    current: &'a PuzzleState<'a>,
    stats: Stats,
    #[cfg(feature = "graph")]
    graph: Graph<'a>,
}

impl<'a> SearchEngine<'a> {
    pub fn new(
        arena: &'a Arena<PuzzleState<'a>>,
        initial: Grid,
        goal: Grid,
        mode: Mode,
    ) -> Result<Self, SolverErr> {
        if !initial.same_shape(&goal) {
            return Err(SolverErr::DimensionMismatch(
                (initial.rows(), initial.cols()),
                (goal.rows(), goal.cols()),
            ));
        }

        let root: &'a PuzzleState<'a> = arena.alloc(PuzzleState::new(initial));
        let mut stats = Stats::new();
        stats.add_created(root);
        let mut frontier = Frontier::new(mode);
        frontier.push(root);

        #[cfg(feature = "graph")]
        let graph = {
            let mut graph = Graph::new();
            graph.add(root);
            graph
        };

        debug!(
            "Starting {} on {}x{} grid",
            mode,
            root.grid().rows(),
            root.grid().cols()
        );

        Ok(SearchEngine {
            arena,
            goal: PuzzleState::new(goal),
            mode,
            frontier,
            visited: FnvHashSet::default(),
            status: Status::Running,
            current: root,
            stats,
            #[cfg(feature = "graph")]
            graph,
        })
    }

    /// Takes one state from the frontier and processes it.
    ///
    /// Does nothing once the search is solved or exhausted.
    pub fn advance(&mut self) -> Step<'a> {
        match self.status {
            Status::Solved => return Step::Solved(self.current),
            Status::Exhausted => return Step::Exhausted,
            Status::Running => {}
        }

        let state = match self.frontier.pop() {
            Some(state) => state,
            None => {
                debug!("Frontier empty, no solution");
                self.status = Status::Exhausted;
                return Step::Exhausted;
            }
        };
        self.current = state;

        if self.visited.contains(state.id()) {
            trace!("Duplicate at depth {}", state.depth());
            self.stats.add_reached_duplicate(state);
            #[cfg(feature = "graph")]
            self.graph.mark_duplicate(state);
            return Step::Duplicate(state);
        }

        // mark when visiting, not when pushing to the frontier,
        // DFS would otherwise never revisit a state through a different branch
        self.visited.insert(state.id());
        let new_depth = self.stats.add_unique_visited(state);

        if state.is_goal(&self.goal) {
            debug!("Solved at depth {}", state.depth());
            self.status = Status::Solved;
            #[cfg(feature = "graph")]
            self.graph.mark_goal(state);
            return Step::Solved(state);
        }
        #[cfg(feature = "graph")]
        self.graph.mark_visited(state);

        for mov in state.legal_moves() {
            let next = state.apply_move(mov);
            // blocked moves give back the same state which is already visited
            if self.visited.contains(next.id()) {
                continue;
            }
            let next: &'a PuzzleState<'a> = self.arena.alloc(next);
            self.stats.add_created(next);
            #[cfg(feature = "graph")]
            self.graph.add(next);
            self.frontier.push(next);
        }
        trace!(
            "Expanded depth {}, frontier size {}",
            state.depth(),
            self.frontier.len()
        );

        Step::Expanded { state, new_depth }
    }

    /// Advances until the search is solved or exhausted, calling `on_step` after every step.
    pub fn run<F>(&mut self, mut on_step: F) -> Status
    where
        F: FnMut(&SearchEngine<'a>, Step<'a>),
    {
        while self.status == Status::Running {
            let step = self.advance();
            on_step(&*self, step);
        }
        self.status
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// The most recently examined state, the initial state before the first step.
    pub fn current(&self) -> &'a PuzzleState<'a> {
        self.current
    }

    /// Moves from the initial state to the goal, only available once solved.
    pub fn path(&self) -> Option<Moves> {
        if self.status == Status::Solved {
            Some(self.current.trace_path())
        } else {
            None
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn visited_cnt(&self) -> usize {
        self.visited.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Writes every state created so far and the links between them in graphviz dot format.
    #[cfg(feature = "graph")]
    pub fn write_graph<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.graph.write(writer)
    }

    pub fn into_result(self) -> SolverOk {
        SolverOk::new(self.path(), self.stats, self.mode)
    }
}

impl Debug for SearchEngine<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngine")
            .field("mode", &self.mode)
            .field("status", &self.status)
            .field("frontier", &self.frontier.len())
            .field("visited", &self.visited.len())
            .field("current", &self.current)
            .finish()
    }
}

pub struct SolverOk {
    pub moves: Option<Moves>,
    pub stats: Stats,
    pub mode: Mode,
}

impl SolverOk {
    fn new(moves: Option<Moves>, stats: Stats, mode: Mode) -> Self {
        Self { moves, stats, mode }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.moves {
            None => writeln!(f, "No solution")?,
            Some(ref moves) => writeln!(f, "{}: {}", self.mode, moves.move_cnt())?,
        }
        write!(f, "{:?}", self.stats)
    }
}

impl Solve for Puzzle {
    fn solve(&self, mode: Mode, print_status: bool) -> Result<SolverOk, SolverErr> {
        solve(self, mode, print_status)
    }
}

pub fn solve(puzzle: &Puzzle, mode: Mode, print_status: bool) -> Result<SolverOk, SolverErr> {
    let arena = Arena::new();
    let mut engine = SearchEngine::new(&arena, puzzle.initial.clone(), puzzle.goal.clone(), mode)?;

    engine.run(|engine, step| {
        if let Step::Expanded {
            state,
            new_depth: true,
        } = step
        {
            if print_status {
                println!("Visited new depth: {}", state.depth());
                println!("{:?}", engine.stats());
            }
        }
    });

    Ok(engine.into_result())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[i64]]) -> Grid {
        Grid::new(rows.iter().map(|row| row.to_vec()).collect()).unwrap()
    }

    fn example() -> Puzzle {
        Puzzle::new(
            grid(&[&[1, 1, 0, 0], &[0, 0, 0, 0], &[2, 0, 6, 6], &[2, 2, 0, 6]]),
            grid(&[&[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 1, 1]]),
        )
    }

    /// Replays moves from the start and checks every one of them actually moves something.
    fn replay(start: &Grid, moves: &Moves) -> Grid {
        let mut cur = start.clone();
        for mov in moves {
            let next = cur.shifted(mov.color, mov.dir).unwrap();
            assert_ne!(next, cur);
            cur = next;
        }
        cur
    }

    #[test]
    fn dimension_mismatch() {
        let arena = Arena::new();
        let err = SearchEngine::new(
            &arena,
            grid(&[&[1, 0], &[0, 0]]),
            grid(&[&[0, 0, 0], &[0, 0, 1]]),
            Mode::Bfs,
        )
        .unwrap_err();
        assert_eq!(err, SolverErr::DimensionMismatch((2, 2), (2, 3)));
        assert_eq!(err.to_string(), "Initial grid is 2x2 but goal is 2x3");
    }

    #[test]
    fn solving_example_bfs() {
        let puzzle = example();
        let solution = puzzle.solve(Mode::Bfs, false).unwrap();
        let moves = solution.moves.unwrap();

        assert!(!moves.is_empty());
        // 1 has to get 3 rows down and 2 columns right
        assert!(moves.color_cnt(1) >= 5);

        let end = PuzzleState::new(replay(&puzzle.initial, &moves));
        assert!(end.is_goal(&PuzzleState::new(puzzle.goal.clone())));
    }

    #[test]
    fn solving_example_dfs() {
        let puzzle = example();
        let bfs = puzzle.solve(Mode::Bfs, false).unwrap().moves.unwrap();
        let dfs = puzzle.solve(Mode::Dfs, false).unwrap().moves.unwrap();

        let end = PuzzleState::new(replay(&puzzle.initial, &dfs));
        assert!(end.is_goal(&PuzzleState::new(puzzle.goal.clone())));
        assert!(dfs.move_cnt() >= bfs.move_cnt());
    }

    #[test]
    fn deterministic() {
        let puzzle = example();
        for &mode in &[Mode::Dfs, Mode::Bfs] {
            let first = puzzle.solve(mode, false).unwrap();
            let second = puzzle.solve(mode, false).unwrap();
            assert_eq!(first.moves, second.moves);
            assert!(first.stats == second.stats);
        }
    }

    #[test]
    fn stepping_to_solution() {
        let puzzle = example();
        let arena = Arena::new();
        let mut engine = SearchEngine::new(
            &arena,
            puzzle.initial.clone(),
            puzzle.goal.clone(),
            Mode::Bfs,
        )
        .unwrap();

        assert_eq!(engine.status(), Status::Running);
        assert_eq!(engine.current().grid(), &puzzle.initial);
        assert_eq!(engine.frontier_len(), 1);
        assert!(engine.path().is_none());

        // the initial state is visited first and its 6 legal moves queued
        match engine.advance() {
            Step::Expanded { state, new_depth } => {
                assert!(state.parent().is_none());
                assert!(new_depth);
            }
            step => panic!("unexpected step {:?}", step),
        }
        assert_eq!(engine.visited_cnt(), 1);
        assert_eq!(engine.frontier_len(), 6);

        let mut last_depth = 0;
        let solved = loop {
            match engine.advance() {
                Step::Expanded { state, .. } | Step::Duplicate(state) => {
                    // BFS never goes back to a shallower depth
                    assert!(state.depth() >= last_depth);
                    last_depth = state.depth();
                }
                Step::Solved(state) => break state,
                Step::Exhausted => panic!("example should be solvable"),
            }
        };

        assert_eq!(engine.status(), Status::Solved);
        assert!(std::ptr::eq(engine.current(), solved));
        let path = engine.path().unwrap();
        assert_eq!(path, solved.trace_path());
        assert_eq!(path.move_cnt(), solved.depth() as usize);
        assert_eq!(replay(&puzzle.initial, &path), *solved.grid());

        // solved is terminal
        let visited = engine.visited_cnt();
        for _ in 0..3 {
            match engine.advance() {
                Step::Solved(state) => assert!(std::ptr::eq(state, solved)),
                step => panic!("unexpected step {:?}", step),
            }
        }
        assert_eq!(engine.visited_cnt(), visited);
        assert_eq!(engine.status(), Status::Solved);
    }

    #[test]
    fn initial_state_is_goal() {
        let puzzle = Puzzle::new(grid(&[&[1, 0], &[0, 0]]), grid(&[&[1, 0], &[0, 0]]));
        let solution = puzzle.solve(Mode::Dfs, false).unwrap();
        assert_eq!(solution.moves, Some(Moves::default()));
        assert_eq!(solution.stats.total_unique_visited(), 1);
    }

    #[test]
    fn exhausting_unreachable_goal() {
        // color 9 doesn't exist so the goal is never reached
        let initial = grid(&[&[1, 1, 0, 0], &[0, 0, 0, 0], &[2, 0, 6, 6], &[2, 2, 0, 6]]);
        let goal = grid(&[&[9, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        let puzzle = Puzzle::new(initial, goal);

        let dfs = puzzle.solve(Mode::Dfs, false).unwrap();
        let bfs = puzzle.solve(Mode::Bfs, false).unwrap();
        assert!(dfs.moves.is_none());
        assert!(bfs.moves.is_none());

        // both explore the whole reachable space, each state exactly once
        let visited = dfs.stats.total_unique_visited();
        assert!(visited > 1);
        assert_eq!(visited, bfs.stats.total_unique_visited());
        // nothing is left in the frontier
        assert_eq!(dfs.stats.total_left(), 0);
        assert_eq!(bfs.stats.total_left(), 0);
    }

    #[test]
    fn exhausting_stuck_blocks() {
        let arena = Arena::new();
        let mut engine = SearchEngine::new(
            &arena,
            grid(&[&[1, 2], &[3, 4]]),
            grid(&[&[0, 0], &[0, 1]]),
            Mode::Dfs,
        )
        .unwrap();

        let status = engine.run(|_, _| {});
        assert_eq!(status, Status::Exhausted);
        assert_eq!(engine.visited_cnt(), 1);
        assert!(engine.path().is_none());
        match engine.advance() {
            Step::Exhausted => {}
            step => panic!("unexpected step {:?}", step),
        }
        assert!(engine.advance().state().is_none());
    }

    #[test]
    fn dfs_explores_last_move_first() {
        // legal moves are 1d then 1r, the stack gives back 1r first
        let arena = Arena::new();
        let mut engine = SearchEngine::new(
            &arena,
            grid(&[&[1, 0], &[0, 0]]),
            grid(&[&[0, 0], &[0, 1]]),
            Mode::Dfs,
        )
        .unwrap();

        engine.advance();
        let second = engine.advance().state().unwrap();
        assert_eq!(second.grid(), &grid(&[&[0, 1], &[0, 0]]));
    }

    #[test]
    fn duplicates_are_skipped() {
        // both 1r,1d and 1d,1r reach the bottom right corner
        let puzzle = Puzzle::new(grid(&[&[1, 0], &[0, 0]]), grid(&[&[2, 0], &[0, 0]]));
        let arena = Arena::new();
        let mut engine =
            SearchEngine::new(&arena, puzzle.initial.clone(), puzzle.goal.clone(), Mode::Bfs)
                .unwrap();

        let mut duplicates = 0;
        engine.run(|_, step| {
            if let Step::Duplicate(_) = step {
                duplicates += 1;
            }
        });

        assert_eq!(engine.status(), Status::Exhausted);
        // 4 positions of a single cell block
        assert_eq!(engine.visited_cnt(), 4);
        assert_eq!(duplicates, engine.stats().total_reached_duplicates());
        assert!(duplicates > 0);
    }
}
