//! Four phase solving of 3x3 cubes.

use std::collections::{HashMap, VecDeque};

use strum::{Display, VariantArray};
use tracing::{debug, trace};

use crate::config::SolverConfig;
use crate::cubie::{CubeState, Move, CORNERS, EDGES};
use crate::error::SolutionGenerationError;
use crate::notation::{Solution, Turn};

/// The four nested subgroups a cube is reduced through, each with fewer legal moves than the last.
#[derive(Copy, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum Phase {
    /// Fix edge orientation.
    EdgeOrientation = 1,
    /// Fix corner orientation and bring the middle slice edges into their slice.
    CornerOrientation = 2,
    /// Bring every cubie into its home tetrad or slice with even overall parity.
    Tetrads = 3,
    /// Solve using half turns only.
    HalfTurns = 4,
}

impl Phase {
    /// Bit `m` is set if move `m` is legal in this phase.
    pub fn move_mask(self) -> u32 {
        match self {
            Phase::EdgeOrientation => 262143,
            Phase::CornerOrientation => 259263,
            Phase::Tetrads => 74943,
            Phase::HalfTurns => 74898,
        }
    }

    /// Whether `mv` may be used in this phase.
    pub fn allows(self, mv: Move) -> bool {
        self.move_mask() & (1 << mv.index()) != 0
    }

    /// The legal moves in index order.
    pub fn moves(self) -> impl Iterator<Item = Move> {
        Move::all().filter(move |&mv| self.allows(mv))
    }

    /// Project `state` onto the part this phase cares about.
    ///
    /// Two states share a key exactly when they are equivalent for this phase's goal, so meeting
    /// the goal key is enough to finish the phase.
    pub fn key(self, state: &CubeState) -> u128 {
        match self {
            Phase::EdgeOrientation => (0..EDGES).fold(0, |key, e| key | (state.orient[e] as u128) << e),
            Phase::CornerOrientation => {
                let corners = (0..CORNERS).fold(0, |key, c| key | (state.orient[EDGES + c] as u128) << (2 * c));
                let slice = (0..EDGES).fold(0, |key, e| key | ((state.perm[e] / 8) as u128) << e);
                corners | slice << 16
            }
            Phase::Tetrads => {
                let edges = (0..EDGES).fold(0u128, |key, e| {
                    let class = if state.perm[e] > 7 { 2 } else { state.perm[e] & 1 };
                    key | (class as u128) << (2 * e)
                });
                let corners = (0..CORNERS).fold(0u128, |key, c| {
                    key | (((state.perm[EDGES + c] - EDGES as u8) & 5) as u128) << (3 * c)
                });
                let parity = (EDGES..20)
                    .flat_map(|i| (i + 1..20).map(move |j| (i, j)))
                    .fold(0u128, |parity, (i, j)| parity ^ (state.perm[i] > state.perm[j]) as u128);

                edges | corners << 24 | parity << 48
            }
            Phase::HalfTurns => {
                let perm = state.perm.iter().enumerate()
                    .fold(0u128, |key, (i, &p)| key | (p as u128) << (5 * i));
                let edges = (0..EDGES).fold(0u128, |key, e| key | (state.orient[e] as u128) << (100 + e));
                let corners = (0..CORNERS).fold(0u128, |key, c| key | (state.orient[EDGES + c] as u128) << (112 + 2 * c));

                perm | edges | corners
            }
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Direction {
    Forward,
    Backward,
}

#[derive(Copy, Clone, Debug)]
struct Visit {
    direction: Direction,
    // predecessor key and the move that left it; `None` at the roots
    via: Option<(u128, Move)>,
}

/// Tables for one phase's bidirectional search, dropped when the phase ends.
struct PhaseSearch {
    phase: Phase,
    visits: HashMap<u128, Visit>,
    queue: VecDeque<CubeState>,
}

impl PhaseSearch {
    fn new(phase: Phase, start: &CubeState, goal: &CubeState) -> Self {
        let mut visits = HashMap::new();
        visits.insert(phase.key(start), Visit { direction: Direction::Forward, via: None });
        visits.insert(phase.key(goal), Visit { direction: Direction::Backward, via: None });

        Self { phase, visits, queue: VecDeque::from([*start, *goal]) }
    }

    // moves leading from the root of a search tree to `key`
    fn path_to(&self, mut key: u128) -> Vec<Move> {
        let mut path = Vec::new();
        while let Some(Visit { via: Some((predecessor, mv)), .. }) = self.visits.get(&key) {
            path.push(*mv);
            key = *predecessor;
        }
        path.reverse();
        path
    }

    /// Run until the two searches meet and return the connecting moves.
    fn run(mut self) -> Result<Vec<Move>, SolutionGenerationError> {
        while let Some(old_state) = self.queue.pop_front() {
            let old_key = self.phase.key(&old_state);
            let Some(old_direction) = self.visits.get(&old_key).map(|v| v.direction) else { continue };

            for mv in self.phase.moves() {
                let new_state = old_state.apply(mv);
                let new_key = self.phase.key(&new_state);

                match self.visits.get(&new_key).map(|v| v.direction) {
                    Some(new_direction) if new_direction != old_direction => {
                        // orient the link from the forward tree to the backward tree
                        let (forward_key, backward_key, link) = match old_direction {
                            Direction::Forward => (old_key, new_key, mv),
                            Direction::Backward => (new_key, old_key, mv.inverse()),
                        };

                        let mut algorithm = self.path_to(forward_key);
                        algorithm.push(link);
                        algorithm.extend(self.path_to(backward_key).into_iter().rev().map(Move::inverse));

                        debug!(phase = %self.phase, explored = self.visits.len(), length = algorithm.len(), "phase searches met");
                        return Ok(algorithm);
                    }
                    Some(_) => {}
                    None => {
                        self.visits.insert(new_key, Visit { direction: old_direction, via: Some((old_key, mv)) });
                        self.queue.push_back(new_state);
                    }
                }
            }
        }

        Err(SolutionGenerationError::Unreachable { phase: self.phase as u8 })
    }
}

/// Thistlethwaite-style solver for 3x3 cubes described by cubicle labels.
///
/// The cube is reduced through four phases in order. Each phase runs a bidirectional breadth
/// first search between the live state and the solved state, comparing states only by that
/// phase's [`key`](Phase::key), and the moves it finds are applied before the next phase starts.
#[derive(Clone, Debug, Default)]
pub struct PhasedSolver {
    config: SolverConfig,
}

impl PhasedSolver {
    /// A solver using `config`.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Map labels in `UF UR .. DBR` order to a state, checking it is solvable when configured to.
    pub fn prepare<S: AsRef<str>>(&self, cubicles: &[S]) -> Result<CubeState, SolutionGenerationError> {
        let state = CubeState::from_cubicles(cubicles)?;
        if self.config.verify_invariants {
            state.verify()?;
        }

        Ok(state)
    }

    /// Solve one phase, returning the moves found and the state they lead to.
    ///
    /// Returns no moves when `state` already satisfies the phase. Unsolvable states are rejected
    /// before searching when configured to.
    pub fn run_phase(&self, phase: Phase, state: &CubeState) -> Result<(Vec<Move>, CubeState), SolutionGenerationError> {
        if self.config.verify_invariants {
            state.verify()?;
        }

        let goal = CubeState::SOLVED;
        if phase.key(state) == phase.key(&goal) {
            trace!(%phase, "phase already satisfied");
            return Ok((Vec::new(), *state));
        }

        let algorithm = PhaseSearch::new(phase, state, &goal).run()?;
        let next = state.apply_all(algorithm.iter().copied());

        Ok((algorithm, next))
    }

    /// Raw moves solving `state`, unfolded. Checked like [`Self::run_phase`].
    pub fn solve_state(&self, state: &CubeState) -> Result<Vec<Move>, SolutionGenerationError> {
        let mut moves = Vec::new();
        let mut current = *state;

        for &phase in Phase::VARIANTS {
            let (algorithm, next) = self.run_phase(phase, &current)?;
            moves.extend(algorithm);
            current = next;
        }

        Ok(moves)
    }

    /// Solve a cube given as 20 cubicle labels.
    pub fn solve<S: AsRef<str>>(&self, cubicles: &[S]) -> Result<Solution, SolutionGenerationError> {
        let state = self.prepare(cubicles)?;
        let moves = self.solve_state(&state)?;
        debug!(raw_moves = moves.len(), "phased solve finished");

        Ok(Solution::new(moves.into_iter().map(Turn::from)))
    }
}
