//! The 2x2 cube, modeled as 24 facelets and solved by bidirectional search.

use std::collections::BTreeMap;

use itertools::Itertools;
use strum::VariantArray;
use tracing::{debug, trace};

use crate::config::SolverConfig;
use crate::error::SolutionGenerationError;
use crate::face::Face;
use crate::notation::{Solution, Turn};

/// The faces a 2x2 is turned by; holding the DLB corner still, these reach every state.
pub const GENERATORS: [Face; 3] = [Face::R, Face::U, Face::F];

/// Facelet slot order: U face, then the top rows of L F R B, then their bottom rows, then D.
// new[i] = old[PERMUTATIONS[g][i]] for a clockwise quarter turn of GENERATORS[g]
const PERMUTATIONS: [[usize; 24]; 3] = [
    [0, 7, 2, 15, 4, 5, 6, 21, 16, 8, 3, 11, 12, 13, 14, 23, 17, 9, 1, 19, 20, 18, 22, 10],
    [2, 0, 3, 1, 6, 7, 8, 9, 10, 11, 4, 5, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23],
    [0, 1, 13, 5, 4, 20, 14, 6, 2, 9, 10, 11, 12, 21, 15, 7, 3, 17, 18, 19, 16, 8, 22, 23],
];

// the three facelets of the fixed DLB corner, on L, B and D
const ANCHOR_L: usize = 12;
const ANCHOR_B: usize = 19;
const ANCHOR_D: usize = 22;

const L_SLOTS: [usize; 4] = [4, 5, 12, 13];
const B_SLOTS: [usize; 4] = [10, 11, 18, 19];
const D_SLOTS: [usize; 4] = [20, 21, 22, 23];

type Pattern = [Option<Face>; 24];

fn quarter_turn<T: Copy>(facelets: &[T; 24], generator: usize) -> [T; 24] {
    PERMUTATIONS[generator].map(|from| facelets[from])
}

/// Apply an R, U or F turn to 24 facelets. Other faces cannot be turned in this model.
pub fn apply_turn<T: Copy>(facelets: &[T; 24], turn: Turn) -> Option<[T; 24]> {
    let generator = GENERATORS.iter().position(|&face| face == turn.face)?;
    Some((0..turn.quarter_turns).fold(*facelets, |state, _| quarter_turn(&state, generator)))
}

/// Bidirectional breadth first search for the 2x2 cube.
///
/// Only the colors of the fixed DLB corner are tracked; every other facelet is blanked. The goal
/// is then the pattern with those three colors filling the L, B and D faces. The search advances
/// a forward frontier from the scramble and a backward frontier from the goal one move per
/// round each, stopping at the first state both have reached.
#[derive(Clone, Debug)]
pub struct PocketSolver {
    rounds: usize,
}

impl Default for PocketSolver {
    fn default() -> Self {
        Self::new(&SolverConfig::default())
    }
}

impl PocketSolver {
    /// A solver searching at most `config.pocket_rounds` rounds.
    pub fn new(config: &SolverConfig) -> Self {
        Self { rounds: config.pocket_rounds }
    }

    fn validate(facelets: &[Face]) -> Result<[Face; 24], SolutionGenerationError> {
        let facelets: [Face; 24] = facelets.try_into()
            .map_err(|_| SolutionGenerationError::InputLength { expected: 24, actual: facelets.len() })?;

        let counts = facelets.iter().counts();
        for face in Face::VARIANTS {
            let count = counts.get(face).copied().unwrap_or(0);
            if count != 4 {
                return Err(SolutionGenerationError::FaceletCount { face: *face, count });
            }
        }

        Ok(facelets)
    }

    // the masked scramble and the goal it must reach
    fn terminal_patterns(facelets: &[Face; 24]) -> (Pattern, Pattern) {
        let anchors = [facelets[ANCHOR_L], facelets[ANCHOR_B], facelets[ANCHOR_D]];
        let scramble = facelets.map(|face| anchors.contains(&face).then_some(face));

        let mut goal = [None; 24];
        for (slots, anchor) in [(L_SLOTS, ANCHOR_L), (B_SLOTS, ANCHOR_B), (D_SLOTS, ANCHOR_D)] {
            for slot in slots {
                goal[slot] = scramble[anchor];
            }
        }

        (scramble, goal)
    }

    /// Solve 24 face letters in slot order.
    pub fn solve(&self, facelets: &[Face]) -> Result<Solution, SolutionGenerationError> {
        let facelets = Self::validate(facelets)?;
        let (scramble, goal) = Self::terminal_patterns(&facelets);

        let mut forward: BTreeMap<Pattern, Vec<Turn>> = BTreeMap::from([(scramble, Vec::new())]);
        let mut backward: BTreeMap<Pattern, Vec<Turn>> = BTreeMap::from([(goal, Vec::new())]);

        for round in 0..self.rounds {
            let mut next = BTreeMap::new();
            for (state, path) in &forward {
                if let Some(rest) = backward.get(state) {
                    return Ok(Self::joined(path, rest));
                }

                for generator in 0..GENERATORS.len() {
                    let mut turned = *state;
                    for quarter_turns in 1..=3 {
                        turned = quarter_turn(&turned, generator);
                        let mut extended = path.clone();
                        extended.push(Turn::new(GENERATORS[generator], quarter_turns));
                        next.insert(turned, extended);
                    }
                }
            }
            forward = next;

            let mut next = BTreeMap::new();
            for (state, path) in &backward {
                if let Some(head) = forward.get(state) {
                    return Ok(Self::joined(head, path));
                }

                for generator in 0..GENERATORS.len() {
                    let mut turned = *state;
                    for quarter_turns in 1..=3 {
                        turned = quarter_turn(&turned, generator);
                        // reached by turning away from the goal, so undoing it comes first
                        let mut extended = Vec::with_capacity(path.len() + 1);
                        extended.push(Turn::new(GENERATORS[generator], 4 - quarter_turns));
                        extended.extend_from_slice(path);
                        next.insert(turned, extended);
                    }
                }
            }
            backward = next;

            trace!(round, forward = forward.len(), backward = backward.len(), "pocket frontiers advanced");
        }

        Err(SolutionGenerationError::Unsolved { rounds: self.rounds })
    }

    /// Solve a string of 24 face letters such as `"UUUULLFFRRBBLLFFRRBBDDDD"`.
    pub fn solve_letters(&self, letters: &str) -> crate::error::Result<Solution> {
        let facelets = Face::parse_letters(letters)?;
        Ok(self.solve(&facelets)?)
    }

    fn joined(head: &[Turn], tail: &[Turn]) -> Solution {
        debug!(length = head.len() + tail.len(), "pocket searches met");
        Solution::new(head.iter().chain(tail).copied())
    }
}
