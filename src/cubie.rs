//! The cubie-level model of a 3x3 cube: which cubie sits in each of the 20 movable positions, and
//! how far it is twisted from its home orientation.

use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::error::SolutionGenerationError;
use crate::face::Face;
use crate::notation::Turn;

/// Cubicle names in slot order: 12 edges, then 8 corners.
pub const SOLVED_CUBICLES: [&str; 20] = [
    "UF", "UR", "UB", "UL", "DF", "DR", "DB", "DL", "FR", "FL", "BR", "BL",
    "UFR", "URB", "UBL", "ULF", "DRF", "DFL", "DLB", "DBR",
];

/// Edge slots, numbered first.
pub const EDGES: usize = 12;
/// Corner slots, numbered after the edges.
pub const CORNERS: usize = 8;

/// Positions cycled by a quarter turn of each face. The first four entries are edges, the last four
/// corners, both as offsets into their own range.
const AFFECTED: [[u8; 8]; 6] = [
    [0, 1, 2, 3, 0, 1, 2, 3],  // U
    [4, 7, 6, 5, 4, 5, 6, 7],  // D
    [0, 9, 4, 8, 0, 3, 5, 4],  // F
    [2, 10, 6, 11, 2, 1, 7, 6], // B
    [3, 11, 7, 9, 3, 2, 6, 5], // L
    [1, 8, 5, 10, 1, 0, 4, 7], // R
];

/// One of the 18 face turns, encoded as `3 * face + (quarter_turns - 1)` with faces in `UDFBLR`
/// order.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Move(u8);

impl Move {
    /// Number of distinct moves.
    pub const COUNT: u8 = 18;

    /// `None` unless `index < 18`.
    pub fn from_index(index: u8) -> Option<Self> {
        (index < Self::COUNT).then_some(Self(index))
    }

    /// The move turning `face` clockwise `quarter_turns` times, `None` unless that is 1 to 3.
    pub fn new(face: Face, quarter_turns: u8) -> Option<Self> {
        match quarter_turns {
            1..=3 => Some(Self(face.index() as u8 * 3 + quarter_turns - 1)),
            _ => None,
        }
    }

    /// Every move in index order.
    pub fn all() -> impl Iterator<Item = Move> {
        (0..Self::COUNT).map(Move)
    }

    /// Index in `0..18`.
    #[inline]
    pub fn index(self) -> u8 {
        self.0
    }

    /// The face this move turns.
    #[inline]
    pub fn face(self) -> Face {
        Face::from_index((self.0 / 3) as usize)
    }

    /// Clockwise quarter turns, 1 to 3.
    #[inline]
    pub fn quarter_turns(self) -> u8 {
        self.0 % 3 + 1
    }

    /// The move undoing this one: quarter turns become three-quarter turns and vice versa.
    #[inline]
    pub fn inverse(self) -> Self {
        Self(self.0 + 2 - 2 * (self.0 % 3))
    }

    /// This move in notation form.
    pub fn as_turn(self) -> Turn {
        Turn::new(self.face(), self.quarter_turns())
    }
}

impl From<Move> for Turn {
    fn from(value: Move) -> Self {
        value.as_turn()
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_turn())
    }
}

/// Cubie permutation and orientation.
///
/// `perm[i]` is the home slot of the cubie currently in slot `i`. Edges occupy 0..12 and
/// corners 12..20 in both ranges. `orient[i]` counts counterclockwise twists away from home:
/// 0 or 1 for edges, 0 to 2 for corners.
///
/// States can only be built from cubicle labels, a checked vector, or moves, so both ranges always
/// hold. Orientation sums and parity are checked separately by [`Self::verify`].
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct CubeState {
    pub(crate) perm: [u8; 20],
    pub(crate) orient: [u8; 20],
}

impl Default for CubeState {
    fn default() -> Self {
        Self::SOLVED
    }
}

impl CubeState {
    /// Every cubie home and untwisted.
    pub const SOLVED: CubeState = CubeState {
        perm: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19],
        orient: [0; 20],
    };

    /// Map cubicle labels onto slots.
    ///
    /// Each label is rotated until it names a cubie not yet claimed; the number of rotations is
    /// that slot's orientation. A label that names no free cubie in any rotation means the stickers
    /// could not have come from a real cube.
    pub fn from_cubicles<S: AsRef<str>>(cubicles: &[S]) -> Result<Self, SolutionGenerationError> {
        if cubicles.len() != 20 {
            return Err(SolutionGenerationError::InputLength { expected: 20, actual: cubicles.len() });
        }

        let mut free = SOLVED_CUBICLES.map(Some);
        let mut state = CubeState::SOLVED;

        for (slot, label) in cubicles.iter().map(AsRef::as_ref).enumerate() {
            let expected_len = if slot < EDGES { 2 } else { 3 };
            if label.chars().count() != expected_len || label.chars().any(|c| Face::try_from(c).is_err()) {
                return Err(SolutionGenerationError::InvalidCubicle { slot, label: label.to_string() });
            }

            let mut rotated = label.as_bytes().to_vec();
            let mut twists = 0;
            let home = loop {
                if let Some(home) = free.iter().position(|name| name.is_some_and(|name| name.as_bytes() == rotated)) {
                    break home;
                }

                rotated.rotate_left(1);
                twists += 1;
                if twists > 2 {
                    return Err(SolutionGenerationError::OrientationOverflow { slot, label: label.to_string() });
                }
            };

            free[home] = None;
            state.perm[slot] = home as u8;
            state.orient[slot] = twists;
        }

        Ok(state)
    }

    /// The cubicle labels describing this state, the inverse of [`Self::from_cubicles`].
    pub fn to_cubicles(&self) -> Vec<String> {
        (0..20)
            .map(|slot| {
                let name = SOLVED_CUBICLES[self.perm[slot] as usize];
                let twists = self.orient[slot] as usize % name.len();
                // undo `twists` left rotations
                let split = name.len() - twists;
                format!("{}{}", &name[split..], &name[..split])
            })
            .collect_vec()
    }

    /// Home slot of the cubie in each slot.
    pub fn perm(&self) -> &[u8; 20] {
        &self.perm
    }

    /// Twists of the cubie in each slot.
    pub fn orient(&self) -> &[u8; 20] {
        &self.orient
    }

    /// The 40 entry vector form: permutation followed by orientation.
    pub fn to_vector(&self) -> [u8; 40] {
        let mut vector = [0; 40];
        vector[..20].copy_from_slice(&self.perm);
        vector[20..].copy_from_slice(&self.orient);
        vector
    }

    /// The state after applying `mv`.
    pub fn apply(&self, mv: Move) -> Self {
        let face = mv.face().index();
        let mut state = *self;

        for _ in 0..mv.quarter_turns() {
            let old = state;
            for i in 0..8 {
                let corner = i > 3;
                let offset = if corner { EDGES } else { 0 };
                let target = AFFECTED[face][i] as usize + offset;
                let source = AFFECTED[face][if i & 3 == 3 { i - 3 } else { i + 1 }] as usize + offset;

                let delta = match (corner, face) {
                    // only F and B flip edges
                    (false, 2 | 3) => 1,
                    (false, _) => 0,
                    // U and D never twist corners
                    (true, 0 | 1) => 0,
                    (true, _) => 2 - (i as u8 & 1),
                };

                state.perm[target] = old.perm[source];
                state.orient[target] = (old.orient[source] + delta) % if corner { 3 } else { 2 };
            }
        }

        state
    }

    /// The state after applying `moves` in order.
    pub fn apply_all(&self, moves: impl IntoIterator<Item = Move>) -> Self {
        moves.into_iter().fold(*self, |state, mv| state.apply(mv))
    }

    /// Apply outer layer turns, skipping identities.
    pub fn apply_turns(&self, turns: &[Turn]) -> Self {
        self.apply_all(turns.iter().filter_map(|turn| Move::new(turn.face, turn.quarter_turns)))
    }

    /// Whether this is [`Self::SOLVED`].
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    /// Reject states no sequence of moves can reach from solved.
    pub fn verify(&self) -> Result<(), SolutionGenerationError> {
        let edge_twist: u32 = self.orient[..EDGES].iter().map(|&o| o as u32).sum();
        if edge_twist % 2 != 0 {
            return Err(SolutionGenerationError::EdgeOrientation);
        }

        let corner_twist: u32 = self.orient[EDGES..].iter().map(|&o| o as u32).sum();
        if corner_twist % 3 != 0 {
            return Err(SolutionGenerationError::CornerOrientation);
        }

        if (inversions(&self.perm[..EDGES]) + inversions(&self.perm[EDGES..])) % 2 != 0 {
            return Err(SolutionGenerationError::Parity);
        }

        Ok(())
    }
}

impl TryFrom<[u8; 40]> for CubeState {
    type Error = SolutionGenerationError;

    /// Read the vector form, rejecting anything that is not a permutation of edges onto edge slots
    /// and corners onto corner slots with in-range twists.
    fn try_from(vector: [u8; 40]) -> Result<Self, Self::Error> {
        let mut seen = [false; 20];
        for slot in 0..20 {
            let (home, twists) = (vector[slot] as usize, vector[20 + slot]);
            let (range, max_twists) = if slot < EDGES { (0..EDGES, 2) } else { (EDGES..20, 3) };

            if !range.contains(&home) || seen[home] {
                return Err(SolutionGenerationError::InvalidVector { index: slot, value: vector[slot] });
            }
            if twists >= max_twists {
                return Err(SolutionGenerationError::InvalidVector { index: 20 + slot, value: twists });
            }
            seen[home] = true;
        }

        let mut state = CubeState::SOLVED;
        state.perm.copy_from_slice(&vector[..20]);
        state.orient.copy_from_slice(&vector[20..]);
        Ok(state)
    }
}

fn inversions(perm: &[u8]) -> usize {
    perm.iter().tuple_combinations().filter(|(a, b)| a > b).count()
}

impl Display for CubeState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_cubicles().join(" "))
    }
}
