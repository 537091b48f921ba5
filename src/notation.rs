//! Turns, solutions and the text notation both are written in.

use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::error::FaceParsingError;
use crate::face::Face;

/// A rotation of one face by a number of clockwise quarter turns.
///
/// `quarter_turns` is always reduced modulo 4; zero is the identity.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Turn {
    /// The face turned.
    pub face: Face,
    /// Clockwise quarter turns, `0..4`.
    pub quarter_turns: u8,
}

impl Turn {
    /// Turn `face` clockwise, reducing `quarter_turns` modulo 4.
    pub fn new(face: Face, quarter_turns: u8) -> Self {
        Self { face, quarter_turns: quarter_turns % 4 }
    }

    /// The turn undoing this one.
    pub fn inverse(self) -> Self {
        Self::new(self.face, 4 - self.quarter_turns)
    }

    /// Whether this turn does nothing.
    pub fn is_identity(self) -> bool {
        self.quarter_turns == 0
    }
}

impl Display for Turn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.quarter_turns {
            0 => Ok(()),
            1 => write!(f, "{}", self.face),
            2 => write!(f, "{}(2)", self.face),
            _ => write!(f, "{}'", self.face),
        }
    }
}

/// Coalesce consecutive turns of the same face, dropping those that add up to a full rotation.
///
/// Runs that cancel out let the turns on either side meet, so `R U U' R` folds to `R(2)`. The
/// result never has two adjacent turns of the same face, which makes folding idempotent.
pub fn fold(turns: impl IntoIterator<Item = Turn>) -> Vec<Turn> {
    let mut folded: Vec<Turn> = Vec::new();
    for turn in turns {
        match folded.last_mut() {
            Some(last) if last.face == turn.face => {
                *last = Turn::new(last.face, last.quarter_turns + turn.quarter_turns);
                if last.is_identity() {
                    folded.pop();
                }
            }
            _ if turn.is_identity() => {}
            _ => folded.push(turn),
        }
    }

    folded
}

/// Fold `turns` and render them as space separated tokens: `R`, `R(2)` or `R'`.
pub fn encode(turns: impl IntoIterator<Item = Turn>) -> String {
    fold(turns).iter().join(" ")
}

/// An ordered sequence of turns returning a cube to its solved configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Solution {
    turns: Vec<Turn>,
}

impl Solution {
    /// Fold `raw` into a solution.
    pub fn new(raw: impl IntoIterator<Item = Turn>) -> Self {
        Self { turns: fold(raw) }
    }

    /// The folded turns in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns after folding.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the cube was already solved.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Space separated notation, empty for a solved cube.
    pub fn notation(&self) -> String {
        self.to_string()
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.turns.iter().join(" "))
    }
}

/// A parsed notation token: a face layer, possibly inset from the outside, turned `times` times.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SliceTurn {
    /// The face the layer is counted from.
    pub face: Face,
    /// Layers between this one and the face, 0 for the face itself.
    pub inset: usize,
    /// Repeat count, 1 unless given in parentheses.
    pub times: u32,
    /// Whether the token ended in `'`.
    pub inverse: bool,
}

impl SliceTurn {
    /// The same layer turned the other way.
    pub fn inverse(self) -> Self {
        Self { inverse: !self.inverse, ..self }
    }

    /// The equivalent outer layer [`Turn`].
    pub fn as_turn(&self) -> Turn {
        let quarter_turns = (self.times % 4) as u8;
        Turn::new(self.face, if self.inverse { 4 - quarter_turns } else { quarter_turns })
    }
}

/// Parser for solution notation on a cube of a given size.
///
/// Tokens are space separated and look like `R`, `R'`, `R(2)` or, for inner layers, `1R`.
#[derive(Copy, Clone, Debug)]
pub struct NotationParser {
    size: usize,
}

impl NotationParser {
    /// A parser for cubes with `size` layers.
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Layers that can be addressed from one face. Insets must stay below this.
    pub fn max_inset(&self) -> usize {
        if self.size % 2 == 1 { (self.size - 1) / 2 } else { self.size / 2 }
    }

    /// Parse space separated tokens. The first bad token fails the whole string.
    pub fn parse(&self, notation: &str) -> Result<Vec<SliceTurn>, FaceParsingError> {
        notation.split_whitespace()
            .map(|token| self.parse_token(token))
            .collect()
    }

    /// Parse and collapse to outer layer turns, rejecting any inset layer.
    pub fn parse_turns(&self, notation: &str) -> Result<Vec<Turn>, FaceParsingError> {
        self.parse(notation)?
            .into_iter()
            .map(|slice| match slice.inset {
                0 => Ok(slice.as_turn()),
                _ => Err(FaceParsingError::InvalidInset(notation.to_string())),
            })
            .collect()
    }

    fn parse_token(&self, token: &str) -> Result<SliceTurn, FaceParsingError> {
        let face_at = token.find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| FaceParsingError::UnknownFace(token.to_string()))?;

        let (inset, rest) = token.split_at(face_at);
        let inset = match inset {
            "" => 0,
            digits => digits.parse::<usize>().map_err(|_| FaceParsingError::InvalidInset(token.to_string()))?,
        };
        if inset >= self.max_inset() {
            return Err(FaceParsingError::InvalidInset(token.to_string()));
        }

        let mut chars = rest.chars();
        let face = chars.next()
            .ok_or_else(|| FaceParsingError::UnknownFace(token.to_string()))
            .and_then(|c| Face::try_from(c).map_err(|_| FaceParsingError::UnknownFace(token.to_string())))?;

        let mut rest = chars.as_str();
        let inverse = rest.ends_with('\'');
        if inverse {
            rest = &rest[..rest.len() - 1];
        }

        let times = match rest {
            "" => 1,
            count => count.strip_prefix('(')
                .and_then(|c| c.strip_suffix(')'))
                .and_then(|c| c.parse::<u32>().ok())
                .ok_or_else(|| FaceParsingError::InvalidTurnCount(token.to_string()))?,
        };

        Ok(SliceTurn { face, inset, times, inverse })
    }
}

impl Default for NotationParser {
    fn default() -> Self {
        Self::new(3)
    }
}
