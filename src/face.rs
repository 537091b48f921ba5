//! Cube faces.

use strum::{Display, EnumString, VariantArray};

use crate::error::FaceParsingError;

/// The six faces of a cube, in the order the 18-move encoding uses (`face = move / 3`).
#[derive(Copy, Clone, Debug, Display, EnumString, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum Face {
    /// Up
    U,
    /// Down
    D,
    /// Front
    F,
    /// Back
    B,
    /// Left
    L,
    /// Right
    R,
}

impl Face {
    /// The order in which faces are scanned and samples are delivered.
    pub const SCAN_ORDER: [Face; 6] = [Face::U, Face::F, Face::R, Face::L, Face::D, Face::B];

    /// Position in `UDFBLR` order.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Face {
        Self::VARIANTS[index % Self::VARIANTS.len()]
    }

    /// The single letter naming this face in notation.
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::F => 'F',
            Face::B => 'B',
            Face::L => 'L',
            Face::R => 'R',
        }
    }

    /// Parse a string of face letters such as `"UUUULLFF..."`.
    pub fn parse_letters(letters: &str) -> Result<Vec<Face>, FaceParsingError> {
        letters.chars()
            .filter(|c| !c.is_whitespace())
            .map(Face::try_from)
            .collect()
    }
}

impl TryFrom<char> for Face {
    type Error = FaceParsingError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'U' => Ok(Face::U),
            'D' => Ok(Face::D),
            'F' => Ok(Face::F),
            'B' => Ok(Face::B),
            'L' => Ok(Face::L),
            'R' => Ok(Face::R),
            other => Err(FaceParsingError::UnknownFace(other.to_string())),
        }
    }
}
