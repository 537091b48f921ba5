//! Error types for cubescan.
//!
//! Every failure is an input-validation failure: a scan with the wrong number of samples, notation
//! that cannot be parsed, or a cube description no sequence of legal moves can solve.

use thiserror::Error;

use crate::builder::BuilderInvalidReason;
use crate::color::Rgb;
use crate::face::Face;
use crate::palette::ColorLabel;

/// Result type for cubescan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Any error raised by the scan-to-solution pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The sampled colors could not be resolved into six sticker classes.
    #[error(transparent)]
    Color(#[from] ColorParsingError),

    /// Move or face notation could not be parsed.
    #[error(transparent)]
    Face(#[from] FaceParsingError),

    /// The cube description cannot be turned into a solution.
    #[error(transparent)]
    Solution(#[from] SolutionGenerationError),
}

/// Reasons a set of color samples cannot be resolved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorParsingError {
    /// The number of samples is not `6 * k * k` for some `k` from 2 to
    /// [`ColorClusterer::MAX_SIDE`](crate::ColorClusterer::MAX_SIDE).
    ///
    /// A single sticker per face is refused: every color group is seeded with a pair of samples,
    /// so groups of one could never be formed.
    #[error("{0} color samples do not correspond to six square faces")]
    SampleCount(usize),

    /// A hex color string was not of the form `#rrggbb`.
    #[error("invalid hex color `{0}`")]
    InvalidHex(String),

    /// Identical samples were clustered into groups with different labels.
    #[error("color {rgb} was resolved both as {first} and as {second}")]
    AmbiguousSample {
        /// The sampled color.
        rgb: Rgb,
        /// Label of the group it was first seen in.
        first: ColorLabel,
        /// Label of the conflicting group.
        second: ColorLabel,
    },
}

/// Reasons a notation token cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FaceParsingError {
    /// The token names no face, or a face letter that does not exist.
    #[error("invalid notation, no face detected in `{0}`")]
    UnknownFace(String),

    /// The layer inset is out of range for the cube size.
    #[error("invalid notation, inset cannot be evaluated for `{0}`")]
    InvalidInset(String),

    /// The parenthesized repeat count is malformed.
    #[error("invalid notation, bad turn count in `{0}`")]
    InvalidTurnCount(String),
}

/// Reasons a solver refuses its input or fails to produce a solution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolutionGenerationError {
    /// The solver input has the wrong number of entries.
    #[error("expected {expected} entries, got {actual}")]
    InputLength {
        /// Entries the solver needs.
        expected: usize,
        /// Entries it was given.
        actual: usize,
    },

    /// A 2x2 facelet description does not use some face letter exactly four times.
    #[error("face {face} appears on {count} facelets")]
    FaceletCount {
        /// The miscounted face letter.
        face: Face,
        /// How often it appears.
        count: usize,
    },

    /// A cubicle label has the wrong length or uses a character that is not a face.
    #[error("invalid cubicle `{label}` at slot {slot}")]
    InvalidCubicle {
        /// Slot in `UF UR .. DBR` order.
        slot: usize,
        /// The label given for it.
        label: String,
    },

    /// A 40 entry state vector holds a repeated or out of range cubie, or an impossible twist.
    #[error("invalid state vector entry {value} at index {index}")]
    InvalidVector {
        /// Position in the vector.
        index: usize,
        /// The rejected entry.
        value: u8,
    },

    /// A cubicle label matches no unused cubie in any of its rotations.
    #[error("cannot solve: invalid painting of cube at slot {slot} (`{label}`)")]
    OrientationOverflow {
        /// Slot in `UF UR .. DBR` order.
        slot: usize,
        /// The label given for it.
        label: String,
    },

    /// Edge orientations sum to an odd number.
    #[error("cannot solve: edges not oriented correctly")]
    EdgeOrientation,

    /// Corner orientations do not sum to a multiple of three.
    #[error("cannot solve: corners not oriented correctly")]
    CornerOrientation,

    /// Edge and corner permutations have different parity.
    #[error("cannot solve: parity error, only one pair of corners or edges swapped")]
    Parity,

    /// The 2x2 search exhausted its round budget.
    #[error("no solution found within {rounds} rounds")]
    Unsolved {
        /// The configured round budget.
        rounds: usize,
    },

    /// A phase search exhausted every reachable state without meeting the goal.
    #[error("phase {phase} goal is unreachable from this state")]
    Unreachable {
        /// Phase number, 1 to 4.
        phase: u8,
    },

    /// Only 2x2 and 3x3 cubes are handled.
    #[error("unsupported cube size {0}")]
    UnsupportedSize(usize),

    /// Two faces share a center color, so stickers cannot be named by face.
    #[error("center colors are not distinct")]
    AmbiguousCenters,

    /// The sticker grids do not describe a complete cube.
    #[error("invalid cube description: {0:?}")]
    InvalidCube(Vec<BuilderInvalidReason>),

    /// A sticker carries a color that matches no face.
    #[error("sticker on face {face} matches no face color")]
    UnknownSticker {
        /// Face the sticker was painted on.
        face: Face,
    },
}
