#![warn(missing_docs)]

//! # `cubescan`
//!
//! Turns the sticker colors of a scanned 2x2 or 3x3 cube into a sequence of face turns that solves it.
//! Begin with a flat list of sampled colors, face by face in [`Face::SCAN_ORDER`], and hand it to a [`ScanSession`].
//! Each stage is also usable on its own: [`ColorClusterer`] to resolve colors, [`FaceletCubeBuilder`](builder::FaceletCubeBuilder)
//! to describe a cube, and [`PocketSolver`] or [`PhasedSolver`] to solve one.
//!
//! # Internals
//! Colors are compared with the CIEDE2000 difference in CIE Lab space (see [`metric`]).
//! A scan of `6k²` samples is partitioned greedily: every pairwise distance is computed once, then six groups of `k²` are grown
//! from the closest free pair by repeatedly adding the free sample nearest to any member.
//! Groups are labeled by channel heuristics, telling blue from green by their distance to pure blue.
//!
//! Once every sticker is named by the face it belongs to, one of two solvers takes over:
//!
//! 1. 2x2 cubes are solved by a bidirectional breadth first search over 24 facelets, turning only R, U and F
//! so that the DLB corner never moves. Only that corner's three colors are tracked.
//! 2. 3x3 cubes are described by 20 cubicle labels and solved with Thistlethwaite's algorithm as simplified by Stefan Pochmann:
//! four bidirectional searches, each restricted to fewer moves and comparing states by a coarser key than the last.
//!
//! Both return a [`Solution`], folded so that no two adjacent turns share a face.

pub use cluster::{CanonicalColorMap, ColorClusterer, ColorGroup, ColorSample};
pub use color::{Hsv, Lab, Rgb, Xyz};
pub use config::SolverConfig;
pub use cubie::{CubeState, Move};
pub use error::{ColorParsingError, Error, FaceParsingError, Result, SolutionGenerationError};
pub use face::Face;
pub use notation::{NotationParser, Solution, Turn};
pub use palette::{ColorLabel, ReferencePalette};
pub use pocket::PocketSolver;
pub use session::{ScanOutcome, ScanSession, SolverInput};
pub use solver::{Phase, PhasedSolver};

pub mod builder;
pub(crate) mod cluster;
pub(crate) mod color;
pub(crate) mod config;
pub mod cubie;
pub mod error;
pub(crate) mod face;
pub mod metric;
pub mod notation;
pub(crate) mod palette;
pub mod pocket;
pub(crate) mod session;
pub(crate) mod solver;
mod tests;
#[cfg(feature = "wasm")]
pub mod wasm;
