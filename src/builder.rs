//! Building a cube out of painted sticker grids, and reading solver input off it.

use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};
use std::hash::Hash;

use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;
use thiserror::Error;

use crate::cubie::SOLVED_CUBICLES;
use crate::error::SolutionGenerationError;
use crate::face::Face;

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// Only 2x2 and 3x3 cubes can be described.
    #[error("unsupported cube size {0}")]
    UnsupportedSize(usize),
    /// A whole face was painted with the wrong number of stickers.
    #[error("face {face} was given {count} stickers")]
    StickerCount {
        /// The face being painted.
        face: Face,
        /// Stickers supplied.
        count: usize,
    },
    /// A sticker was painted outside its face.
    #[error("sticker ({row}, {col}) is outside face {face}")]
    StickerOutOfBounds {
        /// The face being painted.
        face: Face,
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
    /// A sticker was never painted.
    #[error("sticker ({row}, {col}) on face {face} is missing")]
    MissingSticker {
        /// The face with a gap.
        face: Face,
        /// Row of the gap.
        row: usize,
        /// Column of the gap.
        col: usize,
    },
}

/// Where on the net a sticker sits: face, row and column with rows counted from the top of the
/// face as drawn in the standard net (U above F, D below F, L R B to the right of F in turn).
type Sticker = (Face, usize, usize);

// `LAST` is replaced by `size - 1`
const LAST: usize = usize::MAX;

/// Sticker positions of each corner, in the letter order of its cubicle name.
const CORNER_STICKERS: [[Sticker; 3]; 8] = [
    [(Face::U, LAST, LAST), (Face::F, 0, LAST), (Face::R, 0, 0)],  // UFR
    [(Face::U, 0, LAST), (Face::R, 0, LAST), (Face::B, 0, 0)],     // URB
    [(Face::U, 0, 0), (Face::B, 0, LAST), (Face::L, 0, 0)],        // UBL
    [(Face::U, LAST, 0), (Face::L, 0, LAST), (Face::F, 0, 0)],     // ULF
    [(Face::D, 0, LAST), (Face::R, LAST, 0), (Face::F, LAST, LAST)], // DRF
    [(Face::D, 0, 0), (Face::F, LAST, 0), (Face::L, LAST, LAST)],  // DFL
    [(Face::D, LAST, 0), (Face::L, LAST, 0), (Face::B, LAST, LAST)], // DLB
    [(Face::D, LAST, LAST), (Face::B, LAST, 0), (Face::R, LAST, LAST)], // DBR
];

/// Sticker positions of each edge of a 3x3, in the letter order of its cubicle name.
const EDGE_STICKERS: [[Sticker; 2]; 12] = [
    [(Face::U, 2, 1), (Face::F, 0, 1)], // UF
    [(Face::U, 1, 2), (Face::R, 0, 1)], // UR
    [(Face::U, 0, 1), (Face::B, 0, 1)], // UB
    [(Face::U, 1, 0), (Face::L, 0, 1)], // UL
    [(Face::D, 0, 1), (Face::F, 2, 1)], // DF
    [(Face::D, 1, 2), (Face::R, 2, 1)], // DR
    [(Face::D, 2, 1), (Face::B, 2, 1)], // DB
    [(Face::D, 1, 0), (Face::L, 2, 1)], // DL
    [(Face::F, 1, 2), (Face::R, 1, 0)], // FR
    [(Face::F, 1, 0), (Face::L, 1, 2)], // FL
    [(Face::B, 1, 0), (Face::R, 1, 2)], // BR
    [(Face::B, 1, 2), (Face::L, 1, 0)], // BL
];

/// Faces of the 2x2 facelet slots, rows of the side faces interleaved.
const POCKET_ROWS: [(Face, usize); 10] = [
    (Face::U, 0), (Face::U, 1),
    (Face::L, 0), (Face::F, 0), (Face::R, 0), (Face::B, 0),
    (Face::L, 1), (Face::F, 1), (Face::R, 1), (Face::B, 1),
];

/// Assembles six square sticker grids into a [`FaceletCube`].
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some
/// point. Once a builder is invalid, painting does nothing.
#[derive(Clone, Debug)]
pub struct FaceletCubeBuilder<T> {
    size: usize,
    faces: Vec<Array2<Option<T>>>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl<T: Copy> FaceletCubeBuilder<T> {
    /// Start an unpainted cube with `size` stickers along each edge.
    pub fn with_size(size: usize) -> Self {
        let mut invalid_reasons = Vec::new();
        if !(2..=3).contains(&size) {
            invalid_reasons.push(BuilderInvalidReason::UnsupportedSize(size));
        }

        Self {
            size,
            faces: (0..6).map(|_| Array2::from_elem((size, size), None)).collect_vec(),
            invalid_reasons,
        }
    }

    /// Paint a whole face, row by row.
    ///
    /// May cause the builder to enter a [`StickerCount`](BuilderInvalidReason::StickerCount)
    /// invalid state if `stickers` does not cover the face exactly.
    pub fn paint_face(&mut self, face: Face, stickers: impl IntoIterator<Item = T>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let stickers = stickers.into_iter().collect_vec();
        if stickers.len() != self.size * self.size {
            self.invalid_reasons.push(BuilderInvalidReason::StickerCount { face, count: stickers.len() });
            return self;
        }

        for (cell, sticker) in self.faces[face.index()].iter_mut().zip(stickers) {
            *cell = Some(sticker);
        }

        self
    }

    /// Paint a single sticker.
    ///
    /// May cause the builder to enter a [`StickerOutOfBounds`](BuilderInvalidReason::StickerOutOfBounds)
    /// invalid state.
    pub fn paint(&mut self, face: Face, (row, col): (usize, usize), sticker: T) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        match self.faces[face.index()].get_mut((row, col)) {
            Some(cell) => *cell = Some(sticker),
            None => self.invalid_reasons.push(BuilderInvalidReason::StickerOutOfBounds { face, row, col }),
        }

        self
    }

    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`FaceletCube`].
    ///
    /// Every sticker must have been painted.
    pub fn build(&self) -> Result<FaceletCube<T>, Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(self.invalid_reasons.clone());
        }

        let missing = Face::VARIANTS.iter()
            .flat_map(|&face| {
                self.faces[face.index()].indexed_iter()
                    .filter(|(_, cell)| cell.is_none())
                    .map(move |((row, col), _)| BuilderInvalidReason::MissingSticker { face, row, col })
            })
            .collect_vec();
        if !missing.is_empty() {
            return Err(missing);
        }

        // every cell is painted at this point
        let faces = self.faces.iter()
            .filter_map(|grid| {
                let cells = grid.iter().copied().collect::<Option<Vec<T>>>()?;
                Array2::from_shape_vec(grid.raw_dim(), cells).ok()
            })
            .collect_vec();

        Ok(FaceletCube { size: self.size, faces })
    }
}

/// A fully painted cube.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceletCube<T> {
    size: usize,
    faces: Vec<Array2<T>>,
}

impl<T: Copy + Eq + Hash> FaceletCube<T> {
    /// Stickers along each edge.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The sticker grid of `face`, as drawn in the net.
    pub fn face(&self, face: Face) -> &Array2<T> {
        &self.faces[face.index()]
    }

    #[inline]
    fn sticker(&self, (face, row, col): Sticker) -> T {
        let last = self.size - 1;
        let resolve = |i: usize| if i == LAST { last } else { i };
        self.faces[face.index()][(resolve(row), resolve(col))]
    }

    /// Repaint every sticker through `f`.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> FaceletCube<U> {
        FaceletCube { size: self.size, faces: self.faces.iter().map(|grid| grid.map(&f)).collect_vec() }
    }

    fn corner_colors(&self) -> impl Iterator<Item = [T; 3]> + '_ {
        CORNER_STICKERS.iter().map(|stickers| stickers.map(|s| self.sticker(s)))
    }

    fn name_stickers(&self, names: &HashMap<T, Face>) -> Result<FaceletCube<Face>, SolutionGenerationError> {
        let mut faces = Vec::with_capacity(6);
        for &face in Face::VARIANTS {
            let grid = &self.faces[face.index()];
            let named = grid.iter()
                .map(|color| names.get(color).copied().ok_or(SolutionGenerationError::UnknownSticker { face }))
                .collect::<Result<Vec<_>, _>>()?;
            faces.push(Array2::from_shape_vec(grid.raw_dim(), named).map_err(|_| SolutionGenerationError::UnsupportedSize(self.size))?);
        }

        Ok(FaceletCube { size: self.size, faces })
    }

    /// Name each sticker by the face its color belongs to on a solved 2x2.
    ///
    /// With no centers, faces are named from the ULF corner: its three stickers name F, U and L.
    /// The corner sharing F and U but not L names R, the corner sharing F and L but not U names D,
    /// and the one remaining color is B.
    pub fn pocket_names(&self) -> Result<FaceletCube<Face>, SolutionGenerationError> {
        if self.size != 2 {
            return Err(SolutionGenerationError::UnsupportedSize(self.size));
        }

        let f = self.sticker((Face::F, 0, 0));
        let u = self.sticker((Face::U, LAST, 0));
        let l = self.sticker((Face::L, 0, LAST));

        let third_of = |a: T, b: T, not: T| {
            self.corner_colors()
                .find(|c| c.contains(&a) && c.contains(&b) && !c.contains(&not))
                .and_then(|c| c.into_iter().find(|&x| x != a && x != b))
        };
        let r = third_of(f, u, l).ok_or(SolutionGenerationError::AmbiguousCenters)?;
        let d = third_of(f, l, u).ok_or(SolutionGenerationError::AmbiguousCenters)?;

        let known: HashSet<T> = HashSet::from([f, u, l, r, d]);
        let mut rest = self.faces.iter().flatten().copied().filter(|c| !known.contains(c)).unique();
        let (Some(b), None) = (rest.next(), rest.next()) else {
            return Err(SolutionGenerationError::AmbiguousCenters);
        };
        if known.len() != 5 {
            return Err(SolutionGenerationError::AmbiguousCenters);
        }

        let names = HashMap::from([(u, Face::U), (d, Face::D), (f, Face::F), (b, Face::B), (l, Face::L), (r, Face::R)]);
        self.name_stickers(&names)
    }

    /// The 24 facelets of a 2x2 in solver slot order, named by face.
    pub fn pocket_facelets(&self) -> Result<Vec<Face>, SolutionGenerationError> {
        let named = self.pocket_names()?;
        let mut facelets = Vec::with_capacity(24);
        for (face, row) in POCKET_ROWS {
            facelets.extend(named.face(face).row(row).iter().copied());
        }
        facelets.extend(named.face(Face::D).iter().copied());

        Ok(facelets)
    }

    /// Name each sticker of a 3x3 by the face whose center shares its color.
    pub fn center_names(&self) -> Result<FaceletCube<Face>, SolutionGenerationError> {
        if self.size != 3 {
            return Err(SolutionGenerationError::UnsupportedSize(self.size));
        }

        let names: HashMap<T, Face> = Face::VARIANTS.iter()
            .map(|&face| (self.faces[face.index()][(1, 1)], face))
            .collect();
        if names.len() != 6 {
            return Err(SolutionGenerationError::AmbiguousCenters);
        }

        self.name_stickers(&names)
    }

    /// The 20 cubicle labels of a 3x3 in `UF UR .. DBR` order.
    pub fn cubicles(&self) -> Result<Vec<String>, SolutionGenerationError> {
        let named = self.center_names()?;

        let edges = EDGE_STICKERS.iter().map(|stickers| stickers.iter().map(|&s| named.sticker(s).letter()).collect::<String>());
        let corners = CORNER_STICKERS.iter().map(|stickers| stickers.iter().map(|&s| named.sticker(s).letter()).collect::<String>());
        let cubicles = edges.chain(corners).collect_vec();
        debug_assert_eq!(cubicles.len(), SOLVED_CUBICLES.len());

        Ok(cubicles)
    }
}

impl<T: Display> Display for FaceletCube<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for &face in Face::VARIANTS {
            write!(f, "{face}:")?;
            for sticker in self.faces[face.index()].iter() {
                write!(f, " {sticker}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
