//! Sticker color classes and reference swatches.

use strum::{Display, EnumString, VariantArray};

use crate::color::{Lab, Rgb};
use crate::error::ColorParsingError;
use crate::metric::delta_e00;

/// The six sticker color classes of a standard cube.
#[derive(Copy, Clone, Debug, Display, EnumString, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
#[strum(serialize_all = "lowercase")]
#[allow(missing_docs)]
pub enum ColorLabel {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    White,
}

/// Labeled reference swatches a single color can be classified against.
///
/// The clusterer does not use this; it is a fallback for classifying one sample without the rest
/// of the scan.
#[derive(Clone, Debug)]
pub struct ReferencePalette {
    // kept in lookup order, the first of two equally close groups wins
    groups: Vec<(ColorLabel, Vec<Lab>)>,
}

impl ReferencePalette {
    /// Build a palette from hex swatches.
    pub fn from_hex(groups: &[(ColorLabel, &[&str])]) -> Result<Self, ColorParsingError> {
        let groups = groups.iter()
            .map(|(label, swatches)| {
                let labs = swatches.iter()
                    .map(|hex| hex.parse::<Rgb>().map(Lab::from))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((*label, labs))
            })
            .collect::<Result<Vec<_>, ColorParsingError>>()?;

        Ok(Self { groups })
    }

    /// Swatches for typical sticker colors photographed under daylight.
    pub fn standard() -> Self {
        let groups = STANDARD_SWATCHES.iter()
            .map(|(label, swatches)| (*label, swatches.iter().map(|&rgb| Lab::from(Rgb::from(rgb))).collect()))
            .collect();

        Self { groups }
    }

    /// The label whose nearest swatch is closest to `rgb`.
    pub fn classify(&self, rgb: Rgb) -> Option<ColorLabel> {
        let lab = rgb.to_lab();

        let mut best = None;
        let mut distance = f64::INFINITY;
        for (label, swatches) in &self.groups {
            let delta = swatches.iter().map(|swatch| delta_e00(&lab, swatch)).fold(f64::INFINITY, f64::min);
            if delta < distance {
                distance = delta;
                best = Some(*label);
            }
        }

        best
    }

    /// The entry of `candidates` perceptually closest to `rgb`, or `None` if `candidates` is empty.
    pub fn closest_in(rgb: Rgb, candidates: &[Rgb]) -> Option<Rgb> {
        let lab = rgb.to_lab();

        let mut best = None;
        let mut distance = f64::INFINITY;
        for candidate in candidates {
            let delta = delta_e00(&lab, &candidate.to_lab());
            if delta < distance {
                distance = delta;
                best = Some(*candidate);
            }
        }

        best
    }
}

impl Default for ReferencePalette {
    fn default() -> Self {
        Self::standard()
    }
}

// open color shades, plus a few observed in the wild
const STANDARD_SWATCHES: [(ColorLabel, &[[u8; 3]]); 6] = [
    (ColorLabel::Red, &[
        [0xff, 0x6b, 0x6b], [0xfa, 0x52, 0x52], [0xf0, 0x3e, 0x3e], [0xe0, 0x31, 0x31], [0xc9, 0x2a, 0x2a],
    ]),
    (ColorLabel::Orange, &[
        [0xff, 0xd8, 0xa8], [0xff, 0xc0, 0x78], [0xff, 0xa9, 0x4d], [0xff, 0x92, 0x2b], [0xfd, 0x7e, 0x14],
        [0xf7, 0x67, 0x07], [0xea, 0x68, 0x36],
    ]),
    (ColorLabel::Yellow, &[
        [0xff, 0xec, 0x99], [0xff, 0xe0, 0x66], [0xff, 0xd4, 0x3b], [0xfc, 0xc4, 0x19], [0xc9, 0xcb, 0x32],
    ]),
    (ColorLabel::Blue, &[
        [0x22, 0x8b, 0xe6], [0x1c, 0x7e, 0xd6], [0x19, 0x71, 0xc2], [0x18, 0x64, 0xab],
    ]),
    (ColorLabel::Green, &[
        [0x40, 0xc0, 0x57], [0x37, 0xb2, 0x4d], [0x2f, 0x9e, 0x44], [0x2b, 0x8a, 0x3e],
    ]),
    (ColorLabel::White, &[
        [0xf8, 0xf9, 0xfa], [0xf1, 0xf3, 0xf5], [0xe9, 0xec, 0xef], [0xde, 0xe2, 0xe6], [0xce, 0xd4, 0xda],
    ]),
];
