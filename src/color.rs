//! Conversions between sRGB, HSV, CIE XYZ and CIE Lab.
//!
//! Lab values are relative to the D65 illuminant seen by the 10° (CIE 1964) observer, which is
//! the reference white sticker photographs are compared under. Conversions are exact inverses up
//! to floating point rounding: any [`Rgb`] survives a trip through [`Lab`] and back unchanged
//! within one unit per channel.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ColorParsingError;

/// D65 / 10° reference white.
const REFERENCE_X: f64 = 94.811;
const REFERENCE_Y: f64 = 100.0;
const REFERENCE_Z: f64 = 107.304;

// CIE constants for the piecewise cube root
const EPSILON: f64 = 0.008856;
const KAPPA_SLOPE: f64 = 7.787;
const KAPPA_OFFSET: f64 = 16.0 / 116.0;

/// An 8 bit sRGB color as sampled from a camera frame.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Reference used to tell blue stickers from green ones.
    pub const PURE_BLUE: Rgb = Rgb(0, 0, 255);

    /// Channels as floats, in `[0, 255]`.
    pub fn channels(&self) -> [f64; 3] {
        [self.0 as f64, self.1 as f64, self.2 as f64]
    }

    /// Shorthand for [`Lab::from`].
    pub fn to_lab(&self) -> Lab {
        Lab::from(*self)
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = ColorParsingError;

    /// Parse `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParsingError::InvalidHex(s.to_string()));
        }

        let packed = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParsingError::InvalidHex(s.to_string()))?;

        Ok(Rgb((packed >> 16) as u8, (packed >> 8 & 0xff) as u8, (packed & 0xff) as u8))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(value: [u8; 3]) -> Self {
        Rgb(value[0], value[1], value[2])
    }
}

/// Hue, saturation and value, each in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsv {
    /// Hue as a fraction of a full turn.
    pub h: f64,
    /// Saturation.
    pub s: f64,
    /// Value, the largest channel.
    pub v: f64,
}

impl From<Rgb> for Hsv {
    fn from(rgb: Rgb) -> Self {
        let [r, g, b] = rgb.channels().map(|c| c / 255.0);

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let d = max - min;

        let s = if max == 0.0 { 0.0 } else { d / max };
        let h = if d == 0.0 {
            0.0
        } else if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsv { h: h / 6.0, s, v: max }
    }
}

/// CIE 1931 XYZ tristimulus values, scaled so that Y of white is 100.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Xyz {
    /// X tristimulus.
    pub x: f64,
    /// Y tristimulus, the luminance.
    pub y: f64,
    /// Z tristimulus.
    pub z: f64,
}

impl Xyz {
    /// Convert sRGB channels in `[0, 255]`. Channels are floats so that averaged colors can be
    /// converted without rounding first.
    pub fn from_channels(channels: [f64; 3]) -> Self {
        let [r, g, b] = channels.map(|c| {
            let c = c / 255.0;
            let linear = if c > 0.04045 { ((c + 0.055) / 1.055).powf(2.4) } else { c / 12.92 };
            linear * 100.0
        });

        Xyz {
            x: r * 0.4124564 + g * 0.3575761 + b * 0.1804375,
            y: r * 0.2126729 + g * 0.7151522 + b * 0.0721750,
            z: r * 0.0193339 + g * 0.1191920 + b * 0.9503041,
        }
    }

    /// Convert back to 8 bit sRGB, rounding and clamping out of gamut values.
    pub fn to_rgb(&self) -> Rgb {
        let (x, y, z) = (self.x / 100.0, self.y / 100.0, self.z / 100.0);

        let linear = [
            x * 3.2404542 + y * -1.5371385 + z * -0.4985314,
            x * -0.9692660 + y * 1.8760108 + z * 0.0415560,
            x * 0.0556434 + y * -0.2040259 + z * 1.0572252,
        ];

        let [r, g, b] = linear.map(|c| {
            let encoded = if c > 0.0031308 { 1.055 * c.powf(1.0 / 2.4) - 0.055 } else { 12.92 * c };
            (encoded * 255.0).round().clamp(0.0, 255.0) as u8
        });

        Rgb(r, g, b)
    }

    /// Convert to Lab against the D65/10° white.
    pub fn to_lab(&self) -> Lab {
        let f = |t: f64| if t > EPSILON { t.cbrt() } else { KAPPA_SLOPE * t + KAPPA_OFFSET };

        let x = f(self.x / REFERENCE_X);
        let y = f(self.y / REFERENCE_Y);
        let z = f(self.z / REFERENCE_Z);

        Lab {
            l: 116.0 * y - 16.0,
            a: 500.0 * (x - y),
            b: 200.0 * (y - z),
        }
    }
}

impl From<Rgb> for Xyz {
    fn from(rgb: Rgb) -> Self {
        Xyz::from_channels(rgb.channels())
    }
}

/// A CIE L*a*b* color.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Lab {
    /// Lightness, 0 to 100.
    pub l: f64,
    /// Green (negative) to red (positive).
    pub a: f64,
    /// Blue (negative) to yellow (positive).
    pub b: f64,
}

impl Lab {
    /// Create a Lab color from its components.
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Convert float sRGB channels in `[0, 255]`, see [`Xyz::from_channels`].
    pub fn from_channels(channels: [f64; 3]) -> Self {
        Xyz::from_channels(channels).to_lab()
    }

    /// Invert [`Xyz::to_lab`].
    pub fn to_xyz(&self) -> Xyz {
        let y = (self.l + 16.0) / 116.0;
        let x = self.a / 500.0 + y;
        let z = y - self.b / 200.0;

        let f_inv = |t: f64| {
            let cube = t.powi(3);
            if cube > EPSILON { cube } else { (t - KAPPA_OFFSET) / KAPPA_SLOPE }
        };

        Xyz {
            x: f_inv(x) * REFERENCE_X,
            y: f_inv(y) * REFERENCE_Y,
            z: f_inv(z) * REFERENCE_Z,
        }
    }

    /// Convert back to 8 bit sRGB through XYZ.
    pub fn to_rgb(&self) -> Rgb {
        self.to_xyz().to_rgb()
    }
}

impl From<Rgb> for Lab {
    fn from(rgb: Rgb) -> Self {
        Xyz::from(rgb).to_lab()
    }
}
