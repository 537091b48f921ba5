//! CIEDE2000 color difference.
//!
//! Follows Bruce Lindbloom's formulation with `k_L = k_C = k_H = 1`.

use std::f64::consts::PI;

use crate::color::{Lab, Rgb};

const TWENTY_FIVE_POW_7: f64 = 6_103_515_625.0;

#[inline]
fn to_degrees(rad: f64) -> f64 {
    let degrees = rad * 180.0 / PI;
    if degrees < 0.0 { degrees + 360.0 } else { degrees }
}

#[inline]
fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

// shared by the G correction and the chroma rotation term
#[inline]
fn chroma_weight(c: f64) -> f64 {
    let c7 = c.powi(7);
    (c7 / (c7 + TWENTY_FIVE_POW_7)).sqrt()
}

/// Perceptual distance between two Lab colors.
///
/// Symmetric in its arguments and zero exactly when both colors coincide.
pub fn delta_e00(first: &Lab, second: &Lab) -> f64 {
    let (l1, a1, b1) = (first.l, first.a, first.b);
    let (l2, a2, b2) = (second.l, second.a, second.b);

    let avg_l = (l1 + l2) / 2.0;
    let c1 = a1.hypot(b1);
    let c2 = a2.hypot(b2);
    let avg_c = (c1 + c2) / 2.0;
    let g = (1.0 - chroma_weight(avg_c)) / 2.0;

    let a1p = a1 * (1.0 + g);
    let a2p = a2 * (1.0 + g);

    let c1p = a1p.hypot(b1);
    let c2p = a2p.hypot(b2);
    let avg_cp = (c1p + c2p) / 2.0;

    let h1p = to_degrees(b1.atan2(a1p));
    let h2p = to_degrees(b2.atan2(a2p));

    // mean hue across the 0/360 wrap
    let avg_hp = if (h1p - h2p).abs() > 180.0 { (h1p + h2p + 360.0) / 2.0 } else { (h1p + h2p) / 2.0 };

    let t = 1.0 - 0.17 * cos_deg(avg_hp - 30.0)
        + 0.24 * cos_deg(2.0 * avg_hp)
        + 0.32 * cos_deg(3.0 * avg_hp + 6.0)
        - 0.20 * cos_deg(4.0 * avg_hp - 63.0);

    let mut delta_hp = h2p - h1p;
    if delta_hp.abs() > 180.0 {
        if h2p <= h1p { delta_hp += 360.0 } else { delta_hp -= 360.0 }
    }

    let delta_lp = l2 - l1;
    let delta_cp = c2p - c1p;
    let delta_big_hp = 2.0 * (c1p * c2p).sqrt() * (delta_hp.to_radians() / 2.0).sin();

    let sl = 1.0 + 0.015 * (avg_l - 50.0).powi(2) / (20.0 + (avg_l - 50.0).powi(2)).sqrt();
    let sc = 1.0 + 0.045 * avg_cp;
    let sh = 1.0 + 0.015 * avg_cp * t;

    let delta_ro = 30.0 * (-((avg_hp - 275.0) / 25.0).powi(2)).exp();
    let rc = 2.0 * chroma_weight(avg_cp);
    let rt = -rc * (2.0 * delta_ro).to_radians().sin();

    let lightness = delta_lp / sl;
    let chroma = delta_cp / sc;
    let hue = delta_big_hp / sh;

    (lightness.powi(2) + chroma.powi(2) + hue.powi(2) + rt * chroma * hue).max(0.0).sqrt()
}

/// [`delta_e00`] of two sRGB colors.
pub fn delta_e00_rgb(first: Rgb, second: Rgb) -> f64 {
    delta_e00(&first.to_lab(), &second.to_lab())
}

/// [`delta_e00`] between float sRGB channels (such as a group average) and an sRGB color.
pub fn delta_e00_channels(channels: [f64; 3], other: Rgb) -> f64 {
    delta_e00(&Lab::from_channels(channels), &other.to_lab())
}
