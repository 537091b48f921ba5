//! JavaScript bindings. Errors surface as thrown `Error`s carrying the display message.

use js_sys::Map;
use wasm_bindgen::prelude::*;

use crate::cluster::ColorClusterer;
use crate::color::Rgb;
use crate::config::SolverConfig;
use crate::pocket::PocketSolver;
use crate::session::ScanSession;
use crate::solver::PhasedSolver;

fn parse_hex(hex_colors: &[String]) -> Result<Vec<Rgb>, JsError> {
    Ok(hex_colors.iter().map(|hex| hex.parse::<Rgb>()).collect::<Result<Vec<_>, _>>()?)
}

/// Map each `#rrggbb` sample to its color class name.
#[wasm_bindgen(js_name = resolveColors)]
pub fn resolve_colors(hex_colors: Vec<String>) -> Result<Map, JsError> {
    let colors = ColorClusterer::from_scan(&parse_hex(&hex_colors)?)?.resolve()?;

    let map = Map::new();
    for (rgb, label) in colors.iter() {
        map.set(&JsValue::from_str(&rgb.to_string()), &JsValue::from_str(&label.to_string()));
    }

    Ok(map)
}

/// Solve 24 face letters of a 2x2.
#[wasm_bindgen(js_name = solvePocket)]
pub fn solve_pocket(facelets: &str) -> Result<String, JsError> {
    Ok(PocketSolver::new(&SolverConfig::standard()).solve_letters(facelets)?.notation())
}

/// Solve 20 cubicle labels of a 3x3.
#[wasm_bindgen(js_name = solveCubicles)]
pub fn solve_cubicles(cubicles: Vec<String>) -> Result<String, JsError> {
    Ok(PhasedSolver::new(SolverConfig::standard()).solve(&cubicles)?.notation())
}

/// Run a whole scan and return the solution notation.
#[wasm_bindgen(js_name = solveScan)]
pub fn solve_scan(hex_colors: Vec<String>) -> Result<String, JsError> {
    Ok(ScanSession::new(SolverConfig::standard()).run_hex(&hex_colors)?.solution.notation())
}
