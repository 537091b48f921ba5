//! Demo runner: resolves and solves a sample 3x3 scan, then a 2x2 and a bare cubicle description.
//!
//! Set `RUST_LOG` (for example `cubescan=debug`) to watch the searches.

use cubescan::cubie::SOLVED_CUBICLES;
use cubescan::{PhasedSolver, PocketSolver, Rgb, ScanSession, SolverConfig, SolverInput};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// faces U F R L D B, each row by row
const SAMPLE_NET: [&str; 6] = ["RRDLUDRLU", "FBBFFRUDL", "LLLFRFUUD", "DUUBLURUR", "BFFBDRBDF", "BDFLBRLBD"];

fn sticker_color(letter: char) -> Rgb {
    match letter {
        'U' => Rgb(235, 235, 235),
        'F' => Rgb(30, 160, 60),
        'R' => Rgb(200, 20, 30),
        'L' => Rgb(240, 120, 20),
        'D' => Rgb(230, 220, 40),
        _ => Rgb(15, 40, 180),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solver=info,cubescan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SolverConfig::default();
    tracing::info!(?config, "starting");

    let scan: Vec<Rgb> = SAMPLE_NET.iter().flat_map(|face| face.chars()).map(sticker_color).collect();
    let outcome = ScanSession::new(config.clone()).run(&scan)?;
    for (rgb, label) in outcome.colors.iter() {
        tracing::info!(%rgb, %label, "resolved");
    }
    if let SolverInput::Cubicles(cubicles) = &outcome.input {
        println!("cubicles: {}", cubicles.join(" "));
    }
    println!("3x3 scan: {}", outcome.solution);

    let pocket = PocketSolver::new(&config).solve_letters("LUUUDLFRBBLBUFDRBDFFLDRR")?;
    println!("2x2: {}", pocket);

    // every edge flipped in place
    let superflip: Vec<String> = SOLVED_CUBICLES.iter()
        .map(|cubicle| match cubicle.len() {
            2 => cubicle.chars().rev().collect(),
            _ => cubicle.to_string(),
        })
        .collect();
    match PhasedSolver::new(config).solve(&superflip) {
        Ok(solution) => println!("superflip: {} ({} turns)", solution, solution.len()),
        Err(error) => tracing::warn!(%error, "superflip not solved"),
    }

    Ok(())
}
