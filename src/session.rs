//! One scan, start to finish.

use tracing::{debug, info};

use crate::builder::FaceletCubeBuilder;
use crate::cluster::{samples_per_face, CanonicalColorMap, ColorClusterer, ColorGroup, ColorSample};
use crate::color::Rgb;
use crate::config::SolverConfig;
use crate::error::{Result, SolutionGenerationError};
use crate::face::Face;
use crate::notation::Solution;
use crate::palette::ColorLabel;
use crate::pocket::PocketSolver;
use crate::solver::PhasedSolver;

/// What the recolored cube was handed to a solver as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolverInput {
    /// 24 face letters for the 2x2 search.
    Pocket(Vec<Face>),
    /// 20 cubicle labels for the phased search.
    Cubicles(Vec<String>),
}

/// Everything one scan produced.
#[derive(Clone, Debug)]
pub struct ScanOutcome {
    /// Stickers along each edge.
    pub size: usize,
    /// The labeled color groups.
    pub groups: Vec<ColorGroup>,
    /// Every sampled color with its class.
    pub colors: CanonicalColorMap,
    /// What the solver was given.
    pub input: SolverInput,
    /// The folded solution.
    pub solution: Solution,
}

/// Runs one scan from sampled colors to a solution.
///
/// The scan is delivered face by face in [`Face::SCAN_ORDER`], each face row by row as it appears
/// in the standard net. Nothing is kept between runs.
#[derive(Clone, Debug, Default)]
pub struct ScanSession {
    config: SolverConfig,
}

impl ScanSession {
    /// A session solving with `config`.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The solver configuration in use.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Parse `#rrggbb` strings and run them.
    pub fn run_hex<S: AsRef<str>>(&self, hex_colors: &[S]) -> Result<ScanOutcome> {
        let colors = hex_colors.iter()
            .map(|hex| hex.as_ref().parse::<Rgb>())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        self.run(&colors)
    }

    /// Cluster, label, build and solve one scan of `6 * k * k` colors with `k` of 2 or 3.
    pub fn run(&self, colors: &[Rgb]) -> Result<ScanOutcome> {
        let per_face = samples_per_face(colors.len())?;
        let size = per_face.isqrt();
        if !(2..=3).contains(&size) {
            return Err(SolutionGenerationError::UnsupportedSize(size).into());
        }

        let clusterer = ColorClusterer::new(ColorSample::from_scan(colors)?)?;
        let groups = clusterer.cluster();
        let color_map = CanonicalColorMap::from_groups(&groups)?;
        debug!(size, distinct = color_map.len(), "colors resolved");

        // paint each sample with its group's label, so identical colors never need to be told apart
        let mut builder = FaceletCubeBuilder::<ColorLabel>::with_size(size);
        for group in &groups {
            for sample in &group.samples {
                builder.paint(sample.face, (sample.slot / size, sample.slot % size), group.label);
            }
        }
        let cube = builder.build().map_err(SolutionGenerationError::InvalidCube)?;

        let (input, solution) = match size {
            2 => {
                let facelets = cube.pocket_facelets()?;
                let solution = PocketSolver::new(&self.config).solve(&facelets)?;
                (SolverInput::Pocket(facelets), solution)
            }
            _ => {
                let cubicles = cube.cubicles()?;
                let solution = PhasedSolver::new(self.config.clone()).solve(&cubicles)?;
                (SolverInput::Cubicles(cubicles), solution)
            }
        };

        info!(size, moves = solution.len(), solution = %solution, "scan solved");

        Ok(ScanOutcome { size, groups, colors: color_map, input, solution })
    }
}
