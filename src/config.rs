//! Solver configuration.

/// Tunables shared by both solvers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Rounds of the 2x2 bidirectional search. Each round deepens both searches by one move, so six
    /// rounds cover every solution of up to eleven moves.
    pub pocket_rounds: usize,
    /// Reject cubicle input whose orientation sums or permutation parity make it unsolvable
    /// before searching.
    pub verify_invariants: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl SolverConfig {
    /// Enough rounds for any 2x2, whose hardest states take 11 moves.
    pub const DEFAULT_POCKET_ROUNDS: usize = 6;

    /// Create config from environment variables, falling back to defaults when unset or invalid.
    ///
    /// - `CUBESCAN_POCKET_ROUNDS`: a positive integer
    /// - `CUBESCAN_VERIFY_INVARIANTS`: `true`/`false` or `1`/`0`
    pub fn from_env() -> Self {
        let pocket_rounds = std::env::var("CUBESCAN_POCKET_ROUNDS")
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&rounds| rounds > 0)
            .unwrap_or(Self::DEFAULT_POCKET_ROUNDS);

        let verify_invariants = std::env::var("CUBESCAN_VERIFY_INVARIANTS")
            .ok()
            .and_then(|s| match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => Some(true),
                "0" | "false" | "no" => Some(false),
                _ => None,
            })
            .unwrap_or(true);

        Self { pocket_rounds, verify_invariants }
    }

    /// Defaults, ignoring the environment.
    pub fn standard() -> Self {
        Self { pocket_rounds: Self::DEFAULT_POCKET_ROUNDS, verify_invariants: true }
    }

    /// Set [`Self::pocket_rounds`].
    pub fn with_pocket_rounds(mut self, rounds: usize) -> Self {
        self.pocket_rounds = rounds;
        self
    }

    /// Set [`Self::verify_invariants`].
    pub fn with_verify_invariants(mut self, verify: bool) -> Self {
        self.verify_invariants = verify;
        self
    }
}
