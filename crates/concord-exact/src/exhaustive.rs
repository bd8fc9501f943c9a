// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


//! Exhaustive search over every moderation vector.
//!
//! The search walks `{0..=n_0} x {0..=n_1} x ... x {0..=n_{m-1}}` like an
//! odometer, with the last group varying fastest. Candidates over budget are
//! discarded and the strictly smallest conflict wins, so among equal conflicts
//! the lexicographically first strategy is kept.

use concord_model::{
    eval::{effort_of, remaining_conflict},
    network::Network,
    strategy::Strategy,
};
use concord_search::{
    solver::{ModerationSolver, full_moderation_shortcut},
    stats::{SolverStatistics, SolverStatisticsBuilder},
};

/// The size of the strategy space of a network in log10 space.
///
/// The product of `n_i + 1` overflows any integer type for moderately sized
/// networks, so only its logarithm is kept.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct SearchSpace {
    log_val: f64,
}

impl SearchSpace {
    /// Computes `log10(prod(n_i + 1))` for `network`.
    pub fn of(network: &Network) -> Self {
        let log_val = network
            .groups()
            .iter()
            .map(|g| (g.size() as f64 + 1.0).log10())
            .sum();
        Self { log_val }
    }

    /// Returns the percentage of the space covered by `candidates` strategies.
    /// Returns `Some(0.0)` if the space is too large to represent.
    pub fn coverage(&self, candidates: u64) -> Option<f64> {
        if self.log_val > 15.0 {
            return Some(0.0);
        }

        let total = 10.0_f64.powf(self.log_val);
        if total == 0.0 {
            return None;
        }

        Some((candidates as f64 / total) * 100.0)
    }

    /// Returns the order of magnitude.
    #[inline]
    pub fn exponent(&self) -> u64 {
        self.log_val.floor() as u64
    }

    /// Returns the coefficient in `[1, 10)`.
    #[inline]
    pub fn mantissa(&self) -> f64 {
        10.0_f64.powf(self.log_val - self.log_val.floor())
    }

    #[inline]
    pub fn raw(&self) -> f64 {
        self.log_val
    }
}

impl std::fmt::Display for SearchSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} × 10^{}", self.mantissa(), self.exponent())
    }
}

impl std::fmt::Debug for SearchSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchSpace(log10={:.4})", self.log_val)
    }
}

/// Brute-force solver. Optimal, exponential in the number of groups.
#[derive(Debug, Clone, Default)]
pub struct ExhaustiveSolver {
    counts: Vec<u64>,
    best: Vec<u64>,
    stats: SolverStatistics,
}

impl ExhaustiveSolver {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModerationSolver for ExhaustiveSolver {
    fn solve(&mut self, network: &Network) -> Strategy {
        self.stats = SolverStatistics::default();

        if let Some(full) = full_moderation_shortcut(network) {
            return full;
        }

        let groups = network.groups();
        let budget = network.budget();
        let space = SearchSpace::of(network);
        tracing::debug!(
            groups = groups.len(),
            budget,
            space = %space,
            "starting exhaustive search"
        );

        self.counts.clear();
        self.counts.resize(groups.len(), 0);
        self.best.clear();
        self.best.resize(groups.len(), 0);

        // The zero strategy is always affordable.
        let mut best_conflict = remaining_conflict(groups, &self.counts);
        let mut candidates = 1u64;

        'odometer: loop {
            let mut i = groups.len();
            loop {
                if i == 0 {
                    break 'odometer;
                }
                i -= 1;
                if self.counts[i] < groups[i].size() {
                    self.counts[i] += 1;
                    break;
                }
                self.counts[i] = 0;
            }

            candidates += 1;
            if effort_of(groups, &self.counts) > budget {
                continue;
            }

            let conflict = remaining_conflict(groups, &self.counts);
            if conflict < best_conflict {
                tracing::trace!(strategy = ?self.counts, conflict = %conflict, "improved");
                best_conflict = conflict;
                self.best.copy_from_slice(&self.counts);
            }
        }

        self.stats = SolverStatisticsBuilder::new()
            .candidates_evaluated(candidates)
            .build();

        tracing::debug!(
            candidates,
            coverage = space.coverage(candidates).unwrap_or(0.0),
            conflict = %best_conflict,
            "exhaustive search finished"
        );

        Strategy::new(self.best.clone())
    }

    fn name(&self) -> &str {
        "exhaustive"
    }

    fn is_exact(&self) -> bool {
        true
    }

    fn statistics(&self) -> SolverStatistics {
        self.stats
    }
}
