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


//! Budgeted-allocation dynamic programming.
//!
//! The recurrence works on `(i, b)` states: the first `i` groups with an
//! effort budget of `b`. With a weight `w_i` per group,
//!
//! ```raw
//! best[0][b] = 0
//! best[i][b] = min over k in 0..=n_i with cost_i(k) <= b of
//!              best[i-1][b - cost_i(k)] + (n_i - k) * w_i
//! ```
//!
//! and `choice[i][b]` records the first minimizing `k`. The strategy is
//! recovered by walking the choices back from `(n, budget)`.
//!
//! With `w_i = d_i^2` the recurrence minimizes the remaining conflict mass
//! (`DpObjective::RemainingMass`). Internal conflict divides that mass by the
//! remaining population, so the default objective re-runs the same recurrence
//! with weights `w_i = D * d_i^2 - N`, where `N / D` is the conflict of the
//! current strategy. A negative optimum is a strategy with a strictly smaller
//! ratio; an optimum of zero proves the current strategy optimal.

pub mod bottom_up;
pub mod table;
pub mod top_down;

use concord_model::{eval::remaining_conflict, network::Network, strategy::Strategy};
use concord_search::{
    solver::{ModerationSolver, full_moderation_shortcut},
    stats::{SolverStatistics, SolverStatisticsBuilder},
};
use table::{AllocationTable, CostLadder};

/// What the recurrence minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DpObjective {
    /// The remaining squared-divergence mass, `sum((n_i - e_i) * d_i^2)`.
    RemainingMass,
    /// The internal conflict of the moderated network.
    #[default]
    InternalConflict,
}

/// How the allocation table is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DpFill {
    /// Every cell, row by row.
    #[default]
    BottomUp,
    /// Only reachable cells, recursively with memoization.
    TopDown,
}

impl std::fmt::Display for DpFill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DpFill::BottomUp => write!(f, "bottom-up"),
            DpFill::TopDown => write!(f, "top-down"),
        }
    }
}

/// The per-group inputs of one run of the recurrence.
///
/// Groups are addressed 1-based, matching the table rows.
#[derive(Debug, Clone, Copy)]
pub struct Recurrence<'a> {
    ladders: &'a [CostLadder],
    sizes: &'a [u64],
    weights: &'a [i128],
}

impl<'a> Recurrence<'a> {
    #[inline]
    pub fn new(ladders: &'a [CostLadder], sizes: &'a [u64], weights: &'a [i128]) -> Self {
        debug_assert_eq!(ladders.len(), sizes.len());
        debug_assert_eq!(ladders.len(), weights.len());
        Self {
            ladders,
            sizes,
            weights,
        }
    }

    #[inline]
    pub fn num_groups(&self) -> usize {
        self.ladders.len()
    }

    #[inline]
    pub fn ladder(&self, i: usize) -> &'a CostLadder {
        &self.ladders[i - 1]
    }

    /// The weighted remainder `(n_i - k) * w_i` of group `i` after moderating `k` agents.
    #[inline]
    pub fn remainder(&self, i: usize, k: u64) -> i128 {
        ((self.sizes[i - 1] - k) as i128).saturating_mul(self.weights[i - 1])
    }
}

/// Exact solver based on budgeted-allocation dynamic programming.
///
/// Time and memory grow with `groups * budget`, and the fill additionally
/// scans every affordable count of a group, so this is pseudo-polynomial.
/// A budget whose table cannot even be addressed in `usize` is not attempted:
/// the solver logs a warning, returns the zero strategy and reports itself
/// as inexact until the next solve.
#[derive(Debug, Clone)]
pub struct DynamicProgrammingSolver {
    objective: DpObjective,
    fill: DpFill,
    table: AllocationTable,
    stats: SolverStatistics,
    oversized: bool,
}

impl Default for DynamicProgrammingSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicProgrammingSolver {
    /// Creates a solver minimizing internal conflict with a bottom-up fill.
    #[inline]
    pub fn new() -> Self {
        Self {
            objective: DpObjective::default(),
            fill: DpFill::default(),
            table: AllocationTable::new(0, 0),
            stats: SolverStatistics::default(),
            oversized: false,
        }
    }

    #[inline]
    pub fn with_objective(mut self, objective: DpObjective) -> Self {
        self.objective = objective;
        self
    }

    #[inline]
    pub fn with_fill(mut self, fill: DpFill) -> Self {
        self.fill = fill;
        self
    }

    #[inline]
    pub fn objective(&self) -> DpObjective {
        self.objective
    }

    #[inline]
    pub fn fill(&self) -> DpFill {
        self.fill
    }

    /// The table of the most recent run of the recurrence.
    #[inline]
    pub fn table(&self) -> &AllocationTable {
        &self.table
    }

    /// Runs the recurrence once and returns the reconstructed counts with
    /// their optimal weighted remainder.
    fn run(&mut self, recurrence: &Recurrence<'_>, budget: usize) -> (Vec<u64>, i128, u64) {
        self.table.reset(recurrence.num_groups(), budget);
        let states = match self.fill {
            DpFill::BottomUp => bottom_up::fill(&mut self.table, recurrence),
            DpFill::TopDown => top_down::fill(&mut self.table, recurrence),
        };

        let optimum = self
            .table
            .get(recurrence.num_groups(), budget)
            .unwrap_or(0);
        let counts = self.table.reconstruct(recurrence.ladders);
        (counts, optimum, states)
    }
}

impl ModerationSolver for DynamicProgrammingSolver {
    fn solve(&mut self, network: &Network) -> Strategy {
        self.stats = SolverStatistics::default();
        self.oversized = false;

        if let Some(full) = full_moderation_shortcut(network) {
            return full;
        }

        let groups = network.groups();
        let budget = network.budget();
        let Some(width) = usize::try_from(budget)
            .ok()
            .filter(|&w| AllocationTable::cells(groups.len(), w).is_some())
        else {
            tracing::warn!(
                groups = groups.len(),
                budget,
                "allocation table does not fit in memory, returning the zero strategy"
            );
            self.oversized = true;
            return Strategy::zero(groups.len());
        };
        tracing::debug!(
            groups = groups.len(),
            budget,
            objective = ?self.objective,
            fill = %self.fill,
            "starting dynamic programming"
        );

        let ladders: Vec<CostLadder> = groups.iter().map(|g| CostLadder::new(g, budget)).collect();
        let sizes: Vec<u64> = groups.iter().map(|g| g.size()).collect();
        let squared: Vec<i128> = groups.iter().map(|g| g.squared_divergence() as i128).collect();

        let (mut counts, _, mut states) = self.run(&Recurrence::new(&ladders, &sizes, &squared), width);
        let mut iterations = 1u64;

        if self.objective == DpObjective::InternalConflict {
            let mut weights = vec![0i128; groups.len()];
            loop {
                let current = remaining_conflict(groups, &counts);
                if current.is_zero() {
                    break;
                }

                let n = i128::try_from(current.mass()).unwrap_or(i128::MAX);
                let d = i128::try_from(current.population()).unwrap_or(i128::MAX);
                for (w, &s) in weights.iter_mut().zip(&squared) {
                    *w = d.saturating_mul(s).saturating_sub(n);
                }

                let (candidate, optimum, computed) =
                    self.run(&Recurrence::new(&ladders, &sizes, &weights), width);
                states += computed;
                iterations += 1;

                if optimum >= 0 {
                    break;
                }

                let next = remaining_conflict(groups, &candidate);
                if next >= current {
                    break;
                }

                tracing::trace!(
                    iteration = iterations,
                    from = %current,
                    to = %next,
                    "conflict ratio improved"
                );
                counts = candidate;
            }
        }

        self.stats = SolverStatisticsBuilder::new()
            .states_computed(states)
            .iterations(iterations)
            .build();

        tracing::debug!(states, iterations, "dynamic programming finished");

        Strategy::new(counts)
    }

    fn name(&self) -> &str {
        match (self.objective, self.fill) {
            (DpObjective::InternalConflict, DpFill::BottomUp) => "dp-bottom-up",
            (DpObjective::InternalConflict, DpFill::TopDown) => "dp-top-down",
            (DpObjective::RemainingMass, DpFill::BottomUp) => "dp-mass-bottom-up",
            (DpObjective::RemainingMass, DpFill::TopDown) => "dp-mass-top-down",
        }
    }

    fn is_exact(&self) -> bool {
        self.objective == DpObjective::InternalConflict && !self.oversized
    }

    fn statistics(&self) -> SolverStatistics {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exhaustive::ExhaustiveSolver;
    use concord_model::eval::{evaluate, internal_conflict};

    fn sample(budget: u64) -> Network {
        Network::from_tuples(
            [(3, -100, 100, 0.8), (2, 100, 80, 0.5), (4, -10, 10, 0.5)],
            budget,
        )
        .unwrap()
    }

    // Minimizing the mass alone moderates all of the first group here,
    // which leaves the two most divergent single agents in the network.
    fn mass_trap() -> Network {
        Network::from_tuples([(10, 0, 2, 0.3), (1, 0, 6, 1.0), (1, 0, 10, 1.0)], 6).unwrap()
    }

    fn solvers() -> Vec<DynamicProgrammingSolver> {
        vec![
            DynamicProgrammingSolver::new(),
            DynamicProgrammingSolver::new().with_fill(DpFill::TopDown),
        ]
    }

    #[test]
    fn test_worked_example_full_budget() {
        for mut solver in solvers() {
            let strategy = solver.solve(&sample(540));
            assert_eq!(strategy.counts(), &[3, 2, 4]);
            assert_eq!(solver.statistics().iterations, 0);
        }
    }

    #[test]
    fn test_partial_budget_matches_exhaustive() {
        for mut solver in solvers() {
            let network = sample(200);
            let strategy = solver.solve(&network);
            assert_eq!(strategy.counts(), &[1, 0, 0], "{}", solver.name());
            assert!((evaluate(&network, &strategy).unwrap().conflict - 10_300.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_remaining_mass_objective() {
        let network = sample(200);
        let mut solver = DynamicProgrammingSolver::new().with_objective(DpObjective::RemainingMass);
        let strategy = solver.solve(&network);

        assert!(!solver.is_exact());
        assert_eq!(strategy.counts(), &[1, 2, 2]);
        assert_eq!(remaining_conflict(network.groups(), strategy.counts()).mass(), 80_800);
        assert_eq!(solver.table().get(3, 200), Some(80_800));
    }

    #[test]
    fn test_ratio_iteration_escapes_mass_optimum() {
        let network = mass_trap();
        assert_eq!(network.max_effort(), 22);

        let mass = DynamicProgrammingSolver::new()
            .with_objective(DpObjective::RemainingMass)
            .solve(&network);
        assert_eq!(mass.counts(), &[10, 0, 0]);

        for mut solver in solvers() {
            let strategy = solver.solve(&network);
            assert_eq!(strategy.counts(), &[0, 1, 0], "{}", solver.name());
            assert!(solver.statistics().iterations >= 3);

            let exhaustive = ExhaustiveSolver::new().solve(&network);
            assert_eq!(
                remaining_conflict(network.groups(), strategy.counts()),
                remaining_conflict(network.groups(), exhaustive.counts())
            );
        }
    }

    #[test]
    fn test_zero_budget_only_free_moderation() {
        let network = Network::from_tuples([(3, -50, 50, 0.5), (2, -100, 100, 0.0)], 0).unwrap();
        for mut solver in solvers() {
            let strategy = solver.solve(&network);
            assert_eq!(strategy.counts(), &[0, 2]);
        }

        // Free moderation of the less divergent group would raise the mean.
        let network = Network::from_tuples([(3, -100, 100, 0.5), (2, -50, 50, 0.0)], 0).unwrap();
        for mut solver in solvers() {
            let strategy = solver.solve(&network);
            assert_eq!(strategy.counts(), &[0, 0]);
        }

        let network = sample(0);
        for mut solver in solvers() {
            let strategy = solver.solve(&network);
            assert_eq!(strategy, Strategy::zero(3));
            assert_eq!(
                evaluate(&network, &strategy).unwrap().conflict,
                internal_conflict(&network)
            );
        }
    }

    #[test]
    fn test_unaddressable_budget_returns_zero_strategy() {
        let network = Network::from_tuples([(u64::MAX, -100, 100, 1.0)], u64::MAX - 1).unwrap();
        assert_eq!(network.max_effort(), u64::MAX);

        for mut solver in solvers() {
            let strategy = solver.solve(&network);
            assert_eq!(strategy, Strategy::zero(1));
            assert!(!solver.is_exact(), "{}", solver.name());

            solver.solve(&sample(200));
            assert!(solver.is_exact(), "{}", solver.name());
        }
    }

    #[test]
    fn test_fills_agree_on_reached_cells() {
        for network in [sample(200), sample(333), mass_trap()] {
            let groups = network.groups();
            let budget = network.budget();
            let ladders: Vec<CostLadder> =
                groups.iter().map(|g| CostLadder::new(g, budget)).collect();
            let sizes: Vec<u64> = groups.iter().map(|g| g.size()).collect();
            let weights: Vec<i128> = groups
                .iter()
                .map(|g| 7 * g.squared_divergence() as i128 - 1_000)
                .collect();
            let recurrence = Recurrence::new(&ladders, &sizes, &weights);

            let mut full = AllocationTable::new(groups.len(), budget as usize);
            let computed = bottom_up::fill(&mut full, &recurrence);
            assert_eq!(computed, (groups.len() * (budget as usize + 1)) as u64);

            let mut memo = AllocationTable::new(groups.len(), budget as usize);
            let reached = top_down::fill(&mut memo, &recurrence);
            assert!(reached <= computed);

            for i in 0..=groups.len() {
                for b in 0..=budget as usize {
                    if let Some(v) = memo.get(i, b) {
                        assert_eq!(full.get(i, b), Some(v), "cell ({i}, {b})");
                        if i > 0 {
                            assert_eq!(full.choice(i, b), memo.choice(i, b));
                        }
                    }
                }
            }
            assert_eq!(full.reconstruct(&ladders), memo.reconstruct(&ladders));
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(DynamicProgrammingSolver::new().name(), "dp-bottom-up");
        assert_eq!(
            DynamicProgrammingSolver::new()
                .with_fill(DpFill::TopDown)
                .name(),
            "dp-top-down"
        );
    }
}
