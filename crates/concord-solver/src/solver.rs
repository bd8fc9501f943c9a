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


//! # Portfolio Solver
//!
//! Runs several `ModerationSolver`s on one network and keeps the best
//! evaluated strategy.
//!
//! ## Highlights
//!
//! - Portfolio execution:
//!   - With `parallel(true)` (the default) each solver runs on its own thread
//!     inside `std::thread::scope`; otherwise they run in registration order.
//!   - A panic inside a solver is re-raised on the calling thread.
//! - Selection:
//!   - Smallest internal conflict, compared exactly; then smaller effort; then
//!     registration order.
//!   - The outcome is marked optimal if any exact solver took part.
//!
//! ## Usage
//!
//! ```rust
//! use concord_model::network::Network;
//! use concord_solver::solver::SolverBuilder;
//!
//! let network = Network::from_tuples(
//!     [(3, -100, 100, 0.8), (2, 100, 80, 0.5), (4, -10, 10, 0.5)],
//!     200,
//! )
//! .unwrap();
//!
//! let mut solver = SolverBuilder::new().with_default_solvers().build();
//! let outcome = solver.solve(&network).unwrap();
//!
//! assert!(outcome.is_optimal());
//! assert_eq!(outcome.strategy().counts(), &[1, 0, 0]);
//! ```

use concord_exact::dp::DynamicProgrammingSolver;
use concord_greedy::{
    bucketed::BucketedGreedySolver, heap::HeapGreedySolver, incremental::IncrementalGreedySolver,
    radix_greedy::RadixGreedySolver,
};
use concord_model::{error::ValidationError, network::Network, strategy::Strategy};
use concord_search::{result::SolverOutcome, solver::ModerationSolver};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors of a portfolio run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortfolioError {
    /// `Solver::solve` was called without any registered solver.
    #[error("the portfolio contains no solvers")]
    EmptyPortfolio,
    /// A solver returned a strategy that is invalid for the network or
    /// exceeds its budget.
    #[error("solver '{solver}' returned an invalid strategy: {source}")]
    InvalidStrategy {
        solver: String,
        #[source]
        source: ValidationError,
    },
}

/// The evaluated outcome of one portfolio member.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverReport {
    pub name: String,
    pub outcome: SolverOutcome,
}

impl std::fmt::Display for SolverReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.name, self.outcome.result, self.outcome.evaluation
        )
    }
}

/// The result of a portfolio run.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioOutcome {
    best: usize,
    optimality_proven: bool,
    reports: Vec<SolverReport>,
    solve_duration: Duration,
}

impl PortfolioOutcome {
    /// The report of the winning solver.
    #[inline]
    pub fn best(&self) -> &SolverReport {
        &self.reports[self.best]
    }

    /// The winning strategy.
    #[inline]
    pub fn strategy(&self) -> &Strategy {
        self.best().outcome.strategy()
    }

    /// Returns `true` if an exact solver took part, so the winner is optimal.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        self.optimality_proven
    }

    /// Reports of every solver in registration order.
    #[inline]
    pub fn reports(&self) -> &[SolverReport] {
        &self.reports
    }

    /// Wall-clock time of the whole portfolio run.
    #[inline]
    pub fn solve_duration(&self) -> Duration {
        self.solve_duration
    }
}

impl std::fmt::Display for PortfolioOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Best: {} (optimal: {})",
            self.best(),
            self.optimality_proven
        )?;
        for report in &self.reports {
            writeln!(f, "  {}", report)?;
        }
        write!(
            f,
            "Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

type BoxedSolver<'a> = Box<dyn ModerationSolver + Send + 'a>;

pub struct Solver<'a> {
    portfolio: Vec<BoxedSolver<'a>>,
    parallel: bool,
}

impl<'a> Solver<'a> {
    #[inline]
    pub fn add_solver<S>(&mut self, solver: S)
    where
        S: ModerationSolver + Send + 'a,
    {
        self.portfolio.push(Box::new(solver));
    }

    #[inline]
    pub fn add_solver_boxed(&mut self, solver: BoxedSolver<'a>) {
        self.portfolio.push(solver);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.portfolio.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.portfolio.is_empty()
    }

    #[inline]
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Runs every solver on `network` and returns the best evaluated strategy.
    ///
    /// # Errors
    ///
    /// Fails with `PortfolioError::EmptyPortfolio` if no solver was added, and
    /// with `PortfolioError::InvalidStrategy` if any solver returns a strategy
    /// that does not fit the network or its budget.
    pub fn solve(&mut self, network: &Network) -> Result<PortfolioOutcome, PortfolioError> {
        if self.portfolio.is_empty() {
            return Err(PortfolioError::EmptyPortfolio);
        }

        let start_time = Instant::now();
        tracing::debug!(
            solvers = self.portfolio.len(),
            parallel = self.parallel,
            groups = network.num_groups(),
            budget = network.budget(),
            "starting portfolio"
        );

        let results = if self.parallel {
            self.run_parallel(network)
        } else {
            self.portfolio.iter_mut().map(|s| s.run(network)).collect()
        };

        let reports = results
            .into_iter()
            .zip(&self.portfolio)
            .map(|(result, solver)| {
                let name = solver.name().to_string();
                match result {
                    Ok(outcome) => Ok(SolverReport { name, outcome }),
                    Err(source) => Err(PortfolioError::InvalidStrategy {
                        solver: name,
                        source,
                    }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let outcome = Self::construct_outcome(reports, start_time.elapsed());
        tracing::debug!(
            best = %outcome.best().name,
            strategy = %outcome.strategy(),
            conflict = outcome.best().outcome.evaluation.conflict,
            optimal = outcome.optimality_proven,
            "portfolio finished"
        );

        Ok(outcome)
    }

    fn run_parallel(
        &mut self,
        network: &Network,
    ) -> Vec<Result<SolverOutcome, ValidationError>> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .portfolio
                .iter_mut()
                .map(|solver| scope.spawn(move || solver.run(network)))
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        })
    }

    fn construct_outcome(reports: Vec<SolverReport>, solve_duration: Duration) -> PortfolioOutcome {
        // `min_by` keeps the first of equal elements, which is registration order.
        let best = reports
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let a = &a.outcome.evaluation;
                let b = &b.outcome.evaluation;
                a.ratio.cmp(&b.ratio).then(a.effort.cmp(&b.effort))
            })
            .map(|(i, _)| i)
            .unwrap_or(0);

        let optimality_proven = reports.iter().any(|r| r.outcome.is_optimal());

        PortfolioOutcome {
            best,
            optimality_proven,
            reports,
            solve_duration,
        }
    }
}

impl std::fmt::Debug for Solver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.portfolio.iter().map(|s| s.name()).collect();
        f.debug_struct("Solver")
            .field("portfolio", &names)
            .field("parallel", &self.parallel)
            .finish()
    }
}

pub struct SolverBuilder<'a> {
    portfolio: Vec<BoxedSolver<'a>>,
    parallel: bool,
}

impl Default for SolverBuilder<'_> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> SolverBuilder<'a> {
    #[inline]
    pub fn new() -> Self {
        Self {
            portfolio: Vec::new(),
            parallel: true,
        }
    }

    /// Runs the solvers on scoped threads (`true`, the default) or one after another.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[inline]
    pub fn add_solver<S>(mut self, solver: S) -> Self
    where
        S: ModerationSolver + Send + 'a,
    {
        self.portfolio.push(Box::new(solver));
        self
    }

    #[inline]
    pub fn add_solver_boxed(mut self, solver: BoxedSolver<'a>) -> Self {
        self.portfolio.push(solver);
        self
    }

    /// Adds the dynamic programming solver and every greedy heuristic.
    ///
    /// The exhaustive search is left out; add it explicitly for tiny networks.
    pub fn with_default_solvers(self) -> Self {
        self.add_solver(DynamicProgrammingSolver::new())
            .add_solver(HeapGreedySolver::new())
            .add_solver(RadixGreedySolver::new())
            .add_solver(BucketedGreedySolver::new())
            .add_solver(IncrementalGreedySolver::new())
    }

    #[inline]
    pub fn build(self) -> Solver<'a> {
        Solver {
            portfolio: self.portfolio,
            parallel: self.parallel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_exact::{dp::DpFill, exhaustive::ExhaustiveSolver};

    fn sample(budget: u64) -> Network {
        Network::from_tuples(
            [(3, -100, 100, 0.8), (2, 100, 80, 0.5), (4, -10, 10, 0.5)],
            budget,
        )
        .unwrap()
    }

    struct PanickingSolver;

    impl ModerationSolver for PanickingSolver {
        fn solve(&mut self, _network: &Network) -> Strategy {
            panic!("solver exploded");
        }

        fn name(&self) -> &str {
            "panicking"
        }

        fn is_exact(&self) -> bool {
            false
        }
    }

    struct OverModeratingSolver;

    impl ModerationSolver for OverModeratingSolver {
        fn solve(&mut self, network: &Network) -> Strategy {
            Strategy::new(network.groups().iter().map(|g| g.size() + 1).collect())
        }

        fn name(&self) -> &str {
            "over-moderating"
        }

        fn is_exact(&self) -> bool {
            false
        }
    }

    /// Ignores the budget and moderates everybody.
    struct OverBudgetSolver;

    impl ModerationSolver for OverBudgetSolver {
        fn solve(&mut self, network: &Network) -> Strategy {
            Strategy::full(network)
        }

        fn name(&self) -> &str {
            "over-budget"
        }

        fn is_exact(&self) -> bool {
            false
        }
    }

    fn portfolio(parallel: bool) -> Solver<'static> {
        SolverBuilder::new()
            .parallel(parallel)
            .add_solver(HeapGreedySolver::new())
            .add_solver(ExhaustiveSolver::new())
            .add_solver(DynamicProgrammingSolver::new().with_fill(DpFill::TopDown))
            .build()
    }

    #[test]
    fn test_picks_minimum_conflict() {
        for parallel in [false, true] {
            let mut solver = portfolio(parallel);
            let outcome = solver.solve(&sample(200)).unwrap();

            assert!(outcome.is_optimal());
            assert_eq!(outcome.strategy().counts(), &[1, 0, 0]);
            // Exhaustive and DP tie; the earlier registration wins.
            assert_eq!(outcome.best().name, "exhaustive");
            assert_eq!(outcome.reports().len(), 3);
            assert_eq!(outcome.reports()[0].outcome.strategy().counts(), &[1, 2, 2]);
        }
    }

    #[test]
    fn test_heuristics_only_is_not_optimal() {
        let mut solver = SolverBuilder::new()
            .add_solver(RadixGreedySolver::new())
            .add_solver(IncrementalGreedySolver::new())
            .build();
        let outcome = solver.solve(&sample(200)).unwrap();

        assert!(!outcome.is_optimal());
        assert_eq!(outcome.best().name, "greedy-radix");
        assert_eq!(outcome.best().outcome.evaluation.effort, 200);
    }

    #[test]
    fn test_default_solvers() {
        let mut solver = SolverBuilder::new().with_default_solvers().build();
        assert_eq!(solver.len(), 5);
        assert!(solver.is_parallel());

        let outcome = solver.solve(&sample(540)).unwrap();
        assert_eq!(outcome.strategy().counts(), &[3, 2, 4]);
        assert_eq!(outcome.best().outcome.evaluation.conflict, 0.0);
    }

    #[test]
    fn test_empty_portfolio() {
        let mut solver = SolverBuilder::new().build();
        assert!(solver.is_empty());
        assert_eq!(
            solver.solve(&sample(10)).unwrap_err(),
            PortfolioError::EmptyPortfolio
        );
    }

    #[test]
    fn test_invalid_strategy_is_reported() {
        let mut solver = SolverBuilder::new()
            .add_solver(HeapGreedySolver::new())
            .add_solver(OverModeratingSolver)
            .build();

        match solver.solve(&sample(10)) {
            Err(PortfolioError::InvalidStrategy { solver, source }) => {
                assert_eq!(solver, "over-moderating");
                assert!(matches!(source, ValidationError::OverModeration { .. }));
            }
            other => panic!("expected InvalidStrategy, got {:?}", other),
        }
    }

    #[test]
    fn test_over_budget_strategy_never_wins() {
        for parallel in [false, true] {
            let mut solver = SolverBuilder::new()
                .parallel(parallel)
                .add_solver(DynamicProgrammingSolver::new())
                .add_solver(OverBudgetSolver)
                .build();

            match solver.solve(&sample(200)) {
                Err(PortfolioError::InvalidStrategy { solver, source }) => {
                    assert_eq!(solver, "over-budget");
                    assert_eq!(
                        source,
                        ValidationError::OverBudget {
                            effort: 540,
                            budget: 200
                        }
                    );
                }
                other => panic!("expected InvalidStrategy, got {:?}", other),
            }
        }
    }

    #[test]
    #[should_panic(expected = "solver exploded")]
    fn test_panics_propagate() {
        let mut solver = SolverBuilder::new()
            .add_solver(HeapGreedySolver::new())
            .add_solver(PanickingSolver)
            .build();
        let _ = solver.solve(&sample(10));
    }

    #[test]
    fn test_display_lists_every_solver() {
        let mut solver = portfolio(false);
        let rendered = solver.solve(&sample(200)).unwrap().to_string();

        assert!(rendered.starts_with("Best: exhaustive: Optimal([1, 0, 0])"));
        assert!(rendered.contains("greedy-heap: Feasible([1, 2, 2])"));
        assert!(rendered.contains("dp-top-down: Optimal([1, 0, 0])"));
    }
}
