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


//! The solver interface.
//!
//! Every moderation solver consumes a `&Network` and returns a `Strategy`.
//! Solvers take `&mut self` so they can reuse scratch buffers across calls;
//! they never mutate the network. Evaluation and timing are layered on top by
//! [`ModerationSolver::run`], which is what orchestrators call.

use crate::{
    result::{SolverOutcome, SolverResult},
    stats::SolverStatistics,
};
use concord_model::{error::ValidationError, eval, network::Network, strategy::Strategy};
use std::time::Instant;

/// A solver for the budgeted moderation problem.
pub trait ModerationSolver {
    /// Computes a strategy for `network` whose effort does not exceed its budget.
    fn solve(&mut self, network: &Network) -> Strategy;

    /// A short, human-readable identifier.
    fn name(&self) -> &str;

    /// Returns `true` if every strategy returned by `solve` is optimal.
    fn is_exact(&self) -> bool;

    /// Counters of the most recent `solve` call.
    fn statistics(&self) -> SolverStatistics {
        SolverStatistics::default()
    }

    /// Solves, times and evaluates in one step.
    ///
    /// # Errors
    ///
    /// Fails if the returned strategy is not valid for `network` or spends
    /// more than its budget (`ValidationError::OverBudget`). Either indicates
    /// a solver bug rather than a user error.
    fn run(&mut self, network: &Network) -> Result<SolverOutcome, ValidationError> {
        let start = Instant::now();
        let strategy = self.solve(network);
        let elapsed = start.elapsed();

        let evaluation = eval::evaluate(network, &strategy)?;
        if evaluation.effort > network.budget() {
            return Err(ValidationError::OverBudget {
                effort: evaluation.effort,
                budget: network.budget(),
            });
        }
        let statistics = SolverStatistics {
            solve_duration: elapsed,
            ..self.statistics()
        };

        tracing::debug!(
            solver = self.name(),
            strategy = %strategy,
            effort = evaluation.effort,
            conflict = evaluation.conflict,
            elapsed_ms = elapsed.as_millis() as u64,
            "solver finished"
        );

        let result = if self.is_exact() {
            SolverResult::Optimal(strategy)
        } else {
            SolverResult::Feasible(strategy)
        };

        Ok(SolverOutcome::new(result, evaluation, statistics))
    }
}

impl<S> ModerationSolver for Box<S>
where
    S: ModerationSolver + ?Sized,
{
    #[inline]
    fn solve(&mut self, network: &Network) -> Strategy {
        (**self).solve(network)
    }

    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn is_exact(&self) -> bool {
        (**self).is_exact()
    }

    #[inline]
    fn statistics(&self) -> SolverStatistics {
        (**self).statistics()
    }
}

/// Returns the strategy that moderates everybody if the budget can pay for it.
///
/// When `max_effort(network) <= budget` the full strategy reaches conflict 0,
/// which no other strategy can beat, so every solver returns it without
/// searching.
pub fn full_moderation_shortcut(network: &Network) -> Option<Strategy> {
    if network.is_fully_moderatable() {
        tracing::debug!(
            groups = network.num_groups(),
            budget = network.budget(),
            "budget covers full moderation"
        );
        return Some(Strategy::full(network));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ZeroSolver;

    impl ModerationSolver for ZeroSolver {
        fn solve(&mut self, network: &Network) -> Strategy {
            Strategy::zero(network.num_groups())
        }

        fn name(&self) -> &str {
            "zero"
        }

        fn is_exact(&self) -> bool {
            false
        }
    }

    struct BrokenSolver;

    impl ModerationSolver for BrokenSolver {
        fn solve(&mut self, _network: &Network) -> Strategy {
            Strategy::zero(0)
        }

        fn name(&self) -> &str {
            "broken"
        }

        fn is_exact(&self) -> bool {
            true
        }
    }

    struct FullSolver;

    impl ModerationSolver for FullSolver {
        fn solve(&mut self, network: &Network) -> Strategy {
            Strategy::full(network)
        }

        fn name(&self) -> &str {
            "full"
        }

        fn is_exact(&self) -> bool {
            true
        }
    }

    fn sample(budget: u64) -> Network {
        Network::from_tuples(
            [(3, -100, 100, 0.8), (2, 100, 80, 0.5), (4, -10, 10, 0.5)],
            budget,
        )
        .unwrap()
    }

    #[test]
    fn test_shortcut_applies_when_budget_suffices() {
        assert_eq!(
            full_moderation_shortcut(&sample(540)),
            Some(Strategy::new(vec![3, 2, 4]))
        );
        assert_eq!(full_moderation_shortcut(&sample(539)), None);
    }

    #[test]
    fn test_shortcut_on_empty_network() {
        assert_eq!(full_moderation_shortcut(&Network::default()), Some(Strategy::zero(0)));
    }

    #[test]
    fn test_run_wraps_and_evaluates() {
        let mut solver: Box<dyn ModerationSolver> = Box::new(ZeroSolver);
        let outcome = solver.run(&sample(100)).unwrap();

        assert!(!outcome.is_optimal());
        assert_eq!(outcome.strategy(), &Strategy::zero(3));
        assert_eq!(outcome.evaluation.effort, 0);
        assert!((outcome.evaluation.conflict - 122_400.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_rejects_strategies_over_budget() {
        assert_eq!(
            FullSolver.run(&sample(200)).unwrap_err(),
            ValidationError::OverBudget {
                effort: 540,
                budget: 200
            }
        );
        assert!(FullSolver.run(&sample(540)).unwrap().is_optimal());
    }

    #[test]
    fn test_run_reports_invalid_strategies() {
        assert!(matches!(
            BrokenSolver.run(&sample(100)),
            Err(ValidationError::StrategyLength { .. })
        ));
    }
}
