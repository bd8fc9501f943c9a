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


use crate::stats::SolverStatistics;
use concord_model::{eval::Evaluation, strategy::Strategy};

/// The strategy returned by a solver, tagged with the guarantee behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult {
    /// The strategy minimizes the internal conflict within the budget.
    Optimal(Strategy),
    /// The strategy respects the budget, but is not proven optimal.
    Feasible(Strategy),
}

impl SolverResult {
    /// Returns the strategy regardless of the guarantee.
    #[inline]
    pub fn strategy(&self) -> &Strategy {
        match self {
            SolverResult::Optimal(s) | SolverResult::Feasible(s) => s,
        }
    }

    /// Consumes the result and returns the strategy.
    #[inline]
    pub fn into_strategy(self) -> Strategy {
        match self {
            SolverResult::Optimal(s) | SolverResult::Feasible(s) => s,
        }
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolverResult::Optimal(_))
    }
}

impl std::fmt::Display for SolverResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Optimal(s) => write!(f, "Optimal({})", s),
            SolverResult::Feasible(s) => write!(f, "Feasible({})", s),
        }
    }
}

/// A solver result together with its evaluation and statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    pub result: SolverResult,
    pub evaluation: Evaluation,
    pub statistics: SolverStatistics,
}

impl SolverOutcome {
    #[inline]
    pub fn new(result: SolverResult, evaluation: Evaluation, statistics: SolverStatistics) -> Self {
        Self {
            result,
            evaluation,
            statistics,
        }
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        self.result.is_optimal()
    }

    #[inline]
    pub fn strategy(&self) -> &Strategy {
        self.result.strategy()
    }
}

impl std::fmt::Display for SolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {}", self.result)?;
        writeln!(f, "Evaluation: {}", self.evaluation)?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_model::eval::Conflict;

    #[test]
    fn test_result_accessors() {
        let optimal = SolverResult::Optimal(Strategy::new(vec![1, 2]));
        let feasible = SolverResult::Feasible(Strategy::new(vec![0, 2]));

        assert!(optimal.is_optimal());
        assert!(!feasible.is_optimal());
        assert_eq!(feasible.strategy().counts(), &[0, 2]);
        assert_eq!(optimal.into_strategy().into_counts(), vec![1, 2]);
    }

    #[test]
    fn test_display() {
        let outcome = SolverOutcome::new(
            SolverResult::Feasible(Strategy::new(vec![3, 0])),
            Evaluation {
                effort: 480,
                conflict: 400.0,
                ratio: Conflict::new(800, 2),
            },
            SolverStatistics::default(),
        );

        let rendered = format!("{}", outcome);
        assert!(rendered.contains("Result: Feasible([3, 0])"));
        assert!(rendered.contains("Evaluation: effort: 480, conflict: 400"));
        assert!(rendered.contains("Solver Statistics:"));
    }
}
