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


/// Statistics collected during a single solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverStatistics {
    /// Number of complete strategies evaluated (exhaustive search, greedy picks).
    pub candidates_evaluated: u64,
    /// Number of table cells or memo states computed.
    pub states_computed: u64,
    /// Number of outer iterations (DP ratio updates, greedy rounds).
    pub iterations: u64,
    /// Total duration of the solve.
    pub solve_duration: std::time::Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(f, "  Candidates Evaluated: {}", self.candidates_evaluated)?;
        writeln!(f, "  States Computed: {}", self.states_computed)?;
        writeln!(f, "  Iterations: {}", self.iterations)?;
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

/// Builder for `SolverStatistics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverStatisticsBuilder {
    stats: SolverStatistics,
}

impl SolverStatisticsBuilder {
    /// Creates a new `SolverStatisticsBuilder` with all counters at zero.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of evaluated candidates.
    #[inline]
    pub fn candidates_evaluated(mut self, candidates_evaluated: u64) -> Self {
        self.stats.candidates_evaluated = candidates_evaluated;
        self
    }

    /// Sets the number of computed states.
    #[inline]
    pub fn states_computed(mut self, states_computed: u64) -> Self {
        self.stats.states_computed = states_computed;
        self
    }

    /// Sets the number of iterations.
    #[inline]
    pub fn iterations(mut self, iterations: u64) -> Self {
        self.stats.iterations = iterations;
        self
    }

    /// Sets the total solve duration.
    #[inline]
    pub fn solve_duration(mut self, solve_duration: std::time::Duration) -> Self {
        self.stats.solve_duration = solve_duration;
        self
    }

    /// Builds the `SolverStatistics` instance.
    #[inline]
    pub fn build(self) -> SolverStatistics {
        self.stats
    }
}
