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


//! One-agent-at-a-time heuristic.
//!
//! Every round rescans all groups and moderates a single agent of the best
//! ranked group whose next agent still fits into the budget. The next agent's
//! price is `ceil(c * (k + 1)) - ceil(c * k)` for `k` agents already
//! moderated, which can be 0 when rounding already paid for it.

use crate::{allocator::Allocator, priority::Priority};
use concord_model::{network::Network, strategy::Strategy};
use concord_search::{
    solver::{ModerationSolver, full_moderation_shortcut},
    stats::{SolverStatistics, SolverStatisticsBuilder},
};

#[derive(Debug, Clone, Default)]
pub struct IncrementalGreedySolver {
    priorities: Vec<Option<Priority>>,
    allocator: Allocator,
    stats: SolverStatistics,
}

impl IncrementalGreedySolver {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The best group whose next agent is affordable, first index among equals.
    fn next_pick(&self, network: &Network) -> Option<usize> {
        let mut best: Option<(Priority, usize)> = None;
        for (index, group) in network.groups().iter().enumerate() {
            let Some(priority) = self.priorities[index] else {
                continue;
            };
            if self.allocator.remaining_capacity(index) == 0
                || self.allocator.extra_cost(group, index, 1) > self.allocator.remaining_budget()
            {
                continue;
            }
            if best.is_none_or(|(p, _)| priority > p) {
                best = Some((priority, index));
            }
        }
        best.map(|(_, index)| index)
    }
}

impl ModerationSolver for IncrementalGreedySolver {
    fn solve(&mut self, network: &Network) -> Strategy {
        self.stats = SolverStatistics::default();

        if let Some(full) = full_moderation_shortcut(network) {
            return full;
        }

        self.allocator.reset(network);
        self.priorities.clear();
        self.priorities
            .extend(network.groups().iter().map(Priority::of));

        tracing::debug!(
            groups = network.num_groups(),
            budget = network.budget(),
            "starting incremental greedy"
        );

        let mut rounds = 0u64;
        while let Some(index) = self.next_pick(network) {
            rounds += 1;
            self.allocator
                .moderate_one(&network.groups()[index], index);
        }

        self.stats = SolverStatisticsBuilder::new()
            .candidates_evaluated(rounds.saturating_mul(network.num_groups() as u64))
            .iterations(rounds)
            .build();

        self.allocator.strategy()
    }

    fn name(&self) -> &str {
        "greedy-incremental"
    }

    fn is_exact(&self) -> bool {
        false
    }

    fn statistics(&self) -> SolverStatistics {
        self.stats
    }
}
