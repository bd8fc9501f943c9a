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


//! Max-priority queue heuristic.

use crate::{allocator::Allocator, priority::Priority};
use concord_model::{network::Network, strategy::Strategy};
use concord_search::{
    solver::{ModerationSolver, full_moderation_shortcut},
    stats::{SolverStatistics, SolverStatisticsBuilder},
};
use std::{cmp::Reverse, collections::BinaryHeap};

/// A queued group: best priority first, lowest index among equals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    priority: Priority,
    index: Reverse<usize>,
}

/// Pops groups in priority order and moderates as much of each as the budget allows.
#[derive(Debug, Clone, Default)]
pub struct HeapGreedySolver {
    heap: BinaryHeap<Entry>,
    allocator: Allocator,
    stats: SolverStatistics,
}

impl HeapGreedySolver {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModerationSolver for HeapGreedySolver {
    fn solve(&mut self, network: &Network) -> Strategy {
        self.stats = SolverStatistics::default();

        if let Some(full) = full_moderation_shortcut(network) {
            return full;
        }

        self.allocator.reset(network);
        self.heap.clear();
        self.heap.extend(network.iter_indexed().filter_map(|(i, g)| {
            Priority::of(g).map(|priority| Entry {
                priority,
                index: Reverse(i.get()),
            })
        }));

        tracing::debug!(
            groups = network.num_groups(),
            queued = self.heap.len(),
            budget = network.budget(),
            "starting heap greedy"
        );

        let mut popped = 0u64;
        while let Some(Entry {
            priority,
            index: Reverse(index),
        }) = self.heap.pop()
        {
            if self.allocator.remaining_budget() == 0 && !priority.is_free() {
                break;
            }
            popped += 1;
            self.allocator.consume(&network.groups()[index], index);
        }

        self.stats = SolverStatisticsBuilder::new()
            .candidates_evaluated(popped)
            .iterations(self.allocator.picks())
            .build();

        self.allocator.strategy()
    }

    fn name(&self) -> &str {
        "greedy-heap"
    }

    fn is_exact(&self) -> bool {
        false
    }

    fn statistics(&self) -> SolverStatistics {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_model::eval::effort;

    fn sample(budget: u64) -> Network {
        Network::from_tuples(
            [(3, -100, 100, 0.8), (2, 100, 80, 0.5), (4, -10, 10, 0.5)],
            budget,
        )
        .unwrap()
    }

    #[test]
    fn test_full_budget() {
        assert_eq!(HeapGreedySolver::new().solve(&sample(540)).counts(), &[3, 2, 4]);
    }

    #[test]
    fn test_partial_budget_spends_in_priority_order() {
        let network = sample(200);
        let mut solver = HeapGreedySolver::new();
        let strategy = solver.solve(&network);

        assert_eq!(strategy.counts(), &[1, 2, 2]);
        assert_eq!(effort(&network, &strategy), Ok(200));
        assert_eq!(solver.statistics().iterations, 3);
    }

    #[test]
    fn test_free_groups_first_and_zero_discrepancy_skipped() {
        let network =
            Network::from_tuples([(2, 0, 10, 0.0), (3, -100, 100, 1.0), (5, 7, 7, 0.5)], 250)
                .unwrap();
        let strategy = HeapGreedySolver::new().solve(&network);
        assert_eq!(strategy.counts(), &[2, 1, 0]);
    }

    #[test]
    fn test_zero_budget() {
        let network = sample(0);
        assert_eq!(HeapGreedySolver::new().solve(&network), Strategy::zero(3));
    }
}
