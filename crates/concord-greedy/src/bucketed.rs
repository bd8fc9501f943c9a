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


//! Heuristic that handles near-free groups before everything else.
//!
//! Groups whose rigidity is below `free_threshold` cost almost nothing per
//! agent, so their ratio says little beyond "huge". They are ordered by
//! discrepancy alone with a counting sort over `0..=200` and consumed first.
//! The remaining groups follow in radix order, as in `RadixGreedySolver`.

use crate::{
    allocator::Allocator,
    config::GreedyConfig,
    radix,
    radix_greedy::{consume_in_order, eligible},
};
use concord_model::{
    error::{MAX_OPINION, MIN_OPINION},
    network::Network,
    strategy::Strategy,
};
use concord_search::{
    solver::{ModerationSolver, full_moderation_shortcut},
    stats::{SolverStatistics, SolverStatisticsBuilder},
};

/// The largest possible discrepancy.
const MAX_DISCREPANCY: u32 = MIN_OPINION.abs_diff(MAX_OPINION);

#[derive(Debug, Clone, Default)]
pub struct BucketedGreedySolver {
    config: GreedyConfig,
    allocator: Allocator,
    stats: SolverStatistics,
}

impl BucketedGreedySolver {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_config(config: GreedyConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &GreedyConfig {
        &self.config
    }
}

impl ModerationSolver for BucketedGreedySolver {
    fn solve(&mut self, network: &Network) -> Strategy {
        self.stats = SolverStatistics::default();

        if let Some(full) = full_moderation_shortcut(network) {
            return full;
        }

        self.allocator.reset(network);
        let (indices, priorities) = eligible(network);

        let mut near_free = Vec::new();
        let mut discrepancies = Vec::new();
        let mut normal = Vec::new();
        let mut keys = Vec::new();
        for (&index, priority) in indices.iter().zip(&priorities) {
            let group = &network.groups()[index];
            if group.rigidity() < self.config.free_threshold() {
                near_free.push(index);
                discrepancies.push(group.discrepancy());
            } else {
                normal.push(index);
                keys.push(priority.key(self.config.scale()));
            }
        }

        tracing::debug!(
            groups = network.num_groups(),
            near_free = near_free.len(),
            normal = normal.len(),
            budget = network.budget(),
            "starting bucketed greedy"
        );

        let near_free_order = radix::counting_sort_descending(&discrepancies, MAX_DISCREPANCY)
            .into_iter()
            .map(|pos| near_free[pos]);
        let normal_order = radix::argsort_descending(&keys)
            .into_iter()
            .map(|pos| normal[pos]);

        let visited = consume_in_order(
            &mut self.allocator,
            network,
            near_free_order.chain(normal_order),
        );

        self.stats = SolverStatisticsBuilder::new()
            .candidates_evaluated(visited)
            .iterations(self.allocator.picks())
            .build();

        self.allocator.strategy()
    }

    fn name(&self) -> &str {
        "greedy-bucketed"
    }

    fn is_exact(&self) -> bool {
        false
    }

    fn statistics(&self) -> SolverStatistics {
        self.stats
    }
}
