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


//! Heuristic ordered by an LSD radix sort on scaled priority keys.

use crate::{allocator::Allocator, config::GreedyConfig, priority::Priority, radix};
use concord_model::{network::Network, strategy::Strategy};
use concord_search::{
    solver::{ModerationSolver, full_moderation_shortcut},
    stats::{SolverStatistics, SolverStatisticsBuilder},
};

/// Orders groups by `round(ratio * scale)` and consumes them in that order.
///
/// Ratios closer than `1 / scale` share a key and are taken in network order.
#[derive(Debug, Clone, Default)]
pub struct RadixGreedySolver {
    config: GreedyConfig,
    allocator: Allocator,
    stats: SolverStatistics,
}

impl RadixGreedySolver {
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

/// Network indices of the groups worth moderating, with their priorities.
pub(crate) fn eligible(network: &Network) -> (Vec<usize>, Vec<Priority>) {
    network
        .iter_indexed()
        .filter_map(|(i, g)| Priority::of(g).map(|p| (i.get(), p)))
        .unzip()
}

/// Consumes `order` (network indices) front to back. Returns the number of groups visited.
pub(crate) fn consume_in_order(
    allocator: &mut Allocator,
    network: &Network,
    order: impl IntoIterator<Item = usize>,
) -> u64 {
    let mut visited = 0u64;
    for index in order {
        let group = &network.groups()[index];
        if allocator.remaining_budget() == 0 && !group.is_free() {
            break;
        }
        visited += 1;
        allocator.consume(group, index);
    }
    visited
}

impl ModerationSolver for RadixGreedySolver {
    fn solve(&mut self, network: &Network) -> Strategy {
        self.stats = SolverStatistics::default();

        if let Some(full) = full_moderation_shortcut(network) {
            return full;
        }

        self.allocator.reset(network);
        let (indices, priorities) = eligible(network);
        let keys: Vec<u64> = priorities
            .iter()
            .map(|p| p.key(self.config.scale()))
            .collect();
        let order = radix::argsort_descending(&keys);

        tracing::debug!(
            groups = network.num_groups(),
            eligible = indices.len(),
            budget = network.budget(),
            scale = self.config.scale(),
            "starting radix greedy"
        );

        let visited = consume_in_order(
            &mut self.allocator,
            network,
            order.into_iter().map(|pos| indices[pos]),
        );

        self.stats = SolverStatisticsBuilder::new()
            .candidates_evaluated(visited)
            .iterations(self.allocator.picks())
            .build();

        self.allocator.strategy()
    }

    fn name(&self) -> &str {
        "greedy-radix"
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
        assert_eq!(RadixGreedySolver::new().solve(&sample(540)).counts(), &[3, 2, 4]);
    }

    #[test]
    fn test_partial_budget() {
        let network = sample(200);
        let strategy = RadixGreedySolver::new().solve(&network);
        assert_eq!(strategy.counts(), &[1, 2, 2]);
        assert_eq!(effort(&network, &strategy), Ok(200));
    }

    #[test]
    fn test_coarse_scale_falls_back_to_network_order() {
        // Ratios 40 and 50 share key 0 at scale 0.001.
        let network = Network::from_tuples([(5, 0, 20, 0.5), (5, 0, 50, 1.0)], 50).unwrap();

        let fine = RadixGreedySolver::new().solve(&network);
        assert_eq!(fine.counts(), &[0, 1]);

        let coarse = RadixGreedySolver::with_config(GreedyConfig::new().with_scale(0.001))
            .solve(&network);
        assert_eq!(coarse.counts(), &[5, 0]);
    }

    #[test]
    fn test_zero_budget() {
        assert_eq!(RadixGreedySolver::new().solve(&sample(0)), Strategy::zero(3));
    }
}
