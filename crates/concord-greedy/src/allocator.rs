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


//! The work state of a greedy run.
//!
//! Groups are addressed by their position in the network. The allocator
//! tracks how many agents each group still has, how much budget is left, and
//! the counts moderated so far. Every charge is the difference of two
//! `moderation_cost` values, so the charges telescope to exactly the effort
//! of the final strategy and the budget can never be overspent.

use concord_model::{group::AgentGroup, network::Network, strategy::Strategy};
use num_traits::ToPrimitive;

#[derive(Debug, Clone, Default)]
pub struct Allocator {
    capacity: Vec<u64>,
    counts: Vec<u64>,
    budget: u64,
    picks: u64,
}

impl Allocator {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepares the allocator for a run on `network`, reusing its buffers.
    pub fn reset(&mut self, network: &Network) {
        self.capacity.clear();
        self.capacity
            .extend(network.groups().iter().map(AgentGroup::size));
        self.counts.clear();
        self.counts.resize(network.num_groups(), 0);
        self.budget = network.budget();
        self.picks = 0;
    }

    #[inline]
    pub fn remaining_budget(&self) -> u64 {
        self.budget
    }

    #[inline]
    pub fn remaining_capacity(&self, index: usize) -> u64 {
        self.capacity[index]
    }

    #[inline]
    pub fn moderated(&self, index: usize) -> u64 {
        self.counts[index]
    }

    /// The number of successful `consume` and `moderate_one` calls.
    #[inline]
    pub fn picks(&self) -> u64 {
        self.picks
    }

    /// The extra effort of moderating `agents` more agents of `group` at `index`.
    #[inline]
    pub fn extra_cost(&self, group: &AgentGroup, index: usize, agents: u64) -> u64 {
        let done = self.counts[index];
        group.moderation_cost(done + agents) - group.moderation_cost(done)
    }

    /// Moderates as many remaining agents of `group` as the budget allows.
    ///
    /// Returns the number of agents moderated.
    pub fn consume(&mut self, group: &AgentGroup, index: usize) -> u64 {
        let capacity = self.capacity[index];
        if capacity == 0 {
            return 0;
        }

        let per_agent = group.cost_per_agent();
        let mut take = if per_agent == 0.0 {
            capacity
        } else {
            (self.budget as f64 / per_agent)
                .floor()
                .to_u64()
                .unwrap_or(u64::MAX)
                .min(capacity)
        };

        // Rounding can push the estimate one step too far.
        while take > 0 && self.extra_cost(group, index, take) > self.budget {
            take -= 1;
        }

        if take > 0 {
            self.charge(group, index, take);
        }
        take
    }

    /// Moderates a single agent if its extra cost fits into the budget.
    pub fn moderate_one(&mut self, group: &AgentGroup, index: usize) -> bool {
        if self.capacity[index] == 0 || self.extra_cost(group, index, 1) > self.budget {
            return false;
        }
        self.charge(group, index, 1);
        true
    }

    fn charge(&mut self, group: &AgentGroup, index: usize, agents: u64) {
        let cost = self.extra_cost(group, index, agents);
        self.budget -= cost;
        self.capacity[index] -= agents;
        self.counts[index] += agents;
        self.picks += 1;

        tracing::trace!(
            group = index,
            agents,
            cost,
            remaining = self.budget,
            "moderated"
        );
    }

    /// Returns the strategy built so far.
    #[inline]
    pub fn strategy(&self) -> Strategy {
        Strategy::new(self.counts.clone())
    }
}
