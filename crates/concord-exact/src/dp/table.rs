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


//! Flattened `(group, budget)` tables.
//!
//! Row `i` describes the first `i` groups, column `b` an effort budget of `b`.
//! Both tables are stored row-major in a single allocation of
//! `(num_groups + 1) * (budget + 1)` cells.

use concord_model::group::AgentGroup;

/// Marker for a cell the top-down fill has not computed yet.
pub const UNKNOWN: i128 = i128::MIN;

/// The cost of moderating `k` agents of a single group, for every `k` whose
/// cost fits into the table budget.
///
/// Non-decreasing, so a scan over `k` can stop at the first unaffordable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostLadder {
    costs: Vec<u64>,
}

impl CostLadder {
    pub fn new(group: &AgentGroup, budget: u64) -> Self {
        let mut costs = Vec::new();
        for k in 0..=group.size() {
            let cost = group.moderation_cost(k);
            if cost > budget {
                break;
            }
            costs.push(cost);
        }
        Self { costs }
    }

    /// The largest affordable `k`.
    #[inline]
    pub fn max_agents(&self) -> u64 {
        self.costs.len() as u64 - 1
    }

    /// The cost of moderating `k` agents.
    #[inline]
    pub fn cost(&self, k: u64) -> u64 {
        self.costs[k as usize]
    }

    /// Iterates `(k, cost)` for every `k` whose cost fits into `budget`.
    #[inline]
    pub fn affordable(&self, budget: u64) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.costs
            .iter()
            .enumerate()
            .take_while(move |&(_, &c)| c <= budget)
            .map(|(k, &c)| (k as u64, c))
    }
}

/// The `best` and `choice` tables of the allocation recurrence.
#[derive(Debug, Clone)]
pub struct AllocationTable {
    width: usize,
    best: Vec<i128>,
    choice: Vec<u64>,
}

impl AllocationTable {
    /// The number of cells a table for `num_groups` groups and budgets
    /// `0..=budget` needs, or `None` if it does not fit in `usize`.
    #[inline]
    pub fn cells(num_groups: usize, budget: usize) -> Option<usize> {
        budget.checked_add(1)?.checked_mul(num_groups.checked_add(1)?)
    }

    /// Creates a table for `num_groups` groups and budgets `0..=budget`,
    /// with every cell of rows `1..` marked `UNKNOWN` and row 0 set to 0.
    pub fn new(num_groups: usize, budget: usize) -> Self {
        let width = budget + 1;
        let mut best = vec![UNKNOWN; (num_groups + 1) * width];
        best[..width].fill(0);

        Self {
            width,
            best,
            choice: vec![0; (num_groups + 1) * width],
        }
    }

    /// Resets the table to the state of [`AllocationTable::new`], reusing the allocation.
    pub fn reset(&mut self, num_groups: usize, budget: usize) {
        self.width = budget + 1;
        let len = (num_groups + 1) * self.width;

        self.best.clear();
        self.best.resize(len, UNKNOWN);
        self.best[..self.width].fill(0);
        self.choice.clear();
        self.choice.resize(len, 0);
    }

    #[inline]
    pub fn num_groups(&self) -> usize {
        self.best.len() / self.width - 1
    }

    #[inline]
    pub fn budget(&self) -> usize {
        self.width - 1
    }

    #[inline(always)]
    fn cell(&self, i: usize, b: usize) -> usize {
        debug_assert!(b < self.width);
        i * self.width + b
    }

    /// The minimum weighted remainder of the first `i` groups with budget `b`,
    /// or `None` if the cell has not been computed.
    #[inline]
    pub fn get(&self, i: usize, b: usize) -> Option<i128> {
        let v = self.best[self.cell(i, b)];
        (v != UNKNOWN).then_some(v)
    }

    #[inline]
    pub fn choice(&self, i: usize, b: usize) -> u64 {
        self.choice[self.cell(i, b)]
    }

    #[inline]
    pub(crate) fn raw(&self, i: usize, b: usize) -> i128 {
        self.best[self.cell(i, b)]
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, b: usize, value: i128, k: u64) {
        let c = self.cell(i, b);
        self.best[c] = value;
        self.choice[c] = k;
    }

    /// Walks the choices back from `(num_groups, budget)` and returns the counts.
    ///
    /// Every cell on the walk must have been computed.
    pub fn reconstruct(&self, ladders: &[CostLadder]) -> Vec<u64> {
        let mut counts = vec![0u64; ladders.len()];
        let mut remaining = self.budget();

        for i in (1..=ladders.len()).rev() {
            let k = self.choice(i, remaining);
            counts[i - 1] = k;
            remaining -= ladders[i - 1].cost(k) as usize;
        }

        counts
    }
}
