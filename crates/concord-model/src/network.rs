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


//! The immutable moderation network.
//!
//! A `Network` is an ordered sequence of agent groups plus the total effort
//! budget available to a strategy. The order of `groups` is semantically
//! significant: strategy entry `i` always refers to group `i`, so the order is
//! preserved by every operation that produces a new network.

use crate::{
    error::ValidationError,
    eval,
    group::AgentGroup,
    index::GroupIndex,
    strategy::Strategy,
};

/// An ordered collection of agent groups together with an effort budget.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Network {
    groups: Vec<AgentGroup>,
    budget: u64,
}

impl Network {
    /// Creates a new network from validated groups.
    #[inline]
    pub fn new(groups: Vec<AgentGroup>, budget: u64) -> Self {
        Self { groups, budget }
    }

    /// Creates a network from `(size, opinion_a, opinion_b, rigidity)` tuples.
    ///
    /// # Errors
    ///
    /// Fails with the `ValidationError` of the first tuple that violates a group invariant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use concord_model::network::Network;
    ///
    /// let network = Network::from_tuples(
    ///     [(3, -100, 100, 0.8), (2, 100, 80, 0.5), (4, -10, 10, 0.5)],
    ///     540,
    /// )
    /// .unwrap();
    /// assert_eq!(network.num_groups(), 3);
    /// assert_eq!(network.max_effort(), 540);
    /// ```
    pub fn from_tuples<I>(tuples: I, budget: u64) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (u64, i32, i32, f64)>,
    {
        let groups = tuples
            .into_iter()
            .map(|(size, a, b, r)| AgentGroup::new(size, a, b, r))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(groups, budget))
    }

    /// Creates a network from textual records of four fields each.
    ///
    /// # Errors
    ///
    /// Fails with `ValidationError::FieldCount` for a record of the wrong arity,
    /// `ValidationError::Parse` for a token that does not parse, or the range
    /// violation of the offending group.
    pub fn from_records<R, S>(records: &[R], budget: u64) -> Result<Self, ValidationError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let groups = records
            .iter()
            .enumerate()
            .map(|(i, record)| AgentGroup::from_fields(record.as_ref(), i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(groups, budget))
    }

    /// Returns the number of groups.
    #[inline]
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if the network has no groups.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the total effort budget.
    #[inline]
    pub fn budget(&self) -> u64 {
        self.budget
    }

    /// Returns all groups in strategy order.
    #[inline]
    pub fn groups(&self) -> &[AgentGroup] {
        &self.groups
    }

    /// Returns the group at `index`, or `None` if out of bounds.
    #[inline]
    pub fn group(&self, index: GroupIndex) -> Option<&AgentGroup> {
        self.groups.get(index.get())
    }

    /// Returns an iterator over `(GroupIndex, &AgentGroup)` pairs.
    #[inline]
    pub fn iter_indexed(&self) -> impl Iterator<Item = (GroupIndex, &AgentGroup)> + '_ {
        self.groups
            .iter()
            .enumerate()
            .map(|(i, g)| (GroupIndex::new(i), g))
    }

    /// Returns the total number of agents.
    ///
    /// Accumulated in `u128`, so it cannot overflow for any number of `u64` groups
    /// that fits in memory.
    #[inline]
    pub fn population(&self) -> u128 {
        self.groups.iter().map(|g| u128::from(g.size())).sum()
    }

    /// Returns the largest group population (0 for an empty network).
    #[inline]
    pub fn max_group_size(&self) -> u64 {
        self.groups.iter().map(AgentGroup::size).max().unwrap_or(0)
    }

    /// Shorthand for [`eval::max_effort`].
    #[inline]
    pub fn max_effort(&self) -> u64 {
        eval::max_effort(self)
    }

    /// Shorthand for [`eval::internal_conflict`].
    #[inline]
    pub fn internal_conflict(&self) -> f64 {
        eval::internal_conflict(self)
    }

    /// Shorthand for [`eval::effort`].
    #[inline]
    pub fn effort(&self, strategy: &Strategy) -> Result<u64, ValidationError> {
        eval::effort(self, strategy)
    }

    /// Shorthand for [`eval::apply_strategy`].
    #[inline]
    pub fn apply(&self, strategy: &Strategy) -> Result<Network, ValidationError> {
        eval::apply_strategy(self, strategy)
    }

    /// Returns `true` if moderating every agent fits into the budget.
    #[inline]
    pub fn is_fully_moderatable(&self) -> bool {
        self.max_effort() <= self.budget
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Network with {} agent groups and budget {}",
            self.groups.len(),
            self.budget
        )?;
        writeln!(f, "   Internal Conflict: {:.2}", self.internal_conflict())?;
        writeln!(f)?;

        if self.groups.is_empty() {
            writeln!(f, "   (No agent groups)")?;
            return Ok(());
        }

        writeln!(
            f,
            "   {:<6} | {:<8} | {:<10} | {:<10} | {:<9}",
            "Group", "Size", "Opinion A", "Opinion B", "Rigidity"
        )?;
        writeln!(f, "   {:-<6}-+-{:-<8}-+-{:-<10}-+-{:-<10}-+-{:-<9}", "", "", "", "", "")?;
        for (i, g) in self.groups.iter().enumerate() {
            writeln!(
                f,
                "   {:<6} | {:<8} | {:<10} | {:<10} | {:<9}",
                i,
                g.size(),
                g.opinion_a(),
                g.opinion_b(),
                g.rigidity()
            )?;
        }

        Ok(())
    }
}
