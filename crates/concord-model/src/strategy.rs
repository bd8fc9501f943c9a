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


//! Moderation strategies.
//!
//! A `Strategy` holds one non-negative count per group: the number of agents
//! to moderate (remove from the conflict) in that group. Strategies are
//! produced by solvers and consumed by evaluation; once returned they are
//! treated as values and never edited in place.

use crate::{index::GroupIndex, network::Network};

/// Per-group moderation counts, index-aligned with `Network::groups`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Strategy {
    counts: Vec<u64>,
}

impl Strategy {
    /// Creates a strategy from raw counts.
    #[inline]
    pub fn new(counts: Vec<u64>) -> Self {
        Self { counts }
    }

    /// The strategy that moderates nobody in `num_groups` groups.
    #[inline]
    pub fn zero(num_groups: usize) -> Self {
        Self {
            counts: vec![0; num_groups],
        }
    }

    /// The strategy that moderates every agent of every group in `network`.
    #[inline]
    pub fn full(network: &Network) -> Self {
        Self {
            counts: network.groups().iter().map(|g| g.size()).collect(),
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if the strategy has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the count for `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: GroupIndex) -> Option<u64> {
        self.counts.get(index.get()).copied()
    }

    /// Returns all counts.
    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Returns the total number of moderated agents.
    #[inline]
    pub fn moderated_agents(&self) -> u128 {
        self.counts.iter().map(|&c| u128::from(c)).sum()
    }

    /// Consumes the strategy and returns the raw counts.
    #[inline]
    pub fn into_counts(self) -> Vec<u64> {
        self.counts
    }
}

impl From<Vec<u64>> for Strategy {
    #[inline]
    fn from(counts: Vec<u64>) -> Self {
        Self::new(counts)
    }
}

impl FromIterator<u64> for Strategy {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

impl AsRef<[u64]> for Strategy {
    #[inline]
    fn as_ref(&self) -> &[u64] {
        &self.counts
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.counts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_full() {
        let network =
            Network::from_tuples([(3, -100, 100, 0.8), (0, 1, 2, 0.1), (4, 0, 0, 0.0)], 0)
                .unwrap();
        assert_eq!(Strategy::zero(3).counts(), &[0, 0, 0]);
        assert_eq!(Strategy::full(&network).counts(), &[3, 0, 4]);
        assert_eq!(Strategy::full(&network).moderated_agents(), 7);
    }

    #[test]
    fn test_accessors_and_conversions() {
        let s: Strategy = vec![1, 2, 3].into();
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s.get(GroupIndex::new(2)), Some(3));
        assert_eq!(s.get(GroupIndex::new(3)), None);

        let collected: Strategy = (0..3u64).collect();
        assert_eq!(collected.into_counts(), vec![0, 1, 2]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Strategy::new(vec![3, 2, 4])), "[3, 2, 4]");
        assert_eq!(format!("{}", Strategy::default()), "[]");
    }
}
