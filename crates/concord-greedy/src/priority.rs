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


//! Greedy ranking of agent groups.

use concord_model::group::AgentGroup;
use num_traits::ToPrimitive;
use std::cmp::Ordering;

/// How attractive moderating a group is.
///
/// `Free` groups cost nothing and rank above every finite ratio. Among
/// ratios, larger is better.
#[derive(Debug, Clone, Copy)]
pub enum Priority {
    /// `discrepancy / rigidity` for a group with positive rigidity.
    Ratio(f64),
    /// A group with rigidity 0.
    Free,
}

impl Priority {
    /// Ranks `group`, or returns `None` if moderating it cannot lower the
    /// conflict (discrepancy 0).
    #[inline]
    pub fn of(group: &AgentGroup) -> Option<Self> {
        let discrepancy = group.discrepancy();
        if discrepancy == 0 {
            return None;
        }
        if group.rigidity() == 0.0 {
            return Some(Priority::Free);
        }
        Some(Priority::Ratio(discrepancy as f64 / group.rigidity()))
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        matches!(self, Priority::Free)
    }

    /// An integer sort key, `round(ratio * scale)`.
    ///
    /// Finite ratios saturate at `u64::MAX - 1`; `Free` maps to `u64::MAX`.
    #[inline]
    pub fn key(&self, scale: f64) -> u64 {
        match *self {
            Priority::Free => u64::MAX,
            Priority::Ratio(r) => (r * scale)
                .round()
                .to_u64()
                .unwrap_or(u64::MAX)
                .min(u64::MAX - 1),
        }
    }
}

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Priority::Free, Priority::Free) => Ordering::Equal,
            (Priority::Free, Priority::Ratio(_)) => Ordering::Greater,
            (Priority::Ratio(_), Priority::Free) => Ordering::Less,
            (Priority::Ratio(a), Priority::Ratio(b)) => a.total_cmp(b),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Free => write!(f, "free"),
            Priority::Ratio(r) => write!(f, "{:.3}", r),
        }
    }
}
