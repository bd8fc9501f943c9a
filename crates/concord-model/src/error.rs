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


//! Validation errors for groups, strategies and external records.
//!
//! Every invariant of the domain model maps onto exactly one variant of
//! `ValidationError`. Malformed external input (a record with the wrong number
//! of fields, a token that does not parse, a header that disagrees with the
//! record count) uses the same taxonomy, so callers see a uniform contract no
//! matter whether a value came from code or from a file.

use crate::index::GroupIndex;
use thiserror::Error;

/// The lowest admissible opinion value.
pub const MIN_OPINION: i32 = -100;

/// The highest admissible opinion value.
pub const MAX_OPINION: i32 = 100;

/// Which of the two opinions of a group violated its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpinionSlot {
    /// The first opinion (`opinion_a`).
    First,
    /// The second opinion (`opinion_b`).
    Second,
}

impl std::fmt::Display for OpinionSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpinionSlot::First => write!(f, "first"),
            OpinionSlot::Second => write!(f, "second"),
        }
    }
}

/// The error type for every invariant violation in the domain model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// An opinion lies outside `[MIN_OPINION, MAX_OPINION]`.
    #[error("the {slot} opinion must be between -100 and 100, got {value}")]
    OpinionOutOfRange { slot: OpinionSlot, value: i32 },

    /// A rigidity lies outside `[0, 1]` (or is NaN).
    #[error("the rigidity must be between 0 and 1, got {value}")]
    RigidityOutOfRange { value: f64 },

    /// A strategy does not have exactly one entry per group.
    #[error("the strategy has {found} entries but the network has {expected} groups")]
    StrategyLength { expected: usize, found: usize },

    /// A strategy moderates more agents than a group contains.
    #[error("strategy moderates {requested} agents in {group} which only has {size}")]
    OverModeration {
        group: GroupIndex,
        requested: u64,
        size: u64,
    },

    /// A strategy costs more effort than the network's budget allows.
    #[error("strategy needs effort {effort} but the budget is {budget}")]
    OverBudget { effort: u64, budget: u64 },

    /// An external record does not carry the expected number of fields.
    #[error("record {record} has {found} fields, expected {expected}")]
    FieldCount {
        record: usize,
        expected: usize,
        found: usize,
    },

    /// The number of group records disagrees with the declared group count.
    #[error("the header declares {declared} groups but {found} records were supplied")]
    GroupCount { declared: usize, found: usize },

    /// A token could not be parsed into the expected numeric type.
    #[error("could not parse token '{token}' as type {type_name}")]
    Parse {
        token: String,
        type_name: &'static str,
    },
}
