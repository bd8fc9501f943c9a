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


//! The immutable agent group.
//!
//! An `AgentGroup` is a homogeneous cluster of agents that share two
//! conflicting opinion positions and a rigidity (resistance to change).
//! The group is validated once at construction and never mutated afterwards;
//! moderation produces new groups through `AgentGroup::with_size`.
//!
//! All moderation pricing flows through [`AgentGroup::moderation_cost`], which
//! evaluates `ceil(discrepancy * rigidity * agents)` with a fixed evaluation
//! order. Exact solvers, heuristics and evaluation therefore agree on every
//! effort total, bit for bit.

use crate::error::{MAX_OPINION, MIN_OPINION, OpinionSlot, ValidationError};
use num_traits::ToPrimitive;
use std::str::FromStr;

/// The number of fields of an external group record: `size opinion_a opinion_b rigidity`.
pub const GROUP_RECORD_FIELDS: usize = 4;

/// A homogeneous cluster of agents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentGroup {
    size: u64,
    opinion_a: i32,
    opinion_b: i32,
    rigidity: f64,
}

impl AgentGroup {
    /// Creates a new validated `AgentGroup`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OpinionOutOfRange` if either opinion lies outside
    /// `[-100, 100]`, and `ValidationError::RigidityOutOfRange` if `rigidity` lies
    /// outside `[0, 1]` or is NaN.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use concord_model::group::AgentGroup;
    ///
    /// let group = AgentGroup::new(3, -100, 100, 0.8).unwrap();
    /// assert_eq!(group.discrepancy(), 200);
    /// assert!(AgentGroup::new(3, 101, 0, 0.5).is_err());
    /// ```
    pub fn new(
        size: u64,
        opinion_a: i32,
        opinion_b: i32,
        rigidity: f64,
    ) -> Result<Self, ValidationError> {
        if !(MIN_OPINION..=MAX_OPINION).contains(&opinion_a) {
            return Err(ValidationError::OpinionOutOfRange {
                slot: OpinionSlot::First,
                value: opinion_a,
            });
        }
        if !(MIN_OPINION..=MAX_OPINION).contains(&opinion_b) {
            return Err(ValidationError::OpinionOutOfRange {
                slot: OpinionSlot::Second,
                value: opinion_b,
            });
        }
        if !(0.0..=1.0).contains(&rigidity) {
            return Err(ValidationError::RigidityOutOfRange { value: rigidity });
        }

        Ok(Self {
            size,
            opinion_a,
            opinion_b,
            rigidity,
        })
    }

    /// Parses a group from an external record of exactly `GROUP_RECORD_FIELDS` tokens.
    ///
    /// `record` is the zero-based position of the record and is only used for
    /// error reporting.
    pub fn from_fields<S>(fields: &[S], record: usize) -> Result<Self, ValidationError>
    where
        S: AsRef<str>,
    {
        if fields.len() != GROUP_RECORD_FIELDS {
            return Err(ValidationError::FieldCount {
                record,
                expected: GROUP_RECORD_FIELDS,
                found: fields.len(),
            });
        }

        let size = parse_token::<u64>(fields[0].as_ref())?;
        let opinion_a = parse_token::<i32>(fields[1].as_ref())?;
        let opinion_b = parse_token::<i32>(fields[2].as_ref())?;
        let rigidity = parse_token::<f64>(fields[3].as_ref())?;

        Self::new(size, opinion_a, opinion_b, rigidity)
    }

    /// Returns a copy of this group with a different population.
    ///
    /// Opinions and rigidity were validated when `self` was built, so this
    /// cannot fail.
    #[inline]
    pub fn with_size(&self, size: u64) -> Self {
        Self { size, ..*self }
    }

    /// The number of agents in the group.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The first opinion of the group.
    #[inline]
    pub fn opinion_a(&self) -> i32 {
        self.opinion_a
    }

    /// The second opinion of the group.
    #[inline]
    pub fn opinion_b(&self) -> i32 {
        self.opinion_b
    }

    /// The resistance of the group to moderation.
    #[inline]
    pub fn rigidity(&self) -> f64 {
        self.rigidity
    }

    /// The absolute opinion difference `|opinion_a - opinion_b|`, in `[0, 200]`.
    #[inline]
    pub fn discrepancy(&self) -> u32 {
        self.opinion_a.abs_diff(self.opinion_b)
    }

    /// The squared opinion difference `(opinion_a - opinion_b)^2`, in `[0, 40_000]`.
    #[inline]
    pub fn squared_divergence(&self) -> u64 {
        let d = self.discrepancy() as u64;
        d * d
    }

    /// The conflict mass contributed by the whole group, `size * (a - b)^2`.
    ///
    /// Computed in `u128`, where it never overflows.
    #[inline]
    pub fn divergence_mass(&self) -> u128 {
        u128::from(self.size) * u128::from(self.squared_divergence())
    }

    /// The real-valued effort of moderating a single agent, `discrepancy * rigidity`.
    #[inline]
    pub fn cost_per_agent(&self) -> f64 {
        self.discrepancy() as f64 * self.rigidity
    }

    /// Returns `true` if moderating agents of this group costs no effort.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.cost_per_agent() == 0.0
    }

    /// The integer effort of moderating `agents` agents, `ceil(discrepancy * rigidity * agents)`.
    ///
    /// Moderating nobody costs nothing. Values beyond `u64::MAX` saturate.
    #[inline]
    pub fn moderation_cost(&self, agents: u64) -> u64 {
        if agents == 0 {
            return 0;
        }

        (self.cost_per_agent() * agents as f64)
            .ceil()
            .to_u64()
            .unwrap_or(u64::MAX)
    }

    /// The effort of moderating every agent in the group.
    #[inline]
    pub fn full_moderation_cost(&self) -> u64 {
        self.moderation_cost(self.size)
    }
}

impl std::fmt::Display for AgentGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AgentGroup(size: {}, opinions: ({}, {}), rigidity: {})",
            self.size, self.opinion_a, self.opinion_b, self.rigidity
        )
    }
}

fn parse_token<T>(token: &str) -> Result<T, ValidationError>
where
    T: FromStr,
{
    token.parse::<T>().map_err(|_| ValidationError::Parse {
        token: token.to_owned(),
        type_name: std::any::type_name::<T>(),
    })
}
