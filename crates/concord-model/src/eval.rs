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


//! Strategy evaluation.
//!
//! Pure functions that price a strategy (`effort`), measure the conflict of a
//! network (`internal_conflict`, `conflict`), apply a strategy
//! (`apply_strategy`), and combine the two for reporting (`evaluate`).
//!
//! The internal conflict of a network is the population-weighted mean of the
//! squared opinion divergence of its groups:
//!
//! ```raw
//! IC(N) = sum(n_i * (a_i - b_i)^2) / sum(n_i)        (0 if sum(n_i) = 0)
//! ```
//!
//! Besides the `f64` value, the ratio is available exactly as a [`Conflict`]
//! whose ordering is exact for every population the model accepts. Solvers use it so that
//! "equal conflict" means equal, not "equal after rounding".

use crate::{error::ValidationError, group::AgentGroup, network::Network, strategy::Strategy};
use std::cmp::Ordering;

/// The internal conflict of a network as an exact ratio `mass / population`.
///
/// Both terms are kept in `u128`: a single group contributes at most
/// `u64::MAX * 40_000` to the mass, so neither side truncates.
/// A ratio with zero population is the empty network and has value 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Conflict {
    mass: u128,
    population: u128,
}

impl Conflict {
    /// Creates a new conflict ratio.
    #[inline]
    pub const fn new(mass: u128, population: u128) -> Self {
        Self { mass, population }
    }

    /// The conflict of the empty population.
    pub const ZERO: Conflict = Conflict::new(0, 0);

    /// The numerator `sum(n_i * (a_i - b_i)^2)`.
    #[inline]
    pub fn mass(&self) -> u128 {
        self.mass
    }

    /// The denominator `sum(n_i)`.
    #[inline]
    pub fn population(&self) -> u128 {
        self.population
    }

    /// Returns `true` if the ratio is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mass == 0 || self.population == 0
    }

    /// The real value of the ratio; 0 for an empty population.
    #[inline]
    pub fn value(&self) -> f64 {
        if self.population == 0 {
            return 0.0;
        }
        let whole = self.mass / self.population;
        let rest = self.mass % self.population;
        whole as f64 + rest as f64 / self.population as f64
    }

    #[inline]
    fn normalized(&self) -> (u128, u128) {
        if self.population == 0 {
            (0, 1)
        } else {
            (self.mass, self.population)
        }
    }
}

/// Compares `a / b` with `c / d` for positive `b` and `d` without multiplying.
///
/// Walks the continued-fraction expansions of both ratios in lockstep: equal
/// integer parts reduce the comparison to the reciprocals of the remainders,
/// which reverses its direction.
fn compare_ratios(mut a: u128, mut b: u128, mut c: u128, mut d: u128) -> Ordering {
    loop {
        let (q1, r1) = (a / b, a % b);
        let (q2, r2) = (c / d, c % d);
        if q1 != q2 {
            return q1.cmp(&q2);
        }
        match (r1 == 0, r2 == 0) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        // r1 / b vs r2 / d  <=>  d / r2 vs b / r1
        (a, b, c, d) = (d, r2, b, r1);
    }
}

impl PartialEq for Conflict {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Conflict {}

impl PartialOrd for Conflict {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Conflict {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = self.normalized();
        let (c, d) = other.normalized();
        compare_ratios(a, b, c, d)
    }
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// The reported metrics of a strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// The integer effort of the strategy.
    pub effort: u64,
    /// The internal conflict of the moderated network.
    pub conflict: f64,
    /// The same conflict as an exact ratio.
    pub ratio: Conflict,
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "effort: {}, conflict: {}", self.effort, self.conflict)
    }
}

/// Checks that `strategy` has one entry per group and never exceeds a group's population.
pub fn validate_strategy(network: &Network, strategy: &Strategy) -> Result<(), ValidationError> {
    check_length(network, strategy)?;

    for ((index, group), &requested) in network.iter_indexed().zip(strategy.counts()) {
        if requested > group.size() {
            return Err(ValidationError::OverModeration {
                group: index,
                requested,
                size: group.size(),
            });
        }
    }

    Ok(())
}

/// The effort of `strategy`: `sum over e_i > 0 of ceil(|a_i - b_i| * r_i * e_i)`.
///
/// # Errors
///
/// Fails with `ValidationError::StrategyLength` if the strategy does not have one
/// entry per group.
pub fn effort(network: &Network, strategy: &Strategy) -> Result<u64, ValidationError> {
    check_length(network, strategy)?;
    Ok(effort_of(network.groups(), strategy.counts()))
}

/// The effort of moderating `counts[i]` agents of `groups[i]`.
///
/// Index-aligned without a length check; used by solver inner loops on
/// vectors they built themselves. Sums saturate.
#[inline]
pub fn effort_of(groups: &[AgentGroup], counts: &[u64]) -> u64 {
    groups
        .iter()
        .zip(counts)
        .fold(0u64, |acc, (g, &k)| acc.saturating_add(g.moderation_cost(k)))
}

/// The effort of moderating every agent of every group.
pub fn max_effort(network: &Network) -> u64 {
    network
        .groups()
        .iter()
        .fold(0u64, |acc, g| acc.saturating_add(g.full_moderation_cost()))
}

/// The internal conflict of `network`; 0 when the population is empty.
#[inline]
pub fn internal_conflict(network: &Network) -> f64 {
    conflict(network).value()
}

/// The internal conflict of `network` as an exact ratio.
pub fn conflict(network: &Network) -> Conflict {
    let (mass, population) = network
        .groups()
        .iter()
        .fold((0u128, 0u128), |(m, p), g| {
            (m.saturating_add(g.divergence_mass()), p.saturating_add(u128::from(g.size())))
        });
    Conflict::new(mass, population)
}

/// The conflict left after moderating `counts[i]` agents of `groups[i]`.
///
/// Equal to `conflict(apply_strategy(network, strategy))` for a valid strategy,
/// without building the intermediate network. Index-aligned without checks;
/// counts above a group's size saturate to an empty group.
pub fn remaining_conflict(groups: &[AgentGroup], counts: &[u64]) -> Conflict {
    let (mass, population) =
        groups
            .iter()
            .zip(counts)
            .fold((0u128, 0u128), |(m, p), (g, &k)| {
                let left = u128::from(g.size().saturating_sub(k));
                (
                    m.saturating_add(left * u128::from(g.squared_divergence())),
                    p.saturating_add(left),
                )
            });
    Conflict::new(mass, population)
}

/// Applies `strategy` and returns the moderated network.
///
/// Every group is retained, including groups reduced to size 0, so the group
/// count and strategy indexing never change. The new budget is the old budget
/// minus the strategy's effort, floored at 0.
///
/// # Errors
///
/// Fails with `ValidationError::StrategyLength` on a length mismatch, and with
/// `ValidationError::OverModeration` if any `e_i > size_i`. Over-moderation is
/// never clamped.
pub fn apply_strategy(network: &Network, strategy: &Strategy) -> Result<Network, ValidationError> {
    validate_strategy(network, strategy)?;

    let spent = effort_of(network.groups(), strategy.counts());
    let groups = network
        .groups()
        .iter()
        .zip(strategy.counts())
        .map(|(g, &k)| g.with_size(g.size() - k))
        .collect();

    Ok(Network::new(groups, network.budget().saturating_sub(spent)))
}

/// Checks that `strategy` is valid for `network` and fits into its budget,
/// returning the effort it spends.
///
/// # Errors
///
/// Any error of [`validate_strategy`], or `ValidationError::OverBudget` if the
/// effort exceeds the budget.
pub fn validate_feasible(network: &Network, strategy: &Strategy) -> Result<u64, ValidationError> {
    validate_strategy(network, strategy)?;
    let effort = effort_of(network.groups(), strategy.counts());
    if effort > network.budget() {
        return Err(ValidationError::OverBudget {
            effort,
            budget: network.budget(),
        });
    }
    Ok(effort)
}

/// Returns `true` if `strategy` is valid for `network` and fits into its budget.
#[inline]
pub fn is_feasible(network: &Network, strategy: &Strategy) -> bool {
    validate_feasible(network, strategy).is_ok()
}

/// Computes the reported `(effort, conflict)` pair of `strategy`.
///
/// # Errors
///
/// Fails exactly when [`apply_strategy`] fails.
///
/// # Examples
///
/// ```rust
/// use concord_model::{eval::evaluate, network::Network, strategy::Strategy};
///
/// let network = Network::from_tuples(
///     [(3, -100, 100, 0.8), (2, 100, 80, 0.5), (4, -10, 10, 0.5)],
///     540,
/// )
/// .unwrap();
/// let evaluation = evaluate(&network, &Strategy::new(vec![3, 2, 4])).unwrap();
/// assert_eq!(evaluation.effort, 540);
/// assert_eq!(evaluation.conflict, 0.0);
/// ```
pub fn evaluate(network: &Network, strategy: &Strategy) -> Result<Evaluation, ValidationError> {
    validate_strategy(network, strategy)?;

    let ratio = remaining_conflict(network.groups(), strategy.counts());
    Ok(Evaluation {
        effort: effort_of(network.groups(), strategy.counts()),
        conflict: ratio.value(),
        ratio,
    })
}

#[inline]
fn check_length(network: &Network, strategy: &Strategy) -> Result<(), ValidationError> {
    if strategy.len() != network.num_groups() {
        return Err(ValidationError::StrategyLength {
            expected: network.num_groups(),
            found: strategy.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::GroupIndex;

    fn sample(budget: u64) -> Network {
        Network::from_tuples(
            [(3, -100, 100, 0.8), (2, 100, 80, 0.5), (4, -10, 10, 0.5)],
            budget,
        )
        .unwrap()
    }

    #[test]
    fn test_internal_conflict_is_population_weighted() {
        let n = sample(0);
        // (3 * 40000 + 2 * 400 + 4 * 400) / 9
        let expected = (120_000.0 + 800.0 + 1_600.0) / 9.0;
        assert!((internal_conflict(&n) - expected).abs() < 1e-9);
        assert_eq!(conflict(&n), Conflict::new(122_400, 9));
    }

    #[test]
    fn test_internal_conflict_of_empty_population_is_zero() {
        assert_eq!(internal_conflict(&Network::default()), 0.0);

        let n = Network::from_tuples([(0, -100, 100, 0.5), (0, 3, 4, 0.5)], 10).unwrap();
        assert_eq!(internal_conflict(&n), 0.0);
        assert!(conflict(&n).is_zero());
    }

    #[test]
    fn test_effort_and_length_mismatch() {
        let n = sample(0);
        assert_eq!(effort(&n, &Strategy::new(vec![1, 0, 0])), Ok(160));
        assert_eq!(effort(&n, &Strategy::new(vec![3, 2, 4])), Ok(540));
        assert_eq!(effort(&n, &Strategy::zero(3)), Ok(0));
        assert_eq!(
            effort(&n, &Strategy::zero(2)),
            Err(ValidationError::StrategyLength {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_max_effort() {
        assert_eq!(max_effort(&sample(0)), 540);
        assert_eq!(max_effort(&Network::default()), 0);
    }

    #[test]
    fn test_apply_strategy_retains_groups_and_reduces_budget() {
        let n = sample(600);
        let moderated = apply_strategy(&n, &Strategy::new(vec![3, 1, 0])).unwrap();

        assert_eq!(moderated.num_groups(), 3);
        let sizes: Vec<u64> = moderated.groups().iter().map(|g| g.size()).collect();
        assert_eq!(sizes, vec![0, 1, 4]);
        assert_eq!(moderated.budget(), 600 - 480 - 10);

        // (1 * 400 + 4 * 400) / 5
        assert!((moderated.internal_conflict() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_strategy_rejects_over_moderation() {
        let n = sample(600);
        assert_eq!(
            apply_strategy(&n, &Strategy::new(vec![4, 0, 0])),
            Err(ValidationError::OverModeration {
                group: GroupIndex::new(0),
                requested: 4,
                size: 3
            })
        );
        assert!(matches!(
            apply_strategy(&n, &Strategy::new(vec![0, 0])),
            Err(ValidationError::StrategyLength { .. })
        ));
    }

    #[test]
    fn test_apply_strategy_budget_floors_at_zero() {
        let n = sample(10);
        let moderated = apply_strategy(&n, &Strategy::new(vec![1, 0, 0])).unwrap();
        assert_eq!(moderated.budget(), 0);
    }

    #[test]
    fn test_remaining_conflict_matches_apply() {
        let n = sample(0);
        for counts in [vec![0, 0, 0], vec![1, 2, 3], vec![3, 0, 1], vec![3, 2, 4]] {
            let s = Strategy::new(counts);
            let applied = conflict(&apply_strategy(&n, &s).unwrap());
            assert_eq!(remaining_conflict(n.groups(), s.counts()), applied);
        }
    }

    #[test]
    fn test_conflict_ordering_is_exact() {
        assert_eq!(Conflict::new(10, 4), Conflict::new(5, 2));
        assert!(Conflict::new(1, 3) < Conflict::new(1, 2));
        assert_eq!(Conflict::new(0, 7), Conflict::ZERO);
        assert_eq!(Conflict::new(9, 0), Conflict::ZERO);
        assert!(Conflict::ZERO < Conflict::new(1, 1_000_000));

        // Cross products of these would overflow u128.
        let big = u128::MAX / 3;
        assert!(Conflict::new(big, big - 1) < Conflict::new(big - 1, big - 2));
        assert_eq!(Conflict::new(big - 1, big - 1), Conflict::new(1, 1));
        assert!(Conflict::new(u128::MAX, 2) > Conflict::new(u128::MAX - 1, 2));
    }

    #[test]
    fn test_conflict_of_huge_group_is_exact() {
        let n = Network::from_tuples([(1_000_000_000_000_000, -100, 100, 0.5)], 0).unwrap();
        assert_eq!(internal_conflict(&n), 40_000.0);
        assert_eq!(conflict(&n), Conflict::new(40_000, 1));

        let mixed = Network::from_tuples(
            [(u64::MAX, -100, 100, 0.5), (u64::MAX, 0, 0, 0.5)],
            0,
        )
        .unwrap();
        assert_eq!(internal_conflict(&mixed), 20_000.0);
        let halved = remaining_conflict(mixed.groups(), &[u64::MAX / 2 + 1, 0]);
        assert!(halved < conflict(&mixed));
    }

    #[test]
    fn test_validate_feasible() {
        let n = sample(200);
        assert_eq!(validate_feasible(&n, &Strategy::new(vec![1, 0, 0])), Ok(160));
        assert_eq!(
            validate_feasible(&n, &Strategy::new(vec![3, 2, 4])),
            Err(ValidationError::OverBudget {
                effort: 540,
                budget: 200
            })
        );
        assert!(matches!(
            validate_feasible(&n, &Strategy::new(vec![4, 0, 0])),
            Err(ValidationError::OverModeration { .. })
        ));
        assert!(is_feasible(&n, &Strategy::new(vec![1, 0, 0])));
        assert!(!is_feasible(&n, &Strategy::new(vec![3, 2, 4])));
    }

    #[test]
    fn test_evaluate_worked_example() {
        let n = sample(540);
        let e = evaluate(&n, &Strategy::new(vec![3, 2, 4])).unwrap();
        assert_eq!(e.effort, 540);
        assert_eq!(e.conflict, 0.0);
        assert!(e.ratio.is_zero());
    }

    #[test]
    fn test_is_feasible() {
        let n = sample(170);
        assert!(is_feasible(&n, &Strategy::new(vec![1, 1, 0])));
        assert!(!is_feasible(&n, &Strategy::new(vec![1, 1, 1])));
        assert!(!is_feasible(&n, &Strategy::new(vec![0, 3, 0])));
        assert!(!is_feasible(&n, &Strategy::zero(1)));
    }
}
