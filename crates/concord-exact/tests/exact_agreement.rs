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


//! Property-based agreement between the exact solvers.

use proptest::prelude::*;

use concord_exact::dp::{DpFill, DynamicProgrammingSolver};
use concord_exact::exhaustive::ExhaustiveSolver;
use concord_model::eval::{effort_of, remaining_conflict};
use concord_model::network::Network;
use concord_search::solver::ModerationSolver;

/// Strategy: up to four groups of at most six agents and a budget below full moderation.
fn small_network() -> impl Strategy<Value = Network> {
    let group = (0..=6u64, -100..=100i32, -100..=100i32, 0.0..=1.0f64);
    (prop::collection::vec(group, 0..=4), 0.0..=1.0f64).prop_map(|(tuples, fraction)| {
        let unbudgeted = Network::from_tuples(tuples.clone(), 0).unwrap();
        let budget = (unbudgeted.max_effort() as f64 * fraction).floor() as u64;
        Network::from_tuples(tuples, budget).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // 1. Both fills reach the exhaustive optimum
    #[test]
    fn dp_matches_exhaustive(network in small_network()) {
        let exhaustive = ExhaustiveSolver::new().solve(&network);
        let expected = remaining_conflict(network.groups(), exhaustive.counts());

        for fill in [DpFill::BottomUp, DpFill::TopDown] {
            let strategy = DynamicProgrammingSolver::new().with_fill(fill).solve(&network);
            prop_assert!(effort_of(network.groups(), strategy.counts()) <= network.budget());
            prop_assert_eq!(
                remaining_conflict(network.groups(), strategy.counts()),
                expected,
                "fill={} dp={} exhaustive={}", fill, strategy, exhaustive
            );
        }
    }

    // 2. Bottom-up and top-down return the same strategy
    #[test]
    fn fills_agree(network in small_network()) {
        let bottom_up = DynamicProgrammingSolver::new().solve(&network);
        let top_down = DynamicProgrammingSolver::new().with_fill(DpFill::TopDown).solve(&network);
        prop_assert_eq!(bottom_up, top_down);
    }

    // 3. A budget covering full moderation short-circuits every exact solver
    #[test]
    fn full_budget_short_circuits(network in small_network()) {
        let rich = Network::new(network.groups().to_vec(), network.max_effort());
        let dp = DynamicProgrammingSolver::new().solve(&rich);
        let exhaustive = ExhaustiveSolver::new().solve(&rich);
        let sizes: Vec<u64> = rich.groups().iter().map(|g| g.size()).collect();

        prop_assert_eq!(dp.counts(), sizes.as_slice());
        prop_assert_eq!(exhaustive.counts(), sizes.as_slice());
        prop_assert!(remaining_conflict(rich.groups(), dp.counts()).is_zero());
    }
}
