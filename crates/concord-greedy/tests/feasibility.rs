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


//! Property-based guarantees shared by every heuristic.

use proptest::prelude::*;

use concord_exact::exhaustive::ExhaustiveSolver;
use concord_greedy::{
    bucketed::BucketedGreedySolver, heap::HeapGreedySolver,
    incremental::IncrementalGreedySolver, radix_greedy::RadixGreedySolver,
};
use concord_model::eval::{conflict, effort_of, is_feasible, remaining_conflict};
use concord_model::network::Network;
use concord_search::solver::ModerationSolver;

fn heuristics() -> Vec<Box<dyn ModerationSolver>> {
    vec![
        Box::new(HeapGreedySolver::new()),
        Box::new(RadixGreedySolver::new()),
        Box::new(BucketedGreedySolver::new()),
        Box::new(IncrementalGreedySolver::new()),
    ]
}

/// Strategy: any network with a budget anywhere up to twice its full moderation effort.
fn any_network() -> impl Strategy<Value = Network> {
    let rigidity = prop_oneof![Just(0.0), Just(0.000_000_5), 0.0..=1.0f64];
    let group = (0..40u64, -100..=100i32, -100..=100i32, rigidity);
    (prop::collection::vec(group, 0..8), 0.0..=2.0f64).prop_map(|(tuples, fraction)| {
        let unbudgeted = Network::from_tuples(tuples.clone(), 0).unwrap();
        let budget = (unbudgeted.max_effort() as f64 * fraction).floor() as u64;
        Network::from_tuples(tuples, budget).unwrap()
    })
}

/// Strategy: groups that all cost effort to moderate.
fn costly_network() -> impl Strategy<Value = Network> {
    let group = (1..6u64, -100..=0i32, 1..=100i32, 0.01..=1.0f64)
        .prop_map(|(n, a, delta, r)| (n, a, a + delta, r));
    prop::collection::vec(group, 1..5).prop_map(|tuples| Network::from_tuples(tuples, 0).unwrap())
}

proptest! {
    // 1. Heuristic strategies are valid and within budget
    #[test]
    fn heuristics_are_feasible(network in any_network()) {
        for mut solver in heuristics() {
            let strategy = solver.solve(&network);
            prop_assert!(
                is_feasible(&network, &strategy),
                "{} returned {} for budget {}", solver.name(), strategy, network.budget()
            );
        }
    }

    // 2. No budget, no moderation
    #[test]
    fn zero_budget_moderates_nobody(network in costly_network()) {
        let before = conflict(&network);
        let mut solvers = heuristics();
        solvers.push(Box::new(ExhaustiveSolver::new()));

        for mut solver in solvers {
            let strategy = solver.solve(&network);
            prop_assert_eq!(strategy.moderated_agents(), 0, "{}", solver.name());
            prop_assert_eq!(remaining_conflict(network.groups(), strategy.counts()), before);
        }
    }

    // 3. A sufficient budget short-circuits to full moderation
    #[test]
    fn full_budget_short_circuits(network in any_network()) {
        let rich = Network::new(network.groups().to_vec(), network.max_effort());
        for mut solver in heuristics() {
            let strategy = solver.solve(&rich);
            prop_assert_eq!(strategy.moderated_agents(), rich.population());
            prop_assert_eq!(effort_of(rich.groups(), strategy.counts()), rich.max_effort());
        }
    }
}
