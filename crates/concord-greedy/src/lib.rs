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


//! # Concord Greedy
//!
//! Approximate moderation solvers. Every heuristic ranks groups by the
//! conflict removed per unit of effort, the ratio `discrepancy / rigidity`,
//! and spends the budget on the best-ranked groups first. They differ in how
//! the ranking is produced and how much of a group is taken per step.
//!
//! ## Modules
//!
//! - `priority`: The `Priority` of a group, with rigidity-0 groups ranked above every ratio.
//! - `allocator`: The index-addressed work state shared by all heuristics.
//! - `radix`: Stable integer sorts (LSD radix and counting sort) used for ordering.
//! - `config`: `GreedyConfig` for the sort-based variants.
//! - `heap`: `HeapGreedySolver`, a max-priority queue consuming whole groups.
//! - `radix_greedy`: `RadixGreedySolver`, ordering by a scaled integer key.
//! - `bucketed`: `BucketedGreedySolver`, near-zero rigidity groups first, by discrepancy.
//! - `incremental`: `IncrementalGreedySolver`, one agent per round.
//!
//! None of the heuristics is optimal, but all of them return strategies whose
//! effort never exceeds the budget.

pub mod allocator;
pub mod bucketed;
pub mod config;
pub mod heap;
pub mod incremental;
pub mod priority;
pub mod radix;
pub mod radix_greedy;
