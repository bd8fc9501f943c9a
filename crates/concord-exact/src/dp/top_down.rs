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


//! Memoized recursive fill of the allocation table.
//!
//! Only the cells reachable from `(n, budget)` are computed; everything else
//! stays `UNKNOWN`. The recursion depth equals the number of groups.

use super::{Recurrence, table::AllocationTable};

/// Computes `(n, budget)` and every cell it depends on.
///
/// Returns the number of computed cells.
pub fn fill(table: &mut AllocationTable, recurrence: &Recurrence<'_>) -> u64 {
    let mut states = 0u64;
    let budget = table.budget();
    value(table, recurrence, recurrence.num_groups(), budget, &mut states);
    states
}

fn value(
    memo: &mut AllocationTable,
    recurrence: &Recurrence<'_>,
    i: usize,
    b: usize,
    states: &mut u64,
) -> i128 {
    if i == 0 {
        return 0;
    }
    if let Some(v) = memo.get(i, b) {
        return v;
    }

    let mut best: Option<(i128, u64)> = None;
    for (k, cost) in recurrence.ladder(i).affordable(b as u64) {
        let v = value(memo, recurrence, i - 1, b - cost as usize, states)
            .saturating_add(recurrence.remainder(i, k));
        if best.is_none_or(|(current, _)| v < current) {
            best = Some((v, k));
        }
    }

    let (v, k) = best.unwrap_or((0, 0));
    memo.set(i, b, v, k);
    *states += 1;
    v
}
