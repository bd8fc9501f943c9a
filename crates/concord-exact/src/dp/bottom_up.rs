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


//! Row-by-row fill of the allocation table.

use super::{Recurrence, table::AllocationTable};

/// Fills every cell of rows `1..=n` in increasing group and budget order.
///
/// Returns the number of computed cells.
pub fn fill(table: &mut AllocationTable, recurrence: &Recurrence<'_>) -> u64 {
    let budget = table.budget();
    let mut states = 0u64;

    for i in 1..=recurrence.num_groups() {
        let ladder = recurrence.ladder(i);
        for b in 0..=budget {
            let mut best: Option<(i128, u64)> = None;
            for (k, cost) in ladder.affordable(b as u64) {
                let value = table
                    .raw(i - 1, b - cost as usize)
                    .saturating_add(recurrence.remainder(i, k));
                if best.is_none_or(|(v, _)| value < v) {
                    best = Some((value, k));
                }
            }

            let (value, k) = best.unwrap_or((0, 0));
            table.set(i, b, value, k);
            states += 1;
        }
    }

    states
}
