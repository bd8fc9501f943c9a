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


//! Stable integer sorts producing index permutations.
//!
//! Both sorts return the positions of `keys` in descending key order and keep
//! equal keys in their original order, so ties fall back to network order.

const DIGIT_BITS: u32 = 8;
const BUCKETS: usize = 1 << DIGIT_BITS;
const MASK: u64 = (BUCKETS as u64) - 1;

/// Sorts by `u64` keys in descending order with an LSD radix sort on 8-bit digits.
///
/// Sorting the complements `!key` ascending is a descending sort on `key`
/// that stays stable.
pub fn argsort_descending(keys: &[u64]) -> Vec<usize> {
    let mut src: Vec<usize> = (0..keys.len()).collect();
    let mut dst = vec![0usize; keys.len()];

    for pass in 0..(u64::BITS / DIGIT_BITS) {
        let shift = pass * DIGIT_BITS;
        let digit = |i: usize| ((!keys[i] >> shift) & MASK) as usize;

        // Histogram
        let mut hist = [0usize; BUCKETS];
        for &i in src.iter() {
            hist[digit(i)] += 1;
        }

        // A pass where every key shares the digit is the identity.
        if hist.iter().any(|&h| h == keys.len()) {
            continue;
        }

        // Prefix sum
        let mut sum = 0usize;
        for h in hist.iter_mut() {
            let count = *h;
            *h = sum;
            sum += count;
        }

        // Scatter
        for &i in src.iter() {
            let bucket = digit(i);
            dst[hist[bucket]] = i;
            hist[bucket] += 1;
        }

        std::mem::swap(&mut src, &mut dst);
    }

    src
}

/// Sorts by small keys in `0..=max_key` in descending order with a counting sort.
pub fn counting_sort_descending(keys: &[u32], max_key: u32) -> Vec<usize> {
    let buckets = max_key as usize + 1;
    let mut hist = vec![0usize; buckets];
    for &k in keys {
        debug_assert!(k <= max_key);
        hist[k as usize] += 1;
    }

    // Start offsets, largest key first.
    let mut sum = 0usize;
    for h in hist.iter_mut().rev() {
        let count = *h;
        *h = sum;
        sum += count;
    }

    let mut out = vec![0usize; keys.len()];
    for (i, &k) in keys.iter().enumerate() {
        out[hist[k as usize]] = i;
        hist[k as usize] += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argsort_descending_is_stable() {
        let keys = [5, 300, 5, u64::MAX, 0, 300, 70_000];
        assert_eq!(argsort_descending(&keys), vec![3, 6, 1, 5, 0, 2, 4]);
    }

    #[test]
    fn test_argsort_descending_matches_std() {
        let keys: Vec<u64> = (0..500u64)
            .map(|i| i.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> (i % 61))
            .collect();
        let mut expected: Vec<usize> = (0..keys.len()).collect();
        expected.sort_by(|&a, &b| keys[b].cmp(&keys[a]));
        assert_eq!(argsort_descending(&keys), expected);
    }

    #[test]
    fn test_argsort_edge_cases() {
        assert!(argsort_descending(&[]).is_empty());
        assert_eq!(argsort_descending(&[7, 7, 7]), vec![0, 1, 2]);
    }

    #[test]
    fn test_counting_sort_descending() {
        let keys = [20, 200, 0, 20, 199];
        assert_eq!(counting_sort_descending(&keys, 200), vec![1, 4, 0, 3, 2]);
        assert!(counting_sort_descending(&[], 200).is_empty());
    }
}
