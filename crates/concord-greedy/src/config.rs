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


//! Configuration of the sort-based heuristics.

/// Scale applied to ratios before they are rounded to integer sort keys.
pub const DEFAULT_SCALE: f64 = 1e6;

/// Rigidity below which the bucketed heuristic treats a group as free.
pub const DEFAULT_FREE_THRESHOLD: f64 = 1e-6;

/// Tuning for `RadixGreedySolver` and `BucketedGreedySolver`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreedyConfig {
    scale: f64,
    free_threshold: f64,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            free_threshold: DEFAULT_FREE_THRESHOLD,
        }
    }
}

impl GreedyConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ratio scale. Larger scales separate closer ratios.
    #[inline]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the rigidity below which groups are handled as near-free.
    #[inline]
    pub fn with_free_threshold(mut self, free_threshold: f64) -> Self {
        self.free_threshold = free_threshold;
        self
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn free_threshold(&self) -> f64 {
        self.free_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_builder() {
        let config = GreedyConfig::new();
        assert_eq!(config.scale(), 1e6);
        assert_eq!(config.free_threshold(), 1e-6);

        let config = config.with_scale(10.0).with_free_threshold(0.01);
        assert_eq!(config.scale(), 10.0);
        assert_eq!(config.free_threshold(), 0.01);
    }
}
