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


//! # Concord Solver
//!
//! High-level orchestration over a portfolio of moderation solvers. Each
//! solver runs on the same network, every returned strategy is evaluated, and
//! the strategy with the smallest internal conflict wins.
//!
//! ## Modules
//!
//! - `solver`: The `Solver` orchestrator and its `SolverBuilder`, with
//!   optional fan-out over scoped threads and per-solver reports.
//!
//! ## Motivation
//!
//! The exact solvers are optimal but pseudo-polynomial or exponential; the
//! heuristics are fast but approximate. Running both and keeping the best
//! evaluated strategy gives a single entry point that is never worse than
//! any of its members.

pub mod solver;
