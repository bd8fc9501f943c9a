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


//! # Concord Model
//!
//! **The Core Domain Model for the Concord Moderation Solvers.**
//!
//! This crate defines the value types that describe a segmented population
//! (a "social network" of agent groups) together with the pure functions that
//! price and evaluate a moderation strategy. It is the data interchange layer
//! between problem input (loaders, callers) and the solving engines
//! (`concord_exact`, `concord_greedy`).
//!
//! ## Architecture
//!
//! * **`index`**: A strongly-typed `GroupIndex` so strategy positions cannot be confused with raw counts.
//! * **`group`**: The immutable `AgentGroup` with validated opinions and rigidity.
//! * **`network`**: The immutable `Network` (ordered groups plus an effort budget).
//! * **`strategy`**: The `Strategy` vector of per-group moderation counts.
//! * **`eval`**: Effort, internal conflict, maximum effort, strategy application and the exact `Conflict` ratio.
//! * **`error`**: The `ValidationError` taxonomy shared by construction, evaluation and loading.
//! * **`loading`** / **`writing`**: Whitespace-delimited text formats for networks and strategy results.
//!
//! ## Design Philosophy
//!
//! 1.  **Immutability**: Groups and networks never change after construction. Applying a strategy yields a new `Network`.
//! 2.  **Single Cost Function**: Every solver prices moderation through `AgentGroup::moderation_cost`, so totals always agree.
//! 3.  **Fail-Fast**: Constructors and evaluation validate eagerly; division by zero is a guarded branch, never an error.

pub mod error;
pub mod eval;
pub mod group;
pub mod index;
pub mod loading;
pub mod network;
pub mod strategy;
pub mod writing;
