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


//! Strategy result files.
//!
//! A result file records the outcome of a solve:
//!
//! ```raw
//! <internal conflict after moderation>
//! <effort>
//! <e_0>
//! <e_1>
//! ...
//! ```
//!
//! `StrategyWriter` renders a [`StrategyReport`] in this format; `str::parse`
//! and `StrategyReport::from_bufread` read it back.
//! Comments and blank lines are tolerated on the way in, the same as the
//! network loader.

use crate::{
    error::ValidationError,
    eval::{self, Evaluation},
    loading::LoadError,
    network::Network,
    strategy::Strategy,
};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Read, Write},
    path::Path,
};

/// A strategy together with the metrics it achieved.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyReport {
    /// The internal conflict of the moderated network.
    pub conflict: f64,
    /// The effort spent by the strategy.
    pub effort: u64,
    /// The per-group moderation counts.
    pub strategy: Strategy,
}

impl StrategyReport {
    /// Evaluates `strategy` against `network` and bundles the result.
    pub fn evaluate(network: &Network, strategy: Strategy) -> Result<Self, ValidationError> {
        let Evaluation {
            effort, conflict, ..
        } = eval::evaluate(network, &strategy)?;

        Ok(Self {
            conflict,
            effort,
            strategy,
        })
    }

    /// Reads a report from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(rdr: R) -> Result<Self, LoadError> {
        let mut values = Vec::new();
        for line in rdr.lines() {
            let line = line?;
            let content = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line.as_str(),
            };
            let content = content.trim();
            if !content.is_empty() {
                values.push(content.to_owned());
            }
        }

        let mut values = values.into_iter();
        let conflict = parse_value::<f64>(values.next().as_deref())?;
        let effort = parse_value::<u64>(values.next().as_deref())?;
        let strategy = values
            .map(|v| parse_value::<u64>(Some(&v)))
            .collect::<Result<Strategy, _>>()?;

        Ok(Self {
            conflict,
            effort,
            strategy,
        })
    }

    /// Reads a report from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(r: R) -> Result<Self, LoadError> {
        Self::from_bufread(BufReader::new(r))
    }
}

impl std::str::FromStr for StrategyReport {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bufread(BufReader::new(s.as_bytes()))
    }
}

impl std::fmt::Display for StrategyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.conflict)?;
        writeln!(f, "{}", self.effort)?;
        for count in self.strategy.counts() {
            writeln!(f, "{}", count)?;
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(value: Option<&str>) -> Result<T, LoadError> {
    let value = value.ok_or(LoadError::UnexpectedEof)?;
    value.parse::<T>().map_err(|_| {
        LoadError::Validation(ValidationError::Parse {
            token: value.to_owned(),
            type_name: std::any::type_name::<T>(),
        })
    })
}

/// Writes strategy reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyWriter;

impl StrategyWriter {
    /// Creates a new writer.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Writes `report` to `w`.
    pub fn to_writer<W: Write>(&self, report: &StrategyReport, mut w: W) -> std::io::Result<()> {
        write!(w, "{}", report)?;
        w.flush()
    }

    /// Writes `report` to the file at `path`, creating or truncating it.
    pub fn to_path<P: AsRef<Path>>(&self, report: &StrategyReport, path: P) -> std::io::Result<()> {
        let file = File::create(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), effort = report.effort, "writing strategy report");
        self.to_writer(report, BufWriter::new(file))
    }
}
