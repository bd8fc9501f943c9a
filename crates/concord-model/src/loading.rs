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


//! Network instance loader.
//!
//! This module turns line-oriented text into a validated `Network`. The
//! format is a header line followed by one record per agent group:
//!
//! ```raw
//! <number of groups> <budget>
//! <size> <opinion_a> <opinion_b> <rigidity>
//! ...
//! ```
//!
//! Blank lines are skipped and everything after a `#` is a comment. Records
//! must carry exactly four fields; a malformed record or a header that
//! disagrees with the number of records is reported through the same
//! `ValidationError` taxonomy used by the domain model, wrapped in
//! `LoadError::Validation`.
//!
//! The loader accepts any `BufRead`, file path, raw reader, or string slice.

use crate::{error::ValidationError, group::AgentGroup, network::Network};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};
use thiserror::Error;

/// The error type for the loading process.
#[derive(Debug, Error)]
pub enum LoadError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input contained no header line.
    #[error("unexpected end of input: missing header line")]
    UnexpectedEof,
    /// The header did not consist of exactly two fields.
    #[error("the header must contain the group count and the budget, found {found} fields")]
    InvalidHeader { found: usize },
    /// A record or the header violated a domain invariant.
    #[error("invalid network: {0}")]
    Validation(#[from] ValidationError),
}

/// A configurable loader for network instances.
///
/// # Configuration
/// * `strict_group_count`: If true (the default), the number of records must
///   equal the group count declared in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkLoader {
    strict_group_count: bool,
}

impl Default for NetworkLoader {
    fn default() -> Self {
        Self {
            strict_group_count: true,
        }
    }
}

impl NetworkLoader {
    /// Creates a new `NetworkLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether the declared group count must match the records.
    #[inline]
    pub fn strict_group_count(mut self, yes: bool) -> Self {
        self.strict_group_count = yes;
        self
    }

    /// Loads a network from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Network, LoadError> {
        let mut lines = Vec::new();
        for line in rdr.lines() {
            let line = line?;
            let content = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line.as_str(),
            };
            let fields: Vec<String> = content.split_whitespace().map(str::to_owned).collect();
            if !fields.is_empty() {
                lines.push(fields);
            }
        }

        let mut records = lines.into_iter();
        let header = records.next().ok_or(LoadError::UnexpectedEof)?;
        if header.len() != 2 {
            return Err(LoadError::InvalidHeader {
                found: header.len(),
            });
        }

        let declared = parse_header_field::<usize>(&header[0])?;
        let budget = parse_header_field::<u64>(&header[1])?;

        let groups = records
            .enumerate()
            .map(|(i, fields)| AgentGroup::from_fields(&fields, i))
            .collect::<Result<Vec<_>, _>>()?;

        if self.strict_group_count && groups.len() != declared {
            return Err(ValidationError::GroupCount {
                declared,
                found: groups.len(),
            }
            .into());
        }

        tracing::debug!(
            groups = groups.len(),
            budget,
            "loaded network instance"
        );

        Ok(Network::new(groups, budget))
    }

    /// Loads a network from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Network, LoadError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a network from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Network, LoadError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a network from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Network, LoadError> {
        self.from_reader(s.as_bytes())
    }
}

fn parse_header_field<T: std::str::FromStr>(token: &str) -> Result<T, ValidationError> {
    token.parse::<T>().map_err(|_| ValidationError::Parse {
        token: token.to_owned(),
        type_name: std::any::type_name::<T>(),
    })
}
