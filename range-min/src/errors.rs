// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for range-min.

use crate::term::Term;
use std::io;
use thiserror::Error;

/// A term or value could not be parsed from text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid term `{input}`: {reason}")]
pub struct InvalidTerm {
    pub input: String,
    pub reason: String,
}

impl InvalidTerm {
    pub(crate) fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// An error that aborts the minimization of one mode.
///
/// Input validation errors are reported before any merging happens.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MinimizeError {
    /// A minterm has a different number of values than the domain has variables.
    #[error("minterm {index} has {found} values, expected {expected}")]
    ValueCountMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// A minterm has a value beyond the domain of its variable.
    #[error("minterm {index} has value {value} at position {position}, beyond the domain bound {max}")]
    ValueOutOfDomain {
        index: usize,
        position: usize,
        value: u32,
        max: u32,
    },

    /// An input term holds a range rather than single values.
    #[error("input term {index} ({term}) is not a minterm")]
    NotAMinterm { index: usize, term: Term },

    /// No prime implicant covers this minterm.
    #[error("minterm {minterm} is not covered by any prime implicant")]
    EmptyCoverSolution { minterm: Term },
}

/// An error reading or minimizing a mode table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("line {line}: malformed header: {message}")]
    MalformedHeader { line: usize, message: String },

    /// The input ended before the header was complete.
    #[error("input ends before the {what}")]
    MissingHeader { what: String },

    #[error("line {line}: malformed rule: {message}")]
    MalformedRule { line: usize, message: String },

    #[error("line {line}: mode {mode} is out of range for a table with {mode_count} modes")]
    UnknownMode {
        line: usize,
        mode: usize,
        mode_count: usize,
    },

    #[error("failed to minimize mode {mode}")]
    Minimize {
        mode: usize,
        #[source]
        source: MinimizeError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
