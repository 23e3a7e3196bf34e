// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimization of mode tables with a multi-valued Quine-McCluskey method.
//!
//! Rules in a mode table map tuples of discretized variable values to a mode. For each mode,
//! [`minimize`] merges adjacent and overlapping values into ranges, producing a smaller set of
//! rules that selects the mode for exactly the same tuples. Prime implicants are found through
//! repeated merge rounds; the cover is then chosen with essential implicants and Petrick's method.
//!
//! ```
//! use range_min::table::ModeTable;
//!
//! let table = ModeTable::parse("1\n1\n0 4 1\n0:0\n1:0\n2:0\n").unwrap();
//! let minimized = table.minimize().unwrap();
//! assert_eq!(minimized.display().to_string(), "0-2:0\n");
//! ```

pub mod chart;
pub mod display;
mod engine;
pub mod errors;
pub mod implicants;
pub mod petrick;
#[cfg(any(test, feature = "proptest1"))]
pub mod proptest_helpers;
pub mod solution;
pub mod table;
pub mod term;

pub use engine::*;
