// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod all;
mod details;
mod value_generator;

pub use all::*;
pub use details::*;
pub use value_generator::*;
