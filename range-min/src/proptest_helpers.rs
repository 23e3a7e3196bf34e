// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::term::{Domain, Term};
use proptest::prelude::*;
use std::ops::RangeInclusive;

impl Arbitrary for Domain {
    /// The number of variables, and the domain size of each one.
    type Parameters = Option<(RangeInclusive<usize>, RangeInclusive<u32>)>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        // Small by default: Petrick's method is exponential in the worst case.
        let (variable_count, size) = params.unwrap_or((1..=3, 0..=2));
        prop::collection::vec(size, variable_count)
            .prop_map(Domain::new)
            .boxed()
    }
}

/// Generates a set of distinct minterms of `domain`, in random order.
pub fn minterm_set(domain: &Domain) -> BoxedStrategy<Vec<Term>> {
    let all: Vec<Term> = domain.minterms().collect();
    let len = all.len();
    prop::sample::subsequence(all, 0..=len)
        .prop_shuffle()
        .boxed()
}

/// Generates a domain together with a set of its minterms.
pub fn domain_with_minterms() -> BoxedStrategy<(Domain, Vec<Term>)> {
    any::<Domain>()
        .prop_flat_map(|domain| {
            let minterms = minterm_set(&domain);
            (Just(domain), minterms)
        })
        .boxed()
}
