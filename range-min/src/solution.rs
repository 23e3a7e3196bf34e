// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{petrick::Product, term::Term};
use log::debug;
use std::collections::BTreeSet;

/// A set of prime implicants covering every minterm, as sorted row indexes into the prime
/// implicant list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverSolution {
    rows: Vec<usize>,
}

impl CoverSolution {
    pub fn from_rows(rows: impl IntoIterator<Item = usize>) -> Self {
        let rows: BTreeSet<_> = rows.into_iter().collect();
        Self {
            rows: rows.into_iter().collect(),
        }
    }

    /// Picks the cheapest of `candidates` and adds the essential rows to it.
    ///
    /// Ties go to the candidate that comes first. With no candidates, the solution is made of the
    /// essential rows alone.
    pub fn select(implicants: &[Term], essential: &[usize], candidates: &[Product]) -> Self {
        let chosen = candidates
            .iter()
            .min_by_key(|product| cost(implicants, product));
        if let Some(chosen) = chosen {
            debug!(
                "selected {:?} (cost {}) out of {} candidates",
                chosen,
                cost(implicants, chosen),
                candidates.len()
            );
        }
        Self::from_rows(
            chosen
                .into_iter()
                .flatten()
                .chain(essential)
                .copied(),
        )
    }

    #[inline]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the chosen implicants, in prime implicant order.
    pub fn implicants<'a>(&'a self, implicants: &'a [Term]) -> impl Iterator<Item = &'a Term> + 'a {
        self.rows.iter().map(move |&row| &implicants[row])
    }
}

/// The approximate cost of a product: the number of single-valued positions over all its
/// implicants.
///
/// This is not an exact literal count.
pub fn cost(implicants: &[Term], product: &Product) -> usize {
    product
        .iter()
        .map(|&row| implicants[row].literal_count())
        .sum()
}
