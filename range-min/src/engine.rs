// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    chart::{CoverageChart, Essentials},
    errors::MinimizeError,
    implicants::prime_implicants,
    petrick,
    solution::CoverSolution,
    term::{Domain, Term},
};
use log::debug;

/// The outcome of minimizing one mode's minterms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Minimization {
    prime_implicants: Vec<Term>,
    essential: Vec<usize>,
    solution: CoverSolution,
}

impl Minimization {
    /// All prime implicants, in the order the merge rounds produced them.
    #[inline]
    pub fn prime_implicants(&self) -> &[Term] {
        &self.prime_implicants
    }

    /// Indexes of the essential prime implicants.
    #[inline]
    pub fn essential_rows(&self) -> &[usize] {
        &self.essential
    }

    #[inline]
    pub fn solution(&self) -> &CoverSolution {
        &self.solution
    }

    /// The chosen implicants.
    pub fn implicants(&self) -> impl Iterator<Item = &Term> + '_ {
        self.solution.implicants(&self.prime_implicants)
    }

    pub fn into_implicants(self) -> impl Iterator<Item = Term> {
        let Self {
            prime_implicants,
            solution,
            ..
        } = self;
        prime_implicants
            .into_iter()
            .enumerate()
            .filter_map(move |(row, term)| solution.rows().binary_search(&row).ok().map(|_| term))
    }
}

/// Minimizes a set of minterms over `domain`.
///
/// Every minterm is validated before any merging happens.
///
/// # Examples
///
/// ```
/// use range_min::term::{Domain, Term};
///
/// let domain = Domain::new([3, 3]);
/// let minterms: Vec<Term> = ["0,0", "0,1", "1,0", "1,1", "3,3"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// let minimization = range_min::minimize(&domain, &minterms).unwrap();
/// let implicants: Vec<_> = minimization.implicants().map(|t| t.to_string()).collect();
/// assert_eq!(implicants, ["3,3", "0-1,0-1"]);
/// ```
pub fn minimize(domain: &Domain, minterms: &[Term]) -> Result<Minimization, MinimizeError> {
    for (index, minterm) in minterms.iter().enumerate() {
        domain.check_minterm(index, minterm)?;
    }

    let prime_implicants = prime_implicants(minterms);
    debug!(
        "{} minterms, {} prime implicants",
        minterms.len(),
        prime_implicants.len()
    );

    let chart = CoverageChart::build(&prime_implicants, minterms)?;
    let Essentials {
        rows: essential,
        reduced,
    } = chart.extract_essentials();

    let solution = if reduced.is_clear() {
        CoverSolution::from_rows(essential.iter().copied())
    } else {
        let candidates = petrick::minimal_covers(&reduced);
        CoverSolution::select(&prime_implicants, &essential, &candidates)
    };
    debug_assert!(
        chart.is_covered_by(solution.rows().iter().copied()),
        "solution {:?} must cover every minterm",
        solution
    );

    Ok(Minimization {
        prime_implicants,
        essential,
        solution,
    })
}
