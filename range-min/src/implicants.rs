// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::term::Term;
use log::{debug, trace};
use std::collections::{BTreeMap, HashSet};

/// Terms bucketed by [weight](Term::weight).
///
/// Only weights that hold at least one term have a group. Each term is stored at most once.
#[derive(Clone, Debug, Default)]
pub struct WeightGroups {
    groups: BTreeMap<usize, Vec<Term>>,
    seen: HashSet<Term>,
}

impl WeightGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buckets `terms` by weight.
    pub fn partition(terms: impl IntoIterator<Item = Term>) -> Self {
        let mut groups = Self::new();
        for term in terms {
            groups.insert(term.weight(), term);
        }
        groups
    }

    /// Adds `term` to the group at `weight`. Returns false if the term was already present.
    pub fn insert(&mut self, weight: usize, term: Term) -> bool {
        if self.seen.contains(&term) {
            return false;
        }
        self.seen.insert(term.clone());
        self.groups.entry(weight).or_default().push(term);
        true
    }

    /// The number of non-empty groups.
    #[inline]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn group(&self, weight: usize) -> &[Term] {
        self.groups.get(&weight).map_or(&[], |group| group.as_slice())
    }

    #[inline]
    pub fn term_count(&self) -> usize {
        self.seen.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Iterates over all terms, by increasing weight.
    pub fn iter(&self) -> impl Iterator<Item = &Term> + '_ {
        self.groups.values().flatten()
    }

    /// Runs one merge round.
    ///
    /// Every term of group `w` is compared against every term of group `w + 1`. Merged terms go
    /// into group `w` of the next round.
    pub fn merge_round(&self) -> MergeRound<'_> {
        let mut next = Self::new();
        let mut used: HashSet<&Term> = HashSet::new();
        let mut merge_count = 0;

        for (&weight, lower) in &self.groups {
            let upper = match weight.checked_add(1).and_then(|w| self.groups.get(&w)) {
                Some(upper) => upper,
                None => continue,
            };
            for a in lower {
                for b in upper {
                    if let Some(merged) = a.merge(b) {
                        trace!("merged {} and {} into {}", a, b, merged);
                        used.insert(a);
                        used.insert(b);
                        next.insert(weight, merged);
                        merge_count += 1;
                    }
                }
            }
        }

        let unmerged = self.iter().filter(|term| !used.contains(term)).collect();
        MergeRound {
            next,
            unmerged,
            merge_count,
        }
    }
}

/// The outcome of [`WeightGroups::merge_round`].
#[derive(Clone, Debug)]
pub struct MergeRound<'a> {
    /// Merged terms, to be compared in the next round.
    pub next: WeightGroups,
    /// Terms that took part in no merge. These are prime implicants.
    pub unmerged: Vec<&'a Term>,
    /// The number of successful merges, including ones producing a duplicate term.
    pub merge_count: usize,
}

/// Computes the prime implicants of a set of minterms.
///
/// Merge rounds are repeated until no terms remain. Prime implicants are returned in the order
/// they were found, without duplicates.
pub fn prime_implicants(minterms: &[Term]) -> Vec<Term> {
    let mut groups = WeightGroups::partition(minterms.iter().cloned());
    let mut primes = Vec::new();
    let mut seen = HashSet::new();
    let mut round = 0;

    while !groups.is_empty() {
        round += 1;
        let next = {
            let merge_round = groups.merge_round();
            let prime_count = primes.len();
            for &term in &merge_round.unmerged {
                if !seen.contains(term) {
                    seen.insert(term.clone());
                    primes.push(term.clone());
                }
            }
            debug!(
                "merge round {}: {} terms, {} merges, {} new prime implicants",
                round,
                groups.term_count(),
                merge_round.merge_count,
                primes.len() - prime_count,
            );
            merge_round.next
        };
        groups = next;
    }

    primes
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn terms(s: &str) -> Vec<Term> {
        s.split_whitespace().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn test_partition() {
        let groups = WeightGroups::partition(terms("0,0 0,1 1,0 1,1 0,1 3,3"));
        assert_eq!(groups.group_count(), 4, "weights 3 to 5 hold nothing");
        assert_eq!(groups.term_count(), 5, "duplicate minterm collapses");
        assert_eq!(groups.group(0), terms("0,0").as_slice());
        assert_eq!(groups.group(1), terms("0,1 1,0").as_slice());
        assert_eq!(groups.group(2), terms("1,1").as_slice());
        assert_eq!(groups.group(6), terms("3,3").as_slice());
        assert!(groups.group(7).is_empty());
    }

    #[test]
    fn test_merge_round() {
        let groups = WeightGroups::partition(terms("0,0 0,1 1,0 1,1 3,3"));
        let round = groups.merge_round();

        assert_eq!(round.merge_count, 4);
        assert_eq!(round.unmerged, vec![&terms("3,3")[0]]);
        assert_eq!(round.next.group(0), terms("0,0-1 0-1,0").as_slice());
        assert_eq!(round.next.group(1), terms("0-1,1 1,0-1").as_slice());

        let round = round.next.merge_round();
        assert_eq!(round.merge_count, 2, "both merges produce 0-1,0-1");
        assert!(round.unmerged.is_empty());
        assert_eq!(round.next.term_count(), 1);
        assert_eq!(round.next.group(0), terms("0-1,0-1").as_slice());
    }

    #[test]
    fn test_square() {
        let primes = prime_implicants(&terms("0,0 0,1 1,0 1,1"));
        assert_eq!(primes, terms("0-1,0-1"));
    }

    #[test]
    fn test_isolated_minterm() {
        let primes = prime_implicants(&terms("0,0 0,1 2,3"));
        assert_eq!(primes, terms("2,3 0,0-1"));
    }

    #[test]
    fn test_overlapping_chain() {
        // 0..=3 in one variable merges pairwise, then through overlapping ranges.
        let primes = prime_implicants(&terms("0 1 2 3"));
        assert_eq!(primes, terms("0-3"));
    }

    #[test]
    fn test_l_shape() {
        let primes = prime_implicants(&terms("0,0 1,0 2,0 0,1 0,2"));
        assert_eq!(primes, terms("0-2,0 0,0-2"));
    }

    #[test]
    fn test_far_apart_weights() {
        let groups = WeightGroups::partition(terms("4294967294,4294967295 4294967295,4294967295"));
        assert_eq!(groups.group_count(), 2);
        assert_eq!(groups.group(8589934589), terms("4294967294,4294967295").as_slice());

        let primes = prime_implicants(&terms("0,0 4294967294,4294967295 4294967295,4294967295"));
        assert_eq!(primes, terms("0,0 4294967294-4294967295,4294967295"));
    }

    #[test]
    fn test_empty() {
        assert!(prime_implicants(&[]).is_empty());
    }
}
