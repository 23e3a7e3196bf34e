// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    display::TermDisplay,
    errors::{InvalidTerm, MinimizeError},
};
use itertools::Itertools;
use std::{cmp::Ordering, fmt, str::FromStr};

/// The value of a term at one variable position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    /// A single discretized value.
    Single(u32),
    /// An inclusive range of values. The first bound is always strictly smaller than the second.
    Range(u32, u32),
}

impl Value {
    /// Returns the value covering `lo..=hi`.
    ///
    /// Equal bounds produce a [`Value::Single`].
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`.
    pub fn span(lo: u32, hi: u32) -> Self {
        match lo.cmp(&hi) {
            Ordering::Less => Value::Range(lo, hi),
            Ordering::Equal => Value::Single(lo),
            Ordering::Greater => panic!("lower bound {} must not exceed upper bound {}", lo, hi),
        }
    }

    #[inline]
    pub fn lo(self) -> u32 {
        match self {
            Value::Single(v) => v,
            Value::Range(lo, _) => lo,
        }
    }

    #[inline]
    pub fn hi(self) -> u32 {
        match self {
            Value::Single(v) => v,
            Value::Range(_, hi) => hi,
        }
    }

    #[inline]
    pub fn is_range(self) -> bool {
        matches!(self, Value::Range(..))
    }

    /// Returns true if every value in `other` is also in `self`.
    #[inline]
    pub fn contains(self, other: Value) -> bool {
        self.lo() <= other.lo() && other.hi() <= self.hi()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Single(v) => write!(f, "{}", v),
            Value::Range(lo, hi) => write!(f, "{}-{}", lo, hi),
        }
    }
}

impl FromStr for Value {
    type Err = InvalidTerm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_bound = |bound: &str| {
            bound
                .trim()
                .parse::<u32>()
                .map_err(|err| InvalidTerm::new(s, format!("`{}`: {}", bound.trim(), err)))
        };
        match s.split_once('-') {
            Some((lo, hi)) => {
                let (lo, hi) = (parse_bound(lo)?, parse_bound(hi)?);
                if lo > hi {
                    return Err(InvalidTerm::new(
                        s,
                        format!("range bounds {} and {} are inverted", lo, hi),
                    ));
                }
                Ok(Value::span(lo, hi))
            }
            None => Ok(Value::Single(parse_bound(s)?)),
        }
    }
}

/// A rule in a mode table: one [`Value`] per variable.
///
/// Terms are never modified in place. Merging two terms produces a new one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term {
    values: Vec<Value>,
}

impl Term {
    #[inline]
    pub fn new(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Creates a fully specified term, with a single value at every position.
    #[inline]
    pub fn minterm(values: impl IntoIterator<Item = u32>) -> Self {
        Self::new(values.into_iter().map(Value::Single))
    }

    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[inline]
    pub fn variable_count(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_minterm(&self) -> bool {
        self.values.iter().all(|value| !value.is_range())
    }

    /// The sum of the lower bounds at each position.
    ///
    /// Two terms that can be merged always have weights that differ by exactly one.
    pub fn weight(&self) -> usize {
        self.values.iter().map(|value| value.lo() as usize).sum()
    }

    /// The number of positions holding a single value.
    pub fn literal_count(&self) -> usize {
        self.values.iter().filter(|value| !value.is_range()).count()
    }

    /// Returns true if every position of `other` lies within the same position of `self`.
    ///
    /// For a minterm this is the implicant covering test: positions either hold the same value,
    /// or `self` holds a range that includes the minterm's value.
    pub fn contains(&self, other: &Term) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(&c, &d)| c.contains(d))
    }

    /// Checks whether `other` can be merged into `self`.
    ///
    /// The terms must differ at exactly one position. At that position, with `self` spanning
    /// `t10..=t11` and `other` spanning `t20..=t21`, the conditions below are tried in order:
    ///
    /// 1. `self` is a single value and `other` starts right after it: `t11..=t20`.
    /// 2. `self` reaches into `other`: `t10..=t21`.
    /// 3. `other` reaches into `self`: `t20..=t11`.
    ///
    /// The order matters: it decides which bounds survive. A condition that produces inverted
    /// bounds means the terms cannot be merged.
    ///
    /// # Examples
    ///
    /// ```
    /// use range_min::term::{Adjacency, Term};
    ///
    /// let a: Term = "2,0".parse().unwrap();
    /// let b: Term = "3,0".parse().unwrap();
    /// assert_eq!(a.adjacency(&b), Some(Adjacency { position: 0, lo: 2, hi: 3 }));
    ///
    /// // Not adjacent.
    /// let c: Term = "4,0".parse().unwrap();
    /// assert_eq!(a.adjacency(&c), None);
    /// ```
    pub fn adjacency(&self, other: &Term) -> Option<Adjacency> {
        if self.values.len() != other.values.len() {
            return None;
        }

        let mut differing = self
            .values
            .iter()
            .zip(&other.values)
            .enumerate()
            .filter(|(_, (c, d))| c != d);
        let (position, (&first, &second)) = differing.next()?;
        if differing.next().is_some() {
            return None;
        }

        let (t10, t11) = (first.lo(), first.hi());
        let (t20, t21) = (second.lo(), second.hi());
        let (lo, hi) = if t10 == t11 && t20.checked_sub(t11) == Some(1) {
            (t11, t20)
        } else if t11 >= t20 {
            (t10, t21)
        } else if t21 >= t10 {
            (t20, t11)
        } else {
            return None;
        };

        (lo <= hi).then(|| Adjacency { position, lo, hi })
    }

    /// Merges `other` into `self`, if the two are adjacent. See [`Self::adjacency`].
    pub fn merge(&self, other: &Term) -> Option<Term> {
        let adjacency = self.adjacency(other)?;
        Some(self.with_value(adjacency.position, adjacency.value()))
    }

    /// Returns a copy of this term with the value at `position` replaced.
    pub fn with_value(&self, position: usize, value: Value) -> Term {
        let mut values = self.values.clone();
        values[position] = value;
        Self { values }
    }

    /// Returns every minterm covered by this term, in lexicographic order.
    pub fn minterms(&self) -> impl Iterator<Item = Term> + '_ {
        self.values
            .iter()
            .map(|value| value.lo()..=value.hi())
            .multi_cartesian_product()
            .map(Term::minterm)
    }

    #[inline]
    pub fn display(&self) -> TermDisplay<'_> {
        TermDisplay::new(self)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.display().fmt(f)
    }
}

impl FromStr for Term {
    type Err = InvalidTerm;

    /// Parses the comma-separated form, e.g. `0-2,1,3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InvalidTerm::new(s, "term is empty"));
        }
        let values = s
            .split(',')
            .map(|value| {
                value
                    .parse::<Value>()
                    .map_err(|err| InvalidTerm::new(s, err.reason))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { values })
    }
}

/// The result of a successful adjacency check: the position at which two terms merge, and the
/// bounds of the merged range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Adjacency {
    pub position: usize,
    pub lo: u32,
    pub hi: u32,
}

impl Adjacency {
    #[inline]
    pub fn value(&self) -> Value {
        Value::span(self.lo, self.hi)
    }
}

/// The discretized domain of every variable in a table.
///
/// A position `ix` accepts the values `0..=size(ix)`. This is the bound the table header
/// produces: a `0 4 1` variable line yields a size of 3 and the values 0, 1, 2 and 3.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Domain {
    sizes: Vec<u32>,
}

impl Domain {
    #[inline]
    pub fn new(sizes: impl IntoIterator<Item = u32>) -> Self {
        Self {
            sizes: sizes.into_iter().collect(),
        }
    }

    #[inline]
    pub fn variable_count(&self) -> usize {
        self.sizes.len()
    }

    #[inline]
    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    #[inline]
    pub fn size(&self, position: usize) -> u32 {
        self.sizes[position]
    }

    /// Checks that `term`, the `index`th minterm of some input, belongs to this domain.
    pub fn check_minterm(&self, index: usize, term: &Term) -> Result<(), MinimizeError> {
        if term.variable_count() != self.variable_count() {
            return Err(MinimizeError::ValueCountMismatch {
                index,
                expected: self.variable_count(),
                found: term.variable_count(),
            });
        }
        if !term.is_minterm() {
            return Err(MinimizeError::NotAMinterm {
                index,
                term: term.clone(),
            });
        }
        for (position, (value, &max)) in term.values().iter().zip(&self.sizes).enumerate() {
            if value.hi() > max {
                return Err(MinimizeError::ValueOutOfDomain {
                    index,
                    position,
                    value: value.hi(),
                    max,
                });
            }
        }
        Ok(())
    }

    /// Returns every minterm of this domain, in lexicographic order.
    pub fn minterms(&self) -> impl Iterator<Item = Term> + '_ {
        self.sizes
            .iter()
            .map(|&size| 0..=size)
            .multi_cartesian_product()
            .map(Term::minterm)
    }
}
