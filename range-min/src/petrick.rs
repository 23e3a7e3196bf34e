// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Petrick's method for the covering problem left after essential implicants are removed.
//!
//! Each chart column becomes a sum of the rows covering it. Multiplying all the sums together and
//! simplifying with `X + XY = X` leaves exactly the irredundant covers as products.

use crate::chart::CoverageChart;
use itertools::Itertools;
use log::{debug, trace};
use std::{collections::BTreeSet, ops::Mul};

/// A product of implicants, stored as the set of their row indexes.
pub type Product = BTreeSet<usize>;

/// A sum of products.
///
/// Products are kept unique, in lexicographic order, and no product is a superset of another.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Polynomial {
    products: Vec<Product>,
}

impl Polynomial {
    /// Creates a polynomial from products, simplifying it.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let unique: BTreeSet<Product> = products.into_iter().collect();
        let products = unique
            .iter()
            .filter(|product| {
                !unique
                    .iter()
                    .any(|other| other.len() < product.len() && other.is_subset(product))
            })
            .cloned()
            .collect();
        Self { products }
    }

    /// Creates the sum of the given rows, each one a product on its own.
    pub fn sum_of(rows: impl IntoIterator<Item = usize>) -> Self {
        Self::new(rows.into_iter().map(|row| Product::from([row])))
    }

    #[inline]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Returns the products with the fewest implicants, in polynomial order.
    pub fn minimal_products(&self) -> Vec<Product> {
        let min_len = match self.products.iter().map(|product| product.len()).min() {
            Some(min_len) => min_len,
            None => return Vec::new(),
        };
        self.products
            .iter()
            .filter(|product| product.len() == min_len)
            .cloned()
            .collect()
    }

    fn multiply_impl(&self, other: &Self) -> Self {
        // The empty polynomial is the multiplicative identity here: columns without any
        // covering row contribute nothing.
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }

        Self::new(
            self.products
                .iter()
                .cartesian_product(&other.products)
                .map(|(a, b)| a.union(b).copied().collect()),
        )
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply_impl(&rhs)
    }
}

impl<'a, 'b> Mul<&'a Polynomial> for &'b Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &'a Polynomial) -> Self::Output {
        self.multiply_impl(rhs)
    }
}

impl<'a> Mul<&'a Polynomial> for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &'a Polynomial) -> Self::Output {
        self.multiply_impl(rhs)
    }
}

impl<'b> Mul<Polynomial> for &'b Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Self::Output {
        self.multiply_impl(&rhs)
    }
}

/// Solves the covering problem posed by `chart`.
///
/// Returns every cover with the smallest number of implicants. Columns without any set cell are
/// ignored, so a clear chart yields no covers.
pub fn minimal_covers(chart: &CoverageChart) -> Vec<Product> {
    let polynomial = chart.live_columns().enumerate().fold(
        Polynomial::default(),
        |acc, (ix, column)| {
            let result = acc * &Polynomial::sum_of(chart.column_rows(column));
            trace!(
                "petrick: after column {} ({} multiplied), {} products",
                column,
                ix + 1,
                result.products().len()
            );
            result
        },
    );

    let covers = polynomial.minimal_products();
    debug!(
        "petrick: {} irredundant covers, {} of minimal size",
        polynomial.products().len(),
        covers.len()
    );
    covers
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn product(rows: &[usize]) -> Product {
        rows.iter().copied().collect()
    }

    fn polynomial(products: &[&[usize]]) -> Polynomial {
        Polynomial::new(products.iter().map(|rows| product(rows)))
    }

    #[test]
    fn test_absorption() {
        // P1 + P1P2 + P2P1 + P3 = P1 + P3
        let p = polynomial(&[&[1], &[1, 2], &[2, 1], &[3]]);
        assert_eq!(p.products(), &[product(&[1]), product(&[3])]);
    }

    #[test]
    fn test_multiply() {
        // (P0 + P1)(P0 + P2) = P0 + P0P2 + P1P0 + P1P2 = P0 + P1P2
        let a = Polynomial::sum_of([0, 1]);
        let b = Polynomial::sum_of([0, 2]);
        assert_eq!(&a * &b, polynomial(&[&[0], &[1, 2]]));

        // Multiplying by the empty polynomial is the identity.
        assert_eq!(a.clone() * Polynomial::default(), a);
        assert_eq!(Polynomial::default() * a.clone(), a);
    }

    #[test]
    fn test_multiply_three() {
        // (P0 + P1)(P1 + P2)(P2 + P0)
        let p = Polynomial::sum_of([0, 1]) * Polynomial::sum_of([1, 2]) * Polynomial::sum_of([2, 0]);
        assert_eq!(p, polynomial(&[&[0, 1], &[0, 2], &[1, 2]]));
        assert_eq!(
            p.minimal_products(),
            vec![product(&[0, 1]), product(&[0, 2]), product(&[1, 2])]
        );
    }

    #[test]
    fn test_minimal_covers() {
        // Columns: {0, 1}, {1, 2}, {2, 3}, {3}. Only row 3 covers the last column.
        let chart = CoverageChart::from_rows([
            [true, false, false, false],
            [true, true, false, false],
            [false, true, true, false],
            [false, false, true, true],
        ]);
        // (P0 + P1)(P1 + P2)(P2 + P3)(P3) = P1P3 + P0P2P3
        assert_eq!(minimal_covers(&chart), vec![product(&[1, 3])]);
    }

    #[test]
    fn test_clear_chart() {
        let chart = CoverageChart::from_rows([[false, false], [false, false]]);
        assert!(minimal_covers(&chart).is_empty());
    }

    proptest! {
        #[test]
        fn proptest_minimal_covers_cover(
            cells in prop::collection::vec(prop::collection::vec(any::<bool>(), 6), 1..6)
        ) {
            let chart = CoverageChart::from_rows(cells);
            let covers = minimal_covers(&chart);
            if chart.is_clear() {
                prop_assert!(covers.is_empty());
            } else {
                prop_assert!(!covers.is_empty());
                let live: Vec<_> = chart.live_columns().collect();
                let size = covers[0].len();
                for cover in &covers {
                    prop_assert_eq!(cover.len(), size);
                    for &column in &live {
                        prop_assert!(
                            cover.iter().any(|&row| chart.is_set(row, column)),
                            "cover {:?} misses column {}", cover, column,
                        );
                    }
                }
            }
        }
    }
}
