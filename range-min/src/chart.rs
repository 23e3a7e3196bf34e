// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::MinimizeError, term::Term};
use bitvec::prelude::*;
use log::debug;

/// Prime implicant chart: one row per implicant, one column per minterm.
///
/// A cell is set if the implicant covers the minterm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageChart {
    rows: Vec<BitVec>,
    column_count: usize,
}

impl CoverageChart {
    /// Builds the chart relating `implicants` to `minterms`.
    ///
    /// Returns an error naming the first minterm that no implicant covers.
    pub fn build(implicants: &[Term], minterms: &[Term]) -> Result<Self, MinimizeError> {
        let rows = implicants
            .iter()
            .map(|implicant| {
                minterms
                    .iter()
                    .map(|minterm| implicant.contains(minterm))
                    .collect()
            })
            .collect();
        let chart = Self {
            rows,
            column_count: minterms.len(),
        };

        if let Some(column) =
            (0..chart.column_count).find(|&column| chart.column_rows(column).next().is_none())
        {
            return Err(MinimizeError::EmptyCoverSolution {
                minterm: minterms[column].clone(),
            });
        }

        debug!(
            "coverage chart: {} implicants x {} minterms",
            chart.row_count(),
            chart.column_count()
        );
        Ok(chart)
    }

    /// Creates a chart from rows of cells.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = bool>,
    {
        let rows: Vec<BitVec> = rows
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect();
        let column_count = rows.first().map_or(0, |row| row.len());
        assert!(
            rows.iter().all(|row| row.len() == column_count),
            "all rows must have {} columns",
            column_count
        );
        Self { rows, column_count }
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    #[inline]
    pub fn is_set(&self, row: usize, column: usize) -> bool {
        self.rows[row][column]
    }

    #[inline]
    pub fn row(&self, row: usize) -> &BitSlice {
        &self.rows[row]
    }

    /// Returns the rows covering `column`.
    pub fn column_rows(&self, column: usize) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(move |(ix, row)| row[column].then(|| ix))
    }

    /// Returns the columns with at least one set cell.
    pub fn live_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.column_count).filter(move |&column| self.column_rows(column).next().is_some())
    }

    /// Returns true if no cell is set.
    pub fn is_clear(&self) -> bool {
        self.rows.iter().all(|row| row.not_any())
    }

    /// Returns true if the union of `rows` covers every column.
    pub fn is_covered_by(&self, rows: impl IntoIterator<Item = usize>) -> bool {
        self.covered_columns(rows).all()
    }

    /// Finds the essential rows: those that are the only cover of some column.
    ///
    /// Essential rows are listed once each, in the order their first such column appears. The
    /// returned chart has every column covered by an essential row cleared.
    pub fn extract_essentials(&self) -> Essentials {
        let mut is_essential = bitvec![0; self.row_count()];
        let mut rows = Vec::new();

        for column in 0..self.column_count {
            let mut covering = self.column_rows(column);
            if let (Some(row), None) = (covering.next(), covering.next()) {
                if !is_essential[row] {
                    is_essential.set(row, true);
                    rows.push(row);
                }
            }
        }

        let reduced = self.without_columns_covered_by(rows.iter().copied());
        debug!(
            "{} essential implicants, {} minterms left",
            rows.len(),
            reduced.live_columns().count()
        );
        Essentials { rows, reduced }
    }

    /// Returns a copy of this chart with every column covered by `rows` cleared.
    pub fn without_columns_covered_by(&self, rows: impl IntoIterator<Item = usize>) -> Self {
        let covered = self.covered_columns(rows);
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .by_vals()
                    .zip(covered.iter().by_vals())
                    .map(|(cell, covered)| cell && !covered)
                    .collect()
            })
            .collect();
        Self {
            rows,
            column_count: self.column_count,
        }
    }

    fn covered_columns(&self, rows: impl IntoIterator<Item = usize>) -> BitVec {
        let mut covered = bitvec![0; self.column_count];
        for row in rows {
            for column in self.rows[row].iter_ones() {
                covered.set(column, true);
            }
        }
        covered
    }
}

/// The result of [`CoverageChart::extract_essentials`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Essentials {
    /// Indexes of the essential rows.
    pub rows: Vec<usize>,
    /// The chart restricted to the columns no essential row covers.
    pub reduced: CoverageChart,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(s: &str) -> Vec<Term> {
        s.split_whitespace().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn test_build() {
        let implicants = terms("0-1,0 1,0-1 2,2");
        let minterms = terms("0,0 1,0 1,1 2,2");
        let chart = CoverageChart::build(&implicants, &minterms).unwrap();

        let expected = CoverageChart::from_rows([
            [true, true, false, false],
            [false, true, true, false],
            [false, false, false, true],
        ]);
        assert_eq!(chart, expected);
        assert_eq!(chart.column_rows(1).collect::<Vec<_>>(), vec![0, 1]);
        assert!(chart.is_covered_by([0, 1, 2]));
        assert!(!chart.is_covered_by([0, 1]));
    }

    #[test]
    fn test_uncovered_minterm() {
        let implicants = terms("0-1,0");
        let minterms = terms("0,0 1,1");
        assert_eq!(
            CoverageChart::build(&implicants, &minterms),
            Err(MinimizeError::EmptyCoverSolution {
                minterm: terms("1,1").remove(0)
            })
        );
    }

    #[test]
    fn test_essentials() {
        // Column 0 is only covered by row 1, column 3 only by row 2. Column 1 is covered by rows
        // 0 and 1, column 2 by rows 0 and 3, column 4 by rows 0 and 3.
        let chart = CoverageChart::from_rows([
            [false, true, true, false, true],
            [true, true, false, false, false],
            [false, false, false, true, false],
            [false, false, true, false, true],
        ]);
        let essentials = chart.extract_essentials();
        assert_eq!(essentials.rows, vec![1, 2]);

        let expected = CoverageChart::from_rows([
            [false, false, true, false, true],
            [false, false, false, false, false],
            [false, false, false, false, false],
            [false, false, true, false, true],
        ]);
        assert_eq!(essentials.reduced, expected);
        assert_eq!(essentials.reduced.live_columns().collect::<Vec<_>>(), vec![2, 4]);
        assert!(!essentials.reduced.is_clear());

        // The input chart is left untouched.
        assert!(chart.is_set(1, 1));
    }

    #[test]
    fn test_essentials_cover_everything() {
        let chart = CoverageChart::from_rows([[true, true, false], [false, false, true]]);
        let essentials = chart.extract_essentials();
        assert_eq!(essentials.rows, vec![0, 1]);
        assert!(essentials.reduced.is_clear());
    }

    #[test]
    fn test_empty_chart() {
        let chart = CoverageChart::build(&[], &[]).unwrap();
        assert_eq!(chart.row_count(), 0);
        assert_eq!(chart.column_count(), 0);
        assert!(chart.is_clear());
        assert!(chart.extract_essentials().rows.is_empty());
    }
}
