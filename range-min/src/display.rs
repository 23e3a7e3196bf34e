// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{table::Rule, term::Term};
use std::{borrow::Cow, fmt};

/// Displays a term in the `0-2,1,3` form used by mode tables.
#[derive(Copy, Clone, Debug)]
pub struct TermDisplay<'a> {
    term: &'a Term,
}

impl<'a> TermDisplay<'a> {
    pub fn new(term: &'a Term) -> Self {
        Self { term }
    }
}

impl<'a> fmt::Display for TermDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let values = self.term.values();
        for (ix, value) in values.iter().enumerate() {
            write!(f, "{}", value)?;
            if ix < values.len() - 1 {
                write!(f, ",")?;
            }
        }
        Ok(())
    }
}

/// Displays a list of terms, one after the other.
#[derive(Clone, Debug)]
pub struct TermsDisplay<'a> {
    terms: &'a [Term],
    term_separator: (Cow<'a, str>, bool),
}

impl<'a> TermsDisplay<'a> {
    pub fn new(terms: &'a [Term]) -> Self {
        Self {
            terms,
            term_separator: (Cow::Borrowed("\n"), true),
        }
    }

    pub fn with_term_separator(
        mut self,
        separator: impl Into<Cow<'a, str>>,
        print_last: bool,
    ) -> Self {
        self.term_separator = (separator.into(), print_last);
        self
    }
}

impl<'a> fmt::Display for TermsDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (separator, print_last) = &self.term_separator;
        for (ix, term) in self.terms.iter().enumerate() {
            write!(f, "{}", term)?;
            if *print_last || ix < self.terms.len() - 1 {
                write!(f, "{}", separator)?;
            }
        }
        Ok(())
    }
}

/// Displays rules in the output table format: `<term>:<mode>`, one per line.
#[derive(Copy, Clone, Debug)]
pub struct RulesDisplay<'a> {
    rules: &'a [Rule],
}

impl<'a> RulesDisplay<'a> {
    pub fn new(rules: &'a [Rule]) -> Self {
        Self { rules }
    }
}

impl<'a> fmt::Display for RulesDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rule in self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_display() {
        let term: Term = "0-2,1,3-4".parse().unwrap();
        assert_eq!(term.display().to_string(), "0-2,1,3-4");
        let term: Term = "7".parse().unwrap();
        assert_eq!(term.display().to_string(), "7");
    }

    #[test]
    fn test_terms_display() {
        let terms: Vec<Term> = vec!["0,1".parse().unwrap(), "2-3,1".parse().unwrap()];
        assert_eq!(TermsDisplay::new(&terms).to_string(), "0,1\n2-3,1\n");
        assert_eq!(
            TermsDisplay::new(&terms)
                .with_term_separator(" ", false)
                .to_string(),
            "0,1 2-3,1"
        );
        assert_eq!(TermsDisplay::new(&[]).to_string(), "");
    }

    #[test]
    fn test_rules_display() {
        let rules = vec![
            Rule {
                term: "0-1,0".parse().unwrap(),
                mode: 0,
            },
            Rule {
                term: "2,1-3".parse().unwrap(),
                mode: 3,
            },
        ];
        assert_eq!(RulesDisplay::new(&rules).to_string(), "0-1,0:0\n2,1-3:3\n");
        assert_eq!(RulesDisplay::new(&[]).to_string(), "");
    }
}
