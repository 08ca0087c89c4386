//! Coefficient tuples and the fixed fraction-pair table
//!
//! The pair table is a hand-curated list, not a gcd test: it removes 27
//! entries from the 9×9 grid and keeps the remaining 54 in row-major order.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Pairs removed from the 9×9 grid
#[rustfmt::skip]
const EXCLUDED: [(u8, u8); 27] = [
    (1, 1), (2, 2), (2, 4), (2, 6), (2, 8), (3, 3), (3, 6), (3, 9),
    (4, 2), (4, 4), (4, 6), (4, 8), (5, 5), (6, 2), (6, 3), (6, 4),
    (6, 6), (6, 8), (6, 9), (7, 7), (8, 2), (8, 4), (8, 6), (8, 8),
    (9, 3), (9, 6), (9, 9),
];

/// Number of entries in the pair table
pub const COPRIME_PAIR_COUNT: usize = 54;

/// A (numerator, denominator) pair with both components in 1..=9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoprimePair {
    pub numerator: u8,
    pub denominator: u8,
}

static COPRIME_PAIRS: LazyLock<Vec<CoprimePair>> = LazyLock::new(|| {
    (1..=9u8)
        .flat_map(|i| (1..=9u8).map(move |j| (i, j)))
        .filter(|pair| !EXCLUDED.contains(pair))
        .map(|(numerator, denominator)| CoprimePair {
            numerator,
            denominator,
        })
        .collect()
});

/// The fraction-pair table, built on first use
#[must_use]
pub fn coprime_pairs() -> &'static [CoprimePair] {
    &COPRIME_PAIRS
}

/// The five hidden digits (A, B, C, D, E) of a challenge
///
/// A/B and C/D come from the pair table, E is a single digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coefficients([u8; 5]);

impl Coefficients {
    /// Assemble the tuple from two fraction pairs and a constant
    #[must_use]
    pub const fn from_parts(first: CoprimePair, second: CoprimePair, constant: u8) -> Self {
        Self([
            first.numerator,
            first.denominator,
            second.numerator,
            second.denominator,
            constant,
        ])
    }

    /// Wrap raw digits without validation
    #[must_use]
    pub const fn from_digits(digits: [u8; 5]) -> Self {
        Self(digits)
    }

    #[inline]
    #[must_use]
    pub const fn digits(&self) -> &[u8; 5] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub const fn digit_at(&self, position: usize) -> u8 {
        self.0[position]
    }

    /// Multiplicity of each digit, consumed by the feedback pass
    #[inline]
    pub(crate) fn digit_counts(&self) -> FxHashMap<u8, u8> {
        let mut counts = FxHashMap::default();
        for &digit in &self.0 {
            *counts.entry(digit).or_insert(0) += 1;
        }
        counts
    }

    /// True when A,B,C,D lie in 1..=9 and E in 0..=9
    #[must_use]
    pub fn in_bounds(&self) -> bool {
        self.0[..4].iter().all(|d| (1..=9).contains(d)) && self.0[4] <= 9
    }
}

impl fmt::Display for Coefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.0;
        write!(f, "{a}, {b}, {c}, {d}, {e}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_has_54_unique_pairs() {
        let pairs = coprime_pairs();
        assert_eq!(pairs.len(), COPRIME_PAIR_COUNT);

        let unique: HashSet<_> = pairs.iter().collect();
        assert_eq!(unique.len(), COPRIME_PAIR_COUNT);
    }

    #[test]
    fn table_components_in_range() {
        for pair in coprime_pairs() {
            assert!((1..=9).contains(&pair.numerator));
            assert!((1..=9).contains(&pair.denominator));
        }
    }

    #[test]
    fn table_is_row_major_without_exclusions() {
        let pairs = coprime_pairs();
        assert_eq!(pairs[0], CoprimePair { numerator: 1, denominator: 2 });
        assert_eq!(pairs[8], CoprimePair { numerator: 2, denominator: 1 });
        assert_eq!(pairs[53], CoprimePair { numerator: 9, denominator: 8 });

        for pair in pairs {
            assert!(!EXCLUDED.contains(&(pair.numerator, pair.denominator)));
        }
    }

    #[test]
    fn table_is_not_a_gcd_test() {
        // (1,1) has gcd 1 but is excluded; (2,9) is kept
        let pairs = coprime_pairs();
        assert!(!pairs.iter().any(|p| p.numerator == 1 && p.denominator == 1));
        assert!(pairs.iter().any(|p| p.numerator == 2 && p.denominator == 9));
    }

    #[test]
    fn table_is_shared() {
        assert!(std::ptr::eq(coprime_pairs(), coprime_pairs()));
    }

    #[test]
    fn digit_counts_track_multiplicity() {
        let c = Coefficients::from_digits([1, 2, 2, 1, 1]);
        let counts = c.digit_counts();
        assert_eq!(counts.get(&1), Some(&3));
        assert_eq!(counts.get(&2), Some(&2));
        assert_eq!(counts.get(&0), None);
    }

    #[test]
    fn bounds_check() {
        assert!(Coefficients::from_digits([1, 2, 3, 4, 0]).in_bounds());
        assert!(!Coefficients::from_digits([0, 2, 3, 4, 0]).in_bounds());
        assert!(!Coefficients::from_digits([1, 2, 3, 4, 10]).in_bounds());
    }

    #[test]
    fn display_joins_with_commas() {
        let c = Coefficients::from_digits([3, 4, 5, 7, 0]);
        assert_eq!(c.to_string(), "3, 4, 5, 7, 0");
    }
}
