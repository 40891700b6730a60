// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The three sum-of-squares reducers under comparison.

use crate::array::Int64Array;

/// Computes the sum of squares with an explicit loop over the input and a
/// scalar accumulator.
///
/// The result is exact as long as it fits in a [`u128`]: any single input
/// item is fine, and so is the sequence `1..=n` up to
/// [`MAX_CLOSED_FORM_INPUT`](crate::MAX_CLOSED_FORM_INPUT). Beyond that, the
/// accumulator overflows with the default integer semantics: a panic in debug
/// builds, wrapping in release builds.
pub fn scalar_loop(input: &[u64]) -> u128 {
    let mut sum = 0u128;
    for &x in input {
        let x = u128::from(x);
        sum += x * x;
    }
    sum
}

/// Computes the sum of squares by first materializing all the squares, then
/// summing them.
///
/// Same input domain as [`scalar_loop()`]. The intermediate vector holds one
/// [`u128`] per input item.
pub fn comprehension(input: &[u64]) -> u128 {
    let squares = input
        .iter()
        .map(|&x| u128::from(x) * u128::from(x))
        .collect::<Vec<u128>>();
    squares.iter().sum()
}

/// Computes the sum of squares with bulk operations over a fixed-width
/// [`Int64Array`]. The conversion of the input into the array is part of the
/// work, and the result wraps modulo 2<sup>64</sup>, so any input is valid.
pub fn vectorized(input: &[u64]) -> i64 {
    Int64Array::from_sequence(input).square().sum()
}

/// Result of a reducer, in the reducer's own numeric width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reduction {
    /// Exact result.
    Exact(u128),
    /// Result computed with wrapping 64-bit arithmetic.
    Wrapped(i64),
}

impl Reduction {
    /// Checks whether this result is equal to the given exact value, modulo
    /// the width of this result.
    pub fn matches_exact(&self, exact: u128) -> bool {
        match *self {
            Reduction::Exact(value) => value == exact,
            Reduction::Wrapped(value) => value as u64 == exact as u64,
        }
    }
}

/// The available reducers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReducerKind {
    /// See [`comprehension()`].
    Comprehension,
    /// See [`scalar_loop()`].
    ScalarLoop,
    /// See [`vectorized()`].
    Vectorized,
}

impl ReducerKind {
    /// All the reducers, in report order.
    pub const ALL: [ReducerKind; 3] = [
        ReducerKind::Comprehension,
        ReducerKind::ScalarLoop,
        ReducerKind::Vectorized,
    ];

    /// Human-readable name of this reducer.
    pub fn label(&self) -> &'static str {
        match self {
            ReducerKind::Comprehension => "List Comprehension",
            ReducerKind::ScalarLoop => "Basic (for loop)",
            ReducerKind::Vectorized => "Vectorized (int64 array)",
        }
    }

    /// Runs this reducer on the given input.
    pub fn run(&self, input: &[u64]) -> Reduction {
        match self {
            ReducerKind::Comprehension => Reduction::Exact(comprehension(input)),
            ReducerKind::ScalarLoop => Reduction::Exact(scalar_loop(input)),
            ReducerKind::Vectorized => Reduction::Wrapped(vectorized(input)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bench::closed_form;
    use crate::sequence::Sequence;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn test_empty_input() {
        for reducer in ReducerKind::ALL {
            let result = reducer.run(&[]);
            assert!(result.matches_exact(0), "{reducer:?} = {result:?}");
        }
        assert_eq!(scalar_loop(&[]), 0);
        assert_eq!(comprehension(&[]), 0);
        assert_eq!(vectorized(&[]), 0);
    }

    #[test]
    fn test_small_inputs() {
        let input = Sequence::new(3);
        assert_eq!(scalar_loop(&input), 14);
        assert_eq!(comprehension(&input), 14);
        assert_eq!(vectorized(&input), 14);

        let input = Sequence::new(10);
        assert_eq!(scalar_loop(&input), 385);
        assert_eq!(comprehension(&input), 385);
        assert_eq!(vectorized(&input), 385);
    }

    #[test]
    fn test_closed_form() {
        for n in 0..=100 {
            let input = Sequence::new(n);
            for reducer in ReducerKind::ALL {
                assert!(
                    reducer.run(&input).matches_exact(closed_form(n)),
                    "{reducer:?} for n = {n}"
                );
            }
        }
    }

    #[test]
    fn test_vectorized_wraps() {
        // The sum of squares of 1..=10_000_000 doesn't fit in 64 bits.
        let n = 10_000_000;
        let input = Sequence::new(n);
        let exact = scalar_loop(&input);
        assert_eq!(exact, closed_form(n));
        assert!(exact > u128::from(u64::MAX));
        assert_eq!(vectorized(&input), exact as i64);
        assert!(Reduction::Wrapped(vectorized(&input)).matches_exact(exact));
    }

    #[test]
    fn test_u128_limit() {
        // (2^64 - 1)^2 = 2^128 - 2^65 + 1 is the largest square of an item.
        let max_square = u128::MAX - (1 << 65) + 2;
        assert_eq!(scalar_loop(&[u64::MAX]), max_square);
        assert_eq!(comprehension(&[u64::MAX]), max_square);
        assert_eq!(vectorized(&[u64::MAX]), 1);

        let input = [u64::MAX, 1 << 32, 1];
        assert_eq!(scalar_loop(&input), max_square + (1 << 64) + 1);
        assert_eq!(comprehension(&input), max_square + (1 << 64) + 1);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic = "attempt to add with overflow"]
    fn test_scalar_loop_overflow() {
        scalar_loop(&[u64::MAX, u64::MAX]);
    }

    #[test]
    fn test_random_inputs_agree() {
        let mut rng = ChaCha12Rng::seed_from_u64(42);
        for len in [1, 7, 8, 9, 100, 1000, 12_345] {
            let input = (0..len)
                .map(|_| rng.random_range(0..1 << 32))
                .collect::<Vec<u64>>();
            let exact = scalar_loop(&input);
            assert_eq!(comprehension(&input), exact);
            assert_eq!(vectorized(&input), exact as i64);
        }
    }

    #[test]
    fn test_deterministic() {
        let input = Sequence::new(10_000);
        for reducer in ReducerKind::ALL {
            assert_eq!(reducer.run(&input), reducer.run(&input));
        }
    }

    #[test]
    fn test_matches_exact() {
        assert!(Reduction::Exact(385).matches_exact(385));
        assert!(!Reduction::Exact(385).matches_exact(386));
        assert!(Reduction::Wrapped(-1).matches_exact(u128::from(u64::MAX)));
        assert!(Reduction::Wrapped(0).matches_exact(1 << 64));
        assert!(!Reduction::Wrapped(1).matches_exact(2));
    }

    #[test]
    fn test_labels() {
        let labels = ReducerKind::ALL.map(|reducer| reducer.label());
        assert_eq!(
            labels,
            [
                "List Comprehension",
                "Basic (for loop)",
                "Vectorized (int64 array)"
            ]
        );
    }
}
