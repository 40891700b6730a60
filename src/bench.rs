// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Benchmark runner, tying together the input, the reducers and the timing
//! harness.

use crate::macros::{log_debug, log_info};
use crate::pinning::CpuPinningPolicy;
use crate::reducer::{ReducerKind, Reduction};
use crate::sequence::Sequence;
use crate::timing::Timing;
use std::num::NonZeroUsize;

/// Default number of items in the input sequence.
pub const DEFAULT_INPUT_SIZE: u64 = 10_000_000;

/// Default number of timed runs per reducer.
pub const DEFAULT_TRIALS: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(trials) => trials,
    None => unreachable!(),
};

/// Largest `n` for which the sum of squares of `1..=n` fits in a [`u128`].
pub const MAX_CLOSED_FORM_INPUT: u64 = 10_069_012_961_344;

/// Returns the sum of squares of `1..=n`, computed exactly as
/// `n(n+1)(2n+1)/6`.
///
/// # Panics
///
/// If the result doesn't fit in a [`u128`], i.e. if `n` is larger than
/// [`MAX_CLOSED_FORM_INPUT`].
///
/// ```
/// # use sumsq::closed_form;
/// assert_eq!(closed_form(0), 0);
/// assert_eq!(closed_form(3), 14);
/// assert_eq!(closed_form(10), 385);
/// ```
pub fn closed_form(n: u64) -> u128 {
    let (mut a, mut b, mut c) = (u128::from(n), u128::from(n) + 1, 2 * u128::from(n) + 1);
    // One of n and n + 1 is even, and one of the three factors is a multiple
    // of 3.
    if a % 2 == 0 {
        a /= 2;
    } else {
        b /= 2;
    }
    if a % 3 == 0 {
        a /= 3;
    } else if b % 3 == 0 {
        b /= 3;
    } else {
        c /= 3;
    }
    match a.checked_mul(b).and_then(|ab| ab.checked_mul(c)) {
        Some(sum) => sum,
        None => panic!("The sum of squares of 1..={n} overflows u128"),
    }
}

/// Parameters of a benchmark run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Benchmark {
    /// Number of items in the input sequence `1..=input_size`.
    pub input_size: u64,
    /// Number of timed runs per reducer.
    pub trials: NonZeroUsize,
    /// Policy to pin the benchmarking thread to a CPU.
    pub cpu_pinning: CpuPinningPolicy,
    /// Whether to check each reducer against [`closed_form()`] before timing
    /// it.
    pub verify: bool,
}

impl Default for Benchmark {
    fn default() -> Self {
        Self {
            input_size: DEFAULT_INPUT_SIZE,
            trials: DEFAULT_TRIALS,
            cpu_pinning: CpuPinningPolicy::No,
            verify: true,
        }
    }
}

/// Outcome of benchmarking one reducer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Measurement {
    /// The reducer that was measured.
    pub reducer: ReducerKind,
    /// Time spent over all the trials.
    pub timing: Timing,
    /// Result returned by the reducer.
    pub result: Reduction,
}

impl Benchmark {
    /// Runs the given reducers, in order, on the same input.
    ///
    /// # Panics
    ///
    /// If verification is enabled and a reducer returns a wrong result, or if
    /// the CPU pinning policy is [`CpuPinningPolicy::Always`] and pinning
    /// fails. Verification also panics if `input_size` is larger than
    /// [`MAX_CLOSED_FORM_INPUT`].
    ///
    /// ```
    /// # use sumsq::{Benchmark, CpuPinningPolicy, Reduction, ReducerKind};
    /// # use std::num::NonZeroUsize;
    /// let benchmark = Benchmark {
    ///     input_size: 10,
    ///     trials: NonZeroUsize::try_from(2).unwrap(),
    ///     cpu_pinning: CpuPinningPolicy::No,
    ///     verify: true,
    /// };
    /// let measurements = benchmark.run(&[ReducerKind::ScalarLoop]);
    /// assert_eq!(measurements.len(), 1);
    /// assert_eq!(measurements[0].result, Reduction::Exact(385));
    /// ```
    pub fn run(&self, reducers: &[ReducerKind]) -> Vec<Measurement> {
        self.cpu_pinning.apply(0);

        let input = Sequence::new(self.input_size);
        log_info!(
            "Generated input of {} items, running {} trials per reducer",
            input.len(),
            self.trials
        );

        let expected = self.verify.then(|| closed_form(self.input_size));
        reducers
            .iter()
            .map(|&reducer| {
                let result = reducer.run(&input);
                if let Some(expected) = expected {
                    assert!(
                        result.matches_exact(expected),
                        "{} returned {result:?} but the sum of squares of 1..={} is {expected}",
                        reducer.label(),
                        self.input_size,
                    );
                    log_debug!("Verified {}: {result:?}", reducer.label());
                }

                let timing = Timing::measure(self.trials, || reducer.run(&input));
                log_debug!(
                    "{}: {:?} over {} trials",
                    reducer.label(),
                    timing.total,
                    timing.trials
                );

                Measurement {
                    reducer,
                    timing,
                    result,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_closed_form_small() {
        assert_eq!(closed_form(0), 0);
        assert_eq!(closed_form(1), 1);
        assert_eq!(closed_form(3), 14);
        assert_eq!(closed_form(10), 385);
    }

    #[test]
    fn test_closed_form_large() {
        assert_eq!(closed_form(10_000_000), 333_333_383_333_335_000_000);
    }

    #[test]
    fn test_closed_form_limit() {
        assert_eq!(
            closed_form(6_000_000_000_000),
            72_000_000_000_018_000_000_000_001_000_000_000_000
        );
        assert_eq!(
            closed_form(MAX_CLOSED_FORM_INPUT),
            340_282_366_920_839_261_491_266_184_731_045_101_920
        );
    }

    #[test]
    fn test_closed_form_every_residue() {
        // Exercises each branch of the factor division against the naive sum.
        let mut sum = 0u128;
        for n in 0..=60u64 {
            sum += u128::from(n) * u128::from(n);
            assert_eq!(closed_form(n), sum, "n = {n}");
        }
    }

    #[test]
    #[should_panic = "overflows u128"]
    fn test_closed_form_overflow() {
        closed_form(MAX_CLOSED_FORM_INPUT + 1);
    }

    #[test]
    #[should_panic = "overflows u128"]
    fn test_closed_form_u64_max() {
        closed_form(u64::MAX);
    }

    #[test]
    fn test_default() {
        let benchmark = Benchmark::default();
        assert_eq!(benchmark.input_size, 10_000_000);
        assert_eq!(benchmark.trials.get(), 10);
        assert_eq!(benchmark.cpu_pinning, CpuPinningPolicy::No);
        assert!(benchmark.verify);
    }

    #[test]
    fn test_run_all_reducers() {
        let benchmark = Benchmark {
            input_size: 1000,
            trials: NonZeroUsize::try_from(3).unwrap(),
            ..Benchmark::default()
        };
        let measurements = benchmark.run(&ReducerKind::ALL);

        assert_eq!(measurements.len(), 3);
        for (measurement, reducer) in measurements.iter().zip(ReducerKind::ALL) {
            assert_eq!(measurement.reducer, reducer);
            assert_eq!(measurement.timing.trials.get(), 3);
            assert!(measurement.result.matches_exact(closed_form(1000)));
            assert!(measurement.timing.average_secs().is_finite());
        }
    }

    #[test]
    fn test_run_empty_input() {
        let benchmark = Benchmark {
            input_size: 0,
            trials: NonZeroUsize::try_from(1).unwrap(),
            ..Benchmark::default()
        };
        let measurements = benchmark.run(&ReducerKind::ALL);
        let results = measurements
            .iter()
            .map(|measurement| measurement.result)
            .collect::<Vec<_>>();
        assert_eq!(
            results,
            [
                Reduction::Exact(0),
                Reduction::Exact(0),
                Reduction::Wrapped(0)
            ]
        );
    }

    #[test]
    fn test_run_subset_in_order() {
        let benchmark = Benchmark {
            input_size: 10,
            trials: NonZeroUsize::try_from(1).unwrap(),
            verify: false,
            ..Benchmark::default()
        };
        let measurements = benchmark.run(&[ReducerKind::Vectorized, ReducerKind::ScalarLoop]);
        assert_eq!(measurements.len(), 2);
        assert_eq!(measurements[0].reducer, ReducerKind::Vectorized);
        assert_eq!(measurements[0].result, Reduction::Wrapped(385));
        assert_eq!(measurements[1].reducer, ReducerKind::ScalarLoop);
        assert_eq!(measurements[1].result, Reduction::Exact(385));
    }

    #[test]
    fn test_run_without_verification_skips_closed_form() {
        let benchmark = Benchmark {
            input_size: 4,
            trials: NonZeroUsize::try_from(1).unwrap(),
            verify: false,
            ..Benchmark::default()
        };
        let measurements = benchmark.run(&[ReducerKind::ScalarLoop]);
        assert_eq!(measurements[0].result, Reduction::Exact(30));
    }

    #[test]
    fn test_run_no_reducers() {
        let benchmark = Benchmark {
            input_size: 10,
            ..Benchmark::default()
        };
        assert!(benchmark.run(&[]).is_empty());
    }
}
