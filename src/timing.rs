// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Wall-clock timing over repeated trials.

use std::hint::black_box;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Total wall-clock time spent over a number of trials.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Total elapsed time over all trials.
    pub total: Duration,
    /// Number of trials.
    pub trials: NonZeroUsize,
}

impl Timing {
    /// Runs the given function `trials` times and measures the total elapsed
    /// time. Each output goes through [`black_box()`] so that the work isn't
    /// optimized away.
    ///
    /// ```
    /// # use sumsq::Timing;
    /// # use std::num::NonZeroUsize;
    /// let trials = NonZeroUsize::try_from(3).unwrap();
    /// let mut calls = 0;
    /// let timing = Timing::measure(trials, || calls += 1);
    /// assert_eq!(calls, 3);
    /// assert_eq!(timing.trials, trials);
    /// ```
    pub fn measure<T>(trials: NonZeroUsize, mut f: impl FnMut() -> T) -> Self {
        let start = Instant::now();
        for _ in 0..trials.get() {
            black_box(f());
        }
        Self {
            total: start.elapsed(),
            trials,
        }
    }

    /// Returns the average time per trial.
    pub fn average(&self) -> Duration {
        let nanos = self.total.as_nanos() / self.trials.get() as u128;
        // The quotient is at most the total, so the seconds fit in a u64.
        Duration::new(
            (nanos / NANOS_PER_SEC) as u64,
            (nanos % NANOS_PER_SEC) as u32,
        )
    }

    /// Returns the average time per trial, in seconds.
    pub fn average_secs(&self) -> f64 {
        self.total.as_secs_f64() / self.trials.get() as f64
    }
}
