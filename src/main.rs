// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI tool to compare the running time of sum-of-squares reducers.

use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::num::NonZeroUsize;
use sumsq::{Benchmark, CpuPinningPolicy, ReducerKind, DEFAULT_INPUT_SIZE, DEFAULT_TRIALS};

fn main() -> io::Result<()> {
    #[cfg(feature = "log")]
    env_logger::init();

    let cli = Cli::parse();
    let benchmark = cli.benchmark();
    let reducers = cli.reducers();

    let measurements = benchmark.run(&reducers);

    let mut stdout = io::stdout().lock();
    sumsq::write_report(&mut stdout, &measurements)?;
    stdout.flush()
}

/// CLI tool to compare the running time of sum-of-squares reducers.
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(version)]
struct Cli {
    /// Number of items in the input, which is the sequence 1..=input_size.
    #[arg(long, default_value_t = DEFAULT_INPUT_SIZE)]
    input_size: u64,

    /// Number of timed runs per reducer.
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    trials: NonZeroUsize,

    /// Reducers to run, in order. Can be repeated. Default to all of them.
    #[arg(long = "reducer", value_enum)]
    reducers: Vec<ReducerCli>,

    /// Policy to pin the benchmarking thread to a CPU.
    #[arg(long, value_enum, default_value_t = CpuPinningCli::No)]
    cpu_pinning: CpuPinningCli,

    /// Skip checking the reducers' results against the closed-form formula.
    #[arg(long, default_value_t = false)]
    no_verify: bool,
}

impl Cli {
    fn benchmark(&self) -> Benchmark {
        Benchmark {
            input_size: self.input_size,
            trials: self.trials,
            cpu_pinning: match self.cpu_pinning {
                CpuPinningCli::No => CpuPinningPolicy::No,
                CpuPinningCli::IfSupported => CpuPinningPolicy::IfSupported,
                CpuPinningCli::Always => CpuPinningPolicy::Always,
            },
            verify: !self.no_verify,
        }
    }

    fn reducers(&self) -> Vec<ReducerKind> {
        if self.reducers.is_empty() {
            ReducerKind::ALL.to_vec()
        } else {
            self.reducers
                .iter()
                .map(|reducer| match reducer {
                    ReducerCli::Comprehension => ReducerKind::Comprehension,
                    ReducerCli::ScalarLoop => ReducerKind::ScalarLoop,
                    ReducerCli::Vectorized => ReducerKind::Vectorized,
                })
                .collect()
        }
    }
}

/// Sum-of-squares reducer.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ReducerCli {
    /// Materialize the squares, then sum them.
    Comprehension,
    /// Accumulate the squares in a loop.
    ScalarLoop,
    /// Bulk operations on a fixed-width integer array.
    Vectorized,
}

/// Policy to pin the benchmarking thread to a CPU.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum CpuPinningCli {
    /// Don't pin the thread.
    No,
    /// Pin the thread if supported on this platform.
    IfSupported,
    /// Pin the thread, failing if not supported.
    Always,
}
