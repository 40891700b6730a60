// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![doc = include_str!("../README.md")]
#![forbid(missing_docs, unsafe_code)]

pub mod array;
mod bench;
mod macros;
mod pinning;
pub mod reducer;
mod report;
mod sequence;
mod timing;

pub use bench::{
    closed_form, Benchmark, Measurement, DEFAULT_INPUT_SIZE, DEFAULT_TRIALS, MAX_CLOSED_FORM_INPUT,
};
pub use pinning::CpuPinningPolicy;
pub use reducer::{ReducerKind, Reduction};
pub use report::write_report;
pub use sequence::Sequence;
pub use timing::Timing;
