// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Human-readable report of the benchmark results.

use crate::bench::Measurement;
use std::io::{self, Write};

/// Writes a header followed by the average time per run of each measurement,
/// in seconds with 4 decimal places.
pub fn write_report(out: &mut impl Write, measurements: &[Measurement]) -> io::Result<()> {
    writeln!(out, "\n--- Profiling Results (average time per run in seconds):\n")?;
    for measurement in measurements {
        writeln!(
            out,
            ">> {}: {:.4} seconds",
            measurement.reducer.label(),
            measurement.timing.average_secs()
        )?;
    }
    Ok(())
}
