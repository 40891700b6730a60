// Copyright 2024-2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pinning of the benchmarking thread to a CPU, to reduce timing noise from
//! migrations between cores.

#[cfg(any(
    miri,
    not(any(
        target_os = "android",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "linux"
    ))
))]
use crate::macros::log_warn;
#[cfg(all(
    not(miri),
    any(
        target_os = "android",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "linux"
    )
))]
use crate::macros::{log_debug, log_warn};
// Platforms that support `libc::sched_setaffinity()`.
#[cfg(all(
    not(miri),
    any(
        target_os = "android",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "linux"
    )
))]
use nix::{
    sched::{sched_setaffinity, CpuSet},
    unistd::Pid,
};

/// Policy to pin the benchmarking thread to a CPU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CpuPinningPolicy {
    /// Don't pin the thread.
    #[default]
    No,
    /// Pin the thread to a CPU, if CPU pinning is supported and implemented on
    /// this platform.
    IfSupported,
    /// Pin the thread to a CPU. If CPU pinning isn't supported on this
    /// platform (or not implemented), or if it fails, this panics.
    Always,
}

impl CpuPinningPolicy {
    /// Applies this policy to the current thread, pinning it to the given CPU.
    pub fn apply(&self, cpu: usize) {
        #[cfg(any(
            miri,
            not(any(
                target_os = "android",
                target_os = "dragonfly",
                target_os = "freebsd",
                target_os = "linux"
            ))
        ))]
        {
            let _ = cpu;
            match self {
                CpuPinningPolicy::No => (),
                CpuPinningPolicy::IfSupported => {
                    log_warn!("Pinning threads to CPUs is not implemented on this platform.")
                }
                CpuPinningPolicy::Always => {
                    panic!("Pinning threads to CPUs is not implemented on this platform.")
                }
            }
        }

        #[cfg(all(
            not(miri),
            any(
                target_os = "android",
                target_os = "dragonfly",
                target_os = "freebsd",
                target_os = "linux"
            )
        ))]
        match self {
            CpuPinningPolicy::No => (),
            CpuPinningPolicy::IfSupported => match pin_current_thread(cpu) {
                Ok(()) => log_debug!("Pinned benchmarking thread to CPU #{cpu}"),
                Err(_e) => log_warn!("Failed to set CPU affinity to CPU #{cpu}: {_e}"),
            },
            CpuPinningPolicy::Always => match pin_current_thread(cpu) {
                Ok(()) => log_debug!("Pinned benchmarking thread to CPU #{cpu}"),
                Err(e) => panic!("Failed to set CPU affinity to CPU #{cpu}: {e}"),
            },
        }
    }
}

#[cfg(all(
    not(miri),
    any(
        target_os = "android",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "linux"
    )
))]
fn pin_current_thread(cpu: usize) -> nix::Result<()> {
    let mut cpu_set = CpuSet::new();
    cpu_set.set(cpu)?;
    sched_setaffinity(Pid::from_raw(0), &cpu_set)
}
