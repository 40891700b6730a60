// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Input generation for the benchmark.

use std::ops::Deref;

/// An immutable sequence of the consecutive integers `1..=len`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence {
    items: Box<[u64]>,
}

impl Sequence {
    /// Generates the sequence `1, 2, ..., len`. A length of zero yields the
    /// empty sequence.
    ///
    /// ```
    /// # use sumsq::Sequence;
    /// let sequence = Sequence::new(4);
    /// assert_eq!(*sequence, [1, 2, 3, 4]);
    /// ```
    pub fn new(len: u64) -> Self {
        Self {
            items: (1..=len).collect(),
        }
    }

    /// Returns the underlying items as a slice.
    pub fn as_slice(&self) -> &[u64] {
        &self.items
    }
}

impl Deref for Sequence {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        self.as_slice()
    }
}
