// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A fixed-width integer array with bulk elementwise operations.
//!
//! All arithmetic wraps modulo 2<sup>64</sup>, as fixed-width array libraries
//! do. The loops are written over contiguous chunks with independent
//! accumulators, a shape the compiler reliably turns into SIMD instructions.

/// Number of independent accumulators used by [`Int64Array::sum()`].
pub const LANES: usize = 8;

/// A contiguous array of `i64` values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Int64Array {
    values: Box<[i64]>,
}

impl Int64Array {
    /// Converts the given integers into a fixed-width array. Values above
    /// [`i64::MAX`] wrap around to negative values.
    pub fn from_sequence(input: &[u64]) -> Self {
        Self {
            values: input.iter().map(|&x| x as i64).collect(),
        }
    }

    /// Returns the number of elements in this array.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this array has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the elements as a slice.
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    /// Computes the elementwise squares into a new array.
    pub fn square(&self) -> Self {
        Self {
            values: self.values.iter().map(|&x| x.wrapping_mul(x)).collect(),
        }
    }

    /// Computes the wrapping sum of all elements.
    ///
    /// ```
    /// # use sumsq::array::Int64Array;
    /// let array = Int64Array::from_sequence(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    /// assert_eq!(array.square().sum(), 385);
    /// ```
    pub fn sum(&self) -> i64 {
        let chunks = self.values.chunks_exact(LANES);
        let remainder = chunks.remainder();

        let mut lanes = [0i64; LANES];
        for chunk in chunks {
            for (lane, &x) in lanes.iter_mut().zip(chunk) {
                *lane = lane.wrapping_add(x);
            }
        }

        let head = lanes.iter().fold(0i64, |acc, &x| acc.wrapping_add(x));
        remainder.iter().fold(head, |acc, &x| acc.wrapping_add(x))
    }
}
