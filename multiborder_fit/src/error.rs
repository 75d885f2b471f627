// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error returned by [`fit`](crate::fit) for inputs it cannot place.
#[derive(Clone, Debug, PartialEq)]
pub enum FitError {
    /// The source image has a zero dimension.
    InvalidInput {
        /// Source width in pixels.
        width: u32,
        /// Source height in pixels.
        height: u32,
    },
    /// The target rectangle has a negative or non-finite dimension.
    InvalidRect {
        /// Target width.
        width: f64,
        /// Target height.
        height: f64,
    },
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { width, height } => {
                write!(f, "source image must be non-empty, got {width}x{height}")
            }
            Self::InvalidRect { width, height } => write!(
                f,
                "target rectangle must have finite, non-negative size, got {width}x{height}"
            ),
        }
    }
}

impl core::error::Error for FitError {}
