// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::PropertyKey;

/// Error returned when a view is configured with values it cannot hold.
///
/// These are caller bugs; the view's state is unchanged when one is returned.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewError {
    /// A border index outside `1..=count`.
    InvalidIndex {
        /// The index that was passed.
        index: usize,
        /// Number of border slots on the view.
        count: usize,
    },
    /// A border width that is negative or not finite.
    InvalidArgument {
        /// The width that was passed.
        width: f64,
    },
    /// A property value of the wrong kind for its key.
    TypeMismatch {
        /// The property being set.
        key: PropertyKey,
    },
    /// A property name that matches no property.
    UnknownProperty {
        /// The name that was looked up.
        name: String,
    },
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex { index, count } => {
                write!(f, "border index {index} is outside 1..={count}")
            }
            Self::InvalidArgument { width } => {
                write!(f, "border width must be finite and non-negative, got {width}")
            }
            Self::TypeMismatch { key } => write!(f, "wrong value kind for property `{key}`"),
            Self::UnknownProperty { name } => write!(f, "unknown property `{name}`"),
        }
    }
}

impl core::error::Error for ViewError {}

pub(crate) fn validate_width(width: f64) -> Result<f64, ViewError> {
    if width.is_finite() && width >= 0.0 {
        Ok(width)
    } else {
        Err(ViewError::InvalidArgument { width })
    }
}
