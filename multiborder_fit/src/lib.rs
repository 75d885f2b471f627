// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multiborder Fit: content-mode aware image fitting.
//!
//! [`fit`] maps a source bitmap, a [`ContentMode`], and a destination
//! rectangle to a [`FittedImage`]: the resampled, cropped, or padded pixels
//! plus the rectangle to draw them in. It is a pure function; calling it
//! twice with the same inputs yields the same pixels, so callers may memoize
//! on `(image, mode, rect)`.
//!
//! Pixel boundaries are resolved deterministically: extents round up,
//! placement offsets round down.
//!
//! ```
//! use image::RgbaImage;
//! use kurbo::Rect;
//! use multiborder_fit::{ContentMode, fit};
//!
//! let wide = RgbaImage::new(200, 100);
//! let fitted = fit(&wide, ContentMode::ScaleAspectFit, Rect::new(0.0, 0.0, 100.0, 100.0))?;
//! assert_eq!(fitted.pixel_size(), (100, 50));
//! assert_eq!(fitted.dst.y0, 25.0);
//! # Ok::<(), multiborder_fit::FitError>(())
//! ```

mod error;
mod fit;
mod mode;

pub use error::FitError;
pub use fit::{FitOptions, FittedImage, fit, fit_with};
pub use image::imageops::FilterType;
pub use mode::{Anchor, ContentMode, ParseContentModeError};
