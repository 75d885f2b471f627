// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multiborder View: an image view with concentric, independently styled borders.
//!
//! A [`MultiBorderView`] owns an optional bitmap, a [`ContentMode`], an
//! `is_rounded` flag, and an ordered sequence of border slots (four by
//! default, slot 1 outermost). Each paint pass:
//!
//! - walks the slots outermost first, painting one even-odd ring per visible
//!   slot and insetting by its width; hidden slots leave no gap;
//! - fits the image into whatever content area is left with
//!   [`multiborder_fit::fit_with`];
//! - draws it inside a clip of the content shape, which is fully rounded
//!   (half the short side) when `is_rounded` is set.
//!
//! Output is a stream of [`multiborder_imaging`] operations, so any
//! [`ImagingBackend`](multiborder_imaging::ImagingBackend) can consume it.
//!
//! ## Example
//!
//! ```
//! use kurbo::Rect;
//! use multiborder_view::{ContentMode, MultiBorderView};
//! use peniko::Color;
//!
//! let mut view = MultiBorderView::new(Rect::new(0.0, 0.0, 120.0, 120.0));
//! view.set_border(1, Some(Color::from_rgba8(255, 0, 0, 255)), 4.0).unwrap();
//! view.set_border(2, Some(Color::from_rgba8(255, 255, 255, 255)), 6.0).unwrap();
//! view.set_content_mode(ContentMode::ScaleAspectFit);
//! view.set_rounded(true);
//!
//! assert_eq!(view.content_rect(), Rect::new(10.0, 10.0, 110.0, 110.0));
//! assert_eq!(view.layout().mask_radius(), Some(50.0));
//! ```

mod border;
mod config;
mod error;
pub mod layout;
pub mod props;
mod render;
mod view;

pub use border::{BorderSpec, DEFAULT_BORDER_SLOTS};
pub use config::MultiBorderConfig;
pub use error::ViewError;
pub use layout::{BorderLayout, Ring};
pub use props::{PropertyKey, PropertyValue};
pub use render::RenderPass;
pub use view::MultiBorderView;

pub use multiborder_fit::{ContentMode, FitOptions};
