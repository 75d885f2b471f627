// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;
use multiborder_fit::{ContentMode, FitOptions};

use crate::{BorderSpec, DEFAULT_BORDER_SLOTS};

/// Everything needed to build a [`MultiBorderView`](crate::MultiBorderView)
/// except the image.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiBorderConfig {
    /// View bounds.
    pub bounds: Rect,
    /// Whether shapes are fully rounded.
    pub is_rounded: bool,
    /// How the image is fitted into the content area.
    pub content_mode: ContentMode,
    /// Border slots, outermost first.
    pub borders: Vec<BorderSpec>,
    /// Resampling options.
    pub fit: FitOptions,
}

impl Default for MultiBorderConfig {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            is_rounded: false,
            content_mode: ContentMode::default(),
            borders: vec![BorderSpec::NONE; DEFAULT_BORDER_SLOTS],
            fit: FitOptions::default(),
        }
    }
}
