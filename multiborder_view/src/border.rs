// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;
use smallvec::SmallVec;

/// Number of border slots a view starts with.
pub const DEFAULT_BORDER_SLOTS: usize = 4;

/// Ordered border slots; index 0 here is slot 1, the outermost.
pub(crate) type BorderSlots = SmallVec<[BorderSpec; DEFAULT_BORDER_SLOTS]>;

/// One border slot: a color and a width.
///
/// A slot without a color, or with zero width, is not drawn and adds no
/// thickness.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BorderSpec {
    /// Border color; `None` means the slot is not drawn.
    pub color: Option<Color>,
    /// Border width in view units.
    pub width: f64,
}

impl BorderSpec {
    /// An empty slot.
    pub const NONE: Self = Self {
        color: None,
        width: 0.0,
    };

    /// Create a slot.
    pub const fn new(color: Option<Color>, width: f64) -> Self {
        Self { color, width }
    }

    /// A drawn slot of the given color and width.
    pub const fn solid(color: Color, width: f64) -> Self {
        Self::new(Some(color), width)
    }

    /// Returns true if the slot paints a ring and consumes thickness.
    pub fn is_visible(&self) -> bool {
        self.color.is_some() && self.width > 0.0
    }
}

impl Default for BorderSpec {
    fn default() -> Self {
        Self::NONE
    }
}
