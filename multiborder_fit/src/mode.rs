// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content modes and their alignment anchors.

use core::fmt;
use core::str::FromStr;

/// Rule governing how a source image is scaled, cropped, and aligned into a
/// destination rectangle.
///
/// The discriminants follow the order design tools serialize the mode in, so
/// [`ContentMode::from_raw`] accepts the stored integer directly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContentMode {
    /// Stretch non-uniformly to exactly cover the rectangle.
    #[default]
    ScaleToFill,
    /// Scale uniformly until the whole image fits; no cropping.
    ScaleAspectFit,
    /// Scale uniformly until the rectangle is covered; overflow is cropped.
    ScaleAspectFill,
    /// Redraw the content for the new bounds.
    ///
    /// For a static bitmap this is the same as [`ContentMode::ScaleToFill`].
    Redraw,
    /// Intrinsic size, centered.
    Center,
    /// Intrinsic size, top edge centered horizontally.
    Top,
    /// Intrinsic size, bottom edge centered horizontally.
    Bottom,
    /// Intrinsic size, left edge centered vertically.
    Left,
    /// Intrinsic size, right edge centered vertically.
    Right,
    /// Intrinsic size, top-left corner.
    TopLeft,
    /// Intrinsic size, top-right corner.
    TopRight,
    /// Intrinsic size, bottom-left corner.
    BottomLeft,
    /// Intrinsic size, bottom-right corner.
    BottomRight,
}

/// Fractional alignment of an image inside a rectangle.
///
/// `0.0` aligns the leading edges, `1.0` the trailing edges, `0.5` centers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Anchor {
    /// Horizontal alignment.
    pub x: f64,
    /// Vertical alignment.
    pub y: f64,
}

impl Anchor {
    /// Centered on both axes.
    pub const CENTER: Self = Self::new(0.5, 0.5);

    /// Create an anchor from fractional alignments.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl ContentMode {
    /// Every mode, in serialization order.
    pub const ALL: [Self; 13] = [
        Self::ScaleToFill,
        Self::ScaleAspectFit,
        Self::ScaleAspectFill,
        Self::Redraw,
        Self::Center,
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Snake-case property name of the mode.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ScaleToFill => "scale_to_fill",
            Self::ScaleAspectFit => "scale_aspect_fit",
            Self::ScaleAspectFill => "scale_aspect_fill",
            Self::Redraw => "redraw",
            Self::Center => "center",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::TopLeft => "top_left",
            Self::TopRight => "top_right",
            Self::BottomLeft => "bottom_left",
            Self::BottomRight => "bottom_right",
        }
    }

    /// Serialized integer value of the mode.
    pub fn raw(self) -> u8 {
        match self {
            Self::ScaleToFill => 0,
            Self::ScaleAspectFit => 1,
            Self::ScaleAspectFill => 2,
            Self::Redraw => 3,
            Self::Center => 4,
            Self::Top => 5,
            Self::Bottom => 6,
            Self::Left => 7,
            Self::Right => 8,
            Self::TopLeft => 9,
            Self::TopRight => 10,
            Self::BottomLeft => 11,
            Self::BottomRight => 12,
        }
    }

    /// Look up a mode by its serialized integer value.
    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.get(usize::from(raw)).copied()
    }

    /// Returns true if the mode resamples the image.
    pub const fn scales(self) -> bool {
        matches!(
            self,
            Self::ScaleToFill | Self::ScaleAspectFit | Self::ScaleAspectFill | Self::Redraw
        )
    }

    /// Alignment of an unscaled image; `None` for the scaling modes.
    pub const fn anchor(self) -> Option<Anchor> {
        let (x, y) = match self {
            Self::ScaleToFill | Self::ScaleAspectFit | Self::ScaleAspectFill | Self::Redraw => {
                return None;
            }
            Self::Center => (0.5, 0.5),
            Self::Top => (0.5, 0.0),
            Self::Bottom => (0.5, 1.0),
            Self::Left => (0.0, 0.5),
            Self::Right => (1.0, 0.5),
            Self::TopLeft => (0.0, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::BottomLeft => (0.0, 1.0),
            Self::BottomRight => (1.0, 1.0),
        };
        Some(Anchor::new(x, y))
    }
}

impl fmt::Display for ContentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no content mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseContentModeError {
    input: String,
}

impl ParseContentModeError {
    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseContentModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown content mode `{}`", self.input)
    }
}

impl core::error::Error for ParseContentModeError {}

impl FromStr for ContentMode {
    type Err = ParseContentModeError;

    /// Accepts `scale_aspect_fit`, `scaleAspectFit`, `ScaleAspectFit`, or the
    /// serialized integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(raw) = trimmed.parse::<u8>() {
            if let Some(mode) = Self::from_raw(raw) {
                return Ok(mode);
            }
        }
        let folded: String = trimmed
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().replace('_', "") == folded)
            .ok_or_else(|| ParseContentModeError {
                input: s.to_owned(),
            })
    }
}
