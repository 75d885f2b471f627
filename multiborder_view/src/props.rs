// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named properties for declarative hosts.
//!
//! Design tools address a view by property name (`isRounded`,
//! `border_color_2`, `border_width_2`, ...). This module maps those names onto
//! typed keys, and [`MultiBorderView::set_property`] applies a value for a key.
//! The set of keys is derived from the view's slot count, so a host can
//! enumerate the inspectable surface with
//! [`MultiBorderView::inspectable_properties`].

use core::fmt;
use core::str::FromStr;

use image::RgbaImage;
use multiborder_fit::ContentMode;
use peniko::Color;

use crate::{MultiBorderView, ViewError};

/// A property a host can set on a view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// `isRounded`.
    IsRounded,
    /// `contentMode`.
    ContentMode,
    /// `image`.
    Image,
    /// `border_color_N`, with a 1-based slot index.
    BorderColor(usize),
    /// `border_width_N`, with a 1-based slot index.
    BorderWidth(usize),
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IsRounded => f.write_str("isRounded"),
            Self::ContentMode => f.write_str("contentMode"),
            Self::Image => f.write_str("image"),
            Self::BorderColor(n) => write!(f, "border_color_{n}"),
            Self::BorderWidth(n) => write!(f, "border_width_{n}"),
        }
    }
}

impl FromStr for PropertyKey {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ViewError::UnknownProperty { name: s.to_owned() };
        let slot = |digits: &str| match digits.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(unknown()),
        };
        match s {
            "isRounded" | "is_rounded" => Ok(Self::IsRounded),
            "contentMode" | "content_mode" => Ok(Self::ContentMode),
            "image" => Ok(Self::Image),
            _ => {
                if let Some(n) = s.strip_prefix("border_color_") {
                    slot(n).map(Self::BorderColor)
                } else if let Some(n) = s.strip_prefix("border_width_") {
                    slot(n).map(Self::BorderWidth)
                } else {
                    Err(unknown())
                }
            }
        }
    }
}

/// A value for a [`PropertyKey`].
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// For [`PropertyKey::IsRounded`].
    Bool(bool),
    /// For [`PropertyKey::ContentMode`].
    ContentMode(ContentMode),
    /// For [`PropertyKey::Image`].
    Image(Option<RgbaImage>),
    /// For [`PropertyKey::BorderColor`].
    Color(Option<Color>),
    /// For [`PropertyKey::BorderWidth`].
    Width(f64),
}

impl MultiBorderView {
    /// Every property a host can set, in declaration order.
    pub fn inspectable_properties(&self) -> Vec<PropertyKey> {
        let mut keys = vec![
            PropertyKey::IsRounded,
            PropertyKey::ContentMode,
            PropertyKey::Image,
        ];
        for n in 1..=self.border_count() {
            keys.push(PropertyKey::BorderColor(n));
            keys.push(PropertyKey::BorderWidth(n));
        }
        keys
    }

    /// Apply `value` to the property named by `key`.
    ///
    /// # Errors
    ///
    /// - [`ViewError::TypeMismatch`] if `value` is the wrong kind for `key`.
    /// - Any error of the underlying setter, such as
    ///   [`ViewError::InvalidIndex`] for a slot the view does not have.
    pub fn set_property(
        &mut self,
        key: PropertyKey,
        value: PropertyValue,
    ) -> Result<(), ViewError> {
        match (key, value) {
            (PropertyKey::IsRounded, PropertyValue::Bool(rounded)) => {
                self.set_rounded(rounded);
                Ok(())
            }
            (PropertyKey::ContentMode, PropertyValue::ContentMode(mode)) => {
                self.set_content_mode(mode);
                Ok(())
            }
            (PropertyKey::Image, PropertyValue::Image(image)) => {
                self.set_image(image);
                Ok(())
            }
            (PropertyKey::BorderColor(n), PropertyValue::Color(color)) => {
                self.set_border_color(n, color)
            }
            (PropertyKey::BorderWidth(n), PropertyValue::Width(width)) => {
                self.set_border_width(n, width)
            }
            (key, _) => Err(ViewError::TypeMismatch { key }),
        }
    }

    /// Parse `name` and apply `value` to it.
    ///
    /// # Errors
    ///
    /// [`ViewError::UnknownProperty`] if `name` is not a property, otherwise
    /// as [`MultiBorderView::set_property`].
    pub fn set_property_named(
        &mut self,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), ViewError> {
        self.set_property(name.parse()?, value)
    }

    /// Current value of the property named by `key`.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidIndex`] for a border slot the view does not have.
    pub fn property(&self, key: PropertyKey) -> Result<PropertyValue, ViewError> {
        Ok(match key {
            PropertyKey::IsRounded => PropertyValue::Bool(self.is_rounded()),
            PropertyKey::ContentMode => PropertyValue::ContentMode(self.content_mode()),
            PropertyKey::Image => PropertyValue::Image(self.image().cloned()),
            PropertyKey::BorderColor(n) => PropertyValue::Color(self.border_color_at(n)?),
            PropertyKey::BorderWidth(n) => PropertyValue::Width(self.border_width_at(n)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    #[test]
    fn names_round_trip() {
        let view = MultiBorderView::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        for key in view.inspectable_properties() {
            assert_eq!(key.to_string().parse::<PropertyKey>(), Ok(key));
        }
        assert_eq!(
            "is_rounded".parse::<PropertyKey>(),
            Ok(PropertyKey::IsRounded)
        );
    }

    #[test]
    fn rejects_unknown_names() {
        for name in ["border_color_0", "border_width_", "border_color_x", "opacity"] {
            assert_eq!(
                name.parse::<PropertyKey>(),
                Err(ViewError::UnknownProperty {
                    name: name.to_owned()
                }),
                "{name}"
            );
        }
    }

    #[test]
    fn inspectable_surface_tracks_slot_count() {
        let mut view = MultiBorderView::new(Rect::ZERO);
        assert_eq!(view.inspectable_properties().len(), 3 + 2 * 4);
        assert_eq!(
            view.inspectable_properties().last(),
            Some(&PropertyKey::BorderWidth(4))
        );

        view.add_border_slot(crate::BorderSpec::NONE).unwrap();
        assert_eq!(
            view.inspectable_properties().last(),
            Some(&PropertyKey::BorderWidth(5))
        );
    }

    #[test]
    fn set_property_by_name() {
        let red = Color::from_rgba8(255, 0, 0, 255);
        let mut view = MultiBorderView::new(Rect::ZERO);

        view.set_property_named("border_color_2", PropertyValue::Color(Some(red)))
            .unwrap();
        view.set_property_named("border_width_2", PropertyValue::Width(3.5))
            .unwrap();
        view.set_property_named("isRounded", PropertyValue::Bool(true))
            .unwrap();
        view.set_property_named(
            "contentMode",
            PropertyValue::ContentMode(ContentMode::Center),
        )
        .unwrap();

        assert_eq!(view.border_color_at(2), Ok(Some(red)));
        assert_eq!(view.border_width_at(2), Ok(3.5));
        assert!(view.is_rounded());
        assert_eq!(
            view.property(PropertyKey::ContentMode),
            Ok(PropertyValue::ContentMode(ContentMode::Center))
        );
    }

    #[test]
    fn mismatched_values_are_rejected() {
        let mut view = MultiBorderView::new(Rect::ZERO);
        let before = view.revision();

        assert_eq!(
            view.set_property(PropertyKey::BorderWidth(1), PropertyValue::Bool(true)),
            Err(ViewError::TypeMismatch {
                key: PropertyKey::BorderWidth(1)
            })
        );
        assert_eq!(
            view.set_property(PropertyKey::BorderColor(9), PropertyValue::Color(None)),
            Err(ViewError::InvalidIndex { index: 9, count: 4 })
        );
        assert_eq!(view.revision(), before);
    }
}
