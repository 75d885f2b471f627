// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Concentric border geometry.

use kurbo::{BezPath, Rect, RoundedRect, Shape};
use peniko::Color;
use smallvec::SmallVec;

use crate::{BorderSpec, DEFAULT_BORDER_SLOTS};

/// Tolerance used when flattening ring and clip shapes.
pub(crate) const SHAPE_TOLERANCE: f64 = 0.1;

/// Shrink `rect` by `width` on all sides.
///
/// An axis that would become negative collapses onto the center of `rect`,
/// so the result is never smaller than zero-size.
pub fn shrink(rect: Rect, width: f64) -> Rect {
    let mut inner = rect.inset(-width);
    let center = rect.center();
    if inner.width() < 0.0 {
        inner.x0 = center.x;
        inner.x1 = center.x;
    }
    if inner.height() < 0.0 {
        inner.y0 = center.y;
        inner.y1 = center.y;
    }
    inner
}

/// Corner radius that fully rounds `rect` into a pill, or a circle when square.
pub fn full_radius(rect: Rect) -> f64 {
    rect.width().min(rect.height()).max(0.0) / 2.0
}

fn is_empty(rect: Rect) -> bool {
    rect.width() <= 0.0 || rect.height() <= 0.0
}

/// One painted border ring.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ring {
    /// 1-based slot the ring was produced by.
    pub slot: usize,
    /// Ring color.
    pub color: Color,
    /// Outer edge of the ring.
    pub outer: Rect,
    /// Inner edge of the ring, which is also the next slot's outer edge.
    pub inner: Rect,
}

impl Ring {
    /// Filled outline of the ring, to be painted with [`peniko::Fill::EvenOdd`].
    pub fn to_path(&self, rounded: bool) -> BezPath {
        let mut path = outline(self.outer, rounded);
        if !is_empty(self.inner) {
            path.extend(outline(self.inner, rounded));
        }
        path
    }
}

fn outline(rect: Rect, rounded: bool) -> BezPath {
    if rounded {
        RoundedRect::from_rect(rect, full_radius(rect)).to_path(SHAPE_TOLERANCE)
    } else {
        rect.to_path(SHAPE_TOLERANCE)
    }
}

/// Resolved geometry of a paint pass.
#[derive(Clone, Debug, PartialEq)]
pub struct BorderLayout {
    /// View bounds the layout starts from.
    pub bounds: Rect,
    /// Rings in paint order, outermost first.
    pub rings: SmallVec<[Ring; DEFAULT_BORDER_SLOTS]>,
    /// Area left for the image after all borders.
    pub content: Rect,
    /// Whether shapes are fully rounded.
    pub rounded: bool,
}

impl BorderLayout {
    /// Walk the slots from outermost to innermost, insetting once per visible slot.
    ///
    /// Hidden slots contribute no thickness. A visible slot whose outer edge
    /// has already collapsed still consumes its width but paints nothing.
    pub fn compute(bounds: Rect, borders: &[BorderSpec], rounded: bool) -> Self {
        let mut rings = SmallVec::new();
        let mut current = bounds;
        for (i, spec) in borders.iter().enumerate() {
            let Some(color) = spec.color.filter(|_| spec.is_visible()) else {
                continue;
            };
            let inner = shrink(current, spec.width);
            if !is_empty(current) {
                rings.push(Ring {
                    slot: i + 1,
                    color,
                    outer: current,
                    inner,
                });
            }
            current = inner;
        }
        Self {
            bounds,
            rings,
            content: current,
            rounded,
        }
    }

    /// Sum of the widths that were inset.
    pub fn total_thickness<'a>(borders: impl IntoIterator<Item = &'a BorderSpec>) -> f64 {
        borders
            .into_iter()
            .filter(|spec| spec.is_visible())
            .map(|spec| spec.width)
            .sum()
    }

    /// Returns true if the borders left no room for the image.
    pub fn content_is_empty(&self) -> bool {
        is_empty(self.content)
    }

    /// Corner radius of the content mask, or `None` when not rounded.
    pub fn mask_radius(&self) -> Option<f64> {
        self.rounded.then(|| full_radius(self.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::from_rgba8(255, 0, 0, 255)
    }

    #[test]
    fn shrink_insets_all_sides() {
        let rect = Rect::new(0.0, 0.0, 100.0, 60.0);
        assert_eq!(shrink(rect, 10.0), Rect::new(10.0, 10.0, 90.0, 50.0));
        assert_eq!(shrink(rect, 0.0), rect);
    }

    #[test]
    fn shrink_collapses_to_center() {
        let rect = Rect::new(0.0, 0.0, 100.0, 60.0);
        assert_eq!(shrink(rect, 40.0), Rect::new(40.0, 30.0, 60.0, 30.0));
        assert_eq!(shrink(rect, 80.0), Rect::new(50.0, 30.0, 50.0, 30.0));
    }

    #[test]
    fn radius_is_half_the_short_side() {
        assert_eq!(full_radius(Rect::new(0.0, 0.0, 50.0, 50.0)), 25.0);
        assert_eq!(full_radius(Rect::new(0.0, 0.0, 80.0, 20.0)), 10.0);
        assert_eq!(full_radius(Rect::new(5.0, 5.0, 5.0, 9.0)), 0.0);
    }

    #[test]
    fn hidden_slots_leave_no_gap() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let with_gap = [
            BorderSpec::solid(red(), 4.0),
            BorderSpec::new(None, 9.0),
            BorderSpec::solid(red(), 3.0),
            BorderSpec::solid(red(), 2.0),
        ];
        let packed = [
            BorderSpec::solid(red(), 4.0),
            BorderSpec::solid(red(), 3.0),
            BorderSpec::solid(red(), 2.0),
        ];

        let a = BorderLayout::compute(bounds, &with_gap, false);
        let b = BorderLayout::compute(bounds, &packed, false);
        assert_eq!(a.content, b.content);
        assert_eq!(a.content, Rect::new(9.0, 9.0, 91.0, 91.0));
        assert_eq!(BorderLayout::total_thickness(&with_gap), 9.0);

        let slots: Vec<_> = a.rings.iter().map(|r| r.slot).collect();
        assert_eq!(slots, [1, 3, 4]);
        assert_eq!(a.rings[1].outer, a.rings[0].inner);
    }

    #[test]
    fn thick_borders_yield_zero_size_content() {
        let bounds = Rect::new(0.0, 0.0, 40.0, 20.0);
        let borders = [BorderSpec::solid(red(), 8.0); 3];
        let layout = BorderLayout::compute(bounds, &borders, true);

        assert!(layout.content_is_empty());
        assert!(layout.content.width() >= 0.0);
        assert!(layout.content.height() >= 0.0);
        assert_eq!(layout.content.center(), bounds.center());
        // The third ring starts from a collapsed rectangle and paints nothing.
        assert_eq!(layout.rings.len(), 2);
        assert_eq!(layout.mask_radius(), Some(0.0));
    }

    #[test]
    fn ring_path_has_hole_until_collapse() {
        let ring = Ring {
            slot: 1,
            color: red(),
            outer: Rect::new(0.0, 0.0, 10.0, 10.0),
            inner: Rect::new(2.0, 2.0, 8.0, 8.0),
        };
        let subpaths = |path: &BezPath| {
            path.elements()
                .iter()
                .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
                .count()
        };
        assert_eq!(subpaths(&ring.to_path(false)), 2);
        assert_eq!(subpaths(&ring.to_path(true)), 2);

        let solid = Ring {
            inner: Rect::new(5.0, 5.0, 5.0, 5.0),
            ..ring
        };
        assert_eq!(subpaths(&solid.to_path(true)), 1);
    }

    #[test]
    fn rounded_square_masks_to_circle() {
        let bounds = Rect::new(0.0, 0.0, 64.0, 64.0);
        let layout = BorderLayout::compute(bounds, &[], true);
        assert_eq!(layout.mask_radius(), Some(32.0));
        assert_eq!(BorderLayout::compute(bounds, &[], false).mask_radius(), None);
    }
}
