// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use image::RgbaImage;
use kurbo::Rect;
use multiborder_fit::{ContentMode, FitError, FitOptions, FittedImage, fit_with};
use peniko::Color;

use crate::border::BorderSlots;
use crate::error::validate_width;
use crate::render::PassResources;
use crate::{BorderLayout, BorderSpec, DEFAULT_BORDER_SLOTS, MultiBorderConfig, ViewError};

/// Inputs that determine a fitted image.
#[derive(Copy, Clone, Debug, PartialEq)]
struct FitKey {
    image_revision: u64,
    mode: ContentMode,
    rect: Rect,
    options: FitOptions,
}

/// Single-entry memo of the last fit, so unchanged redraws skip resampling.
#[derive(Clone, Debug, Default)]
pub(crate) struct FitCache {
    entry: Option<(FitKey, FittedImage)>,
}

impl FitCache {
    fn get_or_fit(
        &mut self,
        key: FitKey,
        image: &RgbaImage,
    ) -> Result<&FittedImage, FitError> {
        let fitted = match self.entry.take() {
            Some((cached, fitted)) if cached == key => fitted,
            _ => fit_with(image, key.mode, key.rect, &key.options)?,
        };
        Ok(&self.entry.insert((key, fitted)).1)
    }

    fn clear(&mut self) {
        self.entry = None;
    }
}

/// An image view with content-mode fitting and concentric borders.
///
/// Slot 1 is the outermost border. Every setter that changes state bumps
/// [`MultiBorderView::revision`] and marks the view as needing display; the
/// host then calls [`MultiBorderView::render`] (or `render_if_needed`).
#[derive(Debug)]
pub struct MultiBorderView {
    bounds: Rect,
    is_rounded: bool,
    content_mode: ContentMode,
    borders: BorderSlots,
    image: Option<RgbaImage>,
    fit_options: FitOptions,

    revision: u64,
    image_revision: u64,
    needs_display: bool,
    pub(crate) fit_cache: FitCache,
    pub(crate) resources: PassResources,
}

impl MultiBorderView {
    /// A view with [`DEFAULT_BORDER_SLOTS`] empty slots, no image, and
    /// [`ContentMode::ScaleToFill`].
    pub fn new(bounds: Rect) -> Self {
        Self::with_slots(bounds, [BorderSpec::NONE; DEFAULT_BORDER_SLOTS].into_iter().collect())
    }

    fn with_slots(bounds: Rect, borders: BorderSlots) -> Self {
        Self {
            bounds: bounds.abs(),
            is_rounded: false,
            content_mode: ContentMode::default(),
            borders,
            image: None,
            fit_options: FitOptions::default(),
            revision: 0,
            image_revision: 0,
            needs_display: true,
            fit_cache: FitCache::default(),
            resources: PassResources::default(),
        }
    }

    /// Build a view from an explicit configuration.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidArgument`] if any border width is negative or not finite.
    pub fn from_config(config: MultiBorderConfig) -> Result<Self, ViewError> {
        for spec in &config.borders {
            validate_width(spec.width)?;
        }
        let mut view = Self::with_slots(config.bounds, config.borders.into_iter().collect());
        view.is_rounded = config.is_rounded;
        view.content_mode = config.content_mode;
        view.fit_options = config.fit;
        Ok(view)
    }

    /// Snapshot of the configuration, without the image.
    pub fn config(&self) -> MultiBorderConfig {
        MultiBorderConfig {
            bounds: self.bounds,
            is_rounded: self.is_rounded,
            content_mode: self.content_mode,
            borders: self.borders.to_vec(),
            fit: self.fit_options,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.needs_display = true;
    }

    fn slot_index(&self, index: usize) -> Result<usize, ViewError> {
        if (1..=self.borders.len()).contains(&index) {
            Ok(index - 1)
        } else {
            Err(ViewError::InvalidIndex {
                index,
                count: self.borders.len(),
            })
        }
    }

    /// Configure border slot `index` (1-based).
    ///
    /// # Errors
    ///
    /// - [`ViewError::InvalidIndex`] if `index` is not in `1..=border_count()`.
    /// - [`ViewError::InvalidArgument`] if `width` is negative or not finite.
    pub fn set_border(
        &mut self,
        index: usize,
        color: Option<Color>,
        width: f64,
    ) -> Result<(), ViewError> {
        let i = self.slot_index(index)?;
        let width = validate_width(width)?;
        let spec = BorderSpec::new(color, width);
        if self.borders[i] != spec {
            self.borders[i] = spec;
            self.touch();
        }
        Ok(())
    }

    /// Set only the color of slot `index`.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidIndex`] if `index` is not in `1..=border_count()`.
    pub fn set_border_color(
        &mut self,
        index: usize,
        color: Option<Color>,
    ) -> Result<(), ViewError> {
        let width = self.border_width_at(index)?;
        self.set_border(index, color, width)
    }

    /// Set only the width of slot `index`.
    ///
    /// # Errors
    ///
    /// As [`MultiBorderView::set_border`].
    pub fn set_border_width(&mut self, index: usize, width: f64) -> Result<(), ViewError> {
        let color = self.border_color_at(index)?;
        self.set_border(index, color, width)
    }

    /// Append an empty-or-configured slot inside the current innermost one.
    ///
    /// Returns the new slot's 1-based index.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidArgument`] if the width is negative or not finite.
    pub fn add_border_slot(&mut self, spec: BorderSpec) -> Result<usize, ViewError> {
        validate_width(spec.width)?;
        self.borders.push(spec);
        self.touch();
        Ok(self.borders.len())
    }

    /// Number of border slots.
    pub fn border_count(&self) -> usize {
        self.borders.len()
    }

    /// All slots, outermost first.
    pub fn borders(&self) -> &[BorderSpec] {
        &self.borders
    }

    /// Slot `index` (1-based).
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidIndex`] if `index` is not in `1..=border_count()`.
    pub fn border(&self, index: usize) -> Result<&BorderSpec, ViewError> {
        let i = self.slot_index(index)?;
        Ok(&self.borders[i])
    }

    /// Color of slot `index` (1-based).
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidIndex`] if `index` is not in `1..=border_count()`.
    pub fn border_color_at(&self, index: usize) -> Result<Option<Color>, ViewError> {
        self.border(index).map(|spec| spec.color)
    }

    /// Width of slot `index` (1-based).
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidIndex`] if `index` is not in `1..=border_count()`.
    pub fn border_width_at(&self, index: usize) -> Result<f64, ViewError> {
        self.border(index).map(|spec| spec.width)
    }

    /// Replace or clear the image.
    pub fn set_image(&mut self, image: Option<RgbaImage>) {
        self.image = image;
        self.image_revision += 1;
        self.fit_cache.clear();
        self.touch();
    }

    /// The current image.
    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    /// Toggle fully rounded shapes.
    pub fn set_rounded(&mut self, rounded: bool) {
        if self.is_rounded != rounded {
            self.is_rounded = rounded;
            self.touch();
        }
    }

    /// Whether shapes are fully rounded.
    pub fn is_rounded(&self) -> bool {
        self.is_rounded
    }

    /// Set the content mode used to fit the image.
    pub fn set_content_mode(&mut self, mode: ContentMode) {
        if self.content_mode != mode {
            self.content_mode = mode;
            self.touch();
        }
    }

    /// The content mode used to fit the image.
    pub fn content_mode(&self) -> ContentMode {
        self.content_mode
    }

    /// Set the resampling options used when fitting.
    pub fn set_fit_options(&mut self, options: FitOptions) {
        if self.fit_options != options {
            self.fit_options = options;
            self.touch();
        }
    }

    /// Set the view bounds. Negative extents are normalized.
    pub fn set_bounds(&mut self, bounds: Rect) {
        let bounds = bounds.abs();
        if self.bounds != bounds {
            self.bounds = bounds;
            self.touch();
        }
    }

    /// The view bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Monotonic counter bumped on every state change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether state changed since the last paint pass.
    pub fn needs_display(&self) -> bool {
        self.needs_display
    }

    /// Request a paint pass without changing state.
    pub fn set_needs_display(&mut self) {
        self.needs_display = true;
    }

    pub(crate) fn mark_displayed(&mut self) {
        self.needs_display = false;
    }

    /// Border geometry for the current state.
    pub fn layout(&self) -> BorderLayout {
        BorderLayout::compute(self.bounds, &self.borders, self.is_rounded)
    }

    /// Area the image is drawn into after all borders.
    pub fn content_rect(&self) -> Rect {
        self.layout().content
    }

    /// Fit the image into `rect`, reusing the previous result when nothing changed.
    ///
    /// Returns `None` when there is no image.
    pub(crate) fn fitted(&mut self, rect: Rect) -> Option<Result<&FittedImage, FitError>> {
        let image = self.image.as_ref()?;
        let key = FitKey {
            image_revision: self.image_revision,
            mode: self.content_mode,
            rect,
            options: self.fit_options,
        };
        Some(self.fit_cache.get_or_fit(key, image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::from_rgba8(255, 0, 0, 255)
    }

    #[test]
    fn defaults_to_four_empty_slots() {
        let view = MultiBorderView::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(view.border_count(), DEFAULT_BORDER_SLOTS);
        assert!(view.borders().iter().all(|b| *b == BorderSpec::NONE));
        assert_eq!(view.content_mode(), ContentMode::ScaleToFill);
        assert!(!view.is_rounded());
        assert!(view.needs_display());
    }

    #[test]
    fn out_of_range_index_leaves_state_unchanged() {
        let mut view = MultiBorderView::new(Rect::ZERO);
        let before = view.revision();

        assert_eq!(
            view.set_border(5, Some(red()), 2.0),
            Err(ViewError::InvalidIndex { index: 5, count: 4 })
        );
        assert_eq!(
            view.set_border(0, Some(red()), 2.0),
            Err(ViewError::InvalidIndex { index: 0, count: 4 })
        );
        assert_eq!(view.revision(), before);
        assert!(view.borders().iter().all(|b| *b == BorderSpec::NONE));
        assert!(view.border_color_at(5).is_err());
        assert!(view.border_width_at(0).is_err());
    }

    #[test]
    fn invalid_widths_are_rejected() {
        let mut view = MultiBorderView::new(Rect::ZERO);
        for width in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                view.set_border(1, Some(red()), width),
                Err(ViewError::InvalidArgument { .. })
            ));
        }
        assert_eq!(view.border_width_at(1), Ok(0.0));
    }

    #[test]
    fn setters_bump_revision_only_on_change() {
        let mut view = MultiBorderView::new(Rect::ZERO);
        view.set_border(1, Some(red()), 2.0).unwrap();
        let rev = view.revision();

        view.set_border(1, Some(red()), 2.0).unwrap();
        view.set_rounded(false);
        view.set_content_mode(ContentMode::ScaleToFill);
        assert_eq!(view.revision(), rev);

        view.set_border_width(1, 3.0).unwrap();
        assert_eq!(view.revision(), rev + 1);
        assert_eq!(view.border_color_at(1), Ok(Some(red())));
    }

    #[test]
    fn individual_setters_keep_the_other_half() {
        let mut view = MultiBorderView::new(Rect::ZERO);
        view.set_border_width(3, 6.0).unwrap();
        view.set_border_color(3, Some(red())).unwrap();
        assert_eq!(view.border(3), Ok(&BorderSpec::solid(red(), 6.0)));
    }

    #[test]
    fn config_round_trips_and_validates() {
        let mut config = MultiBorderConfig {
            bounds: Rect::new(0.0, 0.0, 40.0, 30.0),
            is_rounded: true,
            content_mode: ContentMode::Center,
            ..MultiBorderConfig::default()
        };
        config.borders[0] = BorderSpec::solid(red(), 2.0);

        let view = MultiBorderView::from_config(config.clone()).unwrap();
        assert_eq!(view.config(), config);

        config.borders[1].width = -3.0;
        assert_eq!(
            MultiBorderView::from_config(config).unwrap_err(),
            ViewError::InvalidArgument { width: -3.0 }
        );
    }

    #[test]
    fn added_slots_are_innermost() {
        let mut view = MultiBorderView::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        view.set_border(1, Some(red()), 10.0).unwrap();
        assert_eq!(view.add_border_slot(BorderSpec::solid(red(), 5.0)), Ok(5));
        assert_eq!(view.content_rect(), Rect::new(15.0, 15.0, 85.0, 85.0));
        assert!(view.add_border_slot(BorderSpec::new(None, -1.0)).is_err());
        assert_eq!(view.border_count(), 5);
    }

    #[test]
    fn bounds_are_normalized() {
        let mut view = MultiBorderView::new(Rect::ZERO);
        view.set_bounds(Rect::new(10.0, 10.0, 0.0, 0.0));
        assert_eq!(view.bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
    }
}
