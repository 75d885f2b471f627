// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use image::RgbaImage;
use image::imageops::{self, FilterType};
use kurbo::{Point, Rect, Size};

use crate::{Anchor, ContentMode, FitError};

/// Slack subtracted before rounding extents up, so that exact products such
/// as `200.0 * 0.5` are not pushed to the next pixel by float noise.
const EXTENT_EPSILON: f64 = 1e-6;

/// Tunables for [`fit_with`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FitOptions {
    /// Resampling filter used by the scaling modes.
    pub filter: FilterType,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            filter: FilterType::Triangle,
        }
    }
}

/// An image prepared for direct placement.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedImage {
    /// Pixels to draw.
    pub image: RgbaImage,
    /// Where to draw them, in the coordinate space of the target rectangle.
    pub dst: Rect,
}

impl FittedImage {
    /// Pixel dimensions of the fitted image.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is clamped to [0, u32::MAX] before casting"
)]
fn pixel_extent(len: f64) -> u32 {
    let px = (len - EXTENT_EPSILON).ceil();
    px.clamp(0.0, f64::from(u32::MAX)) as u32
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "offsets are bounded by pixel extents, which fit in u32"
)]
fn anchored_offset(room: f64, anchor: f64) -> i64 {
    (room * anchor).floor() as i64
}

/// Fit `image` into `rect` according to `mode`, using default options.
///
/// See [`fit_with`].
pub fn fit(image: &RgbaImage, mode: ContentMode, rect: Rect) -> Result<FittedImage, FitError> {
    fit_with(image, mode, rect, &FitOptions::default())
}

/// Fit `image` into `rect` according to `mode`.
///
/// The target pixel size is the rectangle's size rounded up. Every mode
/// except [`ContentMode::ScaleAspectFit`] returns exactly that many pixels:
///
/// - `ScaleToFill` / `Redraw` stretch non-uniformly; `dst == rect`.
/// - `ScaleAspectFill` scales uniformly to cover, then crops the overflow
///   around the center; `dst == rect`.
/// - The anchored modes keep the intrinsic size and copy the image onto a
///   transparent canvas at the anchor, cropping or padding as needed. `dst`
///   is the canvas size at the origin of `rect`, so pixels map 1:1; on a
///   fractional `rect` it overhangs the trailing edges by less than a pixel.
///
/// `ScaleAspectFit` scales uniformly to fit and returns only the scaled
/// pixels. `dst` is the exact scaled size, never larger than `rect`,
/// centered in it with floored offsets (letterboxing is left to the caller).
///
/// A zero-area `rect` yields an empty image placed at `rect`.
///
/// # Errors
///
/// - [`FitError::InvalidInput`] if the image has a zero dimension.
/// - [`FitError::InvalidRect`] if `rect` has a negative or non-finite size.
pub fn fit_with(
    image: &RgbaImage,
    mode: ContentMode,
    rect: Rect,
    options: &FitOptions,
) -> Result<FittedImage, FitError> {
    let (iw, ih) = image.dimensions();
    if iw == 0 || ih == 0 {
        return Err(FitError::InvalidInput {
            width: iw,
            height: ih,
        });
    }
    let (rw, rh) = (rect.width(), rect.height());
    if !rw.is_finite() || !rh.is_finite() || rw < 0.0 || rh < 0.0 {
        return Err(FitError::InvalidRect {
            width: rw,
            height: rh,
        });
    }

    let (tw, th) = (pixel_extent(rw), pixel_extent(rh));
    if tw == 0 || th == 0 {
        return Ok(FittedImage {
            image: RgbaImage::new(tw, th),
            dst: rect,
        });
    }

    let fitted = match mode {
        ContentMode::ScaleToFill | ContentMode::Redraw => FittedImage {
            image: imageops::resize(image, tw, th, options.filter),
            dst: rect,
        },
        ContentMode::ScaleAspectFit => aspect_fit(image, rect, (tw, th), options.filter),
        ContentMode::ScaleAspectFill => FittedImage {
            image: aspect_fill(image, (tw, th), options.filter),
            dst: rect,
        },
        anchored => {
            let anchor = anchored.anchor().unwrap_or(Anchor::CENTER);
            FittedImage {
                image: align(image, (tw, th), anchor),
                dst: Rect::from_origin_size(
                    rect.origin(),
                    Size::new(f64::from(tw), f64::from(th)),
                ),
            }
        }
    };
    Ok(fitted)
}

fn aspect_fit(
    image: &RgbaImage,
    rect: Rect,
    target: (u32, u32),
    filter: FilterType,
) -> FittedImage {
    let (iw, ih) = image.dimensions();
    let (iw, ih) = (f64::from(iw), f64::from(ih));
    let scale = (rect.width() / iw).min(rect.height() / ih);
    let fw = pixel_extent(iw * scale).clamp(1, target.0);
    let fh = pixel_extent(ih * scale).clamp(1, target.1);

    // Pixels round up; the placement keeps the exact scaled size.
    let size = Size::new(
        (iw * scale).min(rect.width()),
        (ih * scale).min(rect.height()),
    );
    let dx = ((rect.width() - size.width) / 2.0).floor().max(0.0);
    let dy = ((rect.height() - size.height) / 2.0).floor().max(0.0);
    FittedImage {
        image: imageops::resize(image, fw, fh, filter),
        dst: Rect::from_origin_size(Point::new(rect.x0 + dx, rect.y0 + dy), size),
    }
}

fn aspect_fill(image: &RgbaImage, (tw, th): (u32, u32), filter: FilterType) -> RgbaImage {
    let (iw, ih) = image.dimensions();
    let (iw, ih) = (f64::from(iw), f64::from(ih));
    let scale = (f64::from(tw) / iw).max(f64::from(th) / ih);
    let sw = pixel_extent(iw * scale).max(tw);
    let sh = pixel_extent(ih * scale).max(th);

    let scaled = imageops::resize(image, sw, sh, filter);
    // Overflow is confined to one axis up to rounding; crop it evenly.
    let x = (sw - tw) / 2;
    let y = (sh - th) / 2;
    imageops::crop_imm(&scaled, x, y, tw, th).to_image()
}

fn align(image: &RgbaImage, (tw, th): (u32, u32), anchor: Anchor) -> RgbaImage {
    let (iw, ih) = image.dimensions();
    let dx = anchored_offset(f64::from(tw) - f64::from(iw), anchor.x);
    let dy = anchored_offset(f64::from(th) - f64::from(ih), anchor.y);

    let mut canvas = RgbaImage::new(tw, th);
    imageops::replace(&mut canvas, image, dx, dy);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn solid(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(width, height, color)
    }

    /// Left half red, right half blue.
    fn split(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, _| if x < width / 2 { RED } else { BLUE })
    }

    /// One distinct color per quadrant, so crops are easy to identify.
    fn quadrants(side: u32) -> RgbaImage {
        RgbaImage::from_fn(side, side, |x, y| {
            let left = x < side / 2;
            let top = y < side / 2;
            match (left, top) {
                (true, true) => Rgba([1, 0, 0, 255]),
                (false, true) => Rgba([2, 0, 0, 255]),
                (true, false) => Rgba([3, 0, 0, 255]),
                (false, false) => Rgba([4, 0, 0, 255]),
            }
        })
    }

    fn square(side: f64) -> Rect {
        Rect::new(0.0, 0.0, side, side)
    }

    #[test]
    fn aspect_fit_letterboxes_wide_image() {
        let fitted = fit(&split(200, 100), ContentMode::ScaleAspectFit, square(100.0)).unwrap();

        assert_eq!(fitted.pixel_size(), (100, 50));
        assert_eq!(fitted.dst, Rect::new(0.0, 25.0, 100.0, 75.0));
    }

    #[test]
    fn aspect_fit_offsets_follow_rect_origin() {
        let rect = Rect::new(10.0, 20.0, 110.0, 120.0);
        let fitted = fit(&solid(50, 100, RED), ContentMode::ScaleAspectFit, rect).unwrap();

        assert_eq!(fitted.pixel_size(), (50, 100));
        assert_eq!(fitted.dst, Rect::new(35.0, 20.0, 85.0, 120.0));
    }

    #[test]
    fn filling_modes_match_rect_exactly() {
        let rects = [
            Rect::new(0.0, 0.0, 100.0, 40.0),
            Rect::new(0.0, 0.0, 30.0, 90.0),
            Rect::new(5.0, 5.0, 17.0, 17.0),
        ];
        let images = [solid(200, 100, RED), solid(10, 70, BLUE), solid(3, 3, RED)];
        for rect in rects {
            for image in &images {
                for mode in [
                    ContentMode::ScaleToFill,
                    ContentMode::ScaleAspectFill,
                    ContentMode::Redraw,
                ] {
                    let fitted = fit(image, mode, rect).unwrap();
                    assert_eq!(fitted.dst, rect, "{mode} into {rect:?}");
                    assert_eq!(
                        fitted.pixel_size(),
                        (pixel_extent(rect.width()), pixel_extent(rect.height())),
                        "{mode} into {rect:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn aspect_fit_stays_inside_and_centered() {
        let rects = [
            Rect::new(0.0, 0.0, 120.0, 80.0),
            Rect::new(0.0, 0.0, 10.5, 10.5),
            Rect::new(2.25, 1.5, 40.75, 19.25),
        ];
        for rect in rects {
            for (w, h) in [(200, 100), (10, 70), (3, 3), (80, 120), (20, 10)] {
                let fitted = fit(&solid(w, h, RED), ContentMode::ScaleAspectFit, rect).unwrap();
                let dst = fitted.dst;
                assert_eq!(rect.union(dst), rect, "{w}x{h} into {rect:?} -> {dst:?}");

                let left = dst.x0 - rect.x0;
                let right = rect.x1 - dst.x1;
                let top = dst.y0 - rect.y0;
                let bottom = rect.y1 - dst.y1;
                assert!((left - right).abs() <= 1.0, "{w}x{h} -> {dst:?}");
                assert!((top - bottom).abs() <= 1.0, "{w}x{h} -> {dst:?}");
                // One axis is always flush.
                assert!(left == 0.0 || top == 0.0, "{w}x{h} -> {dst:?}");
            }
        }
    }

    #[test]
    fn aspect_fit_on_fractional_rect_keeps_exact_size() {
        let rect = Rect::new(0.0, 0.0, 10.5, 10.5);
        let fitted = fit(&solid(20, 10, RED), ContentMode::ScaleAspectFit, rect).unwrap();

        assert_eq!(fitted.pixel_size(), (11, 6));
        assert_eq!(fitted.dst.x0, 0.0);
        assert_eq!(fitted.dst.width(), 10.5);
        assert!((fitted.dst.height() - 5.25).abs() < 1e-9, "{:?}", fitted.dst);
        assert_eq!(fitted.dst.y0, 2.0);
    }

    #[test]
    fn anchored_modes_map_pixels_one_to_one() {
        let rect = Rect::new(3.0, 4.0, 13.5, 9.25);
        for mode in ContentMode::ALL.into_iter().filter(|m| !m.scales()) {
            let fitted = fit(&solid(4, 4, RED), mode, rect).unwrap();
            let (pw, ph) = fitted.pixel_size();
            assert_eq!((pw, ph), (11, 6), "{mode}");
            assert_eq!(
                fitted.dst,
                Rect::new(3.0, 4.0, 14.0, 10.0),
                "{mode} keeps the canvas size"
            );
        }
    }

    #[test]
    fn aspect_fill_crops_around_center() {
        let fitted = fit(&split(200, 100), ContentMode::ScaleAspectFill, square(100.0)).unwrap();

        assert_eq!(fitted.pixel_size(), (100, 100));
        assert_eq!(*fitted.image.get_pixel(0, 50), RED);
        assert_eq!(*fitted.image.get_pixel(99, 50), BLUE);
    }

    #[test]
    fn anchored_modes_crop_at_their_anchor() {
        let image = quadrants(4);
        let rect = square(2.0);
        let expect = [
            (ContentMode::TopLeft, 1),
            (ContentMode::TopRight, 2),
            (ContentMode::BottomLeft, 3),
            (ContentMode::BottomRight, 4),
        ];
        for (mode, red) in expect {
            let fitted = fit(&image, mode, rect).unwrap();
            assert_eq!(fitted.pixel_size(), (2, 2));
            assert!(
                fitted.image.pixels().all(|p| p.0[0] == red),
                "{mode} picked the wrong quadrant"
            );
        }

        let centered = fit(&image, ContentMode::Center, rect).unwrap();
        assert_eq!(centered.image.get_pixel(0, 0).0[0], 1);
        assert_eq!(centered.image.get_pixel(1, 1).0[0], 4);
    }

    #[test]
    fn anchored_modes_pad_small_images() {
        let image = solid(2, 2, RED);
        let rect = square(4.0);

        let centered = fit(&image, ContentMode::Center, rect).unwrap();
        assert_eq!(centered.pixel_size(), (4, 4));
        assert_eq!(centered.dst, rect);
        assert_eq!(*centered.image.get_pixel(0, 0), CLEAR);
        assert_eq!(*centered.image.get_pixel(1, 1), RED);
        assert_eq!(*centered.image.get_pixel(2, 2), RED);
        assert_eq!(*centered.image.get_pixel(3, 3), CLEAR);

        let top = fit(&image, ContentMode::Top, rect).unwrap();
        assert_eq!(*top.image.get_pixel(1, 0), RED);
        assert_eq!(*top.image.get_pixel(1, 2), CLEAR);

        let right = fit(&image, ContentMode::Right, rect).unwrap();
        assert_eq!(*right.image.get_pixel(3, 1), RED);
        assert_eq!(*right.image.get_pixel(1, 1), CLEAR);
    }

    #[test]
    fn fit_is_idempotent() {
        let image = split(37, 23);
        let rect = Rect::new(0.5, 0.5, 60.25, 33.75);
        for mode in ContentMode::ALL {
            let a = fit(&image, mode, rect).unwrap();
            let b = fit(&image, mode, rect).unwrap();
            assert_eq!(a, b, "{mode}");
        }
    }

    #[test]
    fn fractional_rects_round_extents_up() {
        let rect = Rect::new(0.0, 0.0, 10.2, 4.7);
        let fitted = fit(&solid(5, 5, RED), ContentMode::ScaleToFill, rect).unwrap();
        assert_eq!(fitted.pixel_size(), (11, 5));
    }

    #[test]
    fn zero_area_rect_yields_empty_image() {
        let rect = Rect::new(4.0, 4.0, 4.0, 20.0);
        for mode in ContentMode::ALL {
            let fitted = fit(&solid(8, 8, RED), mode, rect).unwrap();
            assert_eq!(fitted.pixel_size().0, 0, "{mode}");
            assert_eq!(fitted.dst, rect, "{mode}");
        }
    }

    #[test]
    fn rejects_empty_image_and_negative_rect() {
        assert_eq!(
            fit(&RgbaImage::new(0, 4), ContentMode::Center, square(4.0)),
            Err(FitError::InvalidInput {
                width: 0,
                height: 4
            })
        );
        assert!(matches!(
            fit(
                &solid(1, 1, RED),
                ContentMode::Center,
                Rect::new(10.0, 0.0, 0.0, 5.0)
            ),
            Err(FitError::InvalidRect { .. })
        ));
        assert!(matches!(
            fit(
                &solid(1, 1, RED),
                ContentMode::Center,
                Rect::new(0.0, 0.0, f64::INFINITY, 5.0)
            ),
            Err(FitError::InvalidRect { .. })
        ));
    }
}
