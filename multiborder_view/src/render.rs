// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lowering a view into imaging operations.
//!
//! Every pass emits the same shape of op stream:
//!
//! ```text
//! SetFillRule(EvenOdd)
//! (SetPaint, FillPath)*            one pair per ring, outermost first
//! PushLayer(clip) DrawImageRect PopLayer   when an image is drawn
//! ```

use kurbo::Rect;
use multiborder_imaging::{
    BackendId, ClipShape, DrawOp, FillRule, ImageDesc, ImageId, ImageSampler, ImagingBackend,
    ImagingBackendExt, PaintDesc, PaintId, PathDesc, PathId, RectF, ResourceBackend, StateOp,
};
use peniko::Brush;

use crate::layout::full_radius;
use crate::{MultiBorderView, Ring};

/// Handles created on one backend.
#[derive(Debug, Default)]
struct Handles {
    paths: Vec<PathId>,
    paints: Vec<PaintId>,
    images: Vec<ImageId>,
}

/// Backend resources created by the last pass on each backend, owned by the
/// view until that backend is painted again or released.
#[derive(Debug, Default)]
pub(crate) struct PassResources {
    owned: Vec<(BackendId, Handles)>,
}

impl PassResources {
    /// Destroy the handles `backend` issued; handles of other backends are kept.
    fn release<B: ResourceBackend + ?Sized>(&mut self, backend: &mut B) {
        let owner = backend.backend_id();
        let Some(at) = self.owned.iter().position(|(id, _)| *id == owner) else {
            return;
        };
        let (_, handles) = self.owned.swap_remove(at);
        for id in handles.paths {
            backend.destroy_path(id);
        }
        for id in handles.paints {
            backend.destroy_paint(id);
        }
        for id in handles.images {
            backend.destroy_image(id);
        }
    }

    fn record(&mut self, owner: BackendId) -> &mut Handles {
        let at = match self.owned.iter().position(|(id, _)| *id == owner) {
            Some(at) => at,
            None => {
                self.owned.push((owner, Handles::default()));
                self.owned.len() - 1
            }
        };
        &mut self.owned[at].1
    }

    /// Number of backends that still hold resources of this view.
    pub(crate) fn backend_count(&self) -> usize {
        self.owned.len()
    }
}

/// Summary of one paint pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPass {
    /// Rings painted, outermost first.
    pub rings: Vec<Ring>,
    /// Content area after all borders.
    pub content: Rect,
    /// Corner radius of the content clip when rounded.
    pub mask_radius: Option<f64>,
    /// Destination of the drawn image, or `None` if no image was drawn.
    pub image: Option<Rect>,
}

impl MultiBorderView {
    /// Paint the view into `backend`.
    ///
    /// Resources the previous pass on this same backend created are destroyed
    /// first. Resources held on other backends stay alive until that backend is
    /// painted again or passed to [`MultiBorderView::release_resources`].
    ///
    /// A failure to fit the image is logged and the image is skipped; the
    /// borders are still painted.
    pub fn render<B: ImagingBackend + ?Sized>(&mut self, backend: &mut B) -> RenderPass {
        self.resources.release(backend);
        let owner = backend.backend_id();

        let layout = self.layout();
        backend.state(StateOp::SetFillRule(FillRule::EvenOdd));

        for ring in &layout.rings {
            log::trace!(
                "ring {} {:?} -> {:?} ({:?})",
                ring.slot,
                ring.outer,
                ring.inner,
                ring.color
            );
            let paint = backend.create_paint(PaintDesc {
                brush: Brush::Solid(ring.color),
            });
            let outline = ring.to_path(layout.rounded);
            let path = backend.create_path(PathDesc::from_bez_path(&outline));
            let handles = self.resources.record(owner);
            handles.paints.push(paint);
            handles.paths.push(path);
            backend.state(StateOp::SetPaint(paint));
            backend.draw(DrawOp::FillPath(path));
        }

        let content = layout.content;
        let mut drawn = None;
        if layout.content_is_empty() {
            if self.image().is_some() || !layout.rings.is_empty() {
                log::warn!(
                    "borders consume the whole view {:?}; no content area left",
                    layout.bounds
                );
            }
        } else {
            drawn = self.draw_image(backend, content, layout.rounded);
        }

        self.mark_displayed();
        log::debug!(
            "rendered {} ring(s), content {:?}, image {}",
            layout.rings.len(),
            content,
            if drawn.is_some() { "drawn" } else { "skipped" }
        );

        RenderPass {
            mask_radius: layout.mask_radius(),
            rings: layout.rings.into_vec(),
            content,
            image: drawn,
        }
    }

    /// Paint only if state changed since the last pass.
    pub fn render_if_needed<B: ImagingBackend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> Option<RenderPass> {
        self.needs_display().then(|| self.render(backend))
    }

    /// Destroy every resource the last pass on `backend` created.
    ///
    /// Call this before dropping a backend the view has painted into.
    pub fn release_resources<B: ResourceBackend + ?Sized>(&mut self, backend: &mut B) {
        self.resources.release(backend);
    }

    /// Number of backends that still hold resources created by this view.
    pub fn backends_with_resources(&self) -> usize {
        self.resources.backend_count()
    }

    fn draw_image<B: ImagingBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        content: Rect,
        rounded: bool,
    ) -> Option<Rect> {
        let (id, dst) = match self.fitted(content)? {
            Ok(fitted) => {
                let (width, height) = fitted.pixel_size();
                let desc = ImageDesc::rgba8(width, height);
                let id = backend.create_image(desc, fitted.image.as_raw());
                (id, fitted.dst)
            }
            Err(err) => {
                log::warn!("skipping image: {err}");
                return None;
            }
        };
        self.resources.record(backend.backend_id()).images.push(id);

        let clip = if rounded {
            ClipShape::rounded_rect(RectF::from(content), narrow_radius(full_radius(content)))
        } else {
            ClipShape::rect(RectF::from(content))
        };
        backend.with_clip_shape(clip, |b| {
            b.draw(DrawOp::DrawImageRect {
                image: id,
                src: None,
                dst: RectF::from(dst),
                sampler: ImageSampler::default(),
            });
        });
        Some(dst)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "radii are bounded by view geometry, which is stored as f32 in the imaging IR"
)]
fn narrow_radius(radius: f64) -> f32 {
    radius as f32
}
