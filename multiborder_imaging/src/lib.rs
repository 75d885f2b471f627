// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multiborder Imaging: the drawing surface a multiborder view paints into.
//!
//! This crate defines a compact, plain-old-data imaging vocabulary and the
//! traits a backend implements to consume it. A view never talks to a
//! rasterizer directly: it allocates resources, sets state, and issues draw
//! operations against an [`ImagingBackend`].
//!
//! # Core concepts
//!
//! - **Resources**: opaque handles ([`PathId`], [`ImageId`], [`PaintId`])
//!   whose lifetimes are managed through [`ResourceBackend`].
//! - **Operations**: [`StateOp`] mutates the current paint, fill rule, and
//!   layer stack; [`DrawOp`] produces pixels. Both are collected as
//!   [`ImagingOp`] by recording backends.
//! - **Layers**: clipping is scoped by pushing a [`LayerOp`] and popping it
//!   again; [`ImagingBackendExt::with_clip_shape`] wraps the pair.
//!
//! Geometry is authored with [`kurbo`] and lowered to the `f32` mirrors
//! ([`RectF`], [`RoundedRectF`], [`PathCmd`]) that travel through the IR.
//!
//! ```
//! use multiborder_imaging::{ClipShape, PathDesc, RectF};
//! use kurbo::{BezPath, Rect, Shape};
//!
//! let ring: BezPath = Rect::new(0.0, 0.0, 10.0, 10.0).to_path(0.1);
//! let desc = PathDesc::from_bez_path(&ring);
//! assert!(!desc.commands.is_empty());
//!
//! let clip = ClipShape::rounded_rect(RectF::new(0.0, 0.0, 10.0, 10.0), 5.0);
//! assert!(matches!(clip, ClipShape::RoundedRect(_)));
//! ```

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};
use kurbo::{BezPath, PathEl};
use peniko::Brush;
pub use peniko::{Fill as FillRule, ImageAlphaType, ImageFormat, ImageSampler};

/// Handle to an uploaded path; ring outlines are paths.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathId(pub u32);

/// Handle to an uploaded bitmap.
///
/// Fitted images are uploaded once per paint pass and stay valid until the owner
/// destroys them.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Handle to an uploaded paint; each border color becomes one.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PaintId(pub u32);

/// Identity of a backend instance, which scopes every resource handle it issues.
///
/// Handles from one backend mean nothing to another; a resource owner keeps
/// the issuing `BackendId` next to its handles and only destroys them there.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BackendId(pub u64);

impl BackendId {
    /// A process-unique id for a newly constructed backend.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "the IR carries f32 geometry; view coordinates fit comfortably"
)]
fn narrow(v: f64) -> f32 {
    v as f32
}

/// Rectangle as carried by the IR, in `f32` view-local units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectF {
    /// Left edge.
    pub x0: f32,
    /// Top edge.
    pub y0: f32,
    /// Right edge.
    pub x1: f32,
    /// Bottom edge.
    pub y1: f32,
}

impl RectF {
    /// Rectangle spanning `(x0, y0)` to `(x1, y1)`.
    #[inline]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Lower a kurbo rectangle into the IR.
    #[inline]
    pub fn from_kurbo(rect: kurbo::Rect) -> Self {
        Self::new(
            narrow(rect.x0),
            narrow(rect.y0),
            narrow(rect.x1),
            narrow(rect.y1),
        )
    }
}

impl From<kurbo::Rect> for RectF {
    #[inline]
    fn from(rect: kurbo::Rect) -> Self {
        Self::from_kurbo(rect)
    }
}

/// An axis-aligned rectangle with one radius shared by all four corners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoundedRectF {
    /// Outer bounds.
    pub rect: RectF,
    /// Corner radius.
    pub radius: f32,
}

impl RoundedRectF {
    /// Create a rounded rectangle.
    #[inline]
    pub const fn new(rect: RectF, radius: f32) -> Self {
        Self { rect, radius }
    }
}

/// Clip shape carried by a [`LayerOp`].
#[derive(Clone, Debug, PartialEq)]
pub enum ClipShape {
    /// Square-cornered clip.
    Rect(RectF),
    /// Clip with every corner rounded by the same radius.
    RoundedRect(RoundedRectF),
}

impl ClipShape {
    /// Create a rectangular clip.
    #[inline]
    pub fn rect(rect: RectF) -> Self {
        Self::Rect(rect)
    }

    /// Create a rounded-rect clip with one radius on all corners.
    #[inline]
    pub fn rounded_rect(rect: RectF, radius: f32) -> Self {
        Self::RoundedRect(RoundedRectF::new(rect, radius))
    }
}

/// Parameters for a pushed layer.
///
/// A layer with a clip restricts every draw issued until the matching
/// [`StateOp::PopLayer`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayerOp {
    /// Optional clip applied to the layer's contents.
    pub clip: Option<ClipShape>,
}

impl LayerOp {
    /// A layer that only clips.
    #[inline]
    pub fn clip(shape: ClipShape) -> Self {
        Self { clip: Some(shape) }
    }
}

/// Changes to the imaging state that apply to later draws.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Push a layer; must be matched by [`StateOp::PopLayer`].
    PushLayer(LayerOp),
    /// End the innermost layer.
    PopLayer,
    /// Select the paint used by subsequent fills.
    SetPaint(PaintId),
    /// Set the fill rule used by [`DrawOp::FillPath`].
    ///
    /// The default is [`FillRule::NonZero`]. Border rings rely on
    /// [`FillRule::EvenOdd`] to leave their inner shape unpainted.
    SetFillRule(FillRule),
}

/// Operations that put pixels on the surface under the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill a path using the selected paint and fill rule.
    FillPath(PathId),
    /// Draw an image mapped to a destination rect.
    ///
    /// `src` is in image pixel coordinates and defaults to the full image;
    /// `dst` is in local coordinates.
    DrawImageRect {
        /// Bitmap to draw.
        image: ImageId,
        /// Sub-rectangle of the bitmap in pixels; `None` draws all of it.
        src: Option<RectF>,
        /// Where the bitmap lands in view-local units.
        dst: RectF,
        /// Filtering and extend behavior.
        sampler: ImageSampler,
    },
}

/// Path command in f32 coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathCmd {
    /// Start a new subpath.
    MoveTo {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },
    /// Straight segment to a point.
    LineTo {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },
    /// Quadratic Bézier segment.
    QuadTo {
        /// Control point X.
        x1: f32,
        /// Control point Y.
        y1: f32,
        /// End point X.
        x: f32,
        /// End point Y.
        y: f32,
    },
    /// Cubic Bézier segment.
    CurveTo {
        /// First control point X.
        x1: f32,
        /// First control point Y.
        y1: f32,
        /// Second control point X.
        x2: f32,
        /// Second control point Y.
        y2: f32,
        /// End point X.
        x: f32,
        /// End point Y.
        y: f32,
    },
    /// Close back to the subpath start.
    Close,
}

/// Geometry uploaded by [`ResourceBackend::create_path`].
#[derive(Clone, Debug, PartialEq)]
pub struct PathDesc {
    /// Commands in drawing order.
    pub commands: Box<[PathCmd]>,
}

impl PathDesc {
    /// Lower a kurbo path into path commands.
    pub fn from_bez_path(path: &BezPath) -> Self {
        let commands: Vec<PathCmd> = path
            .elements()
            .iter()
            .map(|el| match *el {
                PathEl::MoveTo(p) => PathCmd::MoveTo {
                    x: narrow(p.x),
                    y: narrow(p.y),
                },
                PathEl::LineTo(p) => PathCmd::LineTo {
                    x: narrow(p.x),
                    y: narrow(p.y),
                },
                PathEl::QuadTo(c, p) => PathCmd::QuadTo {
                    x1: narrow(c.x),
                    y1: narrow(c.y),
                    x: narrow(p.x),
                    y: narrow(p.y),
                },
                PathEl::CurveTo(c1, c2, p) => PathCmd::CurveTo {
                    x1: narrow(c1.x),
                    y1: narrow(c1.y),
                    x2: narrow(c2.x),
                    y2: narrow(c2.y),
                    x: narrow(p.x),
                    y: narrow(p.y),
                },
                PathEl::ClosePath => PathCmd::Close,
            })
            .collect();
        Self {
            commands: commands.into_boxed_slice(),
        }
    }

    /// Number of subpaths (one per `MoveTo`).
    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, PathCmd::MoveTo { .. }))
            .count()
    }
}

/// Layout of a bitmap uploaded by [`ResourceBackend::create_image`].
#[derive(Clone, Debug, PartialEq)]
pub struct ImageDesc {
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
    /// Channel layout.
    pub format: ImageFormat,
    /// Alpha encoding of the pixels.
    pub alpha_type: ImageAlphaType,
}

impl ImageDesc {
    /// Straight-alpha RGBA8 image of the given size.
    #[inline]
    pub fn rgba8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
        }
    }
}

/// Paint uploaded by [`ResourceBackend::create_paint`].
#[derive(Clone, Debug)]
pub struct PaintDesc {
    /// What fills are painted with.
    pub brush: Brush,
}

/// Creation and destruction of backend resources.
///
/// IDs must keep referring to the same resource until the matching
/// `destroy_*` call. Destroying an unknown or already destroyed ID is a no-op.
pub trait ResourceBackend {
    /// Identity of this backend; distinct live backends report distinct ids.
    fn backend_id(&self) -> BackendId;

    /// Upload a path.
    fn create_path(&mut self, desc: PathDesc) -> PathId;
    /// Release a path.
    fn destroy_path(&mut self, id: PathId);

    /// Create an image resource from tightly packed, row-major pixels.
    fn create_image(&mut self, desc: ImageDesc, pixels: &[u8]) -> ImageId;
    /// Release an image.
    fn destroy_image(&mut self, id: ImageId);

    /// Upload a paint.
    fn create_paint(&mut self, desc: PaintDesc) -> PaintId;
    /// Release a paint.
    fn destroy_paint(&mut self, id: PaintId);
}

/// Either kind of operation, in the order a backend received it.
#[derive(Clone, Debug, PartialEq)]
pub enum ImagingOp {
    /// A [`StateOp`].
    State(StateOp),
    /// A [`DrawOp`].
    Draw(DrawOp),
}

/// Consumer of the operations a paint pass emits.
pub trait ImagingBackend: ResourceBackend {
    /// Update the current state.
    fn state(&mut self, op: StateOp);

    /// Draw under the current state.
    fn draw(&mut self, op: DrawOp);

    /// Push a layer. Equivalent to `self.state(StateOp::PushLayer(op))`.
    #[inline]
    fn layer_push(&mut self, op: LayerOp) {
        self.state(StateOp::PushLayer(op));
    }

    /// Pop the innermost layer. Equivalent to `self.state(StateOp::PopLayer)`.
    #[inline]
    fn layer_pop(&mut self) {
        self.state(StateOp::PopLayer);
    }
}

/// Closure-based helpers layered on top of [`ImagingBackend`].
pub trait ImagingBackendExt: ImagingBackend {
    /// Bracket `f` with a push of `op` and the matching pop.
    ///
    /// The pop is skipped if `f` panics.
    #[inline]
    fn with_layer<R>(&mut self, op: LayerOp, f: impl FnOnce(&mut Self) -> R) -> R {
        self.layer_push(op);
        let out = f(self);
        self.layer_pop();
        out
    }

    /// Run `f` inside a layer clipped to `shape`.
    #[inline]
    fn with_clip_shape<R>(&mut self, shape: ClipShape, f: impl FnOnce(&mut Self) -> R) -> R {
        self.with_layer(LayerOp::clip(shape), f)
    }
}

impl<B: ImagingBackend + ?Sized> ImagingBackendExt for B {}
