// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multiborder Imaging Reference Backend.
//!
//! [`RefBackend`] implements [`ImagingBackend`] and [`ResourceBackend`] by
//! storing resource descriptors and logging every operation together with
//! the imaging state it was applied under. It does **not** rasterize.
//!
//! The event log is the deterministic draw-command list of a paint pass:
//! tests assert on it to check paint order, clipping, and the pixels that
//! were uploaded for the fitted image.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use multiborder_imaging::{
    BackendId, ClipShape, DrawOp, FillRule, ImageDesc, ImageId, ImagingBackend, ImagingOp,
    LayerOp, PaintDesc, PaintId, PathDesc, PathId, ResourceBackend, StateOp,
};

/// Imaging state as seen by one recorded operation.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSnapshot {
    /// How many layers are pushed.
    pub layer_stack_depth: u32,
    /// Innermost active clip, if any layer on the stack clips.
    pub clip: Option<ClipShape>,
    /// Selected paint, if any.
    pub paint: Option<PaintId>,
    /// Current fill rule.
    pub fill_rule: FillRule,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            layer_stack_depth: 0,
            clip: None,
            paint: None,
            fill_rule: FillRule::NonZero,
        }
    }
}

/// One entry of the recorded trace.
#[derive(Clone, Debug)]
pub enum Event {
    /// A state change together with the state it produced.
    State {
        /// The change.
        op: StateOp,
        /// State after the change.
        state: StateSnapshot,
    },
    /// A draw together with the state it was issued under.
    Draw {
        /// The draw.
        op: DrawOp,
        /// State at the time of the draw.
        state: StateSnapshot,
    },
}

/// Counts of resources that have been created and not yet destroyed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LiveResources {
    /// Live paths.
    pub paths: usize,
    /// Live images.
    pub images: usize,
    /// Live paints.
    pub paints: usize,
}

/// Recording implementation of the imaging backend.
#[derive(Debug)]
pub struct RefBackend {
    id: BackendId,
    paths: Vec<Option<PathDesc>>,
    images: Vec<Option<(ImageDesc, Vec<u8>)>>,
    paints: Vec<Option<PaintDesc>>,

    events: Vec<Event>,
    ops: Vec<ImagingOp>,
    state: StateSnapshot,
    layer_stack: Vec<LayerOp>,
}

impl Default for RefBackend {
    fn default() -> Self {
        Self {
            id: BackendId::next(),
            paths: Vec::new(),
            images: Vec::new(),
            paints: Vec::new(),
            events: Vec::new(),
            ops: Vec::new(),
            state: StateSnapshot::default(),
            layer_stack: Vec::new(),
        }
    }
}

fn next_id(len: usize) -> u32 {
    u32::try_from(len).expect("RefBackend: resource table exceeds u32 ids")
}

impl RefBackend {
    /// The trace, oldest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The trace without state snapshots.
    pub fn ops(&self) -> &[ImagingOp] {
        &self.ops
    }

    /// Draw operations in order, with the state each was issued under.
    pub fn draws(&self) -> impl Iterator<Item = (&DrawOp, &StateSnapshot)> + '_ {
        self.events.iter().filter_map(|event| match event {
            Event::Draw { op, state } => Some((op, state)),
            Event::State { .. } => None,
        })
    }

    /// Forget the trace; live resources stay live.
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.ops.clear();
    }

    /// Descriptor of a live path.
    pub fn path(&self, id: PathId) -> Option<&PathDesc> {
        self.paths.get(id.0 as usize)?.as_ref()
    }

    /// Descriptor and pixels of a live image.
    pub fn image(&self, id: ImageId) -> Option<(&ImageDesc, &[u8])> {
        let (desc, pixels) = self.images.get(id.0 as usize)?.as_ref()?;
        Some((desc, pixels.as_slice()))
    }

    /// Descriptor of a live paint.
    pub fn paint(&self, id: PaintId) -> Option<&PaintDesc> {
        self.paints.get(id.0 as usize)?.as_ref()
    }

    /// Number of resources currently alive.
    pub fn live_resources(&self) -> LiveResources {
        LiveResources {
            paths: self.paths.iter().flatten().count(),
            images: self.images.iter().flatten().count(),
            paints: self.paints.iter().flatten().count(),
        }
    }

    fn sync_layers(&mut self) {
        self.state.layer_stack_depth = next_id(self.layer_stack.len());
        self.state.clip = self
            .layer_stack
            .iter()
            .rev()
            .find_map(|layer| layer.clip.clone());
    }
}

impl ResourceBackend for RefBackend {
    fn backend_id(&self) -> BackendId {
        self.id
    }

    fn create_path(&mut self, desc: PathDesc) -> PathId {
        let id = next_id(self.paths.len());
        self.paths.push(Some(desc));
        PathId(id)
    }

    fn destroy_path(&mut self, id: PathId) {
        if let Some(slot) = self.paths.get_mut(id.0 as usize) {
            *slot = None;
        }
    }

    fn create_image(&mut self, desc: ImageDesc, pixels: &[u8]) -> ImageId {
        let id = next_id(self.images.len());
        self.images.push(Some((desc, pixels.to_vec())));
        ImageId(id)
    }

    fn destroy_image(&mut self, id: ImageId) {
        if let Some(slot) = self.images.get_mut(id.0 as usize) {
            *slot = None;
        }
    }

    fn create_paint(&mut self, desc: PaintDesc) -> PaintId {
        let id = next_id(self.paints.len());
        self.paints.push(Some(desc));
        PaintId(id)
    }

    fn destroy_paint(&mut self, id: PaintId) {
        if let Some(slot) = self.paints.get_mut(id.0 as usize) {
            *slot = None;
        }
    }
}

impl ImagingBackend for RefBackend {
    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::PushLayer(layer) => {
                self.layer_stack.push(layer.clone());
                self.sync_layers();
            }
            StateOp::PopLayer => {
                self.layer_stack.pop();
                self.sync_layers();
            }
            StateOp::SetPaint(id) => self.state.paint = Some(*id),
            StateOp::SetFillRule(rule) => self.state.fill_rule = *rule,
        }

        self.ops.push(ImagingOp::State(op.clone()));
        self.events.push(Event::State {
            op,
            state: self.state.clone(),
        });
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(ImagingOp::Draw(op.clone()));
        self.events.push(Event::Draw {
            op,
            state: self.state.clone(),
        });
    }
}
