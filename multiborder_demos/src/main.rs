// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render a multi-border view into the reference backend and log the op stream.
//!
//! Usage: `multiborder_demos [content-mode] [--rounded]`
//!
//! The content mode accepts any spelling `ContentMode` parses, such as
//! `scale_aspect_fit`, `ScaleAspectFill`, `topLeft` or a raw value like `4`.
//! Set `RUST_LOG=multiborder_view=trace` to see every ring as it is painted.

mod logging;

use std::env;
use std::process::ExitCode;

use image::{Rgba, RgbaImage};
use kurbo::Rect;
use multiborder_fit::ContentMode;
use multiborder_imaging::{DrawOp, ImagingOp, StateOp};
use multiborder_imaging_ref::RefBackend;
use multiborder_view::{BorderSpec, MultiBorderConfig, MultiBorderView};
use peniko::Color;

/// A gradient with a dark diagonal, so crops and scales are visible.
fn make_photo(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if x * height / width == y {
            return Rgba([20, 20, 20, 255]);
        }
        let r = u8::try_from(x * 255 / width.max(1)).unwrap_or(u8::MAX);
        let g = u8::try_from(y * 255 / height.max(1)).unwrap_or(u8::MAX);
        Rgba([r, g, 160, 255])
    })
}

fn demo_config(content_mode: ContentMode, rounded: bool) -> MultiBorderConfig {
    MultiBorderConfig {
        bounds: Rect::new(0.0, 0.0, 160.0, 120.0),
        is_rounded: rounded,
        content_mode,
        borders: vec![
            BorderSpec::solid(Color::from_rgba8(200, 30, 30, 255), 4.0),
            BorderSpec::NONE,
            BorderSpec::solid(Color::from_rgba8(250, 250, 250, 255), 6.0),
            BorderSpec::solid(Color::from_rgba8(30, 30, 200, 255), 2.0),
        ],
        ..MultiBorderConfig::default()
    }
}

fn describe(op: &ImagingOp) -> String {
    match op {
        ImagingOp::State(StateOp::PushLayer(layer)) => format!("push layer {:?}", layer.clip),
        ImagingOp::State(StateOp::PopLayer) => "pop layer".to_owned(),
        ImagingOp::State(StateOp::SetPaint(id)) => format!("set paint {}", id.0),
        ImagingOp::State(StateOp::SetFillRule(rule)) => format!("set fill rule {rule:?}"),
        ImagingOp::Draw(DrawOp::FillPath(id)) => format!("fill path {}", id.0),
        ImagingOp::Draw(DrawOp::DrawImageRect { image, dst, .. }) => {
            format!("draw image {} at {dst:?}", image.0)
        }
    }
}

fn main() -> ExitCode {
    logging::init_logging(None);

    let mut content_mode = ContentMode::ScaleAspectFit;
    let mut rounded = false;
    for arg in env::args().skip(1) {
        if arg == "--rounded" {
            rounded = true;
            continue;
        }
        match arg.parse::<ContentMode>() {
            Ok(mode) => content_mode = mode,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        }
    }

    let mut view = match MultiBorderView::from_config(demo_config(content_mode, rounded)) {
        Ok(view) => view,
        Err(err) => {
            log::error!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    view.set_image(Some(make_photo(96, 64)));

    let mut backend = RefBackend::default();
    let pass = view.render(&mut backend);

    log::info!(
        "{content_mode} (rounded: {rounded}): {} ring(s), content {:?}, image at {:?}",
        pass.rings.len(),
        pass.content,
        pass.image
    );
    for (i, op) in backend.ops().iter().enumerate() {
        log::info!("{i:>3}: {}", describe(op));
    }

    view.release_resources(&mut backend);
    log::debug!("live after release: {:?}", backend.live_resources());
    ExitCode::SUCCESS
}
