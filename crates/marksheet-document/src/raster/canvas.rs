// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canvas rasterizer: paints a template's layers into an RGBA image using the
// `image` and `imageproc` crates.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use marksheet_core::error::{MarksheetError, Result};
use tracing::{debug, instrument, warn};

use crate::raster::{RasterImage, Rasterizer};
use crate::template::{Layer, Rect, TemplateHandle};

/// Software rasterizer for [`TemplateHandle`]s.
///
/// Coordinates are multiplied by the capture scale and rounded to whole device
/// pixels; bitmaps are resampled with Catmull-Rom filtering.
#[derive(Debug, Clone, Default)]
pub struct CanvasRasterizer;

impl CanvasRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for CanvasRasterizer {
    #[instrument(skip_all, fields(template = %template.id(), scale = scale))]
    fn capture(&self, template: &TemplateHandle, scale: f32) -> Result<RasterImage> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(MarksheetError::Render(format!(
                "invalid capture scale {}",
                scale
            )));
        }

        // Reading back any cross-origin pixels poisons the whole canvas.
        if let Some(source) = template.tainted_source() {
            warn!(source, "template holds unreadable cross-origin content");
            return Err(MarksheetError::TaintedCanvas(source.to_owned()));
        }

        let width = scale_len(template.width(), scale);
        let height = scale_len(template.height(), scale);
        if width == 0 || height == 0 {
            return Err(MarksheetError::Render(format!(
                "template {} has no area ({}x{})",
                template.id(),
                template.width(),
                template.height()
            )));
        }

        let mut canvas = RgbaImage::from_pixel(width, height, template.background());
        for layer in template.layers() {
            paint(&mut canvas, layer, scale)?;
        }

        debug!(
            width,
            height,
            layers = template.layers().len(),
            "Template captured"
        );

        Ok(RasterImage::new(canvas))
    }
}

fn paint(canvas: &mut RgbaImage, layer: &Layer, scale: f32) -> Result<()> {
    match layer {
        Layer::Fill { rect, color } => {
            if let Some(area) = device_rect(rect, scale) {
                draw_filled_rect_mut(canvas, area, *color);
            }
        }
        Layer::Frame {
            rect,
            stroke,
            color,
        } => paint_frame(canvas, rect, *stroke, *color, scale),
        Layer::Rule {
            x,
            y,
            length,
            color,
        } => {
            let x0 = scale_pos(*x, scale) as f32;
            let x1 = x0 + scale_len(*length, scale) as f32;
            let y0 = scale_pos(*y, scale);
            // A one-pixel rule stays one logical pixel thick after scaling.
            for row in 0..scale_len(1, scale).max(1) {
                let line_y = (y0 + row as i32) as f32;
                draw_line_segment_mut(canvas, (x0, line_y), (x1, line_y), *color);
            }
        }
        Layer::Bitmap {
            rect,
            source,
            data,
            ..
        } => {
            let Some(area) = device_rect(rect, scale) else {
                return Ok(());
            };
            let decoded = image::load_from_memory(data).map_err(|err| {
                MarksheetError::ImageError(format!("failed to decode {}: {}", source, err))
            })?;
            let resized = decoded
                .resize_exact(area.width(), area.height(), FilterType::CatmullRom)
                .to_rgba8();
            imageops::overlay(
                canvas,
                &resized,
                i64::from(area.left()),
                i64::from(area.top()),
            );
        }
    }
    Ok(())
}

fn paint_frame(canvas: &mut RgbaImage, rect: &Rect, stroke: u32, color: Rgba<u8>, scale: f32) {
    let Some(outer) = device_rect(rect, scale) else {
        return;
    };
    let thickness = scale_len(stroke, scale);
    for inset in 0..thickness {
        let shrink = 2 * inset;
        if outer.width() <= shrink || outer.height() <= shrink {
            break;
        }
        let ring = imageproc::rect::Rect::at(outer.left() + inset as i32, outer.top() + inset as i32)
            .of_size(outer.width() - shrink, outer.height() - shrink);
        draw_hollow_rect_mut(canvas, ring, color);
    }
}

/// Scale a logical rectangle to device pixels. `None` when it collapses.
fn device_rect(rect: &Rect, scale: f32) -> Option<imageproc::rect::Rect> {
    let width = scale_len(rect.width, scale);
    let height = scale_len(rect.height, scale);
    if width == 0 || height == 0 {
        return None;
    }
    Some(imageproc::rect::Rect::at(scale_pos(rect.x, scale), scale_pos(rect.y, scale)).of_size(width, height))
}

fn scale_len(value: u32, scale: f32) -> u32 {
    (value as f32 * scale).round() as u32
}

fn scale_pos(value: i32, scale: f32) -> i32 {
    (value as f32 * scale).round() as i32
}
