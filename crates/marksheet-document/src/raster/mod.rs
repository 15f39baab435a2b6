// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module: the snapshot capability and the images it produces.

pub mod canvas;

use image::{Rgb, RgbImage, RgbaImage};
use marksheet_core::error::Result;

use crate::template::TemplateHandle;

pub use canvas::CanvasRasterizer;

/// Captures the current visual state of a template.
///
/// Implementations may block; the export pipeline runs them off the caller's
/// task and bounds them with a timeout.
pub trait Rasterizer: Send + Sync {
    /// Paint `template` at `scale` device pixels per logical pixel.
    ///
    /// Fails with [`marksheet_core::error::MarksheetError::TaintedCanvas`]
    /// when the template holds pixels the capture may not read.
    fn capture(&self, template: &TemplateHandle, scale: f32) -> Result<RasterImage>;
}

/// A captured pixel snapshot. Owned by the export that produced it.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width_px(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height_px(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Composite over an opaque `background`, dropping the alpha channel.
    pub fn flatten(&self, background: Rgb<u8>) -> RgbImage {
        let Rgb([bg_r, bg_g, bg_b]) = background;
        RgbImage::from_fn(self.width_px(), self.height_px(), |x, y| {
            let image::Rgba([r, g, b, a]) = *self.pixels.get_pixel(x, y);
            let blend = |fg: u8, bg: u8| -> u8 {
                let alpha = u32::from(a);
                ((u32::from(fg) * alpha + u32::from(bg) * (255 - alpha) + 127) / 255) as u8
            };
            Rgb([blend(r, bg_r), blend(g, bg_g), blend(b, bg_b)])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn flatten_over_white() {
        let mut pixels = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        pixels.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
        let flat = RasterImage::new(pixels).flatten(Rgb([255, 255, 255]));
        assert_eq!(*flat.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*flat.get_pixel(1, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn half_alpha_blends() {
        let pixels = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let flat = RasterImage::new(pixels).flatten(Rgb([255, 255, 255]));
        let Rgb([r, _, _]) = *flat.get_pixel(0, 0);
        assert!((126..=128).contains(&r), "got {r}");
    }
}
