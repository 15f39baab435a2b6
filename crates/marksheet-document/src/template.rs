// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card templates: the renderable description of a card handed to a
// rasterizer.
//
// A template is a logical canvas (CSS pixels) with a background colour and an
// ordered list of layers painted back to front. The UI layer produces it; the
// export pipeline only ever reads it.

use std::sync::Arc;

use image::Rgba;
use marksheet_core::error::{MarksheetError, Result};
use uuid::Uuid;

/// Where a bitmap layer was loaded from. Cross-origin pixels may only be read
/// back when the server approved CORS; otherwise they taint the capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    SameOrigin,
    CrossOrigin { cors_approved: bool },
}

impl Origin {
    /// Whether a capture may read this layer's pixels.
    pub fn is_readable(&self) -> bool {
        match self {
            Self::SameOrigin => true,
            Self::CrossOrigin { cors_approved } => *cors_approved,
        }
    }
}

/// Axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One paint operation.
#[derive(Debug, Clone)]
pub enum Layer {
    /// An encoded image (PNG, JPEG, ...) stretched into `rect`.
    Bitmap {
        rect: Rect,
        /// Where the image came from, for diagnostics (URL or file name).
        source: String,
        origin: Origin,
        data: Arc<[u8]>,
    },
    /// Solid rectangle.
    Fill { rect: Rect, color: Rgba<u8> },
    /// Rectangle outline `stroke` pixels thick, drawn inside `rect`.
    Frame {
        rect: Rect,
        stroke: u32,
        color: Rgba<u8>,
    },
    /// Horizontal line, e.g. above a signature label.
    Rule {
        x: i32,
        y: i32,
        length: u32,
        color: Rgba<u8>,
    },
}

/// Handle to a renderable card.
#[derive(Debug, Clone)]
pub struct TemplateHandle {
    id: Uuid,
    width: u32,
    height: u32,
    background: Rgba<u8>,
    layers: Vec<Layer>,
}

/// White, the card background.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Black, used for card borders and rules.
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

impl TemplateHandle {
    /// Empty white template of the given logical size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            width,
            height,
            background: WHITE,
            layers: Vec::new(),
        }
    }

    /// Template consisting of one same-origin snapshot covering the whole
    /// canvas, sized to the snapshot's own dimensions.
    pub fn from_snapshot(source: impl Into<String>, encoded: Vec<u8>) -> Result<Self> {
        let (width, height) = image::load_from_memory(&encoded)
            .map(|img| (img.width(), img.height()))
            .map_err(|err| {
                MarksheetError::ImageError(format!("failed to decode snapshot: {}", err))
            })?;

        let mut template = Self::new(width, height);
        template.push(Layer::Bitmap {
            rect: Rect::new(0, 0, width, height),
            source: source.into(),
            origin: Origin::SameOrigin,
            data: Arc::from(encoded),
        });
        Ok(template)
    }

    /// Append a layer on top of the existing ones.
    pub fn push(&mut self, layer: Layer) -> &mut Self {
        self.layers.push(layer);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Logical width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Rgba<u8> {
        self.background
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Source of the first bitmap whose pixels may not be read back, if any.
    pub fn tainted_source(&self) -> Option<&str> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Bitmap { source, origin, .. } if !origin.is_readable() => Some(source.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut buffer = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn snapshot_sizes_template() {
        let template = TemplateHandle::from_snapshot("card.png", png(40, 25)).unwrap();
        assert_eq!(template.width(), 40);
        assert_eq!(template.height(), 25);
        assert_eq!(template.layers().len(), 1);
        assert!(template.tainted_source().is_none());
    }

    #[test]
    fn undecodable_snapshot_is_image_error() {
        let err = TemplateHandle::from_snapshot("card.png", b"not a png".to_vec()).unwrap_err();
        assert!(matches!(err, MarksheetError::ImageError(_)));
    }

    #[test]
    fn cross_origin_without_cors_taints() {
        let mut template = TemplateHandle::new(100, 100);
        template
            .push(Layer::Fill {
                rect: Rect::new(0, 0, 10, 10),
                color: BLACK,
            })
            .push(Layer::Bitmap {
                rect: Rect::new(10, 10, 20, 20),
                source: "https://cdn.example/photo.jpg".into(),
                origin: Origin::CrossOrigin {
                    cors_approved: false,
                },
                data: Arc::from(png(2, 2)),
            });
        assert_eq!(
            template.tainted_source(),
            Some("https://cdn.example/photo.jpg")
        );
    }

    #[test]
    fn cors_approved_is_readable() {
        assert!(Origin::CrossOrigin { cors_approved: true }.is_readable());
        assert!(Origin::SameOrigin.is_readable());
        assert!(!Origin::CrossOrigin { cors_approved: false }.is_readable());
    }
}
