// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: composes a captured card onto a single page with `printpdf` 0.8.
//
// printpdf 0.8 builds documents from `PdfPage` structs holding `Vec<Op>`
// operation lists, serialised via `PdfDocument::save()`.

use image::Rgb;
use marksheet_core::error::{MarksheetError, Result};
use printpdf::{
    Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::fit::{FitTransform, PageLayout};
use crate::raster::RasterImage;

/// At 72 dpi one image pixel is one PDF point, so the fit scale applies as-is.
const PLACEMENT_DPI: f32 = 72.0;

/// Writes single-page image PDFs.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer whose documents carry `title` in their metadata.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    /// Place `raster` on one page of `page`'s size according to `fit`.
    ///
    /// Transparent pixels are flattened onto white before embedding.
    #[instrument(skip_all, fields(width = raster.width_px(), height = raster.height_px()))]
    pub fn compose_single_page(
        &self,
        raster: &RasterImage,
        page: &PageLayout,
        fit: &FitTransform,
    ) -> Result<Vec<u8>> {
        let width = raster.width_px();
        let height = raster.height_px();
        if width == 0 || height == 0 {
            return Err(MarksheetError::PdfError(
                "cannot embed an empty raster".into(),
            ));
        }

        let title = self.title.as_deref().unwrap_or("Marksheet Document");
        info!(title, "Composing single-page PDF");

        let rgb = raster.flatten(Rgb([255, 255, 255]));
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: width as usize,
            height: height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let mut doc = PdfDocument::new(title);
        let xobject_id = doc.add_image(&raw);

        let translate_x = fit.offset_x;
        let translate_y = fit.pdf_bottom(height, page);
        if translate_y < 0.0 {
            // Height-bound images hang below the bottom edge by the top margin.
            warn!(overflow_pt = -translate_y, "Card extends past the page bottom");
        }

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(translate_x)),
                translate_y: Some(Pt(translate_y)),
                scale_x: Some(fit.scale),
                scale_y: Some(fit.scale),
                dpi: Some(PLACEMENT_DPI),
                rotate: None,
            },
        }];

        doc.with_pages(vec![PdfPage::new(page.width_mm(), page.height_mm(), ops)]);

        let (rendered_w, rendered_h) = fit.rendered_size(width, height);
        debug!(rendered_w, rendered_h, scale = fit.scale, "Image placed on page");

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "printpdf reported warnings");
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use marksheet_core::PaperSize;

    use super::*;

    fn raster(width: u32, height: u32) -> RasterImage {
        RasterImage::new(RgbaImage::from_pixel(width, height, Rgba([20, 40, 60, 255])))
    }

    #[test]
    fn composes_exactly_one_page() {
        let page = PageLayout::from_paper(PaperSize::A4, 20.0);
        let image = raster(120, 80);
        let fit = FitTransform::compute(120, 80, &page).unwrap();
        let bytes = PdfWriter::titled("Result Card")
            .compose_single_page(&image, &page, &fit)
            .unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn tall_card_still_one_page() {
        let page = PageLayout::from_paper(PaperSize::A4, 30.0);
        let image = raster(40, 200);
        let fit = FitTransform::compute(40, 200, &page).unwrap();
        let bytes = PdfWriter::new()
            .compose_single_page(&image, &page, &fit)
            .unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn empty_raster_rejected() {
        let page = PageLayout::from_paper(PaperSize::A4, 20.0);
        let fit = FitTransform {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        let err = PdfWriter::new()
            .compose_single_page(&raster(0, 0), &page, &fit)
            .unwrap_err();
        assert!(matches!(err, MarksheetError::PdfError(_)));
    }
}
