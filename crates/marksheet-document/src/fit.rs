// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page layout and the fit transform that places a snapshot on the page.
//
// All page measurements are PDF points (1/72 in). Offsets are measured from
// the page's top-left corner; the PDF writer flips them into PDF's bottom-left
// coordinate system.

use marksheet_core::error::{MarksheetError, Result};
use marksheet_core::{AppConfig, DocumentKind, PaperSize};
use printpdf::Mm;
use serde::{Deserialize, Serialize};

/// Target page for a composed document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub width_pt: f32,
    pub height_pt: f32,
    /// Gap between the top edge of the page and the top of the image.
    pub top_margin_pt: f32,
}

impl PageLayout {
    pub fn new(width_pt: f32, height_pt: f32, top_margin_pt: f32) -> Self {
        Self {
            width_pt,
            height_pt,
            top_margin_pt,
        }
    }

    /// Portrait page of `paper` with a top margin given in millimetres.
    pub fn from_paper(paper: PaperSize, top_margin_mm: f32) -> Self {
        let (w_mm, h_mm) = paper.dimensions_mm();
        Self {
            width_pt: Mm(w_mm as f32).into_pt().0,
            height_pt: Mm(h_mm as f32).into_pt().0,
            top_margin_pt: Mm(top_margin_mm).into_pt().0,
        }
    }

    /// Layout configured for the given card.
    pub fn for_card(config: &AppConfig, kind: DocumentKind) -> Self {
        Self::from_paper(config.paper_size, config.top_margin_mm(kind))
    }

    /// Page width in millimetres.
    pub fn width_mm(&self) -> Mm {
        Mm(pt_to_mm(self.width_pt))
    }

    /// Page height in millimetres.
    pub fn height_mm(&self) -> Mm {
        Mm(pt_to_mm(self.height_pt))
    }
}

fn pt_to_mm(pt: f32) -> f32 {
    pt * 25.4 / 72.0
}

/// Scale and position of a snapshot on a page.
///
/// `scale` is page points per image pixel, the largest factor at which the
/// whole image fits within both page dimensions. The image is centred
/// horizontally and hangs `offset_y` below the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitTransform {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl FitTransform {
    /// Fit an image of `width_px` x `height_px` onto `page`.
    pub fn compute(width_px: u32, height_px: u32, page: &PageLayout) -> Result<Self> {
        if width_px == 0 || height_px == 0 {
            return Err(MarksheetError::Render(format!(
                "cannot fit an empty {}x{} image",
                width_px, height_px
            )));
        }
        if page.width_pt <= 0.0 || page.height_pt <= 0.0 {
            return Err(MarksheetError::PdfError(format!(
                "page has no area ({}x{} pt)",
                page.width_pt, page.height_pt
            )));
        }

        let image_w = width_px as f32;
        let image_h = height_px as f32;
        let scale = (page.width_pt / image_w).min(page.height_pt / image_h);
        let offset_x = ((page.width_pt - image_w * scale) / 2.0).max(0.0);

        Ok(Self {
            scale,
            offset_x,
            offset_y: page.top_margin_pt,
        })
    }

    /// Size of the placed image in points.
    pub fn rendered_size(&self, width_px: u32, height_px: u32) -> (f32, f32) {
        (width_px as f32 * self.scale, height_px as f32 * self.scale)
    }

    /// Bottom edge of the placed image in PDF coordinates (origin bottom-left).
    pub fn pdf_bottom(&self, height_px: u32, page: &PageLayout) -> f32 {
        page.height_pt - self.offset_y - height_px as f32 * self.scale
    }
}
