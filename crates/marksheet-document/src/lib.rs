// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// marksheet-document: Document export for the admit and result cards.
//
// Snapshots a card template into a raster image, fits it onto a fixed-size
// page, and composes a single-page PDF. Also provides the text content of both
// cards for the UI layer that renders the template.

pub mod cards;
pub mod export;
pub mod fit;
pub mod integrity;
pub mod naming;
pub mod pdf;
pub mod raster;
pub mod template;

// Flat re-exports for the common entry points.
pub use cards::{AdmitCardView, ResultCardView};
pub use export::{DocumentSink, ExportPipeline, ExportedDocument};
pub use fit::{FitTransform, PageLayout};
pub use pdf::writer::PdfWriter;
pub use raster::canvas::CanvasRasterizer;
pub use raster::{RasterImage, Rasterizer};
pub use template::{Layer, Origin, Rect, TemplateHandle};
