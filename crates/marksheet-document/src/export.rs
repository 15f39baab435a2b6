// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rasterize-and-fit export pipeline.
//
// snapshot (blocking pool, bounded by a timeout) -> fit -> compose -> name
// -> fingerprint. Nothing is retried; the first failure aborts the export.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use marksheet_core::error::{MarksheetError, Result};
use marksheet_core::{AppConfig, DocumentKind, ExportIdentity};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::fit::{FitTransform, PageLayout};
use crate::integrity::{hash_bytes, short_digest};
use crate::naming::export_filename;
use crate::pdf::PdfWriter;
use crate::raster::{RasterImage, Rasterizer};
use crate::template::TemplateHandle;

/// Device pixels per logical pixel used when no configuration is given.
pub const DEFAULT_OVERSAMPLING: f32 = 2.0;

/// Upper bound on one capture when no configuration is given.
pub const DEFAULT_RASTER_TIMEOUT: Duration = Duration::from_secs(30);

/// A finished single-page PDF, ready for the download collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedDocument {
    pub kind: DocumentKind,
    pub filename: String,
    pub mime_type: &'static str,
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// Lowercase hex SHA-256 of `bytes`.
    pub sha256: String,
    pub created_at: DateTime<Utc>,
}

impl ExportedDocument {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Receives exported documents (browser download, directory, ...).
pub trait DocumentSink: Send + Sync {
    fn deliver(&self, document: &ExportedDocument) -> Result<()>;
}

/// Turns a card template into an [`ExportedDocument`].
#[derive(Clone)]
pub struct ExportPipeline {
    rasterizer: Arc<dyn Rasterizer>,
    oversampling: f32,
    raster_timeout: Duration,
}

impl std::fmt::Debug for ExportPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportPipeline")
            .field("oversampling", &self.oversampling)
            .field("raster_timeout", &self.raster_timeout)
            .finish_non_exhaustive()
    }
}

impl ExportPipeline {
    pub fn new(rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self {
            rasterizer,
            oversampling: DEFAULT_OVERSAMPLING,
            raster_timeout: DEFAULT_RASTER_TIMEOUT,
        }
    }

    /// Pipeline using the configured oversampling factor and timeout.
    pub fn from_config(rasterizer: Arc<dyn Rasterizer>, config: &AppConfig) -> Self {
        Self {
            rasterizer,
            oversampling: config.oversampling,
            raster_timeout: Duration::from_secs(config.raster_timeout_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.raster_timeout = timeout;
        self
    }

    pub fn oversampling(&self) -> f32 {
        self.oversampling
    }

    pub fn raster_timeout(&self) -> Duration {
        self.raster_timeout
    }

    /// Snapshot `template`, fit it onto `page`, and compose a one-page PDF.
    ///
    /// The roll number is checked before anything is rendered. A missing
    /// template, a tainted template, or a capture that outlives the timeout
    /// fails the export with a render error.
    #[instrument(skip_all, fields(kind = ?kind, roll = %identity.roll_number.trim()))]
    pub async fn export_document(
        &self,
        kind: DocumentKind,
        template: Option<&TemplateHandle>,
        page: &PageLayout,
        identity: &ExportIdentity,
    ) -> Result<ExportedDocument> {
        if !identity.has_roll_number() {
            return Err(MarksheetError::MissingRollNumber);
        }
        let template = template.ok_or(MarksheetError::MissingTemplate)?;

        info!(template = %template.id(), "Starting export");

        let raster = self.snapshot(template.clone()).await?;
        let fit = FitTransform::compute(raster.width_px(), raster.height_px(), page)?;
        debug!(
            scale = fit.scale,
            offset_x = fit.offset_x,
            offset_y = fit.offset_y,
            "Fit computed"
        );

        let writer = PdfWriter::titled(kind.title());
        let bytes = writer.compose_single_page(&raster, page, &fit)?;
        drop(raster);

        let document = ExportedDocument {
            kind,
            filename: export_filename(kind, identity),
            mime_type: kind.mime_type(),
            sha256: hash_bytes(&bytes),
            bytes,
            created_at: Utc::now(),
        };

        info!(
            filename = %document.filename,
            bytes = document.len(),
            sha256 = short_digest(&document.sha256),
            "Export complete"
        );
        Ok(document)
    }

    /// Run the rasterizer on the blocking pool. On timeout the capture keeps
    /// running and its result is dropped.
    async fn snapshot(&self, template: TemplateHandle) -> Result<RasterImage> {
        let rasterizer = Arc::clone(&self.rasterizer);
        let scale = self.oversampling;
        let task = tokio::task::spawn_blocking(move || rasterizer.capture(&template, scale));

        match tokio::time::timeout(self.raster_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(MarksheetError::Render(format!(
                "rasterizer task failed: {}",
                join_err
            ))),
            Err(_) => {
                warn!(timeout = ?self.raster_timeout, "Rasterization timed out");
                Err(MarksheetError::RenderTimeout(self.raster_timeout))
            }
        }
    }
}
