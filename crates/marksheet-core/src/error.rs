// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Marksheet.

use std::time::Duration;

use thiserror::Error;

use crate::types::Subject;

/// Top-level error type for all Marksheet operations.
#[derive(Debug, Error)]
pub enum MarksheetError {
    // -- Grading errors --
    #[error("invalid mark for {subject}: {value} is outside 0..={max}")]
    InvalidMark {
        subject: Subject,
        value: i64,
        max: u32,
    },

    // -- Render errors --
    #[error("no template to capture")]
    MissingTemplate,

    #[error("canvas tainted by cross-origin content: {0}")]
    TaintedCanvas(String),

    #[error("rasterization timed out after {0:?}")]
    RenderTimeout(Duration),

    #[error("rasterization failed: {0}")]
    Render(String),

    // -- Composition errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Dialog guards --
    #[error("roll number is required")]
    MissingRollNumber,

    #[error("results have not been calculated")]
    NotCalculated,

    #[error("invalid state: {0}")]
    InvalidState(String),

    // -- Collaborator I/O --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MarksheetError {
    /// Whether this error belongs to the snapshot/compose family that fails an
    /// export (as opposed to a grading or guard failure).
    pub fn is_render_error(&self) -> bool {
        matches!(
            self,
            Self::MissingTemplate
                | Self::TaintedCanvas(_)
                | Self::RenderTimeout(_)
                | Self::Render(_)
                | Self::PdfError(_)
                | Self::ImageError(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MarksheetError>;
