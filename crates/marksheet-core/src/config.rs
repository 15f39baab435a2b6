// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

use crate::types::DocumentKind;

/// Persistent application settings. Every field has a default so a partial
/// JSON file is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// School name printed in the card header.
    pub school_name: String,
    /// Lines printed under the school name on the admit card.
    pub school_address_lines: Vec<String>,
    /// Paper size of exported documents.
    pub paper_size: crate::PaperSize,
    /// Device-pixel factor the card is captured at.
    pub oversampling: f32,
    /// Upper bound on a single rasterization, in seconds.
    pub raster_timeout_secs: u64,
    /// Top margin of the result card image, in millimetres.
    pub result_card_top_margin_mm: f32,
    /// Top margin of the admit card image, in millimetres.
    pub admit_card_top_margin_mm: f32,
    /// Exam name pre-filled when the result card dialog opens.
    pub default_result_exam_name: String,
    /// Exam name pre-filled when the admit card dialog opens.
    pub default_admit_exam_name: String,
    /// Exam date pre-filled when the admit card dialog opens.
    pub default_admit_exam_date: String,
}

impl AppConfig {
    /// Top margin for the given card, in millimetres.
    pub fn top_margin_mm(&self, kind: DocumentKind) -> f32 {
        match kind {
            DocumentKind::AdmitCard => self.admit_card_top_margin_mm,
            DocumentKind::ResultCard => self.result_card_top_margin_mm,
        }
    }

    /// Exam name the dialog for `kind` starts with.
    pub fn default_exam_name(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::AdmitCard => &self.default_admit_exam_name,
            DocumentKind::ResultCard => &self.default_result_exam_name,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            school_name: "DELHI PUBLIC SCHOOL".into(),
            school_address_lines: vec![
                "Run By: S.R. Edu & Social Welfare Trust".into(),
                "AT+PO: UKHAI, NEAR AAKODPUR, SIWAN-841227".into(),
            ],
            paper_size: crate::PaperSize::A4,
            oversampling: 2.0,
            raster_timeout_secs: 30,
            result_card_top_margin_mm: 20.0,
            admit_card_top_margin_mm: 30.0,
            default_result_exam_name: "SUMMATIVE ASSESSMENT TEST-I".into(),
            default_admit_exam_name: "TERM-I SA-1 EXAM".into(),
            default_admit_exam_date: "29-Oct-2023".into(),
        }
    }
}
