// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Grade bands: percentage thresholds mapped to a letter grade and remark.

use serde::Serialize;

/// One row of the grade table. A percentage belongs to the first band, scanning
/// from the top, whose `min_percentage` it meets or exceeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeBand {
    /// Inclusive lower edge of the band.
    pub min_percentage: f64,
    pub grade: &'static str,
    pub remark: &'static str,
}

/// The school's grade table, highest band first. The last band starts at zero
/// so every valid percentage matches exactly one band.
pub static STANDARD_BANDS: [GradeBand; 7] = [
    GradeBand { min_percentage: 90.0, grade: "A+", remark: "Excellent" },
    GradeBand { min_percentage: 75.0, grade: "A", remark: "Distinction" },
    GradeBand { min_percentage: 60.0, grade: "B+", remark: "Very Good" },
    GradeBand { min_percentage: 50.0, grade: "B", remark: "Good But Satisfactory" },
    GradeBand { min_percentage: 40.0, grade: "C", remark: "Keep hard work" },
    GradeBand { min_percentage: 35.0, grade: "D", remark: "Need more hard work" },
    GradeBand { min_percentage: 0.0, grade: "F", remark: "Need significant improvement" },
];

impl GradeBand {
    /// Find the band for `percentage` in a table sorted by descending threshold.
    ///
    /// A percentage below every threshold lands in the lowest band. Returns
    /// `None` only for an empty table.
    pub fn lookup(bands: &'static [GradeBand], percentage: f64) -> Option<&'static GradeBand> {
        bands
            .iter()
            .find(|band| band.min_percentage <= percentage)
            .or_else(|| bands.last())
    }
}
