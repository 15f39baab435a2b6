// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Grading engine: validate a mark set and derive the result card figures.
//
// Two independent rules decide the outcome:
//   * grade and remark come from the aggregate percentage via the band table;
//   * pass/fail is gated per subject: every score must be strictly above the
//     pass threshold, whatever the percentage.

use marksheet_core::Subject;
use marksheet_core::error::{MarksheetError, Result};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::bands::{GradeBand, STANDARD_BANDS};
use crate::marks::MarkSet;

/// Highest score a subject can be marked out of.
pub const MAX_PER_SUBJECT: u32 = 20;

/// A subject score must be strictly greater than this to pass.
pub const PASS_THRESHOLD: u32 = 7;

/// Overall verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PassStatus {
    Pass,
    Fail,
}

impl PassStatus {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl std::fmt::Display for PassStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => f.write_str("Pass"),
            Self::Fail => f.write_str("Fail"),
        }
    }
}

/// The rule set a mark set is graded against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradingRules {
    subjects: &'static [Subject],
    max_per_subject: u32,
    pass_threshold: u32,
    bands: &'static [GradeBand],
}

impl GradingRules {
    /// Rules over all seven subjects with the standard grade table.
    pub fn new(max_per_subject: u32, pass_threshold: u32) -> Self {
        Self {
            subjects: &Subject::ALL,
            max_per_subject,
            pass_threshold,
            bands: &STANDARD_BANDS,
        }
    }

    /// Swap in another grade table. Returns `None` for an empty table, which
    /// could not place any percentage.
    pub fn with_bands(self, bands: &'static [GradeBand]) -> Option<Self> {
        if bands.is_empty() {
            return None;
        }
        Some(Self { bands, ..self })
    }

    pub fn subjects(&self) -> &'static [Subject] {
        self.subjects
    }

    pub fn max_per_subject(&self) -> u32 {
        self.max_per_subject
    }

    pub fn pass_threshold(&self) -> u32 {
        self.pass_threshold
    }

    pub fn bands(&self) -> &'static [GradeBand] {
        self.bands
    }

    /// Maximum attainable total (140 for seven subjects out of 20).
    ///
    /// Widened to `u64` so no `max_per_subject` can overflow it.
    pub fn full_marks(&self) -> u64 {
        self.subjects.len() as u64 * u64::from(self.max_per_subject)
    }
}

impl Default for GradingRules {
    fn default() -> Self {
        Self::new(MAX_PER_SUBJECT, PASS_THRESHOLD)
    }
}

/// Outcome of grading one mark set. Immutable: grading different marks yields
/// a new value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedResult {
    total_marks: u64,
    percentage: f64,
    grade: &'static str,
    remark: &'static str,
    status: PassStatus,
}

impl ComputedResult {
    pub fn total_marks(&self) -> u64 {
        self.total_marks
    }

    /// Unrounded percentage; band lookups use this value.
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Percentage rounded to two decimals, for display (`81.43`).
    pub fn percentage_display(&self) -> String {
        format!("{:.2}", self.percentage)
    }

    pub fn grade(&self) -> &'static str {
        self.grade
    }

    pub fn remark(&self) -> &'static str {
        self.remark
    }

    pub fn status(&self) -> PassStatus {
        self.status
    }
}

/// Grade `marks` under `rules`.
///
/// All-or-nothing: the first subject (in subject order) whose score lies
/// outside `0..=max_per_subject` fails the whole computation with
/// [`MarksheetError::InvalidMark`]. Subjects without an entry count as zero.
#[instrument(skip_all)]
pub fn compute_result(marks: &MarkSet, rules: &GradingRules) -> Result<ComputedResult> {
    let max = i64::from(rules.max_per_subject);
    let threshold = i64::from(rules.pass_threshold);

    // Scores are range-checked before they are added, so the sum never
    // exceeds `subjects.len() * u32::MAX`.
    let mut total: u64 = 0;
    let mut every_subject_passed = true;

    for &subject in rules.subjects {
        let score = marks.get(subject);
        if !(0..=max).contains(&score) {
            debug!(%subject, score, "mark out of range");
            return Err(MarksheetError::InvalidMark {
                subject,
                value: score,
                max: rules.max_per_subject,
            });
        }
        total += score.unsigned_abs();
        if score <= threshold {
            every_subject_passed = false;
        }
    }

    let full_marks = rules.full_marks();
    let percentage = if full_marks == 0 {
        0.0
    } else {
        total as f64 * 100.0 / full_marks as f64
    };

    let band = GradeBand::lookup(rules.bands, percentage)
        .ok_or_else(|| MarksheetError::InvalidState("grading with an empty grade table".into()))?;

    let status = if every_subject_passed {
        PassStatus::Pass
    } else {
        PassStatus::Fail
    };

    let result = ComputedResult {
        total_marks: total,
        percentage,
        grade: band.grade,
        remark: band.remark,
        status,
    };

    debug!(
        total = result.total_marks,
        percentage = %result.percentage_display(),
        grade = result.grade,
        status = %result.status,
        "result computed"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> MarkSet {
        MarkSet::from_scores([
            (Subject::English, 18),
            (Subject::Maths, 19),
            (Subject::Hindi, 15),
            (Subject::SocialStudies, 14),
            (Subject::Science, 17),
            (Subject::Gk, 16),
            (Subject::Computer, 15),
        ])
    }

    fn uniform(score: i64) -> MarkSet {
        MarkSet::from_scores(Subject::ALL.iter().map(|s| (*s, score)))
    }

    #[test]
    fn distinction_and_pass() {
        let result = compute_result(&scenario_a(), &GradingRules::default()).unwrap();
        assert_eq!(result.total_marks(), 114);
        assert_eq!(result.percentage_display(), "81.43");
        assert_eq!(result.grade(), "A");
        assert_eq!(result.remark(), "Distinction");
        assert_eq!(result.status(), PassStatus::Pass);
    }

    #[test]
    fn one_weak_subject_fails_whole_result() {
        let mut marks = scenario_a();
        marks.set(Subject::Science, 5);
        let result = compute_result(&marks, &GradingRules::default()).unwrap();

        assert_eq!(result.status(), PassStatus::Fail);
        // Grade and remark are still reported from the percentage.
        assert_eq!(result.total_marks(), 102);
        assert_eq!(result.percentage_display(), "72.86");
        assert_eq!(result.grade(), "B+");
        assert_eq!(result.remark(), "Very Good");
    }

    #[test]
    fn high_percentage_does_not_rescue_a_failed_subject() {
        let mut marks = uniform(20);
        marks.set(Subject::Gk, 7);
        let result = compute_result(&marks, &GradingRules::default()).unwrap();
        assert_eq!(result.grade(), "A+");
        assert_eq!(result.status(), PassStatus::Fail);
    }

    #[test]
    fn threshold_is_strict() {
        let at = compute_result(&uniform(7), &GradingRules::default()).unwrap();
        assert_eq!(at.status(), PassStatus::Fail);

        let above = compute_result(&uniform(8), &GradingRules::default()).unwrap();
        assert_eq!(above.status(), PassStatus::Pass);
    }

    #[test]
    fn out_of_range_mark_names_subject() {
        let mut marks = scenario_a();
        marks.set(Subject::Hindi, 25);
        let err = compute_result(&marks, &GradingRules::default()).unwrap_err();
        match err {
            MarksheetError::InvalidMark {
                subject,
                value,
                max,
            } => {
                assert_eq!(subject, Subject::Hindi);
                assert_eq!(value, 25);
                assert_eq!(max, 20);
            }
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn first_offender_in_subject_order_is_reported() {
        let mut marks = scenario_a();
        marks.set(Subject::Computer, 30);
        marks.set(Subject::Maths, 21);
        let err = compute_result(&marks, &GradingRules::default()).unwrap_err();
        assert!(matches!(
            err,
            MarksheetError::InvalidMark {
                subject: Subject::Maths,
                ..
            }
        ));
    }

    #[test]
    fn negative_mark_is_rejected() {
        let mut marks = scenario_a();
        marks.set(Subject::English, -1);
        assert!(compute_result(&marks, &GradingRules::default()).is_err());
    }

    #[test]
    fn empty_set_is_zero_and_fails() {
        let result = compute_result(&MarkSet::new(), &GradingRules::default()).unwrap();
        assert_eq!(result.total_marks(), 0);
        assert_eq!(result.percentage(), 0.0);
        assert_eq!(result.grade(), "F");
        assert_eq!(result.remark(), "Need significant improvement");
        assert_eq!(result.status(), PassStatus::Fail);
    }

    #[test]
    fn total_and_percentage_over_all_uniform_scores() {
        let rules = GradingRules::default();
        for score in 0..=20 {
            let result = compute_result(&uniform(score), &rules).unwrap();
            let expected_total = score as u64 * 7;
            assert_eq!(result.total_marks(), expected_total);
            let expected = expected_total as f64 / 140.0 * 100.0;
            assert!((result.percentage() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn exact_band_edges_from_marks() {
        // 126 / 140 = 90%, 105 / 140 = 75%.
        let rules = GradingRules::default();
        assert_eq!(compute_result(&uniform(18), &rules).unwrap().grade(), "A+");
        assert_eq!(compute_result(&uniform(15), &rules).unwrap().grade(), "A");
    }

    #[test]
    fn idempotent() {
        let rules = GradingRules::default();
        let first = compute_result(&scenario_a(), &rules).unwrap();
        let second = compute_result(&scenario_a(), &rules).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.percentage().to_bits(), second.percentage().to_bits());
    }

    #[test]
    fn full_marks_derived_from_rules() {
        assert_eq!(GradingRules::default().full_marks(), 140);
        assert_eq!(GradingRules::new(50, 17).full_marks(), 350);
    }

    #[test]
    fn huge_subject_maximum_does_not_overflow() {
        let max = u32::MAX / 2;
        let rules = GradingRules::new(max, 7);
        assert_eq!(rules.full_marks(), 7 * u64::from(max));

        let result = compute_result(&uniform(i64::from(max)), &rules).unwrap();
        assert_eq!(result.total_marks(), 7 * u64::from(max));
        assert!((result.percentage() - 100.0).abs() < 1e-9);
        assert_eq!(result.grade(), "A+");
        assert_eq!(result.status(), PassStatus::Pass);
    }

    #[test]
    fn u32_maximum_total_is_not_truncated() {
        let rules = GradingRules::new(u32::MAX, 0);
        let result = compute_result(&uniform(i64::from(u32::MAX)), &rules).unwrap();
        assert_eq!(result.total_marks(), 7 * u64::from(u32::MAX));
    }

    #[test]
    fn empty_band_table_rejected() {
        assert!(GradingRules::default().with_bands(&[]).is_none());
    }

    #[test]
    fn serializes_camel_case() {
        let result = compute_result(&scenario_a(), &GradingRules::default()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["totalMarks"], 114);
        assert_eq!(json["status"], "Pass");
    }
}
