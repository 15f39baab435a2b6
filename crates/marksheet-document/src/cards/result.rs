// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Result card content.

use std::fmt;

use marksheet_core::{AppConfig, ClassInfo, StudentRecord, Subject};
use marksheet_grading::{ComputedResult, GradingRules, MarkSet, PassStatus};
use serde::Serialize;

use super::{FieldRow, SchoolHeader, roll_or_placeholder, write_rows};

/// Status colour for a pass.
pub const PASS_COLOR: &str = "#027148";
/// Status colour for a fail.
pub const FAIL_COLOR: &str = "red";

/// One row of the marks table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectRow {
    pub subject: Subject,
    pub full_marks: u32,
    /// As entered; `None` until the user types something.
    pub obtained: Option<i64>,
}

/// Lines below the marks table, present once a result is computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub total_obtained: u64,
    /// Two-decimal percentage with a trailing `%`, e.g. `81.43%`.
    pub percentage: String,
    pub remark: &'static str,
    pub grade: &'static str,
    pub status: PassStatus,
    pub status_color: &'static str,
}

impl ResultSummary {
    pub fn from_result(result: &ComputedResult) -> Self {
        let status = result.status();
        Self {
            total_obtained: result.total_marks(),
            percentage: format!("{}%", result.percentage_display()),
            remark: result.remark(),
            grade: result.grade(),
            status,
            status_color: if status.is_pass() {
                PASS_COLOR
            } else {
                FAIL_COLOR
            },
        }
    }
}

/// Everything printed on a result card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCardView {
    pub header: SchoolHeader,
    pub exam_name: String,
    pub fields: Vec<FieldRow>,
    pub subjects: Vec<SubjectRow>,
    /// Full marks across all subjects (140 under the standard rules).
    pub total_full_marks: u64,
    pub summary: Option<ResultSummary>,
}

impl ResultCardView {
    /// Card with identity filled in and an empty marks table.
    pub fn new(
        config: &AppConfig,
        student: &StudentRecord,
        class: &ClassInfo,
        exam_name: &str,
        roll_number: &str,
    ) -> Self {
        let fields = vec![
            FieldRow::new("Student Name", student.name.as_str()),
            FieldRow::new("Class", class.name.as_str()),
            FieldRow::new("Father Name", student.father_name.as_str()),
            FieldRow::new("Roll No", roll_or_placeholder(roll_number)),
            FieldRow::new("Mother Name", student.mother_name.as_str()),
        ];

        Self {
            header: SchoolHeader::from_config(config),
            exam_name: exam_name.to_owned(),
            fields,
            subjects: Vec::new(),
            total_full_marks: 0,
            summary: None,
        }
    }

    /// Fill the marks table and, once computed, the summary lines.
    pub fn with_marks(
        mut self,
        marks: &MarkSet,
        rules: &GradingRules,
        result: Option<&ComputedResult>,
    ) -> Self {
        self.subjects = rules
            .subjects()
            .iter()
            .map(|&subject| SubjectRow {
                subject,
                full_marks: rules.max_per_subject(),
                obtained: marks.entered(subject),
            })
            .collect();
        self.total_full_marks = rules.full_marks();
        self.summary = result.map(ResultSummary::from_result);
        self
    }

    pub fn is_calculated(&self) -> bool {
        self.summary.is_some()
    }
}

impl fmt::Display for ResultCardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header.name)?;
        writeln!(f, "{}", self.exam_name)?;
        writeln!(f)?;
        write_rows(f, &self.fields)?;
        writeln!(f)?;
        writeln!(f, "{:<16} {:>10} {:>14}", "Subjects", "Full Marks", "Marks Obtained")?;
        for row in &self.subjects {
            let obtained = row.obtained.map(|m| m.to_string()).unwrap_or_default();
            writeln!(
                f,
                "{:<16} {:>10} {:>14}",
                row.subject.display_name(),
                row.full_marks,
                obtained
            )?;
        }

        let summary = self.summary.as_ref();
        let total = summary
            .map(|s| s.total_obtained.to_string())
            .unwrap_or_default();
        writeln!(f, "{:<16} {:>10} {:>14}", "Total", self.total_full_marks, total)?;
        writeln!(
            f,
            "{:<16} {}",
            "Percentage Marks",
            summary.map(|s| s.percentage.as_str()).unwrap_or("")
        )?;
        writeln!(f, "{:<16} {}", "Remarks", summary.map(|s| s.remark).unwrap_or(""))?;
        writeln!(f, "{:<16} {}", "Grade", summary.map(|s| s.grade).unwrap_or(""))?;
        match summary {
            Some(s) => writeln!(f, "{:<16} {}", "Status", s.status),
            None => writeln!(f, "Status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use marksheet_grading::compute_result;

    use super::*;

    fn marks(science: i64) -> MarkSet {
        MarkSet::from_scores([
            (Subject::English, 18),
            (Subject::Maths, 19),
            (Subject::Hindi, 15),
            (Subject::SocialStudies, 14),
            (Subject::Science, science),
            (Subject::Gk, 16),
            (Subject::Computer, 15),
        ])
    }

    fn view(marks: &MarkSet, result: Option<&ComputedResult>) -> ResultCardView {
        let config = AppConfig::default();
        ResultCardView::new(
            &config,
            &StudentRecord::new("Asha Verma", "Rakesh Verma", "Sunita Verma"),
            &ClassInfo::new("VII-A"),
            config.default_exam_name(marksheet_core::DocumentKind::ResultCard),
            "",
        )
        .with_marks(marks, &GradingRules::default(), result)
    }

    #[test]
    fn passing_summary() {
        let marks = marks(17);
        let result = compute_result(&marks, &GradingRules::default()).unwrap();
        let card = view(&marks, Some(&result));
        let summary = card.summary.as_ref().unwrap();
        assert_eq!(summary.total_obtained, 114);
        assert_eq!(summary.percentage, "81.43%");
        assert_eq!(summary.grade, "A");
        assert_eq!(summary.remark, "Distinction");
        assert_eq!(summary.status_color, PASS_COLOR);
        assert_eq!(card.total_full_marks, 140);
        assert_eq!(card.subjects.len(), 7);
        assert!(card.subjects.iter().all(|row| row.full_marks == 20));
    }

    #[test]
    fn failing_status_is_red() {
        let marks = marks(5);
        let result = compute_result(&marks, &GradingRules::default()).unwrap();
        let summary = ResultSummary::from_result(&result);
        assert_eq!(summary.status, PassStatus::Fail);
        assert_eq!(summary.status_color, FAIL_COLOR);
    }

    #[test]
    fn uncalculated_card_has_blank_summary() {
        let mut marks = MarkSet::new();
        marks.set(Subject::English, 12);
        let card = view(&marks, None);
        assert!(!card.is_calculated());
        assert_eq!(card.subjects[0].obtained, Some(12));
        assert_eq!(card.subjects[1].obtained, None);
        assert_eq!(card.fields[3], FieldRow::new("Roll No", "______"));
    }

    #[test]
    fn preview_lists_every_subject() {
        let marks = marks(17);
        let result = compute_result(&marks, &GradingRules::default()).unwrap();
        let text = view(&marks, Some(&result)).to_string();
        assert!(text.starts_with("DELHI PUBLIC SCHOOL\nSUMMATIVE ASSESSMENT TEST-I\n"));
        for subject in Subject::ALL {
            assert!(text.contains(subject.display_name()));
        }
        assert!(text.contains("81.43%"));
        assert!(text.contains("Status           Pass"));
    }
}
