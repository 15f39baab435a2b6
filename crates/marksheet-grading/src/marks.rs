// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Mark sets and raw mark parsing.
//
// Marks arrive as text-field values. They are converted here and range-checked
// later by the engine: a MarkSet may hold out-of-range values, it is the
// engine that refuses to grade them.

use std::collections::BTreeMap;

use marksheet_core::Subject;
use serde::{Deserialize, Serialize};

/// Per-subject scores, ordered by subject. A subject without an entry counts
/// as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkSet {
    scores: BTreeMap<Subject, i64>,
}

impl MarkSet {
    /// An empty set; every subject reads as zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from already-converted scores.
    pub fn from_scores(scores: impl IntoIterator<Item = (Subject, i64)>) -> Self {
        Self {
            scores: scores.into_iter().collect(),
        }
    }

    /// Build a set from raw text-field values. Blank values are left out.
    pub fn from_raw<'a>(raw: impl IntoIterator<Item = (Subject, &'a str)>) -> Self {
        let mut set = Self::new();
        for (subject, text) in raw {
            set.set_raw(subject, text);
        }
        set
    }

    /// Record a converted score, replacing any previous entry.
    pub fn set(&mut self, subject: Subject, score: i64) {
        self.scores.insert(subject, score);
    }

    /// Record a raw text value. A blank value clears the entry.
    pub fn set_raw(&mut self, subject: Subject, text: &str) {
        match parse_mark(text) {
            Some(score) => {
                self.scores.insert(subject, score);
            }
            None => {
                self.scores.remove(&subject);
            }
        }
    }

    /// Score for `subject`, zero when nothing was entered.
    pub fn get(&self, subject: Subject) -> i64 {
        self.scores.get(&subject).copied().unwrap_or(0)
    }

    /// The entered score, if any.
    pub fn entered(&self, subject: Subject) -> Option<i64> {
        self.scores.get(&subject).copied()
    }

    /// Entered scores in subject order.
    pub fn iter(&self) -> impl Iterator<Item = (Subject, i64)> + '_ {
        self.scores.iter().map(|(subject, score)| (*subject, *score))
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Convert a text-field value into a score.
///
/// Returns `None` for a blank value. Otherwise reads an optional sign and the
/// leading decimal digits, ignoring anything after them (`"12.5"` is 12,
/// `"17 marks"` is 17). A value with no leading digits converts to 0. Values too
/// large for `i64` saturate; they are rejected by the range check anyway.
pub fn parse_mark(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (negative, digits) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_and_padded() {
        assert_eq!(parse_mark("18"), Some(18));
        assert_eq!(parse_mark("  7 "), Some(7));
        assert_eq!(parse_mark("+9"), Some(9));
    }

    #[test]
    fn parse_reads_leading_digits_only() {
        assert_eq!(parse_mark("12.5"), Some(12));
        assert_eq!(parse_mark("17 marks"), Some(17));
        assert_eq!(parse_mark("abc"), Some(0));
        assert_eq!(parse_mark("-"), Some(0));
    }

    #[test]
    fn parse_keeps_negative_for_validation() {
        assert_eq!(parse_mark("-3"), Some(-3));
    }

    #[test]
    fn parse_blank_is_missing() {
        assert_eq!(parse_mark(""), None);
        assert_eq!(parse_mark("   "), None);
    }

    #[test]
    fn parse_saturates() {
        assert_eq!(parse_mark("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn missing_subject_reads_zero() {
        let set = MarkSet::from_raw([(Subject::English, "18"), (Subject::Maths, "")]);
        assert_eq!(set.get(Subject::English), 18);
        assert_eq!(set.get(Subject::Maths), 0);
        assert_eq!(set.entered(Subject::Maths), None);
    }

    #[test]
    fn blank_clears_entry() {
        let mut set = MarkSet::from_scores([(Subject::Hindi, 12)]);
        set.set_raw(Subject::Hindi, " ");
        assert!(set.is_empty());
    }

    #[test]
    fn iterates_in_subject_order() {
        let set = MarkSet::from_scores([
            (Subject::Computer, 1),
            (Subject::English, 2),
            (Subject::Science, 3),
        ]);
        let order: Vec<Subject> = set.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec![Subject::English, Subject::Science, Subject::Computer]);
    }

    #[test]
    fn serializes_with_field_keys() {
        let set = MarkSet::from_scores([(Subject::SocialStudies, 14)]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"socialStudies":14}"#);
    }
}
