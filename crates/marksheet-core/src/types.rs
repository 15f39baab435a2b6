// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Marksheet: subjects, the read-only records handed in by
// the records front end, and the document kinds the export pipeline produces.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a student record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub Uuid);

impl StudentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StudentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of graded subjects, in result-card order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Subject {
    English,
    Maths,
    Hindi,
    SocialStudies,
    Science,
    Gk,
    Computer,
}

impl Subject {
    /// Every subject, in the order they appear on the result card.
    pub const ALL: [Subject; 7] = [
        Self::English,
        Self::Maths,
        Self::Hindi,
        Self::SocialStudies,
        Self::Science,
        Self::Gk,
        Self::Computer,
    ];

    /// Stable identifier used as the field key (`socialStudies`, `gk`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Maths => "maths",
            Self::Hindi => "hindi",
            Self::SocialStudies => "socialStudies",
            Self::Science => "science",
            Self::Gk => "gk",
            Self::Computer => "computer",
        }
    }

    /// Label printed in the subject column of the result card.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Maths => "Maths",
            Self::Hindi => "Hindi",
            Self::SocialStudies => "Social Studies",
            Self::Science => "Science",
            Self::Gk => "GK",
            Self::Computer => "Computer",
        }
    }

    /// Parse a field key. Accepts the camelCase key as well as snake_case and
    /// case-insensitive spellings (`social_studies`, `GK`).
    pub fn from_key(key: &str) -> Option<Self> {
        let folded: String = key
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "english" => Some(Self::English),
            "maths" | "math" => Some(Self::Maths),
            "hindi" => Some(Self::Hindi),
            "socialstudies" => Some(Self::SocialStudies),
            "science" => Some(Self::Science),
            "gk" => Some(Self::Gk),
            "computer" => Some(Self::Computer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Student record as supplied by the records front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    pub father_name: String,
    pub mother_name: String,
    #[serde(default)]
    pub contact_number: Option<String>,
    /// Photo shown on the admit card; usually served from another origin.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl StudentRecord {
    pub fn new(
        name: impl Into<String>,
        father_name: impl Into<String>,
        mother_name: impl Into<String>,
    ) -> Self {
        Self {
            id: StudentId::new(),
            name: name.into(),
            father_name: father_name.into(),
            mother_name: mother_name.into(),
            contact_number: None,
            image_url: None,
        }
    }
}

/// Class the student belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassInfo {
    pub id: Uuid,
    pub name: String,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Identity fields used to name an exported document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportIdentity {
    /// Student display name, used verbatim in the filename.
    pub display_name: String,
    /// User-entered roll number. Must be non-empty to export.
    pub roll_number: String,
}

impl ExportIdentity {
    pub fn new(display_name: impl Into<String>, roll_number: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            roll_number: roll_number.into(),
        }
    }

    /// Whether a usable roll number was entered.
    pub fn has_roll_number(&self) -> bool {
        !self.roll_number.trim().is_empty()
    }
}

/// The two card variants the export pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    AdmitCard,
    ResultCard,
}

impl DocumentKind {
    /// Filename prefix for this kind of document.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::AdmitCard => "admit_card",
            Self::ResultCard => "result_card",
        }
    }

    /// Dialog / document title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::AdmitCard => "Admit Card",
            Self::ResultCard => "Result Card",
        }
    }

    /// Whether a computed result must exist before this kind can be exported.
    pub fn requires_result(&self) -> bool {
        matches!(self, Self::ResultCard)
    }

    /// MIME type of the exported buffer.
    pub fn mime_type(&self) -> &'static str {
        "application/pdf"
    }

    /// File extension of the exported buffer.
    pub fn extension(&self) -> &'static str {
        "pdf"
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height), portrait.
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_keys_round_trip() {
        for subject in Subject::ALL {
            assert_eq!(Subject::from_key(subject.key()), Some(subject));
        }
    }

    #[test]
    fn subject_key_spellings() {
        assert_eq!(Subject::from_key("social_studies"), Some(Subject::SocialStudies));
        assert_eq!(Subject::from_key("GK"), Some(Subject::Gk));
        assert_eq!(Subject::from_key("physics"), None);
    }

    #[test]
    fn subject_order_matches_card() {
        let mut sorted = Subject::ALL;
        sorted.sort();
        assert_eq!(sorted, Subject::ALL);
    }

    #[test]
    fn subject_serializes_as_camel_case() {
        let json = serde_json::to_string(&Subject::SocialStudies).unwrap();
        assert_eq!(json, "\"socialStudies\"");
    }

    #[test]
    fn blank_roll_number_is_missing() {
        assert!(!ExportIdentity::new("Asha", "   ").has_roll_number());
        assert!(ExportIdentity::new("Asha", "12").has_roll_number());
    }

    #[test]
    fn only_result_card_needs_result() {
        assert!(DocumentKind::ResultCard.requires_result());
        assert!(!DocumentKind::AdmitCard.requires_result());
        assert_eq!(DocumentKind::AdmitCard.file_stem(), "admit_card");
    }
}
