// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Admit card content and photo placement.

use std::fmt;
use std::sync::Arc;

use marksheet_core::{AppConfig, ClassInfo, StudentRecord};
use serde::Serialize;

use super::{FieldRow, SchoolHeader, roll_or_placeholder, write_rows};
use crate::template::{Layer, Origin, Rect};

pub const NOTE: &str =
    "Note: Keep this card safely and must bring to the exam venue on every exam date.";

pub const SIGNATURES: [&str; 3] = ["Principal", "School Seal", "Exam Controller"];

/// Logical size of the student photo box.
pub const PHOTO_WIDTH: u32 = 80;
pub const PHOTO_HEIGHT: u32 = 100;

/// Logical size of the school logo box.
pub const LOGO_SIZE: u32 = 80;

/// Inset of the photo box from the card's top-right corner.
const PHOTO_INSET_X: u32 = 24;
const PHOTO_INSET_Y: u32 = 140;

/// Everything printed on an admit card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdmitCardView {
    pub header: SchoolHeader,
    pub title: &'static str,
    pub fields: Vec<FieldRow>,
    pub exam_name: String,
    pub exam_date: String,
    /// URL of the student photo, if the record has one.
    pub photo_url: Option<String>,
}

impl AdmitCardView {
    pub fn new(
        config: &AppConfig,
        student: &StudentRecord,
        class: &ClassInfo,
        roll_number: &str,
        exam_name: &str,
        exam_date: &str,
    ) -> Self {
        let fields = vec![
            FieldRow::new("Name of Student", student.name.as_str()),
            FieldRow::new("Class", class.name.as_str()),
            FieldRow::new("Roll No.", roll_or_placeholder(roll_number)),
            FieldRow::new("Mother's Name", student.mother_name.as_str()),
            FieldRow::new("Father's Name", student.father_name.as_str()),
            FieldRow::new(
                "Contact No.",
                student.contact_number.clone().unwrap_or_default(),
            ),
        ];

        Self {
            header: SchoolHeader::from_config(config),
            title: "Admit Card",
            fields,
            exam_name: exam_name.to_owned(),
            exam_date: exam_date.to_owned(),
            photo_url: student.image_url.clone(),
        }
    }

    /// "is allowed to appear in the ... commencing from the date ..."
    pub fn eligibility_sentence(&self) -> String {
        format!(
            "is allowed to appear in the {} commencing from the date {}",
            self.exam_name, self.exam_date
        )
    }

    /// Photo box in the right-hand column of a card `card_width` pixels wide.
    pub fn photo_slot(card_width: u32) -> Rect {
        let x = card_width.saturating_sub(PHOTO_WIDTH + PHOTO_INSET_X);
        Rect::new(x as i32, PHOTO_INSET_Y as i32, PHOTO_WIDTH, PHOTO_HEIGHT)
    }

    /// Logo box in the top-left corner of the card.
    pub fn logo_slot() -> Rect {
        Rect::new(PHOTO_INSET_X as i32, PHOTO_INSET_X as i32, LOGO_SIZE, LOGO_SIZE)
    }

    /// Bitmap layer placing the student photo into [`Self::photo_slot`].
    ///
    /// Photos served from another origin are only readable with CORS approval.
    pub fn photo_layer(
        card_width: u32,
        source: impl Into<String>,
        data: Vec<u8>,
        origin: Origin,
    ) -> Layer {
        Layer::Bitmap {
            rect: Self::photo_slot(card_width),
            source: source.into(),
            origin,
            data: Arc::from(data),
        }
    }
}

impl fmt::Display for AdmitCardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header.name)?;
        for line in &self.header.address_lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        write_rows(f, &self.fields)?;
        writeln!(f)?;
        writeln!(f, "{}", self.eligibility_sentence())?;
        writeln!(f)?;
        writeln!(f, "{}", NOTE)?;
        writeln!(f)?;
        writeln!(f, "{}", SIGNATURES.join("    "))
    }
}
