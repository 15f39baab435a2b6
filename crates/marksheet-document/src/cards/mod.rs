// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card view models: the text content of the admit and result cards.
//
// The UI layer lays these out and hands the rendered card to the export
// pipeline as a template. The `Display` impls give a plain-text preview.

pub mod admit;
pub mod result;

use marksheet_core::AppConfig;
use serde::Serialize;

pub use admit::AdmitCardView;
pub use result::ResultCardView;

/// Shown in place of a roll number that has not been entered yet.
pub const ROLL_PLACEHOLDER: &str = "______";

/// One `label: value` line in a card's identity block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRow {
    pub label: &'static str,
    pub value: String,
}

impl FieldRow {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// School name and address lines printed at the top of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchoolHeader {
    pub name: String,
    pub address_lines: Vec<String>,
}

impl SchoolHeader {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            name: config.school_name.clone(),
            address_lines: config.school_address_lines.clone(),
        }
    }
}

/// The entered roll number, or the placeholder when it is blank.
pub fn roll_or_placeholder(roll_number: &str) -> String {
    let trimmed = roll_number.trim();
    if trimmed.is_empty() {
        ROLL_PLACEHOLDER.to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn write_rows(f: &mut std::fmt::Formatter<'_>, rows: &[FieldRow]) -> std::fmt::Result {
    let width = rows.iter().map(|row| row.label.len()).max().unwrap_or(0);
    for row in rows {
        writeln!(f, "{:<width$} : {}", row.label, row.value, width = width)?;
    }
    Ok(())
}
