// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the card dialogs.
//
// Every error is surfaced at the dialog boundary as a short message plus a
// suggestion. Nothing here is retried automatically; `Severity` only tells the
// dialog which field the user should look at.

use crate::error::MarksheetError;

/// What the user has to do about an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fix the entered data (marks, roll number) and try again.
    Correctable,
    /// Nothing wrong with the input; the user may press the button again.
    Retryable,
    /// An internal problem the user cannot fix from the dialog.
    Internal,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanError {
    /// Plain English summary (shown in the dialog's alert).
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Drives which control the dialog highlights.
    pub severity: Severity,
}

/// Convert a `MarksheetError` into the message shown in the dialog.
pub fn humanize_error(err: &MarksheetError) -> HumanError {
    match err {
        MarksheetError::InvalidMark { subject, max, .. } => HumanError {
            message: format!("Please enter correct marks (maximum {max} per subject)"),
            suggestion: format!("Check the marks entered for {}.", subject.display_name()),
            severity: Severity::Correctable,
        },

        MarksheetError::MissingRollNumber => HumanError {
            message: "Roll number is required.".into(),
            suggestion: "Enter the student's roll number before downloading.".into(),
            severity: Severity::Correctable,
        },

        MarksheetError::NotCalculated => HumanError {
            message: "Results have not been calculated yet.".into(),
            suggestion: "Press \"Calculate Results\" before downloading the result card.".into(),
            severity: Severity::Correctable,
        },

        MarksheetError::InvalidState(detail) => HumanError {
            message: "That action isn't available right now.".into(),
            suggestion: format!("Wait for the current step to finish. ({detail})"),
            severity: Severity::Retryable,
        },

        MarksheetError::TaintedCanvas(source) => HumanError {
            message: "Failed to generate PDF. Please try again.".into(),
            suggestion: format!(
                "An image on the card could not be read ({source}). Remove the photo or load it from this site."
            ),
            severity: Severity::Retryable,
        },

        MarksheetError::MissingTemplate
        | MarksheetError::RenderTimeout(_)
        | MarksheetError::Render(_)
        | MarksheetError::PdfError(_)
        | MarksheetError::ImageError(_) => HumanError {
            message: "Failed to generate PDF. Please try again.".into(),
            suggestion: "Close any other downloads and press Download PDF again.".into(),
            severity: Severity::Retryable,
        },

        MarksheetError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The file couldn't be saved.".into(),
                    suggestion: "Choose a folder you are allowed to write to.".into(),
                    severity: Severity::Correctable,
                }
            } else {
                HumanError {
                    message: "There was a problem saving the file.".into(),
                    suggestion: "Try again. If this keeps happening, your storage may be full."
                        .into(),
                    severity: Severity::Retryable,
                }
            }
        }

        MarksheetError::Serialization(_) => HumanError {
            message: "The app had an internal data problem.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            severity: Severity::Internal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Subject;

    #[test]
    fn invalid_mark_is_correctable() {
        let err = MarksheetError::InvalidMark {
            subject: Subject::Gk,
            value: 25,
            max: 20,
        };
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Correctable);
        assert_eq!(human.message, "Please enter correct marks (maximum 20 per subject)");
        assert!(human.suggestion.contains("GK"));
    }

    #[test]
    fn render_failures_share_download_message() {
        for err in [
            MarksheetError::MissingTemplate,
            MarksheetError::RenderTimeout(std::time::Duration::from_secs(30)),
            MarksheetError::TaintedCanvas("https://cdn.example/photo.png".into()),
        ] {
            let human = humanize_error(&err);
            assert_eq!(human.message, "Failed to generate PDF. Please try again.");
            assert_eq!(human.severity, Severity::Retryable);
        }
    }

    #[test]
    fn permission_denied_is_correctable() {
        let err = MarksheetError::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert_eq!(humanize_error(&err).severity, Severity::Correctable);
    }
}
