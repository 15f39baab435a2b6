// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card dialog: the state record behind one "Admit Card" / "Result Card"
// button.
//
// Export is split into `begin_export` (takes the busy flag and freezes the
// inputs into a ticket) and `finish_export` (applies the outcome). A UI that
// renders in another task holds the ticket in between; `export` runs both
// halves for callers that can await in place. Each open/close bumps the
// session number so completions for an earlier session are dropped.

use marksheet_core::error::{MarksheetError, Result};
use marksheet_core::human_errors::{HumanError, humanize_error};
use marksheet_core::{AppConfig, ClassInfo, DocumentKind, ExportIdentity, StudentRecord, Subject};
use marksheet_document::{
    AdmitCardView, DocumentSink, ExportPipeline, ExportedDocument, PageLayout, ResultCardView,
    TemplateHandle,
};
use marksheet_grading::{ComputedResult, GradingRules, MarkSet, compute_result};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::phase::DialogPhase;

/// Inputs frozen at the moment an export starts.
#[derive(Debug, Clone)]
pub struct ExportTicket {
    session: u64,
    pub kind: DocumentKind,
    pub identity: ExportIdentity,
    pub page: PageLayout,
}

impl ExportTicket {
    pub fn session(&self) -> u64 {
        self.session
    }
}

/// What the dialog reports after a delivered export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReceipt {
    pub filename: String,
    pub sha256: String,
    pub bytes: usize,
}

/// Result of an export request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The document reached the sink; the dialog is closed.
    Delivered(ExportReceipt),
    /// Another export was already in flight; nothing happened.
    Busy,
    /// The dialog was closed or reopened while rendering; the document was
    /// dropped without delivery.
    Discarded,
}

/// One card dialog for one student.
#[derive(Debug, Clone)]
pub struct CardDialog {
    kind: DocumentKind,
    config: AppConfig,
    rules: GradingRules,
    student: StudentRecord,
    class: ClassInfo,
    phase: DialogPhase,
    session: u64,
    roll_number: String,
    exam_name: String,
    exam_date: String,
    marks: MarkSet,
    last_error: Option<HumanError>,
}

impl CardDialog {
    /// A closed dialog for `student` in `class`.
    pub fn new(
        kind: DocumentKind,
        config: AppConfig,
        student: StudentRecord,
        class: ClassInfo,
    ) -> Self {
        let mut dialog = Self {
            kind,
            config,
            rules: GradingRules::default(),
            student,
            class,
            phase: DialogPhase::Idle,
            session: 0,
            roll_number: String::new(),
            exam_name: String::new(),
            exam_date: String::new(),
            marks: MarkSet::new(),
            last_error: None,
        };
        dialog.reset_fields();
        dialog
    }

    /// Grade against `rules` instead of the standard rule set.
    pub fn with_rules(mut self, rules: GradingRules) -> Self {
        self.rules = rules;
        self
    }

    fn reset_fields(&mut self) {
        self.roll_number.clear();
        self.exam_name = self.config.default_exam_name(self.kind).to_owned();
        self.exam_date = match self.kind {
            DocumentKind::AdmitCard => self.config.default_admit_exam_date.clone(),
            DocumentKind::ResultCard => String::new(),
        };
        self.marks = MarkSet::new();
        self.last_error = None;
    }

    // -- Lifecycle ------------------------------------------------------------

    /// Open the dialog with every field back at its default.
    pub fn open(&mut self) {
        self.session += 1;
        self.reset_fields();
        self.phase = DialogPhase::Editing;
        info!(kind = ?self.kind, student = %self.student.name, session = self.session, "Dialog opened");
    }

    /// Close the dialog, discarding everything entered. An export still in
    /// flight will be discarded when it completes.
    pub fn close(&mut self) {
        if self.phase.is_exporting() {
            debug!(session = self.session, "Closing with an export in flight");
        }
        self.session += 1;
        self.reset_fields();
        self.phase = DialogPhase::Idle;
    }

    // -- Field editing --------------------------------------------------------

    fn ensure_editable(&self, what: &str) -> Result<()> {
        match self.phase {
            DialogPhase::Idle => Err(MarksheetError::InvalidState(format!(
                "cannot edit {what}: dialog is closed"
            ))),
            DialogPhase::Exporting { .. } => Err(MarksheetError::InvalidState(format!(
                "cannot edit {what}: export in progress"
            ))),
            _ => Ok(()),
        }
    }

    pub fn set_roll_number(&mut self, roll_number: &str) -> Result<()> {
        self.ensure_editable("roll number")?;
        self.roll_number = roll_number.to_owned();
        Ok(())
    }

    pub fn set_exam_name(&mut self, exam_name: &str) -> Result<()> {
        self.ensure_editable("exam name")?;
        self.exam_name = exam_name.to_owned();
        Ok(())
    }

    /// Admit card only.
    pub fn set_exam_date(&mut self, exam_date: &str) -> Result<()> {
        if self.kind != DocumentKind::AdmitCard {
            return Err(MarksheetError::InvalidState(
                "the result card has no exam date".into(),
            ));
        }
        self.ensure_editable("exam date")?;
        self.exam_date = exam_date.to_owned();
        Ok(())
    }

    /// Record the text typed into a subject's field (result card only).
    ///
    /// Editing a mark after calculating discards the result and makes the
    /// marks editable again.
    pub fn set_mark(&mut self, subject: Subject, raw: &str) -> Result<()> {
        if !self.kind.requires_result() {
            return Err(MarksheetError::InvalidState(
                "the admit card has no marks".into(),
            ));
        }
        self.ensure_editable("marks")?;
        if matches!(self.phase, DialogPhase::Calculated(_)) {
            debug!(%subject, "Mark edited; discarding computed result");
            self.phase = DialogPhase::Editing;
        }
        self.marks.set_raw(subject, raw);
        Ok(())
    }

    // -- Calculation ----------------------------------------------------------

    /// Grade the entered marks (result card only).
    ///
    /// On an invalid mark the dialog stays in `Editing` and the error is kept
    /// in [`Self::last_error`].
    #[instrument(skip(self), fields(session = self.session))]
    pub fn calculate(&mut self) -> Result<ComputedResult> {
        if !self.kind.requires_result() {
            return Err(MarksheetError::InvalidState(
                "the admit card is not graded".into(),
            ));
        }
        match self.phase {
            DialogPhase::Editing => {}
            DialogPhase::Calculated(_) => {
                return Err(MarksheetError::InvalidState(
                    "results are already calculated; edit a mark first".into(),
                ));
            }
            ref other => {
                return Err(MarksheetError::InvalidState(format!(
                    "cannot calculate while {other}"
                )));
            }
        }

        match compute_result(&self.marks, &self.rules) {
            Ok(result) => {
                info!(
                    total = result.total_marks(),
                    grade = result.grade(),
                    status = %result.status(),
                    "Results calculated"
                );
                self.last_error = None;
                self.phase = DialogPhase::Calculated(result.clone());
                Ok(result)
            }
            Err(err) => {
                warn!(error = %err, "Calculation rejected");
                self.last_error = Some(humanize_error(&err));
                Err(err)
            }
        }
    }

    // -- Export ---------------------------------------------------------------

    fn export_guard(&self) -> Result<()> {
        if !self.phase.is_open() {
            return Err(MarksheetError::InvalidState("dialog is closed".into()));
        }
        if self.roll_number.trim().is_empty() {
            return Err(MarksheetError::MissingRollNumber);
        }
        if self.kind.requires_result() && self.phase.result().is_none() {
            return Err(MarksheetError::NotCalculated);
        }
        Ok(())
    }

    /// Whether the download button is enabled.
    pub fn can_export(&self) -> bool {
        !self.phase.is_exporting() && self.export_guard().is_ok()
    }

    /// Take the busy flag and freeze the export inputs.
    ///
    /// `Ok(None)` when an export is already in flight. Errors when the
    /// download button would be disabled.
    pub fn begin_export(&mut self) -> Result<Option<ExportTicket>> {
        if self.phase.is_exporting() {
            debug!(session = self.session, "Export already in flight; ignoring");
            return Ok(None);
        }
        self.export_guard()?;

        let result = self.phase.result().cloned();
        self.phase = DialogPhase::Exporting { result };
        self.last_error = None;

        let ticket = ExportTicket {
            session: self.session,
            kind: self.kind,
            identity: ExportIdentity::new(self.student.name.clone(), self.roll_number.trim()),
            page: PageLayout::for_card(&self.config, self.kind),
        };
        info!(session = ticket.session, kind = ?ticket.kind, "Export started");
        Ok(Some(ticket))
    }

    /// Apply the pipeline's outcome for `ticket`.
    ///
    /// A successful document is handed to `sink` and the dialog closes. A
    /// failure (rendering or delivery) is surfaced and the dialog returns to
    /// the phase the export started from. Outcomes for an earlier session are
    /// discarded.
    pub fn finish_export(
        &mut self,
        ticket: ExportTicket,
        outcome: Result<ExportedDocument>,
        sink: &dyn DocumentSink,
    ) -> Result<ExportOutcome> {
        if ticket.session != self.session || !self.phase.is_exporting() {
            debug!(
                ticket = ticket.session,
                current = self.session,
                "Discarding stale export completion"
            );
            return Ok(ExportOutcome::Discarded);
        }

        let delivered = outcome.and_then(|document| {
            sink.deliver(&document)?;
            Ok(ExportReceipt {
                filename: document.filename.clone(),
                sha256: document.sha256.clone(),
                bytes: document.len(),
            })
        });

        match delivered {
            Ok(receipt) => {
                info!(filename = %receipt.filename, "Document delivered; closing dialog");
                self.close();
                Ok(ExportOutcome::Delivered(receipt))
            }
            Err(err) => {
                warn!(error = %err, "Export failed");
                self.last_error = Some(humanize_error(&err));
                let prior = match std::mem::replace(&mut self.phase, DialogPhase::Idle) {
                    DialogPhase::Exporting { result } => result,
                    _ => None,
                };
                self.phase = DialogPhase::before_export(prior);
                Err(err)
            }
        }
    }

    /// Run a whole export: begin, render through `pipeline`, deliver to `sink`.
    pub async fn export(
        &mut self,
        pipeline: &ExportPipeline,
        template: Option<&TemplateHandle>,
        sink: &dyn DocumentSink,
    ) -> Result<ExportOutcome> {
        let Some(ticket) = self.begin_export()? else {
            return Ok(ExportOutcome::Busy);
        };
        let outcome = pipeline
            .export_document(ticket.kind, template, &ticket.page, &ticket.identity)
            .await;
        self.finish_export(ticket, outcome, sink)
    }

    // -- Views ----------------------------------------------------------------

    /// Content of the result card as currently entered.
    pub fn result_card_view(&self) -> ResultCardView {
        ResultCardView::new(
            &self.config,
            &self.student,
            &self.class,
            &self.exam_name,
            &self.roll_number,
        )
        .with_marks(&self.marks, &self.rules, self.phase.result())
    }

    /// Content of the admit card as currently entered.
    pub fn admit_card_view(&self) -> AdmitCardView {
        AdmitCardView::new(
            &self.config,
            &self.student,
            &self.class,
            &self.roll_number,
            &self.exam_name,
            &self.exam_date,
        )
    }

    /// Plain-text preview of this dialog's card.
    pub fn preview(&self) -> String {
        match self.kind {
            DocumentKind::AdmitCard => self.admit_card_view().to_string(),
            DocumentKind::ResultCard => self.result_card_view().to_string(),
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn phase(&self) -> &DialogPhase {
        &self.phase
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn result(&self) -> Option<&ComputedResult> {
        self.phase.result()
    }

    /// Marks are read-only once a result is shown.
    pub fn marks_editable(&self) -> bool {
        matches!(self.phase, DialogPhase::Editing)
    }

    pub fn marks(&self) -> &MarkSet {
        &self.marks
    }

    pub fn roll_number(&self) -> &str {
        &self.roll_number
    }

    pub fn exam_name(&self) -> &str {
        &self.exam_name
    }

    pub fn exam_date(&self) -> &str {
        &self.exam_date
    }

    pub fn last_error(&self) -> Option<&HumanError> {
        self.last_error.as_ref()
    }

    pub fn student(&self) -> &StudentRecord {
        &self.student
    }
}
