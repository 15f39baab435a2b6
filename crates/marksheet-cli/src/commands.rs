// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subcommand implementations. Each card command drives a `CardDialog` the way
// the UI would: open, fill in fields, calculate (result card), export.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use marksheet_core::error::{MarksheetError, Result};
use marksheet_core::{AppConfig, ClassInfo, DocumentKind, StudentRecord, Subject};
use marksheet_dialog::{CardDialog, ExportOutcome, ExportReceipt};
use marksheet_document::integrity::short_digest;
use marksheet_document::{AdmitCardView, CanvasRasterizer, ExportPipeline, Origin, TemplateHandle};
use marksheet_grading::{ComputedResult, GradingRules, MarkSet, compute_result};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{Command, ExportArgs, StudentArgs};
use crate::sink::DirectorySink;

pub async fn run(command: Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Grade { marks, json } => grade(&marks, json),
        Command::ResultCard {
            student,
            export,
            exam,
            marks,
        } => result_card(config, student, export, exam, &marks).await,
        Command::AdmitCard {
            student,
            export,
            exam,
            date,
            contact,
            photo,
            photo_url,
            photo_cross_origin,
            photo_cors,
        } => {
            let photo = photo.map(|path| PhotoArgs {
                path,
                url: photo_url.clone(),
                origin: if photo_cross_origin {
                    Origin::CrossOrigin {
                        cors_approved: photo_cors,
                    }
                } else {
                    Origin::SameOrigin
                },
            });
            let mut record = student_record(&student);
            record.contact_number = contact;
            record.image_url = photo_url;
            admit_card(config, record, student, export, exam, date, photo).await
        }
    }
}

// -- grade --------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GradeReport<'a> {
    marks: &'a MarkSet,
    #[serde(flatten)]
    result: &'a ComputedResult,
    percentage_display: String,
}

fn grade(raw: &[(Subject, String)], json: bool) -> Result<()> {
    let marks = MarkSet::from_raw(raw.iter().map(|(subject, text)| (*subject, text.as_str())));
    let rules = GradingRules::default();
    let result = compute_result(&marks, &rules)?;

    if json {
        let report = GradeReport {
            marks: &marks,
            result: &result,
            percentage_display: result.percentage_display(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for &subject in rules.subjects() {
            println!(
                "{:<16} {:>2} / {}",
                subject.display_name(),
                marks.get(subject),
                rules.max_per_subject()
            );
        }
        println!("{:<16} {} / {}", "Total", result.total_marks(), rules.full_marks());
        println!("{:<16} {}%", "Percentage", result.percentage_display());
        println!("{:<16} {} ({})", "Grade", result.grade(), result.remark());
        println!("{:<16} {}", "Status", result.status());
    }
    Ok(())
}

// -- cards --------------------------------------------------------------------

struct PhotoArgs {
    path: PathBuf,
    url: Option<String>,
    origin: Origin,
}

fn student_record(args: &StudentArgs) -> StudentRecord {
    StudentRecord::new(args.name.as_str(), args.father.as_str(), args.mother.as_str())
}

async fn result_card(
    config: &AppConfig,
    student: StudentArgs,
    export: ExportArgs,
    exam: Option<String>,
    marks: &[(Subject, String)],
) -> Result<()> {
    let mut dialog = CardDialog::new(
        DocumentKind::ResultCard,
        config.clone(),
        student_record(&student),
        ClassInfo::new(student.class_name.as_str()),
    );
    dialog.open();
    dialog.set_roll_number(&student.roll)?;
    if let Some(exam) = exam {
        dialog.set_exam_name(&exam)?;
    }
    for (subject, raw) in marks {
        dialog.set_mark(*subject, raw)?;
    }
    dialog.calculate()?;

    if !export.json {
        println!("{}", dialog.preview());
    }

    let template = load_snapshot(export.snapshot.as_deref())?;
    finish(config, &mut dialog, template.as_ref(), &export).await
}

async fn admit_card(
    config: &AppConfig,
    record: StudentRecord,
    student: StudentArgs,
    export: ExportArgs,
    exam: Option<String>,
    date: Option<String>,
    photo: Option<PhotoArgs>,
) -> Result<()> {
    let mut dialog = CardDialog::new(
        DocumentKind::AdmitCard,
        config.clone(),
        record,
        ClassInfo::new(student.class_name.as_str()),
    );
    dialog.open();
    dialog.set_roll_number(&student.roll)?;
    if let Some(exam) = exam {
        dialog.set_exam_name(&exam)?;
    }
    if let Some(date) = date {
        dialog.set_exam_date(&date)?;
    }

    if !export.json {
        println!("{}", dialog.preview());
    }

    let mut template = load_snapshot(export.snapshot.as_deref())?;
    if let Some(photo) = photo {
        match template.as_mut() {
            Some(template) => {
                let data = std::fs::read(&photo.path)?;
                let source = photo
                    .url
                    .unwrap_or_else(|| photo.path.display().to_string());
                let card_width = template.width();
                template.push(AdmitCardView::photo_layer(
                    card_width,
                    source,
                    data,
                    photo.origin,
                ));
            }
            None => warn!("--photo given without --snapshot; photo ignored"),
        }
    }

    finish(config, &mut dialog, template.as_ref(), &export).await
}

fn load_snapshot(path: Option<&Path>) -> Result<Option<TemplateHandle>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bytes = std::fs::read(path)?;
    let template = TemplateHandle::from_snapshot(path.display().to_string(), bytes)?;
    info!(
        path = %path.display(),
        width = template.width(),
        height = template.height(),
        "Loaded card snapshot"
    );
    Ok(Some(template))
}

async fn finish(
    config: &AppConfig,
    dialog: &mut CardDialog,
    template: Option<&TemplateHandle>,
    export: &ExportArgs,
) -> Result<()> {
    let pipeline = ExportPipeline::from_config(Arc::new(CanvasRasterizer::new()), config);
    let sink = DirectorySink::new(export.out.clone());

    match dialog.export(&pipeline, template, &sink).await? {
        ExportOutcome::Delivered(receipt) => {
            report_receipt(&sink, &receipt, export.json)?;
            Ok(())
        }
        other => Err(MarksheetError::InvalidState(format!(
            "export did not complete: {other:?}"
        ))),
    }
}

#[derive(Serialize)]
struct ReceiptReport<'a> {
    #[serde(flatten)]
    receipt: &'a ExportReceipt,
    path: PathBuf,
}

fn report_receipt(sink: &DirectorySink, receipt: &ExportReceipt, json: bool) -> Result<()> {
    let path = sink.path_for(&receipt.filename);
    if json {
        let report = ReceiptReport {
            receipt,
            path: path.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Saved {} to {} ({} bytes, sha256 {})",
            receipt.filename,
            sink.dir().display(),
            receipt.bytes,
            short_digest(&receipt.sha256)
        );
    }
    Ok(())
}
