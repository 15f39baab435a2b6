// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use marksheet_core::Subject;

#[derive(Debug, Parser)]
#[command(name = "marksheet")]
#[command(about = "Grade marks and export admit / result cards as single-page PDFs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// JSON configuration file (missing fields take their defaults)
    #[arg(short, long, global = true, env = "MARKSHEET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `marksheet_document=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Grade a set of marks and print the result
    Grade {
        /// Subject mark as `subject=value`, e.g. `--mark maths=19` (repeatable)
        #[arg(short, long = "mark", value_parser = parse_mark_arg)]
        marks: Vec<(Subject, String)>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Calculate a student's result and export the result card
    ResultCard {
        #[command(flatten)]
        student: StudentArgs,

        #[command(flatten)]
        export: ExportArgs,

        /// Exam name printed under the school name
        #[arg(long)]
        exam: Option<String>,

        /// Subject mark as `subject=value` (repeatable)
        #[arg(short, long = "mark", value_parser = parse_mark_arg)]
        marks: Vec<(Subject, String)>,
    },

    /// Export a student's admit card
    AdmitCard {
        #[command(flatten)]
        student: StudentArgs,

        #[command(flatten)]
        export: ExportArgs,

        /// Exam the student is admitted to
        #[arg(long)]
        exam: Option<String>,

        /// Date the exam commences
        #[arg(long)]
        date: Option<String>,

        /// Student contact number
        #[arg(long)]
        contact: Option<String>,

        /// Student photo placed in the card's photo box
        #[arg(long)]
        photo: Option<PathBuf>,

        /// URL the photo is served from (recorded on the card)
        #[arg(long)]
        photo_url: Option<String>,

        /// The photo comes from another origin
        #[arg(long)]
        photo_cross_origin: bool,

        /// The other origin allows reading the photo back (CORS)
        #[arg(long, requires = "photo_cross_origin")]
        photo_cors: bool,
    },
}

/// Who the card is for.
#[derive(Debug, Args)]
pub struct StudentArgs {
    /// Student name
    #[arg(long)]
    pub name: String,

    /// Father's name
    #[arg(long, default_value = "")]
    pub father: String,

    /// Mother's name
    #[arg(long, default_value = "")]
    pub mother: String,

    /// Class name, e.g. `VII-A`
    #[arg(long = "class")]
    pub class_name: String,

    /// Roll number (required to export)
    #[arg(short, long, default_value = "")]
    pub roll: String,
}

/// Where the card comes from and where the PDF goes.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Rendered card image (PNG/JPEG) to place on the page
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Directory the PDF is written to
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Print the export receipt as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse `subject=value`. The value is kept as typed; the grading engine
/// decides what it means.
pub fn parse_mark_arg(arg: &str) -> Result<(Subject, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected `subject=value`, got `{arg}`"))?;
    let subject = Subject::from_key(key).ok_or_else(|| {
        let known: Vec<_> = Subject::ALL.iter().map(|s| s.key()).collect();
        format!("unknown subject `{key}` (expected one of: {})", known.join(", "))
    })?;
    Ok((subject, value.to_owned()))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn mark_argument_forms() {
        assert_eq!(
            parse_mark_arg("socialStudies=14").unwrap(),
            (Subject::SocialStudies, "14".to_owned())
        );
        assert_eq!(
            parse_mark_arg("social_studies= 9 ").unwrap(),
            (Subject::SocialStudies, " 9 ".to_owned())
        );
        assert_eq!(parse_mark_arg("gk=").unwrap(), (Subject::Gk, String::new()));
        assert!(parse_mark_arg("maths").is_err());
        assert!(parse_mark_arg("music=12").unwrap_err().contains("unknown subject"));
    }

    #[test]
    fn parses_result_card_invocation() {
        let cli = Cli::try_parse_from([
            "marksheet",
            "--log-level",
            "debug",
            "result-card",
            "--name",
            "Asha Verma",
            "--class",
            "VII-A",
            "--roll",
            "12",
            "--mark",
            "english=18",
            "-m",
            "maths=19",
            "--snapshot",
            "card.png",
            "--out",
            "pdfs",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        let Command::ResultCard {
            student,
            export,
            marks,
            exam,
        } = cli.command
        else {
            panic!("expected result-card");
        };
        assert_eq!(student.name, "Asha Verma");
        assert_eq!(student.roll, "12");
        assert_eq!(marks.len(), 2);
        assert!(exam.is_none());
        assert_eq!(export.out, PathBuf::from("pdfs"));
    }

    #[test]
    fn cors_flag_needs_cross_origin() {
        let result = Cli::try_parse_from([
            "marksheet",
            "admit-card",
            "--name",
            "Ravi",
            "--class",
            "X-B",
            "--photo-cors",
        ]);
        assert!(result.is_err());
    }
}
