// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dialog phases.

use marksheet_grading::ComputedResult;

/// Where a card dialog is in its lifecycle.
///
/// ```text
/// Idle --open--> Editing --calculate--> Calculated    (result card only)
///                   ^                       |
///                   `------ edit mark ------'
///
/// Editing | Calculated --export--> Exporting --ok--> Idle
///                                      `--err--> phase it started from
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DialogPhase {
    /// Closed. Nothing entered, nothing shown.
    Idle,
    /// Open, fields editable.
    Editing,
    /// Result computed; marks are read-only until one is edited again.
    Calculated(ComputedResult),
    /// A document is being produced. `result` is the computed result held
    /// when the export started, restored if the export fails.
    Exporting { result: Option<ComputedResult> },
}

impl DialogPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Editing => "editing",
            Self::Calculated(_) => "calculated",
            Self::Exporting { .. } => "exporting",
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// The busy flag: an export is in flight.
    pub fn is_exporting(&self) -> bool {
        matches!(self, Self::Exporting { .. })
    }

    /// Computed result visible in this phase, if any.
    pub fn result(&self) -> Option<&ComputedResult> {
        match self {
            Self::Calculated(result) => Some(result),
            Self::Exporting { result } => result.as_ref(),
            _ => None,
        }
    }

    /// Phase to fall back to when an export started from here fails.
    pub(crate) fn before_export(result: Option<ComputedResult>) -> Self {
        match result {
            Some(result) => Self::Calculated(result),
            None => Self::Editing,
        }
    }
}

impl std::fmt::Display for DialogPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use marksheet_grading::{GradingRules, MarkSet, compute_result};

    use super::*;

    #[test]
    fn exporting_keeps_prior_result() {
        let result = compute_result(&MarkSet::new(), &GradingRules::default()).unwrap();
        let phase = DialogPhase::Exporting {
            result: Some(result.clone()),
        };
        assert!(phase.is_exporting());
        assert_eq!(phase.result(), Some(&result));
        assert_eq!(
            DialogPhase::before_export(Some(result.clone())),
            DialogPhase::Calculated(result)
        );
        assert_eq!(DialogPhase::before_export(None), DialogPhase::Editing);
    }

    #[test]
    fn idle_is_closed() {
        assert!(!DialogPhase::Idle.is_open());
        assert!(DialogPhase::Editing.is_open());
        assert_eq!(DialogPhase::Editing.to_string(), "editing");
    }
}
