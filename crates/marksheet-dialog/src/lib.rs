// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// marksheet-dialog: The export dialog behind the "Admit Card" and
// "Result Card" buttons.
//
// Each dialog owns an explicit state record: the phase it is in, the fields
// the user typed, and the last error shown. Nothing is shared between dialogs.

pub mod dialog;
pub mod phase;

pub use dialog::{CardDialog, ExportOutcome, ExportReceipt, ExportTicket};
pub use phase::DialogPhase;
