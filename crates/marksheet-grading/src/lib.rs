// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// marksheet-grading: Grading rules engine for the result card.
//
// Turns raw per-subject marks into a validated total, a percentage, a letter
// grade with its remark, and a pass/fail verdict. Pure: no I/O, no shared state.

pub mod bands;
pub mod engine;
pub mod marks;

pub use bands::{GradeBand, STANDARD_BANDS};
pub use engine::{ComputedResult, GradingRules, PassStatus, compute_result};
pub use marks::{MarkSet, parse_mark};
