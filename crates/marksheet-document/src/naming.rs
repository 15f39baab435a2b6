// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Download filenames: `<kind>_<name>_<roll>.pdf`.

use marksheet_core::{DocumentKind, ExportIdentity};

/// Filename for an exported card.
///
/// The display name is kept as written (spaces included). Path separators and
/// control characters are replaced with `_` so the result is always a single
/// path component.
pub fn export_filename(kind: DocumentKind, identity: &ExportIdentity) -> String {
    format!(
        "{}_{}_{}.{}",
        kind.file_stem(),
        sanitize(&identity.display_name),
        sanitize(identity.roll_number.trim()),
        kind.extension()
    )
}

fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
