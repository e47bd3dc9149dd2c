//! Plain-text rendering of character diffs.

use namematch_model::{DiffKind, DiffResult};

/// Render a diff inline, grouping runs of edits.
///
/// Removed runs are written as `[-text-]` and added runs as `{+text+}`;
/// unchanged characters are written as-is.
pub fn inline_markup(diff: &DiffResult) -> String {
    let mut out = String::new();
    let mut open: Option<DiffKind> = None;
    for segment in &diff.segments {
        if open != Some(segment.kind) {
            close(&mut out, open);
            match segment.kind {
                DiffKind::Removed => out.push_str("[-"),
                DiffKind::Added => out.push_str("{+"),
                DiffKind::Unchanged => {}
            }
            open = Some(segment.kind);
        }
        out.push(segment.ch);
    }
    close(&mut out, open);
    out
}

fn close(out: &mut String, kind: Option<DiffKind>) {
    match kind {
        Some(DiffKind::Removed) => out.push_str("-]"),
        Some(DiffKind::Added) => out.push_str("+}"),
        Some(DiffKind::Unchanged) | None => {}
    }
}
