//! CLI output formatting for export and check runs.
//!
//! Output is information-centric: every person leads with its positional
//! index and display name, with dates, icon and family links as indented
//! context lines. Each command has a `format_*` function (returns
//! `Vec<String>`) for testability and a `print_*` wrapper that writes to
//! stdout. Format functions are pure: no I/O, no side effects.
//!
//! ```text
//! Persons
//! 001 Smith Jane (I0001)
//!     Born: 1850-03-02
//!     Died: 1910-11-20
//!     Icon: thumbs/b4df00d.png
//!     Parent of: F0001
//!
//! Exported 3 persons, 1 thumbnails (1 private records excluded)
//! ```

use crate::db::SnapshotDb;
use crate::export::{ExportSummary, PersonRecord};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Header line for one exported person: index, display name, stable id.
fn person_header(index: usize, record: &PersonRecord) -> String {
    format!("{} {} ({})", format_index(index), record.name, record.id)
}

// ============================================================================
// Export output
// ============================================================================

/// Format the post-export inventory.
pub fn format_export_output(summary: &ExportSummary) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Persons".to_string());
    for (i, record) in summary.records.iter().enumerate() {
        lines.push(person_header(i + 1, record));
        if let Some(ref bdate) = record.bdate {
            lines.push(format!("    Born: {}", bdate));
        }
        if let Some(ref ddate) = record.ddate {
            lines.push(format!("    Died: {}", ddate));
        }
        if let Some(ref icon) = record.icon {
            lines.push(format!("    Icon: {}", icon));
        }
        if !record.child_of.is_empty() {
            lines.push(format!("    Child of: {}", record.child_of.join(", ")));
        }
        if !record.parent_of.is_empty() {
            lines.push(format!("    Parent of: {}", record.parent_of.join(", ")));
        }
    }

    lines.push(String::new());
    if !summary.start_person.is_empty() {
        lines.push(format!("Start person: {}", summary.start_person));
    }
    let mut total = format!(
        "Exported {} persons, {} thumbnails",
        summary.records.len(),
        summary.thumbnails_written
    );
    if summary.private_skipped > 0 {
        total.push_str(&format!(
            " ({} private records excluded)",
            summary.private_skipped
        ));
    }
    lines.push(total);

    lines
}

/// Print export output to stdout.
pub fn print_export_output(summary: &ExportSummary) {
    for line in format_export_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the snapshot inventory and reference audit for `check`.
pub fn format_check_output(db: &SnapshotDb) -> Vec<String> {
    let mut lines = vec![
        "Snapshot".to_string(),
        format!("    {} persons", db.person_count()),
        format!("    {} families", db.family_count()),
        format!("    {} events", db.event_count()),
        format!("    {} media objects", db.media_count()),
        String::new(),
    ];

    let dangling = db.dangling_references();
    if dangling.is_empty() {
        lines.push("No dangling references".to_string());
    } else {
        lines.push("Dangling references".to_string());
        for entry in dangling {
            lines.push(format!("    {}", entry));
        }
    }

    lines
}

/// Print check output to stdout.
pub fn print_check_output(db: &SnapshotDb) {
    for line in format_check_output(db) {
        println!("{}", line);
    }
}
