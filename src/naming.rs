//! Display-name assembly for person records.
//!
//! A person's primary name carries one given name and an ordered list of
//! surname entries, each flagged primary or not. Both exported name forms are
//! built from the same parts:
//!
//! - **Short name** (`name` in the chart data): given name with the primary
//!   surname in front, as shown on a chart node.
//!   `Jane` + `[Doe, Smith*]` → `"Smith Jane"`
//! - **Full name** (`fullname`): given name with *all* surnames, primaries
//!   in front and the rest appended, as shown in the detail popup.
//!   `Jane` + `[Doe, Smith*]` → `"Smith Jane Doe"`
//!
//! Empty surname strings are skipped in both forms.

use crate::model::Name;

/// Short display form: given name prefixed by the first primary surname.
///
/// Surnames are scanned in order; the first non-empty entry flagged primary
/// is placed in front and scanning stops. Without any primary surname the
/// result is just the given name.
pub fn short_name(name: &Name) -> String {
    let mut parts = vec![name.given.as_str()];
    for entry in &name.surnames {
        if entry.surname.is_empty() {
            continue;
        }
        if entry.primary {
            parts.insert(0, &entry.surname);
            break;
        }
    }
    parts.join(" ")
}

/// Full display form: given name with every non-empty surname.
///
/// Primary surnames are pushed to the front, non-primary ones appended to
/// the end, in scan order. With more than one primary surname the last one
/// scanned ends up in front.
pub fn full_name(name: &Name) -> String {
    let mut parts = vec![name.given.as_str()];
    for entry in &name.surnames {
        if entry.surname.is_empty() {
            continue;
        }
        if entry.primary {
            parts.insert(0, &entry.surname);
        } else {
            parts.push(&entry.surname);
        }
    }
    parts.join(" ")
}
