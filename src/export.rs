//! Relationship-chart data export.
//!
//! The core transform of the crate: one pass over every person in a
//! [`FamilyTree`], flattening each into a [`PersonRecord`] and writing the
//! whole collection to `persons.js` in the output directory, alongside a
//! `thumbs/` folder of copied thumbnail images. The emitted directory is
//! self-contained: the chart front-end renders it without ever querying the
//! database again.
//!
//! ## Output contract
//!
//! `persons.js` is a two-statement script file consumed verbatim by the
//! front-end; both variable names and the 2-space JSON indent are fixed:
//!
//! ```text
//! personsSource = [ ...PersonRecord array... ];
//! var startPersonId = "I0001";
//! ```
//!
//! ## Privacy
//!
//! With `include_private` off, private persons are skipped entirely, private
//! families disappear from `childOf`/`parentOf`, and private media are
//! passed over when picking the icon. Exclusions are silent; the summary
//! carries a count.
//!
//! ## Failure policy
//!
//! Output-directory creation failure is notified to the user and aborts
//! before any further side effect. Unresolvable references and unknown
//! dates degrade to absent fields. Thumbnail generation, thumbnail copies
//! and the data-file write are fatal: a run either completes or errors out,
//! leaving whatever was already on disk.

use crate::db::FamilyTree;
use crate::feedback::{Notifier, Progress, ProgressScope};
use crate::model::{Gender, Person};
use crate::naming;
use crate::thumbs::{ThumbnailError, ThumbnailProvider};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Data file written into the output directory.
pub const DATA_FILENAME: &str = "persons.js";

/// Thumbnail subdirectory of the output directory.
pub const THUMBS_DIRNAME: &str = "thumbs";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Could not create the directory {dir}: {err}", dir = .0.display(), err = .1)]
    DirCreation(PathBuf, #[source] std::io::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Thumbnail error: {0}")]
    Thumbnail(#[from] ThumbnailError),
}

/// User-chosen export inputs.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    /// Chart center, passed through to the front-end unresolved.
    pub start_person: String,
    /// Prefix for per-person page links; empty disables links.
    pub link_prefix: String,
    pub include_private: bool,
}

/// One person, flattened for the chart front-end.
///
/// Field order is the serialization order and must stay fixed. Absent
/// values serialize as JSON `null`, not as missing keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub id: String,
    pub name: String,
    pub fullname: String,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub bdate: Option<String>,
    pub ddate: Option<String>,
    pub gender: Option<char>,
    pub child_of: Vec<String>,
    pub parent_of: Vec<String>,
}

/// Result of a completed export, for the CLI summary.
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub records: Vec<PersonRecord>,
    pub private_skipped: usize,
    pub thumbnails_written: usize,
    pub start_person: String,
}

/// Run the full export: directories, one pass over all persons, data file.
pub fn export(
    db: &impl FamilyTree,
    thumbs: &impl ThumbnailProvider,
    progress: &impl Progress,
    notifier: &impl Notifier,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let thumb_dir = options.output_dir.join(THUMBS_DIRNAME);
    ensure_dir(&options.output_dir, notifier)?;
    ensure_dir(&thumb_dir, notifier)?;

    let handles = db.person_handles();
    let mut summary = ExportSummary {
        start_person: options.start_person.clone(),
        ..ExportSummary::default()
    };

    {
        let scope = ProgressScope::begin(
            progress,
            "Web relations tree export",
            "Collecting person records",
            handles.len(),
        );
        for handle in &handles {
            let Some(person) = db.person(handle) else {
                scope.advance();
                continue;
            };
            if person.private && !options.include_private {
                summary.private_skipped += 1;
                scope.advance();
                continue;
            }

            let icon = person_icon(db, thumbs, person, &thumb_dir, options.include_private)?;
            if icon.is_some() {
                summary.thumbnails_written += 1;
            }

            summary.records.push(PersonRecord {
                id: person.id.clone(),
                name: naming::short_name(&person.name),
                fullname: naming::full_name(&person.name),
                url: person_url(&options.link_prefix, &person.handle),
                icon,
                bdate: event_date(db, person.birth.as_deref()),
                ddate: event_date(db, person.death.as_deref()),
                gender: gender_char(person.gender),
                child_of: family_ids(db, &person.child_of, options.include_private),
                parent_of: family_ids(db, &person.parent_of, options.include_private),
            });
            scope.advance();
        }
    }

    write_persons_js(&summary.records, &options.start_person, &options.output_dir)?;
    Ok(summary)
}

/// Check-then-create. Racing creators are undefined behavior, accepted for
/// a one-shot batch tool.
fn ensure_dir(dir: &Path, notifier: &impl Notifier) -> Result<(), ExportError> {
    if dir.is_dir() {
        return Ok(());
    }
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(err) => {
            notifier.notify_error(&format!("Could not create the directory: {}", err));
            Err(ExportError::DirCreation(dir.to_path_buf(), err))
        }
    }
}

/// Personal-page URL under the companion site's sharding scheme: two bucket
/// levels from the trailing handle characters, lower-cased, then
/// `<handle>.html`. Every segment is stripped of surrounding slashes before
/// joining. An empty prefix disables links entirely.
fn person_url(prefix: &str, handle: &str) -> Option<String> {
    if prefix.is_empty() {
        return None;
    }
    let mut tail = handle.chars().rev();
    let last = tail.next()?.to_ascii_lowercase().to_string();
    let second = tail.next()?.to_ascii_lowercase().to_string();
    let page = format!("{}.html", handle);

    let segments = [prefix, "ppl", &last, &second, &page];
    Some(
        segments
            .iter()
            .map(|s| s.trim_matches('/'))
            .collect::<Vec<_>>()
            .join("/"),
    )
}

/// Resolve an event handle to a formatted date. Absent event, absent date,
/// or a zero year all collapse to `None`; partial dates are never emitted.
fn event_date(db: &impl FamilyTree, handle: Option<&str>) -> Option<String> {
    let date = db.event(handle?)?.date?;
    if date.year == 0 {
        return None;
    }
    Some(format!("{:04}-{:02}-{:02}", date.year, date.month, date.day))
}

fn gender_char(gender: Gender) -> Option<char> {
    match gender {
        Gender::Male => Some('m'),
        Gender::Female => Some('f'),
        Gender::Unknown => None,
    }
}

/// Map family handles to exported ids, dropping unresolvable handles and,
/// without `include_private`, private families. Order is preserved.
fn family_ids(db: &impl FamilyTree, handles: &[String], include_private: bool) -> Vec<String> {
    handles
        .iter()
        .filter_map(|handle| db.family(handle))
        .filter(|family| include_private || !family.private)
        .map(|family| family.id.clone())
        .collect()
}

/// Pick and materialize the person's icon.
///
/// The first media reference that resolves and survives the privacy filter
/// is used; a chosen media without a MIME type yields no icon. The
/// thumbnail is copied into `thumbs/` under the media handle, with the crop
/// region appended to the filename when present.
fn person_icon(
    db: &impl FamilyTree,
    thumbs: &impl ThumbnailProvider,
    person: &Person,
    thumb_dir: &Path,
    include_private: bool,
) -> Result<Option<String>, ExportError> {
    let chosen = person.media.iter().find_map(|media_ref| {
        let media = db.media(&media_ref.media)?;
        if media.private && !include_private {
            return None;
        }
        Some((media_ref, media))
    });
    let Some((media_ref, media)) = chosen else {
        return Ok(None);
    };
    if media.mime.is_empty() {
        return Ok(None);
    }

    let src = thumbs.resolve(Path::new(&media.path), &media.mime, media_ref.region)?;
    let filename = match media_ref.region {
        Some(region) => format!("{}{}.png", media.handle, region),
        None => format!("{}.png", media.handle),
    };
    fs::copy(&src, thumb_dir.join(&filename))?;
    Ok(Some(format!("{}/{}", THUMBS_DIRNAME, filename)))
}

/// Write the two-statement data file. Serialization is deterministic, so
/// re-exporting unchanged data reproduces the file byte for byte.
pub fn write_persons_js(
    records: &[PersonRecord],
    start_person: &str,
    output_dir: &Path,
) -> Result<PathBuf, ExportError> {
    let json = serde_json::to_string_pretty(records)?;
    let path = output_dir.join(DATA_FILENAME);
    fs::write(
        &path,
        format!(
            "personsSource = {};\nvar startPersonId = \"{}\";\n",
            json, start_person
        ),
    )?;
    Ok(path)
}

/// Parse a data file back into records and start id. Returns `None` when
/// the text does not match the emitted shape.
pub fn parse_persons_js(text: &str) -> Option<(Vec<PersonRecord>, String)> {
    let rest = text.strip_prefix("personsSource = ")?;
    let (json, tail) = rest.split_once(";\nvar startPersonId = \"")?;
    let start = tail.strip_suffix("\";\n")?;
    let records = serde_json::from_str(json).ok()?;
    Some((records, start.to_string()))
}
