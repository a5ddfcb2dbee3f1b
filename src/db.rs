//! Read-only access to a genealogy database snapshot.
//!
//! The exporter never talks to live storage. It depends on the [`FamilyTree`]
//! trait (four handle lookups plus one enumeration) and [`SnapshotDb`]
//! implements it over a JSON snapshot file:
//!
//! ```json
//! {
//!   "persons":  [ {"handle": "p1", "id": "I0001", ...}, ... ],
//!   "families": [ {"handle": "f1", "id": "F0001"}, ... ],
//!   "events":   [ {"handle": "e1", "date": {"year": 1850, ...}}, ... ],
//!   "media":    [ {"handle": "m1", "id": "O0001", "path": "...", ...}, ... ]
//! }
//! ```
//!
//! Person enumeration order is the snapshot's array order and is preserved
//! all the way into the exported data file.
//!
//! ## Validation
//!
//! Loading rejects duplicate handles within a collection. Cross-references
//! are *not* validated at load; a missing event/family/media behaves as
//! "data absent" during export, but [`SnapshotDb::dangling_references`]
//! reports them for the `check` command.

use crate::model::{Event, Family, Media, Person};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate {0} handle: {1}")]
    DuplicateHandle(&'static str, String),
}

/// Narrow read-only view of a genealogy database.
///
/// Lookup misses return `None`; the exporter treats them as absent data,
/// never as a fatal condition.
pub trait FamilyTree {
    /// All person handles in stable enumeration order.
    fn person_handles(&self) -> Vec<String>;

    fn person(&self, handle: &str) -> Option<&Person>;

    fn family(&self, handle: &str) -> Option<&Family>;

    fn event(&self, handle: &str) -> Option<&Event>;

    fn media(&self, handle: &str) -> Option<&Media>;
}

/// Raw snapshot file contents. All collections are optional so sparse
/// fixtures stay readable.
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub families: Vec<Family>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub media: Vec<Media>,
}

/// In-memory database built from a [`Snapshot`].
///
/// Persons keep their array order for enumeration; everything else is
/// indexed by handle.
#[derive(Debug)]
pub struct SnapshotDb {
    persons: Vec<Person>,
    person_index: HashMap<String, usize>,
    families: HashMap<String, Family>,
    events: HashMap<String, Event>,
    media: HashMap<String, Media>,
}

impl SnapshotDb {
    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        Self::from_snapshot(snapshot)
    }

    /// Build the indexed database, rejecting duplicate handles.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        let mut person_index = HashMap::with_capacity(snapshot.persons.len());
        for (i, person) in snapshot.persons.iter().enumerate() {
            if person_index.insert(person.handle.clone(), i).is_some() {
                return Err(SnapshotError::DuplicateHandle(
                    "person",
                    person.handle.clone(),
                ));
            }
        }

        Ok(Self {
            persons: snapshot.persons,
            person_index,
            families: index_by_handle("family", snapshot.families, |f| &f.handle)?,
            events: index_by_handle("event", snapshot.events, |e| &e.handle)?,
            media: index_by_handle("media", snapshot.media, |m| &m.handle)?,
        })
    }

    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn media_count(&self) -> usize {
        self.media.len()
    }

    /// Cross-references that do not resolve, as `"<kind> <handle> (referenced
    /// by person <id>)"` lines in person enumeration order.
    ///
    /// These are tolerated by the export (the fields degrade to absent) but
    /// usually indicate a broken snapshot, so `check` surfaces them.
    pub fn dangling_references(&self) -> Vec<String> {
        let mut dangling = Vec::new();
        for person in &self.persons {
            let mut report = |kind: &str, handle: &str| {
                dangling.push(format!(
                    "{} {} (referenced by person {})",
                    kind, handle, person.id
                ));
            };

            for handle in person.birth.iter().chain(person.death.iter()) {
                if !self.events.contains_key(handle) {
                    report("event", handle);
                }
            }
            for handle in person.child_of.iter().chain(person.parent_of.iter()) {
                if !self.families.contains_key(handle) {
                    report("family", handle);
                }
            }
            for media_ref in &person.media {
                if !self.media.contains_key(&media_ref.media) {
                    report("media", &media_ref.media);
                }
            }
        }
        dangling
    }
}

impl FamilyTree for SnapshotDb {
    fn person_handles(&self) -> Vec<String> {
        self.persons.iter().map(|p| p.handle.clone()).collect()
    }

    fn person(&self, handle: &str) -> Option<&Person> {
        self.person_index.get(handle).map(|&i| &self.persons[i])
    }

    fn family(&self, handle: &str) -> Option<&Family> {
        self.families.get(handle)
    }

    fn event(&self, handle: &str) -> Option<&Event> {
        self.events.get(handle)
    }

    fn media(&self, handle: &str) -> Option<&Media> {
        self.media.get(handle)
    }
}

fn index_by_handle<T>(
    kind: &'static str,
    items: Vec<T>,
    handle: impl Fn(&T) -> &String,
) -> Result<HashMap<String, T>, SnapshotError> {
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        let key = handle(&item).clone();
        if map.insert(key.clone(), item).is_some() {
            return Err(SnapshotError::DuplicateHandle(kind, key));
        }
    }
    Ok(map)
}

/// Resolve the snapshot path for a database argument: a directory means
/// `<dir>/tree.json`, anything else is used as-is.
pub fn snapshot_path(database: &Path) -> PathBuf {
    if database.is_dir() {
        database.join("tree.json")
    } else {
        database.to_path_buf()
    }
}
