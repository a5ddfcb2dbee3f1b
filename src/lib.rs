//! # webreltree
//!
//! Exports a genealogy database snapshot as the data behind an interactive
//! relationship chart: one `persons.js` data file plus a folder of
//! thumbnail images, consumed by a static HTML/SVG front-end without any
//! further database access.
//!
//! # Architecture: One Pass, Trait Seams
//!
//! The export is a single sequential pass over every person record:
//!
//! ```text
//! snapshot (tree.json)  →  flatten persons  →  <output>/persons.js
//!                            ↘ resolve icons →  <output>/thumbs/*.png
//! ```
//!
//! Each record is flattened into a [`export::PersonRecord`]: display
//! names, formatted dates, a personal-page URL, a thumbnail path, and the
//! ids of the families the person belongs to as child and as parent. The
//! collection order is the snapshot's enumeration order; the front-end
//! treats it as a lookup table by id.
//!
//! Everything the exporter needs from the outside world sits behind a
//! trait, so the core transform has no opinion about storage, imaging or
//! UI:
//!
//! - [`db::FamilyTree`]: four handle lookups plus person enumeration,
//!   implemented by [`db::SnapshotDb`] over a JSON snapshot file.
//! - [`thumbs::ThumbnailProvider`]: thumbnail resolution, implemented by
//!   [`thumbs::ThumbnailCache`] with content-keyed on-disk caching.
//! - [`feedback::Progress`] / [`feedback::Notifier`]: step reporting and
//!   user-visible errors, implemented for the console and as no-ops.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Snapshot record types shared by db and export |
//! | [`db`] | `FamilyTree` trait, snapshot loading, reference audits |
//! | [`naming`] | Short/full display-name assembly |
//! | [`thumbs`] | Thumbnail provider trait and cached generator |
//! | [`feedback`] | Progress and notification capabilities |
//! | [`export`] | The core transform and `persons.js` serialization |
//! | [`config`] | `webreltree.toml` loading, validation, stock config |
//! | [`output`] | CLI result formatting (inventory of exported records) |
//!
//! # Design Decisions
//!
//! ## Privacy Filtering Is Structural
//!
//! Excluding a private person removes the record entirely (no
//! placeholder, no partial entry) and private families vanish from every
//! `childOf`/`parentOf` list in the same run. Both ends of a dropped
//! cross-reference disappear together, so the front-end never follows a
//! link into a record that privacy removed.
//!
//! ## Soft Lookups, Hard Writes
//!
//! A reference that does not resolve (event, family, media) degrades the
//! affected field to absent and the export continues. Filesystem failures
//! go the other way: directory creation aborts the run after notifying
//! the user, and thumbnail or data-file write errors propagate as fatal.
//! A run either completes or fails loudly; it never quietly emits a
//! truncated data file.
//!
//! ## Fixed Output Contract
//!
//! The front-end consumes `persons.js` verbatim, so the two-statement
//! shape, both variable names, the 2-space indent and the record field
//! order are all fixed. Serialization is deterministic: re-exporting an
//! unchanged snapshot reproduces the file byte for byte.

pub mod config;
pub mod db;
pub mod export;
pub mod feedback;
pub mod model;
pub mod naming;
pub mod output;
pub mod thumbs;

#[cfg(test)]
pub(crate) mod test_helpers;
