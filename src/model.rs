//! Snapshot record types shared between the database and export modules.
//!
//! These types mirror the genealogy snapshot format (see [`crate::db`]) and
//! are deserialized once per run. The exporter reads them but never mutates
//! them; every run rebuilds its output from scratch.
//!
//! Records cross-reference each other by **handle**, an opaque internal
//! identifier. The separate `id` field is the stable, human-meaningful
//! identifier that ends up in the exported data; handles never leave the
//! snapshot except as file-path fragments (thumbnail names, page URLs).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender of a person record.
///
/// Only male/female map to an exported value; everything else serializes
/// as an absent gender in the chart data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

/// One surname entry of a primary name.
///
/// A name can carry several surnames (patronymic, matronymic, taken name);
/// the `primary` flag marks the one that leads the display form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surname {
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub primary: bool,
}

/// A person's primary name: given name plus ordered surname list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    #[serde(default)]
    pub given: String,
    #[serde(default)]
    pub surnames: Vec<Surname>,
}

/// Calendar date of an event. A year of zero means the year is unknown,
/// which makes the whole date unusable for the export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    pub year: i32,
    #[serde(default)]
    pub month: u8,
    #[serde(default)]
    pub day: u8,
}

/// A life event (birth, death). Only the date matters to the export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub handle: String,
    #[serde(default)]
    pub date: Option<DateValue>,
}

/// Crop region of a media reference, in percent coordinates (0–100)
/// relative to the full image: left/top and right/bottom corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl fmt::Display for Region {
    /// Renders as `L,T-R,B`, the form embedded in thumbnail filenames.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}-{},{}", self.left, self.top, self.right, self.bottom)
    }
}

/// A person's reference to a media object, with an optional crop region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub media: String,
    #[serde(default)]
    pub region: Option<Region>,
}

/// A media object: a file on disk plus its MIME type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub handle: String,
    pub id: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub mime: String,
    #[serde(default)]
    pub private: bool,
}

/// A family record. The exporter only needs its stable id and privacy flag;
/// membership is expressed from the person side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub handle: String,
    pub id: String,
    #[serde(default)]
    pub private: bool,
}

/// A person record as stored in the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub handle: String,
    pub id: String,
    #[serde(default)]
    pub name: Name,
    #[serde(default)]
    pub gender: Gender,
    /// Handle of the birth event, if recorded.
    #[serde(default)]
    pub birth: Option<String>,
    /// Handle of the death event, if recorded.
    #[serde(default)]
    pub death: Option<String>,
    /// Media references in preference order; the first usable one becomes
    /// the chart icon.
    #[serde(default)]
    pub media: Vec<MediaRef>,
    #[serde(default)]
    pub private: bool,
    /// Handles of families this person belongs to as a child.
    #[serde(default)]
    pub child_of: Vec<String>,
    /// Handles of families this person belongs to as a parent.
    #[serde(default)]
    pub parent_of: Vec<String>,
}
