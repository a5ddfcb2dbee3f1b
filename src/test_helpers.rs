//! Shared test utilities for the webreltree test suite.
//!
//! Provides record builders and a canonical four-person snapshot used by
//! the db, export and output tests:
//!
//! | Person        | Traits exercised                                        |
//! |---------------|---------------------------------------------------------|
//! | Jane (I0001)  | two surnames, both dates, private-then-public media, private family as child |
//! | John (I0002)  | zero-year birth, media without MIME type                |
//! | Ada (I0003)   | unknown gender, no events, no media                     |
//! | Secret (I0004)| private person                                          |

use crate::db::{Snapshot, SnapshotDb};
use crate::export::PersonRecord;
use crate::model::{
    DateValue, Event, Family, Gender, Media, MediaRef, Name, Person, Region, Surname,
};

// =========================================================================
// Record builders
// =========================================================================

pub fn person(handle: &str, id: &str) -> Person {
    Person {
        handle: handle.to_string(),
        id: id.to_string(),
        ..Person::default()
    }
}

pub fn family(handle: &str, id: &str, private: bool) -> Family {
    Family {
        handle: handle.to_string(),
        id: id.to_string(),
        private,
    }
}

pub fn event(handle: &str, year: i32, month: u8, day: u8) -> Event {
    Event {
        handle: handle.to_string(),
        date: Some(DateValue { year, month, day }),
    }
}

pub fn media(handle: &str, id: &str, path: &str, mime: &str, private: bool) -> Media {
    Media {
        handle: handle.to_string(),
        id: id.to_string(),
        path: path.to_string(),
        mime: mime.to_string(),
        private,
    }
}

pub fn name(given: &str, surnames: &[(&str, bool)]) -> Name {
    Name {
        given: given.to_string(),
        surnames: surnames
            .iter()
            .map(|(s, primary)| Surname {
                surname: s.to_string(),
                primary: *primary,
            })
            .collect(),
    }
}

// =========================================================================
// Canonical snapshot
// =========================================================================

/// Build the canonical test database described in the module docs.
pub fn sample_snapshot() -> SnapshotDb {
    let mut jane = person("p-jane", "I0001");
    jane.name = name("Jane", &[("Doe", false), ("Smith", true)]);
    jane.gender = Gender::Female;
    jane.birth = Some("e-jb".to_string());
    jane.death = Some("e-jd".to_string());
    jane.media = vec![
        MediaRef {
            media: "m-priv".to_string(),
            region: Some(Region {
                left: 10,
                top: 10,
                right: 90,
                bottom: 90,
            }),
        },
        MediaRef {
            media: "m-port".to_string(),
            region: None,
        },
    ];
    jane.child_of = vec!["f-prior".to_string()];
    jane.parent_of = vec!["f-main".to_string()];

    let mut john = person("p-john", "I0002");
    john.name = name("John", &[("Miller", true)]);
    john.gender = Gender::Male;
    john.birth = Some("e-zero".to_string());
    john.media = vec![MediaRef {
        media: "m-nomime".to_string(),
        region: None,
    }];
    john.parent_of = vec!["f-main".to_string()];

    let mut ada = person("p-ada", "I0003");
    ada.name = name("Ada", &[("Miller", true)]);
    ada.child_of = vec!["f-main".to_string()];

    let mut secret = person("p-secret", "I0004");
    secret.name = name("Hidden", &[]);
    secret.private = true;

    SnapshotDb::from_snapshot(Snapshot {
        persons: vec![jane, john, ada, secret],
        families: vec![
            family("f-main", "F0001", false),
            family("f-prior", "F0002", true),
        ],
        events: vec![
            event("e-jb", 1850, 3, 2),
            event("e-jd", 1910, 11, 20),
            event("e-zero", 0, 6, 15),
        ],
        media: vec![
            media("m-priv", "O0001", "media/private.png", "image/png", true),
            media("m-port", "O0002", "media/portrait.png", "image/png", false),
            media("m-nomime", "O0003", "media/scan.bin", "", false),
        ],
    })
    .unwrap()
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find an exported record by id. Panics if not found.
pub fn record_by_id<'a>(records: &'a [PersonRecord], id: &str) -> &'a PersonRecord {
    records.iter().find(|r| r.id == id).unwrap_or_else(|| {
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        panic!("record '{id}' not found. Available: {ids:?}")
    })
}
