//! End-to-end export tests: a real snapshot file, real images, real
//! thumbnail generation, and the exact on-disk output contract.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use webreltree::db::{SnapshotDb, snapshot_path};
use webreltree::export::{DATA_FILENAME, ExportOptions, export, parse_persons_js, write_persons_js};
use webreltree::feedback::Silent;
use webreltree::thumbs::ThumbnailCache;

fn write_portrait(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 2 % 256) as u8, (y * 2 % 256) as u8, 64])
    });
    img.save(path).unwrap();
}

/// Write a three-person snapshot with one private person, one private
/// family and one private media object, plus a real portrait image.
fn write_fixture(tmp: &TempDir) -> std::path::PathBuf {
    let media_dir = tmp.path().join("media");
    fs::create_dir_all(&media_dir).unwrap();
    let portrait = media_dir.join("portrait.png");
    write_portrait(&portrait, 600, 800);
    // The private media file never gets decoded, but give it a real path
    let private = media_dir.join("private.png");
    write_portrait(&private, 10, 10);

    let snapshot = serde_json::json!({
        "persons": [
            {
                "handle": "h-anna", "id": "I0001",
                "name": {"given": "Anna", "surnames": [{"surname": "Lee", "primary": true}]},
                "gender": "female",
                "birth": "e1",
                "media": [{"media": "m2"}],
                "child_of": ["f2"],
                "parent_of": ["f1"]
            },
            {
                "handle": "h-bert", "id": "I0002",
                "name": {"given": "Bert", "surnames": [{"surname": "Lee", "primary": false}]},
                "gender": "male",
                "media": [{"media": "m1"}, {"media": "m2"}],
                "parent_of": ["f1"]
            },
            {
                "handle": "h-cara", "id": "I0003",
                "name": {"given": "Cara"},
                "private": true,
                "child_of": ["f1"]
            }
        ],
        "families": [
            {"handle": "f1", "id": "F0001"},
            {"handle": "f2", "id": "F0002", "private": true}
        ],
        "events": [
            {"handle": "e1", "date": {"year": 1902, "month": 4, "day": 9}}
        ],
        "media": [
            {"handle": "m1", "id": "O0001", "path": private.to_string_lossy(),
             "mime": "image/png", "private": true},
            {"handle": "m2", "id": "O0002", "path": portrait.to_string_lossy(),
             "mime": "image/png"}
        ]
    });

    let path = tmp.path().join("tree.json");
    fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();
    path
}

fn fixture_options(tmp: &TempDir, output: &str) -> ExportOptions {
    ExportOptions {
        output_dir: tmp.path().join(output),
        start_person: "I0001".to_string(),
        link_prefix: "../../site/".to_string(),
        include_private: false,
    }
}

fn run_fixture_export(tmp: &TempDir, output: &str) -> std::path::PathBuf {
    let db = SnapshotDb::load(&write_fixture(tmp)).unwrap();
    let cache = ThumbnailCache::new(tmp.path().join("cache"), 96);
    let options = fixture_options(tmp, output);
    export(&db, &cache, &Silent, &Silent, &options).unwrap();
    options.output_dir
}

#[test]
fn export_writes_self_contained_directory() {
    let tmp = TempDir::new().unwrap();
    let out = run_fixture_export(&tmp, "site_data");

    let text = fs::read_to_string(out.join(DATA_FILENAME)).unwrap();
    assert!(text.starts_with("personsSource = ["));
    assert!(text.ends_with(";\nvar startPersonId = \"I0001\";\n"));

    let (records, start) = parse_persons_js(&text).unwrap();
    assert_eq!(start, "I0001");

    // The private person is gone entirely
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["I0001", "I0002"]);

    let anna = &records[0];
    assert_eq!(anna.name, "Lee Anna");
    assert_eq!(anna.fullname, "Lee Anna");
    assert_eq!(anna.bdate.as_deref(), Some("1902-04-09"));
    assert_eq!(anna.gender, Some('f'));
    assert_eq!(
        anna.url.as_deref(),
        Some("../../site/ppl/a/n/h-anna.html")
    );
    // The private family f2/F0002 vanished from both sides
    assert!(anna.child_of.is_empty());
    assert_eq!(anna.parent_of, vec!["F0001"]);

    // Bert's first media reference is private; the second one wins
    let bert = &records[1];
    assert_eq!(bert.icon.as_deref(), Some("thumbs/m2.png"));

    // The icon exists and is a real, bounded PNG
    let thumb = out.join("thumbs/m2.png");
    assert!(thumb.exists());
    let img = image::open(&thumb).unwrap();
    assert!(img.width() <= 96 && img.height() <= 96);
    assert_eq!((img.width(), img.height()), (72, 96));
}

#[test]
fn reexport_is_deterministic_and_reuses_thumbnails() {
    let tmp = TempDir::new().unwrap();
    let first = run_fixture_export(&tmp, "out-a");

    let cache_files = || {
        fs::read_dir(tmp.path().join("cache"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    };
    let generated = cache_files();
    assert_eq!(generated, 1);

    // Second export: same bytes, no new cache entries
    let db = SnapshotDb::load(&tmp.path().join("tree.json")).unwrap();
    let cache = ThumbnailCache::new(tmp.path().join("cache"), 96);
    let options = fixture_options(&tmp, "out-b");
    export(&db, &cache, &Silent, &Silent, &options).unwrap();

    let a = fs::read(first.join(DATA_FILENAME)).unwrap();
    let b = fs::read(tmp.path().join("out-b").join(DATA_FILENAME)).unwrap();
    assert_eq!(a, b);
    assert_eq!(cache_files(), generated);
}

#[test]
fn include_private_exports_everything() {
    let tmp = TempDir::new().unwrap();
    let db = SnapshotDb::load(&write_fixture(&tmp)).unwrap();
    let cache = ThumbnailCache::new(tmp.path().join("cache"), 96);
    let mut options = fixture_options(&tmp, "all");
    options.include_private = true;
    let summary = export(&db, &cache, &Silent, &Silent, &options).unwrap();

    let ids: Vec<&str> = summary.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["I0001", "I0002", "I0003"]);
    assert_eq!(summary.private_skipped, 0);

    let anna = &summary.records[0];
    assert_eq!(anna.child_of, vec!["F0002"]);
}

#[test]
fn parsed_records_reserialize_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let out = run_fixture_export(&tmp, "site_data");

    let text = fs::read_to_string(out.join(DATA_FILENAME)).unwrap();
    let (records, start) = parse_persons_js(&text).unwrap();

    let again = tmp.path().join("again");
    fs::create_dir_all(&again).unwrap();
    write_persons_js(&records, &start, &again).unwrap();

    assert_eq!(text, fs::read_to_string(again.join(DATA_FILENAME)).unwrap());
}

#[test]
fn snapshot_path_resolves_database_directory() {
    let tmp = TempDir::new().unwrap();
    write_fixture(&tmp);
    let resolved = snapshot_path(tmp.path());
    let db = SnapshotDb::load(&resolved).unwrap();
    assert_eq!(db.person_count(), 3);
}
