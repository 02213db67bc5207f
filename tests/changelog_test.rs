// tests/changelog_test.rs
use chrono::NaiveDate;
use repokit::changelog::{Changelog, ChangelogSection};
use repokit::error::ChangelogError;
use std::fs;
use std::path::Path;

fn fixture(name: &str) -> String {
    fs::read_to_string(Path::new("tests/fixtures/changelog").join(name))
        .expect("Failed to read changelog fixture")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_fixtures_round_trip() {
    for entry in fs::read_dir("tests/fixtures/changelog").unwrap() {
        let path = entry.unwrap().path();
        let text = fs::read_to_string(&path).unwrap();
        let chlog = Changelog::load(&text)
            .unwrap_or_else(|e| panic!("{} failed to parse: {}", path.display(), e));
        assert_eq!(chlog.dump(), text, "round trip mismatch for {}", path.display());
    }
}

#[test]
fn test_fixtures_reparse_is_idempotent() {
    for name in ["simple.md", "multi_paragraph.md", "date_versions.rst"] {
        let first = Changelog::load(&fixture(name)).unwrap();
        let second = Changelog::load(&first.dump()).unwrap();
        assert_eq!(first, second, "reparse changed structure of {}", name);
    }
}

#[test]
fn test_simple_structure() {
    let chlog = Changelog::load(&fixture("simple.md")).unwrap();
    assert_eq!(chlog.intro, "Changelog\n=========\n\n");
    assert_eq!(chlog.sections.len(), 3);

    let current = chlog.current().unwrap();
    assert_eq!(current.version(), Some("v0.2.0"));
    assert_eq!(current.release_date(), None);
    assert_eq!(
        current.content(),
        "- Added a `--quiet` option\n- Dropped support for Python 3.7"
    );

    assert_eq!(chlog.sections[1].release_date(), Some(date(2020, 6, 15)));
    assert_eq!(chlog.sections[2].content(), "Initial release");
}

#[test]
fn test_date_version_and_placeholder_sections() {
    let chlog = Changelog::load(&fixture("date_versions.rst")).unwrap();
    assert_eq!(chlog.sections[0].version(), None);
    assert_eq!(chlog.sections[0].release_date(), None);
    assert_eq!(chlog.sections[1].version(), Some("v2021.2.3"));
    assert_eq!(chlog.sections[1].release_date(), Some(date(2021, 2, 3)));
    assert_eq!(chlog.sections[2].content(), "");
    assert_eq!(chlog.sections[3].content(), "\nLeading blank line kept");
}

#[test]
fn test_multi_paragraph_separator_follows_content() {
    let mut chlog = Changelog::load(&fixture("multi_paragraph.md")).unwrap();
    assert!(chlog.dump().contains("spanning two lines\n\n\nv0.2.0"));

    chlog.current_mut().unwrap().set_content("- Only one paragraph now");
    let text = chlog.dump();
    assert!(text.contains("- Only one paragraph now\n\nv0.2.0 (2021-02-03)"));
    assert!(!text.contains("\n\n\n"));
}

#[test]
fn test_error_scenarios() {
    assert_eq!(
        Changelog::load("---\n").unwrap_err().to_string(),
        "file begins with hrule"
    );
    assert_eq!(
        Changelog::load("Some intro\nwithout headers\n").unwrap_err(),
        ChangelogError::MissingHeaders
    );
    let err = Changelog::load("v1.0.0 2020-01-01\n-----------------\n").unwrap_err();
    assert!(err
        .to_string()
        .contains("section header not in recognized format"));
}

#[test]
fn test_new_section_then_release() {
    let mut chlog = Changelog::load(&fixture("simple.md")).unwrap();
    chlog.release(date(2020, 7, 1)).unwrap();
    chlog.begin_development("v0.3.0");

    let text = chlog.dump();
    assert!(text.starts_with(
        "Changelog\n=========\n\nv0.3.0 (in development)\n-----------------------\n\nv0.2.0 (2020-07-01)\n-------------------\n- Added"
    ));

    let reparsed = Changelog::load(&text).unwrap();
    assert_eq!(reparsed, chlog);
}

#[test]
fn test_build_from_scratch() {
    let chlog = Changelog::new(
        "",
        vec![
            ChangelogSection::in_development("v0.2.0", ""),
            ChangelogSection::released("v0.1.0", date(2020, 1, 1), "Initial release"),
        ],
    );
    assert_eq!(
        chlog.dump(),
        "v0.2.0 (in development)\n-----------------------\n\n\
         v0.1.0 (2020-01-01)\n-------------------\nInitial release\n"
    );
}

#[test]
fn test_serializes_dates_as_iso() {
    let chlog = Changelog::load(&fixture("simple.md")).unwrap();
    let json = serde_json::to_value(&chlog).unwrap();
    assert_eq!(json["sections"][1]["release_date"], "2020-06-15");
    assert!(json["sections"][0]["release_date"].is_null());
    assert_eq!(json["sections"][0]["version"], "v0.2.0");
}
