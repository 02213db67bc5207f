// tests/version_test.rs
use chrono::NaiveDate;
use repokit::domain::{Bump, Version};
use repokit::error::VersionError;
use repokit::version::{bump_version, mkversion, next_post_version, next_version};

const ALL_BUMPS: [Bump; 5] = [Bump::Major, Bump::Minor, Bump::Micro, Bump::Post, Bump::Date];

fn bump_on_feb_3(v: &str, level: Bump) -> String {
    let today = NaiveDate::from_ymd_opt(2021, 2, 3).unwrap();
    Version::parse(v)
        .unwrap()
        .bump_on(level, today)
        .unwrap()
        .to_string()
}

#[test]
fn test_bump_table() {
    let cases = [
        ("0.5.0", Bump::Major, "1.0.0"),
        ("0.5.0.post1", Bump::Major, "1.0.0"),
        ("1!0.5.0", Bump::Major, "1!1.0.0"),
        ("1!2.0.3.post1", Bump::Major, "1!3.0.0"),
        ("1", Bump::Major, "2"),
        ("1.2.3", Bump::Major, "2.0.0"),
        ("1.2.3.4", Bump::Major, "2.0.0.0"),
        ("0.5.0", Bump::Minor, "0.6.0"),
        ("0.5.0.post1", Bump::Minor, "0.6.0"),
        ("1!0.5.0", Bump::Minor, "1!0.6.0"),
        ("1!2.0.3.post1", Bump::Minor, "1!2.1.0"),
        ("1", Bump::Minor, "1.1"),
        ("1.2.3", Bump::Minor, "1.3.0"),
        ("1.2.3.4", Bump::Minor, "1.3.0.0"),
        ("0.5.0", Bump::Micro, "0.5.1"),
        ("0.5.0.post1", Bump::Micro, "0.5.1"),
        ("1!0.5.0", Bump::Micro, "1!0.5.1"),
        ("1!2.0.3.post1", Bump::Micro, "1!2.0.4"),
        ("1", Bump::Micro, "1.0.1"),
        ("1.2.3", Bump::Micro, "1.2.4"),
        ("1.2.3.4", Bump::Micro, "1.2.4.0"),
        ("0.5.0", Bump::Post, "0.5.0.post1"),
        ("0.5.0.post1", Bump::Post, "0.5.0.post2"),
        ("1!0.5.0", Bump::Post, "1!0.5.0.post1"),
        ("1!2.0.3.post1", Bump::Post, "1!2.0.3.post2"),
        ("1", Bump::Post, "1.post1"),
        ("1.2.3", Bump::Post, "1.2.3.post1"),
        ("1.2.3.4", Bump::Post, "1.2.3.4.post1"),
        ("1.2.3", Bump::Date, "2021.2.3"),
        ("1!1.2.3", Bump::Date, "1!2021.2.3"),
        ("2021.2.3", Bump::Date, "2021.2.3.1"),
        ("2021.2.3.4.5", Bump::Date, "2021.2.3.5"),
        ("1!2021.2.3", Bump::Date, "1!2021.2.3.1"),
    ];
    for (v1, level, v2) in cases {
        assert_eq!(bump_on_feb_3(v1, level), v2, "bumping {} by {:?}", v1, level);
    }
}

#[test]
fn test_bump_non_date_levels_through_string_helper() {
    assert_eq!(bump_version("1.2.3.4", Bump::Micro).unwrap(), "1.2.4.0");
    assert_eq!(bump_version("1!2.0.3.post1", Bump::Post).unwrap(), "1!2.0.3.post2");
}

#[test]
fn test_bump_prerelease_fails_for_every_level() {
    for v in ["0.5.0.dev1", "0.5.0a1"] {
        for level in ALL_BUMPS {
            let err = bump_version(v, level).unwrap_err();
            assert_eq!(err, VersionError::Prerelease(v.to_string()));
            assert_eq!(
                err.to_string(),
                format!("cannot bump pre-release version: {:?}", v)
            );
        }
    }
}

#[test]
fn test_next_version_table() {
    let cases = [
        ("0.5.0", "0.6.0"),
        ("0.5.1", "0.6.0"),
        ("0.5.0.post1", "0.6.0"),
        ("0.5.1.post1", "0.6.0"),
        ("0.5.0a1", "0.5.0"),
        ("0.5.1a1", "0.5.1"),
        ("0.5.0.dev1", "0.5.0"),
        ("0.5.1.dev1", "0.5.1"),
        ("1!0.5.0", "1!0.6.0"),
    ];
    for (old, new) in cases {
        assert_eq!(next_version(old).unwrap(), new, "next version after {}", old);
    }
}

#[test]
fn test_next_post_version() {
    assert_eq!(next_post_version("0.5.0").unwrap(), "0.5.0.post1");
    assert_eq!(next_post_version("0.5.0.post1").unwrap(), "0.5.0.post2");
    assert_eq!(next_post_version("0.5.0rc2").unwrap(), "0.5.0");
}

#[test]
fn test_mkversion_table() {
    let cases: [(u64, &[u64], Option<u64>, &str); 5] = [
        (0, &[1, 2, 3], None, "1.2.3"),
        (1, &[1, 2, 3], None, "1!1.2.3"),
        (0, &[1, 2, 3], Some(0), "1.2.3.post0"),
        (0, &[1, 2, 3], Some(1), "1.2.3.post1"),
        (2, &[1, 2, 3], Some(3), "2!1.2.3.post3"),
    ];
    for (epoch, release, post, v) in cases {
        assert_eq!(mkversion(release, epoch, post), v);
    }
}

#[test]
fn test_bump_overflow_fails_instead_of_panicking() {
    let err = bump_version("18446744073709551615", Bump::Major).unwrap_err();
    assert!(err.to_string().starts_with("version component overflows"));
    assert!(bump_version("1.post18446744073709551615", Bump::Post).is_err());
}

#[test]
fn test_invalid_versions_are_rejected() {
    assert!(Version::parse("not-a-version").is_err());
    assert!(next_version("").is_err());
}
