// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::{TimeZone, Utc};

use super::report::{render_ok, render_report};
use super::{
    Algorithm, DiffStatus, MetaFile, MetaKey, MetaSection, MetadataOptions, WriteOutcome,
    compare_files, compare_sections, generate, hash_value, write,
};
use crate::core::ini::Document;
use crate::error::MetadataError;

const ENVSET: &str = "\
GLOBAL=a

[development]
# main greeting
GREETING=hello
NAME=a

[comments]
NOTE=b
";

fn options() -> MetadataOptions {
    MetadataOptions::builder()
        .with_envfile(".envset")
        .with_comment_sections(vec!["comments".to_string()])
        .with_date(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap())
        .build()
}

fn section(name: &str, keys: &[(&str, &str)]) -> MetaSection {
    let mut section = MetaSection::new(name);
    section.values = keys
        .iter()
        .map(|(key, hash)| MetaKey {
            key: (*key).to_string(),
            value: String::new(),
            hash: (*hash).to_string(),
            comment: String::new(),
        })
        .collect();
    section
}

#[test]
fn test_hash_value() {
    assert_eq!(
        hash_value("hello", None).unwrap(),
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73"
    );
    assert_eq!(
        hash_value("hello", Some("key")).unwrap(),
        "9307b3b915efb5171ff14d8cb55fbcc798c6c0ef1456d66ded"
    );
    assert_eq!(hash_value("", None).unwrap().len(), 50);
}

#[test]
fn test_algorithm_follows_secret() {
    assert_eq!(Algorithm::for_secret(None), Algorithm::Sha256);
    assert_eq!(Algorithm::for_secret(Some("s")), Algorithm::Hmac);
    assert_eq!(Algorithm::Hmac.to_string(), "hmac");
}

#[test]
fn test_generate_json_layout() {
    let doc = Document::parse(ENVSET, ".envset").unwrap();
    let meta = generate(&doc, &options()).unwrap();

    insta::assert_snapshot!(meta.to_json().unwrap(), @r#"
    {
        "envfile": ".envset",
        "algorithm": "sha256",
        "date": "2026-01-02T03:04:05Z",
        "sections": [
            {
                "name": "development",
                "values": [
                    {
                        "key": "GREETING",
                        "hash": "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73",
                        "comment": "main greeting"
                    },
                    {
                        "key": "NAME",
                        "hash": "ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9"
                    }
                ]
            }
        ]
    }
    "#);
}

#[test]
fn test_generate_globals_and_values() {
    let doc = Document::parse(ENVSET, ".envset").unwrap();
    let options = MetadataOptions::builder()
        .with_globals(true)
        .with_values(true)
        .with_secret("key")
        .build();
    let meta = generate(&doc, &options).unwrap();

    let names: Vec<&str> = meta.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["DEFAULT", "development", "comments"]);
    assert_eq!(meta.algorithm, Algorithm::Hmac);
    assert_eq!(meta.sections[1].values[0].value, "hello");
    assert_eq!(
        meta.sections[1].values[0].hash,
        "9307b3b915efb5171ff14d8cb55fbcc798c6c0ef1456d66ded"
    );
}

#[test]
fn test_empty_secret_means_plain_sha256() {
    let doc = Document::parse(ENVSET, ".envset").unwrap();
    let options = MetadataOptions::builder().with_secret("").build();
    assert_eq!(generate(&doc, &options).unwrap().algorithm, Algorithm::Sha256);
}

#[test]
fn test_compare_sections_statuses() {
    let source = section("staging", &[("A", "h1"), ("B", "h1"), ("D", "h1"), ("SKIP", "x")]);
    let target = section("staging", &[("A", "h2"), ("C", "h1"), ("D", "h1"), ("SKIP", "y")]);

    let diff = compare_sections(&source, &target, &["SKIP"]);
    let statuses: Vec<(&str, DiffStatus)> = diff
        .entries
        .iter()
        .map(|e| (e.key.as_str(), e.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("A", DiffStatus::Different),
            ("B", DiffStatus::Extra),
            ("C", DiffStatus::Missing),
        ]
    );

    let comments: Vec<String> = diff
        .to_section()
        .values
        .into_iter()
        .map(|k| k.comment)
        .collect();
    assert_eq!(
        comments,
        vec!["different hash value", "extra in source", "missing in source"]
    );
}

#[test]
fn test_compare_files_rejects_mixed_algorithms() {
    let doc = Document::parse(ENVSET, ".envset").unwrap();
    let plain = generate(&doc, &options()).unwrap();
    let keyed = generate(
        &doc,
        &MetadataOptions::builder().with_secret("key").build(),
    )
    .unwrap();

    let err = compare_files(&plain, &keyed, "development", &[] as &[&str]).unwrap_err();
    assert_eq!(err.to_string(), "wrong algorithm: source sha256 target hmac");

    let err = compare_files(&plain, &plain, "production", &[] as &[&str]).unwrap_err();
    assert!(matches!(err, MetadataError::SectionNotFound { .. }));
}

#[test]
fn test_write_rules() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join(".meta").join("metadata.json");
    let doc = Document::parse(ENVSET, ".envset").unwrap();
    let first = generate(&doc, &options()).unwrap();

    assert_eq!(write(&first, &path, false).unwrap(), WriteOutcome::Created);
    let loaded = MetaFile::load(&path).unwrap();
    assert_eq!(loaded.sections, first.sections);
    assert_eq!(loaded.path(), Some(path.as_path()));

    // A new date alone is not a change.
    let mut later = first.clone();
    later.date = Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(write(&later, &path, true).unwrap(), WriteOutcome::Unchanged);

    let changed_doc = Document::parse("[development]\nGREETING=bye\n", ".envset").unwrap();
    let changed = generate(&changed_doc, &options()).unwrap();
    assert_eq!(write(&changed, &path, false).unwrap(), WriteOutcome::Kept);
    assert_eq!(MetaFile::load(&path).unwrap().sections, first.sections);

    assert_eq!(write(&changed, &path, true).unwrap(), WriteOutcome::Overwritten);
    assert_eq!(MetaFile::load(&path).unwrap().sections, changed.sections);
}

#[test]
fn test_load_errors() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("none.json");
    assert!(matches!(
        MetaFile::load(&missing),
        Err(MetadataError::Read { .. })
    ));

    let broken = temp.path().join("broken.json");
    std::fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(
        MetaFile::load(&broken),
        Err(MetadataError::Parse { .. })
    ));
}

#[test]
fn test_render_report() {
    let source = section(
        "staging",
        &[("A", "0123456789abcdef0123"), ("B", "ffff")],
    );
    let target = section(
        "staging",
        &[("A", "aaaa"), ("API_KEY", "9f86d081884c7d659a2f")],
    );
    let diff = compare_sections(&source, &target, &[] as &[&str]);

    insta::assert_snapshot!(render_report(&diff, "a.json", "b.json"), @r"
    source: a.json
    target: b.json

    missing in source (1)
      STATUS   KEY      HASH
      missing  API_KEY  9f86d081884c...

    extra in source (1)
      STATUS  KEY  HASH
      extra   B    ffff

    different hash value (1)
      STATUS     KEY  HASH
      different  A    0123456789ab...

    summary: 1 missing, 1 extra, 1 different
    ");
    insta::assert_snapshot!(render_ok("a.json", "b.json"), @r"
    source: a.json
    target: b.json

    all good
    ");
}
