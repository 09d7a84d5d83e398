// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{DEFAULT_SECTION, Document};
use crate::error::EnvErrorKind;

const SAMPLE: &str = r#"
# shared by every environment
APP_NAME=envset

; development settings
[development]
# where the api lives
HOST=localhost
PORT = 8080
GREETING="hello world"
QUERY=a=b=c
TRAILING=value # not part of it
HASH=abc#def

[production]
HOST=example.com
"#;

#[test]
fn test_parse_sections_in_order() {
    let doc = Document::parse(SAMPLE, ".envset").unwrap();
    let names: Vec<_> = doc.section_names().collect();
    assert_eq!(names, vec![DEFAULT_SECTION, "development", "production"]);
    assert_eq!(doc.default_section().get("APP_NAME"), Some("envset"));
}

#[test]
fn test_parse_values() {
    let doc = Document::parse(SAMPLE, ".envset").unwrap();
    let dev = doc.section("development").unwrap();

    assert_eq!(dev.get("HOST"), Some("localhost"));
    assert_eq!(dev.get("PORT"), Some("8080"));
    assert_eq!(dev.get("GREETING"), Some("hello world"));
    assert_eq!(dev.get("QUERY"), Some("a=b=c"));
    assert_eq!(dev.get("TRAILING"), Some("value"));
    assert_eq!(dev.get("HASH"), Some("abc#def"));
}

#[test]
fn test_parse_comments_attach_to_next_item() {
    let doc = Document::parse(SAMPLE, ".envset").unwrap();
    let dev = doc.section("development").unwrap();

    assert_eq!(dev.comment(), "development settings");
    assert_eq!(dev.entry("HOST").unwrap().comment(), "where the api lives");
    assert_eq!(
        doc.default_section().entry("APP_NAME").unwrap().comment(),
        "shared by every environment"
    );
}

#[test]
fn test_parse_missing_delimiter_is_malformed() {
    let err = Document::parse("[development]\nHOST=a\nNOT_A_PAIR\n", "broken.ini").unwrap_err();
    assert_eq!(err.kind(), EnvErrorKind::MalformedFile);
    insta::assert_snapshot!(
        err.to_string(),
        @"malformed file 'broken.ini' line 3: key-value delimiter not found: NOT_A_PAIR"
    );
}

#[test]
fn test_parse_skips_unclosed_header() {
    let doc = Document::parse("[development\nA=1\n[test]\nB=2\n", ".envset").unwrap();
    assert!(doc.section("development").is_none());
    assert_eq!(doc.default_section().get("A"), Some("1"));
    assert_eq!(doc.section("test").unwrap().get("B"), Some("2"));
}

#[test]
fn test_parse_duplicates_merge_and_last_wins() {
    let doc = Document::parse("[a]\nX=1\nY=2\n[b]\nZ=3\n[a]\nX=9\n", ".envset").unwrap();
    let a = doc.section("a").unwrap();
    let keys: Vec<_> = a.keys().collect();
    assert_eq!(keys, vec!["X", "Y"]);
    assert_eq!(a.get("X"), Some("9"));
    assert_eq!(doc.section_names().count(), 3);
}

#[test]
fn test_explicit_default_header_merges() {
    let doc = Document::parse("A=1\n[DEFAULT]\nB=2\n", ".envset").unwrap();
    assert_eq!(doc.section_names().count(), 1);
    assert_eq!(doc.default_section().len(), 2);
}

#[test]
fn test_render_round_trips() {
    let doc = Document::parse(SAMPLE, ".envset").unwrap();
    let rendered = doc.render();
    let reparsed = Document::parse(&rendered, "rendered").unwrap();
    assert_eq!(doc, reparsed);
}

#[test]
fn test_render_layout() {
    let mut doc = Document::new();
    let section = doc.section_or_insert("development");
    section.set_comment("local machine");
    section.set("HOST", "{{HOST}}").set_comment("api host");
    section.set("PADDED", " spaced ");

    insta::assert_snapshot!(doc.render(), @r#"
    # local machine
    [development]
    # api host
    HOST={{HOST}}
    PADDED=" spaced "
    "#);
}

#[test]
fn test_section_set_and_remove() {
    let mut doc = Document::new();
    let section = doc.section_or_insert("test");
    section.set("A", "1");
    section.set("B", "2");
    section.set("A", "3");

    assert_eq!(section.keys().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(section.get("A"), Some("3"));
    assert!(section.remove("A").is_some());
    assert!(section.remove("A").is_none());
    assert_eq!(section.len(), 1);
}
