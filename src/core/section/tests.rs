// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::{SectionLoader, find_upward};
use crate::error::{EnvError, EnvErrorKind};

const ENVSET: &str = "\
[development]
GREETING=hello ${NAME}
NAME=world
APP_ENV=stale

[staging]

[comments]
GREETING=says hello
";

fn write_envset(dir: &Path) {
    std::fs::write(dir.join(".envset"), ENVSET).unwrap();
}

fn loader(dir: &Path, isolated: bool) -> SectionLoader {
    SectionLoader::builder()
        .with_start_dir(dir)
        .with_isolated(isolated)
        .with_comment_sections(vec!["comments".to_string()])
        .build()
}

#[test]
fn test_find_upward_from_nested_dir() {
    let temp = tempfile::tempdir().unwrap();
    write_envset(temp.path());
    let nested = temp.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();

    let found = find_upward(Path::new(".envset"), &nested).unwrap();
    assert_eq!(found, temp.path().join(".envset"));
}

#[test]
fn test_find_upward_missing_file() {
    let temp = tempfile::tempdir().unwrap();
    let err = find_upward(Path::new(".envset-does-not-exist"), temp.path()).unwrap_err();
    assert_eq!(err.kind(), EnvErrorKind::FileNotFound);
}

#[test]
fn test_find_absolute_path_is_not_searched() {
    let temp = tempfile::tempdir().unwrap();
    write_envset(temp.path());
    let absolute = temp.path().join(".envset");
    assert_eq!(find_upward(&absolute, Path::new("/")).unwrap(), absolute);

    let missing = temp.path().join("nope");
    assert!(find_upward(&missing, temp.path()).is_err());
}

#[test]
fn test_load_replaces_export_name() {
    let temp = tempfile::tempdir().unwrap();
    write_envset(temp.path());

    let env = loader(temp.path(), true).load("development").unwrap();
    assert_eq!(env.get("APP_ENV"), Some("development"));
    assert_eq!(env.get("GREETING"), Some("hello ${NAME}"));
    assert_eq!(env.len(), 3);
}

#[test]
fn test_load_custom_export_name() {
    let temp = tempfile::tempdir().unwrap();
    write_envset(temp.path());

    let env = SectionLoader::builder()
        .with_start_dir(temp.path())
        .with_export_env_name("ENVIRONMENT")
        .build()
        .load("development")
        .unwrap();
    assert_eq!(env.get("ENVIRONMENT"), Some("development"));
    assert_eq!(env.get("APP_ENV"), Some("stale"));
}

#[test]
fn test_load_missing_section_lists_available() {
    let temp = tempfile::tempdir().unwrap();
    write_envset(temp.path());

    let err = loader(temp.path(), true).load("production").unwrap_err();
    let EnvError::SectionNotFound { section, available } = err else {
        panic!("expected SectionNotFound");
    };
    assert_eq!(section, "production");
    assert_eq!(available, vec!["development", "staging"]);
}

#[test]
fn test_empty_section_rejected_only_when_isolated() {
    let temp = tempfile::tempdir().unwrap();
    write_envset(temp.path());

    let err = loader(temp.path(), true).load("staging").unwrap_err();
    assert_eq!(err.kind(), EnvErrorKind::SectionNotFound);

    let env = loader(temp.path(), false).load("staging").unwrap();
    assert_eq!(env.to_kv_strings(), vec!["APP_ENV=staging"]);
}

#[test]
fn test_empty_default_section_always_rejected() {
    let temp = tempfile::tempdir().unwrap();
    write_envset(temp.path());

    let err = loader(temp.path(), false).load("DEFAULT").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"section not found: [DEFAULT] (available sections: development, staging)"
    );
}

#[test]
fn test_load_file_not_found() {
    let temp = tempfile::tempdir().unwrap();
    let err = SectionLoader::builder()
        .with_start_dir(temp.path())
        .with_filename("missing.env")
        .build()
        .load("development")
        .unwrap_err();
    assert_eq!(err.kind(), EnvErrorKind::FileNotFound);
}
