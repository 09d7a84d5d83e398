// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{expand_os, interpolate_args, interpolate_vars, vars::placeholders};
use crate::core::env::{EnvMap, MemoryEnv};

fn env(pairs: &[(&str, &str)]) -> EnvMap {
    pairs.iter().copied().collect()
}

#[test]
fn test_placeholders() {
    assert_eq!(placeholders("${A}-${B_2}/${c}"), vec!["A", "B_2", "c"]);
    assert!(placeholders("$A ${} ${1X} ${A-B} ${OPEN").is_empty());
}

#[test]
fn test_interpolate_vars_resolves_and_reports() {
    let lookup = |name: &str| (name == "A").then(|| "1".to_string());

    assert_eq!(interpolate_vars("${A}-2", lookup), Ok("1-2".to_string()));
    assert_eq!(interpolate_vars("cost $5", lookup), Ok("cost $5".to_string()));
    assert_eq!(
        interpolate_vars("${A}${MISSING}${OTHER}", lookup),
        Err(vec!["MISSING".to_string(), "OTHER".to_string()])
    );
}

#[test]
fn test_interpolate_vars_sentinels_fall_back() {
    let empty = |_: &str| Some(String::new());
    assert_eq!(interpolate_vars("${A}", empty), Err(vec![]));

    let sentinel = |_: &str| Some("<no value>".to_string());
    assert_eq!(interpolate_vars("${A}", sentinel), Err(vec![]));
}

#[tokio::test]
async fn test_expand_chained_references() {
    let ambient = MemoryEnv::new();
    let mut map = env(&[
        ("URL", "${SCHEME}://${HOST}"),
        ("HOST", "${NAME}.local"),
        ("NAME", "api"),
        ("SCHEME", "https"),
    ]);

    let report = map.expand(false, &ambient).await.unwrap();
    assert!(report.is_clean());
    assert_eq!(map.get("URL"), Some("https://api.local"));
}

#[tokio::test]
async fn test_expand_missing_reference_is_lenient() {
    let ambient = MemoryEnv::new();
    let mut map = env(&[("A", "1"), ("B", "${A}-2"), ("C", "${MISSING}")]);

    let report = map.expand(false, &ambient).await.unwrap();
    assert_eq!(map.get("B"), Some("1-2"));
    assert_eq!(map.get("C"), Some("${MISSING}"));

    let unresolved: Vec<_> = report.unresolved().collect();
    assert_eq!(unresolved, vec![("C", &["MISSING".to_string()][..])]);
}

#[tokio::test]
async fn test_expand_cycles_keep_literals() {
    let ambient = MemoryEnv::new();
    let mut map = env(&[
        ("A", "${B}"),
        ("B", "${A}"),
        ("SELF", "x${SELF}"),
        ("DEP", "${A}!"),
    ]);

    map.expand(false, &ambient).await.unwrap();
    assert_eq!(map.get("A"), Some("${B}"));
    assert_eq!(map.get("B"), Some("${A}"));
    assert_eq!(map.get("SELF"), Some("x${SELF}"));
    assert_eq!(map.get("DEP"), Some("${A}!"));
}

#[tokio::test]
async fn test_expand_os_pass_runs_last() {
    let ambient = MemoryEnv::with_vars([("HOME", "/home/me")]);
    let mut map = env(&[("PATH", "${PATH}:/opt/bin"), ("DIR", "$HOME/app")]);

    map.expand(true, &ambient).await.unwrap();
    assert_eq!(map.get("DIR"), Some("/home/me/app"));
    assert_eq!(map.get("PATH"), Some(":/opt/bin"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_expand_command_substitution() {
    let ambient = MemoryEnv::new();
    let mut map = env(&[
        ("X", "$(printf foo)"),
        ("HOST", "box"),
        ("GREETING", "$(echo hi ${HOST})"),
        ("TWO_LINES", "$(printf a\\n\\n)"),
    ]);

    map.expand(false, &ambient).await.unwrap();
    assert_eq!(map.get("X"), Some("foo"));
    assert_eq!(map.get("GREETING"), Some("hi box"));
    assert_eq!(map.get("TWO_LINES"), Some("a\n"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_expand_command_failure_is_fatal() {
    let ambient = MemoryEnv::new();
    let mut map = env(&[("A", "ok"), ("B", "$(false)")]);
    let before = map.clone();

    let err = map.expand(false, &ambient).await.unwrap_err();
    assert_eq!(err.kind(), crate::error::EnvErrorKind::CommandFailed);
    assert_eq!(map, before);

    let mut map = env(&[("B", "$(definitely-not-a-real-program-4242)")]);
    assert!(map.expand(false, &ambient).await.is_err());
}

#[test]
fn test_expand_os_missing_is_empty() {
    let ambient = MemoryEnv::with_vars([("USER", "me")]);
    assert_eq!(expand_os("${USER}-$USER-${NOPE}.", &ambient), "me-me-.");
}

#[test]
fn test_interpolate_args() {
    let ambient = MemoryEnv::with_vars([("SHELL", "/bin/sh")]);
    let map = env(&[("PORT", "8080")]);
    let args = ["--port=${PORT}", "$SHELL", "${UNKNOWN}"];

    assert_eq!(
        interpolate_args(&args, &map, false, &ambient),
        vec!["--port=8080", "$SHELL", "${UNKNOWN}"]
    );
    assert_eq!(
        interpolate_args(&args, &map, true, &ambient),
        vec!["--port=8080", "/bin/sh", ""]
    );
}
