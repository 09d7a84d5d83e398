// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic `.envsetrc` files.

use envset_rs::config::loader::ConfigLoader;
use envset_rs::config::{Config, RC_FILENAME};
use envset_rs::error::ConfigError;

const PROJECT_RC: &str = r#"
filename = ".env.ini"
isolated = false
comment_section_names = ["comments", "docs"]

[environments]
names = ["local", "ci", "production"]

[required]
production = ["DATABASE_URL", "SECRET_KEY"]

[ignored]
ci = ["BUILD_ID"]

[meta]
dir = "metadata"
json = true

[restart]
enabled = true
max_restarts = 10
ignore = ["ci"]
"#;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_project_file() {
    let config = Config::parse(PROJECT_RC).unwrap();

    assert_eq!(config.filename, ".env.ini");
    assert!(!config.isolated);
    assert!(config.expand);
    assert_eq!(config.export_env_name, "APP_ENV");
    assert_eq!(config.environments.names, vec!["local", "ci", "production"]);
    assert_eq!(config.meta.dir, "metadata");
    assert_eq!(config.meta.file, "metadata.json");
    assert!(config.meta.print);
    assert!(config.meta.json);
    assert_eq!(config.restart.max_restarts, 10);
}

#[test]
fn config_parse_rejects_wrong_types() {
    assert!(Config::parse("isolated = \"sometimes\"").is_err());
    assert!(Config::parse("[environments]\nnames = \"local\"").is_err());
}

#[test]
fn config_default_file_round_trips() {
    let config = Config::parse(Config::default_toml()).unwrap();
    assert_eq!(config, Config::default());
}

// =============================================================================
// Environment Rules
// =============================================================================

#[test]
fn config_environment_rules() {
    let config = Config::parse(PROJECT_RC).unwrap();

    assert!(config.check_environment("ci").is_ok());
    let err = config.check_environment("development").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownEnvironment { ref known, .. } if known.len() == 3));

    assert_eq!(
        config.merge_required("production", &["SECRET_KEY".to_string(), "PORT".to_string()]),
        vec!["DATABASE_URL", "SECRET_KEY", "PORT"]
    );
    assert_eq!(config.merge_required("local", &[]), Vec::<String>::new());
    assert_eq!(config.merge_ignored("ci", &[]), vec!["BUILD_ID"]);

    assert!(config.restart_for_env("production"));
    assert!(!config.restart_for_env("ci"));
}

// =============================================================================
// Key Lookup
// =============================================================================

#[test]
fn config_get_values() {
    let config = Config::parse(PROJECT_RC).unwrap();

    assert_eq!(config.get("filename").unwrap(), ".env.ini");
    assert_eq!(config.get("meta.dir").unwrap(), "metadata");
    assert_eq!(config.get("restart.max_restarts").unwrap(), "10");
    assert_eq!(
        config.get("required.production").unwrap(),
        r#"["DATABASE_URL","SECRET_KEY"]"#
    );
    assert!(matches!(
        config.get("meta.nope"),
        Err(ConfigError::MissingKey { .. })
    ));
}

#[test]
fn config_list_keys_include_tables() {
    let config = Config::parse(PROJECT_RC).unwrap();
    let keys = config.list_keys().unwrap();

    assert!(keys.contains(&"required.production".to_string()));
    assert!(keys.contains(&"ignored.ci".to_string()));
    assert!(keys.contains(&"template.file".to_string()));
    assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
}

// =============================================================================
// Discovery
// =============================================================================

#[test]
fn config_discover_from_nested_directory() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join(RC_FILENAME), PROJECT_RC).unwrap();
    let nested = temp.path().join("services").join("api");
    std::fs::create_dir_all(&nested).unwrap();

    let loader = ConfigLoader::discover(None, &nested);
    assert_eq!(loader.loaded_files(), [temp.path().join(RC_FILENAME)]);
    let config = loader.build().unwrap();
    assert_eq!(config.filename, ".env.ini");
}

#[test]
fn config_discover_without_file_uses_defaults() {
    let temp = tempfile::tempdir().unwrap();
    let loader = ConfigLoader::discover(None, temp.path());
    if loader.loaded_files().is_empty() {
        assert_eq!(loader.build().unwrap(), Config::default());
    }
}

#[test]
fn config_explicit_rc_wins() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join(RC_FILENAME), PROJECT_RC).unwrap();
    let explicit = temp.path().join("ci.toml");
    std::fs::write(&explicit, "filename = \".ci.envset\"\n").unwrap();

    let config = ConfigLoader::discover(Some(&explicit), temp.path())
        .build()
        .unwrap();
    assert_eq!(config.filename, ".ci.envset");
    assert!(config.isolated);
}
