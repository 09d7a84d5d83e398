// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{EnvError, EnvErrorKind, EnvsetError, EnvsetResult, ProcessError, exit_code_for};

#[test]
fn test_missing_required_keys_display() {
    let err = EnvError::MissingRequiredKeys {
        keys: vec!["DB_URL".to_string(), "API_KEY".to_string()],
    };
    insta::assert_snapshot!(err.to_string(), @"missing required keys: DB_URL, API_KEY");
}

#[test]
fn test_section_not_found_lists_available() {
    let err = EnvError::SectionNotFound {
        section: "DEFAULT".to_string(),
        available: vec!["development".to_string(), "production".to_string()],
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"section not found: [DEFAULT] (available sections: development, production)"
    );

    let bare = EnvError::SectionNotFound {
        section: "staging".to_string(),
        available: Vec::new(),
    };
    insta::assert_snapshot!(bare.to_string(), @"section not found: [staging]");
}

#[test]
fn test_env_error_kind() {
    let kinds = [
        EnvError::FileNotFound {
            name: ".envset".to_string(),
        }
        .kind(),
        EnvError::CommandFailed {
            command: "hostname".to_string(),
            message: "boom".to_string(),
        }
        .kind(),
        EnvError::MalformedFile {
            path: ".envset".to_string(),
            line_number: 3,
            line: "NOPE".to_string(),
        }
        .kind(),
    ];
    assert_eq!(
        kinds,
        [
            EnvErrorKind::FileNotFound,
            EnvErrorKind::CommandFailed,
            EnvErrorKind::MalformedFile
        ]
    );
}

#[test]
fn test_env_error_is_transparent() {
    let err: EnvsetError = EnvError::FileNotFound {
        name: ".envset".to_string(),
    }
    .into();
    assert_eq!(err.to_string(), "file not found: .envset");
}

#[test]
fn test_exit_code_propagates_child_code() {
    let err: EnvsetError = ProcessError::NonZeroExit {
        command: "false".to_string(),
        code: 3,
    }
    .into();
    assert_eq!(err.exit_code(), 3);

    let err: EnvsetError = EnvError::MissingRequiredKeys { keys: vec![] }.into();
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_exit_code_for_searches_chain() {
    use anyhow::Context;

    let err = Err::<(), _>(ProcessError::NonZeroExit {
        command: "node".to_string(),
        code: 42,
    })
    .context("command failed")
    .unwrap_err();
    assert_eq!(exit_code_for(&err), 42);

    let err = anyhow::anyhow!("something else");
    assert_eq!(exit_code_for(&err), 1);
}

#[test]
fn test_envset_error_size() {
    let size = std::mem::size_of::<EnvsetError>();
    assert!(size <= 24, "EnvsetError is {size} bytes, expected <= 24");
}

#[test]
fn test_envset_result_size() {
    let size = std::mem::size_of::<EnvsetResult<()>>();
    assert!(size <= 24, "EnvsetResult<()> is {size} bytes, expected <= 24");
}
