// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::{ProcessBuilder, ProcessFlags};
use crate::core::env::EnvMap;
use crate::error::ProcessError;
use tokio_util::sync::CancellationToken;

#[cfg(unix)]
#[tokio::test]
async fn test_process_echo() {
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .capture_output()
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    assert_eq!(output.stdout(), "hello\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_keeps_output_verbatim() {
    let output = ProcessBuilder::new("printf")
        .arg("a\\n\\nb")
        .capture_stdout()
        .run()
        .await
        .expect("printf should succeed");

    assert_eq!(output.stdout(), "a\n\nb");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_exit_code() {
    let output = ProcessBuilder::new("sh")
        .args(["-c", "exit 42"])
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.exit_code(), Some(42));
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_non_zero_exit_is_typed() {
    let err = ProcessBuilder::new("sh")
        .args(["-c", "exit 3"])
        .quiet()
        .run()
        .await
        .unwrap_err();

    let process_err = err.downcast_ref::<ProcessError>().unwrap();
    assert!(matches!(process_err, ProcessError::NonZeroExit { code: 3, .. }));
}

#[tokio::test]
async fn test_process_spawn_failure_is_typed() {
    let err = ProcessBuilder::new("nonexistent_program_12345")
        .run()
        .await
        .unwrap_err();

    let process_err = err.downcast_ref::<ProcessError>().unwrap();
    assert!(matches!(process_err, ProcessError::SpawnFailed { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_env_is_exact() {
    let mut env = EnvMap::new();
    env.set("TEST_VAR", "test_value");

    let output = ProcessBuilder::new("/bin/sh")
        .args(["-c", "echo \"$TEST_VAR:${HOME:-unset}\""])
        .env(env)
        .capture_stdout()
        .run()
        .await
        .expect("process should succeed");

    assert_eq!(output.stdout(), "test_value:unset\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_cancellation_kills_child() {
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        tokio::task::yield_now().await;
        cancel.cancel();
    });

    let output = ProcessBuilder::new("sleep")
        .arg("30")
        .run_with_cancellation(token)
        .await
        .expect("cancelled process should not error");

    assert!(output.is_interrupted());
    assert!(!output.success());
}

#[cfg(unix)]
#[test]
fn test_executable_lookup() {
    let builder = ProcessBuilder::which("sh").expect("sh should be in PATH");
    assert!(builder.program().exists());
    assert!(ProcessBuilder::find("sh").is_some());

    let err = ProcessBuilder::which("nonexistent_program_12345").unwrap_err();
    assert!(err.to_string().contains("nonexistent_program_12345"));
    assert!(ProcessBuilder::find("nonexistent_program_12345").is_none());
}
