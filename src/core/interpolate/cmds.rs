// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `$(command)` substitution.
//!
//! ```text
//! "id-$(hostname -s)"
//!       |
//!       v  match \$\(.*\)  (greedy: first "$(" to last ")" on a line)
//!   "$(hostname -s)" --> program "hostname", args ["-s"]
//!       |
//!       v  ProcessBuilder::run(), stdout captured
//!   "box\n" --> trim one "\n" --> "id-box"
//! ```

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::core::process::builder::ProcessBuilder;
use crate::error::EnvError;

fn command_pattern() -> Result<&'static Regex, EnvError> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\$\(.*\)"))
        .as_ref()
        .map_err(|e| EnvError::CommandFailed {
            command: r"\$\(.*\)".to_string(),
            message: e.to_string(),
        })
}

/// Runs every `$(...)` span in `input` and substitutes its output.
///
/// Each distinct span runs once; all of its occurrences are replaced.
///
/// # Errors
///
/// Returns `EnvError::CommandFailed` if a command is empty, cannot be
/// started, or exits with a non-zero status.
pub async fn interpolate_cmds(input: &str) -> Result<String, EnvError> {
    let re = command_pattern()?;

    let mut spans: Vec<&str> = Vec::new();
    for m in re.find_iter(input) {
        if !spans.contains(&m.as_str()) {
            spans.push(m.as_str());
        }
    }
    if spans.is_empty() {
        return Ok(input.to_string());
    }

    let mut out = input.to_string();
    for span in spans {
        let command = span.replace("$(", "").replace(')', "");
        let output = run_command(&command).await?;
        out = out.replace(span, &output);
    }
    Ok(out)
}

async fn run_command(command: &str) -> Result<String, EnvError> {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(EnvError::CommandFailed {
            command: command.to_string(),
            message: "empty command".to_string(),
        });
    };

    debug!(command = %command, "running command substitution");
    let output = ProcessBuilder::new(program)
        .args(parts)
        .name(program)
        .capture_output()
        .run()
        .await
        .map_err(|e| EnvError::CommandFailed {
            command: command.to_string(),
            message: format!("{e:#}"),
        })?;

    let stdout = output.stdout();
    Ok(stdout.strip_suffix('\n').unwrap_or(stdout).to_string())
}
