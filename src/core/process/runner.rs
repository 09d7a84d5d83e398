// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run() / run_with_cancellation(token)
//!              |
//!              v
//!     build_command()
//!     args, cwd, env, stdio
//!              |
//!              v
//!          spawn() ----------> ProcessError::SpawnFailed
//!              |
//!              v
//!         run_child
//!   (select: wait | cancelled)
//!              |
//!              v
//!    validate exit_code -----> ProcessError::NonZeroExit
//!    (skip if ALLOW_FAILURE       / Terminated
//!     or interrupted)
//!              |
//!              v
//!       ProcessOutput
//!    { exit_code, stdout, stderr, interrupted }
//! ```

use crate::error::{ProcessError, Result};
use std::process::Stdio;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};

impl ProcessBuilder {
    /// Returns the display name for this process.
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_name().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process, waiting for completion.
    ///
    /// This is the main entry point for executing a process.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Spawning the child process fails.
    /// - The process exits with a non-zero status (and `ALLOW_FAILURE` flag is not set).
    pub async fn run(self) -> Result<ProcessOutput> {
        self.run_with_cancellation(CancellationToken::new()).await
    }

    /// Spawns and runs the process with cancellation support.
    ///
    /// Similar to `run()`, but accepts a `CancellationToken` that can be used
    /// to interrupt the process. When the token is cancelled the process is
    /// killed and the output is returned with `interrupted = true`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Spawning the child process fails.
    /// - The process exits with a non-zero status (and `ALLOW_FAILURE` flag is not set,
    ///   and the process was not interrupted).
    ///
    /// # Example
    ///
    /// ```ignore
    /// use tokio_util::sync::CancellationToken;
    /// use envset_rs::core::process::builder::ProcessBuilder;
    ///
    /// let token = CancellationToken::new();
    /// let reload = token.clone();
    ///
    /// // Kill the child when a reload arrives
    /// tokio::spawn(async move {
    ///     wait_for_reload().await;
    ///     reload.cancel();
    /// });
    ///
    /// let output = ProcessBuilder::new("long-running-command")
    ///     .run_with_cancellation(token)
    ///     .await?;
    /// ```
    pub async fn run_with_cancellation(self, token: CancellationToken) -> Result<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        // Check if already cancelled before spawning
        if token.is_cancelled() {
            return Ok(ProcessOutput::new(None, String::new(), String::new(), true));
        }

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        // Build the tokio Command
        let mut command = self.build_command();

        // Spawn the process
        let mut child = command
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;

        let pid = child.id();
        trace!(process = %name, pid = ?pid, "spawned");

        let output = self
            .run_child_with_cancellation(&name, &mut child, token)
            .await?;

        // Check exit code (unless interrupted or ALLOW_FAILURE)
        if !output.is_interrupted() && !self.process_flags().contains(ProcessFlags::ALLOW_FAILURE)
        {
            match output.exit_code() {
                Some(0) => {}
                Some(code) => {
                    if !output.stderr().is_empty() {
                        error!(process = %name, stderr = %output.stderr(), "process error output");
                    }
                    return Err(ProcessError::NonZeroExit { command: name, code }.into());
                }
                None => return Err(ProcessError::Terminated { command: name }.into()),
            }
        }

        trace!(
            process = %name,
            exit_code = ?output.exit_code(),
            interrupted = output.is_interrupted(),
            "completed"
        );
        Ok(output)
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());

        // Arguments
        command.args(self.args_slice());

        // Working directory
        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        // Environment
        if let Some(env) = self.environment() {
            command.env_clear();
            for (key, value) in env.iter() {
                command.env(key, value);
            }
        }

        // Interactive children read from the terminal
        if self.stdout_config().contains(StreamFlags::INHERIT) {
            command.stdin(Stdio::inherit());
        } else {
            command.stdin(Stdio::null());
        }

        command.stdout(Self::stdio_from_flags(self.stdout_config()));
        command.stderr(Self::stdio_from_flags(self.stderr_config()));

        // Kill on drop for safety
        command.kill_on_drop(true);

        command
    }

    /// Converts `StreamFlags` to Stdio configuration.
    fn stdio_from_flags(flags: StreamFlags) -> Stdio {
        if flags.contains(StreamFlags::INHERIT) {
            Stdio::inherit()
        } else if flags.contains(StreamFlags::BIT_BUCKET) {
            Stdio::null()
        } else {
            Stdio::piped()
        }
    }
}
