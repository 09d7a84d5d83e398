// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Execution controller.
//!
//! ```text
//!  Idle
//!   |
//!   v
//!  Resolving ----------------------------> Failed (EnvError)
//!   |                                        ^
//!   v                                        |
//!  Validating ---- missing required keys ----+
//!   |
//!   v
//!  Running ---- select! { child exits | reload }
//!   |                          |
//!   v                          v
//!  Completed               Reloading (child killed)
//!   |   \                      |
//!   |    failed and            |
//!   |    policy allows         |
//!   |        \                 |
//!   |         v                v
//!   |        Restarting -----> Resolving (file re-read)
//!   v
//!  Terminal (last result returned)
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::options::RunOptions;
use super::print::{resolve, warn_unresolved};
use super::reload::ReloadSignal;
use crate::core::env::{AmbientEnv, EnvMap};
use crate::core::interpolate::{ExpandReport, interpolate_args};
use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{EnvError, ProcessError, Result};

/// Controller states, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Resolving,
    Validating,
    Running,
    Completed,
    Failed,
    Reloading,
    Restarting,
    Terminal,
}

/// How one execution of the child ended.
enum Attempt {
    Succeeded,
    Failed(ProcessError),
    Reloaded,
}

/// Runs a command under a resolved environment, restarting it as the
/// options allow. One controller serves one invocation.
pub struct Controller {
    options: RunOptions,
    ambient: Arc<dyn AmbientEnv>,
    state: RunState,
    executions: u64,
    restarts: u64,
    last_env: Option<EnvMap>,
    last_report: ExpandReport,
    injected: BTreeSet<String>,
}

impl Controller {
    #[must_use]
    pub fn new(options: RunOptions, ambient: Arc<dyn AmbientEnv>) -> Self {
        Self {
            options,
            ambient,
            state: RunState::Idle,
            executions: 0,
            restarts: 0,
            last_env: None,
            last_report: ExpandReport::default(),
            injected: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Number of times the child process has been spawned.
    #[must_use]
    pub const fn executions(&self) -> u64 {
        self.executions
    }

    /// Number of restarts performed, including reloads.
    #[must_use]
    pub const fn restarts(&self) -> u64 {
        self.restarts
    }

    /// References left unexpanded by the most recent resolution.
    #[must_use]
    pub const fn report(&self) -> &ExpandReport {
        &self.last_report
    }

    fn transition(&mut self, next: RunState) {
        debug!(from = ?self.state, to = ?next, "state transition");
        self.state = next;
    }

    /// Runs the configured command until it succeeds, the restart policy
    /// gives up, or resolution fails.
    ///
    /// # Errors
    ///
    /// Returns an `EnvError` if the environment cannot be resolved or
    /// required keys are missing, `ProcessError::ExecutableNotFound` or
    /// `ProcessError::SpawnFailed` if the command cannot be started, and
    /// `ProcessError::NonZeroExit` or `ProcessError::Terminated` for the
    /// last failed execution.
    ///
    /// Without isolation the resolved keys are written into the ambient
    /// environment and stay there after this returns.
    pub async fn run(&mut self, reload: &mut ReloadSignal) -> Result<()> {
        loop {
            self.transition(RunState::Resolving);
            self.restore_ambient();
            let env = match resolve(&self.options, self.ambient.as_ref()).await {
                Ok((env, report)) => {
                    warn_unresolved(&report);
                    self.last_report = report;
                    env
                }
                Err(e) => return Err(self.fail(e)),
            };
            self.log_changes(&env);

            self.transition(RunState::Validating);
            let missing = env.get_missing_keys(self.options.required());
            if !missing.is_empty() {
                return Err(self.fail(EnvError::MissingRequiredKeys { keys: missing }));
            }

            let builder = match self.prepare(&env) {
                Ok(builder) => builder,
                Err(e) => {
                    self.transition(RunState::Failed);
                    return Err(e);
                }
            };
            self.last_env = Some(env);

            self.transition(RunState::Running);
            self.executions += 1;
            let attempt = match execute(builder, reload).await {
                Ok(attempt) => attempt,
                Err(e) => {
                    self.transition(RunState::Failed);
                    return Err(e);
                }
            };

            match attempt {
                Attempt::Reloaded => {
                    self.transition(RunState::Reloading);
                    info!(environment = %self.options.environment(), "reloading");
                }
                Attempt::Succeeded => {
                    self.transition(RunState::Completed);
                    self.transition(RunState::Terminal);
                    return Ok(());
                }
                Attempt::Failed(err) => {
                    self.transition(RunState::Completed);
                    if !self.options.restart().allows(self.restarts) {
                        self.transition(RunState::Terminal);
                        return Err(err.into());
                    }
                    warn!(
                        error = %err,
                        restart = self.restarts + 1,
                        max_restarts = self.options.restart().max_restarts(),
                        "command failed, restarting"
                    );
                }
            }

            self.restarts += 1;
            self.transition(RunState::Restarting);
        }
    }

    fn fail(&mut self, err: EnvError) -> anyhow::Error {
        self.transition(RunState::Failed);
        err.into()
    }

    /// Unsets the keys injected by the previous attempt so the next
    /// resolution sees the parent environment as it was.
    fn restore_ambient(&mut self) {
        for key in std::mem::take(&mut self.injected) {
            self.ambient.remove(&key);
        }
    }

    fn log_changes(&self, env: &EnvMap) {
        if let Some(previous) = &self.last_env {
            let diff = previous.diff(env);
            if !diff.is_empty() {
                info!(
                    added = ?diff.added,
                    removed = ?diff.removed,
                    changed = ?diff.changed,
                    "environment changed since last run"
                );
            }
        }
    }

    /// Builds the child process and applies the environment to it.
    fn prepare(&mut self, env: &EnvMap) -> Result<ProcessBuilder> {
        let Some(cmd) = self.options.cmd() else {
            anyhow::bail!("no command given");
        };
        let ambient = self.ambient.as_ref();
        let args = interpolate_args(self.options.args(), env, self.options.expand(), ambient);

        let builder = if cmd.contains(std::path::MAIN_SEPARATOR) || cmd.contains('/') {
            ProcessBuilder::new(cmd)
        } else {
            ProcessBuilder::which(cmd)?
        };
        let builder = builder
            .args(args)
            .name(cmd)
            .inherit_stdio()
            .flag(ProcessFlags::ALLOW_FAILURE);

        if self.options.isolated() {
            Ok(builder.env(isolated_env(env, self.options.inherit(), ambient)))
        } else {
            self.injected = merge_into_ambient(env, ambient);
            Ok(builder)
        }
    }
}

/// Child environment for isolated runs: the resolved keys plus inherited
/// names that exist in `ambient` and were not resolved from the file.
#[must_use]
pub fn isolated_env<S: AsRef<str>>(env: &EnvMap, inherit: &[S], ambient: &dyn AmbientEnv) -> EnvMap {
    let mut child = env.clone();
    for key in inherit.iter().map(AsRef::as_ref) {
        if child.contains_key(key) {
            continue;
        }
        if let Some(value) = ambient.get(key) {
            child.set(key, value);
        }
    }
    child
}

/// Sets every resolved key that `ambient` does not define yet and returns
/// the keys it set.
pub fn merge_into_ambient(env: &EnvMap, ambient: &dyn AmbientEnv) -> BTreeSet<String> {
    let mut injected = BTreeSet::new();
    for (key, value) in env.iter() {
        if !ambient.contains(key) {
            ambient.set(key, value);
            injected.insert(key.to_string());
        }
    }
    injected
}

/// Spawns the child and waits for it or for a reload, whichever comes first.
async fn execute(builder: ProcessBuilder, reload: &mut ReloadSignal) -> Result<Attempt> {
    let name = builder.command_line();
    let token = CancellationToken::new();
    let run = builder.run_with_cancellation(token.clone());
    tokio::pin!(run);

    let mut reload_open = true;
    let output: ProcessOutput = loop {
        tokio::select! {
            output = &mut run => break output?,
            signal = reload.recv(), if reload_open => match signal {
                Some(()) => {
                    info!(cmd = %name, "reload requested, stopping child");
                    token.cancel();
                }
                None => reload_open = false,
            },
        }
    };

    if output.is_interrupted() {
        return Ok(Attempt::Reloaded);
    }
    Ok(match output.exit_code() {
        Some(0) => Attempt::Succeeded,
        Some(code) => Attempt::Failed(ProcessError::NonZeroExit {
            command: name,
            code,
        }),
        None => Attempt::Failed(ProcessError::Terminated { command: name }),
    })
}
