// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Options for one print or run invocation.

use std::path::PathBuf;

use bon::Builder;

use crate::core::section::{DEFAULT_EXPORT_ENV_NAME, DEFAULT_FILENAME, SectionLoader};

/// When a failed command is executed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RestartPolicy {
    enabled: bool,
    max_restarts: u64,
}

impl RestartPolicy {
    /// Never restart.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            max_restarts: 0,
        }
    }

    /// Restart a failed command at most `max_restarts` times.
    #[must_use]
    pub const fn bounded(max_restarts: u64) -> Self {
        Self {
            enabled: true,
            max_restarts,
        }
    }

    /// Restart a failed command without limit.
    #[must_use]
    pub const fn forever() -> Self {
        Self::bounded(u64::MAX)
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn max_restarts(&self) -> u64 {
        self.max_restarts
    }

    /// Returns true if a failure may be restarted after `restarts` restarts.
    #[must_use]
    pub const fn allows(&self, restarts: u64) -> bool {
        self.enabled && restarts < self.max_restarts
    }
}

/// Everything the print path and the execution controller need.
#[derive(Debug, Clone, Builder)]
pub struct RunOptions {
    /// Section to load.
    #[builder(setters(name = with_environment), into)]
    environment: String,
    #[builder(setters(name = with_filename), into, default = PathBuf::from(DEFAULT_FILENAME))]
    filename: PathBuf,
    /// Directory the file search starts from (default: working directory).
    #[builder(setters(name = with_start_dir), into)]
    start_dir: Option<PathBuf>,
    /// Program to execute; `None` selects the print path.
    #[builder(setters(name = with_cmd), into)]
    cmd: Option<String>,
    #[builder(setters(name = with_args), default)]
    args: Vec<String>,
    #[builder(setters(name = with_isolated), default = true)]
    isolated: bool,
    #[builder(setters(name = with_expand), default = true)]
    expand: bool,
    #[builder(setters(name = with_required), default)]
    required: Vec<String>,
    #[builder(setters(name = with_inherit), default)]
    inherit: Vec<String>,
    #[builder(setters(name = with_export_env_name), into, default = DEFAULT_EXPORT_ENV_NAME.to_string())]
    export_env_name: String,
    #[builder(setters(name = with_comment_sections), default)]
    comment_sections: Vec<String>,
    #[builder(setters(name = with_restart), default)]
    restart: RestartPolicy,
}

impl RunOptions {
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    #[must_use]
    pub fn cmd(&self) -> Option<&str> {
        self.cmd.as_deref()
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub const fn isolated(&self) -> bool {
        self.isolated
    }

    #[must_use]
    pub const fn expand(&self) -> bool {
        self.expand
    }

    #[must_use]
    pub fn required(&self) -> &[String] {
        &self.required
    }

    #[must_use]
    pub fn inherit(&self) -> &[String] {
        &self.inherit
    }

    #[must_use]
    pub const fn restart(&self) -> RestartPolicy {
        self.restart
    }

    /// Whether resolved values get the OS expansion pass.
    #[must_use]
    pub const fn os_expand_values(&self) -> bool {
        self.expand && !self.isolated
    }

    /// Section loader configured from these options.
    #[must_use]
    pub fn section_loader(&self) -> SectionLoader {
        SectionLoader::builder()
            .with_filename(self.filename.clone())
            .maybe_with_start_dir(self.start_dir.clone())
            .with_isolated(self.isolated)
            .with_export_env_name(self.export_env_name.clone())
            .with_comment_sections(self.comment_sections.clone())
            .build()
    }
}
