// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            EnvsetError (~24 bytes)
//!                     |
//!   +--------+--------+--------+--------+
//!   |        |        |        |        |
//!   v        v        v        v        v
//!  Env     Config  Process  Metadata  Io/Other
//!  Box      Box      Box      Box     Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Env       FileNotFound, SectionNotFound, MissingRequiredKeys,
//!             CommandFailed, MalformedFile
//!   Config    ParseError, MissingKey, InvalidValue, UnknownEnvironment
//!   Process   ExecutableNotFound, SpawnFailed, NonZeroExit, Terminated
//!   Metadata  Read, Parse, Write, Serialize, WrongAlgorithm,
//!             SectionNotFound, Mismatch, InvalidSecret
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EnvsetError`].
pub type EnvsetResult<T> = std::result::Result<T, EnvsetError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum EnvsetError {
    /// Environment resolution failed.
    #[error(transparent)]
    Env(#[from] Box<EnvError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Metadata file error.
    #[error("metadata error: {0}")]
    Metadata(#[from] Box<MetadataError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl EnvsetError {
    /// Exit code to report for this error.
    ///
    /// A child process that failed on its own keeps its exit code, every
    /// other failure maps to `1`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Process(err) => err.exit_code(),
            _ => 1,
        }
    }
}

/// Exit code for a failure anywhere in `err`'s chain.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| {
            cause
                .downcast_ref::<EnvsetError>()
                .map(EnvsetError::exit_code)
                .or_else(|| cause.downcast_ref::<ProcessError>().map(ProcessError::exit_code))
        })
        .unwrap_or(1)
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for EnvsetError {
                fn from(err: $error) -> Self {
                    EnvsetError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    EnvError => Env,
    ConfigError => Config,
    ProcessError => Process,
    MetadataError => Metadata,
    std::io::Error => Io,
}

// --- Environment Errors ---

/// Discriminant of an [`EnvError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvErrorKind {
    FileNotFound,
    SectionNotFound,
    MissingRequiredKeys,
    CommandFailed,
    MalformedFile,
}

/// Errors raised while loading and resolving an environment.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The environment file was not found on the upward search path.
    #[error("file not found: {name}")]
    FileNotFound { name: String },

    /// The requested section does not exist, or is empty in isolated mode.
    #[error("section not found: [{section}]{}", format_available(.available))]
    SectionNotFound {
        section: String,
        available: Vec<String>,
    },

    /// Required keys resolved to absent or empty values.
    #[error("missing required keys: {}", .keys.join(", "))]
    MissingRequiredKeys { keys: Vec<String> },

    /// A `$(command)` substitution could not run or exited with an error.
    #[error("error running command '{command}': {message}")]
    CommandFailed { command: String, message: String },

    /// A line in the environment file could not be parsed.
    #[error("malformed file '{path}' line {line_number}: key-value delimiter not found: {line}")]
    MalformedFile {
        path: String,
        line_number: usize,
        line: String,
    },
}

impl EnvError {
    /// Returns the discriminant of this error.
    #[must_use]
    pub const fn kind(&self) -> EnvErrorKind {
        match self {
            Self::FileNotFound { .. } => EnvErrorKind::FileNotFound,
            Self::SectionNotFound { .. } => EnvErrorKind::SectionNotFound,
            Self::MissingRequiredKeys { .. } => EnvErrorKind::MissingRequiredKeys,
            Self::CommandFailed { .. } => EnvErrorKind::CommandFailed,
            Self::MalformedFile { .. } => EnvErrorKind::MalformedFile,
        }
    }
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        String::new()
    } else {
        format!(" (available sections: {})", available.join(", "))
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing configuration key.
    #[error("unknown config key '{key}'")]
    MissingKey { key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Environment name is not configured.
    #[error("unknown environment '{name}' (known environments: {})", .known.join(", "))]
    UnknownEnvironment { name: String, known: Vec<String> },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process was terminated by a signal and reported no exit code.
    #[error("process '{command}' was terminated")]
    Terminated { command: String },
}

impl ProcessError {
    /// The child's own exit code, or `1` when it has none.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NonZeroExit { code, .. } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}

// --- Metadata Errors ---

/// Metadata file errors.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Failed to read a metadata file.
    #[error("failed to read metadata file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a metadata file.
    #[error("failed to parse metadata file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write a metadata file.
    #[error("failed to write metadata file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize metadata.
    #[error("failed to serialize metadata: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Source and target were hashed with different algorithms.
    #[error("wrong algorithm: source {source_algorithm} target {target_algorithm}")]
    WrongAlgorithm {
        source_algorithm: String,
        target_algorithm: String,
    },

    /// Section missing from a metadata file.
    #[error("section \"{section}\" not found in metadata file {path}")]
    SectionNotFound { section: String, path: String },

    /// A compared section differs between source and target.
    #[error("section \"{section}\" differs in {count} keys")]
    Mismatch { section: String, count: usize },

    /// Invalid HMAC secret.
    #[error("invalid hash secret")]
    InvalidSecret,
}

#[cfg(test)]
mod tests;
