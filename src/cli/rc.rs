// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config command arguments.
//!
//! ```text
//! config            -> print the default .envsetrc
//! config get KEY    -> value of a dotted key path
//! config list       -> every dotted key path
//! ```

use clap::{Args, Subcommand};

/// Arguments for the `config` command.
#[derive(Debug, Clone, Args)]
pub struct RcArgs {
    #[command(subcommand)]
    pub subcommand: Option<RcSubcommand>,
}

/// Config subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum RcSubcommand {
    /// Prints the value of a key such as `meta.file`.
    Get {
        /// Dotted key path.
        key: String,
    },

    /// Lists all key paths.
    List,
}
