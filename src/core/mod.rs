// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for environment loading, resolution and execution.
//!
//! ```text
//!   ini -----> section -----> env -----> interpolate
//!   parse      find file      EnvMap     ${VAR} / $(cmd) / $OS
//!   render     pick section   Ambient         |
//!                                             v
//!                            process <------ run
//!                            Builder         Controller, print
//!                            cancel          restart, reload
//! ```

pub mod env;
pub mod ini;
pub mod interpolate;
pub mod process;
pub mod run;
pub mod section;
