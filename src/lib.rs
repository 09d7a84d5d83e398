// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |       environment / metadata / template / rc
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |    .envsetrc, defaults    |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!                run      metadata  template
//!          print/execute  hash, diff  placeholders
//!                 |           |        |
//!                 +-----+-----+--------+
//!                       v
//!   +--------------------------------------------------+
//!   |  core   ini, section, env, interpolate, process  |
//!   +--------------------------------------------------+
//!   |  foundation   error, logging                     |
//!   +--------------------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod template;
