// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   env (print | run), metadata, template, rc
//! ```

pub mod env;
pub mod metadata;
pub mod rc;
pub mod template;
