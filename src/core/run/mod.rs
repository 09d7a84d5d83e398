// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Running commands under a named environment.
//!
//! ```text
//! RunOptions --+--> print::print()        no command: render for eval
//!              |
//!              +--> Controller::run()     command: spawn, wait, restart
//!                        ^
//!                        |
//!                   ReloadSignal (SIGHUP)
//! ```
//!
//! Both paths share [`print::resolve`], so they always agree on the
//! resolved values.

pub mod controller;
pub mod options;
pub mod print;
pub mod reload;


pub use controller::{Controller, RunState, isolated_env, merge_into_ambient};
pub use options::{RestartPolicy, RunOptions};
pub use print::{print, render, resolve};
pub use reload::{ReloadSignal, ReloadTrigger};
