// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Upward file search.
//!
//! ```text
//! find_upward(".envset", /home/me/app/src)
//!   /home/me/app/src/.envset   miss
//!   /home/me/app/.envset       hit --> return
//!   /home/me/.envset           (not visited)
//! ```

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::EnvError;

/// Finds `name` in `start` or the closest ancestor directory that has it.
///
/// Absolute paths are not searched, only checked for existence.
///
/// # Errors
///
/// Returns `EnvError::FileNotFound` when no candidate exists.
pub fn find_upward(name: &Path, start: &Path) -> Result<PathBuf, EnvError> {
    if name.is_absolute() {
        return if name.is_file() {
            Ok(name.to_path_buf())
        } else {
            Err(not_found(name))
        };
    }

    for dir in start.ancestors() {
        let candidate = dir.join(name);
        trace!(candidate = %candidate.display(), "looking for file");
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(not_found(name))
}

/// Like [`find_upward`], starting from the current working directory.
///
/// # Errors
///
/// Returns `EnvError::FileNotFound` when no candidate exists or the
/// working directory cannot be determined.
pub fn find_from_cwd(name: &Path) -> Result<PathBuf, EnvError> {
    let cwd = std::env::current_dir().map_err(|_| not_found(name))?;
    find_upward(name, &cwd)
}

fn not_found(name: &Path) -> EnvError {
    EnvError::FileNotFound {
        name: name.display().to_string(),
    }
}
