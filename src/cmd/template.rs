// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Template command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::cli::template::TemplateArgs;
use crate::config::Config;
use crate::core::section::SectionLoader;
use crate::error::Result;
use crate::template::{load_template, save, update_template};

/// Main handler for the template command.
///
/// # Errors
///
/// Returns an error if the environment file or existing template cannot
/// be parsed, or the result cannot be written.
pub fn run_template_command<W: Write>(
    args: &TemplateArgs,
    config: &Config,
    cwd: &Path,
    out: &mut W,
) -> Result<()> {
    let env_file = args
        .env_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.filename));
    let (_, source) = SectionLoader::builder()
        .with_filename(env_file)
        .with_start_dir(cwd.to_path_buf())
        .build()
        .load_document()?;

    let dir = args
        .filepath
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.template.path));
    let name = args.filename.as_deref().unwrap_or(&config.template.file);
    let path = cwd.join(dir).join(name);

    let mut template = load_template(&path, args.overwrite)?;
    update_template(&source, &mut template);

    if args.print {
        out.write_all(template.render().as_bytes())
            .context("failed to write template")?;
        return Ok(());
    }

    save(&template, &path)?;
    info!(path = %path.display(), "template written");
    Ok(())
}
