// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Metadata command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::cli::metadata::{CompareArgs, MetadataArgs, MetadataSubcommand};
use crate::config::Config;
use crate::core::section::{SectionLoader, find_upward};
use crate::error::{MetadataError, Result};
use crate::metadata::report::{render_ok, render_report};
use crate::metadata::{self, MetaFile, MetadataOptions, compare_files, generate, origin_url};

/// Main handler for the metadata command.
///
/// # Errors
///
/// Returns an error if the environment file or a metadata file cannot be
/// read, the output cannot be written, or a comparison finds differences.
pub async fn run_metadata_command<W: Write>(
    args: &MetadataArgs,
    config: &Config,
    cwd: &Path,
    out: &mut W,
) -> Result<()> {
    match &args.subcommand {
        Some(MetadataSubcommand::Compare(compare)) => run_compare(compare, config, cwd, out),
        None => run_generate(args, config, cwd, out).await,
    }
}

async fn run_generate<W: Write>(
    args: &MetadataArgs,
    config: &Config,
    cwd: &Path,
    out: &mut W,
) -> Result<()> {
    let env_file = args
        .env_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.filename));
    let loader = SectionLoader::builder()
        .with_filename(env_file.clone())
        .with_start_dir(cwd.to_path_buf())
        .build();
    let (_, doc) = loader.load_document()?;

    let options = MetadataOptions::builder()
        .with_envfile(env_file.display().to_string())
        .with_project(origin_url(cwd).await)
        .maybe_with_secret(args.secret.clone())
        .with_values(args.values)
        .with_globals(args.globals)
        .with_comment_sections(config.comment_section_names.clone())
        .build();
    let meta = generate(&doc, &options)?;

    if args.print {
        writeln!(out, "{}", meta.to_json()?).context("failed to write metadata")?;
        return Ok(());
    }

    let dir = args
        .filepath
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.meta.dir));
    let name = args.filename.as_deref().unwrap_or(&config.meta.file);
    let path = cwd.join(dir).join(name);

    let outcome = metadata::write(&meta, &path, args.overwrite)?;
    info!(path = %path.display(), %outcome, "metadata file");
    writeln!(out, "{outcome}: {}", path.display()).context("failed to write output")?;
    Ok(())
}

fn run_compare<W: Write>(
    args: &CompareArgs,
    config: &Config,
    cwd: &Path,
    out: &mut W,
) -> Result<()> {
    let (source_path, target_path) = match args.files.as_slice() {
        [source, target] => (source.clone(), target.clone()),
        [target] => {
            let default = Path::new(&config.meta.dir).join(&config.meta.file);
            let source = find_upward(&default, cwd)?;
            let source = source
                .strip_prefix(cwd)
                .map_or_else(|_| source.clone(), Path::to_path_buf);
            (source, target.clone())
        }
        _ => anyhow::bail!("metadata compare needs a target file"),
    };

    let source = MetaFile::load(&cwd.join(&source_path))?;
    let target = MetaFile::load(&cwd.join(&target_path))?;
    let ignored = config.merge_ignored(&args.section, &args.ignore);
    let diff = compare_files(&source, &target, &args.section, &ignored)?;

    let print = args.print.unwrap_or(config.meta.print);
    let json = args.json.unwrap_or(config.meta.json);
    let source_name = source_path.display().to_string();
    let target_name = target_path.display().to_string();

    if diff.is_empty() {
        if print && !json {
            write!(out, "{}", render_ok(&source_name, &target_name))
                .context("failed to write report")?;
        }
        return Ok(());
    }

    if json {
        writeln!(out, "{}", diff.to_section().to_json()?).context("failed to write report")?;
    } else if print {
        write!(out, "{}", render_report(&diff, &source_name, &target_name))
            .context("failed to write report")?;
    }

    Err(MetadataError::Mismatch {
        section: args.section.clone(),
        count: diff.entries.len(),
    }
    .into())
}
