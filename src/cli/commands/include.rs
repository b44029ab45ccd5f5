//! Add/remove include directories.

use std::path::PathBuf;

use console::style;

use crate::cli::ExitCode;
use crate::cli::commands::{ManifestChoice, Tally, absolutize, choose_manifest};
use crate::config::Settings;
use crate::engine::{
    AddOutcome, EngineOptions, RemoveOutcome, add_include_dir, remove_include_dir,
};
use crate::error::SyncResult;
use crate::ui::Prompt;

pub fn run_add_include(
    dirs: &[PathBuf],
    manifest: Option<PathBuf>,
    settings: &Settings,
    prompt: &dyn Prompt,
) -> SyncResult<ExitCode> {
    let dirs: Vec<PathBuf> = dirs.iter().map(|d| absolutize(d)).collect();

    let manifest = match choose_manifest(
        manifest.map(|m| absolutize(&m)),
        &dirs[0],
        &settings.resolved_workspace_root(),
        prompt,
    ) {
        ManifestChoice::Chosen(path) => path,
        ManifestChoice::NoneFound => {
            eprintln!("no CMakeLists.txt found for the selected directories");
            return Ok(ExitCode::NothingToDo);
        }
        ManifestChoice::Cancelled => {
            eprintln!("cancelled");
            return Ok(ExitCode::NothingToDo);
        }
    };

    let opts = EngineOptions {
        nested_parens: settings.engine.nested_parens,
    };
    let mut tally = Tally::default();

    for dir in &dirs {
        // A missing include_directories block is auto-created, so the only
        // outcomes here are added / already present.
        match add_include_dir(&manifest, dir, &opts)? {
            AddOutcome::Added => tally.added += 1,
            AddOutcome::AlreadyPresent => tally.already_present += 1,
            AddOutcome::BlockMissing { .. } => tally.skipped += 1,
        }
    }

    println!("{}: {tally}", style(manifest.display()).green());
    Ok(ExitCode::Success)
}

pub fn run_remove_include(
    dirs: &[PathBuf],
    manifest: Option<PathBuf>,
    settings: &Settings,
    prompt: &dyn Prompt,
) -> SyncResult<ExitCode> {
    let dirs: Vec<PathBuf> = dirs.iter().map(|d| absolutize(d)).collect();

    let manifest = match choose_manifest(
        manifest.map(|m| absolutize(&m)),
        &dirs[0],
        &settings.resolved_workspace_root(),
        prompt,
    ) {
        ManifestChoice::Chosen(path) => path,
        ManifestChoice::NoneFound => {
            eprintln!("no CMakeLists.txt found for the selected directories");
            return Ok(ExitCode::NothingToDo);
        }
        ManifestChoice::Cancelled => {
            eprintln!("cancelled");
            return Ok(ExitCode::NothingToDo);
        }
    };

    let opts = EngineOptions {
        nested_parens: settings.engine.nested_parens,
    };
    let mut tally = Tally::default();

    for dir in &dirs {
        match remove_include_dir(&manifest, dir, &opts)? {
            RemoveOutcome::Removed => tally.removed += 1,
            RemoveOutcome::NotPresent | RemoveOutcome::BlockMissing { .. } => {
                tally.not_found += 1;
            }
        }
    }

    println!("{}: {tally}", style(manifest.display()).green());
    Ok(ExitCode::Success)
}
