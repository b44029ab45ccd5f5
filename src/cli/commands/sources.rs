//! Add/remove source files against their mapped set() blocks.

use std::path::PathBuf;

use console::style;

use crate::cli::ExitCode;
use crate::cli::commands::{ManifestChoice, Tally, absolutize, choose_manifest};
use crate::config::Settings;
use crate::engine::{AddOutcome, EngineOptions, RemoveOutcome, add_entry, create_blocks, remove_entry};
use crate::error::{SyncError, SyncResult};
use crate::mapping::filter_managed;
use crate::ui::Prompt;

pub fn run_add(
    paths: &[PathBuf],
    manifest: Option<PathBuf>,
    settings: &Settings,
    prompt: &dyn Prompt,
) -> SyncResult<ExitCode> {
    let paths: Vec<PathBuf> = paths.iter().map(|p| absolutize(p)).collect();
    let managed = match filter_managed(&paths, &settings.mapping) {
        Ok(managed) => managed,
        Err(SyncError::NoManagedFiles) => {
            eprintln!("{}", SyncError::NoManagedFiles);
            return Ok(ExitCode::NothingToDo);
        }
        Err(e) => return Err(e),
    };

    let manifest = match choose_manifest(
        manifest.map(|m| absolutize(&m)),
        &managed[0],
        &settings.resolved_workspace_root(),
        prompt,
    ) {
        ManifestChoice::Chosen(path) => path,
        ManifestChoice::NoneFound => {
            eprintln!("no CMakeLists.txt found for the selected files");
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
    let mut pending: Vec<PathBuf> = Vec::new();
    let mut missing_groups: Vec<String> = Vec::new();

    for file in &managed {
        match add_entry(&manifest, file, &settings.mapping, &opts)? {
            AddOutcome::Added => tally.added += 1,
            AddOutcome::AlreadyPresent => tally.already_present += 1,
            AddOutcome::BlockMissing { group } => {
                if !missing_groups.contains(&group) {
                    missing_groups.push(group);
                }
                pending.push(file.clone());
            }
        }
    }

    if !pending.is_empty() {
        let question = format!(
            "Group(s) {} not found in {}. Create them?",
            missing_groups.join(", "),
            manifest.display()
        );
        if prompt.confirm(&question) {
            create_blocks(&manifest, &missing_groups, &opts)?;
            for file in &pending {
                match add_entry(&manifest, file, &settings.mapping, &opts)? {
                    AddOutcome::Added => tally.added += 1,
                    AddOutcome::AlreadyPresent => tally.already_present += 1,
                    // The block was just created; a still-missing block
                    // means the manifest changed underneath us.
                    AddOutcome::BlockMissing { group } => {
                        tracing::warn!("block {group} still missing after creation");
                        tally.skipped += 1;
                    }
                }
            }
        } else {
            tally.skipped += pending.len();
        }
    }

    println!("{}: {tally}", style(manifest.display()).green());
    Ok(ExitCode::Success)
}

pub fn run_remove(
    paths: &[PathBuf],
    manifest: Option<PathBuf>,
    settings: &Settings,
    prompt: &dyn Prompt,
) -> SyncResult<ExitCode> {
    let paths: Vec<PathBuf> = paths.iter().map(|p| absolutize(p)).collect();
    let managed = match filter_managed(&paths, &settings.mapping) {
        Ok(managed) => managed,
        Err(SyncError::NoManagedFiles) => {
            eprintln!("{}", SyncError::NoManagedFiles);
            return Ok(ExitCode::NothingToDo);
        }
        Err(e) => return Err(e),
    };

    let manifest = match choose_manifest(
        manifest.map(|m| absolutize(&m)),
        &managed[0],
        &settings.resolved_workspace_root(),
        prompt,
    ) {
        ManifestChoice::Chosen(path) => path,
        ManifestChoice::NoneFound => {
            eprintln!("no CMakeLists.txt found for the selected files");
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

    for file in &managed {
        match remove_entry(&manifest, file, &settings.mapping, &opts)? {
            RemoveOutcome::Removed => tally.removed += 1,
            RemoveOutcome::NotPresent | RemoveOutcome::BlockMissing { .. } => {
                tally.not_found += 1;
            }
        }
    }

    println!("{}: {tally}", style(manifest.display()).green());
    Ok(ExitCode::Success)
}
