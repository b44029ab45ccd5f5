//! Refs command: resolve quoted filenames in a manifest.

use std::fs;
use std::path::Path;

use console::style;

use crate::cli::ExitCode;
use crate::cli::commands::absolutize;
use crate::config::Settings;
use crate::error::{SyncError, SyncResult};
use crate::refs::ReferenceResolver;

pub fn run_refs(manifest: &Path, settings: &Settings) -> SyncResult<ExitCode> {
    let manifest = absolutize(manifest);
    let content = fs::read_to_string(&manifest).map_err(|source| SyncError::Read {
        path: manifest.clone(),
        source,
    })?;

    let mut resolver = ReferenceResolver::new(
        settings.resolved_workspace_root(),
        settings.engine.nested_parens,
        settings.refs.debounce_ms,
    );
    let references = resolver.resolve(&content);

    if references.is_empty() {
        println!("no references resolved in {}", manifest.display());
        return Ok(ExitCode::NothingToDo);
    }

    for reference in references {
        if reference.is_ambiguous() {
            println!(
                "{} -> {} candidates:",
                style(&reference.name).cyan(),
                reference.targets.len()
            );
            for target in &reference.targets {
                println!("    {}", target.display());
            }
        } else {
            println!(
                "{} -> {}",
                style(&reference.name).cyan(),
                reference.targets[0].display()
            );
        }
    }
    Ok(ExitCode::Success)
}
