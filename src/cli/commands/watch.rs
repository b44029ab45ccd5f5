//! Watch command: run the deletion watcher until interrupted.

use std::path::PathBuf;

use crate::cli::ExitCode;
use crate::cli::commands::absolutize;
use crate::config::Settings;
use crate::error::SyncResult;
use crate::ui::Prompt;
use crate::watcher::DeleteWatcher;

pub fn run_watch(
    root: Option<PathBuf>,
    settings: &Settings,
    prompt: &dyn Prompt,
) -> SyncResult<ExitCode> {
    let root = root
        .map(|r| absolutize(&r))
        .unwrap_or_else(|| settings.resolved_workspace_root());

    let watcher = DeleteWatcher::new(root, settings.clone(), prompt)?;
    watcher.run()?;
    Ok(ExitCode::Success)
}
