//! The deletion watcher and the prune flow it drives.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, unbounded};
use globset::{Glob, GlobSet, GlobSetBuilder};
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::config::{LOCAL_DIR, Settings};
use crate::engine::{EngineOptions, RemoveOutcome, remove_entry};
use crate::error::{SyncError, SyncResult};
use crate::locator::find_manifests;
use crate::ui::Prompt;
use crate::watcher::debouncer::BatchDebouncer;

/// Watches the workspace for deletions of managed files and offers to prune
/// the stale entries from a manifest.
pub struct DeleteWatcher<'a> {
    workspace_root: PathBuf,
    settings_path: PathBuf,
    settings: Settings,
    filter: GlobSet,
    debouncer: BatchDebouncer,
    event_rx: Receiver<notify::Result<Event>>,
    _watcher: notify::RecommendedWatcher,
    prompt: &'a dyn Prompt,
}

impl<'a> DeleteWatcher<'a> {
    pub fn new(
        workspace_root: PathBuf,
        settings: Settings,
        prompt: &'a dyn Prompt,
    ) -> SyncResult<Self> {
        let filter = build_filter(&settings.managed_extensions)?;
        let debouncer = BatchDebouncer::new(settings.watch.debounce_ms);
        let settings_path = workspace_root.join(LOCAL_DIR).join("settings.toml");

        let (tx, rx) = unbounded();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.send(res);
        })
        .map_err(|e| SyncError::WatchInit {
            reason: e.to_string(),
        })?;
        watcher
            .watch(&workspace_root, RecursiveMode::Recursive)
            .map_err(|e| SyncError::WatchInit {
                reason: e.to_string(),
            })?;

        Ok(Self {
            workspace_root,
            settings_path,
            settings,
            filter,
            debouncer,
            event_rx: rx,
            _watcher: watcher,
            prompt,
        })
    }

    /// Run until the event channel closes.
    ///
    /// Single-threaded loop: receive events with a short timeout, poll the
    /// debouncer, drive the prune flow when a batch is released. Prompts
    /// block the loop; events keep queueing in the channel meanwhile.
    pub fn run(mut self) -> SyncResult<()> {
        tracing::info!(
            "watching {} for deletions of {}",
            self.workspace_root.display(),
            self.settings.managed_extensions.join(", ")
        );

        loop {
            match self.event_rx.recv_timeout(Duration::from_millis(100)) {
                Ok(Ok(event)) => self.handle_event(event),
                Ok(Err(e)) => tracing::error!("file watch error: {e}"),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return Ok(()),
            }

            if let Some(batch) = self.debouncer.take_ready() {
                prune_deleted(
                    &batch,
                    &self.workspace_root,
                    &self.settings,
                    self.prompt,
                );
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        for path in event.paths {
            if path == self.settings_path {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    self.reload_settings();
                }
                continue;
            }
            if matches!(event.kind, EventKind::Remove(_)) && self.filter.is_match(&path) {
                tracing::debug!("delete event: {}", path.display());
                self.debouncer.record(path);
            }
        }
    }

    /// Re-read settings from disk; tear down and rebuild the watch filter
    /// when the managed-extension list changed.
    fn reload_settings(&mut self) {
        let reloaded = match Settings::load_from(&self.settings_path) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("settings reload failed, keeping previous: {e}");
                return;
            }
        };

        if reloaded.managed_extensions != self.settings.managed_extensions {
            match build_filter(&reloaded.managed_extensions) {
                Ok(filter) => {
                    tracing::info!(
                        "managed extensions changed, now watching {}",
                        reloaded.managed_extensions.join(", ")
                    );
                    self.filter = filter;
                }
                Err(e) => tracing::warn!("keeping previous watch filter: {e}"),
            }
        }
        self.debouncer = BatchDebouncer::new(reloaded.watch.debounce_ms);
        self.settings = reloaded;
    }
}

/// Build the delete-event filter from the managed-extension list.
fn build_filter(extensions: &[String]) -> SyncResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for ext in extensions {
        let pattern = format!("**/*{ext}");
        let glob = Glob::new(&pattern).map_err(|source| SyncError::Glob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| SyncError::Glob {
        pattern: extensions.join(","),
        source,
    })
}

/// The prune flow for one batch of deleted files.
///
/// Confirms with the user, then runs batch removal against one manifest
/// from the nearest-first candidate list; files not found in that manifest
/// can be retried against another candidate or skipped. Cancellation at any
/// prompt stops the flow with no further writes.
pub fn prune_deleted(batch: &[PathBuf], workspace_root: &Path, settings: &Settings, prompt: &dyn Prompt) {
    if batch.is_empty() {
        return;
    }

    let question = format!(
        "{} tracked file(s) were deleted. Remove their entries from CMakeLists.txt?",
        batch.len()
    );
    if !prompt.confirm(&question) {
        tracing::debug!("prune declined");
        return;
    }

    let mut candidates = find_manifests(&batch[0], workspace_root);
    if candidates.is_empty() {
        println!("No CMakeLists.txt found for the deleted files.");
        return;
    }

    let opts = EngineOptions {
        nested_parens: settings.engine.nested_parens,
    };
    let mut remaining: Vec<PathBuf> = batch.to_vec();

    while !remaining.is_empty() && !candidates.is_empty() {
        let idx = if candidates.len() == 1 {
            0
        } else {
            let items: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
            match prompt.pick("Remove entries from which manifest?", &items) {
                Some(i) => i,
                None => return,
            }
        };
        let manifest = candidates.remove(idx);

        let mut removed = 0usize;
        let mut leftovers = Vec::new();
        for file in &remaining {
            match remove_entry(&manifest, file, &settings.mapping, &opts) {
                Ok(RemoveOutcome::Removed) => removed += 1,
                Ok(_) => leftovers.push(file.clone()),
                Err(e) => {
                    tracing::warn!("could not prune {}: {e}", file.display());
                    leftovers.push(file.clone());
                }
            }
        }
        println!(
            "Removed {removed} entr{} from {}",
            if removed == 1 { "y" } else { "ies" },
            manifest.display()
        );

        remaining = leftovers;
        if remaining.is_empty() || candidates.is_empty() {
            break;
        }
        let retry = format!(
            "{} file(s) were not found in that manifest. Try another one?",
            remaining.len()
        );
        if !prompt.confirm(&retry) {
            break;
        }
    }

    if !remaining.is_empty() {
        println!("{} deleted file(s) had no matching entry.", remaining.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ScriptedPrompt;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_filter_matches_managed_extensions_only() {
        let filter =
            build_filter(&[".cpp".to_string(), ".h".to_string()]).unwrap();
        assert!(filter.is_match("/ws/src/a.cpp"));
        assert!(filter.is_match("/ws/deep/nested/b.h"));
        assert!(!filter.is_match("/ws/readme.md"));
        assert!(!filter.is_match("/ws/CMakeLists.txt"));
    }

    #[test]
    fn test_prune_removes_deleted_entries() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        let manifest = root.join("CMakeLists.txt");
        fs::write(
            &manifest,
            "project(demo)\n\nset(SOURCES\n    \"a.cpp\"\n    \"b.cpp\"\n)\n",
        )
        .unwrap();

        let prompt = ScriptedPrompt::new();
        prompt.push_confirm(true);

        prune_deleted(&[root.join("a.cpp")], &root, &Settings::default(), &prompt);

        let text = fs::read_to_string(&manifest).unwrap();
        assert!(!text.contains("a.cpp"));
        assert!(text.contains("b.cpp"));
    }

    #[test]
    fn test_prune_declined_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        let manifest = root.join("CMakeLists.txt");
        let original = "set(SOURCES\n    \"a.cpp\"\n)\n";
        fs::write(&manifest, original).unwrap();

        let prompt = ScriptedPrompt::new();
        prompt.push_confirm(false);

        prune_deleted(
            &[root.join("a.cpp")],
            &root,
            &Settings::default(),
            &prompt,
        );

        assert_eq!(fs::read_to_string(&manifest).unwrap(), original);
    }

    #[test]
    fn test_prune_retries_against_parent_manifest() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        let sub = root.join("module");
        fs::create_dir_all(&sub).unwrap();

        // The nearer manifest does not list the file; the root one does.
        fs::write(sub.join("CMakeLists.txt"), "set(SOURCES\n    \"other.cpp\"\n)\n").unwrap();
        fs::write(
            root.join("CMakeLists.txt"),
            "set(SOURCES\n    \"module/gone.cpp\"\n)\n",
        )
        .unwrap();

        let prompt = ScriptedPrompt::new();
        prompt.push_confirm(true); // prune?
        prompt.push_pick(Some(0)); // nearest manifest first
        prompt.push_confirm(true); // not found, try another?

        prune_deleted(&[sub.join("gone.cpp")], &root, &Settings::default(), &prompt);

        let root_text = fs::read_to_string(root.join("CMakeLists.txt")).unwrap();
        assert!(!root_text.contains("gone.cpp"));
        let sub_text = fs::read_to_string(sub.join("CMakeLists.txt")).unwrap();
        assert!(sub_text.contains("other.cpp"));
    }
}
