//! Deletion watcher for tracked source files.
//!
//! A single notify watcher observes the workspace root. Delete events for
//! managed extensions are coalesced by a trailing-window debouncer into one
//! batch per burst (a directory removal produces many individual deletes
//! but only one prompt), then driven through the engine's batch removal.
//!
//! ```text
//! DeleteWatcher
//!   - notify::RecommendedWatcher (recursive on the workspace root)
//!   - GlobSet filter built from managed_extensions
//!   - BatchDebouncer
//!   - settings hot-reload (filter rebuilt when the extension list changes)
//! ```

mod debouncer;
mod deletions;

pub use debouncer::BatchDebouncer;
pub use deletions::DeleteWatcher;
