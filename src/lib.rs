//! Keep CMakeLists.txt source-file lists in sync with the project tree.
//!
//! The interesting part is [`engine`]: locating a `set(NAME ...)` block
//! inside loosely-structured manifest text and editing it idempotently
//! without disturbing anything else. Everything around it — the ancestor
//! walk, the deletion watcher, the reference resolver, the CLI — feeds
//! paths in and reports outcomes back out.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod locator;
pub mod logging;
pub mod mapping;
pub mod refs;
pub mod ui;
pub mod watcher;

pub use config::Settings;
pub use engine::{AddOutcome, EngineOptions, RemoveOutcome};
pub use error::{SyncError, SyncResult};
