//! CLI argument parsing using clap.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

#[derive(Parser)]
#[command(name = "cmakesync")]
#[command(about = "Keep CMakeLists.txt source-file lists in sync with the project tree")]
#[command(version)]
#[command(styles = clap_cargo_style())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add source files to their mapped set() blocks
    Add {
        /// Files to add
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Target manifest (skips the nearest-first pick)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Remove source files from their mapped set() blocks
    Remove {
        /// Files to remove
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Target manifest (skips the nearest-first pick)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Add directories to the include_directories() block
    AddIncludeDir {
        /// Directories to add
        #[arg(required = true)]
        dirs: Vec<PathBuf>,

        /// Target manifest (skips the nearest-first pick)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Remove directories from the include_directories() block
    RemoveIncludeDir {
        /// Directories to remove
        #[arg(required = true)]
        dirs: Vec<PathBuf>,

        /// Target manifest (skips the nearest-first pick)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Watch the workspace and offer to prune entries for deleted files
    Watch {
        /// Root to watch (overrides the configured workspace root)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Resolve quoted filenames in a manifest to workspace files
    Refs {
        /// Manifest to scan
        manifest: PathBuf,
    },

    /// Seed .cmakesync/settings.toml with the default configuration
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the effective configuration
    Config,
}
