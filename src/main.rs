use anyhow::Context;
use clap::Parser;
use std::process;

use cmakesync::cli::commands::{include, init, refs, sources, watch};
use cmakesync::cli::{Cli, Commands, ExitCode};
use cmakesync::ui::TerminalPrompt;
use cmakesync::{Settings, logging};

fn main() {
    let cli = Cli::parse();

    // Init runs before settings load: it creates the file settings come from.
    if let Commands::Init { force } = &cli.command {
        process::exit(init::run_init(*force).code());
    }

    match run(cli) {
        Ok(code) => process::exit(code.code()),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(ExitCode::Error.code());
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = Settings::load().context("failed to load settings")?;
    logging::init_with_config(&settings.logging);

    let prompt = TerminalPrompt;
    let code = match cli.command {
        Commands::Add { paths, manifest } => {
            sources::run_add(&paths, manifest, &settings, &prompt)?
        }
        Commands::Remove { paths, manifest } => {
            sources::run_remove(&paths, manifest, &settings, &prompt)?
        }
        Commands::AddIncludeDir { dirs, manifest } => {
            include::run_add_include(&dirs, manifest, &settings, &prompt)?
        }
        Commands::RemoveIncludeDir { dirs, manifest } => {
            include::run_remove_include(&dirs, manifest, &settings, &prompt)?
        }
        Commands::Watch { root } => watch::run_watch(root, &settings, &prompt)?,
        Commands::Refs { manifest } => refs::run_refs(&manifest, &settings)?,
        Commands::Config => init::run_config(&settings),
        Commands::Init { .. } => unreachable!("handled before settings load"),
    };
    Ok(code)
}
