//! Init and Config commands.

use crate::cli::ExitCode;
use crate::config::Settings;

/// Create the workspace configuration file.
pub fn run_init(force: bool) -> ExitCode {
    match Settings::init_config_file(force) {
        Ok(path) => {
            println!("Created configuration file at: {}", path.display());
            println!("Edit this file to customize the extension mapping.");
            ExitCode::Success
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            eprintln!("{e}");
            eprintln!("Use --force to overwrite");
            ExitCode::Error
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::Error
        }
    }
}

/// Display the effective configuration.
pub fn run_config(settings: &Settings) -> ExitCode {
    println!("Current Configuration:");
    println!("{}", "=".repeat(50));
    match toml::to_string_pretty(settings) {
        Ok(toml_str) => {
            println!("{toml_str}");
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("Error displaying config: {e}");
            ExitCode::Error
        }
    }
}
