// src/main.rs

use anyhow::Result;
use assembly_filter::cli::Cli;
use assembly_filter::config::ConfigBuilder;
use assembly_filter::errors::Error;
use assembly_filter::run;
use assembly_filter::signal::setup_signal_handler;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging. Default to 'info' if RUST_LOG is not set.
    let default_directive = if cfg!(debug_assertions) {
        "assembly_filter=debug"
    } else {
        "assembly_filter=info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_directive.parse()?))
        .init();

    log::info!("Starting assembly-filter v{}...", env!("CARGO_PKG_VERSION"));
    log::debug!("Raw arguments: {:?}", std::env::args().collect::<Vec<_>>());

    // --- Configuration & Execution ---
    let cli = Cli::parse();
    let config = ConfigBuilder::from_cli(cli).build()?;
    log::debug!("Configuration built successfully.");

    let token = setup_signal_handler()?;

    // --- Error Handling ---
    match run(&config, &token) {
        Ok(summary) => {
            println!(
                "Copied {} file(s) to {} ({} transformed, {} unchanged).",
                summary.copied,
                config.file_set.output.display(),
                summary.transformed,
                summary.unchanged
            );
        }
        Err(Error::Interrupted) => {
            eprintln!("\nOperation cancelled.");
            std::process::exit(130);
        }
        Err(Error::NoFilesFound) => {
            eprintln!("assembly-filter: No files found matching the specified file set.");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
