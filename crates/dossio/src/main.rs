// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dossio — OPCO training-dossier management server.
//!
//! Binary entry point: loads and validates configuration, then runs the
//! selected subcommand.

use clap::{Parser, Subcommand};

mod serve;

/// Dossio — OPCO training-dossier management server.
#[derive(Parser, Debug)]
#[command(name = "dossio", version, about, long_about = None)]
struct Cli {
    /// Path to a specific config file (defaults to the XDG hierarchy).
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server.
    Serve,
    /// Create or migrate the database, then exit.
    InitDb,
    /// Load and validate the configuration, then exit.
    CheckConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("dossio: {err}");
            std::process::exit(1);
        }
    };

    serve::init_tracing(&config.service.log_level);

    let result = match cli.command {
        Commands::Serve => serve::run_serve(config).await,
        Commands::InitDb => serve::run_init_db(&config).await.map(|()| {
            println!("base de données prête: {}", config.storage.path);
        }),
        Commands::CheckConfig => {
            println!("configuration valide (service.name={})", config.service.name);
            Ok(())
        }
    };

    if let Err(err) = result {
        tracing::error!(%err, "command failed");
        eprintln!("dossio: {err}");
        std::process::exit(1);
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<dossio_config::DossioConfig, dossio_core::DossioError> {
    match path {
        Some(path) => dossio_config::load_and_validate_path(path),
        None => dossio_config::load_and_validate(),
    }
}
