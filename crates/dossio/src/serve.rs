// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dossio serve` command implementation.
//!
//! Wires storage, the mail transport, the workflow service and the HTTP
//! gateway together. Storage is opened and migrated here, once, before any
//! request can reach it; the service receives a ready handle.

use std::sync::Arc;
use std::time::Duration;

use dossio_config::DossioConfig;
use dossio_core::{DossioError, MailSender};
use dossio_gateway::{GatewayState, ServerConfig};
use dossio_notify::{Dispatcher, NoopMailer, SmtpMailer};
use dossio_storage::Database;
use dossio_workflow::StatusService;
use tracing::{info, warn};

/// Run the HTTP server until the process is stopped.
pub async fn run_serve(config: DossioConfig) -> Result<(), DossioError> {
    info!(service = %config.service.name, "starting dossio serve");

    let db = open_database(&config).await?;

    let mailer: Arc<dyn MailSender> = if config.smtp.enabled {
        Arc::new(SmtpMailer::from_config(&config.smtp)?)
    } else {
        warn!("SMTP disabled -- notifications will report sent=false");
        Arc::new(NoopMailer)
    };
    let dispatcher = Dispatcher::new(mailer, Duration::from_secs(config.notify.timeout_secs));

    let service = StatusService::new(db, dispatcher);
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    dossio_gateway::start_server(&server_config, GatewayState { service }).await
}

/// `dossio init-db`: create the database file and apply migrations.
pub async fn run_init_db(config: &DossioConfig) -> Result<(), DossioError> {
    let db = open_database(config).await?;
    db.close().await?;
    Ok(())
}

async fn open_database(config: &DossioConfig) -> Result<Database, DossioError> {
    let db = Database::open(&config.storage.path).await?;
    db.migrate().await?;
    info!(path = %config.storage.path, "database ready");
    Ok(db)
}

/// Install the tracing subscriber, honoring `RUST_LOG` over the configured
/// level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dossio={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn init_db_creates_a_migrated_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dossio.db");
        let config = dossio_config::load_and_validate_str(&format!(
            "[storage]\npath = \"{}\"",
            path.display()
        ))
        .unwrap();

        run_init_db(&config).await.unwrap();
        assert!(path.exists());

        // Re-running migrations on an existing file is a no-op.
        run_init_db(&config).await.unwrap();
    }
}
