// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Dossio.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup and environment
//! variable overrides.
//!
//! # Usage
//!
//! ```no_run
//! let config = dossio_config::load_and_validate().expect("config errors");
//! println!("database: {}", config.storage.path);
//! ```

pub mod loader;
pub mod model;
pub mod validation;

use dossio_core::DossioError;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    DossioConfig, GatewayConfig, NotifyConfig, ServiceConfig, SmtpConfig, StorageConfig,
};

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<DossioConfig, DossioError> {
    let config = loader::load_config().map_err(|e| DossioError::Config(e.to_string()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a specific TOML file and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<DossioConfig, DossioError> {
    let config =
        loader::load_config_from_path(path).map_err(|e| DossioError::Config(e.to_string()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<DossioConfig, DossioError> {
    let config =
        loader::load_config_from_str(toml_content).map_err(|e| DossioError::Config(e.to_string()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = load_and_validate_str("").expect("empty config should be valid");
        assert_eq!(config.service.name, "dossio");
        assert_eq!(config.gateway.port, 8420);
        assert_eq!(config.notify.timeout_secs, 10);
        assert!(!config.smtp.enabled);
    }

    #[test]
    fn sections_override_defaults() {
        let config = load_and_validate_str(
            r#"
            [storage]
            path = "/var/lib/dossio/dossio.db"

            [gateway]
            port = 9000

            [smtp]
            enabled = true
            host = "smtp.example.fr"
            from = "Dossio <no-reply@example.fr>"
            "#,
        )
        .expect("config should be valid");
        assert_eq!(config.storage.path, "/var/lib/dossio/dossio.db");
        assert_eq!(config.gateway.port, 9000);
        assert_eq!(config.smtp.host.as_deref(), Some("smtp.example.fr"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = load_and_validate_str("[service]\nnmae = \"typo\"\n").unwrap_err();
        assert!(err.to_string().contains("nmae"), "{err}");
    }
}
