// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation of a loaded configuration.

use dossio_core::DossioError;

use crate::model::DossioConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate cross-field constraints Figment cannot express.
pub fn validate_config(config: &DossioConfig) -> Result<(), DossioError> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        errors.push(format!(
            "service.log_level: '{}' is not one of {LOG_LEVELS:?}",
            config.service.log_level
        ));
    }

    if config.storage.path.trim().is_empty() {
        errors.push("storage.path must not be empty".to_string());
    }

    if config.notify.timeout_secs == 0 {
        errors.push("notify.timeout_secs must be at least 1".to_string());
    }

    if config.smtp.enabled {
        if config.smtp.host.as_deref().unwrap_or("").trim().is_empty() {
            errors.push("smtp.host is required when smtp.enabled = true".to_string());
        }
        if config.smtp.from.as_deref().unwrap_or("").trim().is_empty() {
            errors.push("smtp.from is required when smtp.enabled = true".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DossioError::Config(errors.join("; ")))
    }
}
