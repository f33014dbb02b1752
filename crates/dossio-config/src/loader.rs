// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./dossio.toml` > `~/.config/dossio/dossio.toml`
//! > `/etc/dossio/dossio.toml` with environment variable overrides via the
//! `DOSSIO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::DossioConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/dossio/dossio.toml` (system-wide)
/// 3. `~/.config/dossio/dossio.toml` (user XDG config)
/// 4. `./dossio.toml` (local directory)
/// 5. `DOSSIO_*` environment variables
pub fn load_config() -> Result<DossioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DossioConfig::default()))
        .merge(Toml::file("/etc/dossio/dossio.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("dossio/dossio.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("dossio.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<DossioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DossioConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DossioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DossioConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `DOSSIO_SERVICE_LOG_LEVEL` must map to
/// `service.log_level`, not `service.log.level`.
fn env_provider() -> Env {
    Env::prefixed("DOSSIO_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let mapped = key
            .as_str()
            .replacen("service_", "service.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("smtp_", "smtp.", 1)
            .replacen("notify_", "notify.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}
