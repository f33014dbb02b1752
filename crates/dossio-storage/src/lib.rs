// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for Dossio.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and typed query
//! modules for dossiers, entreprises and the append-only historique.
//!
//! The host opens and migrates the database once at startup
//! ([`Database::open`] + [`Database::migrate`]) and passes the ready handle
//! down; no query lazily initializes anything.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use database::Database;
pub use models::{NewDossier, NewEntreprise, NewHistorique, StatutUpdate};
