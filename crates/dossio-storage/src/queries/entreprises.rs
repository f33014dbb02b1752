// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entreprise (company profile) operations.
//!
//! Profiles are cached from the external SIRET registry and read-mostly
//! afterwards; there is no update path in the core.

use chrono::Utc;
use dossio_core::{DossioError, Entreprise};
use rusqlite::params;

use crate::database::{map_tr_err, Database};
use crate::models::{entreprise_from_row, fmt_ts, NewEntreprise, ENTREPRISE_COLUMNS};

/// Cache a company profile and return the stored snapshot.
pub async fn create_entreprise(
    db: &Database,
    new: &NewEntreprise,
) -> Result<Entreprise, DossioError> {
    let new = new.clone();
    let now = fmt_ts(Utc::now());
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO entreprises (siret, nom, adresse, code_naf, opco, contact_nom, \
                 contact_email, contact_telephone, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    new.siret,
                    new.nom,
                    new.adresse,
                    new.code_naf,
                    new.opco,
                    new.contact_nom,
                    new.contact_email,
                    new.contact_telephone,
                    now,
                ],
            )?;
            let id = conn.last_insert_rowid();
            conn.query_row(
                &format!("SELECT {ENTREPRISE_COLUMNS} FROM entreprises WHERE id = ?1"),
                params![id],
                entreprise_from_row,
            )
        })
        .await
        .map_err(map_tr_err)
}

/// Get a company profile by id.
pub async fn get_entreprise(db: &Database, id: i64) -> Result<Option<Entreprise>, DossioError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                &format!("SELECT {ENTREPRISE_COLUMNS} FROM entreprises WHERE id = ?1"),
                params![id],
                entreprise_from_row,
            );
            match result {
                Ok(entreprise) => Ok(Some(entreprise)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_and_get_round_trip() {
        let db = Database::open_in_memory().await.unwrap();
        db.migrate().await.unwrap();

        let created = create_entreprise(
            &db,
            &NewEntreprise {
                siret: "35600000000048".into(),
                nom: "La Poste".into(),
                adresse: None,
                code_naf: Some("5310Z".into()),
                opco: Some("AFDAS".into()),
                contact_nom: None,
                contact_email: None,
                contact_telephone: None,
            },
        )
        .await
        .unwrap();

        let fetched = get_entreprise(&db, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.siret, "35600000000048");
        assert_eq!(fetched.opco.as_deref(), Some("AFDAS"));
        assert!(get_entreprise(&db, 999).await.unwrap().is_none());
    }
}
