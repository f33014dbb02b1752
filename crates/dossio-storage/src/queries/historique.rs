// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only historique (audit) operations.
//!
//! There is deliberately no update or delete here: entries are written
//! once, in commit order, and only ever read back.

use chrono::Utc;
use dossio_core::{DossioError, HistoriqueEntry};
use rusqlite::params;

use crate::database::{map_tr_err, Database};
use crate::models::{fmt_ts, historique_from_row, NewHistorique};

const HISTORIQUE_COLUMNS: &str = "id, dossier_id, user_id, action, details, created_at";

/// Append one audit entry and return the stored record.
pub async fn append_historique(
    db: &Database,
    new: &NewHistorique,
) -> Result<HistoriqueEntry, DossioError> {
    let details_json = new
        .details
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(DossioError::storage)?;
    let new = new.clone();
    let now = fmt_ts(Utc::now());
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO historique (dossier_id, user_id, action, details, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    new.dossier_id,
                    new.user_id,
                    new.action.to_string(),
                    details_json,
                    now,
                ],
            )?;
            let id = conn.last_insert_rowid();
            conn.query_row(
                &format!("SELECT {HISTORIQUE_COLUMNS} FROM historique WHERE id = ?1"),
                params![id],
                historique_from_row,
            )
        })
        .await
        .map_err(map_tr_err)
}

/// All audit entries for a dossier, in commit order.
pub async fn list_historique(
    db: &Database,
    dossier_id: i64,
) -> Result<Vec<HistoriqueEntry>, DossioError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {HISTORIQUE_COLUMNS} FROM historique \
                 WHERE dossier_id = ?1 ORDER BY created_at ASC, id ASC"
            ))?;
            let rows = stmt.query_map(params![dossier_id], historique_from_row)?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use dossio_core::{Beneficiaire, HistoriqueAction, HistoriqueDetails, Statut, TypeDossier};

    use super::*;
    use crate::models::{NewDossier, NewEntreprise};
    use crate::queries::{dossiers, entreprises};

    async fn setup_dossier() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        let entreprise = entreprises::create_entreprise(
            &db,
            &NewEntreprise {
                siret: "73282932000074".into(),
                nom: "Acme Formation".into(),
                adresse: None,
                code_naf: None,
                opco: None,
                contact_nom: None,
                contact_email: None,
                contact_telephone: None,
            },
        )
        .await
        .unwrap();
        let dossier = dossiers::create_dossier(
            &db,
            &NewDossier {
                reference: None,
                type_dossier: TypeDossier::Formation,
                user_id: 1,
                entreprise_id: entreprise.id,
                beneficiaire: Beneficiaire {
                    nom: "Durand".into(),
                    prenom: "Paul".into(),
                    email: "paul.durand@example.fr".into(),
                    telephone: None,
                },
                montant_estime: None,
                heures_total: None,
                date_debut: None,
                date_fin: None,
                notes: None,
            },
        )
        .await
        .unwrap();
        (db, dossier.id)
    }

    #[tokio::test]
    async fn append_and_list_preserves_order_and_details() {
        let (db, dossier_id) = setup_dossier().await;

        append_historique(
            &db,
            &NewHistorique {
                dossier_id,
                user_id: Some(1),
                action: HistoriqueAction::Creation,
                details: None,
            },
        )
        .await
        .unwrap();

        let details = HistoriqueDetails {
            ancien_statut: Some(Statut::Brouillon),
            nouveau_statut: Some(Statut::Soumis),
            commentaire: None,
            document: None,
        };
        append_historique(
            &db,
            &NewHistorique {
                dossier_id,
                user_id: None,
                action: HistoriqueAction::ChangementStatut,
                details: Some(details.clone()),
            },
        )
        .await
        .unwrap();

        let entries = list_historique(&db, dossier_id).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, HistoriqueAction::Creation);
        assert_eq!(entries[1].action, HistoriqueAction::ChangementStatut);
        assert_eq!(entries[1].user_id, None);
        assert_eq!(entries[1].details.as_ref(), Some(&details));
    }

    #[tokio::test]
    async fn empty_dossier_has_no_entries() {
        let (db, dossier_id) = setup_dossier().await;
        assert!(list_historique(&db, dossier_id).await.unwrap().is_empty());
    }
}
