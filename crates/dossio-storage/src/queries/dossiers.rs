// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dossier CRUD operations.
//!
//! Status-bearing fields are only ever written through
//! [`update_statut_fields`], which the status workflow drives; intake and
//! draft deletion are the only other writes.

use chrono::Utc;
use dossio_core::{DossioError, Statut};
use rusqlite::params;

use crate::database::{map_tr_err, Database};
use crate::models::{
    dossier_from_row, fmt_date, fmt_ts, NewDossier, StatutUpdate, DOSSIER_COLUMNS,
};
use dossio_core::Dossier;

/// Create a dossier in `Brouillon` status and return the stored snapshot.
pub async fn create_dossier(db: &Database, new: &NewDossier) -> Result<Dossier, DossioError> {
    let new = new.clone();
    let now = fmt_ts(Utc::now());
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO dossiers (reference, type_dossier, statut, user_id, entreprise_id, \
                 beneficiaire_nom, beneficiaire_prenom, beneficiaire_email, \
                 beneficiaire_telephone, montant_estime, heures_total, date_debut, date_fin, \
                 notes, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                params![
                    new.reference,
                    new.type_dossier.to_string(),
                    Statut::Brouillon.to_string(),
                    new.user_id,
                    new.entreprise_id,
                    new.beneficiaire.nom,
                    new.beneficiaire.prenom,
                    new.beneficiaire.email,
                    new.beneficiaire.telephone,
                    new.montant_estime,
                    new.heures_total,
                    new.date_debut.map(fmt_date),
                    new.date_fin.map(fmt_date),
                    new.notes,
                    now,
                    now,
                ],
            )?;
            let id = conn.last_insert_rowid();
            conn.query_row(
                &format!("SELECT {DOSSIER_COLUMNS} FROM dossiers WHERE id = ?1"),
                params![id],
                dossier_from_row,
            )
        })
        .await
        .map_err(map_tr_err)
}

/// Get a dossier by id.
pub async fn get_dossier(db: &Database, id: i64) -> Result<Option<Dossier>, DossioError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                &format!("SELECT {DOSSIER_COLUMNS} FROM dossiers WHERE id = ?1"),
                params![id],
                dossier_from_row,
            );
            match result {
                Ok(dossier) => Ok(Some(dossier)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// List all dossiers, most recent first.
pub async fn list_dossiers(db: &Database) -> Result<Vec<Dossier>, DossioError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {DOSSIER_COLUMNS} FROM dossiers ORDER BY created_at DESC, id DESC"
            ))?;
            let rows = stmt.query_map([], dossier_from_row)?;
            let mut dossiers = Vec::new();
            for row in rows {
                dossiers.push(row?);
            }
            Ok(dossiers)
        })
        .await
        .map_err(map_tr_err)
}

/// Persist the field set computed for one status transition, atomically.
///
/// The `WHERE statut = expected` guard serializes concurrent transitions on
/// the same dossier: whichever commits first wins, the loser sees `None`
/// and must re-decide against fresh state. Optional fields use COALESCE so
/// an absent value leaves the stored one untouched.
pub async fn update_statut_fields(
    db: &Database,
    id: i64,
    expected: Statut,
    update: StatutUpdate,
) -> Result<Option<Dossier>, DossioError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE dossiers SET \
                   statut = ?1, \
                   updated_at = ?2, \
                   date_soumission = COALESCE(?3, date_soumission), \
                   date_validation = COALESCE(?4, date_validation), \
                   valide_par = COALESCE(?5, valide_par), \
                   date_reponse_opco = COALESCE(?6, date_reponse_opco), \
                   motif_refus = COALESCE(?7, motif_refus) \
                 WHERE id = ?8 AND statut = ?9",
                params![
                    update.statut.to_string(),
                    fmt_ts(update.updated_at),
                    update.date_soumission.map(fmt_ts),
                    update.date_validation.map(fmt_ts),
                    update.valide_par,
                    update.date_reponse_opco.map(fmt_ts),
                    update.motif_refus,
                    id,
                    expected.to_string(),
                ],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            conn.query_row(
                &format!("SELECT {DOSSIER_COLUMNS} FROM dossiers WHERE id = ?1"),
                params![id],
                dossier_from_row,
            )
            .map(Some)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a dossier, drafts only. Returns whether a row was deleted.
///
/// The `statut = 'brouillon'` guard is the schema-side enforcement of the
/// "never physically deleted except from draft" rule.
pub async fn delete_brouillon(db: &Database, id: i64) -> Result<bool, DossioError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "DELETE FROM dossiers WHERE id = ?1 AND statut = ?2",
                params![id, Statut::Brouillon.to_string()],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use dossio_core::{Beneficiaire, TypeDossier};

    use super::*;
    use crate::queries::entreprises;
    use crate::models::NewEntreprise;

    async fn setup_db() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        let entreprise = entreprises::create_entreprise(
            &db,
            &NewEntreprise {
                siret: "73282932000074".into(),
                nom: "Acme Formation".into(),
                adresse: Some("1 rue de la Paix, 75002 Paris".into()),
                code_naf: Some("8559A".into()),
                opco: Some("OPCO EP".into()),
                contact_nom: None,
                contact_email: Some("contact@acme-formation.fr".into()),
                contact_telephone: None,
            },
        )
        .await
        .unwrap();
        (db, entreprise.id)
    }

    fn new_dossier(entreprise_id: i64) -> NewDossier {
        NewDossier {
            reference: None,
            type_dossier: TypeDossier::Bilan,
            user_id: 10,
            entreprise_id,
            beneficiaire: Beneficiaire {
                nom: "Durand".into(),
                prenom: "Paul".into(),
                email: "paul.durand@example.fr".into(),
                telephone: None,
            },
            montant_estime: Some(2000.0),
            heures_total: Some(24.0),
            date_debut: None,
            date_fin: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_and_get_round_trip() {
        let (db, entreprise_id) = setup_db().await;
        let created = create_dossier(&db, &new_dossier(entreprise_id)).await.unwrap();
        assert_eq!(created.statut, Statut::Brouillon);
        assert_eq!(created.beneficiaire.nom, "Durand");

        let fetched = get_dossier(&db, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.montant_estime, Some(2000.0));
        assert_eq!(fetched.type_dossier, TypeDossier::Bilan);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let (db, _) = setup_db().await;
        assert!(get_dossier(&db, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_guards_on_expected_statut() {
        let (db, entreprise_id) = setup_db().await;
        let dossier = create_dossier(&db, &new_dossier(entreprise_id)).await.unwrap();

        let update = StatutUpdate {
            statut: Statut::EnCours,
            updated_at: Utc::now(),
            date_soumission: None,
            date_validation: None,
            valide_par: None,
            date_reponse_opco: None,
            motif_refus: None,
        };
        let updated = update_statut_fields(&db, dossier.id, Statut::Brouillon, update.clone())
            .await
            .unwrap();
        assert_eq!(updated.unwrap().statut, Statut::EnCours);

        // Second transition from the stale source status must not commit.
        let stale = update_statut_fields(&db, dossier.id, Statut::Brouillon, update)
            .await
            .unwrap();
        assert!(stale.is_none());
    }

    #[tokio::test]
    async fn update_preserves_untouched_fields() {
        let (db, entreprise_id) = setup_db().await;
        let dossier = create_dossier(&db, &new_dossier(entreprise_id)).await.unwrap();

        let soumission = Utc::now();
        let updated = update_statut_fields(
            &db,
            dossier.id,
            Statut::Brouillon,
            StatutUpdate {
                statut: Statut::Soumis,
                updated_at: soumission,
                date_soumission: Some(soumission),
                date_validation: None,
                valide_par: None,
                date_reponse_opco: None,
                motif_refus: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert!(updated.date_soumission.is_some());
        assert!(updated.date_validation.is_none());
        assert_eq!(updated.montant_estime, Some(2000.0));
    }

    #[tokio::test]
    async fn delete_only_removes_drafts() {
        let (db, entreprise_id) = setup_db().await;
        let dossier = create_dossier(&db, &new_dossier(entreprise_id)).await.unwrap();

        update_statut_fields(
            &db,
            dossier.id,
            Statut::Brouillon,
            StatutUpdate {
                statut: Statut::EnCours,
                updated_at: Utc::now(),
                date_soumission: None,
                date_validation: None,
                valide_par: None,
                date_reponse_opco: None,
                motif_refus: None,
            },
        )
        .await
        .unwrap();

        assert!(!delete_brouillon(&db, dossier.id).await.unwrap());
        assert!(get_dossier(&db, dossier.id).await.unwrap().is_some());
    }
}
