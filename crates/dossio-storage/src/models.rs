// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input structs and row-mapping helpers for storage entities.
//!
//! The canonical domain types live in `dossio-core`; this module holds the
//! "new entity" shapes accepted by the insert queries and the conversions
//! between SQLite's text affinity and the typed domain.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use dossio_core::types::{
    Beneficiaire, Dossier, Entreprise, HistoriqueAction, HistoriqueDetails, HistoriqueEntry,
    Statut, TypeDossier,
};
use rusqlite::types::Type;

/// Fields accepted when creating a dossier via intake.
///
/// Status always starts at `Brouillon`; timestamps are assigned by the
/// insert query.
#[derive(Debug, Clone)]
pub struct NewDossier {
    pub reference: Option<String>,
    pub type_dossier: TypeDossier,
    pub user_id: i64,
    pub entreprise_id: i64,
    pub beneficiaire: Beneficiaire,
    pub montant_estime: Option<f64>,
    pub heures_total: Option<f64>,
    pub date_debut: Option<NaiveDate>,
    pub date_fin: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Fields accepted when caching a company profile from the registry.
#[derive(Debug, Clone)]
pub struct NewEntreprise {
    pub siret: String,
    pub nom: String,
    pub adresse: Option<String>,
    pub code_naf: Option<String>,
    pub opco: Option<String>,
    pub contact_nom: Option<String>,
    pub contact_email: Option<String>,
    pub contact_telephone: Option<String>,
}

/// Fields accepted when appending to the historique.
#[derive(Debug, Clone)]
pub struct NewHistorique {
    pub dossier_id: i64,
    pub user_id: Option<i64>,
    pub action: HistoriqueAction,
    pub details: Option<HistoriqueDetails>,
}

/// The field set persisted atomically by a status transition.
///
/// `statut` and `updated_at` are always written; every other field is
/// written only when `Some`, leaving the stored value untouched otherwise.
#[derive(Debug, Clone)]
pub struct StatutUpdate {
    pub statut: Statut,
    pub updated_at: DateTime<Utc>,
    pub date_soumission: Option<DateTime<Utc>>,
    pub date_validation: Option<DateTime<Utc>>,
    pub valide_par: Option<i64>,
    pub date_reponse_opco: Option<DateTime<Utc>>,
    pub motif_refus: Option<String>,
}

/// Column list matching [`dossier_from_row`]'s positional mapping.
pub(crate) const DOSSIER_COLUMNS: &str = "id, reference, type_dossier, statut, user_id, \
     entreprise_id, beneficiaire_nom, beneficiaire_prenom, beneficiaire_email, \
     beneficiaire_telephone, montant_estime, montant_valide, heures_total, heures_realisees, \
     date_debut, date_fin, notes, motif_refus, date_soumission, date_validation, valide_par, \
     date_reponse_opco, created_at, updated_at";

/// Column list matching [`entreprise_from_row`].
pub(crate) const ENTREPRISE_COLUMNS: &str = "id, siret, nom, adresse, code_naf, opco, \
     contact_nom, contact_email, contact_telephone, created_at";

fn conversion_err(
    idx: usize,
    source: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(source))
}

pub(crate) fn parse_enum<T: FromStr>(idx: usize, s: &str) -> rusqlite::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    T::from_str(s).map_err(|e| conversion_err(idx, e))
}

pub(crate) fn parse_datetime(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| conversion_err(idx, e))
}

pub(crate) fn parse_opt_datetime(
    idx: usize,
    s: Option<String>,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    s.map(|s| parse_datetime(idx, &s)).transpose()
}

pub(crate) fn parse_opt_date(idx: usize, s: Option<String>) -> rusqlite::Result<Option<NaiveDate>> {
    s.map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|e| conversion_err(idx, e)))
        .transpose()
}

/// Map a row selected with [`DOSSIER_COLUMNS`] into a [`Dossier`].
pub(crate) fn dossier_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Dossier> {
    let type_dossier: String = row.get(2)?;
    let statut: String = row.get(3)?;
    Ok(Dossier {
        id: row.get(0)?,
        reference: row.get(1)?,
        type_dossier: parse_enum(2, &type_dossier)?,
        statut: parse_enum(3, &statut)?,
        user_id: row.get(4)?,
        entreprise_id: row.get(5)?,
        beneficiaire: Beneficiaire {
            nom: row.get(6)?,
            prenom: row.get(7)?,
            email: row.get(8)?,
            telephone: row.get(9)?,
        },
        montant_estime: row.get(10)?,
        montant_valide: row.get(11)?,
        heures_total: row.get(12)?,
        heures_realisees: row.get(13)?,
        date_debut: parse_opt_date(14, row.get(14)?)?,
        date_fin: parse_opt_date(15, row.get(15)?)?,
        notes: row.get(16)?,
        motif_refus: row.get(17)?,
        date_soumission: parse_opt_datetime(18, row.get(18)?)?,
        date_validation: parse_opt_datetime(19, row.get(19)?)?,
        valide_par: row.get(20)?,
        date_reponse_opco: parse_opt_datetime(21, row.get(21)?)?,
        created_at: parse_datetime(22, &row.get::<_, String>(22)?)?,
        updated_at: parse_datetime(23, &row.get::<_, String>(23)?)?,
    })
}

/// Map a row selected with [`ENTREPRISE_COLUMNS`] into an [`Entreprise`].
pub(crate) fn entreprise_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Entreprise> {
    Ok(Entreprise {
        id: row.get(0)?,
        siret: row.get(1)?,
        nom: row.get(2)?,
        adresse: row.get(3)?,
        code_naf: row.get(4)?,
        opco: row.get(5)?,
        contact_nom: row.get(6)?,
        contact_email: row.get(7)?,
        contact_telephone: row.get(8)?,
        created_at: parse_datetime(9, &row.get::<_, String>(9)?)?,
    })
}

/// Map a historique row (`id, dossier_id, user_id, action, details,
/// created_at`) into a [`HistoriqueEntry`].
pub(crate) fn historique_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<HistoriqueEntry> {
    let action: String = row.get(3)?;
    let details: Option<String> = row.get(4)?;
    let details = details
        .map(|raw| serde_json::from_str::<HistoriqueDetails>(&raw).map_err(|e| conversion_err(4, e)))
        .transpose()?;
    Ok(HistoriqueEntry {
        id: row.get(0)?,
        dossier_id: row.get(1)?,
        user_id: row.get(2)?,
        action: parse_enum(3, &action)?,
        details,
        created_at: parse_datetime(5, &row.get::<_, String>(5)?)?,
    })
}

/// RFC 3339 text for a stored timestamp.
pub(crate) fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

/// ISO date text for a stored `NaiveDate`.
pub(crate) fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
