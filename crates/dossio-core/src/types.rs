// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Dossio workspace.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Canonical dossier lifecycle status.
///
/// One enum is the single source of truth for the whole workspace; the
/// legacy `nouveau`/`phase1`..`phase3` vocabulary of older subsystems maps
/// onto this lifecycle and is not modeled separately.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Statut {
    /// Draft: the dossier is being assembled by the company user.
    Brouillon,
    /// In progress: intake complete, phases underway.
    EnCours,
    /// Submitted to the OPCO, awaiting a decision.
    Soumis,
    /// Validated by an admin on behalf of the OPCO.
    Valide,
    /// Rejected; carries a mandatory `motif_refus`.
    Refuse,
    /// Completed and invoiced. Terminal: no outbound transitions.
    Termine,
}

impl Statut {
    /// Whether the status has no outbound transitions at all.
    pub fn is_terminal(self) -> bool {
        matches!(self, Statut::Termine)
    }
}

/// Kind of funded action a dossier tracks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TypeDossier {
    /// Bilan de compétences: the regulated 24-hour, three-phase assessment.
    Bilan,
    /// Any other funded training action.
    Formation,
}

impl TypeDossier {
    /// Human label used in emails and rendered documents.
    pub fn label(self) -> &'static str {
        match self {
            TypeDossier::Bilan => "Bilan de Compétences",
            TypeDossier::Formation => "Formation",
        }
    }
}

/// Role of the actor performing an operation, supplied by the identity
/// collaborator. The core never authenticates credentials itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Company-side user; may act only on dossiers it owns.
    Entreprise,
    /// Back-office administrator; may validate/reject on behalf of the OPCO.
    Admin,
}

/// Action recorded in the append-only historique.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HistoriqueAction {
    /// Dossier created via intake.
    Creation,
    /// Status transition committed.
    ChangementStatut,
    /// A document was rendered for this dossier.
    DocumentGenere,
    /// Free-text note appended by a user.
    Note,
}

/// Beneficiary of the funded action. Name and email are required identity
/// fields; the phone number is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beneficiaire {
    pub nom: String,
    pub prenom: String,
    pub email: String,
    #[serde(default)]
    pub telephone: Option<String>,
}

impl Beneficiaire {
    /// "Prénom NOM" as printed on documents and in emails.
    pub fn nom_complet(&self) -> String {
        format!("{} {}", self.prenom, self.nom)
    }
}

/// The case file tracking one beneficiary's funded request end-to-end.
///
/// Status-bearing fields are mutated exclusively through the status
/// workflow; a dossier is never physically deleted except from `Brouillon`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dossier {
    pub id: i64,
    /// Immutable reference code. When absent, derived as `BC-<id>-<year>`.
    #[serde(default)]
    pub reference: Option<String>,
    pub type_dossier: TypeDossier,
    pub statut: Statut,
    /// Owning company-side user.
    pub user_id: i64,
    pub entreprise_id: i64,
    pub beneficiaire: Beneficiaire,
    #[serde(default)]
    pub montant_estime: Option<f64>,
    #[serde(default)]
    pub montant_valide: Option<f64>,
    #[serde(default)]
    pub heures_total: Option<f64>,
    /// Advisory: expected `<= heures_total`, never hard-enforced at write time.
    #[serde(default)]
    pub heures_realisees: Option<f64>,
    #[serde(default)]
    pub date_debut: Option<NaiveDate>,
    #[serde(default)]
    pub date_fin: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Required (non-empty) whenever `statut == Refuse`.
    #[serde(default)]
    pub motif_refus: Option<String>,
    #[serde(default)]
    pub date_soumission: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_validation: Option<DateTime<Utc>>,
    /// Admin who committed the validation.
    #[serde(default)]
    pub valide_par: Option<i64>,
    /// When the OPCO decision (validation or rejection) was recorded.
    #[serde(default)]
    pub date_reponse_opco: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dossier {
    /// Reference code, derived as `BC-<id>-<year>` when the dossier does not
    /// supply one. Callers rendering a document must call this once per
    /// render so the code is stable within a single document.
    pub fn reference_code(&self) -> String {
        match &self.reference {
            Some(r) if !r.trim().is_empty() => r.clone(),
            _ => format!("BC-{}-{}", self.id, Utc::now().year()),
        }
    }
}

/// Company profile, fetched/cached from the external SIRET registry.
/// Read-mostly from the core's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entreprise {
    pub id: i64,
    pub siret: String,
    pub nom: String,
    #[serde(default)]
    pub adresse: Option<String>,
    #[serde(default)]
    pub code_naf: Option<String>,
    /// Funding body detected from the NAF code.
    #[serde(default)]
    pub opco: Option<String>,
    #[serde(default)]
    pub contact_nom: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_telephone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Structured detail payload attached to a historique entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoriqueDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ancien_statut: Option<Statut>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nouveau_statut: Option<Statut>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentaire: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

/// Append-only audit record. Never mutated or deleted; one entry per
/// meaningful action on a dossier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoriqueEntry {
    pub id: i64,
    pub dossier_id: i64,
    /// `None` for system-generated entries.
    pub user_id: Option<i64>,
    pub action: HistoriqueAction,
    #[serde(default)]
    pub details: Option<HistoriqueDetails>,
    pub created_at: DateTime<Utc>,
}
