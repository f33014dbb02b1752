// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document generation for Dossio dossiers.
//!
//! Renders the five regulator-mandated document kinds as A4 PDFs from
//! dossier/company/beneficiary data. Each kind has a pure builder producing
//! layout instructions ([`layout::Block`]); the [`render`] module turns
//! them into PDF bytes. Rendering is deterministic for a given input — the
//! "generated on" footer is the one intentional exception.
//!
//! Missing optional data renders as an explicit placeholder, never blank
//! and never an error; only missing required identity fields (beneficiary
//! name/email, company SIRET/name) fail, with [`DossioError::Render`].

pub mod certificat;
pub mod convention;
pub mod emargement;
pub mod facture;
pub mod layout;
pub mod prise_en_charge;
pub mod render;

use chrono::NaiveDate;
use dossio_core::{Dossier, DossioError, Entreprise};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub use layout::{visible_text, Block, SignatureBox};

/// Name under which the platform operator appears as training provider on
/// funding requests and invoices.
pub const PRESTATAIRE_NOM: &str = "Dossio Conseil & Formation";

/// The five supported document kinds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Tripartite convention (employer / beneficiary / OPCO).
    Convention,
    /// Completion certificate with realized decimal hours.
    Certificat,
    /// Per-session attendance sheet.
    Emargement,
    /// OPCO funding request with VAT cost breakdown.
    PriseEnCharge,
    /// Invoice.
    Facture,
}

impl DocumentKind {
    /// Human title printed on the document and used in audit entries.
    pub fn titre(self) -> &'static str {
        match self {
            DocumentKind::Convention => "Convention tripartite",
            DocumentKind::Certificat => "Certificat de réalisation",
            DocumentKind::Emargement => "Feuille d'émargement",
            DocumentKind::PriseEnCharge => "Demande de prise en charge",
            DocumentKind::Facture => "Facture",
        }
    }
}

/// One scheduled session, for the attendance sheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seance {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Start time as entered ("09:00"); free text, not validated.
    #[serde(default)]
    pub heure_debut: Option<String>,
    #[serde(default)]
    pub heure_fin: Option<String>,
    #[serde(default)]
    pub lieu: Option<String>,
}

/// Structured input for one render call.
#[derive(Debug, Clone)]
pub struct DocumentInput<'a> {
    pub dossier: &'a Dossier,
    pub entreprise: &'a Entreprise,
    /// Session detail, attendance sheet only.
    pub seance: Option<Seance>,
    /// Explicit amount override; falls back to the dossier's validated then
    /// estimated amount.
    pub montant: Option<f64>,
    /// Invoice number; derived from the reference when absent.
    pub numero_facture: Option<String>,
}

impl DocumentInput<'_> {
    /// The amount a financial document is based on, if any is known.
    pub(crate) fn montant_retenu(&self) -> Option<f64> {
        self.montant
            .or(self.dossier.montant_valide)
            .or(self.dossier.montant_estime)
    }
}

/// Result of a successful render.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
}

/// Render one document kind to PDF bytes.
///
/// The reference code is computed once here and threaded through the
/// builder so it is stable within a single document.
pub fn generate(
    kind: DocumentKind,
    input: &DocumentInput<'_>,
) -> Result<GeneratedDocument, DossioError> {
    check_identity(input)?;
    let reference = input.dossier.reference_code();
    let blocks = build_blocks(kind, input, &reference);
    let pdf = render::render_pdf(&format!("{} {reference}", kind.titre()), &blocks)?;
    tracing::debug!(kind = %kind, reference = %reference, bytes = pdf.len(), "document rendered");
    Ok(GeneratedDocument {
        filename: format!("{kind}_{reference}.pdf"),
        pdf,
    })
}

/// Build the layout instructions for a document without rendering them.
///
/// Exposed so content can be asserted in tests without a PDF engine.
pub fn build_blocks(kind: DocumentKind, input: &DocumentInput<'_>, reference: &str) -> Vec<Block> {
    match kind {
        DocumentKind::Convention => convention::build(input, reference),
        DocumentKind::Certificat => certificat::build(input, reference),
        DocumentKind::Emargement => emargement::build(input, reference),
        DocumentKind::PriseEnCharge => prise_en_charge::build(input, reference),
        DocumentKind::Facture => facture::build(input, reference),
    }
}

/// Required identity fields: everything else is placeholder-filled.
fn check_identity(input: &DocumentInput<'_>) -> Result<(), DossioError> {
    let mut missing = Vec::new();
    if input.dossier.id <= 0 {
        missing.push("dossier.id");
    }
    if input.dossier.beneficiaire.nom.trim().is_empty() {
        missing.push("beneficiaire.nom");
    }
    if input.dossier.beneficiaire.email.trim().is_empty() {
        missing.push("beneficiaire.email");
    }
    if input.entreprise.siret.trim().is_empty() {
        missing.push("entreprise.siret");
    }
    if input.entreprise.nom.trim().is_empty() {
        missing.push("entreprise.nom");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DossioError::Render(format!(
            "champs d'identité requis manquants: {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Utc;
    use dossio_core::{Beneficiaire, Dossier, Entreprise, Statut, TypeDossier};

    /// Dossier with every optional field absent.
    pub fn dossier_minimal() -> Dossier {
        Dossier {
            id: 12,
            reference: None,
            type_dossier: TypeDossier::Bilan,
            statut: Statut::EnCours,
            user_id: 1,
            entreprise_id: 1,
            beneficiaire: Beneficiaire {
                nom: "Durand".into(),
                prenom: "Paul".into(),
                email: "paul.durand@example.fr".into(),
                telephone: None,
            },
            montant_estime: None,
            montant_valide: None,
            heures_total: None,
            heures_realisees: None,
            date_debut: None,
            date_fin: None,
            notes: None,
            motif_refus: None,
            date_soumission: None,
            date_validation: None,
            valide_par: None,
            date_reponse_opco: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Entreprise with only the required identity fields.
    pub fn entreprise_minimal() -> Entreprise {
        Entreprise {
            id: 3,
            siret: "73282932000074".into(),
            nom: "Acme Industries".into(),
            adresse: None,
            code_naf: None,
            opco: None,
            contact_nom: None,
            contact_email: None,
            contact_telephone: None,
            created_at: Utc::now(),
        }
    }
}
