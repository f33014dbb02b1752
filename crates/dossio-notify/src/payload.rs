// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data pulled out of a dossier for template rendering.

use dossio_core::{Dossier, Entreprise};

/// Everything a template may interpolate, extracted once so rendering is a
/// pure function of this struct.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPayload {
    /// Recipient mailbox (the beneficiary).
    pub to: String,
    /// "Prénom NOM".
    pub beneficiaire: String,
    pub reference: String,
    /// Localized action label ("Bilan de Compétences" / "Formation").
    pub type_label: String,
    /// Validated amount when the OPCO has committed one, estimated otherwise.
    pub montant: Option<f64>,
    pub opco: Option<String>,
    /// Rejection reason; templates substitute "Non spécifié" when empty.
    pub motif: Option<String>,
}

impl NotificationPayload {
    pub fn from_dossier(dossier: &Dossier, entreprise: &Entreprise) -> Self {
        Self {
            to: dossier.beneficiaire.email.clone(),
            beneficiaire: dossier.beneficiaire.nom_complet(),
            reference: dossier.reference_code(),
            type_label: dossier.type_dossier.label().to_string(),
            montant: dossier.montant_valide.or(dossier.montant_estime),
            opco: entreprise.opco.clone(),
            motif: dossier
                .motif_refus
                .clone()
                .filter(|m| !m.trim().is_empty()),
        }
    }

    /// OPCO display name, with a generic fallback when detection failed.
    pub fn opco_label(&self) -> &str {
        self.opco.as_deref().unwrap_or("votre OPCO")
    }
}
