// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Enum-indexed email templates.
//!
//! The status→template mapping is a total function over the status enum, so
//! an unknown template is impossible by construction. Rendering is pure:
//! payload in, subject and HTML out.

use dossio_core::format::format_eur;
use dossio_core::{OutboundEmail, Statut};

use crate::payload::NotificationPayload;

/// The three emails the lifecycle can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    /// Sent when the dossier reaches `Soumis`.
    DossierEnvoyeOpco,
    /// Sent when an admin validates the dossier.
    DossierValide,
    /// Sent when the OPCO rejects the dossier; carries the motif.
    DossierRefuse,
}

impl EmailTemplate {
    /// Template triggered by entering `statut`, if any.
    pub fn for_statut(statut: Statut) -> Option<Self> {
        match statut {
            Statut::Soumis => Some(EmailTemplate::DossierEnvoyeOpco),
            Statut::Valide => Some(EmailTemplate::DossierValide),
            Statut::Refuse => Some(EmailTemplate::DossierRefuse),
            Statut::Brouillon | Statut::EnCours | Statut::Termine => None,
        }
    }

    /// Stable identifier recorded in outcomes and logs.
    pub fn name(self) -> &'static str {
        match self {
            EmailTemplate::DossierEnvoyeOpco => "dossier-sent-to-opco",
            EmailTemplate::DossierValide => "dossier-validated",
            EmailTemplate::DossierRefuse => "dossier-rejected",
        }
    }

    /// Render the full outbound message for `payload`.
    pub fn render(self, payload: &NotificationPayload) -> OutboundEmail {
        let (subject, body) = match self {
            EmailTemplate::DossierEnvoyeOpco => (
                format!(
                    "Votre dossier {} a été transmis à votre OPCO",
                    payload.reference
                ),
                format!(
                    "<p>Bonjour {},</p>\
                     <p>Votre dossier <strong>{}</strong> (réf. {}) a été transmis à {} \
                     pour instruction.</p>\
                     {}\
                     <p>Vous serez informé(e) dès que l'OPCO aura rendu sa décision.</p>",
                    payload.beneficiaire,
                    payload.type_label,
                    payload.reference,
                    payload.opco_label(),
                    montant_line(payload, "Montant estimé de la prise en charge"),
                ),
            ),
            EmailTemplate::DossierValide => (
                format!("Votre dossier {} a été validé", payload.reference),
                format!(
                    "<p>Bonjour {},</p>\
                     <p>Bonne nouvelle : votre dossier <strong>{}</strong> (réf. {}) a été \
                     validé par {}.</p>\
                     {}\
                     <p>Votre conseiller vous contactera pour planifier les prochaines \
                     séances.</p>",
                    payload.beneficiaire,
                    payload.type_label,
                    payload.reference,
                    payload.opco_label(),
                    montant_line(payload, "Montant pris en charge"),
                ),
            ),
            EmailTemplate::DossierRefuse => (
                format!("Votre dossier {} n'a pas été accepté", payload.reference),
                format!(
                    "<p>Bonjour {},</p>\
                     <p>Votre dossier <strong>{}</strong> (réf. {}) n'a pas été accepté \
                     par {}.</p>\
                     <p>Motif : {}</p>\
                     <p>Vous pouvez compléter votre dossier et le soumettre à nouveau.</p>",
                    payload.beneficiaire,
                    payload.type_label,
                    payload.reference,
                    payload.opco_label(),
                    payload.motif.as_deref().unwrap_or("Non spécifié"),
                ),
            ),
        };

        OutboundEmail {
            to: payload.to.clone(),
            subject,
            html: format!("<html><body>{body}</body></html>"),
        }
    }
}

fn montant_line(payload: &NotificationPayload, label: &str) -> String {
    match payload.montant {
        Some(m) => format!("<p>{label} : {}</p>", format_eur(m)),
        None => String::new(),
    }
}
