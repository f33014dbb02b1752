// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion certificate builder.
//!
//! Realized hours are stated in DECIMAL hours: a stored value of 1.5 means
//! one hour and thirty minutes, not one hour five minutes. The certificate
//! spells this convention out so no reader reinterprets the figure.

use dossio_core::format::{date_or_a_definir, format_heures, NON_RENSEIGNE};
use dossio_core::TypeDossier;

use crate::layout::{kv, Block, SignatureBox};
use crate::{DocumentInput, PRESTATAIRE_NOM};

pub fn build(input: &DocumentInput<'_>, reference: &str) -> Vec<Block> {
    let dossier = input.dossier;
    let entreprise = input.entreprise;

    let heures = dossier
        .heures_realisees
        .map(format_heures)
        .unwrap_or_else(|| NON_RENSEIGNE.to_string());

    vec![
        Block::Title("CERTIFICAT DE RÉALISATION".into()),
        Block::Paragraph(format!("Référence du dossier : {reference}")),
        Block::Spacer(4.0),
        Block::Paragraph(format!(
            "Je soussigné(e), représentant légal de l'organisme {PRESTATAIRE_NOM}, atteste la \
             réalisation de l'action suivante :"
        )),
        Block::Heading("Nature de l'action".into()),
        Block::CheckboxLine {
            checked: dossier.type_dossier == TypeDossier::Formation,
            label: "Action de formation".into(),
        },
        Block::CheckboxLine {
            checked: dossier.type_dossier == TypeDossier::Bilan,
            label: "Bilan de compétences".into(),
        },
        Block::CheckboxLine {
            checked: false,
            label: "Action de validation des acquis de l'expérience".into(),
        },
        Block::Heading("Bénéficiaire".into()),
        kv("Nom et prénom", dossier.beneficiaire.nom_complet()),
        kv("Email", &dossier.beneficiaire.email),
        Block::Heading("Employeur".into()),
        kv("Raison sociale", &entreprise.nom),
        kv("SIRET", &entreprise.siret),
        Block::Heading("Réalisation".into()),
        kv("Date de début", date_or_a_definir(dossier.date_debut)),
        kv("Date de fin", date_or_a_definir(dossier.date_fin)),
        kv("Heures réalisées", heures),
        Block::Paragraph(
            "Les durées sont exprimées en heures décimales : une valeur de 1,50 h correspond à \
             1 heure et 30 minutes."
                .into(),
        ),
        Block::PageBreak,
        Block::Spacer(6.0),
        Block::SignatureRow(vec![SignatureBox::avec_cachet(
            "Pour l'organisme",
            PRESTATAIRE_NOM,
        )]),
    ]
}
