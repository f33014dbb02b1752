// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attendance sheet builder: one sheet per session.

use dossio_core::format::{format_date, or_placeholder, A_DEFINIR, NON_RENSEIGNE};

use crate::layout::{kv, Block, SignatureBox};
use crate::{DocumentInput, Seance};

pub fn build(input: &DocumentInput<'_>, reference: &str) -> Vec<Block> {
    let dossier = input.dossier;
    let entreprise = input.entreprise;
    let seance = input.seance.clone().unwrap_or_default();

    vec![
        Block::Title("FEUILLE D'ÉMARGEMENT".into()),
        Block::Paragraph(format!("Référence du dossier : {reference}")),
        Block::Spacer(4.0),
        kv("Bénéficiaire", dossier.beneficiaire.nom_complet()),
        kv("Entreprise", &entreprise.nom),
        kv("Type d'action", dossier.type_dossier.label()),
        kv("Date de la séance", seance_date(&seance)),
        kv(
            "Lieu",
            or_placeholder(seance.lieu.as_deref(), NON_RENSEIGNE),
        ),
        Block::Spacer(4.0),
        Block::Heading("Horaires de la séance".into()),
        Block::Table {
            headers: vec!["".into(), "Horaire".into()],
            rows: vec![
                vec![
                    "Heure de début".into(),
                    or_placeholder(seance.heure_debut.as_deref(), A_DEFINIR),
                ],
                vec![
                    "Heure de fin".into(),
                    or_placeholder(seance.heure_fin.as_deref(), A_DEFINIR),
                ],
            ],
        },
        Block::Spacer(4.0),
        Block::Heading("Observations".into()),
        Block::Paragraph(or_placeholder(dossier.notes.as_deref(), NON_RENSEIGNE)),
        Block::PageBreak,
        Block::SignatureRow(vec![
            SignatureBox::new("Le bénéficiaire", dossier.beneficiaire.nom_complet()),
            SignatureBox::new("Le consultant", A_DEFINIR),
        ]),
    ]
}

fn seance_date(seance: &Seance) -> String {
    seance
        .date
        .map(format_date)
        .unwrap_or_else(|| A_DEFINIR.to_string())
}
