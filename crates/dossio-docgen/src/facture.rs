// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Invoice builder: provider/client blocks, a one-line-item table and the
//! same 20 % VAT totals as the funding request.

use chrono::Utc;
use dossio_core::format::{
    format_date, format_eur, or_placeholder, ttc_from_ht, tva_from_ht, A_DETERMINER,
    NON_RENSEIGNE,
};

use crate::layout::{kv, Block};
use crate::{DocumentInput, PRESTATAIRE_NOM};

pub fn build(input: &DocumentInput<'_>, reference: &str) -> Vec<Block> {
    let dossier = input.dossier;
    let entreprise = input.entreprise;

    let numero = input
        .numero_facture
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("F-{reference}"));

    let montant = input.montant_retenu();
    let ht = montant.map(format_eur).unwrap_or_else(|| A_DETERMINER.to_string());
    let tva = montant
        .map(|m| format_eur(tva_from_ht(m)))
        .unwrap_or_else(|| A_DETERMINER.to_string());
    let ttc = montant
        .map(|m| format_eur(ttc_from_ht(m)))
        .unwrap_or_else(|| A_DETERMINER.to_string());

    vec![
        Block::Title(format!("FACTURE N° {numero}")),
        kv("Date d'émission", format_date(Utc::now().date_naive())),
        kv("Référence du dossier", reference),
        Block::Spacer(4.0),
        Block::Heading("Émetteur".into()),
        kv("Organisme", PRESTATAIRE_NOM),
        Block::Heading("Client".into()),
        kv("Raison sociale", &entreprise.nom),
        kv("SIRET", &entreprise.siret),
        kv(
            "Adresse",
            or_placeholder(entreprise.adresse.as_deref(), NON_RENSEIGNE),
        ),
        Block::Spacer(4.0),
        Block::Heading("Détail".into()),
        Block::Table {
            headers: vec![
                "Désignation".into(),
                "Quantité".into(),
                "Prix unitaire HT".into(),
                "Total HT".into(),
            ],
            rows: vec![vec![
                format!(
                    "{} — {} ({})",
                    dossier.type_dossier.label(),
                    dossier.beneficiaire.nom_complet(),
                    reference,
                ),
                "1".into(),
                ht.clone(),
                ht.clone(),
            ]],
        },
        Block::Spacer(4.0),
        kv("Total HT", ht),
        kv("TVA (20 %)", tva),
        kv("Total TTC", ttc),
        Block::Spacer(6.0),
        Block::Paragraph(
            "Règlement à 30 jours à réception de facture. Pas d'escompte pour paiement \
             anticipé."
                .into(),
        ),
    ]
}
