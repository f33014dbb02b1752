// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tripartite convention builder: employer, beneficiary and OPCO.

use dossio_core::format::{
    date_or_a_definir, montant_or_a_determiner, or_placeholder, A_DETERMINER, NON_RENSEIGNE,
};
use dossio_core::TypeDossier;

use crate::layout::{kv, Block, SignatureBox};
use crate::DocumentInput;

/// Build the convention layout. Multi-page: identification and articles
/// flow freely, the signature page always starts on a fresh page.
pub fn build(input: &DocumentInput<'_>, reference: &str) -> Vec<Block> {
    let dossier = input.dossier;
    let entreprise = input.entreprise;
    let type_label = dossier.type_dossier.label();

    let mut blocks = vec![
        Block::Title(format!("CONVENTION TRIPARTITE — {}", type_label.to_uppercase())),
        Block::Paragraph(format!("Référence du dossier : {reference}")),
        Block::Paragraph(
            "Convention établie en application des articles L.6313-1 et suivants du Code du \
             travail, relative à la réalisation d'une action concourant au développement des \
             compétences."
                .into(),
        ),
        Block::Spacer(4.0),
        Block::Heading("Entre les soussignés".into()),
        Block::Heading("1. L'employeur".into()),
        kv("Raison sociale", &entreprise.nom),
        kv("SIRET", &entreprise.siret),
        kv(
            "Adresse",
            or_placeholder(entreprise.adresse.as_deref(), NON_RENSEIGNE),
        ),
        kv(
            "Représenté par",
            or_placeholder(entreprise.contact_nom.as_deref(), NON_RENSEIGNE),
        ),
        Block::Heading("2. Le bénéficiaire".into()),
        kv("Nom et prénom", dossier.beneficiaire.nom_complet()),
        kv("Email", &dossier.beneficiaire.email),
        kv(
            "Téléphone",
            or_placeholder(dossier.beneficiaire.telephone.as_deref(), NON_RENSEIGNE),
        ),
        Block::Heading("3. L'organisme financeur (OPCO)".into()),
        kv(
            "OPCO",
            or_placeholder(entreprise.opco.as_deref(), A_DETERMINER),
        ),
        Block::Spacer(4.0),
        Block::Heading("Article 1 — Objet".into()),
        Block::Paragraph(format!(
            "La présente convention a pour objet la réalisation d'une action de type \
             « {type_label} » au bénéfice de {}, salarié(e) de {}.",
            dossier.beneficiaire.nom_complet(),
            entreprise.nom,
        )),
        Block::Heading("Article 2 — Durée et période".into()),
        kv(
            "Durée totale",
            dossier
                .heures_total
                .map(dossio_core::format::format_heures)
                .unwrap_or_else(|| A_DETERMINER.to_string()),
        ),
        kv("Date de début", date_or_a_definir(dossier.date_debut)),
        kv("Date de fin", date_or_a_definir(dossier.date_fin)),
        Block::Heading("Article 3 — Déroulement".into()),
    ];

    match dossier.type_dossier {
        TypeDossier::Bilan => {
            blocks.push(Block::Paragraph(
                "Le bilan de compétences se déroule en trois phases conformément aux articles \
                 R.6313-4 à R.6313-8 du Code du travail :"
                    .into(),
            ));
            blocks.push(Block::Paragraph(
                "Phase préliminaire : analyse de la demande et définition du format adapté."
                    .into(),
            ));
            blocks.push(Block::Paragraph(
                "Phase d'investigation : construction du projet professionnel et vérification \
                 de sa pertinence."
                    .into(),
            ));
            blocks.push(Block::Paragraph(
                "Phase de conclusions : appropriation des résultats et formalisation du document \
                 de synthèse."
                    .into(),
            ));
        }
        TypeDossier::Formation => {
            blocks.push(Block::Paragraph(format!(
                "Programme de la formation : {}",
                or_placeholder(dossier.notes.as_deref(), NON_RENSEIGNE)
            )));
        }
    }

    blocks.extend([
        Block::Heading("Article 4 — Dispositions financières".into()),
        kv(
            "Montant estimé (HT)",
            montant_or_a_determiner(dossier.montant_estime),
        ),
        kv(
            "Montant pris en charge (HT)",
            montant_or_a_determiner(dossier.montant_valide),
        ),
        Block::Paragraph(
            "Le règlement est assuré par l'OPCO désigné ci-dessus, dans la limite du montant \
             pris en charge."
                .into(),
        ),
        Block::Heading("Article 5 — Confidentialité".into()),
        Block::Paragraph(
            "Les résultats de l'action sont la propriété exclusive du bénéficiaire. Ils ne \
             peuvent être communiqués à un tiers qu'avec son accord."
                .into(),
        ),
        // Signature boxes must never split across pages.
        Block::PageBreak,
        Block::Heading("Signatures".into()),
        Block::Paragraph("Fait en trois exemplaires originaux.".into()),
        Block::Spacer(6.0),
        Block::SignatureRow(vec![
            SignatureBox::avec_cachet(
                "L'employeur",
                or_placeholder(entreprise.contact_nom.as_deref(), NON_RENSEIGNE),
            ),
            SignatureBox::new("Le bénéficiaire", dossier.beneficiaire.nom_complet()),
            SignatureBox::avec_cachet(
                "L'OPCO",
                or_placeholder(entreprise.opco.as_deref(), A_DETERMINER),
            ),
        ]),
    ]);

    blocks
}
