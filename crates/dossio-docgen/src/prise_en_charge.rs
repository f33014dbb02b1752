// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OPCO funding request builder: numbered sections and a 20 % VAT cost
//! breakdown.

use dossio_core::format::{
    date_or_a_definir, format_eur, or_placeholder, ttc_from_ht, tva_from_ht, A_DEFINIR,
    A_DETERMINER, NON_RENSEIGNE,
};

use crate::layout::{kv, Block, SignatureBox};
use crate::{DocumentInput, PRESTATAIRE_NOM};

pub fn build(input: &DocumentInput<'_>, reference: &str) -> Vec<Block> {
    let dossier = input.dossier;
    let entreprise = input.entreprise;

    // Each cost line is formatted independently; a missing amount leaves
    // the whole breakdown as placeholders, never a partial computation.
    let (ht, tva, ttc) = match input.montant_retenu() {
        Some(m) => (
            format_eur(m),
            format_eur(tva_from_ht(m)),
            format_eur(ttc_from_ht(m)),
        ),
        None => (
            A_DETERMINER.to_string(),
            A_DETERMINER.to_string(),
            A_DETERMINER.to_string(),
        ),
    };

    vec![
        Block::Title("DEMANDE DE PRISE EN CHARGE".into()),
        Block::Paragraph(format!("Référence du dossier : {reference}")),
        kv(
            "OPCO destinataire",
            or_placeholder(entreprise.opco.as_deref(), A_DETERMINER),
        ),
        Block::Spacer(4.0),
        Block::Heading("1. Entreprise".into()),
        kv("Raison sociale", &entreprise.nom),
        kv("SIRET", &entreprise.siret),
        kv(
            "Adresse",
            or_placeholder(entreprise.adresse.as_deref(), NON_RENSEIGNE),
        ),
        kv(
            "Code NAF",
            or_placeholder(entreprise.code_naf.as_deref(), NON_RENSEIGNE),
        ),
        kv(
            "Contact",
            or_placeholder(entreprise.contact_email.as_deref(), NON_RENSEIGNE),
        ),
        Block::Heading("2. Bénéficiaire".into()),
        kv("Nom et prénom", dossier.beneficiaire.nom_complet()),
        kv("Email", &dossier.beneficiaire.email),
        kv(
            "Téléphone",
            or_placeholder(dossier.beneficiaire.telephone.as_deref(), NON_RENSEIGNE),
        ),
        Block::Heading("3. Action demandée".into()),
        kv("Type d'action", dossier.type_dossier.label()),
        kv(
            "Durée totale",
            dossier
                .heures_total
                .map(dossio_core::format::format_heures)
                .unwrap_or_else(|| A_DETERMINER.to_string()),
        ),
        kv("Date de début", date_or_a_definir(dossier.date_debut)),
        kv("Date de fin", date_or_a_definir(dossier.date_fin)),
        Block::Heading("4. Organisme prestataire".into()),
        kv("Organisme", PRESTATAIRE_NOM),
        kv("N° de déclaration d'activité", A_DEFINIR),
        Block::Heading("5. Coût de l'action".into()),
        Block::Table {
            headers: vec!["".into(), "Montant".into()],
            rows: vec![
                vec!["Montant HT".into(), ht],
                vec!["TVA (20 %)".into(), tva],
                vec!["Montant TTC".into(), ttc],
            ],
        },
        Block::Heading("6. Pièces jointes".into()),
        Block::CheckboxLine {
            checked: false,
            label: "Convention tripartite signée".into(),
        },
        Block::CheckboxLine {
            checked: false,
            label: "Programme et calendrier prévisionnel".into(),
        },
        Block::CheckboxLine {
            checked: false,
            label: "Devis de l'organisme prestataire".into(),
        },
        Block::CheckboxLine {
            checked: false,
            label: "RIB de l'organisme prestataire".into(),
        },
        Block::PageBreak,
        Block::Spacer(6.0),
        Block::SignatureRow(vec![SignatureBox::avec_cachet(
            "Pour l'entreprise",
            or_placeholder(entreprise.contact_nom.as_deref(), NON_RENSEIGNE),
        )]),
    ]
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{dossier_minimal, entreprise_minimal};
    use crate::layout::visible_text;
    use crate::DocumentInput;

    use super::*;

    #[test]
    fn cost_breakdown_computes_twenty_percent_vat() {
        let dossier = dossier_minimal();
        let entreprise = entreprise_minimal();
        let input = DocumentInput {
            dossier: &dossier,
            entreprise: &entreprise,
            seance: None,
            montant: Some(2000.0),
            numero_facture: None,
        };
        let text = visible_text(&build(&input, "BC-12-2026"));
        assert!(text.contains("Montant HT | 2 000,00 €"), "{text}");
        assert!(text.contains("TVA (20 %) | 400,00 €"), "{text}");
        assert!(text.contains("Montant TTC | 2 400,00 €"), "{text}");
    }

    #[test]
    fn montant_falls_back_to_validated_then_estimated() {
        let mut dossier = dossier_minimal();
        dossier.montant_estime = Some(1500.0);
        dossier.montant_valide = Some(1200.0);
        let entreprise = entreprise_minimal();
        let input = DocumentInput {
            dossier: &dossier,
            entreprise: &entreprise,
            seance: None,
            montant: None,
            numero_facture: None,
        };
        let text = visible_text(&build(&input, "BC-12-2026"));
        assert!(text.contains("1 200,00 €"), "validated wins: {text}");
    }

    #[test]
    fn unknown_amount_renders_placeholders_not_zero() {
        let dossier = dossier_minimal();
        let entreprise = entreprise_minimal();
        let input = DocumentInput {
            dossier: &dossier,
            entreprise: &entreprise,
            seance: None,
            montant: None,
            numero_facture: None,
        };
        let text = visible_text(&build(&input, "BC-12-2026"));
        assert!(text.contains("Montant HT | À déterminer"), "{text}");
        assert!(!text.contains("0,00 €"), "{text}");
    }
}
