// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The layout-instruction model.
//!
//! Document builders produce an ordered list of [`Block`]s describing WHAT
//! goes in a document; the PDF renderer decides HOW it is laid out. The
//! split keeps document content testable without a PDF engine.

/// One layout instruction. Blocks are rendered top-down; the renderer
/// inserts automatic page breaks, and builders add an explicit
/// [`Block::PageBreak`] before signature rows so boxes never split across
/// pages.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Document title, centered, large bold type.
    Title(String),
    /// Section heading, bold.
    Heading(String),
    /// Wrapped body text.
    Paragraph(String),
    /// `label : value` line with a bold label.
    KeyValue { label: String, value: String },
    /// Simple grid with a bold header row.
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// A checkbox with its label, checked or not.
    CheckboxLine { checked: bool, label: String },
    /// A row of boxed signature blocks rendered side by side.
    SignatureRow(Vec<SignatureBox>),
    /// Vertical whitespace, in millimetres.
    Spacer(f32),
    /// Forced page break.
    PageBreak,
}

/// One boxed signature block.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureBox {
    /// Party title printed at the top of the box ("L'employeur", ...).
    pub titre: String,
    /// Signer name, or a placeholder when unknown.
    pub nom: String,
    /// Signing instruction printed inside the box.
    pub mention: String,
}

impl SignatureBox {
    pub fn new(titre: impl Into<String>, nom: impl Into<String>) -> Self {
        Self {
            titre: titre.into(),
            nom: nom.into(),
            mention: "Signature :".to_string(),
        }
    }

    /// Box requiring both signature and company stamp.
    pub fn avec_cachet(titre: impl Into<String>, nom: impl Into<String>) -> Self {
        Self {
            titre: titre.into(),
            nom: nom.into(),
            mention: "Signature et cachet :".to_string(),
        }
    }
}

/// Shorthand for a [`Block::KeyValue`].
pub fn kv(label: impl Into<String>, value: impl Into<String>) -> Block {
    Block::KeyValue {
        label: label.into(),
        value: value.into(),
    }
}

/// All human-visible text of a block list, newline-joined.
///
/// Content assertions in tests go through this instead of parsing PDF
/// bytes.
pub fn visible_text(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Title(s) | Block::Heading(s) | Block::Paragraph(s) => {
                out.push_str(s);
                out.push('\n');
            }
            Block::KeyValue { label, value } => {
                out.push_str(label);
                out.push_str(" : ");
                out.push_str(value);
                out.push('\n');
            }
            Block::Table { headers, rows } => {
                out.push_str(&headers.join(" | "));
                out.push('\n');
                for row in rows {
                    out.push_str(&row.join(" | "));
                    out.push('\n');
                }
            }
            Block::CheckboxLine { checked, label } => {
                out.push_str(if *checked { "[x] " } else { "[ ] " });
                out.push_str(label);
                out.push('\n');
            }
            Block::SignatureRow(boxes) => {
                for b in boxes {
                    out.push_str(&b.titre);
                    out.push_str(" / ");
                    out.push_str(&b.nom);
                    out.push('\n');
                }
            }
            Block::Spacer(_) | Block::PageBreak => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_text_covers_every_textual_block() {
        let blocks = vec![
            Block::Title("FACTURE".into()),
            kv("Référence", "BC-1-2026"),
            Block::Table {
                headers: vec!["Désignation".into(), "Montant".into()],
                rows: vec![vec!["Bilan".into(), "2 000,00 €".into()]],
            },
            Block::CheckboxLine {
                checked: true,
                label: "Bilan de compétences".into(),
            },
            Block::PageBreak,
            Block::SignatureRow(vec![SignatureBox::new("Le bénéficiaire", "Paul Durand")]),
        ];
        let text = visible_text(&blocks);
        for needle in [
            "FACTURE",
            "Référence : BC-1-2026",
            "2 000,00 €",
            "[x] Bilan de compétences",
            "Le bénéficiaire / Paul Durand",
        ] {
            assert!(text.contains(needle), "missing {needle:?} in {text}");
        }
    }
}
