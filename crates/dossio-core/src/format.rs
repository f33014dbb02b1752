// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Currency, VAT, date and placeholder formatting shared by every
//! generated document and email.
//!
//! All money in this domain is euros with VAT at a fixed 20 %.

use chrono::{DateTime, NaiveDate, Utc};

/// Fixed VAT rate applied to every funded action.
pub const TAUX_TVA: f64 = 0.20;

/// Placeholder for an optional field the user has not filled in.
pub const NON_RENSEIGNE: &str = "Non renseigné";
/// Placeholder for a value to be fixed later in the process.
pub const A_DEFINIR: &str = "À définir";
/// Placeholder for a value pending an external decision.
pub const A_DETERMINER: &str = "À déterminer";
/// Placeholder substituted for an empty rejection reason.
pub const NON_SPECIFIE: &str = "Non spécifié";

/// Round to two decimals (cents), half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// VAT amount for a pre-tax value: `HT × 0.20`, rounded to cents.
pub fn tva_from_ht(ht: f64) -> f64 {
    round2(ht * TAUX_TVA)
}

/// Tax-inclusive value: `HT × 1.20`, rounded to cents.
pub fn ttc_from_ht(ht: f64) -> f64 {
    round2(ht * (1.0 + TAUX_TVA))
}

/// Pre-tax value recovered from a tax-inclusive one: `TTC / 1.20`.
pub fn ht_from_ttc(ttc: f64) -> f64 {
    round2(ttc / (1.0 + TAUX_TVA))
}

/// Format a euro amount in the French convention: space-grouped thousands,
/// comma decimals, trailing euro sign. `2000.0` renders as `"2 000,00 €"`.
pub fn format_eur(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as i64;
    let euros = (cents / 100).to_string();
    let rem = cents % 100;

    let mut grouped = String::with_capacity(euros.len() + euros.len() / 3);
    for (i, c) in euros.chars().enumerate() {
        if i > 0 && (euros.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let sign = if value.is_sign_negative() && cents > 0 {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped},{rem:02} €")
}

/// Day/month/year date formatting (`17/03/2026`).
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Day/month/year with time, for "generated on" footers.
pub fn format_datetime(ts: DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y à %H:%M").to_string()
}

/// Decimal hours, comma-separated: `24` → `"24 h"`, `1.5` → `"1,50 h"`.
///
/// Hours are decimal fractions, not minutes: a value of 1,50 means one hour
/// and thirty minutes.
pub fn format_heures(heures: f64) -> String {
    if (heures - heures.trunc()).abs() < f64::EPSILON {
        format!("{} h", heures.trunc() as i64)
    } else {
        format!("{heures:.2} h").replace('.', ",")
    }
}

/// The value, or the given placeholder when absent/blank. Documents never
/// render blank fields.
pub fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Optional date, or "À définir" when absent.
pub fn date_or_a_definir(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| A_DEFINIR.to_string())
}

/// Optional amount, or "À déterminer" when absent.
pub fn montant_or_a_determiner(montant: Option<f64>) -> String {
    montant
        .map(format_eur)
        .unwrap_or_else(|| A_DETERMINER.to_string())
}
