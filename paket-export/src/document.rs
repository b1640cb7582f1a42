//! Plain-text offer document (Angebotstext).
//!
//! The format is fixed: date header, one line per position, blank line,
//! subtotal, discount line only when the percentage is strictly positive,
//! MwSt line, gross total. Every amount carries the currency suffix.

use chrono::{Local, NaiveDate};
use paket_offer::{Package, PricingBreakdown};
use rust_decimal::{Decimal, RoundingStrategy};

pub const CURRENCY: &str = "€";

/// Offer text dated today.
pub fn offer_text(package: &Package, breakdown: &PricingBreakdown) -> String {
    offer_text_on(package, breakdown, Local::now().date_naive())
}

/// Offer text for an explicit date.
pub fn offer_text_on(package: &Package, breakdown: &PricingBreakdown, date: NaiveDate) -> String {
    let totals = breakdown.rounded();
    let mut lines = vec![
        format!("Angebot — Paket vom {}", date.format("%Y-%m-%d")),
        "Positionen:".to_string(),
    ];

    for line in package.lines() {
        lines.push(format!(
            "- {} × {} @ {} = {}",
            line.quantity,
            line.article,
            eur(line.unit_price),
            eur(line.line_net)
        ));
    }

    lines.push(format!("\nZwischensumme: {}", eur(totals.net_sum)));

    if package.is_empty() {
        // Degenerate document: no rate lines for an empty package.
        lines.push(format!("Gesamt (Brutto): {}", eur(totals.gross_total)));
        return lines.join("\n");
    }

    // Strictly > 0: a zero discount never shows up.
    if totals.discount_pct > Decimal::ZERO {
        lines.push(format!(
            "Rabatt: {} ({:.2}%)",
            eur(totals.discount_amount),
            totals.discount_pct
        ));
    }
    lines.push(format!(
        "MwSt: {} ({}%)",
        eur(totals.tax_amount),
        u8::from(totals.tax_pct)
    ));
    lines.push(format!("Gesamt (Brutto): {}", eur(totals.gross_total)));

    lines.join("\n")
}

fn eur(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2} {CURRENCY}")
}
