//! Spreadsheet export of the configured package.
//!
//! One sheet named "Paket", one row per line item. The summary columns
//! (discount, tax and the four totals) are denormalized onto every row,
//! matching the historical export format consumers already parse.

use std::fs;
use std::path::Path;

use paket_offer::{Package, PricingBreakdown};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::Workbook;

pub const SHEET_NAME: &str = "Paket";

const HEADERS: [&str; 10] = [
    "Artikel",
    "Menge",
    "Einzelpreis",
    "ZeileNetto",
    "Rabatt_%",
    "MwSt_%",
    "NettoSumme",
    "NettoNachRabatt",
    "MwStBetrag",
    "BruttoSumme",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("workbook could not be written: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Renders the package and its totals into xlsx bytes.
pub fn package_workbook(
    package: &Package,
    breakdown: &PricingBreakdown,
) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (i, line) in package.lines().iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &line.article)?;
        sheet.write_number(row, 1, line.quantity)?;
        sheet.write_number(row, 2, as_f64(line.unit_price))?;
        sheet.write_number(row, 3, as_f64(line.line_net))?;
        sheet.write_number(row, 4, as_f64(breakdown.discount_pct))?;
        sheet.write_number(row, 5, f64::from(u8::from(breakdown.tax_pct)))?;
        sheet.write_number(row, 6, as_f64(breakdown.net_sum))?;
        sheet.write_number(row, 7, as_f64(breakdown.net_after_discount))?;
        sheet.write_number(row, 8, as_f64(breakdown.tax_amount))?;
        sheet.write_number(row, 9, as_f64(breakdown.gross_total))?;
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(rows = package.len(), bytes = bytes.len(), "workbook rendered");
    Ok(bytes)
}

/// Renders and writes the workbook to a file.
pub fn write_package_workbook(
    path: impl AsRef<Path>,
    package: &Package,
    breakdown: &PricingBreakdown,
) -> Result<(), ExportError> {
    let bytes = package_workbook(package, breakdown)?;
    fs::write(path, bytes)?;
    Ok(())
}

fn as_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}
