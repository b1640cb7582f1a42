//! Spreadsheet loader for the article catalog.
//!
//! Reads the first worksheet of an xlsx/xls source: the first column is the
//! article name, the last column is the price, anything in between is
//! ignored. The first row is assumed to be a header. Loading is
//! all-or-nothing; a broken source yields a `CatalogError`, never a partial
//! catalog.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader};
use rust_decimal::Decimal;

use crate::entry::{Catalog, CatalogEntry};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog source could not be read: {0}")]
    Source(#[from] calamine::Error),

    #[error("catalog source contains no worksheet")]
    NoWorksheet,

    #[error("catalog sheet needs a name column and a price column")]
    MissingColumns,
}

/// Load a catalog from a spreadsheet file on disk.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let mut workbook = open_workbook_auto(path.as_ref())?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(CatalogError::NoWorksheet)??;
    catalog_from_range(&range)
}

/// Load a catalog from in-memory spreadsheet bytes (e.g. an uploaded file).
pub fn load_catalog_from_bytes(bytes: &[u8]) -> Result<Catalog, CatalogError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(CatalogError::NoWorksheet)??;
    catalog_from_range(&range)
}

fn catalog_from_range(range: &Range<Data>) -> Result<Catalog, CatalogError> {
    let (_, columns) = range.get_size();
    if columns < 2 {
        return Err(CatalogError::MissingColumns);
    }

    let mut entries = Vec::new();
    for row in range.rows().skip(1) {
        let Some(name) = cell_text(row.first()) else {
            continue;
        };
        let price = row.last().map(coerce_price).unwrap_or(Decimal::ZERO);
        entries.push(CatalogEntry { name, price });
    }

    tracing::debug!(articles = entries.len(), "catalog loaded");
    Ok(Catalog::new(entries))
}

fn cell_text(cell: Option<&Data>) -> Option<String> {
    let text = match cell? {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Lenient price coercion: anything that is not a usable number becomes zero.
/// Negative values are clamped to zero as well; prices are non-negative.
fn coerce_price(cell: &Data) -> Decimal {
    let value = match cell {
        Data::Float(f) => Decimal::try_from(*f).unwrap_or(Decimal::ZERO),
        Data::Int(i) => Decimal::from(*i),
        // Accepts both "49.90" and the German "49,90".
        Data::String(s) => s
            .trim()
            .replace(',', ".")
            .parse()
            .unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    };
    value.max(Decimal::ZERO)
}
