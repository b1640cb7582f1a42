use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single article from the price list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub price: Decimal,
}

/// Read-only article catalog loaded from a spreadsheet.
///
/// The catalog is never edited in place; loading a new source replaces it
/// wholesale. Line items copy their price out of the catalog at add time,
/// so a later reload does not touch an existing package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact-name lookup, used to copy the current price into a new line item.
    pub fn price_of(&self, name: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.price)
    }

    /// Case-insensitive substring filter over article names.
    pub fn search(&self, term: &str) -> Vec<&CatalogEntry> {
        let needle = term.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.name.to_lowercase().contains(&needle))
            .collect()
    }
}
