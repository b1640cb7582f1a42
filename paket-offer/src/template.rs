//! Named package snapshots (Vorlagen).
//!
//! The store is append-only for the session lifetime: imports and saves only
//! ever add, names are auto-generated timestamps and deliberately not unique.

use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::package::Package;
use crate::pricing::TaxRate;

/// Immutable snapshot of a package plus its discount/tax settings.
///
/// Field names are the JSON wire contract: `name`, `package`, `mwst`,
/// `discount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub package: Package,
    pub mwst: TaxRate,
    pub discount: Decimal,
}

impl Template {
    /// Deep copy of the stored lines for restoring into a live package.
    /// The caller owns the actual restore.
    pub fn package_snapshot(&self) -> Package {
        self.package.clone()
    }

    /// Pretty-printed JSON for download/exchange.
    pub fn to_json(&self) -> Result<String, TemplateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Session-scoped template list.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Snapshots the package under an auto-generated timestamp name.
    /// Saves within the same second collide by name; that is fine, the
    /// store never keys by name.
    pub fn save(&mut self, package: &Package, discount: Decimal, tax: TaxRate) -> &Template {
        let name = format!("Vorlage_{}", Local::now().format("%Y%m%d_%H%M%S"));
        self.templates.push(Template {
            name,
            package: package.snapshot(),
            mwst: tax,
            discount,
        });
        &self.templates[self.templates.len() - 1]
    }

    /// Templates in display order, most recent first.
    pub fn list(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter().rev()
    }

    /// Lookup by display-order index (0 = most recent).
    pub fn get(&self, index: usize) -> Option<&Template> {
        self.templates.iter().rev().nth(index)
    }

    /// Parses and appends a template. A malformed document leaves the store
    /// untouched; nothing is ever overwritten on success either.
    pub fn import_json(&mut self, json: &str) -> Result<&Template, TemplateError> {
        let template: Template = serde_json::from_str(json)?;
        tracing::info!(name = %template.name, "template imported");
        self.templates.push(template);
        Ok(&self.templates[self.templates.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::LineItem;
    use rust_decimal_macros::dec;

    fn sample_package() -> Package {
        Package::from_iter([
            LineItem::new("Regal".to_string(), 2, dec!(49.90)),
            LineItem::new("Tisch".to_string(), 1, dec!(120.00)),
        ])
    }

    #[test]
    fn save_snapshots_the_package() {
        let mut store = TemplateStore::new();
        let mut package = sample_package();
        let saved = store.save(&package, dec!(10), TaxRate::Standard);
        assert!(saved.name.starts_with("Vorlage_"));

        // Later edits to the live package must not reach the template.
        package.update_quantity(0, 9);
        let template = store.get(0).unwrap();
        assert_eq!(template.package.lines()[0].quantity, 2);
    }

    #[test]
    fn restore_round_trips_articles_quantities_prices_and_order() {
        let mut store = TemplateStore::new();
        let package = sample_package();
        store.save(&package, dec!(10), TaxRate::Standard);

        let mut restored = Package::new();
        restored.restore(store.get(0).unwrap().package_snapshot());
        assert_eq!(restored, package);
    }

    #[test]
    fn list_is_most_recent_first_and_never_dedupes() {
        let mut store = TemplateStore::new();
        let package = sample_package();
        store.save(&package, dec!(0), TaxRate::Zero);
        store.save(&package, dec!(5), TaxRate::Standard);

        let discounts: Vec<Decimal> = store.list().map(|t| t.discount).collect();
        assert_eq!(discounts, vec![dec!(5), dec!(0)]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn import_export_round_trip() {
        let mut store = TemplateStore::new();
        store.save(&sample_package(), dec!(10), TaxRate::Standard);
        let json = store.get(0).unwrap().to_json().unwrap();

        let mut other = TemplateStore::new();
        let imported = other.import_json(&json).unwrap().clone();
        assert_eq!(&imported, store.get(0).unwrap());

        // Byte-equivalent structured content modulo whitespace.
        let json_again = imported.to_json().unwrap();
        assert_eq!(json, json_again);
    }

    #[test]
    fn import_accepts_the_wire_format_verbatim() {
        let json = r#"{
            "name": "Vorlage_20240101_120000",
            "package": [
                {"Artikel": "Regal", "Menge": 2, "Einzelpreis": 49.9, "ZeileNetto": 99.8}
            ],
            "mwst": 19,
            "discount": 10.0
        }"#;

        let mut store = TemplateStore::new();
        let template = store.import_json(json).unwrap();
        assert_eq!(template.mwst, TaxRate::Standard);
        assert_eq!(template.discount, dec!(10));
        assert_eq!(template.package.lines()[0].article, "Regal");
    }

    #[test]
    fn malformed_import_leaves_the_store_unchanged() {
        let mut store = TemplateStore::new();
        store.save(&sample_package(), dec!(0), TaxRate::Standard);

        // Missing "package" key.
        let result = store.import_json(r#"{"name": "x", "mwst": 19, "discount": 0}"#);
        assert!(result.is_err());
        assert_eq!(store.len(), 1);

        // Illegal tax rate.
        let result =
            store.import_json(r#"{"name": "x", "package": [], "mwst": 16, "discount": 0}"#);
        assert!(result.is_err());
        assert_eq!(store.len(), 1);

        assert!(store.import_json("kein json").is_err());
        assert_eq!(store.len(), 1);
    }
}
