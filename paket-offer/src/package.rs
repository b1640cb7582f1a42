use paket_catalog::Catalog;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One position in the package.
///
/// The serde names are the wire contract shared with the template JSON and
/// the spreadsheet export, so they stay German.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "Artikel")]
    pub article: String,
    #[serde(rename = "Menge")]
    pub quantity: u32,
    #[serde(rename = "Einzelpreis")]
    pub unit_price: Decimal,
    #[serde(rename = "ZeileNetto")]
    pub line_net: Decimal,
}

impl LineItem {
    /// The unit price is copied from the catalog at add time and never
    /// follows later catalog reloads.
    pub fn new(article: String, quantity: u32, unit_price: Decimal) -> Self {
        let mut item = Self {
            article,
            quantity,
            unit_price,
            line_net: Decimal::ZERO,
        };
        item.recompute_net();
        item
    }

    fn recompute_net(&mut self) {
        self.line_net = Decimal::from(self.quantity) * self.unit_price;
    }
}

/// The mutable package under configuration: an ordered list of line items,
/// insertion order being display order. Owned by exactly one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Package {
    lines: Vec<LineItem>,
}

impl Package {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of an article in display order.
    pub fn position(&self, article: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.article == article)
    }

    /// Appends a new line with quantity 1 and the current catalog price.
    ///
    /// Idempotent per article: a name already in the package is left alone.
    /// An article the catalog does not know is ignored as well, since
    /// selection always comes out of the catalog.
    pub fn add_article(&mut self, catalog: &Catalog, name: &str) -> bool {
        if self.position(name).is_some() {
            return false;
        }
        let Some(price) = catalog.price_of(name) else {
            tracing::warn!(article = name, "article not in catalog, ignored");
            return false;
        };
        self.lines.push(LineItem::new(name.to_string(), 1, price));
        true
    }

    /// Sets the quantity of a line and recomputes its net amount.
    /// An out-of-range index is a no-op.
    pub fn update_quantity(&mut self, index: usize, quantity: u32) -> bool {
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };
        line.quantity = quantity;
        line.recompute_net();
        true
    }

    /// Removes a single line. An out-of-range index is a no-op.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.lines.len() {
            return false;
        }
        self.lines.remove(index);
        true
    }

    /// Removes a set of lines, processed in descending index order so that
    /// earlier removals cannot shift later ones.
    pub fn remove_many(&mut self, indices: &[usize]) {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for index in sorted.into_iter().rev() {
            self.remove_at(index);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Deep copy of the current lines; mutations to the copy never touch
    /// the live package.
    pub fn snapshot(&self) -> Package {
        self.clone()
    }

    /// Wholesale replacement from a snapshot. Net amounts are recomputed so
    /// that an imported template with stale `ZeileNetto` values cannot
    /// smuggle in an inconsistent line.
    pub fn restore(&mut self, snapshot: Package) {
        self.lines = snapshot.lines;
        for line in &mut self.lines {
            line.recompute_net();
        }
    }
}

impl FromIterator<LineItem> for Package {
    fn from_iter<I: IntoIterator<Item = LineItem>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}
