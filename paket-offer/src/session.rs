//! Session-scoped state and the event reducer.
//!
//! Everything a user touches lives in one explicit [`Session`] value created
//! at session start. There is no global store; concurrent sessions each own
//! an independent copy. Mutation goes through [`reduce`], which keeps the
//! state transitions testable without any rendering layer.

use paket_catalog::Catalog;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::package::Package;
use crate::pricing::{compute_totals, PricingBreakdown, TaxRate};
use crate::template::TemplateStore;

/// One user's working state: catalog, package, rates and templates.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub catalog: Catalog,
    pub package: Package,
    pub discount_pct: Decimal,
    pub tax: TaxRate,
    pub templates: TemplateStore,
}

impl Session {
    /// Starts a fresh session. Defaults mirror the configurator: no
    /// discount, standard VAT.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            id: Uuid::new_v4(),
            catalog,
            package: Package::new(),
            discount_pct: Decimal::ZERO,
            tax: TaxRate::Standard,
            templates: TemplateStore::new(),
        }
    }

    /// Current totals, recomputed from scratch for every view.
    pub fn totals(&self) -> PricingBreakdown {
        compute_totals(&self.package, self.discount_pct, self.tax)
    }
}

/// Everything that can happen to a session.
#[derive(Debug, Clone)]
pub enum Event {
    /// A new catalog replaces the old one wholesale. Existing lines keep
    /// their copied prices.
    CatalogReplaced(Catalog),
    ArticleAdded(String),
    /// Batch selection, e.g. "Alle auswählen".
    ArticlesSelected(Vec<String>),
    QuantityUpdated { index: usize, quantity: u32 },
    LinesRemoved(Vec<usize>),
    PackageCleared,
    /// Clamped to [0, 100].
    DiscountChanged(Decimal),
    TaxChanged(TaxRate),
    TemplateSaved,
    /// Index into the most-recent-first template list.
    TemplateLoaded(usize),
    /// Raw JSON; a malformed document is logged and ignored, the store
    /// stays unchanged.
    TemplateImported(String),
}

/// Pure state transition: `(session, event) -> session`.
pub fn reduce(mut session: Session, event: Event) -> Session {
    tracing::debug!(session = %session.id, ?event, "applying event");
    match event {
        Event::CatalogReplaced(catalog) => {
            session.catalog = catalog;
        }
        Event::ArticleAdded(name) => {
            session.package.add_article(&session.catalog, &name);
        }
        Event::ArticlesSelected(names) => {
            for name in names {
                session.package.add_article(&session.catalog, &name);
            }
        }
        Event::QuantityUpdated { index, quantity } => {
            session.package.update_quantity(index, quantity);
        }
        Event::LinesRemoved(indices) => {
            session.package.remove_many(&indices);
        }
        Event::PackageCleared => {
            session.package.clear();
        }
        Event::DiscountChanged(pct) => {
            session.discount_pct = pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        }
        Event::TaxChanged(rate) => {
            session.tax = rate;
        }
        Event::TemplateSaved => {
            session
                .templates
                .save(&session.package, session.discount_pct, session.tax);
        }
        Event::TemplateLoaded(index) => {
            // Loading only replaces the package; discount and MwSt keep
            // their current values.
            if let Some(template) = session.templates.get(index) {
                let snapshot = template.package_snapshot();
                session.package.restore(snapshot);
            }
        }
        Event::TemplateImported(json) => {
            if let Err(err) = session.templates.import_json(&json) {
                tracing::warn!(%err, "template import ignored");
            }
        }
    }
    session
}
