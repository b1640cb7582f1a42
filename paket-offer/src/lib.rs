pub mod package;
pub mod pricing;
pub mod session;
pub mod template;

pub use package::{LineItem, Package};
pub use pricing::{compute_totals, InvalidTaxRate, PricingBreakdown, TaxRate};
pub use session::{reduce, Event, Session};
pub use template::{Template, TemplateError, TemplateStore};
