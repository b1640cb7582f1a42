pub mod entry;
pub mod loader;

pub use entry::{Catalog, CatalogEntry};
pub use loader::{load_catalog, load_catalog_from_bytes, CatalogError};
