use anyhow::Context;
use paket_catalog::load_catalog;

use crate::config::Config;

pub fn run(config: &Config, search: Option<&str>) -> anyhow::Result<()> {
    let catalog = load_catalog(&config.catalog.path)
        .with_context(|| format!("catalog {} could not be loaded", config.catalog.path))?;

    let hits = catalog.search(search.unwrap_or(""));
    if hits.is_empty() {
        println!("Keine Artikel gefunden.");
        return Ok(());
    }

    for entry in hits {
        println!("{}\t{:.2} €", entry.name, entry.price);
    }
    Ok(())
}
