use std::fs;
use std::path::Path;

use anyhow::Context;
use paket_export::offer_text;
use paket_offer::{compute_totals, TemplateStore};

pub fn run(file: &Path) -> anyhow::Result<()> {
    let json = fs::read_to_string(file)
        .with_context(|| format!("template {} could not be read", file.display()))?;

    let mut store = TemplateStore::new();
    let template = store
        .import_json(&json)
        .with_context(|| format!("template {} could not be parsed", file.display()))?;

    println!("Vorlage: {}", template.name);
    println!();

    // A preview uses the rates stored in the template, unlike loading into
    // a live session, which keeps the session's rates.
    let totals = compute_totals(&template.package, template.discount, template.mwst);
    println!("{}", offer_text(&template.package, &totals));
    Ok(())
}
