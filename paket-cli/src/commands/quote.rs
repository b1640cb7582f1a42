use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use paket_catalog::{load_catalog, Catalog};
use paket_export::{export_filenames, offer_text, write_package_workbook};
use paket_offer::{reduce, Event, Session, TaxRate};
use rust_decimal::Decimal;

use crate::config::Config;

pub struct QuoteArgs {
    pub add: Vec<String>,
    pub discount: Decimal,
    pub mwst: u8,
    pub template: Option<PathBuf>,
    pub save_template: Option<PathBuf>,
    pub no_export: bool,
}

pub fn run(config: &Config, args: QuoteArgs) -> anyhow::Result<()> {
    let tax = TaxRate::try_from(args.mwst)?;

    // A missing or unreadable price list degrades to an empty catalog so
    // template work stays possible; only the export is withheld.
    let catalog = match load_catalog(&config.catalog.path) {
        Ok(catalog) => catalog,
        Err(err) => {
            tracing::warn!(path = %config.catalog.path, %err, "catalog unavailable, continuing without articles");
            Catalog::default()
        }
    };

    let mut session = Session::new(catalog);

    if let Some(path) = &args.template {
        let json = fs::read_to_string(path)
            .with_context(|| format!("template {} could not be read", path.display()))?;
        session = reduce(session, Event::TemplateImported(json));
        session = reduce(session, Event::TemplateLoaded(0));
    }

    for spec in &args.add {
        let (name, quantity) = parse_add_spec(spec)?;
        session = reduce(session, Event::ArticleAdded(name.to_string()));
        if let Some(quantity) = quantity {
            match session.package.position(name) {
                Some(index) => {
                    session = reduce(session, Event::QuantityUpdated { index, quantity });
                }
                None => tracing::warn!(article = name, "not in the catalog, skipped"),
            }
        }
    }

    session = reduce(session, Event::DiscountChanged(args.discount));
    session = reduce(session, Event::TaxChanged(tax));

    let totals = session.totals();
    let text = offer_text(&session.package, &totals);
    println!("{text}");

    if let Some(path) = &args.save_template {
        session = reduce(session, Event::TemplateSaved);
        let template = session
            .templates
            .get(0)
            .context("template was not saved")?;
        fs::write(path, template.to_json()?)
            .with_context(|| format!("template {} could not be written", path.display()))?;
        println!("Vorlage gespeichert: {}", path.display());
    }

    if args.no_export {
        return Ok(());
    }
    if session.package.is_empty() {
        tracing::warn!("empty package, export skipped");
        return Ok(());
    }

    let names = export_filenames();
    let out_dir = Path::new(&config.export.output_dir);
    let workbook_path = out_dir.join(&names.workbook);
    let text_path = out_dir.join(&names.offer_text);

    write_package_workbook(&workbook_path, &session.package, &totals)?;
    fs::write(&text_path, &text)
        .with_context(|| format!("offer text {} could not be written", text_path.display()))?;

    println!("Export: {}", workbook_path.display());
    println!("Export: {}", text_path.display());
    Ok(())
}

/// `NAME` or `NAME=QTY`. The name may contain `=` only if a quantity follows
/// the last one, which no real article name does.
fn parse_add_spec(spec: &str) -> anyhow::Result<(&str, Option<u32>)> {
    match spec.rsplit_once('=') {
        Some((name, qty)) => {
            let quantity: u32 = qty
                .parse()
                .with_context(|| format!("invalid quantity in {spec:?}"))?;
            Ok((name, Some(quantity)))
        }
        None => Ok((spec, None)),
    }
}
