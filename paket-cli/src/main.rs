use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "paket", about = "Paket-Konfigurator: Artikel auswählen, Preise kalkulieren, Angebot exportieren")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a package quote and export it as xlsx + offer text.
    Quote {
        /// Article to add, as NAME or NAME=QTY. Repeatable.
        #[arg(long = "add", value_name = "NAME[=QTY]")]
        add: Vec<String>,

        /// Discount in percent, clamped to 0..=100.
        #[arg(long, default_value = "0")]
        discount: Decimal,

        /// VAT rate in percent: 0, 7 or 19.
        #[arg(long, default_value_t = 19)]
        mwst: u8,

        /// Load a template JSON file as the starting package.
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,

        /// Additionally write the package as a template JSON file.
        #[arg(long, value_name = "FILE")]
        save_template: Option<PathBuf>,

        /// Only print the offer text, write no files.
        #[arg(long)]
        no_export: bool,
    },

    /// List the article catalog, optionally filtered.
    Catalog {
        /// Case-insensitive substring filter over article names.
        #[arg(long, value_name = "TERM")]
        search: Option<String>,
    },

    /// Show a saved template file with its recalculated totals.
    Template {
        /// Template JSON file.
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paket_cli=info,paket_offer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Quote {
            add,
            discount,
            mwst,
            template,
            save_template,
            no_export,
        } => commands::quote::run(
            &config,
            commands::quote::QuoteArgs {
                add,
                discount,
                mwst,
                template,
                save_template,
                no_export,
            },
        ),
        Commands::Catalog { search } => commands::catalog::run(&config, search.as_deref()),
        Commands::Template { file } => commands::template::run(&file),
    }
}
