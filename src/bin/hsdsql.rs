//! hsdsql — convert an HSD-ES query to SQL
//!
//! # Usage
//!
//! ```bash
//! # Fetch a query record and emit DPS SQL
//! hsdsql --query 1508334611 --model dps
//!
//! # HSD-ES native dialect
//! hsdsql -q 1508334611 -m hsdes
//!
//! # Translate a saved query document
//! hsdsql --file query.xml --model dps
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::*;
use hsdsql::prelude::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hsdsql")]
#[command(version)]
#[command(about = "Convert an HSD-ES query to SQL", long_about = None)]
#[command(after_help = "EXAMPLES:
    hsdsql --query 1508334611 --model dps
    hsdsql -q 1508334611 -m hsdes
    hsdsql --file query.xml --model dps")]
struct Cli {
    /// HSD-ES query record id
    #[arg(short, long, value_name = "ID")]
    query: Option<String>,

    /// Target SQL dialect
    #[arg(short, long, value_enum)]
    model: Option<Model>,

    /// Translate a local query XML file instead of fetching one
    #[arg(short, long, value_name = "PATH", conflicts_with = "query")]
    file: Option<PathBuf>,

    /// Config file (default: ./hsdsql.toml, then the user config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Query metadata endpoint
    #[arg(long, env = "HSDSQL_API_URL")]
    api_url: Option<String>,

    /// Bearer token for the metadata endpoint
    #[arg(long, env = "HSDSQL_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Skip TLS certificate verification
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Log extracted facets and substitutions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Model {
    Dps,
    Hsdes,
}

impl From<Model> for Dialect {
    fn from(model: Model) -> Self {
        match model {
            Model::Dps => Dialect::Dps,
            Model::Hsdes => Dialect::Hsdes,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(Some(sql)) => println!("{}", sql),
        Ok(None) => {}
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "hsdsql=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// `Ok(None)` when there is nothing to convert (no model, or no record).
async fn run(cli: &Cli) -> anyhow::Result<Option<String>> {
    let Some(model) = cli.model else {
        debug!("no --model given, nothing to convert");
        return Ok(None);
    };
    let dialect = Dialect::from(model);

    let config = load_config(cli)?;
    let translator = Translator::new(config.query.namespace.clone());

    if let Some(path) = &cli.file {
        let document = std::fs::read_to_string(path)
            .map_err(FetchError::from)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok(Some(translator.translate(&document, dialect)?));
    }

    let Some(id) = &cli.query else {
        debug!("no --query given, nothing to convert");
        return Ok(None);
    };

    let fetcher = HttpFetcher::new(&config.api)?;
    let sql = translator.fetch_and_translate(&fetcher, id, dialect).await?;
    Ok(Some(sql))
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        config = config.api_url(url);
    }
    if let Some(token) = &cli.token {
        config = config.token(token);
    }
    if cli.insecure {
        config = config.insecure(true);
    }
    Ok(config)
}
