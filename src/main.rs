//! licita — list, filter, and export procurement notices from the PNCP
//! catalog.
//!
//! Records come from a saved JSON file, the embedded sample fixture, or a
//! live fetch (catalog API with portal-scraper fallback). Whatever the
//! source, the same local pipeline runs: filter → sort → render.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use licita_core::config::Config;
use licita_core::filter::{filter, FilterCriteria};
use licita_core::render::{render, OutputFormat};
use licita_core::sort::{sort, SortSpec};
use licita_core::Record;
use licita_sources::{load_records, sample_records, PncpClient, PortalScraper, SearchQuery};

#[derive(Parser)]
#[command(name = "licita", about = "Listar licitações do PNCP", version)]
struct Cli {
    /// Read records from a saved JSON file (an array, or an object with an
    /// "items" array) instead of fetching.
    #[arg(short = 'i', long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Use the embedded sample records instead of fetching.
    #[arg(long)]
    sample: bool,

    /// How to fetch live data.
    #[arg(long, value_enum, default_value = "auto")]
    method: FetchMethod,

    /// Filter by state code, exact match (ex: PR).
    #[arg(long)]
    uf: Option<String>,

    /// Filter by municipality name (contains).
    #[arg(long)]
    municipio: Option<String>,

    /// Filter by procurement modality (contains).
    #[arg(long)]
    modalidade: Option<String>,

    /// Filter by notice status (contains).
    #[arg(long)]
    situacao: Option<String>,

    /// Filter by organization name (contains).
    #[arg(long)]
    orgao: Option<String>,

    /// Filter by organization CNPJ (server-side query only).
    #[arg(long)]
    cnpj: Option<String>,

    /// Filter by year, exact match.
    #[arg(long)]
    ano: Option<String>,

    /// Free-text search over title, description, organization, municipality.
    #[arg(short = 's', long)]
    search: Option<String>,

    /// Publication date lower bound for the server-side query (YYYY-MM-DD).
    #[arg(long)]
    data_inicio: Option<String>,

    /// Publication date upper bound for the server-side query (YYYY-MM-DD).
    #[arg(long)]
    data_fim: Option<String>,

    /// Result page to fetch.
    #[arg(long, default_value_t = 1)]
    pagina: u32,

    /// Items per fetched page (0 = configured page size).
    #[arg(long, default_value_t = 0)]
    tamanho: u32,

    /// Field to sort by.
    #[arg(long, default_value = "data_publicacao_pncp")]
    sort_by: String,

    /// Sort in descending order.
    #[arg(long)]
    desc: bool,

    /// Maximum number of results (0 = unlimited).
    #[arg(long, default_value_t = 0)]
    limit: usize,

    /// Output format: list, table, json, or csv.
    #[arg(short = 'f', long, default_value = "list")]
    format: String,

    /// Write the rendered output to a file instead of stdout.
    #[arg(short = 'o', long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Log progress to stderr (RUST_LOG respected).
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FetchMethod {
    /// Catalog search API only.
    Api,
    /// Portal scraper only.
    Web,
    /// API first, scraper when the API errors or returns nothing.
    Auto,
}

impl Cli {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            uf: self.uf.clone(),
            municipio: self.municipio.clone(),
            modalidade: self.modalidade.clone(),
            situacao: self.situacao.clone(),
            orgao: self.orgao.clone(),
            ano: self.ano.clone(),
            search: self.search.clone(),
        }
    }

    fn sort_spec(&self) -> SortSpec {
        SortSpec {
            field: self.sort_by.clone(),
            descending: self.desc,
            limit: self.limit,
        }
    }

    fn search_query(&self) -> SearchQuery {
        SearchQuery {
            uf: self.uf.clone(),
            municipio: self.municipio.clone(),
            // The catalog accepts a name or a tax id in the same parameter.
            orgao: self.cnpj.clone().or_else(|| self.orgao.clone()),
            modalidade: self.modalidade.clone(),
            situacao: self.situacao.clone(),
            data_inicio: self.data_inicio.clone(),
            data_fim: self.data_fim.clone(),
            pagina: self.pagina,
            tamanho_pagina: self.tamanho,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    // An unknown format is a configuration error; reject it before any
    // fetching or rendering starts.
    let format: OutputFormat = cli.format.parse()?;

    let config = Config::load().unwrap_or_else(|_| Config::defaults());

    let records = resolve_records(&cli, &config).await?;
    info!(count = records.len(), "records loaded");

    let mut results = filter(records, &cli.criteria());
    sort(&mut results, &cli.sort_spec());
    info!(count = results.len(), "records after filter and sort");

    write_output(&results, format, cli.output.as_deref())
}

async fn resolve_records(cli: &Cli, config: &Config) -> anyhow::Result<Vec<Record>> {
    if let Some(path) = &cli.input {
        return load_records(path);
    }
    if cli.sample {
        return Ok(sample_records());
    }

    let query = cli.search_query();
    match cli.method {
        FetchMethod::Api => PncpClient::new(config)?.search(&query).await,
        FetchMethod::Web => PortalScraper::new(config)?.search(&query).await,
        FetchMethod::Auto => match PncpClient::new(config)?.search(&query).await {
            Ok(records) if !records.is_empty() => Ok(records),
            Ok(_) => {
                info!("API returned no records, trying the portal scraper");
                scrape_or_empty(config, &query).await
            }
            Err(error) => {
                warn!(error = %error, "API fetch failed, trying the portal scraper");
                scrape_or_empty(config, &query).await
            }
        },
    }
}

/// Scraper fallback for `auto` mode. The scrape path is best-effort, so its
/// failure degrades to an empty batch — the pipeline still renders valid
/// (empty) output.
async fn scrape_or_empty(config: &Config, query: &SearchQuery) -> anyhow::Result<Vec<Record>> {
    match PortalScraper::new(config)?.search(query).await {
        Ok(records) => Ok(records),
        Err(error) => {
            warn!(error = %error, "portal scrape failed, continuing with no records");
            Ok(Vec::new())
        }
    }
}

fn write_output(records: &[Record], format: OutputFormat, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let mut buffer = Vec::new();
            render(records, format, &mut buffer)?;
            std::fs::write(path, &buffer).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "output written");
            Ok(())
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            render(records, format, &mut lock)?;
            Ok(())
        }
    }
}
