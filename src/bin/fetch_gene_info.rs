use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;

use geneinfo::biomart::{self, GeneInfoQuery};
use geneinfo::cli;
use geneinfo::config::AnnotateConfig;

#[derive(Parser)]
#[command(
    name = "fetch_gene_info",
    about = "Download BioMart gene information for a list of Ensembl gene ids"
)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short = 'c', long = "config")]
    config: PathBuf,

    /// File with one Ensembl gene id per line
    #[arg(short = 'i', long = "ids")]
    ids: PathBuf,

    /// Output directory for gene_info.tsv
    #[arg(short = 'o', long = "out")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();

    cli::banner("Fetch Gene Information");

    // ── Configuration ────────────────────────────────────
    cli::section("Configuration");

    let config = AnnotateConfig::from_file(&cli_args.config)?;
    cli::kv("Config", &cli_args.config.display().to_string());
    cli::kv("Dataset", &config.dataset);
    cli::kv("Host", &config.host);

    let content = std::fs::read_to_string(&cli_args.ids)
        .with_context(|| format!("failed to read gene ids: {}", cli_args.ids.display()))?;
    let ids: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    if ids.is_empty() {
        bail!("no gene ids found in {}", cli_args.ids.display());
    }
    cli::kv("Gene ids", &ids.len().to_string());

    eprintln!();

    // ── Query ────────────────────────────────────────────
    cli::section("BioMart Query");

    let query = GeneInfoQuery::new(&config.dataset, &ids)?;
    let path = biomart::fetch_gene_info(&config.host, &query, &cli_args.out)?;
    cli::success(&format!("wrote {}", path.display()));

    cli::print_elapsed(start);
    Ok(())
}
