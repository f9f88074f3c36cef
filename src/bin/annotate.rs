use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;

use geneinfo::cli;
use geneinfo::config::AnnotateConfig;
use geneinfo::pipeline::{annotate_from_file, build_add_metadata};
use geneinfo::roi::{build_roi, write_roi};
use geneinfo::table::Table;

#[derive(Parser)]
#[command(
    name = "annotate",
    about = "Append gene metadata to a table and derive ordered regions of interest"
)]
struct Cli {
    /// Gene information TSV (optionally gzipped) from fetch_gene_info; when
    /// omitted it is fetched from BioMart using the configuration
    #[arg(short = 'g', long = "gene-info")]
    gene_info: Option<PathBuf>,

    /// Tab-separated table to annotate
    #[arg(short = 't', long = "table")]
    table: PathBuf,

    /// Output path for the annotated table
    #[arg(short = 'o', long = "out")]
    out: PathBuf,

    /// Optional JSON configuration file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Identifier column (overrides the configuration)
    #[arg(long = "id-column")]
    id_column: Option<String>,

    /// Drop rows without complete gene metadata
    #[arg(long = "drop-empty-rows")]
    drop_empty_rows: bool,

    /// Also write regions of interest to this path
    #[arg(long = "roi")]
    roi: Option<PathBuf>,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();

    cli::banner("Annotate");

    // ── Configuration ────────────────────────────────────
    cli::section("Configuration");

    let config = cli_args
        .config
        .as_deref()
        .map(AnnotateConfig::from_file)
        .transpose()?;
    let id_column = cli_args
        .id_column
        .clone()
        .or_else(|| config.as_ref().map(|c| c.id_column.clone()))
        .unwrap_or_else(|| "id".to_string());
    let drop_empty_rows =
        cli_args.drop_empty_rows || config.as_ref().is_some_and(|c| c.drop_empty_rows);

    match &cli_args.gene_info {
        Some(path) => cli::kv("Gene info", &path.display().to_string()),
        None => cli::kv("Gene info", "BioMart"),
    }
    cli::kv("Table", &cli_args.table.display().to_string());
    cli::kv("Id column", &id_column);
    cli::kv("Drop empty rows", &drop_empty_rows.to_string());

    eprintln!();

    let table = Table::from_path(&cli_args.table)
        .with_context(|| format!("failed to read table: {}", cli_args.table.display()))?;
    let input_rows = table.len();
    let annotated = match (&cli_args.gene_info, config) {
        (Some(gene_info), _) => annotate_from_file(table, gene_info, &id_column, drop_empty_rows)
            .with_context(|| format!("failed to annotate from {}", gene_info.display()))?,
        (None, Some(config)) => {
            let config = AnnotateConfig {
                id_column,
                drop_empty_rows,
                ..config
            };
            let output_dir = cli_args
                .out
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            build_add_metadata(table, &config, output_dir)?
        }
        (None, None) => bail!("either --gene-info or --config is required"),
    };

    // ── Gene Annotations ─────────────────────────────────
    cli::section("Gene Annotations");
    cli::print_build_summary(&annotated.summary);

    eprintln!();

    // ── Metadata ─────────────────────────────────────────
    cli::section("Metadata");

    annotated
        .table
        .to_path(&cli_args.out)
        .with_context(|| format!("failed to write {}", cli_args.out.display()))?;

    cli::kv(
        "Rows",
        &format!("{input_rows} in, {} out", annotated.table.len()),
    );
    cli::success(&format!("wrote {}", cli_args.out.display()));

    // ── Regions of Interest ──────────────────────────────
    if let Some(roi_path) = &cli_args.roi {
        eprintln!();
        cli::section("Regions of Interest");

        let regions = build_roi(&annotated.annotations);
        let file = File::create(roi_path)
            .with_context(|| format!("failed to create {}", roi_path.display()))?;
        write_roi(BufWriter::new(file), &regions)?;

        cli::kv("Regions", &regions.len().to_string());
        cli::success(&format!("wrote {}", roi_path.display()));
    }

    cli::print_elapsed(start);
    Ok(())
}
