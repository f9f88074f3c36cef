//! End-to-end annotation: gene information file (or BioMart query) to enriched table.

use std::path::Path;

use anyhow::{Context, Result};

use crate::biomart::{GeneInfoQuery, fetch_gene_info};
use crate::config::AnnotateConfig;
use crate::error::Error;
use crate::gene_info::annotations::GeneAnnotations;
use crate::gene_info::build_gene_annotations;
use crate::gene_info::builder::BuildSummary;
use crate::metadata::add_gene_metadata;
use crate::table::Table;

/// A table with metadata appended, plus the annotations that produced it.
#[derive(Debug)]
pub struct AnnotatedTable {
    pub table: Table,
    pub annotations: GeneAnnotations,
    pub summary: BuildSummary,
}

/// Build annotations from `gene_info` and append metadata columns to `table`.
pub fn annotate_from_file(
    table: Table,
    gene_info: &Path,
    id_column: &str,
    drop_empty_rows: bool,
) -> Result<AnnotatedTable, Error> {
    let (annotations, summary) = build_gene_annotations(gene_info)?;
    let table = add_gene_metadata(table, id_column, &annotations, drop_empty_rows)?;
    Ok(AnnotatedTable {
        table,
        annotations,
        summary,
    })
}

/// The BioMart query for every non-empty identifier in the table's id column.
pub fn gene_info_query(table: &Table, config: &AnnotateConfig) -> Result<GeneInfoQuery> {
    let ids: Vec<&str> = table
        .column(&config.id_column)
        .with_context(|| format!("table has no identifier column '{}'", config.id_column))?
        .flatten()
        .filter(|id| !id.trim().is_empty())
        .collect();
    GeneInfoQuery::new(&config.dataset, &ids)
        .with_context(|| format!("no identifiers in column '{}'", config.id_column))
}

/// Query BioMart for the identifiers in the table's id column, save the gene
/// information under `output_dir`, and annotate the table with it.
pub fn build_add_metadata(
    table: Table,
    config: &AnnotateConfig,
    output_dir: &Path,
) -> Result<AnnotatedTable> {
    let query = gene_info_query(&table, config)?;
    let gene_info = fetch_gene_info(&config.host, &query, output_dir)?;

    annotate_from_file(table, &gene_info, &config.id_column, config.drop_empty_rows)
        .with_context(|| format!("failed to annotate from {}", gene_info.display()))
}
