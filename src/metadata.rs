//! Appends per-gene metadata columns to a table keyed by Ensembl accession.

use crate::error::Error;
use crate::gene_info::annotations::GeneAnnotations;
use crate::gene_info::entry::GeneRecord;
use crate::table::Table;

/// Names of the appended columns, in order.
pub const METADATA_COLUMNS: [&str; 4] = ["gene_id", "gc", "go_terms", "ncbi"];

/// Value stored by BioMart when a gene has no Entrez id.
const MISSING_CROSS_REFERENCE: &str = "NA";

/// Strips a version suffix: "ENSG00000156575.3" becomes "ENSG00000156575".
#[must_use]
pub fn strip_version(id: &str) -> &str {
    id.split('.').next().unwrap_or(id)
}

/// GO codes joined with pipes, e.g. "5615|5576".
#[must_use]
pub fn format_go_terms(codes: &[u32]) -> String {
    codes
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join("|")
}

/// The four derived cells for one gene.
fn metadata_cells(gene: &GeneRecord) -> [Option<String>; 4] {
    let cross_reference = gene
        .cross_reference
        .as_deref()
        .filter(|code| *code != MISSING_CROSS_REFERENCE)
        .map(str::to_string);
    [
        Some(gene.id.clone()),
        Some(gene.gc_content.to_string()),
        Some(format_go_terms(&gene.go_terms)),
        cross_reference,
    ]
}

/// Returns `table` with [`METADATA_COLUMNS`] appended.
///
/// Identifiers in `id_column` are looked up without their version suffix. Rows
/// whose identifier does not resolve get absent cells in every derived column.
/// With `drop_empty_rows`, rows with any absent derived cell are removed.
pub fn add_gene_metadata(
    table: Table,
    id_column: &str,
    annotations: &GeneAnnotations,
    drop_empty_rows: bool,
) -> Result<Table, Error> {
    let id_index = table.column_index(id_column).ok_or_else(|| {
        Error::Validation(format!("table has no identifier column '{id_column}'"))
    })?;

    let (columns, rows) = table.into_parts();
    let mut annotated = Table::new(columns.into_iter().chain(METADATA_COLUMNS.map(String::from)));

    for mut row in rows {
        let gene = row[id_index]
            .as_deref()
            .and_then(|id| annotations.resolve(strip_version(id)));
        let cells = gene.map_or_else(Default::default, metadata_cells);

        if drop_empty_rows && cells.iter().any(Option::is_none) {
            continue;
        }
        row.extend(cells);
        annotated.push_row(row)?;
    }

    Ok(annotated)
}
