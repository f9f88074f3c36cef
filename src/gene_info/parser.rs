//! Gene information line and GO term parser.

use crate::chromosome::normalize_chromosome;
use crate::error::Error;
use crate::strand::Strand;

use super::entry::CandidateRecord;

/// Number of columns requested from BioMart.
pub const NUM_COLUMNS: usize = 9;

const EXTERNAL_ID_COLUMN: usize = 0;
const GENE_ID_COLUMN: usize = 1;
const GC_COLUMN: usize = 2;
const CHROMOSOME_COLUMN: usize = 3;
const START_COLUMN: usize = 4;
const END_COLUMN: usize = 5;
const STRAND_COLUMN: usize = 6;
const GO_COLUMN: usize = 7;
const CROSS_REFERENCE_COLUMN: usize = 8;

/// Parse one data line. Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<CandidateRecord>, Error> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let columns: Vec<&str> = line.split('\t').map(str::trim).collect();
    if columns.len() < NUM_COLUMNS {
        return Err(Error::Parse(format!(
            "gene information line has {} columns, expected {NUM_COLUMNS}",
            columns.len()
        )));
    }

    let go_terms = parse_go_terms(columns[GO_COLUMN])?;
    let chromosome = normalize_chromosome(columns[CHROMOSOME_COLUMN])?;

    let gc_content: f64 = columns[GC_COLUMN].parse().map_err(|e| {
        Error::Parse(format!("invalid GC content '{}': {e}", columns[GC_COLUMN]))
    })?;
    let start: u64 = columns[START_COLUMN]
        .parse()
        .map_err(|e| Error::Parse(format!("invalid start '{}': {e}", columns[START_COLUMN])))?;
    let end: u64 = columns[END_COLUMN]
        .parse()
        .map_err(|e| Error::Parse(format!("invalid end '{}': {e}", columns[END_COLUMN])))?;
    let strand: Strand = columns[STRAND_COLUMN].parse()?;

    let cross_reference = match columns[CROSS_REFERENCE_COLUMN] {
        "" => None,
        code => Some(code.to_string()),
    };

    Ok(Some(CandidateRecord {
        gene_id: columns[GENE_ID_COLUMN].to_string(),
        external_id: columns[EXTERNAL_ID_COLUMN].to_string(),
        chromosome,
        gc_content,
        start,
        end,
        strand,
        go_terms,
        cross_reference,
    }))
}

/// Parse a GO field into numeric codes.
///
/// Multiple terms may be comma- or pipe-separated; commas are re-encoded as pipes
/// so the field never collides with a column separator. Terms without a colon or
/// without the literal "GO" are not GO references and are ignored. A GO reference
/// whose code is not numeric is an error.
pub fn parse_go_terms(field: &str) -> Result<Vec<u32>, Error> {
    let field = field.replace(',', "|");
    let mut codes = Vec::new();
    for term in field.split('|') {
        match parse_go_term(term.trim())? {
            Some(code) if !codes.contains(&code) => codes.push(code),
            _ => {}
        }
    }
    Ok(codes)
}

fn parse_go_term(term: &str) -> Result<Option<u32>, Error> {
    let parts: Vec<&str> = term.split(':').collect();
    if parts.len() < 2 || !term.contains("GO") {
        return Ok(None);
    }
    let code = parts[1]
        .parse()
        .map_err(|e| Error::Parse(format!("invalid GO term '{term}': {e}")))?;
    Ok(Some(code))
}
