//! Chromosome label normalization.

use crate::error::Error;

/// Prefix prepended to every BioMart chromosome name.
pub const CHROMOSOME_PREFIX: &str = "chr";

/// Converts a BioMart `chromosome_name` ("1", "X", "MT") into a UCSC-style label.
///
/// The prefix is always prepended, so a name that already carries it is not
/// special-cased.
pub fn normalize_chromosome(name: &str) -> Result<String, Error> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation("empty chromosome name".to_string()));
    }
    Ok(format!("{CHROMOSOME_PREFIX}{name}"))
}
