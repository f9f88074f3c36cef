//! Regions of interest: genes ordered by chromosome and transcription start site.
//!
//! Peak files are sorted the same way, so a caller can walk peaks and regions in
//! lock-step without random access.

use std::io::Write;

use crate::error::Error;
use crate::gene_info::annotations::GeneAnnotations;
use crate::gene_info::entry::GeneRecord;

/// A gene together with the coordinate it is ordered by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionOfInterest<'a> {
    pub gene: &'a GeneRecord,
    /// `end` for reverse-strand genes, `start` otherwise.
    pub anchor: u64,
}

impl<'a> From<&'a GeneRecord> for RegionOfInterest<'a> {
    fn from(gene: &'a GeneRecord) -> Self {
        Self {
            gene,
            anchor: gene.anchor(),
        }
    }
}

/// Orders genes by chromosome label (lexicographic), then anchor.
///
/// Genes sharing a chromosome and anchor stay in the order their id was first seen
/// in the gene information table, so repeated calls give identical output.
#[must_use]
pub fn build_roi(annotations: &GeneAnnotations) -> Vec<RegionOfInterest<'_>> {
    let mut regions: Vec<RegionOfInterest<'_>> =
        annotations.iter().map(RegionOfInterest::from).collect();
    // Stable sort: ties keep store order.
    regions.sort_by(|a, b| {
        a.gene
            .chromosome
            .cmp(&b.gene.chromosome)
            .then(a.anchor.cmp(&b.anchor))
    });
    regions
}

/// Write regions as a tab-separated table with a header row.
pub fn write_roi<W: Write>(writer: W, regions: &[RegionOfInterest<'_>]) -> Result<(), Error> {
    let mut tsv = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);
    tsv.write_record(["chromosome", "anchor", "start", "end", "strand", "gene_id"])?;
    for region in regions {
        let gene = region.gene;
        tsv.write_record([
            gene.chromosome.clone(),
            region.anchor.to_string(),
            gene.start.to_string(),
            gene.end.to_string(),
            gene.strand.to_string(),
            gene.id.clone(),
        ])?;
    }
    tsv.flush()?;
    Ok(())
}
