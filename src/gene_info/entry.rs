//! Gene information data structures for parsed rows and stored records.

use crate::strand::Strand;

/// One parsed row of a gene information table, before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    /// Gene symbol, the aggregation key.
    pub gene_id: String,
    /// Ensembl accession that resolves to `gene_id`.
    pub external_id: String,
    /// Normalized chromosome label, e.g. "chr1".
    pub chromosome: String,
    /// GC content in percent.
    pub gc_content: f64,
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
    /// Valid GO codes on this row, deduplicated, in field order.
    pub go_terms: Vec<u32>,
    /// Entrez gene id, `None` when the column is empty.
    pub cross_reference: Option<String>,
}

/// The canonical record for one gene.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneRecord {
    pub id: String,
    pub chromosome: String,
    pub gc_content: f64,
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
    pub go_terms: Vec<u32>,
    pub cross_reference: Option<String>,
}

impl GeneRecord {
    /// Position used to order the gene against other intervals: the transcription
    /// start site, which is `end` on the reverse strand.
    #[must_use]
    pub fn anchor(&self) -> u64 {
        if self.strand.is_reverse() {
            self.end
        } else {
            self.start
        }
    }

    /// Appends GO codes that are not yet present, preserving first-seen order.
    pub(crate) fn merge_go_terms(&mut self, codes: &[u32]) -> usize {
        let mut added = 0;
        for &code in codes {
            if !self.go_terms.contains(&code) {
                self.go_terms.push(code);
                added += 1;
            }
        }
        added
    }
}

impl From<CandidateRecord> for GeneRecord {
    fn from(candidate: CandidateRecord) -> Self {
        Self {
            id: candidate.gene_id,
            chromosome: candidate.chromosome,
            gc_content: candidate.gc_content,
            start: candidate.start,
            end: candidate.end,
            strand: candidate.strand,
            go_terms: candidate.go_terms,
            cross_reference: candidate.cross_reference,
        }
    }
}

/// A row that could not be parsed. It is skipped and kept for the build summary.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedRow {
    /// 1-based line number in the source file (the header is line 1).
    pub line_number: usize,
    pub line: String,
    pub reason: String,
}

/// Result of reading a single line of the gene information table.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Record(Box<CandidateRecord>),
    Malformed(MalformedRow),
}
