//! Folds parsed rows into one canonical record per gene id.

use std::collections::HashMap;
use std::fmt;

use crate::error::Error;

use super::annotations::{CrossReferenceIndex, GeneAnnotations};
use super::entry::{CandidateRecord, GeneRecord, MalformedRow, ParsedLine};

/// Which stored field a repeated gene row disagreed on. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    Chromosome,
    Start,
    End,
    Strand,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Chromosome => "chromosome",
            Self::Start => "start",
            Self::End => "end",
            Self::Strand => "strand",
        };
        f.write_str(name)
    }
}

/// What happened to a single candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// First sight of the gene id: a record was created.
    Created,
    /// All coordinates agreed; this many new GO codes were appended.
    Merged(usize),
    /// The row disagreed with the stored record and was discarded.
    Conflict(ConflictKind),
}

/// Malformed rows kept verbatim in a [`BuildSummary`]; later ones are only counted.
pub const MALFORMED_SAMPLE_SIZE: usize = 10;

/// Diagnostic counts for a build. Conflicts and malformed rows never fail a build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildSummary {
    pub genes: usize,
    pub rows: usize,
    pub chromosome_conflicts: usize,
    pub start_conflicts: usize,
    pub end_conflicts: usize,
    pub strand_conflicts: usize,
    pub malformed_count: usize,
    /// The first [`MALFORMED_SAMPLE_SIZE`] malformed rows.
    pub malformed: Vec<MalformedRow>,
}

impl BuildSummary {
    #[must_use]
    pub fn conflicts(&self, kind: ConflictKind) -> usize {
        match kind {
            ConflictKind::Chromosome => self.chromosome_conflicts,
            ConflictKind::Start => self.start_conflicts,
            ConflictKind::End => self.end_conflicts,
            ConflictKind::Strand => self.strand_conflicts,
        }
    }

    #[must_use]
    pub fn total_conflicts(&self) -> usize {
        self.chromosome_conflicts + self.start_conflicts + self.end_conflicts + self.strand_conflicts
    }

    fn record_conflict(&mut self, kind: ConflictKind) {
        let counter = match kind {
            ConflictKind::Chromosome => &mut self.chromosome_conflicts,
            ConflictKind::Start => &mut self.start_conflicts,
            ConflictKind::End => &mut self.end_conflicts,
            ConflictKind::Strand => &mut self.strand_conflicts,
        };
        *counter += 1;
    }

    fn record_malformed(&mut self, row: MalformedRow) {
        self.malformed_count += 1;
        if self.malformed.len() < MALFORMED_SAMPLE_SIZE {
            self.malformed.push(row);
        }
    }
}

/// Accumulates candidate records into gene annotations.
pub struct AnnotationBuilder {
    /// Stored records in first-seen order.
    records: Vec<GeneRecord>,
    /// Gene id → index in `records`.
    id_to_index: HashMap<String, usize>,
    cross_references: CrossReferenceIndex,
    summary: BuildSummary,
}

impl Default for AnnotationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            id_to_index: HashMap::new(),
            cross_references: CrossReferenceIndex::default(),
            summary: BuildSummary::default(),
        }
    }

    /// Add one parsed line. Malformed lines are counted and sampled for the summary.
    pub fn add(&mut self, line: ParsedLine) {
        match line {
            ParsedLine::Record(candidate) => {
                self.add_record(*candidate);
            }
            ParsedLine::Malformed(row) => {
                self.summary.rows += 1;
                self.summary.record_malformed(row);
            }
        }
    }

    /// Merge a candidate into the store.
    pub fn add_record(&mut self, candidate: CandidateRecord) -> RowOutcome {
        self.summary.rows += 1;

        let Some(index) = self.id_to_index.get(&candidate.gene_id).copied() else {
            self.cross_references
                .register(&candidate.external_id, &candidate.gene_id);
            self.id_to_index
                .insert(candidate.gene_id.clone(), self.records.len());
            self.records.push(GeneRecord::from(candidate));
            return RowOutcome::Created;
        };

        let stored = &mut self.records[index];
        match find_conflict(stored, &candidate) {
            Some(kind) => {
                self.summary.record_conflict(kind);
                RowOutcome::Conflict(kind)
            }
            None => RowOutcome::Merged(stored.merge_go_terms(&candidate.go_terms)),
        }
    }

    /// Finish the build.
    pub fn build(self) -> (GeneAnnotations, BuildSummary) {
        let mut summary = self.summary;
        summary.genes = self.records.len();
        let annotations =
            GeneAnnotations::from_parts(self.records, self.id_to_index, self.cross_references);
        (annotations, summary)
    }
}

/// First field, in cascade order, on which the candidate disagrees with the stored record.
fn find_conflict(stored: &GeneRecord, candidate: &CandidateRecord) -> Option<ConflictKind> {
    if stored.chromosome != candidate.chromosome {
        Some(ConflictKind::Chromosome)
    } else if stored.start != candidate.start {
        Some(ConflictKind::Start)
    } else if stored.end != candidate.end {
        Some(ConflictKind::End)
    } else if stored.strand != candidate.strand {
        Some(ConflictKind::Strand)
    } else {
        None
    }
}

impl GeneAnnotations {
    /// Fold a sequence of parsed lines into annotations. Only I/O errors from the
    /// sequence abort the build.
    pub fn from_lines<I>(lines: I) -> Result<(Self, BuildSummary), Error>
    where
        I: IntoIterator<Item = Result<ParsedLine, Error>>,
    {
        let builder = lines
            .into_iter()
            .try_fold(AnnotationBuilder::new(), |mut builder, line| {
                builder.add(line?);
                Ok::<_, Error>(builder)
            })?;
        Ok(builder.build())
    }
}
