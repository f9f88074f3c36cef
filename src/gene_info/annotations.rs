//! The finished gene annotation store and its cross-reference index.

use std::collections::HashMap;

use super::entry::GeneRecord;

/// Maps an external identifier (Ensembl accession) to the gene id it was first
/// seen with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossReferenceIndex {
    external_to_gene: HashMap<String, String>,
}

impl CrossReferenceIndex {
    /// Registers a mapping. The first registration for an external id wins.
    pub(crate) fn register(&mut self, external_id: &str, gene_id: &str) {
        self.external_to_gene
            .entry(external_id.to_string())
            .or_insert_with(|| gene_id.to_string());
    }

    #[must_use]
    pub fn gene_id(&self, external_id: &str) -> Option<&str> {
        self.external_to_gene.get(external_id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.external_to_gene.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.external_to_gene.is_empty()
    }
}

/// One canonical record per gene id, in first-seen order, plus the cross-reference
/// index built alongside it. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneAnnotations {
    records: Vec<GeneRecord>,
    id_to_index: HashMap<String, usize>,
    cross_references: CrossReferenceIndex,
}

impl GeneAnnotations {
    pub(crate) fn from_parts(
        records: Vec<GeneRecord>,
        id_to_index: HashMap<String, usize>,
        cross_references: CrossReferenceIndex,
    ) -> Self {
        Self {
            records,
            id_to_index,
            cross_references,
        }
    }

    /// Looks up a record by gene id.
    #[must_use]
    pub fn get(&self, gene_id: &str) -> Option<&GeneRecord> {
        self.id_to_index.get(gene_id).map(|&i| &self.records[i])
    }

    /// Resolves an external identifier (without version suffix) to its record.
    #[must_use]
    pub fn resolve(&self, external_id: &str) -> Option<&GeneRecord> {
        self.cross_references
            .gene_id(external_id)
            .and_then(|gene_id| self.get(gene_id))
    }

    #[must_use]
    pub fn cross_references(&self) -> &CrossReferenceIndex {
        &self.cross_references
    }

    /// Records in the order their gene id was first seen.
    #[must_use]
    pub fn records(&self) -> &[GeneRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeneRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a GeneAnnotations {
    type Item = &'a GeneRecord;
    type IntoIter = std::slice::Iter<'a, GeneRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
