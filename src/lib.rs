//! geneinfo: per-gene annotation lookup, region-of-interest ordering and table
//! enrichment from Ensembl BioMart gene information.

pub mod error;

pub mod biomart;
pub mod chromosome;
pub mod cli;
pub mod config;
pub mod gene_info;
pub mod metadata;
pub mod pipeline;
pub mod roi;
pub mod strand;
pub mod table;
