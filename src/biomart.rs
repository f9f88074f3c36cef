//! Ensembl BioMart gene information query.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::metadata::strip_version;

pub const DEFAULT_HOST: &str = "http://www.ensembl.org";
pub const MART: &str = "ENSEMBL_MART_ENSEMBL";
pub const GENE_INFO_FILENAME: &str = "gene_info.tsv";

/// Attributes requested per gene, in gene information column order.
pub const GENE_INFO_ATTRIBUTES: [&str; 9] = [
    "ensembl_gene_id",
    "external_gene_name",
    "percentage_gene_gc_content",
    "chromosome_name",
    "start_position",
    "end_position",
    "strand",
    "go_id",
    "entrezgene_id",
];

const BUFFER_SIZE: usize = 64 * 1024;

/// A gene information query for one BioMart dataset.
#[derive(Debug, Clone)]
pub struct GeneInfoQuery {
    /// Dataset name, e.g. "hsapiens_gene_ensembl".
    pub dataset: String,
    /// Ensembl accessions with any version suffix removed.
    pub gene_ids: Vec<String>,
}

impl GeneInfoQuery {
    pub fn new<S: AsRef<str>>(dataset: &str, gene_ids: &[S]) -> Result<Self> {
        if gene_ids.is_empty() {
            bail!("gene information query needs at least one gene id");
        }
        Ok(Self {
            dataset: dataset.to_string(),
            gene_ids: gene_ids
                .iter()
                .map(|id| strip_version(id.as_ref().trim()).to_string())
                .collect(),
        })
    }

    /// The BioMart XML query: TSV with a header row, filtered on Ensembl accession.
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><!DOCTYPE Query>\
             <Query virtualSchemaName=\"default\" formatter=\"TSV\" header=\"1\" \
             uniqueRows=\"1\" datasetConfigVersion=\"0.6\">",
        );
        xml.push_str(&format!(
            "<Dataset name=\"{}\" interface=\"default\">",
            self.dataset
        ));
        xml.push_str(&format!(
            "<Filter name=\"link_ensembl_gene_id\" value=\"{}\"/>",
            self.gene_ids.join(",")
        ));
        for attribute in GENE_INFO_ATTRIBUTES {
            xml.push_str(&format!("<Attribute name=\"{attribute}\"/>"));
        }
        xml.push_str("</Dataset></Query>");
        xml
    }
}

/// The martservice endpoint for a host.
#[must_use]
pub fn martservice_url(host: &str) -> String {
    format!("{}/biomart/martservice", host.trim_end_matches('/'))
}

/// Run the query against `host` and stream the result to `<output_dir>/gene_info.tsv`.
pub fn fetch_gene_info(host: &str, query: &GeneInfoQuery, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    let dest = output_dir.join(GENE_INFO_FILENAME);

    let url = martservice_url(host);
    let mut response = ureq::get(&url)
        .query("query", query.to_xml())
        .call()
        .with_context(|| format!("BioMart request failed for {url}"))?;

    let file =
        File::create(&dest).with_context(|| format!("failed to create {}", dest.display()))?;
    let mut writer = BufWriter::new(file);
    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut reader = response.body_mut().as_reader();

    // BioMart reports query errors in a 200 response body.
    let mut first_chunk = true;
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        if first_chunk {
            check_response(&buffer[..n])?;
            first_chunk = false;
        }
        writer.write_all(&buffer[..n])?;
    }

    writer.flush()?;
    Ok(dest)
}

fn check_response(chunk: &[u8]) -> Result<()> {
    let text = String::from_utf8_lossy(chunk);
    let text = text.trim_start();
    if text.starts_with("Query ERROR") || text.starts_with("<html") {
        let first_line = text.lines().next().unwrap_or_default();
        bail!("BioMart returned an error: {first_line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_strips_versions() {
        let query =
            GeneInfoQuery::new("hsapiens_gene_ensembl", &["ENSG00000156575.3", " ENSG00000116745 "])
                .unwrap();
        assert_eq!(query.gene_ids, vec!["ENSG00000156575", "ENSG00000116745"]);
    }

    #[test]
    fn empty_query_is_rejected() {
        let ids: [&str; 0] = [];
        let err = GeneInfoQuery::new("hsapiens_gene_ensembl", &ids).unwrap_err();
        assert!(err.to_string().contains("at least one gene id"));
    }

    #[test]
    fn xml_lists_dataset_filter_and_attributes_in_order() {
        let query =
            GeneInfoQuery::new("hsapiens_gene_ensembl", &["ENSG00000156575", "ENSG00000116745"])
                .unwrap();
        let xml = query.to_xml();
        assert!(xml.contains("header=\"1\""));
        assert!(xml.contains("<Dataset name=\"hsapiens_gene_ensembl\""));
        assert!(xml.contains("value=\"ENSG00000156575,ENSG00000116745\""));

        let positions: Vec<usize> = GENE_INFO_ATTRIBUTES
            .iter()
            .map(|a| xml.find(&format!("\"{a}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn martservice_url_trims_slash() {
        assert_eq!(
            martservice_url("http://www.ensembl.org/"),
            "http://www.ensembl.org/biomart/martservice"
        );
    }

    #[test]
    fn error_body_is_detected() {
        assert!(check_response(b"Query ERROR: caught BioMart::Exception").is_err());
        assert!(check_response(b"Gene stable ID\tGene name\n").is_ok());
    }
}
