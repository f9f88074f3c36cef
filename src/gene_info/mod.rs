//! Gene information parser: converts a BioMart gene table into per-gene annotations.

pub mod annotations;
pub mod builder;
pub mod entry;
pub mod parser;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::Error;

use annotations::GeneAnnotations;
use builder::BuildSummary;
use entry::{MalformedRow, ParsedLine};

/// Lazily parses gene information rows, skipping the header line.
///
/// Malformed rows, including rows that are not valid UTF-8, are yielded as
/// [`ParsedLine::Malformed`] so ingestion continues; only I/O errors are yielded
/// as `Err`.
pub struct GeneInfoReader<R> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> GeneInfoReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line_number: 0,
        }
    }

    fn malformed(&self, line: String, reason: String) -> ParsedLine {
        ParsedLine::Malformed(MalformedRow {
            line_number: self.line_number,
            line,
            reason,
        })
    }
}

impl<R: BufRead> Iterator for GeneInfoReader<R> {
    type Item = Result<ParsedLine, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_number += 1;
            if self.line_number == 1 {
                continue;
            }

            let bytes = trim_line_ending(&self.buffer);
            let line = match String::from_utf8(bytes.to_vec()) {
                Ok(line) => line,
                Err(e) => {
                    let line = String::from_utf8_lossy(bytes).into_owned();
                    return Some(Ok(self.malformed(line, format!("invalid UTF-8: {e}"))));
                }
            };

            match parser::parse_line(&line) {
                Ok(Some(record)) => return Some(Ok(ParsedLine::Record(Box::new(record)))),
                Ok(None) => continue,
                Err(e) => return Some(Ok(self.malformed(line, e.to_string()))),
            }
        }
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Open a gene information file, gunzipping it when the name ends in `.gz`.
///
/// A missing file is reported as [`Error::SourceNotFound`] before anything is read.
pub fn open_gene_info(path: &Path) -> Result<GeneInfoReader<Box<dyn BufRead>>, Error> {
    if !path.exists() {
        return Err(Error::SourceNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let reader: Box<dyn BufRead> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(GeneInfoReader::new(reader))
}

/// Parse gene information from a buffered reader.
pub fn parse_gene_info<R: BufRead>(reader: R) -> Result<(GeneAnnotations, BuildSummary), Error> {
    GeneAnnotations::from_lines(GeneInfoReader::new(reader))
}

/// Build gene annotations from a gene information file.
pub fn build_gene_annotations(path: &Path) -> Result<(GeneAnnotations, BuildSummary), Error> {
    GeneAnnotations::from_lines(open_gene_info(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use tempfile::Builder;

    const HEADER: &str = "Gene stable ID\tGene name\tGene % GC content\tChromosome/scaffold name\tGene start (bp)\tGene end (bp)\tStrand\tGO term accession\tNCBI gene (formerly Entrezgene) ID\n";

    fn table(rows: &[&str]) -> String {
        let mut s = HEADER.to_string();
        for row in rows {
            s.push_str(row);
            s.push('\n');
        }
        s
    }

    #[test]
    fn worked_example() {
        let input = table(&[
            "ENSG0001\tA\t45.2\t1\t100\t200\t1\tGO:0001\t1234",
            "ENSG0001\tA\t45.2\t1\t100\t200\t1\tGO:0002\t1234",
            "ENSG0001\tA\t45.2\t1\t100\t250\t1\tGO:0003\t1234",
        ]);
        let (annotations, summary) = parse_gene_info(Cursor::new(input)).unwrap();

        let a = annotations.get("A").unwrap();
        assert_eq!(a.chromosome, "chr1");
        assert_eq!(a.go_terms, vec![1, 2]);
        assert_eq!(a.end, 200);
        assert_eq!(summary.genes, 1);
        assert_eq!(summary.end_conflicts, 1);
        assert_eq!(summary.chromosome_conflicts, 0);
        assert_eq!(summary.start_conflicts, 0);
        assert_eq!(summary.strand_conflicts, 0);
        assert_eq!(annotations.cross_references().gene_id("ENSG0001"), Some("A"));
    }

    #[test]
    fn malformed_rows_are_skipped_and_reported() {
        let input = table(&[
            "ENSG0001\tA\t45.2\t1\t100\t200\t1\tGO:0001\t1234",
            "ENSG0002\tB\tnot_a_number\t1\t100\t200\t1\t\t",
            "ENSG0003\tC",
            "",
            "ENSG0004\tD\t50.0\t2\t300\t400\t-1\t\tNA",
        ]);
        let (annotations, summary) = parse_gene_info(Cursor::new(input)).unwrap();

        assert_eq!(annotations.len(), 2);
        assert!(annotations.get("B").is_none());
        assert_eq!(summary.malformed.len(), 2);
        assert_eq!(summary.malformed_count, 2);
        assert_eq!(summary.malformed[0].line_number, 3);
        assert!(summary.malformed[0].line.contains("not_a_number"));
        assert!(summary.malformed[0].reason.contains("GC content"));
        assert_eq!(summary.malformed[1].line_number, 4);
        assert_eq!(summary.rows, 4);
    }

    #[test]
    fn invalid_utf8_row_is_malformed_not_fatal() {
        let mut input = table(&["ENSG0001\tA\t45.2\t1\t100\t200\t1\tGO:0001\t1234"]).into_bytes();
        input.extend_from_slice(b"ENSG0002\tB\xff\t45.2\t1\t300\t400\t1\t\t\r\n");
        input.extend_from_slice(b"ENSG0003\tC\t45.2\t2\t500\t600\t-1\t\t\n");

        let (annotations, summary) = parse_gene_info(Cursor::new(input)).unwrap();
        assert_eq!(annotations.len(), 2);
        assert!(annotations.get("A").is_some());
        assert!(annotations.get("C").is_some());
        assert_eq!(summary.malformed_count, 1);
        let row = &summary.malformed[0];
        assert_eq!(row.line_number, 3);
        assert!(row.line.starts_with("ENSG0002\tB\u{FFFD}"));
        assert!(!row.line.ends_with('\r'));
        assert!(row.reason.contains("UTF-8"));
    }

    #[test]
    fn out_of_range_strand_is_malformed_not_merged() {
        let input = table(&[
            "ENSG0001\tA\t45.2\t1\t100\t200\t1\tGO:0001\t",
            "ENSG0001\tA\t45.2\t1\t100\t200\t2\tGO:0002\t",
            "ENSG0002\tB\t45.2\t1\t300\t400\t0\t\t",
        ]);
        let (annotations, summary) = parse_gene_info(Cursor::new(input)).unwrap();
        assert_eq!(annotations.get("A").unwrap().go_terms, vec![1]);
        assert!(annotations.get("B").is_none());
        assert_eq!(summary.strand_conflicts, 0);
        assert_eq!(summary.malformed_count, 2);
        assert!(summary.malformed[0].reason.contains("invalid strand 2"));
    }

    #[test]
    fn empty_chromosome_row_is_malformed() {
        // Never stored under a bare "chr" label.
        let input = table(&[
            "ENSG0001\tA\t45.2\t\t100\t200\t1\t\t",
            "ENSG0002\tB\t45.2\t1\t100\t200\t1\t\t",
        ]);
        let (annotations, summary) = parse_gene_info(Cursor::new(input)).unwrap();
        assert!(annotations.get("A").is_none());
        assert!(annotations.iter().all(|r| r.chromosome != "chr"));
        assert_eq!(summary.malformed_count, 1);
        assert!(summary.malformed[0].reason.contains("chromosome"));
    }

    #[test]
    fn header_only_and_empty_inputs() {
        let (annotations, summary) = parse_gene_info(Cursor::new(HEADER)).unwrap();
        assert!(annotations.is_empty());
        assert_eq!(summary, BuildSummary::default());

        let (annotations, _) = parse_gene_info(Cursor::new("")).unwrap();
        assert!(annotations.is_empty());
    }

    #[test]
    fn header_is_skipped_even_if_it_looks_like_data() {
        let input = "ENSG0001\tA\t45.2\t1\t100\t200\t1\t\t\nENSG0002\tB\t45.2\t1\t100\t200\t1\t\t\n";
        let (annotations, _) = parse_gene_info(Cursor::new(input)).unwrap();
        assert!(annotations.get("A").is_none());
        assert!(annotations.get("B").is_some());
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let input = table(&[
            "ENSG0002\tB\t40.0\t2\t500\t900\t-1\tGO:0010\t",
            "ENSG0001\tA\t45.2\t1\t100\t200\t1\tGO:0001\t1234",
            "ENSG0001\tA\t45.2\tX\t100\t200\t1\tGO:0002\t1234",
            "ENSG0002\tB\t40.0\t2\t500\t900\t-1\tGO:0011\t",
        ]);
        let first = parse_gene_info(Cursor::new(input.clone())).unwrap();
        let second = parse_gene_info(Cursor::new(input)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.1.chromosome_conflicts, 1);
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gene_info.tsv");
        let err = build_gene_annotations(&path).unwrap_err();
        assert!(matches!(err, Error::SourceNotFound(p) if p == path));
    }

    #[test]
    fn reads_plain_and_gzipped_files() {
        let input = table(&["ENSG0001\tA\t45.2\t1\t100\t200\t1\tGO:0001\t1234"]);

        let mut plain = Builder::new().suffix(".tsv").tempfile().unwrap();
        plain.write_all(input.as_bytes()).unwrap();
        let (annotations, _) = build_gene_annotations(plain.path()).unwrap();
        assert_eq!(annotations.len(), 1);

        let mut gz = Builder::new().suffix(".tsv.gz").tempfile().unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(input.as_bytes()).unwrap();
        gz.write_all(&encoder.finish().unwrap()).unwrap();
        let (annotations, _) = build_gene_annotations(gz.path()).unwrap();
        assert_eq!(annotations.get("A").unwrap().go_terms, vec![1]);
    }
}
