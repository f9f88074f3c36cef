//! In-memory tab-separated tables.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::Error;

/// A table of optional string cells. Empty cells are read as `None` and written
/// as empty fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Its length must match the number of columns.
    pub fn push_row(&mut self, row: Vec<Option<String>>) -> Result<(), Error> {
        if row.len() != self.columns.len() {
            return Err(Error::Validation(format!(
                "row has {} cells, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = Option<&str>>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[index].as_deref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Vec<Option<String>>>) {
        (self.columns, self.rows)
    }

    /// Read a tab-separated table whose first row names the columns.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let mut tsv = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(reader);

        let mut table = Self::new(tsv.headers()?.iter());
        for record in tsv.records() {
            let record = record?;
            let row = record
                .iter()
                .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                .collect();
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Err(Error::SourceNotFound(path.to_path_buf()));
        }
        Self::from_reader(File::open(path)?)
    }

    /// Write the table as tab-separated text with a header row.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut tsv = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);
        tsv.write_record(&self.columns)?;
        for row in &self.rows {
            tsv.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        }
        tsv.flush()?;
        Ok(())
    }

    pub fn to_path(&self, path: &Path) -> Result<(), Error> {
        self.to_writer(File::create(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_empty_cells_as_none() {
        let input = "id\tsample_1\tsample_2\nENSG1.2\t2.88\t\nENSG2\t\t1.5\n";
        let table = Table::from_reader(Cursor::new(input)).unwrap();

        assert_eq!(table.columns(), ["id", "sample_1", "sample_2"]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.rows()[0],
            vec![Some("ENSG1.2".to_string()), Some("2.88".to_string()), None]
        );
        let ids: Vec<_> = table.column("id").unwrap().collect();
        assert_eq!(ids, vec![Some("ENSG1.2"), Some("ENSG2")]);
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let input = "id\tsample_1\nENSG1\t1.0\t2.0\n";
        assert!(Table::from_reader(Cursor::new(input)).is_err());

        let mut table = Table::new(["a", "b"]);
        assert!(table.push_row(vec![None]).is_err());
        assert!(table.push_row(vec![None, Some("x".to_string())]).is_ok());
    }

    #[test]
    fn write_then_read_file() {
        let mut table = Table::new(["id", "value"]);
        table
            .push_row(vec![Some("g1".to_string()), None])
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        table.to_path(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "id\tvalue\ng1\t\n");
        assert_eq!(Table::from_path(&path).unwrap(), table);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Table::from_path(&dir.path().join("nope.tsv")).unwrap_err();
        assert!(matches!(err, Error::SourceNotFound(_)));
    }
}
