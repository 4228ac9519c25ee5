// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Table export.
//!
//! Accumulated per-frame feature vectors are transposed into named columns
//! and serialized as a delimited (CSV) table, one row per processed frame.

use std::path::Path;

use crate::error::Result;

/// Column-oriented output table.
///
/// Each column holds one value per processed frame, in frame order.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    headers: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl OutputTable {
    /// Build a table from row-major feature vectors.
    ///
    /// Output column `i` gathers the `i`-th element of every row. An empty
    /// row list produces empty columns. Every row must have exactly
    /// `headers.len()` elements; a mismatch is a caller contract error, not
    /// a runtime-recoverable condition.
    #[must_use]
    pub fn from_rows(headers: Vec<String>, rows: &[Vec<f64>]) -> Self {
        debug_assert!(
            rows.iter().all(|row| row.len() == headers.len()),
            "every feature vector must have one element per header"
        );

        let columns = (0..headers.len())
            .map(|i| rows.iter().map(|row| row[i]).collect())
            .collect();

        Self { headers, columns }
    }

    /// Column headers in output order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Columns in header order.
    #[must_use]
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    /// Number of rows (processed frames).
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Serialize the table as CSV to `path`.
    ///
    /// A pre-existing file at that path is overwritten. A zero-column table
    /// produces an empty file, since CSV has no representation for
    /// zero-field records.
    ///
    /// # Errors
    ///
    /// Write failures are surfaced to the caller; there is no retry and no
    /// partial-file cleanup.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if self.headers.is_empty() {
            std::fs::write(path, b"")?;
            return Ok(());
        }

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.headers)?;

        for row_idx in 0..self.num_rows() {
            writer.write_record(self.columns.iter().map(|col| col[row_idx].to_string()))?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers2() -> Vec<String> {
        vec!["root_x".to_string(), "root_y".to_string()]
    }

    #[test]
    fn test_transpose_is_true_transpose() {
        let rows = vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
        ];
        let headers = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let table = OutputTable::from_rows(headers, &rows);

        assert_eq!(table.columns()[0], vec![1.0, 4.0]);
        assert_eq!(table.columns()[1], vec![2.0, 5.0]);
        assert_eq!(table.columns()[2], vec![3.0, 6.0]);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_columns(), 3);
    }

    #[test]
    fn test_empty_rows_give_empty_columns() {
        let table = OutputTable::from_rows(headers2(), &[]);
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.num_rows(), 0);
        assert!(table.columns().iter().all(Vec::is_empty));
    }

    #[test]
    fn test_write_csv() {
        let rows = vec![vec![0.0, -0.2], vec![0.1, -0.3]];
        let table = OutputTable::from_rows(headers2(), &rows);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("joints.csv");
        table.write_csv(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "root_x,root_y");
        assert_eq!(lines[1], "0,-0.2");
        assert_eq!(lines[2], "0.1,-0.3");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_write_csv_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("joints.csv");
        std::fs::write(&path, "stale contents").unwrap();

        let table = OutputTable::from_rows(headers2(), &[vec![1.0, 2.0]]);
        table.write_csv(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("root_x,root_y"));
        assert!(!contents.contains("stale"));
    }

    #[test]
    fn test_zero_column_table_writes_empty_file() {
        let table = OutputTable::from_rows(Vec::new(), &[]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        table.write_csv(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
