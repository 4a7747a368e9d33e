use csv::ReaderBuilder;
use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::table::Table;

/// Read a delimited file into a `Table`.
///
/// - the first record is the header
/// - every later record must have exactly as many cells as the header,
///   otherwise the whole load fails with `Error::Malformed`
/// - a zero-byte file yields an empty table with an empty header
/// - blank lines are skipped
pub fn read_table(path: &Path, delimiter: u8) -> Result<Table> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::NotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })?;

    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut records = rdr.records();
    let header: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => {
            debug!(path = %path.display(), "empty file");
            return Ok(Table::default());
        }
    };

    let mut rows = Vec::new();
    for result in records {
        let record = result?;
        if record.len() != header.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            warn!(
                "{}: line {} has {} cells, header has {}",
                path.display(),
                line,
                record.len(),
                header.len()
            );
            return Err(Error::Malformed {
                line,
                expected: header.len(),
                found: record.len(),
            });
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Table::from_parts(header, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_reads_header_and_rows() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("people.csv");
        fs::write(&path, "name,age,city\nAlice,30,NYC\nBob,25,LA\n").unwrap();

        let table = read_table(&path, b',').unwrap();
        assert_eq!(table.header(), ["name", "age", "city"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.row(1).unwrap().get("city"), Some("LA"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("absent.csv");
        let err = read_table(&path, b',').unwrap_err();
        assert!(matches!(err, Error::NotFound { path: p } if p == path));
    }

    #[test]
    fn test_empty_and_header_only_files() {
        let tmp = tempdir().unwrap();
        let empty = tmp.path().join("empty.csv");
        fs::write(&empty, "").unwrap();
        let table = read_table(&empty, b',').unwrap();
        assert!(table.header().is_empty());
        assert!(table.is_empty());

        let header_only = tmp.path().join("header.csv");
        fs::write(&header_only, "id,name\n").unwrap();
        let table = read_table(&header_only, b',').unwrap();
        assert_eq!(table.header(), ["id", "name"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_ragged_row_is_rejected_with_line() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("ragged.csv");
        fs::write(&path, "a,b\n1,2\n3\n").unwrap();

        let err = read_table(&path, b',').unwrap_err();
        assert!(matches!(
            err,
            Error::Malformed {
                line: 3,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_quoted_cells_and_custom_delimiter() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("semi.csv");
        fs::write(&path, "name;note\nAlice;\"likes ; and \"\"quotes\"\"\"\n").unwrap();

        let table = read_table(&path, b';').unwrap();
        assert_eq!(
            table.row(0).unwrap().get("note"),
            Some("likes ; and \"quotes\"")
        );
    }
}
