pub mod sort;

pub use sort::{SortKey, SortOrder};

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::codec::{self, DEFAULT_DELIMITER};
use crate::error::Result;
use crate::table::{Row, Table};

/// A delimited file loaded into memory and kept in sync with disk.
///
/// Every mutating call builds the new table on the side, writes it out, and
/// only then swaps it in. A failed call leaves both the file and the
/// in-memory table as they were.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    delimiter: u8,
    table: Table,
}

impl RecordStore {
    /// Open an existing comma-delimited file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, DEFAULT_DELIMITER)
    }

    #[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
    pub fn open_with<P: AsRef<Path>>(path: P, delimiter: char) -> Result<Self> {
        let delimiter = codec::delimiter_byte(delimiter)?;
        let path = path.as_ref().to_path_buf();
        let table = codec::read_table(&path, delimiter)?;
        debug!(rows = table.len(), columns = table.width(), "loaded");
        Ok(Self {
            path,
            delimiter,
            table,
        })
    }

    /// Write a header-only file at `path` (replacing any existing one) and bind to it.
    pub fn create<P, I, S>(path: P, header: I) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::create_with(path, header, DEFAULT_DELIMITER)
    }

    pub fn create_with<P, I, S>(path: P, header: I, delimiter: char) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let delimiter = codec::delimiter_byte(delimiter)?;
        let table = Table::new(header)?;
        let path = path.as_ref().to_path_buf();
        codec::write_table(&path, &table, delimiter)?;
        info!(path = %path.display(), columns = table.width(), "created");
        Ok(Self {
            path,
            delimiter,
            table,
        })
    }

    /// Re-read the bound file, discarding the in-memory table.
    pub fn reload(&mut self) -> Result<()> {
        let table = codec::read_table(&self.path, self.delimiter)?;
        info!(path = %self.path.display(), rows = table.len(), "reloaded");
        self.table = table;
        Ok(())
    }

    /// Rewrite the bound file from the in-memory table.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn save(&self) -> Result<()> {
        codec::write_table(&self.path, &self.table, self.delimiter)?;
        debug!(rows = self.table.len(), "saved");
        Ok(())
    }

    /// Write the current table to another path; the binding is unchanged.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        codec::write_table(path, &self.table, self.delimiter)?;
        debug!(path = %path.display(), rows = self.table.len(), "saved copy");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &[String] {
        self.table.header()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.table.row(index)
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.table.rows()
    }

    /// All rows whose `column` equals `value`, in table order.
    pub fn search_column(&self, column: &str, value: &str) -> Result<Vec<Row<'_>>> {
        let index = self.table.column_index(column)?;
        Ok(self
            .table
            .rows()
            .filter(|row| row.values()[index] == value)
            .collect())
    }

    /// First row whose `column` equals `value`.
    pub fn find_first(&self, column: &str, value: &str) -> Result<Option<Row<'_>>> {
        let index = self.table.column_index(column)?;
        Ok(self.table.rows().find(|row| row.values()[index] == value))
    }

    /// Remove every row whose `column` equals `value`; returns the number removed.
    pub fn delete_where(&mut self, column: &str, value: &str) -> Result<usize> {
        let index = self.table.column_index(column)?;
        let mut next = self.table.clone();
        let removed = next.remove_matching(index, value);
        self.commit(next)?;
        info!(column, value, removed, "deleted rows");
        Ok(removed)
    }

    /// Stable in-place sort by `column`.
    pub fn sort_by(&mut self, column: &str, order: SortOrder) -> Result<()> {
        let index = self.table.column_index(column)?;
        let perm = sort::sorted_indices(self.table.raw_rows(), index, column, order)?;
        let rows = perm
            .into_iter()
            .map(|i| self.table.raw_rows()[i].clone())
            .collect();
        let next = Table::from_parts(self.table.header().to_vec(), rows)?;
        self.commit(next)?;
        debug!(column, ?order, "sorted");
        Ok(())
    }

    /// Append one row given its values in header order.
    pub fn append_row<I, S>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = self.table.clone();
        next.push_row(values.into_iter().map(Into::into).collect())?;
        self.commit(next)?;
        debug!(rows = self.table.len(), "appended row");
        Ok(())
    }

    /// Replace `old` with `new` in `column` wherever it appears.
    ///
    /// Returns the number of cells changed; the file is only rewritten when
    /// that number is non-zero.
    pub fn replace_value(&mut self, column: &str, old: &str, new: &str) -> Result<usize> {
        let index = self.table.column_index(column)?;
        let mut next = self.table.clone();
        let updated = next.update_matching(index, old, index, new);
        if updated > 0 {
            self.commit(next)?;
            info!(column, updated, "replaced values");
        }
        Ok(updated)
    }

    /// Persist `next` and make it the current table.
    pub(crate) fn commit(&mut self, next: Table) -> Result<()> {
        codec::write_table(&self.path, &next, self.delimiter)?;
        self.table = next;
        Ok(())
    }
}
