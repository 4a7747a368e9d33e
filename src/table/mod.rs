mod row;

pub use row::Row;

use std::collections::HashSet;

use crate::error::{Error, Result};

/// In-memory table: an ordered header plus rows of cells in header order.
///
/// Every row has exactly `header.len()` cells. All mutating methods keep that
/// invariant and reject input that would break it, leaving `self` untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Empty table with the given header.
    pub fn new<I, S>(header: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_parts(header.into_iter().map(Into::into).collect(), Vec::new())
    }

    /// Build from a header and raw rows, validating names and row widths.
    pub fn from_parts(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let table = Self { header, rows };
        table.validate()?;
        Ok(table)
    }

    /// Check that header names are unique and every row matches the header width.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.header.len());
        for name in &self.header {
            if !seen.insert(name.as_str()) {
                return Err(Error::DuplicateColumn(name.clone()));
            }
        }
        for row in &self.rows {
            if row.len() != self.header.len() || self.header.is_empty() {
                return Err(Error::RowShape {
                    expected: self.header.len(),
                    found: row.len(),
                });
            }
        }
        Ok(())
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.header.iter().any(|h| h == column)
    }

    /// Index of `column` in the header.
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.header
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| Error::UnknownColumn(column.to_string()))
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row::new(&self.header, cells))
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().map(move |cells| Row::new(&self.header, cells))
    }

    pub(crate) fn raw_rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub(crate) fn push_row(&mut self, cells: Vec<String>) -> Result<()> {
        if self.header.is_empty() || cells.len() != self.header.len() {
            return Err(Error::RowShape {
                expected: self.header.len(),
                found: cells.len(),
            });
        }
        self.rows.push(cells);
        Ok(())
    }

    /// Drop every row whose cell at `index` equals `value`; returns how many went.
    pub(crate) fn remove_matching(&mut self, index: usize, value: &str) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| row[index] != value);
        before - self.rows.len()
    }

    /// Set `target` to `new_value` on every row whose `key` cell equals `key_value`.
    pub(crate) fn update_matching(
        &mut self,
        key: usize,
        key_value: &str,
        target: usize,
        new_value: &str,
    ) -> usize {
        let mut updated = 0;
        for row in self.rows.iter_mut().filter(|row| row[key] == key_value) {
            row[target] = new_value.to_string();
            updated += 1;
        }
        updated
    }

    pub(crate) fn insert_column(
        &mut self,
        position: usize,
        name: &str,
        default: &str,
    ) -> Result<()> {
        if self.contains_column(name) {
            return Err(Error::DuplicateColumn(name.to_string()));
        }
        if position > self.header.len() {
            return Err(Error::OutOfRange {
                position,
                len: self.header.len(),
            });
        }
        self.header.insert(position, name.to_string());
        for row in &mut self.rows {
            row.insert(position, default.to_string());
        }
        Ok(())
    }

    pub(crate) fn remove_column(&mut self, name: &str) -> Result<usize> {
        let index = self.column_index(name)?;
        self.header.remove(index);
        for row in &mut self.rows {
            row.remove(index);
        }
        // A table without columns cannot hold rows.
        if self.header.is_empty() {
            self.rows.clear();
        }
        Ok(index)
    }

    pub(crate) fn rename_column(&mut self, old: &str, new: &str) -> Result<usize> {
        let index = self.column_index(old)?;
        if self.contains_column(new) {
            return Err(Error::DuplicateColumn(new.to_string()));
        }
        self.header[index] = new.to_string();
        Ok(index)
    }
}
