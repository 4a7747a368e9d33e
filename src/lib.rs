//! Load a small delimited file into memory, query and reshape it, and keep
//! the file rewritten after every change.
//!
//! ```no_run
//! use rowfile::{ColumnEditor, RecordStore, SortOrder};
//!
//! # fn main() -> rowfile::Result<()> {
//! let mut store = RecordStore::open("people.csv")?;
//! store.sort_by("age", SortOrder::numeric())?;
//! ColumnEditor::add_column(&mut store, "country", "US")?;
//! store.delete_where("name", "Bob")?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod columns;
pub mod config;
pub mod error;
pub mod store;
pub mod table;

#[cfg(test)]
mod tests;

pub use columns::ColumnEditor;
pub use config::Settings;
pub use error::{Error, Result};
pub use store::{RecordStore, SortKey, SortOrder};
pub use table::{Row, Table};
