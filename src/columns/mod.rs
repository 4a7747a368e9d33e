use tracing::info;

use crate::error::Result;
use crate::store::RecordStore;

/// Column-shape operations over a `RecordStore`.
///
/// Holds no state; each call borrows the store exclusively, applies the
/// change to every row and the header together, and saves before returning.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnEditor;

impl ColumnEditor {
    /// Append `name` as the last column, filled with `default`.
    pub fn add_column(store: &mut RecordStore, name: &str, default: &str) -> Result<()> {
        let position = store.table().width();
        Self::add_column_at(store, name, position, default)
    }

    /// Insert `name` at `position` (0..=width), filled with `default`.
    pub fn add_column_at(
        store: &mut RecordStore,
        name: &str,
        position: usize,
        default: &str,
    ) -> Result<()> {
        let mut next = store.table().clone();
        next.insert_column(position, name, default)?;
        store.commit(next)?;
        info!(column = name, position, "added column");
        Ok(())
    }

    pub fn delete_column(store: &mut RecordStore, name: &str) -> Result<()> {
        let mut next = store.table().clone();
        let position = next.remove_column(name)?;
        store.commit(next)?;
        info!(column = name, position, "deleted column");
        Ok(())
    }

    /// Rename `old` to `new`, keeping position and values.
    pub fn rename_column(store: &mut RecordStore, old: &str, new: &str) -> Result<()> {
        let mut next = store.table().clone();
        let position = next.rename_column(old, new)?;
        store.commit(next)?;
        info!(from = old, to = new, position, "renamed column");
        Ok(())
    }

    /// Set `target_column` to `new_value` on every row whose `match_column`
    /// equals `match_value`. Returns the number of rows changed; nothing is
    /// written when no row matches.
    pub fn update_where(
        store: &mut RecordStore,
        match_column: &str,
        match_value: &str,
        target_column: &str,
        new_value: &str,
    ) -> Result<usize> {
        let key = store.table().column_index(match_column)?;
        let target = store.table().column_index(target_column)?;
        let mut next = store.table().clone();
        let updated = next.update_matching(key, match_value, target, new_value);
        if updated > 0 {
            store.commit(next)?;
            info!(column = target_column, updated, "updated rows");
        }
        Ok(updated)
    }
}
