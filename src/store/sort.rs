use std::cmp::Ordering;
use tracing::debug;

use crate::error::{Error, Result};

/// How cell values are compared when sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Byte-wise string comparison.
    #[default]
    Text,
    /// Parse every cell as `f64`; any failure aborts the sort.
    Numeric,
    /// Numeric if every cell parses, otherwise text.
    Auto,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub descending: bool,
}

impl SortOrder {
    pub fn text() -> Self {
        Self {
            key: SortKey::Text,
            descending: false,
        }
    }

    pub fn numeric() -> Self {
        Self {
            key: SortKey::Numeric,
            descending: false,
        }
    }

    pub fn auto() -> Self {
        Self {
            key: SortKey::Auto,
            descending: false,
        }
    }

    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }
}

/// Return a stable ordering of row indices by the cell at `index`.
///
/// Ties keep their input order in both directions.
pub(crate) fn sorted_indices(
    rows: &[Vec<String>],
    index: usize,
    column: &str,
    order: SortOrder,
) -> Result<Vec<usize>> {
    let mut perm: Vec<usize> = (0..rows.len()).collect();
    let direct = |ord: Ordering| if order.descending { ord.reverse() } else { ord };

    let numbers = match order.key {
        SortKey::Text => None,
        SortKey::Numeric => Some(parse_numbers(rows, index, column)?),
        SortKey::Auto => match parse_numbers(rows, index, column) {
            Ok(nums) => Some(nums),
            Err(e) => {
                debug!("auto sort on `{}` falls back to text: {}", column, e);
                None
            }
        },
    };

    match numbers {
        Some(nums) => perm.sort_by(|&a, &b| direct(nums[a].total_cmp(&nums[b]))),
        None => perm.sort_by(|&a, &b| direct(rows[a][index].cmp(&rows[b][index]))),
    }
    Ok(perm)
}

fn parse_numbers(rows: &[Vec<String>], index: usize, column: &str) -> Result<Vec<f64>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let cell = &row[index];
            cell.trim().parse::<f64>().map_err(|_| Error::Parse {
                column: column.to_string(),
                value: cell.clone(),
                row: i,
            })
        })
        .collect()
}
