use serde::ser::{Serialize, SerializeMap, Serializer};

/// A borrowed view of one row, keyed by the table header.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    header: &'a [String],
    cells: &'a [String],
}

impl<'a> Row<'a> {
    pub(crate) fn new(header: &'a [String], cells: &'a [String]) -> Self {
        debug_assert_eq!(header.len(), cells.len());
        Self { header, cells }
    }

    /// Value under `column`, or `None` if the header has no such column.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let cells = self.cells;
        self.header
            .iter()
            .position(|h| h == column)
            .map(|i| cells[i].as_str())
    }

    /// Cell values in header order.
    pub fn values(&self) -> &'a [String] {
        self.cells
    }

    /// `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let (header, cells) = (self.header, self.cells);
        header
            .iter()
            .zip(cells.iter())
            .map(|(h, c)| (h.as_str(), c.as_str()))
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(h, c)| (h.to_string(), c.to_string()))
            .collect()
    }
}

impl PartialEq for Row<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header && self.cells == other.cells
    }
}

/// Serializes as a map in header order, e.g. `{"name":"Alice","age":"30"}`.
impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}
