use crate::ROWS_PER_PAGE;
use crate::row::Row;

/// An ordered, bounded group of rows. Capacity is a row count derived from the
/// nominal row size; the pager checks it before handing a page out.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Page {
    rows: Vec<Row>,
}

impl Page {
    pub fn new() -> Self {
        Self {
            rows: Vec::with_capacity(ROWS_PER_PAGE),
        }
    }

    pub fn add_row(&mut self, row: Row) {
        debug_assert!(!self.is_full(), "row added to a full page");
        self.rows.push(row);
    }

    pub fn is_full(&self) -> bool {
        self.rows.len() >= ROWS_PER_PAGE
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in insertion order. Can be called any number of times.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Serialized size of all rows, back to back.
    #[cfg(test)]
    pub(crate) fn encoded_len(&self) -> usize {
        self.rows.iter().map(Row::encoded_len).sum()
    }
}
