use tracing::debug;

use crate::config::Config;
use crate::error::{DbError, Result};
use crate::page::Page;
use crate::pager::Pager;
use crate::row::Row;

/// The single table of the database, backed by one pager.
pub struct Table {
    pager: Pager,
}

impl Table {
    pub fn new(pager: Pager) -> Self {
        Self { pager }
    }

    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self::new(Pager::open(&config.db_path, config.max_pages)?))
    }

    /// Appends a row after the last stored one. Fails with `TableFull`
    /// without touching existing rows when no page has room.
    pub fn insert(&mut self, row: Row) -> Result<()> {
        match self.pager.get_next_available_page() {
            Some(page) => {
                page.add_row(row);
                Ok(())
            }
            None => {
                debug!(id = row.id(), "insert rejected, table full");
                Err(DbError::TableFull)
            }
        }
    }

    /// Every row, page by page, in insertion order.
    pub fn scan(&self) -> impl Iterator<Item = &Row> {
        self.pager.pages().iter().flat_map(|page| page.rows())
    }

    pub fn num_rows(&self) -> usize {
        self.pager.pages().iter().map(Page::num_rows).sum()
    }

    pub fn is_full(&self) -> bool {
        self.pager.is_full()
    }

    /// Writes every row back to the file. Consumes the table.
    pub fn close(self) -> Result<()> {
        self.pager.close()
    }
}
