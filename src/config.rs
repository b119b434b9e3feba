//! Runtime configuration.

use std::path::PathBuf;

use crate::{DEFAULT_DB_PATH, TABLE_MAX_PAGES};

#[derive(Debug, Clone)]
pub struct Config {
    /// Backing file for the table. Created along with its parent directory if absent.
    pub db_path: PathBuf,

    /// Maximum number of pages the table may hold.
    pub max_pages: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            max_pages: TABLE_MAX_PAGES,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.db_path = path.into();
        self
    }

    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
