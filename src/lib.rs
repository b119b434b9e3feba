pub mod config;
pub mod error;
pub mod page;
pub mod pager;
pub mod row;
pub mod statement;
pub mod table;

pub use config::Config;
pub use error::{DbError, Result};
pub use page::Page;
pub use pager::Pager;
pub use row::Row;
pub use statement::{InputType, MetaCommand, PrepareError, Statement, execute};
pub use table::Table;

pub const COLUMN_USERNAME_SIZE: usize = 32;
pub const COLUMN_EMAIL_SIZE: usize = 255;
pub const ID_SIZE: usize = size_of::<i32>();
pub const USERNAME_SIZE: usize = COLUMN_USERNAME_SIZE;
pub const EMAIL_SIZE: usize = COLUMN_EMAIL_SIZE;

// Nominal row size, used only to derive page capacity.
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

pub const LENGTH_PREFIX_SIZE: usize = size_of::<u32>();
pub const MAX_ENCODED_ROW_SIZE: usize =
    ID_SIZE + LENGTH_PREFIX_SIZE + USERNAME_SIZE + LENGTH_PREFIX_SIZE + EMAIL_SIZE;

pub const PAGE_SIZE: usize = 4096;
pub const TABLE_MAX_PAGES: usize = 100;
pub const ROWS_PER_PAGE: usize = PAGE_SIZE / ROW_SIZE;
pub const TABLE_MAX_ROWS: usize = ROWS_PER_PAGE * TABLE_MAX_PAGES;

pub const DEFAULT_DB_PATH: &str = "db/ktdb.db";
