//! Pager: owns the backing file and the in-memory page list.
//!
//! The whole table lives in memory while the pager is open. The file is read
//! once in `open` and rewritten once in `close`; nothing is flushed in between.
//!
//! On disk the pages are stored back to back as a stream of row records with
//! no page header and no padding. Only the last page can be partially filled,
//! so page boundaries are recovered on load by starting a new page every
//! `ROWS_PER_PAGE` rows.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Seek, SeekFrom, Write};
use std::mem;
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};

use crate::error::{DbError, Result};
use crate::page::Page;
use crate::row::Row;
use crate::{MAX_ENCODED_ROW_SIZE, PAGE_SIZE, ROWS_PER_PAGE};

pub struct Pager {
    file: File,
    path: PathBuf,
    pages: Vec<Page>,
    max_pages: usize,
}

impl Pager {
    /// Opens the backing file, creating it (and its parent directory) if it
    /// does not exist, and loads every stored row into pages.
    pub fn open(path: impl AsRef<Path>, max_pages: usize) -> Result<Self> {
        let path = path.as_ref();
        if max_pages == 0 {
            return Err(DbError::Config("max_pages must be at least 1".to_string()));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let bytes = read_blocks(&mut file)?;
        let pages = decode_pages(&bytes, max_pages).map_err(|e| DbError::CorruptedFile {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        info!(
            path = %path.display(),
            bytes = bytes.len(),
            pages = pages.len(),
            "opened database file"
        );

        Ok(Self {
            file,
            path: path.to_path_buf(),
            pages,
            max_pages,
        })
    }

    pub fn num_pages(&self) -> usize {
        self.pages.len()
    }

    /// Pages in the order they are stored.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Returns the page the next row should go into, allocating one when the
    /// list is empty or the last page is full. `None` means the table is full.
    pub fn get_next_available_page(&mut self) -> Option<&mut Page> {
        if self.pages.last().is_none_or(Page::is_full) {
            if self.pages.len() >= self.max_pages {
                return None;
            }
            self.pages.push(Page::new());
            debug!(page = self.pages.len() - 1, "allocated page");
        }
        self.pages.last_mut()
    }

    pub fn is_full(&self) -> bool {
        self.pages.len() >= self.max_pages && self.pages.last().is_some_and(Page::is_full)
    }

    /// Rewrites the file from the in-memory pages and releases the handle.
    ///
    /// The file is truncated first; a failure part way through leaves it
    /// empty or partially written.
    pub fn close(mut self) -> Result<()> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;

        let mut written = 0;
        for (index, page) in self.pages.iter().enumerate() {
            let n = Self::write_page(&mut self.file, page)?;
            trace!(page = index, bytes = n, "wrote page");
            written += n;
        }
        self.file.sync_all()?;

        info!(
            path = %self.path.display(),
            pages = self.pages.len(),
            bytes = written,
            "closed database file"
        );
        Ok(())
    }

    /// Serializes one page into a buffer and appends it at the current
    /// write position. Returns the number of bytes written.
    fn write_page(file: &mut File, page: &Page) -> io::Result<usize> {
        let mut buf = Vec::with_capacity(ROWS_PER_PAGE * MAX_ENCODED_ROW_SIZE);
        for row in page.rows() {
            row.encode_into(&mut buf);
        }
        file.write_all(&buf)?;
        Ok(buf.len())
    }
}

fn read_blocks(file: &mut File) -> io::Result<Vec<u8>> {
    let mut reader = BufReader::with_capacity(PAGE_SIZE, file);
    let mut bytes = Vec::new();
    let mut block = [0u8; PAGE_SIZE];
    loop {
        match reader.read(&mut block) {
            Ok(0) => return Ok(bytes),
            Ok(n) => bytes.extend_from_slice(&block[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

fn decode_pages(bytes: &[u8], max_pages: usize) -> Result<Vec<Page>> {
    let mut pages = Vec::new();
    let mut current = Page::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let (row, next) = Row::decode(bytes, cursor)?;
        if current.is_full() {
            if pages.len() + 1 >= max_pages {
                return Err(DbError::corrupt(
                    cursor,
                    format!("file holds more than {max_pages} pages of rows"),
                ));
            }
            pages.push(mem::take(&mut current));
        }
        current.add_row(row);
        cursor = next;
    }

    if !current.is_empty() {
        pages.push(current);
    }
    Ok(pages)
}
