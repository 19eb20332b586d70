use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::types::{
    MAX_ROW_SIZE, PAGE_SIZE, PageId,
    error::DatabaseError,
    page::Page,
    row::RowLocation,
};

/// A table's rows as a flat sequence of pages. Page `i` lives at byte
/// `i * PAGE_SIZE`.
///
/// There is no page cache: every call opens the file, moves exactly one page
/// through it and closes it again.
#[derive(Debug, Clone)]
pub struct HeapFile {
    path: PathBuf,
}

impl HeapFile {
    /// Create a new, empty heap file, truncating anything already there.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let path = path.as_ref().to_path_buf();
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        Ok(Self { path })
    }

    /// Open a heap file, creating it empty if it does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let path = path.as_ref().to_path_buf();
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn page_offset(page_id: PageId) -> u64 {
        page_id as u64 * PAGE_SIZE as u64
    }

    fn open_for_write(&self) -> Result<File, DatabaseError> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .map_err(DatabaseError::from)
    }

    pub fn page_count(&self) -> Result<PageId, DatabaseError> {
        let file_size = std::fs::metadata(&self.path)?.len();
        PageId::try_from(file_size / PAGE_SIZE as u64).map_err(|_| DatabaseError::InvalidData {
            details: format!("Heap file {} has too many pages", self.path.display()),
        })
    }

    pub fn read_page(&self, page_id: PageId) -> Result<Page, DatabaseError> {
        let mut buffer = vec![0u8; PAGE_SIZE];
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(Self::page_offset(page_id)))?;
        file.read_exact(&mut buffer)?;
        Page::from_bytes(&buffer)
    }

    pub fn write_page(&self, page_id: PageId, page: &Page) -> Result<(), DatabaseError> {
        let mut file = self.open_for_write()?;
        file.seek(SeekFrom::Start(Self::page_offset(page_id)))?;
        file.write_all(page.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// First-fit over existing pages in ascending order, else a new page is
    /// appended.
    pub fn insert_row(&self, row: &[u8]) -> Result<RowLocation, DatabaseError> {
        if row.len() > MAX_ROW_SIZE {
            return Err(DatabaseError::RowTooLarge {
                size: row.len(),
                max: MAX_ROW_SIZE,
            });
        }

        let page_count = self.page_count()?;
        for page_id in 0..page_count {
            let mut page = self.read_page(page_id)?;
            match page.insert(row) {
                Ok(slot_id) => {
                    self.write_page(page_id, &page)?;
                    debug!(path = %self.path.display(), page_id, slot_id, "row placed in existing page");
                    return Ok(RowLocation::new(page_id, slot_id));
                }
                Err(DatabaseError::PageFull { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        let mut page = Page::new();
        let slot_id = match page.insert(row) {
            Ok(slot_id) => slot_id,
            Err(DatabaseError::PageFull { .. }) => {
                return Err(DatabaseError::RowTooLarge {
                    size: row.len(),
                    max: MAX_ROW_SIZE,
                });
            }
            Err(e) => return Err(e),
        };
        self.write_page(page_count, &page)?;
        debug!(path = %self.path.display(), page_id = page_count, slot_id, "row placed in new page");
        Ok(RowLocation::new(page_count, slot_id))
    }

    /// `None` for an out-of-range page or slot, or a tombstone.
    pub fn read_row(&self, location: RowLocation) -> Result<Option<Vec<u8>>, DatabaseError> {
        if location.page_id >= self.page_count()? {
            return Ok(None);
        }
        let page = self.read_page(location.page_id)?;
        Ok(page.read(location.slot_id).map(<[u8]>::to_vec))
    }

    /// Overwrite in place. The page is only written back when the row fit.
    pub fn update_row(&self, location: RowLocation, row: &[u8]) -> Result<bool, DatabaseError> {
        if location.page_id >= self.page_count()? {
            return Ok(false);
        }
        let mut page = self.read_page(location.page_id)?;
        if !page.update(location.slot_id, row) {
            return Ok(false);
        }
        self.write_page(location.page_id, &page)?;
        Ok(true)
    }

    pub fn delete_row(&self, location: RowLocation) -> Result<bool, DatabaseError> {
        if location.page_id >= self.page_count()? {
            return Ok(false);
        }
        let mut page = self.read_page(location.page_id)?;
        if !page.remove(location.slot_id) {
            return Ok(false);
        }
        self.write_page(location.page_id, &page)?;
        Ok(true)
    }
}
