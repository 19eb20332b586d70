use crate::{
    executor::scan::{ScannedRow, Scanner},
    storage::heap_file::HeapFile,
    types::{PageId, SlotId, error::DatabaseError, page::Page, row::RowLocation},
};

/// Walks a heap file in physical order: page ascending, then slot
/// ascending, skipping tombstones. One page is held in memory at a time.
pub struct SequentialScanner {
    heap: HeapFile,
    page_count: Option<PageId>,
    current_page_id: PageId,
    current_page: Option<Page>,
    current_slot_index: SlotId,
    batch_size: usize,
    is_exhausted: bool,
}

impl SequentialScanner {
    pub fn new(heap: HeapFile, batch_size: Option<usize>) -> Self {
        Self {
            heap,
            page_count: None,
            current_page_id: 0,
            current_page: None,
            current_slot_index: 0,
            batch_size: batch_size.unwrap_or(32).max(1),
            is_exhausted: false,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// The page count is fixed on the first call so rows appended mid-scan
    /// on new pages are not visited.
    fn page_count(&mut self) -> Result<PageId, DatabaseError> {
        match self.page_count {
            Some(count) => Ok(count),
            None => {
                let count = self.heap.page_count()?;
                self.page_count = Some(count);
                Ok(count)
            }
        }
    }

    /// Drain the scanner into a vector, `batch_size` rows at a time.
    pub fn scan_all(mut self) -> Result<Vec<ScannedRow>, DatabaseError> {
        let mut rows = Vec::new();
        loop {
            let batch = self.scan_batch(self.batch_size)?;
            if batch.is_empty() {
                return Ok(rows);
            }
            rows.extend(batch);
        }
    }
}

impl Scanner for SequentialScanner {
    fn scan(&mut self) -> Result<Option<ScannedRow>, DatabaseError> {
        if self.is_exhausted {
            return Ok(None);
        }
        let page_count = self.page_count()?;
        loop {
            if self.current_page_id >= page_count {
                self.is_exhausted = true;
                self.current_page = None;
                return Ok(None);
            }
            if self.current_page.is_none() {
                self.current_page = Some(self.heap.read_page(self.current_page_id)?);
                self.current_slot_index = 0;
            }
            let Some(page) = &self.current_page else {
                continue;
            };

            if self.current_slot_index >= page.slot_count() {
                self.current_page = None;
                self.current_page_id += 1;
                continue;
            }

            let slot_id = self.current_slot_index;
            self.current_slot_index += 1;
            if let Some(bytes) = page.read(slot_id) {
                return Ok(Some(ScannedRow {
                    location: RowLocation::new(self.current_page_id, slot_id),
                    bytes: bytes.to_vec(),
                }));
            }
        }
    }

    fn scan_batch(&mut self, batch_size: usize) -> Result<Vec<ScannedRow>, DatabaseError> {
        let mut rows = Vec::with_capacity(batch_size);
        for _ in 0..batch_size {
            match self.scan()? {
                Some(row) => rows.push(row),
                None => break,
            }
        }
        Ok(rows)
    }

    fn reset(&mut self) -> Result<(), DatabaseError> {
        self.page_count = None;
        self.current_page_id = 0;
        self.current_page = None;
        self.current_slot_index = 0;
        self.is_exhausted = false;
        Ok(())
    }
}
