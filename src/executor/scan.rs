use crate::types::{error::DatabaseError, row::RowLocation};

/// A live row as it sits in the heap file, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedRow {
    pub location: RowLocation,
    pub bytes: Vec<u8>,
}

pub trait Scanner {
    fn scan(&mut self) -> Result<Option<ScannedRow>, DatabaseError>;
    fn scan_batch(&mut self, batch_size: usize) -> Result<Vec<ScannedRow>, DatabaseError>;
    fn reset(&mut self) -> Result<(), DatabaseError>;
}

pub struct ScanIterator<S: Scanner> {
    scanner: S,
}

impl<S: Scanner> ScanIterator<S> {
    pub fn new(scanner: S) -> Self {
        Self { scanner }
    }
}

impl<S: Scanner> Iterator for ScanIterator<S> {
    type Item = Result<ScannedRow, DatabaseError>;
    fn next(&mut self) -> Option<Self::Item> {
        match self.scanner.scan() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
