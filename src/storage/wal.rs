//! Append-only write log.
//!
//! Every mutation is appended and flushed here before the heap file is
//! touched. Nothing reads the log back; it is an audit trail, not a
//! recovery mechanism.
//!
//! Record layout (little-endian):
//!
//! ```text
//! [u32 op][u32 table_len][table bytes] + payload
//!   insert (1): [u32 row_len][row bytes]
//!   delete (2): [u32 page_id][u16 slot_id]
//!   update (3): [u32 page_id][u16 slot_id][u32 row_len][row bytes]
//! ```

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::types::{error::DatabaseError, row::RowLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum WalOp {
    Insert = 1,
    Delete = 2,
    Update = 3,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalRecord<'a> {
    Insert {
        table: &'a str,
        row: &'a [u8],
    },
    Delete {
        table: &'a str,
        location: RowLocation,
    },
    Update {
        table: &'a str,
        location: RowLocation,
        row: &'a [u8],
    },
}

impl WalRecord<'_> {
    pub fn op(&self) -> WalOp {
        match self {
            WalRecord::Insert { .. } => WalOp::Insert,
            WalRecord::Delete { .. } => WalOp::Delete,
            WalRecord::Update { .. } => WalOp::Update,
        }
    }

    pub fn table(&self) -> &str {
        match self {
            WalRecord::Insert { table, .. }
            | WalRecord::Delete { table, .. }
            | WalRecord::Update { table, .. } => table,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DatabaseError> {
        let table = self.table().as_bytes();
        let mut buffer = Vec::new();
        buffer.extend_from_slice(&(self.op() as u32).to_le_bytes());
        buffer.extend_from_slice(&length_prefix(table.len())?.to_le_bytes());
        buffer.extend_from_slice(table);

        match self {
            WalRecord::Insert { row, .. } => {
                buffer.extend_from_slice(&length_prefix(row.len())?.to_le_bytes());
                buffer.extend_from_slice(row);
            }
            WalRecord::Delete { location, .. } => {
                buffer.extend_from_slice(&location.page_id.to_le_bytes());
                buffer.extend_from_slice(&location.slot_id.to_le_bytes());
            }
            WalRecord::Update { location, row, .. } => {
                buffer.extend_from_slice(&location.page_id.to_le_bytes());
                buffer.extend_from_slice(&location.slot_id.to_le_bytes());
                buffer.extend_from_slice(&length_prefix(row.len())?.to_le_bytes());
                buffer.extend_from_slice(row);
            }
        }

        Ok(buffer)
    }
}

fn length_prefix(len: usize) -> Result<u32, DatabaseError> {
    u32::try_from(len).map_err(|_| DatabaseError::InvalidData {
        details: format!("{} bytes do not fit a write log length prefix", len),
    })
}

#[derive(Debug, Clone)]
pub struct WriteLog {
    path: PathBuf,
    sync: bool,
}

impl WriteLog {
    /// Open (or create) the log at `path`. With `sync`, every append is
    /// followed by `sync_data`.
    pub fn open<P: AsRef<Path>>(path: P, sync: bool) -> Result<Self, DatabaseError> {
        let path = path.as_ref().to_path_buf();
        OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, sync })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &WalRecord<'_>) -> Result<(), DatabaseError> {
        let bytes = record.to_bytes()?;
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(&bytes)?;
        file.flush()?;
        if self.sync {
            file.sync_data()?;
        }
        debug!(op = ?record.op(), table = record.table(), bytes = bytes.len(), "write log append");
        Ok(())
    }

    pub fn log_insert(&self, table: &str, row: &[u8]) -> Result<(), DatabaseError> {
        self.append(&WalRecord::Insert { table, row })
    }

    pub fn log_delete(&self, table: &str, location: RowLocation) -> Result<(), DatabaseError> {
        self.append(&WalRecord::Delete { table, location })
    }

    pub fn log_update(
        &self,
        table: &str,
        location: RowLocation,
        row: &[u8],
    ) -> Result<(), DatabaseError> {
        self.append(&WalRecord::Update {
            table,
            location,
            row,
        })
    }
}
