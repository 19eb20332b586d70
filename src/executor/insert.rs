use tracing::debug;

use crate::{
    executor::{engine::Engine, result::Outcome},
    types::{MAX_ROW_SIZE, error::DatabaseError, row::Row, value::Value},
};

impl Engine {
    /// Encode, log, place, then index. Indexes are built before the heap
    /// insert so the new row is indexed exactly once.
    pub(crate) fn insert(&mut self, table: &str, values: Vec<Value>) -> Result<Outcome, DatabaseError> {
        let (schema, heap) = self.table_context(table)?;
        let row = Row::new(values);
        let bytes = row.encode(&schema)?;
        if bytes.len() > MAX_ROW_SIZE {
            return Err(DatabaseError::RowTooLarge {
                size: bytes.len(),
                max: MAX_ROW_SIZE,
            });
        }

        self.indexes.ensure_built(&schema, &heap)?;

        self.wal.log_insert(table, &bytes)?;
        let location = heap.insert_row(&bytes)?;
        self.indexes.add_row(&schema, &row, location);

        debug!(table, %location, bytes = bytes.len(), "inserted row");
        Ok(Outcome::inserted(location))
    }
}
