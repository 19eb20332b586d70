use tracing::debug;

use crate::{
    executor::{engine::Engine, result::Outcome},
    storage::{heap_file::HeapFile, schema::TableSchema},
    types::{error::DatabaseError, row::Row, row::RowLocation, value::Value},
};

impl Engine {
    /// `DELETE FROM table WHERE where_column = where_value`. Each row is
    /// logged and tombstoned on its own; indexes are rebuilt afterwards.
    pub(crate) fn delete_where(
        &mut self,
        table: &str,
        where_column: &str,
        where_value: &Value,
    ) -> Result<Outcome, DatabaseError> {
        let (schema, heap) = self.table_context(table)?;
        let where_index = schema.require_column(where_column)?;

        self.indexes.ensure_built(&schema, &heap)?;
        let where_key = where_value.to_key();
        let candidates = self.indexes.lookup(table, where_column, &where_key)?;

        let applied = self.apply_deletes(&schema, &heap, &candidates, where_index, &where_key);
        self.indexes.rebuild(&schema, &heap)?;
        let deleted = applied?;

        debug!(table, candidates = candidates.len(), deleted, "delete finished");
        Ok(Outcome::Deleted { deleted })
    }

    fn apply_deletes(
        &self,
        schema: &TableSchema,
        heap: &HeapFile,
        candidates: &[RowLocation],
        where_index: usize,
        where_key: &str,
    ) -> Result<usize, DatabaseError> {
        let mut deleted = 0;
        for &location in candidates {
            let Some(bytes) = heap.read_row(location)? else {
                continue;
            };
            let row = Row::decode(schema, &bytes)?;
            if row.get_value(where_index).map(Value::to_key).as_deref() != Some(where_key) {
                continue;
            }

            self.wal.log_delete(&schema.table_name, location)?;
            if heap.delete_row(location)? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
