use tracing::debug;

use crate::{
    executor::{engine::Engine, result::Outcome},
    storage::{heap_file::HeapFile, schema::TableSchema},
    types::{error::DatabaseError, row::Row, row::RowLocation, value::Value},
};

impl Engine {
    /// `UPDATE table SET set_column = set_value WHERE where_column = where_value`.
    ///
    /// Rows are updated one by one with no rollback: a row whose new
    /// encoding outgrows its slot is skipped while the others still commit.
    /// Indexes are rebuilt from a full scan afterwards, even on error.
    pub(crate) fn update_where(
        &mut self,
        table: &str,
        set_column: &str,
        set_value: Value,
        where_column: &str,
        where_value: &Value,
    ) -> Result<Outcome, DatabaseError> {
        let (schema, heap) = self.table_context(table)?;
        let set_index = schema.require_column(set_column)?;
        let where_index = schema.require_column(where_column)?;
        set_value.expect_type(set_column, &schema.columns[set_index].data_type)?;

        self.indexes.ensure_built(&schema, &heap)?;
        let where_key = where_value.to_key();
        let candidates = self.indexes.lookup(table, where_column, &where_key)?;

        let applied = self.apply_updates(
            &schema,
            &heap,
            &candidates,
            (set_index, &set_value),
            (where_index, &where_key),
        );
        self.indexes.rebuild(&schema, &heap)?;
        let updated = applied?;

        debug!(table, candidates = candidates.len(), updated, "update finished");
        Ok(Outcome::Updated { updated })
    }

    fn apply_updates(
        &self,
        schema: &TableSchema,
        heap: &HeapFile,
        candidates: &[RowLocation],
        (set_index, set_value): (usize, &Value),
        (where_index, where_key): (usize, &str),
    ) -> Result<usize, DatabaseError> {
        let mut updated = 0;
        for &location in candidates {
            let Some(bytes) = heap.read_row(location)? else {
                continue;
            };
            let mut row = Row::decode(schema, &bytes)?;
            // The index may be stale; trust the row.
            if row.get_value(where_index).map(Value::to_key).as_deref() != Some(where_key) {
                continue;
            }

            row.set_value(set_index, set_value.clone())?;
            let new_bytes = row.encode(schema)?;
            if new_bytes.len() > bytes.len() {
                debug!(
                    table = %schema.table_name,
                    %location,
                    old = bytes.len(),
                    new = new_bytes.len(),
                    "updated row does not fit its slot, skipped"
                );
                continue;
            }

            self.wal
                .log_update(&schema.table_name, location, &new_bytes)?;
            if heap.update_row(location, &new_bytes)? {
                updated += 1;
            }
        }
        Ok(updated)
    }
}
