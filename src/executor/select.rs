use crate::{
    executor::{
        engine::Engine,
        result::{Outcome, QueryRow},
    },
    types::{error::DatabaseError, row::Row, value::Value},
};

impl Engine {
    pub(crate) fn select_all(&mut self, table: &str) -> Result<Outcome, DatabaseError> {
        let schema = self.catalog.require_table(table)?;
        let rows = self
            .scan_table(table)?
            .into_iter()
            .map(|(location, row)| QueryRow {
                location,
                data: row.render(&schema),
            })
            .collect();
        Ok(Outcome::Rows { rows })
    }

    /// Equality lookup through the column's hash index. Locations that were
    /// tombstoned since indexing are skipped.
    pub(crate) fn select_where(
        &mut self,
        table: &str,
        column: &str,
        value: &Value,
    ) -> Result<Outcome, DatabaseError> {
        let (schema, heap) = self.table_context(table)?;
        self.indexes.ensure_built(&schema, &heap)?;
        let locations = self.indexes.lookup(table, column, &value.to_key())?;

        let mut rows = Vec::with_capacity(locations.len());
        for location in locations {
            let Some(bytes) = heap.read_row(location)? else {
                continue;
            };
            let row = Row::decode(&schema, &bytes)?;
            rows.push(QueryRow {
                location,
                data: row.render(&schema),
            });
        }
        Ok(Outcome::Rows { rows })
    }
}
