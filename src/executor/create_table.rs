use crate::{
    executor::{engine::Engine, result::Outcome},
    storage::schema::TableSchema,
    types::error::DatabaseError,
};

impl Engine {
    pub(crate) fn create_table(&mut self, schema: TableSchema) -> Result<Outcome, DatabaseError> {
        self.catalog.create_table(&schema)?;
        // A fresh heap file invalidates anything cached under the same name.
        self.indexes.invalidate(&schema.table_name);
        Ok(Outcome::message("table created"))
    }
}
