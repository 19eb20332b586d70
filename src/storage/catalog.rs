use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    storage::{heap_file::HeapFile, schema::TableSchema},
    types::error::DatabaseError,
};

const HEAP_FILE_EXTENSION: &str = "tbl";
const SCHEMA_FILE_EXTENSION: &str = "schema";

/// Maps table names to their files inside the data directory:
/// `<dir>/<table>.tbl` for rows, `<dir>/<table>.schema` for columns.
#[derive(Debug, Clone)]
pub struct Catalog {
    dir: PathBuf,
}

impl Catalog {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, DatabaseError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn table_path(&self, table_name: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", table_name, HEAP_FILE_EXTENSION))
    }

    pub fn schema_path(&self, table_name: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", table_name, SCHEMA_FILE_EXTENSION))
    }

    /// A table exists when both its schema and heap files are present.
    pub fn has_table(&self, table_name: &str) -> bool {
        !table_name.is_empty()
            && self.schema_path(table_name).is_file()
            && self.table_path(table_name).is_file()
    }

    pub fn create_table(&self, schema: &TableSchema) -> Result<(), DatabaseError> {
        schema.validate()?;
        if self.has_table(&schema.table_name) {
            return Err(DatabaseError::SchemaInvalid {
                details: format!("Table '{}' already exists", schema.table_name),
            });
        }

        fs::write(self.schema_path(&schema.table_name), schema.to_text())?;
        HeapFile::create(self.table_path(&schema.table_name))?;

        info!(
            table = %schema.table_name,
            columns = schema.columns.len(),
            "created table"
        );
        Ok(())
    }

    pub fn load_schema(&self, table_name: &str) -> Result<TableSchema, DatabaseError> {
        let path = self.schema_path(table_name);
        if table_name.is_empty() || !path.is_file() {
            return Err(DatabaseError::TableNotFound {
                name: table_name.to_string(),
            });
        }
        let text = fs::read_to_string(&path)?;
        TableSchema::from_text(table_name, &text)
    }

    /// Load the schema of an existing table, failing with `TableNotFound`
    /// unless both of its files are present.
    pub fn require_table(&self, table_name: &str) -> Result<TableSchema, DatabaseError> {
        if !self.has_table(table_name) {
            return Err(DatabaseError::TableNotFound {
                name: table_name.to_string(),
            });
        }
        self.load_schema(table_name)
    }

    pub fn heap_file(&self, table_name: &str) -> Result<HeapFile, DatabaseError> {
        HeapFile::open(self.table_path(table_name))
    }
}
