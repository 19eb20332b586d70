pub mod catalog;
pub mod hash_index;
pub mod heap_file;
pub mod schema;
pub mod wal;
