pub mod create_table;
pub mod delete;
pub mod engine;
pub mod index_manager;
pub mod insert;
pub mod join;
pub mod result;
pub mod scan;
pub mod select;
pub mod sequential_scan;
pub mod statement;
pub mod update;
