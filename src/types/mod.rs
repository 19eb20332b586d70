pub mod error;
pub mod page;
pub mod row;
pub mod value;

// Common type aliases
pub type PageId = u32;
pub type SlotId = u16;

pub const PAGE_SIZE: usize = 4096;
pub const PAGE_HEADER_SIZE: usize = 6; // slot_count(2) | free_start(2) | free_end(2)
pub const SLOT_DIRECTORY_ENTRY_SIZE: usize = 4; // offset (2 bytes) + length (2 bytes)

/// Largest encoded row an empty page can hold.
pub const MAX_ROW_SIZE: usize = PAGE_SIZE - PAGE_HEADER_SIZE - SLOT_DIRECTORY_ENTRY_SIZE;

/// Version tag written at the front of every encoded row.
pub const ROW_FORMAT_VERSION: u32 = 1;
