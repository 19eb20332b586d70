use serde::{Deserialize, Serialize};

use crate::types::{
    PAGE_HEADER_SIZE, PAGE_SIZE, SLOT_DIRECTORY_ENTRY_SIZE, SlotId, error::DatabaseError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub offset: u16, // Offset from beginning of page
    pub length: u16, // Length of the row, 0 for a tombstone
}

impl SlotEntry {
    pub fn is_deleted(&self) -> bool {
        self.length == 0
    }
}

/*
 * Page Layout on Disk (Slotted Page Structure)
 * ┌─────────────────────────────────────────────────────────────────┐
 * │                    PAGE HEADER (6 bytes)                        │
 * │  slot_count(2) | free_start(2) | free_end(2)                    │
 * ├─────────────────────────────────────────────────────────────────┤
 * │                  SLOT DIRECTORY                                 │
 * │  [slot0: offset(2)|len(2)] [slot1: offset(2)|len(2)] ...       │
 * ├──────────────────────── free_start ─────────────────────────────┤
 * │                    FREE SPACE                                   │
 * ├──────────────────────── free_end ───────────────────────────────┤
 * │                   ROW DATA                                      │
 * │  [...row N...] [...row 2...] [...row 1...] [...row 0...]       │
 * └─────────────────────────────────────────────────────────────────┘
 *
 * All integers are little-endian. Deleted slots keep their directory
 * entry (offset = 0, length = 0) and their row bytes are never reclaimed.
 */

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    data: Vec<u8>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        let mut page = Self {
            data: vec![0; PAGE_SIZE],
        };
        page.set_slot_count(0);
        page.set_free_start(PAGE_HEADER_SIZE as u16);
        page.set_free_end(PAGE_SIZE as u16);
        page
    }

    /// Load a page from its on-disk image. The header must describe a
    /// directory ending at `free_start` and a free region that lies inside
    /// the page, otherwise a later insert would write out of bounds.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DatabaseError> {
        if bytes.len() != PAGE_SIZE {
            return Err(DatabaseError::InvalidPageSize {
                expected: PAGE_SIZE,
                actual: bytes.len(),
            });
        }
        let page = Self {
            data: bytes.to_vec(),
        };

        let slot_count = page.slot_count() as usize;
        let free_start = page.free_start() as usize;
        let free_end = page.free_end() as usize;
        let directory_end = PAGE_HEADER_SIZE + slot_count * SLOT_DIRECTORY_ENTRY_SIZE;
        if free_start != directory_end || free_start > free_end || free_end > PAGE_SIZE {
            return Err(DatabaseError::InvalidData {
                details: format!(
                    "corrupted page header: slot_count={}, free_start={}, free_end={}",
                    slot_count, free_start, free_end
                ),
            });
        }
        Ok(page)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.clone()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn read_u16(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.data[offset], self.data[offset + 1]])
    }

    fn write_u16(&mut self, offset: usize, value: u16) {
        self.data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    pub fn slot_count(&self) -> u16 {
        self.read_u16(0)
    }

    pub fn free_start(&self) -> u16 {
        self.read_u16(2)
    }

    pub fn free_end(&self) -> u16 {
        self.read_u16(4)
    }

    fn set_slot_count(&mut self, value: u16) {
        self.write_u16(0, value);
    }

    fn set_free_start(&mut self, value: u16) {
        self.write_u16(2, value);
    }

    fn set_free_end(&mut self, value: u16) {
        self.write_u16(4, value);
    }

    fn slot_entry_offset(slot_id: SlotId) -> usize {
        PAGE_HEADER_SIZE + slot_id as usize * SLOT_DIRECTORY_ENTRY_SIZE
    }

    fn write_slot(&mut self, slot_id: SlotId, entry: SlotEntry) {
        let at = Self::slot_entry_offset(slot_id);
        self.write_u16(at, entry.offset);
        self.write_u16(at + 2, entry.length);
    }

    /// Directory entry for `slot_id`, including tombstones.
    pub fn slot(&self, slot_id: SlotId) -> Option<SlotEntry> {
        if slot_id >= self.slot_count() {
            return None;
        }
        let at = Self::slot_entry_offset(slot_id);
        if at + SLOT_DIRECTORY_ENTRY_SIZE > PAGE_SIZE {
            return None;
        }
        Some(SlotEntry {
            offset: self.read_u16(at),
            length: self.read_u16(at + 2),
        })
    }

    pub fn live_slot_count(&self) -> usize {
        (0..self.slot_count())
            .filter_map(|slot_id| self.slot(slot_id))
            .filter(|slot| !slot.is_deleted())
            .count()
    }

    pub fn available_space(&self) -> usize {
        (self.free_end() as usize).saturating_sub(self.free_start() as usize)
    }

    pub fn can_fit(&self, data_size: usize) -> bool {
        self.free_start() <= self.free_end()
            && self.available_space() >= data_size + SLOT_DIRECTORY_ENTRY_SIZE
    }

    /// Append a row. `PageFull` leaves the page untouched so the caller can
    /// try another page.
    pub fn insert(&mut self, row: &[u8]) -> Result<SlotId, DatabaseError> {
        if row.is_empty() {
            return Err(DatabaseError::EmptyRow);
        }
        if !self.can_fit(row.len()) {
            return Err(DatabaseError::PageFull {
                needed: row.len() + SLOT_DIRECTORY_ENTRY_SIZE,
                available: self.available_space(),
            });
        }

        let slot_id = self.slot_count();
        let free_start = self.free_start();
        // can_fit bounds row.len() below PAGE_SIZE
        let row_offset = self.free_end() - row.len() as u16;

        let start = row_offset as usize;
        self.data[start..start + row.len()].copy_from_slice(row);

        self.write_slot(
            slot_id,
            SlotEntry {
                offset: row_offset,
                length: row.len() as u16,
            },
        );
        self.set_slot_count(slot_id + 1);
        self.set_free_start(free_start + SLOT_DIRECTORY_ENTRY_SIZE as u16);
        self.set_free_end(row_offset);

        Ok(slot_id)
    }

    pub fn read(&self, slot_id: SlotId) -> Option<&[u8]> {
        let slot = self.slot(slot_id)?;
        if slot.is_deleted() {
            return None;
        }
        let start = slot.offset as usize;
        let end = start + slot.length as usize;
        if end > PAGE_SIZE {
            return None;
        }
        Some(&self.data[start..end])
    }

    /// Overwrite a live row in place. Rows may shrink but never grow; the
    /// offset stays put and any excess old bytes become dead space.
    pub fn update(&mut self, slot_id: SlotId, row: &[u8]) -> bool {
        let Some(slot) = self.slot(slot_id) else {
            return false;
        };
        if slot.is_deleted() || row.is_empty() || row.len() > slot.length as usize {
            return false;
        }

        let start = slot.offset as usize;
        if start + row.len() > PAGE_SIZE {
            return false;
        }
        self.data[start..start + row.len()].copy_from_slice(row);
        self.write_slot(
            slot_id,
            SlotEntry {
                offset: slot.offset,
                length: row.len() as u16,
            },
        );
        true
    }

    /// Tombstone a slot. The directory entry stays allocated.
    pub fn remove(&mut self, slot_id: SlotId) -> bool {
        match self.slot(slot_id) {
            Some(slot) if !slot.is_deleted() => {
                self.write_slot(
                    slot_id,
                    SlotEntry {
                        offset: 0,
                        length: 0,
                    },
                );
                true
            }
            _ => false,
        }
    }
}
