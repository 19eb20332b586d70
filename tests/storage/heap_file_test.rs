use lembar::{
    storage::heap_file::HeapFile,
    types::{MAX_ROW_SIZE, PAGE_SIZE, error::DatabaseError, page::Page, row::RowLocation},
};
use tempfile::tempdir;

fn row_of(size: usize, fill: u8) -> Vec<u8> {
    vec![fill; size]
}

#[test]
fn test_new_heap_file_is_empty() -> Result<(), DatabaseError> {
    let dir = tempdir()?;
    let heap = HeapFile::create(dir.path().join("t.tbl"))?;
    assert_eq!(heap.page_count()?, 0);
    assert_eq!(heap.read_row(RowLocation::new(0, 0))?, None);
    Ok(())
}

#[test]
fn test_first_insert_appends_page() -> Result<(), DatabaseError> {
    let dir = tempdir()?;
    let heap = HeapFile::create(dir.path().join("t.tbl"))?;

    let location = heap.insert_row(b"hello")?;
    assert_eq!(location, RowLocation::new(0, 0));
    assert_eq!(heap.page_count()?, 1);
    assert_eq!(
        std::fs::metadata(heap.path())?.len(),
        PAGE_SIZE as u64
    );
    assert_eq!(heap.read_row(location)?, Some(b"hello".to_vec()));
    Ok(())
}

#[test]
fn test_first_fit_placement() -> Result<(), DatabaseError> {
    let dir = tempdir()?;
    let heap = HeapFile::create(dir.path().join("t.tbl"))?;

    // 3000 + 4 leaves 1086 bytes on page 0
    let big = heap.insert_row(&row_of(3000, 1))?;
    assert_eq!(big, RowLocation::new(0, 0));

    // does not fit page 0, so page 1 is appended
    let second = heap.insert_row(&row_of(2000, 2))?;
    assert_eq!(second, RowLocation::new(1, 0));

    // fits the remaining space of page 0, which is tried first
    let small = heap.insert_row(&row_of(500, 3))?;
    assert_eq!(small, RowLocation::new(0, 1));

    // too big for both, third page
    let third = heap.insert_row(&row_of(2500, 4))?;
    assert_eq!(third, RowLocation::new(2, 0));
    assert_eq!(heap.page_count()?, 3);

    assert_eq!(heap.read_row(small)?, Some(row_of(500, 3)));
    Ok(())
}

#[test]
fn test_row_too_large() -> Result<(), DatabaseError> {
    let dir = tempdir()?;
    let heap = HeapFile::create(dir.path().join("t.tbl"))?;

    let location = heap.insert_row(&row_of(MAX_ROW_SIZE, 9))?;
    assert_eq!(location, RowLocation::new(0, 0));

    match heap.insert_row(&row_of(MAX_ROW_SIZE + 1, 9)) {
        Err(DatabaseError::RowTooLarge { size, max }) => {
            assert_eq!(size, MAX_ROW_SIZE + 1);
            assert_eq!(max, MAX_ROW_SIZE);
        }
        other => panic!("Expected RowTooLarge, got {:?}", other),
    }
    assert_eq!(heap.page_count()?, 1);
    Ok(())
}

#[test]
fn test_update_and_delete_rows() -> Result<(), DatabaseError> {
    let dir = tempdir()?;
    let heap = HeapFile::create(dir.path().join("t.tbl"))?;
    let location = heap.insert_row(b"original")?;

    assert!(heap.update_row(location, b"short")?);
    assert_eq!(heap.read_row(location)?, Some(b"short".to_vec()));
    assert!(!heap.update_row(location, b"much longer than before")?);
    assert_eq!(heap.read_row(location)?, Some(b"short".to_vec()));

    assert!(heap.delete_row(location)?);
    assert!(!heap.delete_row(location)?);
    assert_eq!(heap.read_row(location)?, None);
    assert!(!heap.update_row(location, b"x")?);

    // out of range page
    assert!(!heap.delete_row(RowLocation::new(9, 0))?);
    assert!(!heap.update_row(RowLocation::new(9, 0), b"x")?);
    assert_eq!(heap.read_row(RowLocation::new(9, 0))?, None);
    Ok(())
}

#[test]
fn test_reopen_sees_persisted_pages() -> Result<(), DatabaseError> {
    let dir = tempdir()?;
    let path = dir.path().join("t.tbl");
    let location = HeapFile::create(&path)?.insert_row(b"durable")?;

    let heap = HeapFile::open(&path)?;
    assert_eq!(heap.read_row(location)?, Some(b"durable".to_vec()));

    let page = heap.read_page(0)?;
    assert_eq!(page.slot_count(), 1);

    let mut rewritten = Page::new();
    rewritten.insert(b"replaced")?;
    heap.write_page(0, &rewritten)?;
    assert_eq!(heap.read_row(location)?, Some(b"replaced".to_vec()));
    Ok(())
}

#[test]
fn test_create_truncates() -> Result<(), DatabaseError> {
    let dir = tempdir()?;
    let path = dir.path().join("t.tbl");
    HeapFile::create(&path)?.insert_row(b"gone")?;
    let heap = HeapFile::create(&path)?;
    assert_eq!(heap.page_count()?, 0);
    Ok(())
}

#[test]
fn test_corrupted_page_header_is_an_error() -> Result<(), DatabaseError> {
    let dir = tempdir()?;
    let path = dir.path().join("t.tbl");
    HeapFile::create(&path)?.insert_row(b"first")?;

    // zero the header: free_end = 0 would place the next row out of bounds
    let mut bytes = std::fs::read(&path)?;
    bytes[0..6].fill(0);
    std::fs::write(&path, &bytes)?;

    let heap = HeapFile::open(&path)?;
    assert!(matches!(heap.read_page(0), Err(DatabaseError::InvalidData { .. })));
    assert!(matches!(heap.insert_row(b"second"), Err(DatabaseError::InvalidData { .. })));
    assert!(matches!(
        heap.read_row(RowLocation::new(0, 0)),
        Err(DatabaseError::InvalidData { .. })
    ));
    Ok(())
}
