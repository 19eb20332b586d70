use lembar::{
    executor::{
        scan::{ScanIterator, Scanner},
        sequential_scan::SequentialScanner,
    },
    storage::heap_file::HeapFile,
    types::{error::DatabaseError, row::RowLocation},
};
use tempfile::tempdir;

fn heap_with_rows(path: &std::path::Path, rows: &[&[u8]]) -> Result<HeapFile, DatabaseError> {
    let heap = HeapFile::create(path)?;
    for row in rows {
        heap.insert_row(row)?;
    }
    Ok(heap)
}

#[test]
fn test_scan_empty_table() -> Result<(), DatabaseError> {
    let dir = tempdir()?;
    let heap = HeapFile::create(dir.path().join("t.tbl"))?;
    let mut scanner = SequentialScanner::new(heap, None);

    assert_eq!(scanner.scan()?, None);
    assert!(scanner.scan_batch(10)?.is_empty());
    Ok(())
}

#[test]
fn test_scan_yields_physical_order() -> Result<(), DatabaseError> {
    let dir = tempdir()?;
    let heap = heap_with_rows(&dir.path().join("t.tbl"), &[&b"a"[..], &b"b"[..], &b"c"[..]])?;

    let rows = SequentialScanner::new(heap, None).scan_all()?;
    let locations: Vec<RowLocation> = rows.iter().map(|row| row.location).collect();
    assert_eq!(
        locations,
        vec![
            RowLocation::new(0, 0),
            RowLocation::new(0, 1),
            RowLocation::new(0, 2)
        ]
    );
    assert_eq!(rows[1].bytes, b"b".to_vec());
    Ok(())
}

#[test]
fn test_scan_skips_tombstones_across_pages() -> Result<(), DatabaseError> {
    let dir = tempdir()?;
    let big = vec![7u8; 3000];
    let heap = heap_with_rows(
        &dir.path().join("t.tbl"),
        &[big.as_slice(), big.as_slice(), &b"tail"[..]],
    )?;
    // big on page 0 and 1, tail on page 0
    assert!(heap.delete_row(RowLocation::new(0, 0))?);

    let rows = SequentialScanner::new(heap, None).scan_all()?;
    let locations: Vec<RowLocation> = rows.iter().map(|row| row.location).collect();
    assert_eq!(
        locations,
        vec![RowLocation::new(0, 1), RowLocation::new(1, 0)]
    );
    assert_eq!(rows[0].bytes, b"tail".to_vec());
    Ok(())
}

#[test]
fn test_scan_batches_and_reset() -> Result<(), DatabaseError> {
    let dir = tempdir()?;
    let rows: Vec<Vec<u8>> = (0..10).map(|i| format!("row_{}", i).into_bytes()).collect();
    let refs: Vec<&[u8]> = rows.iter().map(Vec::as_slice).collect();
    let heap = heap_with_rows(&dir.path().join("t.tbl"), &refs)?;

    let mut scanner = SequentialScanner::new(heap, Some(4));
    assert_eq!(scanner.batch_size(), 4);
    assert_eq!(scanner.scan_batch(4)?.len(), 4);
    assert_eq!(scanner.scan_batch(4)?.len(), 4);
    assert_eq!(scanner.scan_batch(4)?.len(), 2);
    assert!(scanner.scan_batch(4)?.is_empty());

    scanner.reset()?;
    let first = scanner.scan()?.unwrap();
    assert_eq!(first.bytes, b"row_0".to_vec());
    Ok(())
}

#[test]
fn test_scan_all_independent_of_batch_size() -> Result<(), DatabaseError> {
    let dir = tempdir()?;
    let rows: Vec<Vec<u8>> = (0..50).map(|i| vec![i as u8 + 1; 200]).collect();
    let refs: Vec<&[u8]> = rows.iter().map(Vec::as_slice).collect();
    let heap = heap_with_rows(&dir.path().join("t.tbl"), &refs)?;

    let one = SequentialScanner::new(heap.clone(), Some(1)).scan_all()?;
    let many = SequentialScanner::new(heap.clone(), Some(64)).scan_all()?;
    assert_eq!(one.len(), 50);
    assert_eq!(one, many);
    Ok(())
}

#[test]
fn test_rows_appended_mid_scan_on_new_pages_are_not_seen() -> Result<(), DatabaseError> {
    let dir = tempdir()?;
    let heap = heap_with_rows(&dir.path().join("t.tbl"), &[&b"first"[..]])?;

    let mut iter = ScanIterator::new(SequentialScanner::new(heap.clone(), None));
    assert_eq!(iter.next().transpose()?.map(|row| row.bytes), Some(b"first".to_vec()));

    // forces a second page
    heap.insert_row(&vec![1u8; 4080])?;
    assert!(iter.next().is_none());
    Ok(())
}
