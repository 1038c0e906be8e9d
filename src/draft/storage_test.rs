use super::*;

#[test]
fn memory_storage_round_trips_values() {
    let storage = MemoryStorage::new();
    storage.set_item("k", "v").unwrap();
    assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
    assert_eq!(storage.len(), 1);
}

#[test]
fn memory_storage_missing_key_is_none() {
    let storage = MemoryStorage::new();
    assert!(storage.get_item("absent").unwrap().is_none());
    assert!(storage.is_empty());
}

#[test]
fn memory_storage_remove_missing_key_is_ok() {
    let storage = MemoryStorage::new();
    storage.remove_item("absent").unwrap();
}

#[test]
fn memory_storage_clones_share_entries() {
    let storage = MemoryStorage::new();
    let reloaded = storage.clone();
    storage.set_item("k", "v").unwrap();
    assert_eq!(reloaded.raw("k").as_deref(), Some("v"));
}

#[test]
fn memory_storage_rejected_writes_leave_entries_untouched() {
    let storage = MemoryStorage::new();
    storage.set_item("k", "before").unwrap();
    storage.reject_writes(true);

    let err = storage.set_item("k", "after").unwrap_err();
    assert!(matches!(err, StorageError::Write(_)));
    assert!(storage.remove_item("k").is_err());
    assert_eq!(storage.raw("k").as_deref(), Some("before"));

    storage.reject_writes(false);
    storage.set_item("k", "after").unwrap();
    assert_eq!(storage.raw("k").as_deref(), Some("after"));
}

#[test]
fn memory_storage_rejected_reads_fail_until_reenabled() {
    let storage = MemoryStorage::new();
    storage.set_item("k", "v").unwrap();
    storage.reject_reads(true);

    assert!(matches!(storage.get_item("k").unwrap_err(), StorageError::Read(_)));
    assert_eq!(storage.raw("k").as_deref(), Some("v"));

    storage.reject_reads(false);
    assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn storage_error_codes_are_stable() {
    assert_eq!(StorageError::Read(String::new()).error_code(), "E_STORAGE_READ");
    assert_eq!(StorageError::Write(String::new()).error_code(), "E_STORAGE_WRITE");
    assert_eq!(StorageError::Decode(String::new()).error_code(), "E_STORAGE_DECODE");
    assert_eq!(StorageError::Encode(String::new()).error_code(), "E_STORAGE_ENCODE");
}
