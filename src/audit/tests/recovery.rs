//! Self-healing and initialization-failure tests

use std::fs;

use tempfile::TempDir;

use crate::audit::api::{Cause, ErrorLog, ErrorLogDocument};

fn reload(log: &ErrorLog) -> ErrorLogDocument {
    let bytes = fs::read(log.path().unwrap()).unwrap();
    ErrorLogDocument::parse(&bytes).unwrap()
}

#[test]
fn garbage_file_heals_to_single_new_entry() {
    let dir = TempDir::new().unwrap();
    let log = ErrorLog::open(dir.path());

    fs::write(log.path().unwrap(), b"\x00\x01 definitely not xml >>>").unwrap();
    log.record("x", Some(&Cause::new("test::Err", "after corruption")));

    let document = reload(&log);
    assert_eq!(document.len(), 1);
    assert_eq!(document.records()[0].source, "x");
}

#[test]
fn wrong_root_is_discarded() {
    let dir = TempDir::new().unwrap();
    let log = ErrorLog::open(dir.path());

    fs::write(
        log.path().unwrap(),
        "<notes><error timestamp=\"2024-01-01T00:00:00Z\" /></notes>",
    )
    .unwrap();
    log.record("x", Some(&Cause::new("test::Err", "fresh start")));

    let document = reload(&log);
    assert_eq!(document.len(), 1);
    assert_eq!(document.records()[0].message, "fresh start");
}

#[test]
fn missing_file_is_recreated_on_append() {
    let dir = TempDir::new().unwrap();
    let log = ErrorLog::open(dir.path());

    fs::remove_file(log.path().unwrap()).unwrap();
    log.record("x", Some(&Cause::new("test::Err", "recreate")));

    assert!(log.path().unwrap().exists());
    assert_eq!(reload(&log).len(), 1);
}

#[test]
fn corrupt_file_does_not_disable_open() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("handled-errors.xml");
    fs::write(&file, "truncated <errors><err").unwrap();

    let log = ErrorLog::open(dir.path());
    assert!(log.is_enabled());
    // The corrupt contents survive until the next append heals them.
    assert_eq!(
        fs::read(&file).unwrap(),
        b"truncated <errors><err".to_vec()
    );

    log.record("x", Some(&Cause::new("test::Err", "healed")));
    assert_eq!(reload(&log).len(), 1);
}

#[test]
fn unusable_directory_yields_disabled_noop_handle() {
    let dir = TempDir::new().unwrap();
    // Occupy the directory path with a plain file so create_dir_all fails.
    let occupied = dir.path().join("occupied");
    fs::write(&occupied, "not a directory").unwrap();

    let log = ErrorLog::open(&occupied);
    assert!(!log.is_enabled());
    assert!(log.path().is_none());

    // Disabled handles swallow records without panicking.
    log.record("x", Some(&Cause::new("test::Err", "dropped")));
    assert_eq!(fs::read_to_string(&occupied).unwrap(), "not a directory");
}

#[test]
fn explicitly_disabled_handle_is_a_noop() {
    let log = ErrorLog::disabled();
    assert!(!log.is_enabled());
    log.record("x", Some(&Cause::new("test::Err", "dropped")));
}
