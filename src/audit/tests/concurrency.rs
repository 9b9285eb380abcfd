//! Concurrency safety: parallel appends must lose no entries

use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;

use tempfile::TempDir;

use crate::audit::api::{Cause, ErrorLog, ErrorLogDocument};

#[test]
fn concurrent_records_lose_no_entries() {
    let dir = TempDir::new().unwrap();
    let log = Arc::new(ErrorLog::open(dir.path()));
    assert!(log.is_enabled());

    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let log = Arc::clone(&log);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let cause = Cause::new("test::ConcurrentError", format!("from thread {i}"));
                log.record(&format!("thread-{i}"), Some(&cause));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // The rewritten file must be well-formed and contain every entry.
    let bytes = fs::read(log.path().unwrap()).unwrap();
    let document = ErrorLogDocument::parse(&bytes).unwrap();
    assert_eq!(document.len(), threads);

    let mut sources: Vec<_> = document
        .records()
        .iter()
        .map(|entry| entry.source.clone())
        .collect();
    sources.sort();
    let mut expected: Vec<_> = (0..threads).map(|i| format!("thread-{i}")).collect();
    expected.sort();
    assert_eq!(sources, expected);
}

#[test]
fn timestamps_never_decrease_across_sequential_appends() {
    let dir = TempDir::new().unwrap();
    let log = ErrorLog::open(dir.path());

    for i in 0..3 {
        log.record(&format!("s{i}"), Some(&Cause::new("test::Err", "tick")));
    }

    let bytes = fs::read(log.path().unwrap()).unwrap();
    let document = ErrorLogDocument::parse(&bytes).unwrap();
    let stamps: Vec<_> = document.records().iter().map(|e| e.timestamp).collect();
    assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]));
}
