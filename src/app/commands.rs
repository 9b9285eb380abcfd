//! Subcommand implementations
//!
//! Each command returns a process exit code; `verify` and `show` are
//! read-only, `record` goes through the same `ErrorLog` write path the
//! embedded component uses.

use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::audit::api::{Cause, ErrorLog, ErrorLogDocument, ErrorRecord, LOG_FILE_NAME};

/// Accept either the data directory or the log file itself.
fn resolve_log_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(LOG_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}

fn load_document(path: &Path) -> Result<ErrorLogDocument, String> {
    let file = resolve_log_path(path);
    let bytes =
        fs::read(&file).map_err(|err| format!("cannot read {}: {err}", file.display()))?;
    ErrorLogDocument::parse(&bytes)
        .map_err(|err| format!("{} is corrupt: {err}", file.display()))
}

pub fn show(path: &Path, last: Option<usize>, with_trace: bool) -> i32 {
    let document = match load_document(path) {
        Ok(document) => document,
        Err(message) => {
            log::error!("{message}");
            return 1;
        }
    };

    let records = document.records();
    let skip = last.map_or(0, |n| records.len().saturating_sub(n));
    for record in &records[skip..] {
        print_record(record, with_trace);
    }

    if records.is_empty() {
        println!("{}", "no entries".dimmed());
    }
    0
}

fn print_record(record: &ErrorRecord, with_trace: bool) {
    println!(
        "{} {} {}",
        record.timestamp_text().dimmed(),
        record.kind.red(),
        format!("({})", record.source).cyan()
    );
    if !record.message.is_empty() {
        println!("  {}", record.message);
    }
    if with_trace {
        for line in record.trace.lines() {
            println!("  {}", line.dimmed());
        }
    }
}

pub fn verify(path: &Path) -> i32 {
    match load_document(path) {
        Ok(document) => {
            println!(
                "{} {} entries",
                "ok:".green(),
                document.len()
            );
            0
        }
        Err(message) => {
            println!("{} {message}", "corrupt:".red());
            1
        }
    }
}

pub fn record(directory: &Path, source: &str, kind: &str, message: &str) -> i32 {
    let log = ErrorLog::open(directory);
    if !log.is_enabled() {
        log::error!(
            "could not open handled-error log under {}",
            directory.display()
        );
        return 1;
    }

    let cause = Cause::new(kind, message).frame("handled_errors::app::commands::record");
    log.record(source, Some(&cause));

    if let Some(path) = log.path() {
        println!("appended one entry to {}", path.display());
    }
    0
}
