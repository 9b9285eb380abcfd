//! CLI arguments structure and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Global arguments structure with all command-line options
#[derive(Parser, Debug)]
#[command(name = "handled-errors")]
#[command(about = "Inspect and exercise a handled-error audit log")]
#[command(version)]
pub struct Args {
    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: String,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print log entries in append order
    Show {
        /// Data directory or log file path
        path: PathBuf,

        /// Show only the last N entries
        #[arg(long = "last", value_name = "N")]
        last: Option<usize>,

        /// Include the full stacktrace of each entry
        #[arg(long = "trace")]
        trace: bool,
    },

    /// Parse the log document and report its health without modifying it
    Verify {
        /// Data directory or log file path
        path: PathBuf,
    },

    /// Append one synthetic entry through the regular write path
    Record {
        /// Data directory holding the log
        directory: PathBuf,

        /// Call-site identifier for the entry
        #[arg(long, value_name = "SOURCE", default_value = "cli")]
        source: String,

        /// Error kind for the entry
        #[arg(long, value_name = "KIND", default_value = "synthetic")]
        kind: String,

        /// Error message for the entry
        #[arg(long, value_name = "TEXT", default_value = "synthetic handled error")]
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_defaults_use_plain_synthetic_labels() {
        let args = Args::try_parse_from(["handled-errors", "record", "data"]).unwrap();
        match args.command {
            Command::Record {
                source,
                kind,
                message,
                ..
            } => {
                assert_eq!(source, "cli");
                assert_eq!(kind, "synthetic");
                assert_eq!(message, "synthetic handled error");
            }
            _ => panic!("expected the record subcommand"),
        }
    }
}

