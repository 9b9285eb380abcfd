//! Application startup and command dispatch

use std::sync::OnceLock;

use clap::Parser;

use super::cli::{Args, Command};
use super::commands;

// flexi_logger stops logging when its handle drops, so it is kept for the
// process lifetime.
static LOGGER_HANDLE: OnceLock<flexi_logger::LoggerHandle> = OnceLock::new();

fn init_logging(level: &str) {
    match flexi_logger::Logger::try_with_str(level).and_then(|logger| logger.start()) {
        Ok(handle) => {
            let _ = LOGGER_HANDLE.set(handle);
        }
        Err(err) => eprintln!("Failed to initialize logging: {err}"),
    }
}

/// Initialize application startup
pub fn startup() {
    let args = Args::parse();

    init_logging(&args.log_level);
    if args.no_color {
        colored::control::set_override(false);
    }

    log::debug!(
        "handled-errors build {} ({})",
        crate::BUILD_TIME,
        crate::GIT_HASH
    );

    let code = match &args.command {
        Command::Show { path, last, trace } => commands::show(path, *last, *trace),
        Command::Verify { path } => commands::verify(path),
        Command::Record {
            directory,
            source,
            kind,
            message,
        } => commands::record(directory, source, kind, message),
    };

    std::process::exit(code);
}
