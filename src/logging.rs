use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILE: &str = "main.log";

/// Where log lines go, and why the file was left out if it was.
pub struct LogOutput {
    pub writer: BoxMakeWriter,
    pub file_error: Option<String>,
}

/// Installs the global subscriber: stderr plus an append-only log file.
///
/// `RUST_LOG` overrides the default filter. If the log file cannot be opened
/// the bot keeps going with stderr only.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,homework_bot=debug"));
    let path = std::env::var("BOT_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let output = log_output(Path::new(&path));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(output.writer)
        .init();

    if let Some(reason) = output.file_error {
        tracing::warn!("{}, logging to stderr only", reason);
    }
}

/// Stderr tee'd into `path`, or stderr alone when `path` cannot be opened.
pub fn log_output(path: &Path) -> LogOutput {
    match open_log_file(path) {
        Ok(file) => LogOutput {
            writer: BoxMakeWriter::new(io::stderr.and(Mutex::new(file))),
            file_error: None,
        },
        Err(e) => LogOutput {
            writer: BoxMakeWriter::new(io::stderr),
            file_error: Some(format!("Cannot open log file {}: {}", path.display(), e)),
        },
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
