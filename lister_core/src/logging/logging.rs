// lister_core/src/logging/logging.rs
use std::io::{self, Write};
use std::sync::Mutex;
use flexi_logger::{
    Cleanup,
    Criterion,
    DeferredNow,
    FileSpec,
    FlexiLoggerError,
    Logger,
    LoggerHandle,
    Naming,
    WriteMode,
};
use log::Record;
use once_cell::sync::Lazy;
use crate::constants::LOG_BASENAME;
use crate::storage::lister_config::app_dir;

// Global mutable buffer that stores the most recent message.
pub static LAST_LOG: Lazy<Mutex<String>> = Lazy::new(|| Mutex::new(String::new()));

/// Helper macro that allow logs to be displayed by
/// the program and printed to the console.
#[macro_export]
macro_rules! onscreen_log {
    ($lvl:expr, $($arg:tt)*) => {{
        println!($($arg)*);
        log::log!($lvl, $($arg)*);
        if let Ok(mut buf) = $crate::logging::logging::LAST_LOG.lock() {
            *buf = format!($($arg)*);
        }
    }};
}

/// Helper macro that allow logs to be displayed by the program.
#[macro_export]
macro_rules! onscreen_info  { ($($arg:tt)*) => { $crate::onscreen_log!(log::Level::Info,  $($arg)*) }; }

/// Helper macro that allow logs to be displayed by the program.
#[macro_export]
macro_rules! onscreen_warn  { ($($arg:tt)*) => { $crate::onscreen_log!(log::Level::Warn,  $($arg)*) }; }

/// Helper macro that allow logs to be displayed by the program.
#[macro_export]
macro_rules! onscreen_error { ($($arg:tt)*) => { $crate::onscreen_log!(log::Level::Error, $($arg)*) }; }

/// Helper macro that allow logs to be displayed by the program.
#[macro_export]
macro_rules! onscreen_debug { ($($arg:tt)*) => { $crate::onscreen_log!(log::Level::Debug, $($arg)*) }; }

/// Returns the most recent onscreen message.
pub fn last_log() -> String {
    LAST_LOG.lock().map(|buf| buf.clone()).unwrap_or_default()
}

/// Initializes the file logger. Keep the handle alive for as long as
/// messages should be flushed to disk.
pub fn init_file_logger() -> Result<LoggerHandle, FlexiLoggerError> {
    let log_dir = app_dir().join("logs");

    let file_spec = FileSpec::default()
        .directory(&log_dir)
        .basename(LOG_BASENAME)
        .suffix("log");

    let handle = Logger::try_with_str("info")?
        .log_to_file(file_spec)
        .format(line_formatter)
        .rotate(
            Criterion::Size(5_000_000),
            Naming::Numbers,
            Cleanup::KeepLogFiles(5),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .start()?;

    log::info!("Log dir: {}.", log_dir.display());
    Ok(handle)
}

fn line_formatter(
    write: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> io::Result<()> {
    write!(
        write,
        "{} {:5} [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.module_path().unwrap_or("<unknown>"),
        &record.args()
    )
}
