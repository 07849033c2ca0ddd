// lister/src/storage/path_utils.rs
use std::path::PathBuf;

/// Where a report goes when no output path is given.
pub fn default_report_path(file_name: &str) -> PathBuf {
    let root_dir = std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."));

    root_dir.join(file_name)
}
