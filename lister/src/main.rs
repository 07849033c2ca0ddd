// lister/src/main.rs
use clap::Parser;
use lister_core::logging::logging::init_file_logger;
use lister_core::onscreen_error;
use lister_core::storage::lister_config::{config_path, current_config};
use std::process::ExitCode;

mod cli;
mod storage;

fn main() -> ExitCode {
    let args = cli::Args::parse();

    // Keep the handle alive so buffered log lines reach the file
    let _logger = match init_file_logger() {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Could not start the file logger: {e}.");
            None
        }
    };

    match cli::run(&args, &current_config(), &config_path()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            onscreen_error!("{e}");
            ExitCode::FAILURE
        }
    }
}
