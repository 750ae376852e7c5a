//! Merge Transactions CLI
//!
//! Imports the configured transaction files and logs a summary.
//!
//! # Usage
//!
//! ```bash
//! cargo run                       # transactions1.csv .. transactions4.csv
//! cargo run -- march.csv april.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: logging filter, `debug` by default
//! - `MERGE_LOG_FILE`: log file path, `logs.txt` by default; empty disables it
//! - `MERGE_CURRENCY`: currency symbol for the summary, `$` by default

use merge_transactions::{logging, Config, DiagnosticSink, LogSink, RunController};

fn main() {
    let config = Config::from_env();
    let mut sink = LogSink;

    if let Err(errors) = logging::init(config.log_file.as_deref()) {
        for e in &errors {
            sink.fatal(
                "unable to initiate file logger, continuing with console output only",
                Some(e),
            );
        }
    }

    RunController::new(&config, sink).run();
}
