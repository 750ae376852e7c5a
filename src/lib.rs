//! # Merge Transactions
//!
//! Reads transaction records from several delimited files, merges them into
//! one collection and reports the count, total value and maximum value.
//!
//! ## Input format
//!
//! One record per line: `<label>,<amount>,<dd-mm-yyyy>`, e.g.
//! `coffee,4.50,03-11-2023`.
//!
//! ## Error policy
//!
//! - A missing file is skipped with a warning.
//! - A malformed line is skipped with an error; the rest of the file is read.
//! - An I/O failure ends the current file; records read so far are kept.
//!
//! ## Example
//!
//! ```no_run
//! use merge_transactions::{Config, LogSink, RunController};
//!
//! let config = Config::default();
//! let summary = RunController::new(&config, LogSink).run();
//! println!("{} records", summary.count);
//! ```

pub mod aggregate;
pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod money;
pub mod record;

pub use aggregate::{checked_total_value, compute_max_value, compute_total_value};
pub use config::Config;
pub use controller::{RunController, RunSummary};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, LogSink, Severity};
pub use error::{AmountError, LogInitError, ParseError, ParseErrorKind};
pub use ingest::FileIngester;
pub use money::Amount;
pub use record::Record;
