//! Run configuration from command-line arguments and environment variables.
//!
//! - Positional arguments replace the default list of input files.
//! - `MERGE_LOG_FILE` sets the log file path; an empty value disables it.
//! - `MERGE_CURRENCY` sets the currency symbol used in the summary.

use std::env;
use std::path::PathBuf;

/// Files imported when no arguments are given.
pub const DEFAULT_FILES: [&str; 4] = [
    "transactions1.csv",
    "transactions2.csv",
    "transactions3.csv",
    "transactions4.csv",
];

pub const DEFAULT_LOG_FILE: &str = "logs.txt";
pub const DEFAULT_CURRENCY: &str = "$";

pub const LOG_FILE_VAR: &str = "MERGE_LOG_FILE";
pub const CURRENCY_VAR: &str = "MERGE_CURRENCY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Input files, imported in this order.
    pub files: Vec<PathBuf>,
    /// Additional log destination besides the console.
    pub log_file: Option<PathBuf>,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            files: DEFAULT_FILES.into_iter().map(PathBuf::from).collect(),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            currency_symbol: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Config {
    /// Reads the process arguments and environment.
    pub fn from_env() -> Self {
        Self::from_sources(env::args().skip(1), |key| env::var(key).ok())
    }

    /// Builds a configuration from explicit arguments (without the program
    /// name) and an environment lookup.
    pub fn from_sources<I, F>(args: I, lookup: F) -> Self
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        let files: Vec<PathBuf> = args.into_iter().map(PathBuf::from).collect();
        if !files.is_empty() {
            config.files = files;
        }

        if let Some(path) = lookup(LOG_FILE_VAR) {
            config.log_file = if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }

        if let Some(symbol) = lookup(CURRENCY_VAR) {
            config.currency_symbol = symbol;
        }

        config
    }
}
