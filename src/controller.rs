//! Orchestration of a single merge run.

use crate::aggregate::{checked_total_value, compute_max_value, compute_total_value};
use crate::config::Config;
use crate::diagnostics::DiagnosticSink;
use crate::ingest::FileIngester;
use crate::money::Amount;
use crate::record::Record;
use std::path::PathBuf;

/// Figures reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub count: usize,
    pub total: Amount,
    pub max: Amount,
}

/// Imports the configured files one after another, then reports totals.
///
/// The controller never stops early: every file is attempted and a summary
/// is always produced.
pub struct RunController<S> {
    files: Vec<PathBuf>,
    currency_symbol: String,
    sink: S,
}

impl<S: DiagnosticSink> RunController<S> {
    pub fn new(config: &Config, sink: S) -> Self {
        RunController {
            files: config.files.clone(),
            currency_symbol: config.currency_symbol.clone(),
            sink,
        }
    }

    /// Ingests all files, then reports and returns the summary.
    pub fn run(&mut self) -> RunSummary {
        let records = self.ingest_all();
        self.report(&records)
    }

    /// Imports every configured file into one collection, in file order.
    pub fn ingest_all(&mut self) -> Vec<Record> {
        let mut records = Vec::new();
        let mut ingester = FileIngester::new(&mut self.sink);
        for file in &self.files {
            ingester.ingest(file, &mut records);
        }
        records
    }

    /// Computes the summary over `records` and emits it at info level.
    ///
    /// A total beyond the representable range is reported as an error and
    /// the saturated value is shown.
    pub fn report(&mut self, records: &[Record]) -> RunSummary {
        let total = match checked_total_value(records) {
            Some(total) => total,
            None => {
                self.sink.error(
                    "total value exceeds the representable range, reporting the saturated value",
                    None,
                );
                compute_total_value(records)
            }
        };
        let summary = RunSummary {
            count: records.len(),
            total,
            max: compute_max_value(records),
        };

        self.sink
            .info(&format!("{} transactions imported", summary.count));
        self.sink.info(&format!(
            "total value: {}",
            summary.total.to_currency(&self.currency_symbol)
        ));
        self.sink.info(&format!(
            "max value: {}",
            summary.max.to_currency(&self.currency_symbol)
        ));

        summary
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
