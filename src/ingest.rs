//! Reading transaction files into a shared record collection.
//!
//! Failures are absorbed here: a missing file is skipped with a warning,
//! a bad line is skipped with an error, and an I/O failure ends the current
//! file while keeping whatever was read before it.

use crate::diagnostics::DiagnosticSink;
use crate::error::{ParseError, ParseErrorKind};
use crate::record::{Record, SEPARATOR};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Imports records from delimited files, reporting problems to a sink.
pub struct FileIngester<S> {
    sink: S,
}

impl<S: DiagnosticSink> FileIngester<S> {
    pub fn new(sink: S) -> Self {
        FileIngester { sink }
    }

    /// Appends every valid record of the file at `path` to `target`.
    pub fn ingest(&mut self, path: &Path, target: &mut Vec<Record>) {
        let name = path.display().to_string();
        self.sink.info(&format!("import data from {}", name));

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.sink
                    .warn(&format!("file {} does not exist - skip", name), Some(&e));
                return;
            }
            Err(e) => {
                self.sink
                    .error(&format!("problem reading file {}", name), Some(&e));
                return;
            }
        };

        self.ingest_reader(&name, file, target);
    }

    /// Appends every valid record read from `reader` to `target`.
    ///
    /// `reader` is consumed and dropped before this returns, on every path.
    pub fn ingest_reader<R: Read>(&mut self, source: &str, reader: R, target: &mut Vec<Record>) {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut row = StringRecord::new();
        let mut last_line = String::new();

        loop {
            match csv_reader.read_record(&mut row) {
                Ok(false) => break,
                Ok(true) => {
                    let line_no = row.position().map_or(0, |p| p.line());
                    last_line = raw_line(&row);
                    let fields: Vec<&str> = row.iter().collect();

                    match Record::from_fields(&fields) {
                        Ok(record) => {
                            self.sink
                                .debug(&format!("imported transaction {}", record));
                            target.push(record);
                        }
                        Err(e) => self.report_parse_error(source, line_no, &last_line, &e),
                    }
                }
                Err(e) if e.is_io_error() => {
                    self.sink.error(
                        &format!(
                            "problem reading file {}, last line read: {}",
                            source, last_line
                        ),
                        Some(&e),
                    );
                    break;
                }
                Err(e) => {
                    let line_no = e.position().map_or(0, |p| p.line());
                    let parse_error = ParseError::Malformed {
                        message: e.to_string(),
                    };
                    self.report_parse_error(source, line_no, "<undecodable>", &parse_error);
                }
            }
        }
    }

    fn report_parse_error(&mut self, source: &str, line_no: u64, line: &str, error: &ParseError) {
        let message = match error.kind() {
            ParseErrorKind::NumberFormat => format!(
                "cannot parse amount in {} line {} - please check whether syntax is correct: {}",
                source, line_no, line
            ),
            ParseErrorKind::DateParse => format!(
                "cannot parse date in {} line {} - please check whether syntax is correct: {}",
                source, line_no, line
            ),
            ParseErrorKind::Generic => format!(
                "exception reading data from file {}, line {}: {}",
                source, line_no, line
            ),
        };
        self.sink.error(&message, Some(error));
    }
}

/// Rebuilds the raw text of a line. Exact because quoting is disabled.
fn raw_line(row: &StringRecord) -> String {
    let mut buf = [0u8; 4];
    let separator: &str = SEPARATOR.encode_utf8(&mut buf);
    row.iter().collect::<Vec<_>>().join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingSink, Severity};
    use std::cell::Cell;
    use std::io::Cursor;
    use std::rc::Rc;

    /// Reader that tracks how often it is dropped and can fail once its data runs out.
    struct TrackedReader {
        data: Cursor<Vec<u8>>,
        fail_at_end: bool,
        drops: Rc<Cell<usize>>,
    }

    impl TrackedReader {
        fn new(data: &[u8], fail_at_end: bool) -> (Self, Rc<Cell<usize>>) {
            let drops = Rc::new(Cell::new(0));
            let reader = TrackedReader {
                data: Cursor::new(data.to_vec()),
                fail_at_end,
                drops: Rc::clone(&drops),
            };
            (reader, drops)
        }
    }

    impl Read for TrackedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.data.read(buf)?;
            if n == 0 && self.fail_at_end {
                return Err(io::Error::new(io::ErrorKind::Other, "device unplugged"));
            }
            Ok(n)
        }
    }

    impl Drop for TrackedReader {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    fn ingest_str(input: &str) -> (Vec<Record>, CollectingSink) {
        let mut sink = CollectingSink::new();
        let mut records = Vec::new();
        FileIngester::new(&mut sink).ingest_reader("test", input.as_bytes(), &mut records);
        (records, sink)
    }

    #[test]
    fn test_valid_lines_are_appended_in_order() {
        let (records, sink) = ingest_str("a,1.00,01-01-2020\nb,2.00,02-01-2020\nc,3.00,03-01-2020\n");

        let labels: Vec<&str> = records.iter().map(Record::label).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
        assert_eq!(sink.count(Severity::Debug), 3);
        assert_eq!(sink.count(Severity::Error), 0);
        assert!(sink.events()[0].message.contains("a,1.00,01-01-2020"));
    }

    #[test]
    fn test_bad_lines_are_skipped_not_fatal() {
        let (records, sink) =
            ingest_str("a,1.00,01-01-2020\nb,oops,02-01-2020\nc,3.00,2020-01-03\nbad-line\nd,4.00,04-01-2020\n");

        let labels: Vec<&str> = records.iter().map(Record::label).collect();
        assert_eq!(labels, vec!["a", "d"]);

        let errors: Vec<_> = sink.at(Severity::Error).collect();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].message.contains("cannot parse amount"));
        assert!(errors[0].message.contains("line 2"));
        assert!(errors[0].message.ends_with("b,oops,02-01-2020"));
        assert!(errors[1].message.contains("cannot parse date"));
        assert!(errors[2].message.contains("bad-line"));
        assert!(errors.iter().all(|e| e.cause.is_some()));
    }

    #[test]
    fn test_ingestion_agrees_with_line_parser() {
        let lines = [
            "a,1.00,01-01-2020",
            "b,1_000,01-01-2020",
            "c,2.00,",
            "d,2.00,2020-01-01",
            "e,,01-01-2020",
            ",3.00,01-01-2020",
            "f,4.00,01-01-2020,,extra",
            "g",
        ];
        let (records, sink) = ingest_str(&lines.join("\n"));

        let expected: Vec<Record> = lines
            .iter()
            .filter_map(|line| Record::parse_line(line).ok())
            .collect();
        assert_eq!(records, expected);

        let rejected = lines
            .iter()
            .filter(|line| Record::parse_line(line).is_err())
            .count();
        assert_eq!(sink.count(Severity::Error), rejected);
    }

    #[test]
    fn test_quotes_are_not_special() {
        let (records, _) = ingest_str("\"tea, milk\",1.00,01-01-2020\n\"x\",2.00,01-01-2020\n");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label(), "\"x\"");
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let (records, sink) = ingest_str("a,1.00,01-01-2020\r\n\r\nb,2.00,02-01-2020\r\n");

        assert_eq!(records.len(), 2);
        assert_eq!(sink.count(Severity::Error), 0);
    }

    #[test]
    fn test_invalid_utf8_skips_only_that_line() {
        let mut sink = CollectingSink::new();
        let mut records = Vec::new();
        let input: &[u8] = b"a,1.00,01-01-2020\n\xff\xfe,2.00,01-01-2020\nc,3.00,01-01-2020\n";
        FileIngester::new(&mut sink).ingest_reader("test", input, &mut records);

        assert_eq!(records.len(), 2);
        assert_eq!(sink.count(Severity::Error), 1);
    }

    #[test]
    fn test_reader_released_once_after_success() {
        let (reader, drops) = TrackedReader::new(b"a,1.00,01-01-2020\n", false);
        let mut sink = CollectingSink::new();
        let mut records = Vec::new();
        FileIngester::new(&mut sink).ingest_reader("test", reader, &mut records);

        assert_eq!(records.len(), 1);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_reader_released_once_after_parse_errors() {
        let (reader, drops) = TrackedReader::new(b"junk\nmore,junk\n", false);
        let mut sink = CollectingSink::new();
        let mut records = Vec::new();
        FileIngester::new(&mut sink).ingest_reader("test", reader, &mut records);

        assert!(records.is_empty());
        assert_eq!(sink.count(Severity::Error), 2);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_io_error_keeps_earlier_records_and_releases_reader() {
        let (reader, drops) = TrackedReader::new(b"a,1.00,01-01-2020\nb,2.00,02-01-2020\n", true);
        let mut sink = CollectingSink::new();
        let mut records = Vec::new();
        FileIngester::new(&mut sink).ingest_reader("flaky.csv", reader, &mut records);

        assert_eq!(records.len(), 2);
        assert_eq!(drops.get(), 1);

        let errors: Vec<_> = sink.at(Severity::Error).collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("problem reading file flaky.csv"));
        assert!(errors[0].message.ends_with("b,2.00,02-01-2020"));
        assert!(errors[0].cause.as_deref().unwrap().contains("device unplugged"));
    }

    #[test]
    fn test_missing_file_is_skipped_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CollectingSink::new();
        let mut records = Vec::new();
        FileIngester::new(&mut sink).ingest(&dir.path().join("absent.csv"), &mut records);

        assert!(records.is_empty());
        assert_eq!(sink.count(Severity::Info), 1);
        let warnings: Vec<_> = sink.at(Severity::Warn).collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("absent.csv"));
        assert!(warnings[0].message.ends_with("does not exist - skip"));
    }

    #[test]
    fn test_ingest_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        std::fs::write(&path, "a,1.00,01-01-2020\nb,x,01-01-2020\n").unwrap();

        let mut sink = CollectingSink::new();
        let mut records = vec![Record::parse_line("seed,0.5,01-01-2019").unwrap()];
        FileIngester::new(&mut sink).ingest(&path, &mut records);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label(), "seed");
        assert_eq!(records[1].label(), "a");
        assert!(sink.events()[0].message.starts_with("import data from"));
        assert_eq!(sink.events()[0].severity, Severity::Info);
    }
}
