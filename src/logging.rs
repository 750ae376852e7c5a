//! Installs the `env_logger` backend behind the `log` facade.
//!
//! Every line goes to stderr and, when a log file is configured, to that
//! file as well. The layout is `LEVEL - message`. The default filter is
//! `debug`; `RUST_LOG` overrides it.

use crate::error::LogInitError;
use env_logger::{Builder, Env, Target, WriteStyle};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "debug";

/// Installs the global logger.
///
/// If the log file cannot be created the console logger is still installed.
/// Every failure is returned, so the caller can report them and carry on.
pub fn init(log_file: Option<&Path>) -> Result<(), Vec<LogInitError>> {
    let mut errors = Vec::new();

    let file = match log_file {
        None => None,
        Some(path) => match File::create(path) {
            Ok(file) => Some(file),
            Err(source) => {
                errors.push(LogInitError::LogFile {
                    path: path.display().to_string(),
                    source,
                });
                None
            }
        },
    };

    let installed = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format(|buf, record| writeln!(buf, "{} - {}", record.level(), record.args()))
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(Tee::new(file))))
        .try_init();
    if let Err(e) = installed {
        errors.push(e.into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Copies log output to stderr and an optional file.
///
/// Write failures are swallowed; a file that fails once is dropped.
struct Tee {
    file: Option<File>,
}

impl Tee {
    fn new(file: Option<File>) -> Self {
        Tee { file }
    }
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let _ = io::stderr().write_all(buf);
        if let Some(file) = self.file.as_mut() {
            if file.write_all(buf).is_err() {
                self.file = None;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let _ = io::stderr().flush();
        if let Some(file) = self.file.as_mut() {
            let _ = file.flush();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_tee_copies_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.txt");

        let mut tee = Tee::new(Some(File::create(&path).unwrap()));
        tee.write_all(b"INFO - import data from a.csv\n").unwrap();
        tee.flush().unwrap();
        drop(tee);

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "INFO - import data from a.csv\n"
        );
    }

    #[test]
    fn test_tee_without_file_never_fails() {
        let mut tee = Tee::new(None);
        assert_eq!(tee.write(b"DEBUG - x\n").unwrap(), 10);
        assert!(tee.flush().is_ok());
    }
}
