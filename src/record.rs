//! Transaction records and the line parser.

use crate::error::ParseError;
use crate::money::Amount;
use chrono::NaiveDate;
use std::fmt;

/// Textual layout of the date field.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Field separator of the input format.
pub const SEPARATOR: char = ',';

/// One parsed transaction: `<label>,<amount>,<dd-mm-yyyy>`.
///
/// A `Record` is only ever built from three well-formed fields; malformed
/// input yields a [`ParseError`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    label: String,
    amount: Amount,
    date: NaiveDate,
}

impl Record {
    /// Parses a raw line by splitting on commas.
    ///
    /// Convenience wrapper over [`Record::from_fields`] for callers holding
    /// a whole line; file ingestion splits with `csv` and calls
    /// `from_fields` directly, so both paths classify lines identically.
    /// Fields after the third are ignored. Quoting is not supported, so a
    /// comma inside a label shifts the remaining fields.
    pub fn parse_line(line: &str) -> Result<Self, ParseError> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let fields: Vec<&str> = line.split(SEPARATOR).collect();
        Self::from_fields(&fields)
    }

    /// Builds a record from already split fields.
    ///
    /// Trailing empty fields are discarded before indexing, so `a,1.0,` is a
    /// short line rather than a line with an empty date.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, ParseError> {
        let len = fields
            .iter()
            .rposition(|f| !f.as_ref().is_empty())
            .map_or(0, |last| last + 1);
        let fields = &fields[..len];

        let field = |index: usize| {
            fields
                .get(index)
                .map(AsRef::<str>::as_ref)
                .ok_or(ParseError::MissingField {
                    index,
                    found: fields.len(),
                })
        };

        let label = field(0)?;
        let amount_text = field(1)?;
        let date_text = field(2)?;

        if label.is_empty() {
            return Err(ParseError::EmptyLabel);
        }

        let amount = amount_text
            .parse::<Amount>()
            .map_err(|source| ParseError::InvalidAmount {
                value: amount_text.to_string(),
                source,
            })?;

        let date = NaiveDate::parse_from_str(date_text.trim(), DATE_FORMAT).map_err(|source| {
            ParseError::InvalidDate {
                value: date_text.to_string(),
                source,
            }
        })?;

        Ok(Record {
            label: label.to_string(),
            amount,
            date,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for Record {
    /// Re-serializes the record in its input layout.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.label,
            SEPARATOR,
            self.amount,
            SEPARATOR,
            self.date.format(DATE_FORMAT)
        )
    }
}
