//! Summary statistics over the merged records.

use crate::money::Amount;
use crate::record::Record;

/// Sum of all amounts; zero for an empty collection.
///
/// Saturates at the representable bounds instead of overflowing; use
/// [`checked_total_value`] to detect that case.
pub fn compute_total_value(records: &[Record]) -> Amount {
    records.iter().map(Record::amount).sum()
}

/// Sum of all amounts, or `None` if an intermediate sum overflows.
pub fn checked_total_value(records: &[Record]) -> Option<Amount> {
    records
        .iter()
        .map(Record::amount)
        .try_fold(Amount::ZERO, Amount::checked_add)
}

/// Largest amount, seeded at zero.
///
/// The zero seed means a collection of only negative amounts reports zero.
pub fn compute_max_value(records: &[Record]) -> Amount {
    records
        .iter()
        .map(Record::amount)
        .fold(Amount::ZERO, Amount::max)
}
