//! Ledger CSV parsing and spending analysis.
//!
//! Vault contents are plain `date,category,amount` CSV ledgers. Research
//! queries are answered locally: parse the decrypted ledger, run the
//! aggregate predicate, submit only the boolean. The raw rows never leave
//! the client.
//!
//! Parsing is deliberately forgiving — the original uploads come from
//! hand-exported bank statements, so malformed rows are dropped rather than
//! failing the whole file.

mod error;

pub use error::{DatasetError, DatasetResult};

use serde::{Deserialize, Serialize};

/// One ledger row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpendingRecord {
    pub date: String,
    pub category: String,
    pub amount: f64,
}

/// Parses a ledger CSV into spending records.
///
/// - A leading header line is skipped when it mentions "date".
/// - Rows need at least three columns; surrounding quotes are stripped and
///   currency symbols removed from the amount.
/// - Rows with an unparseable amount are dropped.
/// - Empty input yields an empty vec, not an error.
pub fn parse_ledger_csv(csv: &str) -> DatasetResult<Vec<SpendingRecord>> {
    let lines: Vec<&str> = csv.lines().filter(|line| !line.trim().is_empty()).collect();

    let start = match lines.first() {
        Some(first) if first.to_lowercase().contains("date") => 1,
        Some(_) => 0,
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for line in &lines[start..] {
        let columns: Vec<String> = line
            .split(',')
            .map(|col| col.trim().replace('"', ""))
            .collect();

        if columns.len() < 3 {
            continue;
        }

        let amount_text: String = columns[2]
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();

        let Ok(amount) = amount_text.parse::<f64>() else {
            continue;
        };

        records.push(SpendingRecord {
            date: columns[0].clone(),
            category: columns[1].clone(),
            amount,
        });
    }

    Ok(records)
}

/// Returns true when the average spend in a category exceeds the threshold.
///
/// Category matching is a case-insensitive substring match; no matching
/// rows means false, never an error.
pub fn average_spending_exceeds(
    records: &[SpendingRecord],
    category: &str,
    threshold: f64,
) -> bool {
    let needle = category.to_lowercase();
    let matching: Vec<&SpendingRecord> = records
        .iter()
        .filter(|r| r.category.to_lowercase().contains(&needle))
        .collect();

    if matching.is_empty() {
        return false;
    }

    let total: f64 = matching.iter().map(|r| r.amount).sum();
    let average = total / matching.len() as f64;
    average > threshold
}
