//! CSV encoding of the ledger file.
//!
//! The file is UTF-8 CSV with a header row and `\n` line endings. Empty
//! cells mean "field absent", and so do cells missing from the end of a
//! short row. Rows longer than the header are rejected. Zero-byte (or whitespace-only) content is an
//! empty ledger; anything else that fails to parse is an error.

use kiosk_types::Record;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;

const BOM: char = '\u{feff}';

pub fn decode(bytes: &[u8]) -> LedgerResult<Ledger> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| LedgerError::Malformed(format!("not valid UTF-8: {e}")))?;
    let text = text.strip_prefix(BOM).unwrap_or(text);
    if text.trim().is_empty() {
        return Ok(Ledger::default());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    for (i, column) in columns.iter().enumerate() {
        if column.is_empty() {
            return Err(LedgerError::Malformed(format!("header column {} is blank", i + 1)));
        }
        if columns[..i].contains(column) {
            return Err(LedgerError::Malformed(format!("duplicate column {column:?}")));
        }
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(malformed)?;
        if row.len() > columns.len() {
            let line = row.position().map_or(0, |p| p.line());
            return Err(LedgerError::Malformed(format!(
                "line {line} has {} fields, header has {}",
                row.len(),
                columns.len()
            )));
        }
        let record: Record = columns
            .iter()
            .zip(row.iter())
            .map(|(c, v)| (c.as_str(), v))
            .collect();
        records.push(record);
    }
    Ok(Ledger::from_parts(columns, records))
}

pub fn encode(ledger: &Ledger) -> LedgerResult<Vec<u8>> {
    if ledger.columns().is_empty() {
        return Ok(Vec::new());
    }
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(ledger.columns()).map_err(encode_err)?;
    for record in ledger.records() {
        writer
            .write_record(ledger.columns().iter().map(|c| record.get(c).unwrap_or("")))
            .map_err(encode_err)?;
    }
    writer
        .into_inner()
        .map_err(|e| LedgerError::Encode(e.to_string()))
}

fn malformed(err: csv::Error) -> LedgerError {
    LedgerError::Malformed(err.to_string())
}

fn encode_err(err: csv::Error) -> LedgerError {
    LedgerError::Encode(err.to_string())
}
