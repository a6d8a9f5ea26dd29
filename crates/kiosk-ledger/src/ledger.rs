use kiosk_types::Record;

/// In-memory copy of the ledger file.
///
/// `columns` is the header row. Every field name used by a record appears in
/// `columns`; a record may leave any column blank.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Ledger {
    /// Build a ledger whose columns follow first appearance across `records`.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut ledger = Self::default();
        ledger.extend(records);
        ledger
    }

    pub(crate) fn from_parts(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append `records` after the existing ones. Columns first seen in the new
    /// records are added to the right of the existing header.
    pub fn extend(&mut self, records: impl IntoIterator<Item = Record>) {
        for record in records {
            for name in record.field_names() {
                if !self.columns.iter().any(|c| c == name) {
                    self.columns.push(name.to_string());
                }
            }
            self.records.push(record);
        }
    }

    /// `self ++ records`, existing rows first.
    pub fn concat(mut self, records: Vec<Record>) -> Self {
        self.extend(records);
        self
    }

    /// Any row whose `Stall_No` equals `stall`.
    pub fn contains_stall(&self, stall: &str) -> bool {
        self.records.iter().any(|r| r.is_for_stall(stall))
    }

    /// The most recent row whose `Stall_No` equals `stall`.
    pub fn latest_for_stall(&self, stall: &str) -> Option<&Record> {
        self.records.iter().rev().find(|r| r.is_for_stall(stall))
    }
}
