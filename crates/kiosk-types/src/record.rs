use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fields;

/// One row of the ledger.
///
/// Fields keep insertion order, which becomes column order when a ledger is
/// first written. Empty values are never stored: an empty CSV cell and an
/// absent field read back the same way.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Record::set`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Set `field` to `value`, replacing any previous value in place.
    /// An empty `value` removes the field.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        let pos = self.fields.iter().position(|(name, _)| *name == field);
        match (pos, value.is_empty()) {
            (Some(i), true) => {
                self.fields.remove(i);
            }
            (Some(i), false) => self.fields[i].1 = value,
            (None, true) => {}
            (None, false) => self.fields.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// The raw `Stall_No` value, if present.
    pub fn stall_no(&self) -> Option<&str> {
        self.get(fields::STALL_NO)
    }

    /// Returns `true` if this row belongs to `stall` (trimmed, exact match).
    pub fn is_for_stall(&self, stall: &str) -> bool {
        self.stall_no().map(str::trim) == Some(stall)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field-wise equality ignoring the given columns and field order.
    pub fn same_fields_except(&self, other: &Record, ignored: &[&str]) -> bool {
        let keep = |(k, _): &(&str, &str)| !ignored.contains(k);
        let mut a: Vec<_> = self.iter().filter(keep).collect();
        let mut b: Vec<_> = other.iter().filter(keep).collect();
        a.sort();
        b.sort();
        a == b
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}
