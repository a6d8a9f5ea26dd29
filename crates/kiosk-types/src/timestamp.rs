use chrono::{SecondsFormat, Utc};

/// Server-assigned timestamp for new ledger rows (RFC 3339, UTC, microseconds).
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
