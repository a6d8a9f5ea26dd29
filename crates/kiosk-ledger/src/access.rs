use serde::Serialize;

/// Outcome of a best-effort permission grant on the ledger file.
///
/// Grants never fail the operation that triggered them; callers get this
/// report next to their primary result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AccessGrant {
    Granted { email: String },
    Failed { email: String, reason: String },
}

impl AccessGrant {
    pub fn email(&self) -> &str {
        match self {
            Self::Granted { email } | Self::Failed { email, .. } => email,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }
}
