use std::fmt;

use serde::{Deserialize, Serialize};

/// MIME type used for the ledger file.
pub const CSV_MIME: &str = "text/csv";

/// Store-assigned identifier of a remote file.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata supplied when creating a file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

impl FileMetadata {
    pub fn csv(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: CSV_MIME.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionRole {
    Reader,
    Commenter,
    Writer,
}

impl PermissionRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reader => "reader",
            Self::Commenter => "commenter",
            Self::Writer => "writer",
        }
    }
}

/// A per-user permission to add to a file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub email: String,
    pub role: PermissionRole,
    /// Ask the store to notify the recipient by email.
    pub notify: bool,
}

impl PermissionGrant {
    pub fn writer(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: PermissionRole::Writer,
            notify: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_id_display() {
        let id = FileId::new("abc");
        assert_eq!(id.to_string(), "abc");
        assert_eq!(format!("{id:?}"), "FileId(abc)");
    }

    #[test]
    fn writer_grant_notifies() {
        let g = PermissionGrant::writer("admin@example.com");
        assert_eq!(g.role, PermissionRole::Writer);
        assert_eq!(g.role.as_str(), "writer");
        assert!(g.notify);
    }

    #[test]
    fn csv_metadata() {
        let m = FileMetadata::csv("registrations.csv");
        assert_eq!(m.mime_type, CSV_MIME);
    }
}
