use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreResult;
use crate::types::{FileId, FileMetadata, PermissionGrant};

/// Remote named-file store.
///
/// All implementations must satisfy these invariants:
/// - `list_by_name` returns every file whose name matches exactly, in the
///   store's own order. Callers that want a single file take the first.
/// - `update_media` replaces the full content of an existing file.
/// - Missing files are reported as [`StoreError::NotFound`](crate::StoreError::NotFound),
///   never as empty content.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Find files by exact name.
    async fn list_by_name(&self, name: &str) -> StoreResult<Vec<FileId>>;

    /// Download the full content of a file.
    async fn get_media(&self, id: &FileId) -> StoreResult<Bytes>;

    /// Create a new file with the given content and return its ID.
    async fn create(&self, metadata: &FileMetadata, content: Bytes) -> StoreResult<FileId>;

    /// Overwrite the content of an existing file.
    async fn update_media(&self, id: &FileId, mime_type: &str, content: Bytes) -> StoreResult<()>;

    /// Add a permission on a file.
    async fn set_permission(&self, id: &FileId, grant: &PermissionGrant) -> StoreResult<()>;

    /// Shareable browser link for a file, if the store provides one.
    async fn web_link(&self, id: &FileId) -> StoreResult<Option<String>>;
}
