use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectStore;
use crate::types::{FileId, FileMetadata, PermissionGrant};

#[derive(Clone, Debug)]
struct StoredFile {
    metadata: FileMetadata,
    content: Bytes,
    permissions: Vec<PermissionGrant>,
}

/// In-memory, HashMap-based object store.
///
/// Intended for tests and offline runs. Files are held behind a `RwLock`;
/// creation order is kept so `list_by_name` is deterministic. Failures can be
/// injected to exercise upstream error paths.
pub struct InMemoryObjectStore {
    files: RwLock<HashMap<FileId, StoredFile>>,
    order: RwLock<Vec<FileId>>,
    media_reads: AtomicUsize,
    fail_permissions: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            order: RwLock::new(Vec::new()),
            media_reads: AtomicUsize::new(0),
            fail_permissions: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Seed a file directly, bypassing failure injection.
    pub fn insert(&self, name: &str, content: impl Into<Bytes>) -> FileId {
        let id = FileId::new(Uuid::now_v7().to_string());
        let file = StoredFile {
            metadata: FileMetadata::csv(name),
            content: content.into(),
            permissions: Vec::new(),
        };
        self.files.write().expect("lock poisoned").insert(id.clone(), file);
        self.order.write().expect("lock poisoned").push(id.clone());
        id
    }

    /// Current content of a file.
    pub fn content(&self, id: &FileId) -> Option<Bytes> {
        let files = self.files.read().expect("lock poisoned");
        files.get(id).map(|f| f.content.clone())
    }

    /// Permissions granted on a file so far.
    pub fn permissions(&self, id: &FileId) -> Vec<PermissionGrant> {
        let files = self.files.read().expect("lock poisoned");
        files.get(id).map(|f| f.permissions.clone()).unwrap_or_default()
    }

    /// Number of files currently stored.
    pub fn len(&self) -> usize {
        self.files.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.files.read().expect("lock poisoned").is_empty()
    }

    /// How many times `get_media` has been called.
    pub fn media_reads(&self) -> usize {
        self.media_reads.load(Ordering::SeqCst)
    }

    /// Make every subsequent `set_permission` fail until reset.
    pub fn fail_permissions(&self, fail: bool) {
        self.fail_permissions.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `create`/`update_media` fail until reset.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 503,
                body: "injected write failure".into(),
            });
        }
        Ok(())
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn list_by_name(&self, name: &str) -> StoreResult<Vec<FileId>> {
        let files = self.files.read().expect("lock poisoned");
        let order = self.order.read().expect("lock poisoned");
        Ok(order
            .iter()
            .filter(|id| files.get(*id).is_some_and(|f| f.metadata.name == name))
            .cloned()
            .collect())
    }

    async fn get_media(&self, id: &FileId) -> StoreResult<Bytes> {
        self.media_reads.fetch_add(1, Ordering::SeqCst);
        self.content(id).ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn create(&self, metadata: &FileMetadata, content: Bytes) -> StoreResult<FileId> {
        self.check_writable()?;
        let id = FileId::new(Uuid::now_v7().to_string());
        let file = StoredFile {
            metadata: metadata.clone(),
            content,
            permissions: Vec::new(),
        };
        self.files.write().expect("lock poisoned").insert(id.clone(), file);
        self.order.write().expect("lock poisoned").push(id.clone());
        Ok(id)
    }

    async fn update_media(&self, id: &FileId, mime_type: &str, content: Bytes) -> StoreResult<()> {
        self.check_writable()?;
        let mut files = self.files.write().expect("lock poisoned");
        let file = files
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        file.metadata.mime_type = mime_type.to_string();
        file.content = content;
        Ok(())
    }

    async fn set_permission(&self, id: &FileId, grant: &PermissionGrant) -> StoreResult<()> {
        if self.fail_permissions.load(Ordering::SeqCst) {
            return Err(StoreError::Permission(format!(
                "cannot share with {}",
                grant.email
            )));
        }
        let mut files = self.files.write().expect("lock poisoned");
        let file = files
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        file.permissions.push(grant.clone());
        Ok(())
    }

    async fn web_link(&self, id: &FileId) -> StoreResult<Option<String>> {
        let files = self.files.read().expect("lock poisoned");
        if !files.contains_key(id) {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(Some(format!("memory://files/{id}")))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("file_count", &self.len())
            .finish()
    }
}
