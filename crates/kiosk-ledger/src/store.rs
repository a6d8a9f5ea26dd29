use std::sync::Arc;

use bytes::Bytes;
use kiosk_store::{FileId, FileMetadata, ObjectStore, PermissionGrant, CSV_MIME};
use kiosk_types::Record;
use tokio::sync::Mutex;

use crate::access::AccessGrant;
use crate::codec;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;

/// Result of a committed [`LedgerStore::transact`] cycle.
#[derive(Clone, Debug)]
pub struct Appended {
    /// The ledger file, possibly created by this call.
    pub file: FileId,
    /// `true` if the file did not exist before.
    pub created: bool,
    /// The rows this call appended.
    pub records: Vec<Record>,
    /// Total rows in the ledger after the append.
    pub total: usize,
}

/// Access to the named ledger file in a remote object store.
pub struct LedgerStore {
    store: Arc<dyn ObjectStore>,
    name: String,
    write_lock: Mutex<()>,
}

impl LedgerStore {
    pub fn new(store: Arc<dyn ObjectStore>, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Name of the ledger file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Locate the ledger file. When several files share the name, the first
    /// one the store lists wins.
    pub async fn find_ledger(&self) -> LedgerResult<Option<FileId>> {
        let mut matches = self.store.list_by_name(&self.name).await?;
        if matches.len() > 1 {
            tracing::warn!(
                ledger = %self.name,
                count = matches.len(),
                "several ledger files share this name; using the first"
            );
        }
        Ok(if matches.is_empty() {
            None
        } else {
            Some(matches.swap_remove(0))
        })
    }

    /// Download and parse the ledger file.
    pub async fn read_ledger(&self, file: &FileId) -> LedgerResult<Ledger> {
        let bytes = self.store.get_media(file).await?;
        codec::decode(&bytes).inspect_err(|e| {
            tracing::error!(ledger = %self.name, file = %file, error = %e, "cannot parse ledger");
        })
    }

    /// Current ledger contents, or an empty ledger if the file does not exist.
    pub async fn snapshot(&self) -> LedgerResult<Ledger> {
        match self.find_ledger().await? {
            Some(file) => self.read_ledger(&file).await,
            None => Ok(Ledger::default()),
        }
    }

    /// Write `existing ++ new` back to the store.
    ///
    /// With no `file`, a new ledger file is created from `new` alone.
    pub async fn append_and_save(
        &self,
        file: Option<&FileId>,
        existing: Ledger,
        new: Vec<Record>,
    ) -> LedgerResult<FileId> {
        match file {
            Some(file) => {
                let updated = existing.concat(new);
                let content = Bytes::from(codec::encode(&updated)?);
                self.store.update_media(file, CSV_MIME, content).await?;
                tracing::info!(ledger = %self.name, file = %file, rows = updated.len(), "ledger updated");
                Ok(file.clone())
            }
            None => {
                let fresh = Ledger::from_records(new);
                let content = Bytes::from(codec::encode(&fresh)?);
                let file = self
                    .store
                    .create(&FileMetadata::csv(&self.name), content)
                    .await?;
                tracing::info!(ledger = %self.name, file = %file, rows = fresh.len(), "ledger created");
                Ok(file)
            }
        }
    }

    /// Read-modify-write cycle.
    ///
    /// `build` sees the current ledger and returns the rows to append, or an
    /// error that aborts the cycle without writing. Cycles in this process
    /// are serialized.
    pub async fn transact<F, E>(&self, build: F) -> Result<Appended, E>
    where
        F: FnOnce(&Ledger) -> Result<Vec<Record>, E>,
        E: From<LedgerError>,
    {
        let _guard = self.write_lock.lock().await;

        let file = self.find_ledger().await?;
        let existing = match &file {
            Some(file) => self.read_ledger(file).await?,
            None => Ledger::default(),
        };
        let new = build(&existing)?;
        let total = existing.len() + new.len();
        let saved = self
            .append_and_save(file.as_ref(), existing, new.clone())
            .await?;
        Ok(Appended {
            file: saved,
            created: file.is_none(),
            records: new,
            total,
        })
    }

    /// Best-effort: give each recipient write access to the ledger file.
    /// Failures are logged and reported, never returned as errors.
    pub async fn grant_access(&self, file: &FileId, recipients: &[String]) -> Vec<AccessGrant> {
        let mut outcomes = Vec::with_capacity(recipients.len());
        for email in recipients {
            let grant = PermissionGrant::writer(email.clone());
            match self.store.set_permission(file, &grant).await {
                Ok(()) => {
                    tracing::debug!(file = %file, email = %email, "ledger shared");
                    outcomes.push(AccessGrant::Granted { email: email.clone() });
                }
                Err(e) => {
                    tracing::warn!(file = %file, email = %email, error = %e, "cannot share ledger");
                    outcomes.push(AccessGrant::Failed {
                        email: email.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        outcomes
    }

    /// Shareable link to the ledger file, or `None` if it does not exist yet.
    pub async fn link(&self) -> LedgerResult<Option<String>> {
        match self.find_ledger().await? {
            Some(file) => Ok(self.store.web_link(&file).await?),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStore").field("name", &self.name).finish()
    }
}
