use std::sync::Arc;

use kiosk_imagegen::{ImageGenerator, ImageRequest};
use kiosk_ledger::{LedgerError, LedgerStore};
use kiosk_quota::{QuotaStore, Reservation};
use kiosk_store::ObjectStore;
use kiosk_types::{fields, timestamp, Record, StallNo};

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::forms::{GenerationRequest, RegistrationForm};
use crate::outcome::{Generated, LimitStatus, Registered};

/// Registration and image quota service.
pub struct KioskService {
    config: ServiceConfig,
    ledger: LedgerStore,
    quota: Arc<dyn QuotaStore>,
    images: Arc<dyn ImageGenerator>,
}

impl KioskService {
    pub fn new(
        config: ServiceConfig,
        store: Arc<dyn ObjectStore>,
        quota: Arc<dyn QuotaStore>,
        images: Arc<dyn ImageGenerator>,
    ) -> Self {
        let ledger = LedgerStore::new(store, config.ledger_name.clone());
        Self {
            config,
            ledger,
            quota,
            images,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    /// Record a new registration.
    ///
    /// Fields are validated before the ledger is touched. The duplicate check
    /// runs inside the ledger transaction so two registrations for the same
    /// stall in this process cannot both pass.
    pub async fn register(&self, form: RegistrationForm) -> ServiceResult<Registered> {
        let stall = form.validate(self.config.registration_schema)?;
        let record = form.to_record(&stall, &timestamp::now_iso());
        let reject_duplicates = self.config.reject_duplicate_stalls;

        let appended = self
            .ledger
            .transact(|existing| {
                if reject_duplicates && existing.contains_stall(stall.as_str()) {
                    return Err(ServiceError::DuplicateStall(stall.clone()));
                }
                Ok(vec![record.clone()])
            })
            .await
            .inspect_err(|e| log_failure("register", &stall, e))?;

        let access = self
            .ledger
            .grant_access(&appended.file, &self.config.admin_emails)
            .await;

        tracing::info!(
            stall = %stall,
            file = %appended.file,
            rows = appended.total,
            created = appended.created,
            "registration saved"
        );
        Ok(Registered {
            record,
            ledger: appended.file,
            access,
        })
    }

    /// Generate one image for a stall and record it.
    ///
    /// The quota slot is claimed before anything else, so an exhausted stall
    /// never reaches the image API. If the registration lookup or the image
    /// call fails, the slot is released. Once the image exists it counts,
    /// even if writing the ledger row afterwards fails.
    pub async fn generate_image(&self, request: GenerationRequest) -> ServiceResult<Generated> {
        let (stall, prompt) = request.validate()?;
        let limit = self.config.generation_limit;

        let reservation = self.quota.reserve(&stall, limit)?;
        let (identity, image_url) = match self.produce_image(&stall, &prompt).await {
            Ok(produced) => produced,
            Err(e) => {
                self.release(reservation);
                log_failure("generate", &stall, &e);
                return Err(e);
            }
        };
        let used = self.quota.commit(reservation)?;

        let mut record = Record::new().with(fields::TIMESTAMP, timestamp::now_iso());
        for field in fields::IDENTITY {
            if let Some(value) = identity.as_ref().and_then(|r| r.get(field)) {
                record.set(field, value);
            }
        }
        record.set(fields::STALL_NO, stall.as_str());
        record.set(fields::PROMPT, prompt.as_str());
        record.set(fields::GENERATED_IMAGE_URL, image_url.as_str());
        record.set(fields::GENERATION_NUMBER, used.to_string());

        let row = record.clone();
        self.ledger
            .transact(move |_| Ok::<_, LedgerError>(vec![row]))
            .await
            .map_err(ServiceError::from)
            .inspect_err(|e| log_failure("generate", &stall, e))?;

        let remaining = limit.saturating_sub(used);
        tracing::info!(stall = %stall, generation = used, remaining, "image generated");
        Ok(Generated {
            image_url,
            generation_number: used,
            remaining,
            record,
        })
    }

    /// Quota view for a stall. Reads only the in-memory counter.
    pub fn check_limit(&self, stall_no: &str) -> ServiceResult<LimitStatus> {
        let stall = StallNo::parse(stall_no)?;
        let usage = self.quota.usage(&stall);
        Ok(LimitStatus::new(usage.used, self.config.generation_limit))
    }

    /// Shareable link to the ledger file, `None` before the first registration.
    pub async fn ledger_link(&self) -> ServiceResult<Option<String>> {
        Ok(self.ledger.link().await?)
    }

    async fn produce_image(
        &self,
        stall: &StallNo,
        prompt: &str,
    ) -> ServiceResult<(Option<Record>, String)> {
        let identity = if self.config.require_registration {
            let ledger = self.ledger.snapshot().await?;
            let registration = ledger
                .latest_for_stall(stall.as_str())
                .cloned()
                .ok_or_else(|| ServiceError::NotRegistered(stall.clone()))?;
            Some(registration)
        } else {
            None
        };

        let request = ImageRequest::new(prompt)
            .with_size(self.config.image_size.clone())
            .with_quality(self.config.image_quality.clone());
        let urls = self.images.generate(&request).await?;
        let url = urls
            .into_iter()
            .next()
            .ok_or(kiosk_imagegen::ImageGenError::EmptyResponse)?;
        Ok((identity, url))
    }

    fn release(&self, reservation: Reservation) {
        if let Err(e) = self.quota.release(reservation) {
            tracing::error!(error = %e, "cannot release quota reservation");
        }
    }
}

fn log_failure(operation: &str, stall: &StallNo, err: &ServiceError) {
    if err.is_upstream() {
        tracing::error!(operation, stall = %stall, error = %err, "upstream failure");
    } else {
        tracing::debug!(operation, stall = %stall, error = %err, "request rejected");
    }
}

impl std::fmt::Debug for KioskService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KioskService")
            .field("ledger", &self.ledger)
            .field("generation_limit", &self.config.generation_limit)
            .field("images", &self.images.provider())
            .finish()
    }
}
