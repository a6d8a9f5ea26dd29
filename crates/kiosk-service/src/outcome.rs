use kiosk_ledger::AccessGrant;
use kiosk_store::FileId;
use kiosk_types::Record;
use serde::Serialize;

/// A saved registration.
#[derive(Clone, Debug)]
pub struct Registered {
    pub record: Record,
    pub ledger: FileId,
    /// Best-effort sharing results; never affects success.
    pub access: Vec<AccessGrant>,
}

/// A generated and recorded image.
#[derive(Clone, Debug)]
pub struct Generated {
    pub image_url: String,
    /// 1-based number of this generation for the stall.
    pub generation_number: u32,
    pub remaining: u32,
    pub record: Record,
}

/// Quota view for one stall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LimitStatus {
    pub remaining: u32,
    pub total: u32,
    pub used: u32,
}

impl LimitStatus {
    pub fn new(used: u32, total: u32) -> Self {
        Self {
            remaining: total.saturating_sub(used),
            total,
            used,
        }
    }
}
