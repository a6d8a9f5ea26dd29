use kiosk_types::StallNo;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuotaError {
    #[error("stall {stall} has used {used} of {limit} generations")]
    Exceeded { stall: StallNo, used: u32, limit: u32 },

    #[error("no outstanding reservation for stall {0}")]
    UnknownReservation(StallNo),
}

pub type QuotaResult<T> = Result<T, QuotaError>;
