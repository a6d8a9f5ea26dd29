//! Column names used in the ledger file.
//!
//! The column set has grown over time; older files may carry only a subset.
//! Lookups are by exact name.

pub const TIMESTAMP: &str = "Timestamp";
pub const NAME: &str = "Name";
pub const EMAIL: &str = "Email";
pub const STALL_NO: &str = "Stall_No";
pub const PROJECT_NAME: &str = "Project_Name";
pub const PROMPT: &str = "Prompt";
pub const GENERATED_IMAGE_URL: &str = "Generated_Image_URL";
pub const GENERATION_NUMBER: &str = "Generation_Number";

/// Identity columns copied from a registration row onto generation rows.
pub const IDENTITY: [&str; 3] = [NAME, EMAIL, PROJECT_NAME];
