use serde::{Deserialize, Serialize};

/// Which identity fields a registration must carry besides the stall number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationSchema {
    /// `name` and `email`.
    Attendee,
    /// `projectName`.
    #[default]
    Project,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Name of the ledger file in the object store.
    pub ledger_name: String,
    /// Images each stall may generate per process lifetime.
    pub generation_limit: u32,
    /// Addresses given write access to the ledger after each registration.
    pub admin_emails: Vec<String>,
    pub registration_schema: RegistrationSchema,
    /// Refuse a registration whose stall already appears in the ledger.
    pub reject_duplicate_stalls: bool,
    /// Refuse generation for stalls with no ledger row, and copy the
    /// registration's identity fields onto generation rows.
    pub require_registration: bool,
    pub image_size: String,
    pub image_quality: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            ledger_name: "registrations.csv".to_string(),
            generation_limit: 3,
            admin_emails: Vec::new(),
            registration_schema: RegistrationSchema::default(),
            reject_duplicate_stalls: true,
            require_registration: true,
            image_size: "1024x1024".to_string(),
            image_quality: "standard".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ServiceConfig::default();
        assert_eq!(c.ledger_name, "registrations.csv");
        assert_eq!(c.generation_limit, 3);
        assert!(c.reject_duplicate_stalls);
        assert!(c.require_registration);
        assert_eq!(c.registration_schema, RegistrationSchema::Project);
    }

    #[test]
    fn schema_names() {
        let s: RegistrationSchema = serde_json::from_str("\"attendee\"").unwrap();
        assert_eq!(s, RegistrationSchema::Attendee);
    }
}
