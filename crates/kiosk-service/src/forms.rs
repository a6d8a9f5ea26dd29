//! Inbound request payloads and their validation.
//!
//! Missing JSON fields deserialize to empty strings so that absence and
//! blankness are both reported as validation errors by the service.

use kiosk_types::{fields, Record, StallNo};
use serde::{Deserialize, Serialize};

use crate::config::RegistrationSchema;
use crate::error::{ServiceError, ServiceResult};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub project_name: String,
    pub stall_no: String,
}

impl RegistrationForm {
    pub fn project(project_name: impl Into<String>, stall_no: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            stall_no: stall_no.into(),
            ..Self::default()
        }
    }

    pub fn attendee(
        name: impl Into<String>,
        email: impl Into<String>,
        stall_no: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            stall_no: stall_no.into(),
            ..Self::default()
        }
    }

    /// Check the fields `schema` requires. Returns the parsed stall number.
    pub fn validate(&self, schema: RegistrationSchema) -> ServiceResult<StallNo> {
        match schema {
            RegistrationSchema::Attendee => {
                required(&self.name, "name")?;
                required(&self.email, "email")?;
            }
            RegistrationSchema::Project => {
                required(&self.project_name, "project name")?;
            }
        }
        Ok(StallNo::parse(&self.stall_no)?)
    }

    /// Ledger row for this registration. Blank optional fields are left out.
    pub fn to_record(&self, stall: &StallNo, timestamp: &str) -> Record {
        Record::new()
            .with(fields::TIMESTAMP, timestamp)
            .with(fields::NAME, self.name.trim())
            .with(fields::EMAIL, self.email.trim())
            .with(fields::PROJECT_NAME, self.project_name.trim())
            .with(fields::STALL_NO, stall.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationRequest {
    pub prompt: String,
    pub stall_no: String,
}

impl GenerationRequest {
    pub fn new(stall_no: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            stall_no: stall_no.into(),
        }
    }

    /// Returns the stall and the trimmed prompt.
    pub fn validate(&self) -> ServiceResult<(StallNo, String)> {
        let prompt = required(&self.prompt, "prompt")?.to_string();
        let stall = StallNo::parse(&self.stall_no)?;
        Ok((stall, prompt))
    }
}

fn required<'a>(value: &'a str, label: &str) -> ServiceResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Validation(format!("{label} must not be empty")));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_schema_requires_project_name() {
        let form = RegistrationForm::project("  ", "A1");
        let err = form.validate(RegistrationSchema::Project).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == "project name must not be empty"));
        assert!(RegistrationForm::project("Solar car", "A1")
            .validate(RegistrationSchema::Project)
            .is_ok());
    }

    #[test]
    fn attendee_schema_requires_name_and_email() {
        let missing_email = RegistrationForm::attendee("Ada", "", "A1");
        assert!(missing_email.validate(RegistrationSchema::Attendee).is_err());
        let ok = RegistrationForm::attendee("Ada", "ada@example.com", " A1 ");
        assert_eq!(ok.validate(RegistrationSchema::Attendee).unwrap().as_str(), "A1");
    }

    #[test]
    fn blank_stall_is_rejected() {
        let form = RegistrationForm::project("Solar car", "\t");
        let err = form.validate(RegistrationSchema::Project).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m.contains("stall number")));
    }

    #[test]
    fn record_skips_blank_optional_fields() {
        let form = RegistrationForm::project(" Solar car ", "A1");
        let stall = form.validate(RegistrationSchema::Project).unwrap();
        let record = form.to_record(&stall, "ts");
        let names: Vec<_> = record.field_names().collect();
        assert_eq!(names, vec![fields::TIMESTAMP, fields::PROJECT_NAME, fields::STALL_NO]);
        assert_eq!(record.get(fields::PROJECT_NAME), Some("Solar car"));
    }

    #[test]
    fn camel_case_payload_with_missing_fields() {
        let form: RegistrationForm =
            serde_json::from_str(r#"{"projectName":"Rover","stallNo":"B2"}"#).unwrap();
        assert_eq!(form.project_name, "Rover");
        assert_eq!(form.name, "");

        let req: GenerationRequest = serde_json::from_str(r#"{"prompt":"a cat"}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn generation_prompt_is_trimmed() {
        let (stall, prompt) = GenerationRequest::new("A1", "  a cat  ").validate().unwrap();
        assert_eq!(stall.as_str(), "A1");
        assert_eq!(prompt, "a cat");
        assert!(GenerationRequest::new("A1", " ").validate().is_err());
    }
}
