//! Wire DTOs for the ClinicCare REST backend.
//!
//! DESIGN
//! ======
//! These types mirror the backend's JSON bodies field for field so serde
//! round-trips stay lossless. Dates travel as ISO strings; the client only
//! displays them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The authenticated clinician. Persisted under the `doctor` storage key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Successful `POST /auth/login` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// A searchable diagnosis code (e.g. `A00` cholera).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisCode {
    pub id: i64,
    pub code: String,
    pub description: String,
}

/// Diagnosis as embedded in a consultation response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationDiagnosis {
    pub code: String,
    pub description: String,
}

/// Body of `POST /consultation`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConsultationCreate {
    pub patient_name: String,
    /// `YYYY-MM-DD`.
    pub consultation_date: String,
    pub notes: Option<String>,
    pub diagnosis_codes: Vec<String>,
}

/// A stored consultation note.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultation {
    pub id: i64,
    pub patient_name: String,
    pub consultation_date: String,
    pub notes: Option<String>,
    pub doctor_name: String,
    #[serde(default)]
    pub diagnoses: Vec<ConsultationDiagnosis>,
    pub created_at: String,
}

/// Error envelope returned by the backend on non-2xx responses.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub detail: ErrorDetail,
}

/// `detail` is a plain message for handled errors and a list of field
/// issues for request validation failures.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Validation(Vec<ValidationIssue>),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ValidationIssue {
    pub msg: String,
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
}

impl ErrorDetail {
    /// Human-readable message for display in forms.
    pub fn message(&self) -> String {
        match self {
            Self::Message(msg) => msg.clone(),
            Self::Validation(issues) => issues
                .iter()
                .map(|issue| match issue.loc.last().and_then(serde_json::Value::as_str) {
                    Some(field) => format!("{field}: {}", issue.msg),
                    None => issue.msg.clone(),
                })
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}
