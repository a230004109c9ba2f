use super::*;

// =============================================================
// Doctor
// =============================================================

#[test]
fn doctor_deserializes_full_backend_shape() {
    let raw = r#"{"id":7,"email":"x@clinic.test","full_name":"Dr. X","is_active":true,"created_at":"2024-11-02T10:00:00"}"#;
    let doctor: Doctor = serde_json::from_str(raw).unwrap();
    assert_eq!(doctor.id, 7);
    assert_eq!(doctor.full_name, "Dr. X");
    assert_eq!(doctor.created_at.as_deref(), Some("2024-11-02T10:00:00"));
}

#[test]
fn doctor_optional_fields_default() {
    let raw = r#"{"id":1,"email":"x@clinic.test","full_name":"Dr. X"}"#;
    let doctor: Doctor = serde_json::from_str(raw).unwrap();
    assert!(doctor.is_active);
    assert!(doctor.created_at.is_none());
}

// =============================================================
// Consultation
// =============================================================

#[test]
fn consultation_create_serializes_null_notes() {
    let body = ConsultationCreate {
        patient_name: "John Doe".to_owned(),
        consultation_date: "2024-11-02".to_owned(),
        notes: None,
        diagnosis_codes: vec!["A00".to_owned()],
    };
    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(value["notes"], serde_json::Value::Null);
    assert_eq!(value["diagnosis_codes"], serde_json::json!(["A00"]));
}

#[test]
fn consultation_response_parses_diagnoses() {
    let raw = serde_json::json!({
        "id": 3,
        "patient_name": "John Doe",
        "consultation_date": "2024-11-02",
        "notes": "fever",
        "doctor_name": "Dr. X",
        "diagnoses": [{"code": "A00", "description": "Cholera"}],
        "created_at": "2024-11-02T10:00:00"
    });
    let consultation: Consultation = serde_json::from_value(raw).unwrap();
    assert_eq!(consultation.diagnoses.len(), 1);
    assert_eq!(consultation.diagnoses[0].code, "A00");
}

// =============================================================
// ErrorBody
// =============================================================

#[test]
fn error_detail_plain_message() {
    let body: ErrorBody = serde_json::from_str(r#"{"detail":"Email already registered"}"#).unwrap();
    assert_eq!(body.detail.message(), "Email already registered");
}

#[test]
fn error_detail_validation_list_joins_fields() {
    let raw = r#"{"detail":[
        {"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error"},
        {"loc":["body","password"],"msg":"field required","type":"missing"}
    ]}"#;
    let body: ErrorBody = serde_json::from_str(raw).unwrap();
    assert_eq!(
        body.detail.message(),
        "email: value is not a valid email address; password: field required"
    );
}
