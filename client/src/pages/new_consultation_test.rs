use super::*;

fn code(code: &str) -> DiagnosisCode {
    DiagnosisCode { id: 1, code: code.to_owned(), description: String::new() }
}

// =============================================================
// is_iso_date
// =============================================================

#[test]
fn iso_date_accepts_calendar_dates() {
    assert!(is_iso_date("2024-11-02"));
    assert!(is_iso_date("1999-12-31"));
}

#[test]
fn iso_date_rejects_other_shapes() {
    assert!(!is_iso_date("02/11/2024"));
    assert!(!is_iso_date("2024-1-02"));
    assert!(!is_iso_date("2024-13-01"));
    assert!(!is_iso_date("2024-00-10"));
    assert!(!is_iso_date("2024-11-32"));
    assert!(!is_iso_date(""));
}

// =============================================================
// build_consultation
// =============================================================

#[test]
fn build_consultation_trims_and_collects_codes() {
    let body = build_consultation(" John Doe ", "2024-11-02", "  fever ", &[code("A00"), code("A01")]).unwrap();
    assert_eq!(body.patient_name, "John Doe");
    assert_eq!(body.notes.as_deref(), Some("fever"));
    assert_eq!(body.diagnosis_codes, ["A00", "A01"]);
}

#[test]
fn build_consultation_blank_notes_are_none() {
    let body = build_consultation("John Doe", "2024-11-02", "   ", &[code("A00")]).unwrap();
    assert!(body.notes.is_none());
}

#[test]
fn build_consultation_validation_messages() {
    assert_eq!(
        build_consultation("", "2024-11-02", "", &[code("A00")]),
        Err("Enter the patient's name.")
    );
    assert_eq!(
        build_consultation("John Doe", "tomorrow", "", &[code("A00")]),
        Err("Enter the consultation date as YYYY-MM-DD.")
    );
    assert_eq!(
        build_consultation("John Doe", "2024-11-02", "", &[]),
        Err("Select at least one diagnosis code.")
    );
}
