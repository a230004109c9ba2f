use super::*;

fn code(code: &str) -> DiagnosisCode {
    DiagnosisCode { id: 1, code: code.to_owned(), description: format!("{code} description") }
}

#[test]
fn toggle_code_adds_then_removes() {
    let mut selected = Vec::new();
    toggle_code(&mut selected, code("A00"));
    assert!(is_selected(&selected, "A00"));

    toggle_code(&mut selected, code("A00"));
    assert!(selected.is_empty());
}

#[test]
fn toggle_code_keeps_selection_order() {
    let mut selected = Vec::new();
    toggle_code(&mut selected, code("A01"));
    toggle_code(&mut selected, code("A00"));
    let codes: Vec<&str> = selected.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, ["A01", "A00"]);
}

#[test]
fn is_selected_matches_on_code_only() {
    let mut other = code("A00");
    other.id = 99;
    let selected = vec![code("A00")];
    assert!(is_selected(&selected, &other.code));
    assert!(!is_selected(&selected, "B00"));
}
