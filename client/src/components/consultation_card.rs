//! Card summarizing one consultation note in the list view.

#[cfg(test)]
#[path = "consultation_card_test.rs"]
mod consultation_card_test;

use leptos::prelude::*;

use crate::net::types::{Consultation, ConsultationDiagnosis};

const NOTES_PREVIEW_CHARS: usize = 140;

pub(crate) fn diagnosis_summary(diagnoses: &[ConsultationDiagnosis]) -> String {
    if diagnoses.is_empty() {
        return "No diagnoses".to_owned();
    }
    diagnoses
        .iter()
        .map(|d| format!("{} {}", d.code, d.description))
        .collect::<Vec<_>>()
        .join(", ")
}

/// First `max_chars` characters of the notes, with an ellipsis when cut.
pub(crate) fn notes_preview(notes: Option<&str>, max_chars: usize) -> String {
    let notes = notes.map(str::trim).unwrap_or_default();
    if notes.chars().count() <= max_chars {
        return notes.to_owned();
    }
    let cut: String = notes.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

#[component]
pub fn ConsultationCard(consultation: Consultation) -> impl IntoView {
    let diagnoses = diagnosis_summary(&consultation.diagnoses);
    let notes = notes_preview(consultation.notes.as_deref(), NOTES_PREVIEW_CHARS);
    let has_notes = !notes.is_empty();

    view! {
        <article class="consultation-card">
            <header class="consultation-card__header">
                <span class="consultation-card__patient">{consultation.patient_name}</span>
                <span class="consultation-card__date">{consultation.consultation_date}</span>
            </header>
            <p class="consultation-card__diagnoses">{diagnoses}</p>
            <Show when=move || has_notes>
                <p class="consultation-card__notes">{notes.clone()}</p>
            </Show>
            <footer class="consultation-card__footer">{consultation.doctor_name}</footer>
        </article>
    }
}
