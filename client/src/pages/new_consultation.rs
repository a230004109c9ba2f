//! New consultation form: patient, date, notes, and diagnosis codes.

#[cfg(test)]
#[path = "new_consultation_test.rs"]
mod new_consultation_test;

use leptos::prelude::*;
use leptos_router::components::A;
#[cfg(feature = "csr")]
use leptos_router::hooks::use_navigate;

use crate::components::app_header::AppHeader;
use crate::components::diagnosis_picker::DiagnosisPicker;
use crate::net::api::ApiClient;
use crate::net::types::{ConsultationCreate, DiagnosisCode};
use crate::routes::CONSULTATIONS_PATH;

/// `YYYY-MM-DD` with a plausible month and day.
pub(crate) fn is_iso_date(value: &str) -> bool {
    let parts: Vec<&str> = value.split('-').collect();
    let &[year, month, day] = parts.as_slice() else {
        return false;
    };
    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !(digits(year, 4) && digits(month, 2) && digits(day, 2)) {
        return false;
    }
    let month: u32 = month.parse().unwrap_or(0);
    let day: u32 = day.parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// Build the request body from raw form fields.
pub(crate) fn build_consultation(
    patient_name: &str,
    consultation_date: &str,
    notes: &str,
    diagnoses: &[DiagnosisCode],
) -> Result<ConsultationCreate, &'static str> {
    let patient_name = patient_name.trim();
    if patient_name.is_empty() {
        return Err("Enter the patient's name.");
    }
    let consultation_date = consultation_date.trim();
    if !is_iso_date(consultation_date) {
        return Err("Enter the consultation date as YYYY-MM-DD.");
    }
    if diagnoses.is_empty() {
        return Err("Select at least one diagnosis code.");
    }
    let notes = notes.trim();
    Ok(ConsultationCreate {
        patient_name: patient_name.to_owned(),
        consultation_date: consultation_date.to_owned(),
        notes: (!notes.is_empty()).then(|| notes.to_owned()),
        diagnosis_codes: diagnoses.iter().map(|d| d.code.clone()).collect(),
    })
}

#[component]
pub fn NewConsultationPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    #[cfg(feature = "csr")]
    let navigate = use_navigate();

    let patient_name = RwSignal::new(String::new());
    let consultation_date = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let selected = RwSignal::new(Vec::<DiagnosisCode>::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let body = match build_consultation(
            &patient_name.get(),
            &consultation_date.get(),
            &notes.get(),
            &selected.get(),
        ) {
            Ok(body) => body,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Saving...".to_owned());

        #[cfg(feature = "csr")]
        {
            let api = api.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match api.create_consultation(&body).await {
                    Ok(_) => navigate(CONSULTATIONS_PATH, leptos_router::NavigateOptions::default()),
                    Err(e) => info.set(format!("Could not save consultation: {e}")),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&api, body);
        }
    };

    view! {
        <AppHeader/>
        <div class="consultation-form-page">
            <h1>"New consultation"</h1>
            <form class="consultation-form" on:submit=on_submit>
                <label class="consultation-form__label">
                    "Patient name"
                    <input
                        class="consultation-form__input"
                        type="text"
                        prop:value=move || patient_name.get()
                        on:input=move |ev| patient_name.set(event_target_value(&ev))
                    />
                </label>
                <label class="consultation-form__label">
                    "Date"
                    <input
                        class="consultation-form__input"
                        type="date"
                        prop:value=move || consultation_date.get()
                        on:input=move |ev| consultation_date.set(event_target_value(&ev))
                    />
                </label>
                <label class="consultation-form__label">
                    "Notes"
                    <textarea
                        class="consultation-form__notes"
                        prop:value=move || notes.get()
                        on:input=move |ev| notes.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <DiagnosisPicker selected=selected/>
                <div class="consultation-form__actions">
                    <A href=CONSULTATIONS_PATH attr:class="btn">"Cancel"</A>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Save"
                    </button>
                </div>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="consultation-form__message">{move || info.get()}</p>
            </Show>
        </div>
    }
}
