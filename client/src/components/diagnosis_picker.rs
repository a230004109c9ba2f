//! Diagnosis code search with a selectable result list.
//!
//! DESIGN
//! ======
//! Each keystroke issues a search; responses carry the sequence number of
//! the request that produced them and only the latest one is applied, so a
//! slow early response cannot overwrite newer results.

#[cfg(test)]
#[path = "diagnosis_picker_test.rs"]
mod diagnosis_picker_test;

use leptos::prelude::*;

use crate::net::api::ApiClient;
use crate::net::types::DiagnosisCode;

/// Add `code` if absent, remove it if already selected. Keyed on `code`.
pub(crate) fn toggle_code(selected: &mut Vec<DiagnosisCode>, code: DiagnosisCode) {
    if let Some(pos) = selected.iter().position(|c| c.code == code.code) {
        selected.remove(pos);
    } else {
        selected.push(code);
    }
}

pub(crate) fn is_selected(selected: &[DiagnosisCode], code: &str) -> bool {
    selected.iter().any(|c| c.code == code)
}

#[component]
pub fn DiagnosisPicker(selected: RwSignal<Vec<DiagnosisCode>>) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let term = RwSignal::new(String::new());
    let results = RwSignal::new(Vec::<DiagnosisCode>::new());
    let error = RwSignal::new(None::<String>);
    let latest = RwSignal::new(0_u64);

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        term.set(value.clone());
        let seq = latest.get_untracked() + 1;
        latest.set(seq);

        #[cfg(feature = "csr")]
        {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                let outcome = api.search_diagnosis(&value).await;
                if latest.get_untracked() != seq {
                    return;
                }
                match outcome {
                    Ok(codes) => {
                        results.set(codes);
                        error.set(None);
                    }
                    Err(e) => error.set(Some(format!("Search failed: {e}"))),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&api, value, seq);
        }
    };

    view! {
        <div class="diagnosis-picker">
            <input
                class="diagnosis-picker__search"
                type="search"
                placeholder="Search diagnosis code or description"
                prop:value=move || term.get()
                on:input=on_input
            />
            <Show when=move || error.get().is_some()>
                <p class="diagnosis-picker__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <ul class="diagnosis-picker__results">
                <For
                    each=move || results.get()
                    key=|code| code.code.clone()
                    children=move |code| {
                        let label = format!("{} {}", code.code, code.description);
                        let key = code.code.clone();
                        view! {
                            <li
                                class="diagnosis-picker__result"
                                class:diagnosis-picker__result--selected=move || selected.with(|s| is_selected(s, &key))
                                on:click=move |_| selected.update(|s| toggle_code(s, code.clone()))
                            >
                                {label}
                            </li>
                        }
                    }
                />
            </ul>
            <div class="diagnosis-picker__chosen">
                <For
                    each=move || selected.get()
                    key=|code| code.code.clone()
                    children=move |code| {
                        let label = code.code.clone();
                        view! {
                            <button
                                class="chip"
                                type="button"
                                title="Remove"
                                on:click=move |_| selected.update(|s| toggle_code(s, code.clone()))
                            >
                                {label}
                                " ✕"
                            </button>
                        }
                    }
                />
            </div>
        </div>
    }
}
