//! Top bar with the signed-in doctor and a logout action.

#[cfg(test)]
#[path = "app_header_test.rs"]
mod app_header_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::routes::{CONSULTATIONS_PATH, LOGIN_PATH, NEW_CONSULTATION_PATH};
use crate::state::session::{Session, SessionStore};

/// Name shown in the header: full name, else email, else a placeholder while
/// the profile is being fetched.
pub(crate) fn display_name(session: &Session) -> String {
    match &session.doctor {
        Some(doctor) if !doctor.full_name.trim().is_empty() => doctor.full_name.clone(),
        Some(doctor) => doctor.email.clone(),
        None if session.is_authenticated() => "Signed in".to_owned(),
        None => String::new(),
    }
}

#[component]
pub fn AppHeader() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();

    let name = move || session.with(display_name);
    let on_logout = move |_| {
        store.logout();
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    view! {
        <header class="app-header">
            <A href=CONSULTATIONS_PATH attr:class="app-header__brand">"ClinicCare"</A>
            <nav class="app-header__nav">
                <A href=CONSULTATIONS_PATH>"Consultations"</A>
                <A href=NEW_CONSULTATION_PATH>"New consultation"</A>
            </nav>
            <span class="app-header__user">{name}</span>
            <button class="btn" on:click=on_logout>"Log out"</button>
        </header>
    }
}
