//! Root application component with routing and context providers.
//!
//! ARCHITECTURE
//! ============
//! The session store is created once and bridged into Leptos through a
//! subscription: every store change is copied into an `RwSignal<Session>`
//! that the route guards read, and forced logouts bump a counter that
//! drives the push to `/login`. Views only ever read the signal; writes go
//! through the store.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ProtectedRoute, Redirect, Route, Router, Routes},
    hooks::use_navigate,
};

use crate::config::ApiConfig;
use crate::net::api::ApiClient;
use crate::pages::{
    consultations::ConsultationsPage, login::LoginPage, new_consultation::NewConsultationPage,
    register::RegisterPage,
};
use crate::routes::{CONSULTATIONS_PATH, LANDING_PATH, LOGIN_PATH, NEW_CONSULTATION_PATH, REGISTER_PATH};
use crate::state::session::{SessionChange, SessionStore};
use crate::util::auth::{guard_condition, guard_redirect, install_forced_logout_redirect};

/// Root application component.
///
/// Provides the session store, its reactive mirror, and the API client as
/// context, then sets up guarded client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let store = SessionStore::browser();
    let session = RwSignal::new(store.snapshot());
    let forced_logouts = RwSignal::new(0_u64);

    let subscription = store.subscribe(move |next, change| {
        session.set(next.clone());
        if change == SessionChange::ForcedLogout {
            forced_logouts.update(|n| *n += 1);
        }
    });
    on_cleanup({
        let store = store.clone();
        move || store.unsubscribe(subscription)
    });

    let api = ApiClient::browser(ApiConfig::from_environment(), store.clone());

    provide_context(store.clone());
    provide_context(session);
    provide_context(api.clone());

    // A token restored without its profile is completed from `/auth/me`;
    // a rejected token is cleared by the client itself.
    if store.is_authenticated() && store.doctor().is_none() {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            if let Err(e) = api.refresh_profile().await {
                leptos::logging::warn!("profile refresh failed: {e}");
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = api;
    }

    view! {
        <Title text="ClinicCare"/>

        <Router>
            <ForcedLogoutRedirect forced_logouts=forced_logouts/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path=LANDING_PATH/> }/>
                    <ProtectedRoute
                        path=StaticSegment("login")
                        view=LoginPage
                        condition=guard_condition(&store, session, LOGIN_PATH)
                        redirect_path=guard_redirect(LOGIN_PATH)
                    />
                    <ProtectedRoute
                        path=StaticSegment("register")
                        view=RegisterPage
                        condition=guard_condition(&store, session, REGISTER_PATH)
                        redirect_path=guard_redirect(REGISTER_PATH)
                    />
                    <ProtectedRoute
                        path=StaticSegment("consultations")
                        view=ConsultationsPage
                        condition=guard_condition(&store, session, CONSULTATIONS_PATH)
                        redirect_path=guard_redirect(CONSULTATIONS_PATH)
                    />
                    <ProtectedRoute
                        path=(StaticSegment("consultations"), StaticSegment("new"))
                        view=NewConsultationPage
                        condition=guard_condition(&store, session, NEW_CONSULTATION_PATH)
                        redirect_path=guard_redirect(NEW_CONSULTATION_PATH)
                    />
                </Routes>
            </main>
        </Router>
    }
}

/// Router-scoped hook that turns forced logouts into a push to the login view.
#[component]
fn ForcedLogoutRedirect(forced_logouts: RwSignal<u64>) -> impl IntoView {
    install_forced_logout_redirect(forced_logouts, use_navigate());
}
