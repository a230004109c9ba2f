//! Consultation list: the default view for a signed-in doctor.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::app_header::AppHeader;
use crate::components::consultation_card::ConsultationCard;
use crate::net::api::{ApiClient, MAX_PAGE_SIZE};
use crate::routes::NEW_CONSULTATION_PATH;

#[component]
pub fn ConsultationsPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();

    let consultations = LocalResource::new(move || {
        let api = api.clone();
        async move { api.list_consultations(0, MAX_PAGE_SIZE).await }
    });

    view! {
        <AppHeader/>
        <div class="consultations-page">
            <header class="consultations-page__header">
                <h1>"Consultations"</h1>
                <A href=NEW_CONSULTATION_PATH attr:class="btn btn--primary">"+ New consultation"</A>
            </header>
            <Suspense fallback=move || view! { <p>"Loading consultations..."</p> }>
                {move || {
                    consultations
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => {
                                view! { <p class="consultations-page__empty">"No consultations yet."</p> }
                                    .into_any()
                            }
                            Ok(list) => {
                                view! {
                                    <div class="consultations-page__list">
                                        {list
                                            .into_iter()
                                            .map(|c| view! { <ConsultationCard consultation=c/> })
                                            .collect::<Vec<_>>()}
                                    </div>
                                }
                                    .into_any()
                            }
                            Err(e) => {
                                view! {
                                    <p class="consultations-page__error">
                                        {format!("Could not load consultations: {e}")}
                                    </p>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}
