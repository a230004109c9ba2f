//! Registration page: create a doctor account via `/auth/register`.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::api::ApiClient;
use crate::routes::LOGIN_PATH;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RegistrationInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

pub(crate) fn validate_registration(
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<RegistrationInput, &'static str> {
    let email = email.trim();
    let full_name = full_name.trim();
    if email.is_empty() || password.is_empty() || full_name.is_empty() {
        return Err("All fields are required.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok(RegistrationInput {
        email: email.to_owned(),
        password: password.to_owned(),
        full_name: full_name.to_owned(),
    })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let registered = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let input = match validate_registration(&email.get(), &password.get(), &full_name.get()) {
            Ok(input) => input,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating account...".to_owned());

        #[cfg(feature = "csr")]
        {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.register(&input.email, &input.password, &input.full_name).await {
                    Ok(doctor) => {
                        registered.set(true);
                        info.set(format!("Account created for {}. You can sign in now.", doctor.email));
                    }
                    Err(e) => info.set(format!("Registration failed: {e}")),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&api, input);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"ClinicCare"</h1>
                <p class="login-card__subtitle">"Create a doctor account"</p>
                <Show when=move || !registered.get()>
                    <form class="login-form" on:submit=on_submit>
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Full name"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="email"
                            placeholder="you@clinic.org"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <button class="login-button" type="submit" disabled=move || busy.get()>
                            "Register"
                        </button>
                    </form>
                </Show>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">
                    <A href=LOGIN_PATH>"Back to sign in"</A>
                </p>
            </div>
        </div>
    }
}
