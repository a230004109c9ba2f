//! Navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route declares an [`AccessRequirement`]. Before a view renders, the
//! router asks [`evaluate`] whether the transition is allowed given the
//! authentication flag read at that moment. Forced logouts bypass this and
//! push straight to the login view.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::routes::{self, LANDING_PATH, LOGIN_PATH};
use crate::state::session::{Session, SessionStore};

/// Per-destination access policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccessRequirement {
    RequiresAuth,
    RequiresGuest,
    /// No requirement; always allowed.
    #[default]
    Public,
}

impl AccessRequirement {
    /// Where a denied navigation is sent. `Public` never redirects; its
    /// target is only a placeholder for router wiring.
    pub fn redirect_target(self) -> &'static str {
        match self {
            Self::RequiresAuth => LOGIN_PATH,
            Self::RequiresGuest | Self::Public => LANDING_PATH,
        }
    }
}

/// Outcome of one navigation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

impl GuardDecision {
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

/// Decide a navigation from the destination's requirement and the current flag.
pub fn evaluate(requirement: AccessRequirement, authenticated: bool) -> GuardDecision {
    match (requirement, authenticated) {
        (AccessRequirement::RequiresAuth, false) | (AccessRequirement::RequiresGuest, true) => {
            GuardDecision::Redirect(requirement.redirect_target())
        }
        _ => GuardDecision::Allow,
    }
}

/// Decide a navigation to `path` using the store's flag as of this call.
pub fn guard_navigation(store: &SessionStore, path: &str) -> GuardDecision {
    evaluate(routes::requirement_for(path), store.is_authenticated())
}

/// Router condition for the `ProtectedRoute` at `path`.
///
/// Subscribes to the reactive session so the router re-checks on sign-in and
/// sign-out, then decides from the store itself via [`guard_navigation`].
pub fn guard_condition(
    store: &SessionStore,
    session: RwSignal<Session>,
    path: &'static str,
) -> impl Fn() -> Option<bool> + Send + Sync + Clone + 'static {
    let store = store.clone();
    move || {
        session.track();
        Some(guard_navigation(&store, path).is_allowed())
    }
}

/// Router redirect path for the `ProtectedRoute` at `path`.
pub fn guard_redirect(path: &'static str) -> impl Fn() -> &'static str + Send + Sync + Clone + 'static {
    let target = routes::requirement_for(path).redirect_target();
    move || target
}

/// Whether the forced-logout counter moved since the last observation.
pub(crate) fn forced_logout_pending(previous: Option<u64>, current: u64) -> bool {
    previous.is_some_and(|prev| prev != current)
}

/// Push to `/login` whenever a forced logout is recorded, whatever view is
/// showing. The guard is not consulted.
pub fn install_forced_logout_redirect<F>(forced_logouts: RwSignal<u64>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move |previous: Option<u64>| {
        let current = forced_logouts.get();
        if forced_logout_pending(previous, current) {
            leptos::logging::warn!("session rejected by backend; returning to login");
            navigate(LOGIN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
        current
    });
}
