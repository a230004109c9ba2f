//! Session store: who is signed in, mirrored to durable storage.
//!
//! ARCHITECTURE
//! ============
//! `SessionStore` is an explicitly constructed, cloneable handle. `init`
//! seeds it from durable storage exactly once; every mutator writes memory
//! and the durable mirror under a single write lock, releases the lock, then
//! notifies subscribers synchronously. A subscriber therefore never observes
//! a value that is not yet persisted, and may read the store from inside its
//! callback.
//!
//! INVARIANTS
//! ==========
//! `sign_in` sets token and profile together and `logout`/`force_logout`
//! clear both, each in one critical section, so no reader sees a
//! half-updated pair. `init` drops a profile stored without a token but keeps
//! a token stored without a profile; `set_profile_if_token` completes that
//! pair only while the same token is still held. `set_token` and
//! `set_profile` write one field and do not enforce pairing.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::{Mutex, RwLock};

use crate::config::{DOCTOR_KEY, TOKEN_KEY};
use crate::net::types::Doctor;
use crate::util::storage::{BrowserStorage, DurableStorage, load_json, save_json};

/// Snapshot of the authentication state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub doctor: Option<Doctor>,
}

impl Session {
    /// `true` iff a non-empty token is present. The profile plays no part.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Why subscribers are being notified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionChange {
    /// A single field changed through `set_token` or `set_profile`.
    Updated,
    SignedIn,
    LoggedOut,
    /// Credentials were rejected by the backend; the app must push to login.
    ForcedLogout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&Session, SessionChange) + Send + Sync>;

struct Inner {
    storage: Arc<dyn DurableStorage>,
    session: RwLock<Session>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

/// Process-wide source of truth for the signed-in doctor.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.inner.session.read();
        f.debug_struct("SessionStore")
            .field("authenticated", &session.is_authenticated())
            .field("doctor", &session.doctor.as_ref().map(|d| d.id))
            .finish_non_exhaustive()
    }
}

static BROWSER_STORE: OnceLock<SessionStore> = OnceLock::new();

fn normalize_token(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}

impl SessionStore {
    /// Seed a store from `storage`. Reads each durable key once.
    ///
    /// A missing token or an empty one means signed out. A missing or
    /// malformed profile reads as absent and its key is dropped; a profile
    /// left behind without a token is discarded the same way.
    pub fn init(storage: Arc<dyn DurableStorage>) -> Self {
        let token = normalize_token(storage.get_item(TOKEN_KEY));
        let mut doctor = load_json::<Doctor>(storage.as_ref(), DOCTOR_KEY);

        if token.is_none() {
            if doctor.take().is_some() {
                leptos::logging::warn!("discarding stored profile without a token");
            }
            storage.remove_item(TOKEN_KEY);
        }
        if doctor.is_none() {
            storage.remove_item(DOCTOR_KEY);
        }

        Self {
            inner: Arc::new(Inner {
                storage,
                session: RwLock::new(Session { token, doctor }),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// The store backed by `window.localStorage`, created on first access.
    /// Every caller, including concurrent first callers, gets the same instance.
    pub fn browser() -> Self {
        BROWSER_STORE
            .get_or_init(|| Self::init(Arc::new(BrowserStorage)))
            .clone()
    }

    /// Whether two handles point at the same store.
    #[cfg(test)]
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.session.read().is_authenticated()
    }

    /// Current bearer token, for the transport layer.
    pub fn token(&self) -> Option<String> {
        self.inner.session.read().token.clone()
    }

    pub fn doctor(&self) -> Option<Doctor> {
        self.inner.session.read().doctor.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.inner.session.read().clone()
    }

    /// Store or clear the token. An empty string clears.
    pub fn set_token(&self, token: Option<String>) {
        let token = normalize_token(token);
        self.mutate(SessionChange::Updated, |session, storage| {
            write_token(storage, token.as_deref());
            session.token = token;
        });
    }

    /// Store or clear the profile, independently of the token.
    pub fn set_profile(&self, doctor: Option<Doctor>) {
        self.mutate(SessionChange::Updated, |session, storage| {
            write_doctor(storage, doctor.as_ref());
            session.doctor = doctor;
        });
    }

    /// Store `doctor` only if the session still holds `token`. Returns whether
    /// it was stored; a logout or a new sign-in in the meantime wins.
    pub fn set_profile_if_token(&self, token: &str, doctor: Doctor) -> bool {
        let snapshot = {
            let mut session = self.inner.session.write();
            if session.token.as_deref() != Some(token) {
                return false;
            }
            write_doctor(self.inner.storage.as_ref(), Some(&doctor));
            session.doctor = Some(doctor);
            session.clone()
        };
        self.notify(&snapshot, SessionChange::Updated);
        true
    }

    /// Establish a session from a successful login.
    pub fn sign_in(&self, token: String, doctor: Doctor) {
        let Some(token) = normalize_token(Some(token)) else {
            leptos::logging::warn!("ignoring sign-in with an empty token");
            return;
        };
        self.mutate(SessionChange::SignedIn, |session, storage| {
            write_token(storage, Some(&token));
            write_doctor(storage, Some(&doctor));
            session.token = Some(token);
            session.doctor = Some(doctor);
        });
    }

    /// Clear token and profile. Calling it again is a no-op on state.
    pub fn logout(&self) {
        self.clear(SessionChange::LoggedOut);
    }

    /// Clear the session because the backend rejected the credential.
    pub fn force_logout(&self) {
        self.clear(SessionChange::ForcedLogout);
    }

    /// Register a listener called after every change.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Session, SessionChange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.listeners.lock().retain(|(existing, _)| *existing != id);
    }

    fn clear(&self, change: SessionChange) {
        self.mutate(change, |session, storage| {
            write_token(storage, None);
            write_doctor(storage, None);
            session.token = None;
            session.doctor = None;
        });
    }

    fn mutate<F>(&self, change: SessionChange, apply: F)
    where
        F: FnOnce(&mut Session, &dyn DurableStorage),
    {
        let snapshot = {
            let mut session = self.inner.session.write();
            apply(&mut *session, self.inner.storage.as_ref());
            session.clone()
        };
        self.notify(&snapshot, change);
    }

    fn notify(&self, session: &Session, change: SessionChange) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(session, change);
        }
    }
}

fn write_token(storage: &dyn DurableStorage, token: Option<&str>) {
    match token {
        Some(token) => storage.set_item(TOKEN_KEY, token),
        None => storage.remove_item(TOKEN_KEY),
    }
}

fn write_doctor(storage: &dyn DurableStorage, doctor: Option<&Doctor>) {
    match doctor {
        Some(doctor) => save_json(storage, DOCTOR_KEY, doctor),
        None => storage.remove_item(DOCTOR_KEY),
    }
}
