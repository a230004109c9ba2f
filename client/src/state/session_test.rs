use super::*;
use crate::util::storage::MemoryStorage;

fn doctor() -> Doctor {
    Doctor {
        id: 1,
        email: "x@clinic.test".to_owned(),
        full_name: "Dr. X".to_owned(),
        is_active: true,
        created_at: None,
    }
}

fn store_over(storage: &MemoryStorage) -> SessionStore {
    SessionStore::init(Arc::new(storage.clone()))
}

fn assert_pair_consistent(session: &Session) {
    assert_eq!(session.token.is_some(), session.doctor.is_some(), "token/profile out of step: {session:?}");
}

// =============================================================
// Initialization
// =============================================================

#[test]
fn empty_storage_starts_signed_out() {
    let store = store_over(&MemoryStorage::new());
    assert!(!store.is_authenticated());
    assert_eq!(store.snapshot(), Session::default());
}

#[test]
fn init_seeds_from_previous_session() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "abc123");
    save_json(&storage, DOCTOR_KEY, &doctor());

    let store = store_over(&storage);
    assert!(store.is_authenticated());
    assert_eq!(store.doctor(), Some(doctor()));
}

#[test]
fn init_treats_malformed_profile_as_absent() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "abc123");
    storage.set_item(DOCTOR_KEY, "{oops");

    let store = store_over(&storage);
    assert!(store.is_authenticated());
    assert!(store.doctor().is_none());
    assert!(!storage.contains_key(DOCTOR_KEY));
}

#[test]
fn init_discards_orphaned_profile() {
    let storage = MemoryStorage::new();
    save_json(&storage, DOCTOR_KEY, &doctor());

    let store = store_over(&storage);
    assert!(!store.is_authenticated());
    assert!(store.doctor().is_none());
    assert!(storage.is_empty());
}

#[test]
fn init_treats_empty_token_as_absent() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "");

    let store = store_over(&storage);
    assert!(!store.is_authenticated());
    assert!(store.token().is_none());
}

#[test]
fn browser_store_is_shared_across_concurrent_first_access() {
    let stores: Vec<SessionStore> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|_| scope.spawn(SessionStore::browser)).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for store in &stores[1..] {
        assert!(store.ptr_eq(&stores[0]));
    }
}

// =============================================================
// Authentication flag
// =============================================================

#[test]
fn set_token_drives_flag() {
    let store = store_over(&MemoryStorage::new());

    store.set_token(Some("abc123".to_owned()));
    assert!(store.is_authenticated());

    store.set_token(Some(String::new()));
    assert!(!store.is_authenticated());

    store.set_token(Some("abc123".to_owned()));
    store.set_token(None);
    assert!(!store.is_authenticated());
}

#[test]
fn set_token_writes_through_to_storage() {
    let storage = MemoryStorage::new();
    let store = store_over(&storage);

    store.set_token(Some("abc123".to_owned()));
    assert_eq!(storage.get_item(TOKEN_KEY).as_deref(), Some("abc123"));

    store.set_token(None);
    assert!(!storage.contains_key(TOKEN_KEY));
}

#[test]
fn profile_alone_does_not_affect_flag() {
    let storage = MemoryStorage::new();
    let store = store_over(&storage);

    store.set_profile(Some(doctor()));
    assert!(!store.is_authenticated());
    assert!(storage.contains_key(DOCTOR_KEY));

    store.set_profile(None);
    assert!(!store.is_authenticated());
    assert!(!storage.contains_key(DOCTOR_KEY));
}

#[test]
fn conditional_profile_requires_matching_token() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "abc123");
    let store = store_over(&storage);
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    store.subscribe(move |_, change| sink.lock().push(change));

    assert!(!store.set_profile_if_token("stale", doctor()));
    assert_eq!(store.doctor(), None);
    assert!(!storage.contains_key(DOCTOR_KEY));
    assert!(changes.lock().is_empty());

    assert!(store.set_profile_if_token("abc123", doctor()));
    assert_eq!(store.doctor(), Some(doctor()));
    assert!(storage.contains_key(DOCTOR_KEY));
    assert_eq!(*changes.lock(), vec![SessionChange::Updated]);
}

#[test]
fn conditional_profile_refused_after_logout() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "abc123");
    let store = store_over(&storage);
    store.logout();

    assert!(!store.set_profile_if_token("abc123", doctor()));
    assert_pair_consistent(&store.snapshot());
    assert!(storage.is_empty());
}

// =============================================================
// Sign-in / logout
// =============================================================

#[test]
fn sign_in_sets_both_fields() {
    let storage = MemoryStorage::new();
    let store = store_over(&storage);

    store.sign_in("abc123".to_owned(), doctor());
    let session = store.snapshot();
    assert_pair_consistent(&session);
    assert_eq!(session.token.as_deref(), Some("abc123"));
    assert!(storage.contains_key(TOKEN_KEY));
    assert!(storage.contains_key(DOCTOR_KEY));
}

#[test]
fn sign_in_with_empty_token_is_ignored() {
    let store = store_over(&MemoryStorage::new());
    store.sign_in(String::new(), doctor());
    assert_eq!(store.snapshot(), Session::default());
}

#[test]
fn logout_clears_memory_and_storage() {
    let storage = MemoryStorage::new();
    let store = store_over(&storage);
    store.sign_in("abc123".to_owned(), doctor());

    store.logout();
    assert_eq!(store.snapshot(), Session::default());
    assert!(storage.is_empty());
}

#[test]
fn logout_twice_matches_logout_once() {
    let storage = MemoryStorage::new();
    let store = store_over(&storage);
    store.sign_in("abc123".to_owned(), doctor());

    store.logout();
    let once = store.snapshot();
    store.logout();
    assert_eq!(store.snapshot(), once);
    assert!(storage.is_empty());
}

#[test]
fn pair_stays_consistent_across_public_operations() {
    let store = store_over(&MemoryStorage::new());
    assert_pair_consistent(&store.snapshot());
    store.sign_in("t1".to_owned(), doctor());
    assert_pair_consistent(&store.snapshot());
    store.force_logout();
    assert_pair_consistent(&store.snapshot());
    store.sign_in("t2".to_owned(), doctor());
    store.logout();
    assert_pair_consistent(&store.snapshot());
}

#[test]
fn session_survives_reload() {
    let storage = MemoryStorage::new();
    let store = store_over(&storage);
    store.set_token(Some("abc123".to_owned()));
    store.set_profile(Some(doctor()));
    drop(store);

    let reloaded = store_over(&storage);
    assert!(reloaded.is_authenticated());
    assert_eq!(reloaded.doctor(), Some(doctor()));
}

// =============================================================
// Subscriptions
// =============================================================

#[test]
fn subscribers_see_persisted_state() {
    let storage = MemoryStorage::new();
    let store = store_over(&storage);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let probe = storage.clone();
    let log = Arc::clone(&seen);
    store.subscribe(move |session, change| {
        log.lock().push((session.is_authenticated(), probe.contains_key(TOKEN_KEY), change));
    });

    store.sign_in("abc123".to_owned(), doctor());
    store.logout();

    assert_eq!(
        *seen.lock(),
        vec![(true, true, SessionChange::SignedIn), (false, false, SessionChange::LoggedOut)]
    );
}

#[test]
fn subscriber_may_read_store_during_callback() {
    let store = store_over(&MemoryStorage::new());
    let observed = Arc::new(Mutex::new(None));

    let handle = store.clone();
    let slot = Arc::clone(&observed);
    store.subscribe(move |_, _| {
        *slot.lock() = Some(handle.is_authenticated());
    });

    store.set_token(Some("abc123".to_owned()));
    assert_eq!(*observed.lock(), Some(true));
}

#[test]
fn force_logout_is_reported_distinctly() {
    let store = store_over(&MemoryStorage::new());
    store.sign_in("abc123".to_owned(), doctor());
    let changes = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&changes);
    store.subscribe(move |_, change| log.lock().push(change));
    store.force_logout();

    assert_eq!(*changes.lock(), vec![SessionChange::ForcedLogout]);
    assert!(!store.is_authenticated());
}

#[test]
fn unsubscribed_listener_is_not_called() {
    let store = store_over(&MemoryStorage::new());
    let calls = Arc::new(AtomicU64::new(0));

    let counter = Arc::clone(&calls);
    let id = store.subscribe(move |_, _| {
        counter.fetch_add(1, Ordering::Relaxed);
    });
    store.set_token(Some("a".to_owned()));
    store.unsubscribe(id);
    store.set_token(None);

    assert_eq!(calls.load(Ordering::Relaxed), 1);
}
