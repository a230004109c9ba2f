use super::*;

// =============================================================
// Hostname resolution
// =============================================================

#[test]
fn localhost_uses_local_backend() {
    assert_eq!(ApiConfig::for_hostname("localhost").base_url, LOCAL_API_URL);
    assert_eq!(ApiConfig::for_hostname("127.0.0.1").base_url, LOCAL_API_URL);
}

#[test]
fn other_hosts_use_container_backend() {
    assert_eq!(ApiConfig::for_hostname("clinic.example.org").base_url, CONTAINER_API_URL);
}

#[test]
fn missing_hostname_falls_back_to_local() {
    assert_eq!(ApiConfig::resolve(None, None).base_url, LOCAL_API_URL);
}

// =============================================================
// Overrides
// =============================================================

#[test]
fn override_wins_over_hostname() {
    let cfg = ApiConfig::resolve(Some("https://api.clinic.test/"), Some("localhost"));
    assert_eq!(cfg.base_url, "https://api.clinic.test");
}

#[test]
fn blank_override_is_ignored() {
    let cfg = ApiConfig::resolve(Some("   "), Some("clinic.example.org"));
    assert_eq!(cfg.base_url, CONTAINER_API_URL);
}

// =============================================================
// Endpoints
// =============================================================

#[test]
fn endpoint_joins_with_single_slash() {
    let cfg = ApiConfig::new("http://localhost:8000/");
    assert_eq!(cfg.endpoint("/auth/login"), "http://localhost:8000/auth/login");
    assert_eq!(cfg.endpoint("auth/me"), "http://localhost:8000/auth/me");
}
