//! Client configuration: backend location and durable storage keys.
//!
//! DESIGN
//! ======
//! A compile-time `CLINICCARE_API_URL` wins when set. Otherwise the backend
//! is derived from the page hostname: local development talks to
//! `localhost:8000`, container deployments to the `backend` service.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Durable storage key holding the bearer token as a plain string.
pub const TOKEN_KEY: &str = "token";
/// Durable storage key holding the signed-in doctor as JSON.
pub const DOCTOR_KEY: &str = "doctor";

pub const LOCAL_API_URL: &str = "http://localhost:8000";
pub const CONTAINER_API_URL: &str = "http://backend:8000";

/// Where REST calls are sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }

    /// Pick the backend for a page served from `hostname`.
    pub fn for_hostname(hostname: &str) -> Self {
        match hostname {
            "localhost" | "127.0.0.1" | "" => Self::new(LOCAL_API_URL),
            _ => Self::new(CONTAINER_API_URL),
        }
    }

    /// Resolve from an explicit override first, then the page hostname.
    pub fn resolve(override_url: Option<&str>, hostname: Option<&str>) -> Self {
        match override_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Self::new(url),
            None => Self::for_hostname(hostname.unwrap_or_default()),
        }
    }

    /// Configuration for the running client.
    pub fn from_environment() -> Self {
        Self::resolve(option_env!("CLINICCARE_API_URL"), current_hostname().as_deref())
    }

    /// Absolute URL for an API path such as `/auth/login`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn current_hostname() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        web_sys::window().and_then(|w| w.location().hostname().ok())
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}
