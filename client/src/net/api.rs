//! REST API client for the ClinicCare backend.
//!
//! Client-side (`csr`): real HTTP calls via `gloo-net`.
//! Native builds: the browser transport reports [`ApiError::Unavailable`];
//! tests substitute their own [`HttpTransport`].
//!
//! ARCHITECTURE
//! ============
//! Every request carries `Authorization: Bearer <token>` when the session
//! store holds one. Every response passes through one status check, so a
//! 401 from any endpoint clears the session (`force_logout`) before the
//! error reaches the caller. Rejections are never retried.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, ApiError>`; views render the error's `Display`.
//! A failed login leaves the store untouched.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    Consultation, ConsultationCreate, DiagnosisCode, Doctor, ErrorBody, LoginRequest, RegisterRequest, TokenResponse,
};
use crate::config::ApiConfig;
use crate::state::session::SessionStore;

/// Largest page the backend serves for `GET /consultation`.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Failure of a backend call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend rejected the credential (HTTP 401).
    #[error("{0}")]
    Unauthorized(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("not available outside the browser")]
    Unavailable,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request as handed to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, url: String) -> Self {
        Self { method, url, bearer: None, body: None }
    }

    #[must_use]
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if `body` cannot be serialized.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let raw = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.body = Some(raw);
        Ok(self)
    }
}

/// Raw status and body returned by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request/response plumbing. Futures are local to the browser event loop.
#[async_trait(?Send)]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// `fetch` via `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl HttpTransport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let network = |e: gloo_net::Error| ApiError::Network(e.to_string());
            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
            };
            if let Some(token) = &request.bearer {
                builder = builder.header("Authorization", &bearer_value(token));
            }
            let prepared = match request.body {
                Some(body) => builder.header("Content-Type", "application/json").body(body),
                None => builder.build(),
            }
            .map_err(network)?;
            let resp = prepared.send().await.map_err(network)?;
            let status = resp.status();
            let body = resp.text().await.map_err(network)?;
            Ok(ApiResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }
}

pub(crate) fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

/// Message for a non-2xx response: the backend's `detail` when present.
pub(crate) fn status_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|err| err.detail.message())
        .ok()
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| format!("request failed: {status}"))
}

pub(crate) fn error_from_status(status: u16, body: &str) -> ApiError {
    let message = status_message(status, body);
    if status == 401 {
        ApiError::Unauthorized(message)
    } else {
        ApiError::Status { status, message }
    }
}

pub(crate) fn diagnosis_search_path(term: &str) -> String {
    format!("/diagnosis?search={}", urlencoding::encode(term))
}

pub(crate) fn consultations_path(skip: u32, limit: u32) -> String {
    let limit = limit.clamp(1, MAX_PAGE_SIZE);
    format!("/consultation?skip={skip}&limit={limit}")
}

/// Console line for a successful sign-in. Identifies the doctor by id only.
pub(crate) fn sign_in_message(doctor: &Doctor) -> String {
    format!("signed in as doctor {}", doctor.id)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Backend client bound to a session store.
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    session: SessionStore,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: ApiConfig, session: SessionStore, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, session, transport }
    }

    /// Client using the browser's `fetch`.
    pub fn browser(config: ApiConfig, session: SessionStore) -> Self {
        Self::new(config, session, Arc::new(BrowserTransport))
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Request to `path` carrying the session's current token.
    fn request(&self, method: Method, path: &str) -> ApiRequest {
        ApiRequest::new(method, self.config.endpoint(path)).with_bearer(self.session.token())
    }

    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            let err = error_from_status(response.status, &response.body);
            if err.is_unauthorized() {
                leptos::logging::warn!("credentials rejected: {err}");
                self.session.force_logout();
            }
            return Err(err);
        }
        decode(&response.body)
    }

    /// Sign in: exchange credentials for a token, fetch the profile with it,
    /// then store both together.
    ///
    /// # Errors
    ///
    /// Returns the first failing call's error; the store is only written on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<Doctor, ApiError> {
        let body = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let token: TokenResponse = self
            .call(ApiRequest::new(Method::Post, self.config.endpoint("/auth/login")).with_json(&body)?)
            .await?;
        let doctor: Doctor = self
            .call(
                ApiRequest::new(Method::Get, self.config.endpoint("/auth/me"))
                    .with_bearer(Some(token.access_token.clone())),
            )
            .await?;
        self.session.sign_in(token.access_token, doctor.clone());
        leptos::logging::log!("{}", sign_in_message(&doctor));
        Ok(doctor)
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it
    /// (e.g. the email is already registered).
    pub async fn register(&self, email: &str, password: &str, full_name: &str) -> Result<Doctor, ApiError> {
        let body = RegisterRequest {
            email: email.to_owned(),
            password: password.to_owned(),
            full_name: full_name.to_owned(),
        };
        self.call(self.request(Method::Post, "/auth/register").with_json(&body)?)
            .await
    }

    /// Fetch the profile for the current token from `/auth/me`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; a 401 also clears the session.
    pub async fn current_doctor(&self) -> Result<Doctor, ApiError> {
        self.call(self.request(Method::Get, "/auth/me")).await
    }

    /// Re-fetch and store the profile for a stored token. `Ok(None)` when
    /// signed out, or when the session changed while the fetch was in flight.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile fetch fails.
    pub async fn refresh_profile(&self) -> Result<Option<Doctor>, ApiError> {
        let Some(token) = self.session.token().filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        let doctor: Doctor = self
            .call(
                ApiRequest::new(Method::Get, self.config.endpoint("/auth/me"))
                    .with_bearer(Some(token.clone())),
            )
            .await?;
        if !self.session.set_profile_if_token(&token, doctor.clone()) {
            leptos::logging::warn!("session changed during profile refresh; dropping profile");
            return Ok(None);
        }
        Ok(Some(doctor))
    }

    /// Search diagnosis codes by code or description. A blank term yields
    /// no results without a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn search_diagnosis(&self, term: &str) -> Result<Vec<DiagnosisCode>, ApiError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        self.call(self.request(Method::Get, &diagnosis_search_path(term))).await
    }

    /// Create a consultation note.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a diagnosis code is unknown.
    pub async fn create_consultation(&self, body: &ConsultationCreate) -> Result<Consultation, ApiError> {
        self.call(self.request(Method::Post, "/consultation").with_json(body)?)
            .await
    }

    /// List the signed-in doctor's consultations, `limit` clamped to `1..=100`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_consultations(&self, skip: u32, limit: u32) -> Result<Vec<Consultation>, ApiError> {
        self.call(self.request(Method::Get, &consultations_path(skip, limit)))
            .await
    }
}
