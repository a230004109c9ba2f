//! Static route table with per-destination access requirements.
//!
//! The guard consults [`requirement_for`] and `app` builds its router from
//! the same constants, so each path's policy is declared exactly once.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::util::auth::AccessRequirement;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const CONSULTATIONS_PATH: &str = "/consultations";
pub const NEW_CONSULTATION_PATH: &str = "/consultations/new";

/// Where authenticated users land by default.
pub const LANDING_PATH: &str = CONSULTATIONS_PATH;

/// A navigable destination and its access policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub path: &'static str,
    pub requirement: AccessRequirement,
}

pub const ROUTES: &[RouteDef] = &[
    RouteDef { path: ROOT_PATH, requirement: AccessRequirement::Public },
    RouteDef { path: LOGIN_PATH, requirement: AccessRequirement::RequiresGuest },
    RouteDef { path: REGISTER_PATH, requirement: AccessRequirement::RequiresGuest },
    RouteDef { path: CONSULTATIONS_PATH, requirement: AccessRequirement::RequiresAuth },
    RouteDef { path: NEW_CONSULTATION_PATH, requirement: AccessRequirement::RequiresAuth },
];

/// Requirement declared for `path`. Undeclared paths are public.
pub fn requirement_for(path: &str) -> AccessRequirement {
    let path = normalize_path(path);
    ROUTES
        .iter()
        .find(|route| route.path == path)
        .map_or(AccessRequirement::Public, |route| route.requirement)
}

/// Strip query, fragment, and a trailing slash (the root stays `/`).
fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    match path.trim_end_matches('/') {
        "" => ROOT_PATH,
        trimmed => trimmed,
    }
}
