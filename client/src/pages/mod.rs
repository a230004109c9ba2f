//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Access control is not a page concern; the router's guard
//! runs before any page renders.

pub mod consultations;
pub mod login;
pub mod new_consultation;
pub mod register;
