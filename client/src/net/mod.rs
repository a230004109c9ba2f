//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns request dispatch, bearer attachment, and the forced-logout
//! reaction to rejected credentials; `types` defines the wire schema.

pub mod api;
pub mod types;
