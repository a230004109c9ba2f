//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` is the only mutable state shared across views. Pages read it
//! through a reactive signal bridged from the store; only the store's own
//! mutators write it.

pub mod session;
