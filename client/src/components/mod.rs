//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome and form widgets while reading shared state
//! from Leptos context providers.

pub mod app_header;
pub mod consultation_card;
pub mod diagnosis_picker;
