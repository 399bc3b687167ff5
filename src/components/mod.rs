//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome and listing entries while reading shared
//! session state from Leptos context providers.

pub mod navbar;
pub mod professional_card;
