//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and
//! component logic so the logic stays testable off the browser.

pub mod auth;
pub mod browser;
pub mod format;
pub mod scope;
pub mod time;
