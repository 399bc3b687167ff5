//! Page-level route components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each module maps to one top-level route. Pure input validation lives next
//! to the page that uses it so it can be tested without a DOM.

pub mod auth_callback;
pub mod calendar;
pub mod forgot_password;
pub mod home;
pub mod login;
pub mod professional;
pub mod profile;
pub mod register;
pub mod reset_password;
