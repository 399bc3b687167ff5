//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `listing`) so pages depend on small
//! focused models. Only `session` is app-wide; listing state is page-local.

pub mod listing;
pub mod session;
