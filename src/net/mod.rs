//! Networking modules for the booking backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns the transport seam and error normalization, `api` maps each
//! REST endpoint to a typed call, and `types` defines the wire schema.

pub mod api;
pub mod http;
pub mod types;
