//! # saude-plus-client
//!
//! Leptos + WASM single-page client for the Saúde Plus marketplace, where
//! patients find psychologists and nutritionists and request appointments.
//!
//! This crate contains the session store, the route guard, the JSON API
//! client, timestamp normalization for booking forms, and the pages and
//! components of the app. The backend is a separate REST service reached
//! under the configured API base.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod testing;
