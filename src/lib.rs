//! SPA Shell - Rust Implementation
//!
//! Client-side layer of a single-page web application.
//!
//! This library provides:
//! - A REST client for a JSONPlaceholder-style service with a middleware pipeline
//! - A state container (state, getters, mutations, async actions)
//! - A route table with before/after navigation guards and scroll restoration
//! - Storage and document abstractions (browser on wasm32, headless natively)
//! - Dioxus UI shell wiring the above together

pub mod api;
pub mod app;
pub mod config;
pub mod platform;
pub mod router;
pub mod store;
