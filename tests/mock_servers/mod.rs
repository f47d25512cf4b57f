//! Mock servers for integration testing
//!
//! These mock servers simulate the REST backend the API client talks to,
//! allowing full store/client integration testing without network access.

#![allow(dead_code)]

pub mod rest;

pub use rest::MockRestServer;
