//! Integration tests for Larder.
//!
//! These tests drive a live server over HTTP and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Run migrations and seed the catalog
//! cargo run -p larder-cli -- migrate
//! cargo run -p larder-cli -- seed ingredients
//!
//! # Start the server
//! cargo run -p larder-server
//!
//! # Run the ignored tests against it
//! cargo test -p larder-integration-tests -- --ignored
//! ```
//!
//! Each test registers its own throwaway account, so tests are isolated
//! from each other even though they share the server and the seeded
//! ingredient catalog.

#![cfg_attr(not(test), forbid(unsafe_code))]

/// Base URL of the server under test (configurable via `LARDER_BASE_URL`).
#[must_use]
pub fn base_url() -> String {
    std::env::var("LARDER_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}
