//! Integration tests for the ifoodapp client.
//!
//! These tests run the REST transport against a local `wiremock` server that
//! answers like the ordering API, and drive whole list and edit screens
//! through [`ifoodapp::testing::InMemoryTransport`].
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With client logs
//! RUST_LOG=ifoodapp=debug cargo test --test integration -- --nocapture
//! ```

mod common;
mod entity_tests;
mod list_sync_tests;
