//! API E2E test suite.
//!
//! Drives the `/api` routes through an in-process actix service backed by a
//! fresh in-memory SQLite database per test.
//!
//! Run with: cargo test --test api_e2e

mod test_helpers;

mod test_activity;
mod test_auth;
mod test_commit_tools;
mod test_library;
mod test_practice;
mod test_static;
mod test_videos;
