//! Commit Academy server library.
//!
//! Learning-progress tracking, credential accounts and Conventional Commits
//! tooling behind an actix-web JSON API.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
