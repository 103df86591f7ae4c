//! Business logic services.

pub mod changelog;
pub mod commit_message;
pub mod stats;
pub mod tracker;

pub use tracker::{LearningTracker, PracticeAttempt};
