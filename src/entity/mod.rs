//! SeaORM entity definitions for the learning platform database.

pub mod commit_practice;
pub mod learning_history;
pub mod learning_session;
pub mod learning_stats;
pub mod module_progress;
pub mod user;
pub mod user_bookmark;
pub mod user_note;
pub mod user_video_progress;
pub mod video;
