//! Video catalogue and watch-progress models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{user_video_progress, video};

/// A video counts as watched once this share (percent) has been seen.
pub const COMPLETION_THRESHOLD: f64 = 90.0;

/// Request body for POST /videos.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterVideoRequest {
    pub video_id: Option<String>,
    pub module_id: Option<String>,
    pub title: Option<String>,
    /// Seconds
    pub duration: Option<f64>,
    pub url: Option<String>,
}

/// Query for GET /videos.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoQuery {
    pub module_id: Option<String>,
}

/// Catalogue entry as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub video_id: String,
    pub module_id: String,
    pub title: String,
    pub duration: Option<f64>,
    pub url: Option<String>,
}

impl From<video::Model> for VideoResponse {
    fn from(m: video::Model) -> Self {
        Self {
            video_id: m.video_id,
            module_id: m.module_id,
            title: m.title,
            duration: m.duration,
            url: m.url,
        }
    }
}

/// Request body for POST /video-progress-live (sent every few seconds while playing).
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoProgressRequest {
    pub user_id: Option<String>,
    pub video_id: Option<String>,
    pub module_id: Option<String>,
    /// Playback position in seconds
    pub current_time: Option<f64>,
    /// Video length in seconds
    pub duration: Option<f64>,
    /// Percent watched; derived from position and duration when absent
    pub progress: Option<f64>,
}

/// Query for GET /video-progress-live.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProgressQuery {
    pub user_id: Option<String>,
    pub video_id: Option<String>,
}

/// Validated video heartbeat.
#[derive(Debug, Clone)]
pub struct VideoProgressUpdate {
    pub user_id: String,
    pub video_id: String,
    pub module_id: Option<String>,
    pub current_time: f64,
    pub duration: Option<f64>,
    pub progress: Option<f64>,
}

/// Column values to write for an upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedVideoProgress {
    pub module_id: Option<String>,
    pub progress: f64,
    pub current_position: f64,
    pub duration: f64,
    pub completed: bool,
    pub watch_count: i32,
    pub completed_at: Option<DateTime<Utc>>,
    /// True only on the heartbeat that first crossed the completion threshold.
    pub newly_completed: bool,
}

impl VideoProgressUpdate {
    /// Percent watched as reported or derived from position/duration.
    fn reported_progress(&self, duration: f64) -> f64 {
        let raw = match self.progress {
            Some(p) => p,
            None if duration > 0.0 => self.current_time / duration * 100.0,
            None => 0.0,
        };
        if raw.is_finite() {
            raw.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// Fold this heartbeat into the stored record.
    ///
    /// Progress never decreases and completion latches.
    pub fn merge(
        &self,
        existing: Option<&user_video_progress::Model>,
        now: DateTime<Utc>,
    ) -> MergedVideoProgress {
        let duration = self
            .duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .or_else(|| existing.map(|m| m.duration))
            .unwrap_or(0.0);

        let previous = existing.map(|m| m.progress).unwrap_or(0.0);
        let progress = self.reported_progress(duration).max(previous);

        let was_completed = existing.map(|m| m.completed).unwrap_or(false);
        let completed = was_completed || progress >= COMPLETION_THRESHOLD;
        let newly_completed = completed && !was_completed;

        let current_position = if self.current_time.is_finite() {
            self.current_time.max(0.0)
        } else {
            0.0
        };

        MergedVideoProgress {
            module_id: self
                .module_id
                .clone()
                .or_else(|| existing.and_then(|m| m.module_id.clone())),
            progress,
            current_position,
            duration,
            completed,
            watch_count: existing.map(|m| m.watch_count).unwrap_or(0) + 1,
            completed_at: existing
                .and_then(|m| m.completed_at)
                .or(if newly_completed { Some(now) } else { None }),
            newly_completed,
        }
    }
}

/// Video progress as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoProgressResponse {
    pub user_id: String,
    pub video_id: String,
    pub module_id: Option<String>,
    pub progress: f64,
    pub current_time: f64,
    pub duration: f64,
    pub completed: bool,
    pub watch_count: i32,
    pub last_watched: Option<DateTime<Utc>>,
}

impl VideoProgressResponse {
    /// Zero-value record for a video the user has never played.
    pub fn untracked(user_id: &str, video_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            video_id: video_id.to_string(),
            module_id: None,
            progress: 0.0,
            current_time: 0.0,
            duration: 0.0,
            completed: false,
            watch_count: 0,
            last_watched: None,
        }
    }
}

impl From<user_video_progress::Model> for VideoProgressResponse {
    fn from(m: user_video_progress::Model) -> Self {
        Self {
            user_id: m.user_id,
            video_id: m.video_id,
            module_id: m.module_id,
            progress: m.progress,
            current_time: m.current_position,
            duration: m.duration,
            completed: m.completed,
            watch_count: m.watch_count,
            last_watched: Some(m.last_watched),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heartbeat(current_time: f64, duration: Option<f64>) -> VideoProgressUpdate {
        VideoProgressUpdate {
            user_id: "u1".into(),
            video_id: "intro".into(),
            module_id: Some("git-basics".into()),
            current_time,
            duration,
            progress: None,
        }
    }

    fn stored(progress: f64, completed: bool) -> user_video_progress::Model {
        user_video_progress::Model {
            id: 7,
            user_id: "u1".into(),
            video_id: "intro".into(),
            module_id: Some("git-basics".into()),
            progress,
            current_position: 30.0,
            duration: 120.0,
            completed,
            watch_count: 3,
            completed_at: if completed { Some(Utc::now()) } else { None },
            last_watched: Utc::now(),
        }
    }

    #[test]
    fn test_progress_derived_from_position() {
        let merged = heartbeat(30.0, Some(120.0)).merge(None, Utc::now());
        assert_eq!(merged.progress, 25.0);
        assert!(!merged.completed);
        assert_eq!(merged.watch_count, 1);
    }

    #[test]
    fn test_progress_never_decreases_on_seek_back() {
        let existing = stored(75.0, false);
        let merged = heartbeat(10.0, None).merge(Some(&existing), Utc::now());
        assert_eq!(merged.progress, 75.0);
        assert_eq!(merged.current_position, 10.0);
        assert_eq!(merged.duration, 120.0);
    }

    #[test]
    fn test_crossing_threshold_marks_newly_completed_once() {
        let existing = stored(80.0, false);
        let first = heartbeat(110.0, Some(120.0)).merge(Some(&existing), Utc::now());
        assert!(first.completed);
        assert!(first.newly_completed);
        assert!(first.completed_at.is_some());

        let done = stored(95.0, true);
        let again = heartbeat(119.0, Some(120.0)).merge(Some(&done), Utc::now());
        assert!(again.completed);
        assert!(!again.newly_completed);
        assert_eq!(again.completed_at, done.completed_at);
    }

    #[test]
    fn test_zero_duration_without_progress_stays_zero() {
        let merged = heartbeat(42.0, None).merge(None, Utc::now());
        assert_eq!(merged.progress, 0.0);
    }

    #[test]
    fn test_explicit_progress_is_clamped() {
        let mut hb = heartbeat(0.0, None);
        hb.progress = Some(180.0);
        let merged = hb.merge(None, Utc::now());
        assert_eq!(merged.progress, 100.0);
        assert!(merged.completed);
    }

    #[test]
    fn test_untracked_default_is_zero_value() {
        let v = serde_json::to_value(VideoProgressResponse::untracked("u1", "intro")).unwrap();
        assert_eq!(v["progress"], 0.0);
        assert_eq!(v["currentTime"], 0.0);
        assert_eq!(v["completed"], false);
        assert!(v["lastWatched"].is_null());
    }
}
