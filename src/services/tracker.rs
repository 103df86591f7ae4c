//! Learning tracker: writes activity and keeps derived tables in step.
//!
//! Each step is an independent await. A failure partway leaves earlier
//! writes in place.

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};

use crate::config::Config;
use crate::db::DbPool;
use crate::db::practice::NewPracticeSession;
use crate::db::stats::StatsSnapshot;
use crate::entity::{commit_practice, learning_history, user_video_progress};
use crate::error::AppResult;
use crate::models::practice::percentage;
use crate::models::{
    ActivityType, LearningStatsResponse, ModuleProgressUpdate, NewActivity, VideoProgressUpdate,
};

use super::commit_message;
use super::stats::{StatsInputs, evaluate_achievements};

/// A practice attempt as submitted, after presence checks.
#[derive(Debug, Clone)]
pub struct PracticeAttempt {
    pub user_id: String,
    pub module_id: Option<String>,
    pub commit_message: String,
    pub expected_type: Option<String>,
    pub success: Option<bool>,
    pub attempts: Option<i32>,
}

pub struct LearningTracker<'a> {
    pool: &'a DbPool,
    catalogue_size: u32,
}

impl<'a> LearningTracker<'a> {
    pub fn new(pool: &'a DbPool, config: &Config) -> Self {
        Self {
            pool,
            catalogue_size: config.total_modules,
        }
    }

    /// Append an activity, update module progress for module events, then
    /// refresh the user's stats.
    pub async fn record_activity(
        &self,
        activity: NewActivity,
        module_title: Option<String>,
    ) -> AppResult<learning_history::Model> {
        let user_id = activity.user_id.clone();
        let activity_type = activity.activity_type;
        let progress_update = match (&activity.module_id, activity_type.affects_module_progress()) {
            (Some(module_id), true) => Some(ModuleProgressUpdate {
                user_id: user_id.clone(),
                module_id: module_id.clone(),
                module_title,
                progress: activity.progress,
                time_spent: activity.time_spent,
                completed: activity_type == ActivityType::ModuleComplete,
            }),
            _ => None,
        };

        let entry = self.pool.insert_activity(activity).await?;
        debug!(
            user_id = %user_id,
            activity_type = %activity_type,
            entry_id = entry.id,
            "Activity recorded"
        );

        if let Some(update) = progress_update {
            let progress = self.pool.upsert_module_progress(&update).await?;
            if progress.completed && activity_type == ActivityType::ModuleComplete {
                info!(user_id = %user_id, module_id = %progress.module_id, "Module completed");
            }
        }

        self.refresh_stats(&user_id).await?;
        Ok(entry)
    }

    /// Recompute the user's statistics from the source tables and persist them.
    pub async fn refresh_stats(&self, user_id: &str) -> AppResult<LearningStatsResponse> {
        let modules = self.pool.module_progress_totals(user_id).await?;
        let activities = self.pool.activity_facts(user_id).await?;
        let (practice_total, practice_successful) = self.pool.practice_counts(user_id).await?;
        let videos_completed = self.pool.count_completed_videos(user_id).await?;
        let previous = self.pool.get_achievements(user_id).await?;

        let now = Utc::now();
        let inputs = StatsInputs {
            catalogue_size: self.catalogue_size,
            modules,
            activities,
            practice_total,
            practice_successful,
            videos_completed,
        };
        let metrics = inputs.compute(now.date_naive());
        let achievements = evaluate_achievements(&metrics, &previous, now);
        if achievements.len() > previous.len() {
            let unlocked: Vec<&str> = achievements[previous.len()..]
                .iter()
                .map(|a| a.id.as_str())
                .collect();
            info!(user_id = %user_id, ?unlocked, "Achievements unlocked");
        }

        let snapshot = StatsSnapshot {
            total_modules: metrics.total_modules,
            completed_modules: metrics.completed_modules,
            total_time_spent: metrics.total_time_spent,
            current_streak: metrics.streak.current,
            longest_streak: metrics.streak.longest,
            achievements,
            last_activity: metrics.last_activity,
        };
        self.pool.upsert_learning_stats(user_id, &snapshot).await?;

        Ok(LearningStatsResponse {
            user_id: user_id.to_string(),
            total_modules: metrics.total_modules,
            completed_modules: metrics.completed_modules,
            completion_rate: metrics.completion_rate,
            total_time_spent: metrics.total_time_spent,
            current_streak: metrics.streak.current,
            longest_streak: metrics.streak.longest,
            total_practice_count: practice_total,
            successful_practice_count: practice_successful,
            practice_success_rate: percentage(practice_successful, practice_total),
            videos_completed,
            achievements: snapshot.achievements,
            last_activity: metrics.last_activity,
        })
    }

    /// Store a practice attempt. Successful attempts are also logged as activity.
    pub async fn record_practice(
        &self,
        attempt: PracticeAttempt,
    ) -> AppResult<commit_practice::Model> {
        let parsed = commit_message::parse(&attempt.commit_message);
        let actual_type = parsed.as_ref().map(|p| p.commit_type.clone());
        let success = attempt.success.unwrap_or_else(|| match (&parsed, &attempt.expected_type) {
            (Some(p), Some(expected)) => p.commit_type == *expected,
            (Some(_), None) => true,
            (None, _) => false,
        });

        let stored = self
            .pool
            .insert_practice_session(NewPracticeSession {
                user_id: attempt.user_id.clone(),
                module_id: attempt.module_id.clone(),
                commit_message: attempt.commit_message,
                expected_type: attempt.expected_type,
                actual_type,
                success,
                attempts: attempt.attempts.unwrap_or(1),
            })
            .await?;

        if stored.success {
            let activity = NewActivity::new(attempt.user_id, ActivityType::CommitPractice)
                .with_module(attempt.module_id)
                .with_metadata(Some(json!({
                    "practiceId": stored.id,
                    "commitType": stored.actual_type,
                })));
            self.record_activity(activity, None).await?;
        }

        Ok(stored)
    }

    /// Fold a video heartbeat into progress. The first completion is logged
    /// as a `video_watch` activity.
    pub async fn record_video_heartbeat(
        &self,
        update: &VideoProgressUpdate,
    ) -> AppResult<user_video_progress::Model> {
        let (stored, newly_completed) = self.pool.upsert_video_progress(update).await?;

        if newly_completed {
            info!(user_id = %update.user_id, video_id = %update.video_id, "Video completed");
            let activity = NewActivity::new(update.user_id.clone(), ActivityType::VideoWatch)
                .with_module(stored.module_id.clone())
                .with_progress(Some(stored.progress.round() as i32))
                .with_time_spent(stored.duration.round() as i64)
                .with_metadata(Some(json!({ "videoId": stored.video_id })));
            self.record_activity(activity, None).await?;
        }

        Ok(stored)
    }
}
