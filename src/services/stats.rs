//! Learning statistics: streaks, achievements and daily summaries.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::db::activity::ActivityFact;
use crate::models::{Achievement, AchievementKind, ActivityEntry, ActivityType, DailySummary};

/// Current and longest runs of consecutive active days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakResult {
    pub current: i32,
    pub longest: i32,
}

/// Compute streaks from the days with any activity.
///
/// The current streak counts back from `today`, or from yesterday when
/// there was no activity today.
pub fn calculate_streak(dates: &[NaiveDate], today: NaiveDate) -> StreakResult {
    if dates.is_empty() {
        return StreakResult::default();
    }

    let date_set: HashSet<NaiveDate> = dates.iter().copied().collect();
    let yesterday = today - Duration::days(1);

    let mut current = 0;
    let start = if date_set.contains(&today) {
        Some(today)
    } else if date_set.contains(&yesterday) {
        Some(yesterday)
    } else {
        None
    };
    if let Some(mut check) = start {
        while date_set.contains(&check) {
            current += 1;
            check -= Duration::days(1);
        }
    }

    let longest = calculate_longest_streak(&date_set).max(current);
    StreakResult { current, longest }
}

fn calculate_longest_streak(dates: &HashSet<NaiveDate>) -> i32 {
    let sorted: BTreeSet<NaiveDate> = dates.iter().copied().collect();

    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;
    for date in sorted {
        run = match prev {
            Some(p) if date - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }
    longest
}

/// Raw per-user inputs for a stats recomputation.
#[derive(Debug, Clone, Default)]
pub struct StatsInputs {
    /// Configured size of the module catalogue
    pub catalogue_size: u32,
    /// (completed, time_spent) per tracked module
    pub modules: Vec<(bool, i64)>,
    pub activities: Vec<ActivityFact>,
    pub practice_total: u64,
    pub practice_successful: u64,
    pub videos_completed: u64,
}

/// Derived metrics before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsMetrics {
    pub total_modules: i32,
    pub completed_modules: i32,
    pub completion_rate: f64,
    pub total_time_spent: i64,
    pub streak: StreakResult,
    pub activity_count: usize,
    pub practice_successful: u64,
    pub videos_completed: u64,
    pub last_activity: Option<DateTime<Utc>>,
}

impl StatsInputs {
    /// Aggregate the inputs as of `today`.
    ///
    /// Module time comes from module progress. History time is added only for
    /// activity kinds that do not already feed module progress.
    pub fn compute(&self, today: NaiveDate) -> StatsMetrics {
        let total_modules = (self.catalogue_size as usize).max(self.modules.len()) as i32;
        let completed_modules = self.modules.iter().filter(|(done, _)| *done).count() as i32;
        let completion_rate = if total_modules > 0 {
            ((completed_modules as f64 / total_modules as f64) * 1000.0).round() / 10.0
        } else {
            0.0
        };

        let module_time: i64 = self.modules.iter().map(|(_, t)| (*t).max(0)).sum();
        let other_time: i64 = self
            .activities
            .iter()
            .filter(|a| {
                !ActivityType::parse(&a.activity_type)
                    .is_some_and(|t| t.affects_module_progress())
            })
            .map(|a| a.time_spent.max(0))
            .sum();

        let dates: Vec<NaiveDate> = self
            .activities
            .iter()
            .map(|a| a.occurred_at.date_naive())
            .collect();

        StatsMetrics {
            total_modules,
            completed_modules,
            completion_rate,
            total_time_spent: module_time + other_time,
            streak: calculate_streak(&dates, today),
            activity_count: self.activities.len(),
            practice_successful: self.practice_successful,
            videos_completed: self.videos_completed,
            last_activity: self.activities.iter().map(|a| a.occurred_at).max(),
        }
    }
}

const TEN_HOURS: i64 = 10 * 60 * 60;

fn earned(kind: AchievementKind, m: &StatsMetrics) -> bool {
    match kind {
        AchievementKind::FirstSteps => m.activity_count >= 1,
        AchievementKind::ModuleMaster => m.completed_modules >= 1,
        AchievementKind::HalfwayThere => m.total_modules > 0 && m.completion_rate >= 50.0,
        AchievementKind::Graduate => m.total_modules > 0 && m.completed_modules >= m.total_modules,
        AchievementKind::CommitApprentice => m.practice_successful >= 10,
        AchievementKind::CommitExpert => m.practice_successful >= 50,
        AchievementKind::WeekStreak => m.streak.longest >= 7,
        AchievementKind::DedicatedLearner => m.total_time_spent >= TEN_HOURS,
        AchievementKind::VideoBuff => m.videos_completed >= 5,
    }
}

/// Merge newly earned achievements into the previously unlocked ones.
///
/// Achievements are never revoked and keep their first unlock time.
pub fn evaluate_achievements(
    metrics: &StatsMetrics,
    previous: &[Achievement],
    now: DateTime<Utc>,
) -> Vec<Achievement> {
    let mut result: Vec<Achievement> = previous.to_vec();
    for kind in AchievementKind::ALL {
        if result.iter().any(|a| a.id == kind) {
            continue;
        }
        if earned(kind, metrics) {
            result.push(Achievement::unlock(kind, now));
        }
    }
    result
}

/// Per-day activity counts and time, oldest day first.
pub fn daily_summary(entries: &[ActivityEntry]) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, (u32, i64)> = BTreeMap::new();
    for entry in entries {
        let slot = days.entry(entry.timestamp.date_naive()).or_default();
        slot.0 += 1;
        slot.1 += entry.time_spent.max(0);
    }
    days.into_iter()
        .map(|(date, (activities, time_spent))| DailySummary {
            date,
            activities,
            time_spent,
        })
        .collect()
}
