//! Dashboard summaries derived from the record collections.
//!
//! Everything here is a pure function over an immutable snapshot plus an
//! explicit "now"; safe to recompute on every read.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{EmotionEntry, FocusSession, JournalEntry, TaskItem};

use super::streak::streak_days;

const DAY_MS: f64 = 86_400_000.0;

/// Minutes of completed focus per elapsed day since the oldest completed
/// session. The divisor is at least one so the first day never divides by
/// zero.
pub fn average_daily_minutes(completed: &[FocusSession], now: DateTime<Utc>) -> u32 {
    if completed.is_empty() {
        return 0;
    }
    let oldest = completed
        .iter()
        .map(|s| s.started_at)
        .min()
        .expect("non-empty");
    let elapsed_ms = (now - oldest).num_milliseconds().max(0) as f64;
    let days = (elapsed_ms / DAY_MS).ceil().max(1.0);
    let total: u64 = completed.iter().map(|s| u64::from(s.duration_min)).sum();
    (total as f64 / days).round() as u32
}

/// Midnight at the start of the current week (Sunday-based).
fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_back = i64::from(now.weekday().num_days_from_sunday());
    (now - Duration::days(days_back))
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
}

fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .with_day(1)
        .expect("day 1 always exists")
        .and_time(NaiveTime::MIN)
        .and_utc()
}

fn pct(part: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        (part as f64 / total as f64 * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_sessions: u64,
    pub total_minutes: u64,
    pub total_hours: u64,
    pub average_daily_minutes: u32,
    pub this_week: u64,
}

/// Summarize completed focus sessions.
pub fn session_summary(completed: &[FocusSession], now: DateTime<Utc>) -> SessionSummary {
    let total_minutes: u64 = completed.iter().map(|s| u64::from(s.duration_min)).sum();
    let week = week_start(now);
    SessionSummary {
        total_sessions: completed.len() as u64,
        total_minutes,
        total_hours: total_minutes / 60,
        average_daily_minutes: average_daily_minutes(completed, now),
        this_week: completed.iter().filter(|s| s.started_at >= week).count() as u64,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub total: u64,
    pub completed: u64,
    pub pending: u64,
    pub overdue: u64,
    pub due_today: u64,
    pub high_priority: u64,
    /// Completed share of all tasks, rounded percentage.
    pub completion_rate: u32,
}

pub fn task_summary(tasks: &[TaskItem], now: DateTime<Utc>) -> TaskSummary {
    let pending: Vec<&TaskItem> = tasks.iter().filter(|t| !t.completed).collect();
    let completed = tasks.len() - pending.len();

    let today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let tomorrow = today + Duration::days(1);

    TaskSummary {
        total: tasks.len() as u64,
        completed: completed as u64,
        pending: pending.len() as u64,
        overdue: pending
            .iter()
            .filter(|t| t.due_at.is_some_and(|due| due < now))
            .count() as u64,
        due_today: pending
            .iter()
            .filter(|t| t.due_at.is_some_and(|due| due >= today && due < tomorrow))
            .count() as u64,
        high_priority: pending
            .iter()
            .filter(|t| t.priority == crate::model::Priority::High)
            .count() as u64,
        completion_rate: pct(completed, tasks.len()),
    }
}

/// Pending tasks for display: priority descending, then due date ascending
/// with absent due dates after present ones, then newest created first.
pub fn sorted_tasks(tasks: &[TaskItem]) -> Vec<TaskItem> {
    let mut pending: Vec<TaskItem> = tasks.iter().filter(|t| !t.completed).cloned().collect();
    pending.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(|| match (a.due_at, b.due_at) {
                (Some(ad), Some(bd)) => ad.cmp(&bd),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => b.created_at.cmp(&a.created_at),
            })
    });
    pending
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionSummary {
    pub total: u64,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
    pub positive_pct: u32,
    pub negative_pct: u32,
}

pub fn emotion_summary(emotions: &[EmotionEntry]) -> EmotionSummary {
    let positive = emotions.iter().filter(|e| e.mood.is_positive()).count();
    let negative = emotions.iter().filter(|e| e.mood.is_negative()).count();
    EmotionSummary {
        total: emotions.len() as u64,
        positive: positive as u64,
        negative: negative as u64,
        neutral: (emotions.len() - positive - negative) as u64,
        positive_pct: pct(positive, emotions.len()),
        negative_pct: pct(negative, emotions.len()),
    }
}

/// Three or more strong negative emotions in the last seven days.
pub fn bad_streak(emotions: &[EmotionEntry], now: DateTime<Utc>) -> bool {
    let cutoff = now - Duration::days(7);
    emotions
        .iter()
        .filter(|e| e.logged_at >= cutoff && e.mood.is_negative() && e.intensity >= 3)
        .count()
        >= 3
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalSummary {
    pub total: u64,
    pub this_week: u64,
    pub this_month: u64,
    pub favorites: u64,
    pub streak: u32,
}

pub fn journal_summary(entries: &[JournalEntry], now: DateTime<Utc>) -> JournalSummary {
    let week = week_start(now);
    let month = month_start(now);
    JournalSummary {
        total: entries.len() as u64,
        this_week: entries.iter().filter(|e| e.created_at >= week).count() as u64,
        this_month: entries.iter().filter(|e| e.created_at >= month).count() as u64,
        favorites: entries.iter().filter(|e| e.favorite).count() as u64,
        streak: streak_days(entries, |e| e.created_at, now.date_naive()),
    }
}
