//! Statistics for the dashboard.
//!
//! Pure, deterministic functions over immutable snapshots of the record
//! collections: streaks, category distributions, mood trend, and the
//! per-domain summaries. None of them mutate their input; "now" is always
//! passed in by the caller.

mod distribution;
mod streak;
mod summary;
mod trend;

pub use distribution::{distribution, CategoryShare};
pub use streak::streak_days;
pub use summary::{
    average_daily_minutes, bad_streak, emotion_summary, journal_summary, session_summary,
    sorted_tasks, task_summary, EmotionSummary, JournalSummary, SessionSummary, TaskSummary,
};
pub use trend::{mood_trend, Trend};
