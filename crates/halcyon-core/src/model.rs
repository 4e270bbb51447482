//! Record types shared by the services, the aggregation engine, and the
//! backend access layer.
//!
//! All records carry a creation timestamp; the aggregation engine and the
//! date-range filter read them as generic timestamped rows via accessor
//! closures rather than a blanket trait.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One persisted timed focus interval, possibly completed or abandoned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Planned focus duration in minutes.
    pub duration_min: u32,
    /// Planned break duration in minutes.
    pub break_duration_min: u32,
    pub completed: bool,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Emotion categories a user can log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Anxious,
    Calm,
    Excited,
    Tired,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Anxious,
        Mood::Calm,
        Mood::Excited,
        Mood::Tired,
    ];

    /// Fixed numeric weight used by trend computation. Positive moods score
    /// higher; the scale is 1-5.
    pub fn score(&self) -> u8 {
        match self {
            Mood::Happy | Mood::Excited => 5,
            Mood::Calm => 4,
            Mood::Tired | Mood::Anxious => 2,
            Mood::Sad | Mood::Angry => 1,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Mood::Happy | Mood::Excited | Mood::Calm)
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Mood::Sad | Mood::Angry | Mood::Anxious)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
            Mood::Anxious => "Anxious",
            Mood::Calm => "Calm",
            Mood::Excited => "Excited",
            Mood::Tired => "Tired",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😢",
            Mood::Angry => "😠",
            Mood::Anxious => "😰",
            Mood::Calm => "😌",
            Mood::Excited => "🤩",
            Mood::Tired => "😴",
        }
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "sad" => Ok(Mood::Sad),
            "angry" => Ok(Mood::Angry),
            "anxious" => Ok(Mood::Anxious),
            "calm" => Ok(Mood::Calm),
            "excited" => Ok(Mood::Excited),
            "tired" => Ok(Mood::Tired),
            other => Err(format!("unknown mood: {other}")),
        }
    }
}

/// One logged emotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood: Mood,
    /// Intensity on a 1-5 scale.
    pub intensity: u8,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub logged_at: DateTime<Utc>,
}

/// One journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    /// Reflection prompt the entry answered, if any.
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Sort weight; higher sorts first in the pending-task view.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Personal,
    Work,
    Study,
    Health,
    Social,
    Other,
}

impl std::str::FromStr for TaskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "personal" => Ok(TaskCategory::Personal),
            "work" => Ok(TaskCategory::Work),
            "study" => Ok(TaskCategory::Study),
            "health" => Ok(TaskCategory::Health),
            "social" => Ok(TaskCategory::Social),
            "other" => Ok(TaskCategory::Other),
            s => Err(format!("unknown category: {s}")),
        }
    }
}

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub category: TaskCategory,
    /// Absent due dates sort after present ones.
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_scores_match_polarity() {
        for mood in Mood::ALL {
            if mood.is_positive() {
                assert!(mood.score() >= 4, "{:?}", mood);
            }
            if mood.is_negative() {
                assert!(mood.score() <= 2, "{:?}", mood);
            }
        }
    }

    #[test]
    fn tired_is_neutral() {
        assert!(!Mood::Tired.is_positive());
        assert!(!Mood::Tired.is_negative());
    }

    #[test]
    fn mood_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Mood::Anxious).unwrap(), "\"anxious\"");
        let back: Mood = serde_json::from_str("\"calm\"").unwrap();
        assert_eq!(back, Mood::Calm);
    }
}
