//! Emotion logging and mood analytics.

use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use crate::backend::{Backend, EmotionDraft};
use crate::clock::Clock;
use crate::daterange::{filter_by_range, DateRange};
use crate::error::{Result, ValidationError};
use crate::model::{EmotionEntry, Mood};
use crate::stats::{
    bad_streak, distribution, emotion_summary, mood_trend, streak_days, CategoryShare,
    EmotionSummary, Trend,
};

use super::require_user;

pub struct EmotionService {
    backend: Arc<dyn Backend>,
    clock: Arc<dyn Clock>,
    user: Option<Uuid>,
    /// Logged emotions for the current user, newest first.
    emotions: Vec<EmotionEntry>,
}

impl EmotionService {
    pub fn new(backend: Arc<dyn Backend>, clock: Arc<dyn Clock>, user: Option<Uuid>) -> Self {
        Self {
            backend,
            clock,
            user,
            emotions: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn entries(&self) -> &[EmotionEntry] {
        &self.emotions
    }

    /// The ten newest entries.
    pub fn recent(&self) -> &[EmotionEntry] {
        &self.emotions[..self.emotions.len().min(10)]
    }

    pub fn latest(&self) -> Option<&EmotionEntry> {
        self.emotions.first()
    }

    pub fn by_range(&self, range: &DateRange) -> Vec<EmotionEntry> {
        filter_by_range(&self.emotions, |e| e.logged_at, range)
    }

    pub fn last_days(&self, days: i64) -> Vec<EmotionEntry> {
        let now = self.clock.now();
        self.by_range(&DateRange {
            start: now - Duration::days(days),
            end: now,
        })
    }

    pub fn today(&self) -> Vec<EmotionEntry> {
        let now = self.clock.now();
        let start = now.date_naive().and_time(chrono::NaiveTime::MIN).and_utc();
        self.by_range(&DateRange {
            start,
            end: start + Duration::days(1),
        })
    }

    pub fn trend(&self) -> Trend {
        mood_trend(&self.emotions)
    }

    /// Consecutive days with at least one log, ending today.
    pub fn streak(&self) -> u32 {
        streak_days(&self.emotions, |e| e.logged_at, self.clock.now().date_naive())
    }

    /// Three or more strong negative emotions in the last week.
    pub fn bad_streak(&self) -> bool {
        bad_streak(&self.emotions, self.clock.now())
    }

    pub fn summary(&self) -> EmotionSummary {
        emotion_summary(&self.emotions)
    }

    pub fn mood_distribution(&self) -> Vec<CategoryShare> {
        distribution(&self.emotions, |e| e.mood.label().to_lowercase())
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub async fn load(&mut self) -> Result<()> {
        let Some(user) = self.user else {
            return Ok(());
        };
        let mut emotions = self.backend.load_emotions(user).await?;
        emotions.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
        self.emotions = emotions;
        Ok(())
    }

    /// Log an emotion. Intensity outside `[1, 5]` is rejected before any
    /// backend call; the local collection is updated only on confirmed
    /// success.
    pub async fn log(
        &mut self,
        mood: Mood,
        intensity: u8,
        note: Option<String>,
        tags: Vec<String>,
    ) -> Result<EmotionEntry> {
        if !(1..=5).contains(&intensity) {
            return Err(ValidationError::IntensityOutOfRange(intensity).into());
        }
        let user = require_user(self.user)?;
        let draft = EmotionDraft {
            mood,
            intensity,
            note,
            tags,
        };
        let entry = self
            .backend
            .create_emotion(user, draft, self.clock.now())
            .await?;
        self.emotions.insert(0, entry.clone());
        Ok(entry)
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<()> {
        require_user(self.user)?;
        self.backend.delete_emotion(id).await?;
        self.emotions.retain(|e| e.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::clock::FixedClock;
    use crate::error::CoreError;
    use chrono::TimeZone;
    use chrono::Utc;

    fn service(user: Option<Uuid>) -> (EmotionService, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2025, 6, 15, 9, 0, 0).unwrap(),
        ));
        (
            EmotionService::new(Arc::new(MemoryBackend::new()), clock.clone(), user),
            clock,
        )
    }

    #[tokio::test]
    async fn intensity_is_validated_before_the_backend() {
        let (mut svc, _) = service(Some(Uuid::new_v4()));
        for bad in [0u8, 6] {
            let err = svc.log(Mood::Happy, bad, None, Vec::new()).await.unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "{bad}");
        }
        assert!(svc.entries().is_empty());
    }

    #[tokio::test]
    async fn logging_requires_a_user() {
        let (mut svc, _) = service(None);
        let err = svc.log(Mood::Calm, 3, None, Vec::new()).await.unwrap_err();
        assert!(matches!(err, CoreError::NotAuthenticated));
        assert!(svc.load().await.is_ok());
    }

    #[tokio::test]
    async fn newest_entry_comes_first() {
        let (mut svc, clock) = service(Some(Uuid::new_v4()));
        svc.log(Mood::Sad, 2, None, Vec::new()).await.unwrap();
        clock.advance(Duration::hours(1));
        svc.log(Mood::Happy, 4, None, Vec::new()).await.unwrap();
        assert_eq!(svc.latest().unwrap().mood, Mood::Happy);
        assert_eq!(svc.recent().len(), 2);
    }

    #[tokio::test]
    async fn delete_removes_locally_after_backend_success() {
        let (mut svc, _) = service(Some(Uuid::new_v4()));
        let entry = svc.log(Mood::Tired, 3, None, Vec::new()).await.unwrap();
        svc.delete(entry.id).await.unwrap();
        assert!(svc.entries().is_empty());
    }

    #[tokio::test]
    async fn today_filters_by_calendar_day() {
        let (mut svc, clock) = service(Some(Uuid::new_v4()));
        svc.log(Mood::Calm, 3, None, Vec::new()).await.unwrap();
        clock.advance(Duration::days(1));
        svc.log(Mood::Happy, 4, None, Vec::new()).await.unwrap();
        let today = svc.today();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].mood, Mood::Happy);
    }

    #[tokio::test]
    async fn distribution_reflects_logged_moods() {
        let (mut svc, _) = service(Some(Uuid::new_v4()));
        svc.log(Mood::Happy, 4, None, Vec::new()).await.unwrap();
        svc.log(Mood::Happy, 4, None, Vec::new()).await.unwrap();
        svc.log(Mood::Sad, 2, None, Vec::new()).await.unwrap();
        let shares = svc.mood_distribution();
        assert_eq!(shares[0].category, "happy");
        assert_eq!(shares[0].percentage, 67);
        assert_eq!(shares[1].category, "sad");
        assert_eq!(shares[1].percentage, 33);
    }
}
