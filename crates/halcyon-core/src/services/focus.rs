//! Focus session orchestration.
//!
//! Wires the [`FocusTimer`] state machine to the backend, the session
//! store, and the notifier. Persistence around the timer is at-most-once
//! and best-effort: a failed create or complete call never blocks the
//! state transitions, it only costs the record and leaves a diagnostic.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::backend::{Backend, SessionDraft};
use crate::clock::Clock;
use crate::error::{Result, ValidationError};
use crate::events::TimerEvent;
use crate::model::FocusSession;
use crate::notify::Notifier;
use crate::stats::{session_summary, SessionSummary};
use crate::timer::{FocusTimer, TimerMode, TimerSettings};

use super::require_user;

pub struct FocusService {
    backend: Arc<dyn Backend>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    user: Option<Uuid>,
    timer: FocusTimer,
    /// Persisted sessions for the current user, newest first.
    sessions: Vec<FocusSession>,
}

impl FocusService {
    pub fn new(
        backend: Arc<dyn Backend>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        user: Option<Uuid>,
        settings: TimerSettings,
    ) -> Self {
        Self {
            backend,
            clock,
            notifier,
            user,
            timer: FocusTimer::new(settings),
            sessions: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timer(&self) -> &FocusTimer {
        &self.timer
    }

    pub fn sessions(&self) -> &[FocusSession] {
        &self.sessions
    }

    /// The ten newest sessions, for the dashboard list.
    pub fn recent_sessions(&self) -> &[FocusSession] {
        &self.sessions[..self.sessions.len().min(10)]
    }

    pub fn completed_sessions(&self) -> Vec<FocusSession> {
        self.sessions.iter().filter(|s| s.completed).cloned().collect()
    }

    fn completed_count(&self) -> u64 {
        self.sessions.iter().filter(|s| s.completed).count() as u64
    }

    pub fn summary(&self) -> SessionSummary {
        session_summary(&self.completed_sessions(), self.clock.now())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Refresh the session store from the backend. A no-op without a
    /// signed-in user.
    pub async fn load(&mut self) -> Result<()> {
        let Some(user) = self.user else {
            return Ok(());
        };
        let mut sessions = self.backend.load_focus_sessions(user).await?;
        sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        self.sessions = sessions;
        Ok(())
    }

    /// Begin (or resume) the countdown. No-op while running.
    ///
    /// A fresh focus countdown asks the backend for a session record and
    /// links it to the timer; if that call fails the countdown still runs,
    /// unpersisted.
    pub async fn start(&mut self) -> Option<TimerEvent> {
        if self.timer.is_running() {
            return None;
        }
        if self.timer.needs_session() {
            match require_user(self.user) {
                Ok(user) => {
                    let settings = self.timer.settings();
                    let draft = SessionDraft {
                        duration_min: settings.focus_min,
                        break_duration_min: settings.short_break_min,
                    };
                    match self
                        .backend
                        .create_focus_session(user, draft, self.clock.now())
                        .await
                    {
                        Ok(session) => {
                            self.timer.attach_session(session.id);
                            self.sessions.insert(0, session);
                        }
                        Err(err) => {
                            warn!(error = %err, "focus session not persisted; countdown runs anyway")
                        }
                    }
                }
                Err(_) => warn!("no signed-in user; focus session will not be persisted"),
            }
        }
        self.timer.start()
    }

    /// One 1-second step. Runs the completion sequence when the countdown
    /// reaches zero.
    pub async fn tick(&mut self) -> Option<TimerEvent> {
        match self.timer.tick() {
            Some(TimerEvent::TimerCompleted { .. }) => Some(self.complete().await),
            other => other,
        }
    }

    /// Finalize the current countdown: persist completion (best-effort),
    /// auto-switch mode, and fire a best-effort notification.
    ///
    /// The completed count that drives the long-break rule is read after
    /// the completion write, so the just-finished session is included when
    /// the write succeeds.
    pub async fn complete(&mut self) -> TimerEvent {
        let finished_mode = self.timer.mode();
        if let Some(id) = self.timer.finish() {
            let completed_at = self.clock.now();
            match self.backend.complete_focus_session(id, completed_at).await {
                Ok(()) => {
                    if let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) {
                        session.completed = true;
                        session.completed_at = Some(completed_at);
                    }
                }
                Err(err) => {
                    warn!(error = %err, "session completion not persisted; timer proceeds")
                }
            }
        }

        let event = self.timer.auto_switch(self.completed_count());

        if self.notifier.permitted() {
            let body = format!("{} completed!", finished_mode.label());
            if let Err(err) = self.notifier.notify("Halcyon", &body) {
                warn!(error = %err, "notification failed");
            }
        }

        event
    }

    /// Stop ticking without losing progress.
    pub fn pause(&mut self) -> Option<TimerEvent> {
        self.timer.pause()
    }

    /// Stop ticking and restore the full duration. An in-progress focus
    /// session's linkage is discarded; the persisted record, if any, stays
    /// uncompleted.
    pub fn reset(&mut self) -> TimerEvent {
        self.timer.reset()
    }

    pub fn switch_mode(&mut self, mode: TimerMode) -> TimerEvent {
        self.timer.switch_mode(mode)
    }

    pub fn set_focus_duration(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.timer.set_focus_duration(minutes)
    }

    pub fn set_short_break_duration(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.timer.set_short_break_duration(minutes)
    }

    pub fn set_long_break_duration(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.timer.set_long_break_duration(minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::clock::FixedClock;
    use crate::error::BackendError;
    use crate::notify::NoopNotifier;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Mutex;

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2025, 6, 15, 9, 0, 0).unwrap(),
        ))
    }

    fn service(
        backend: Arc<dyn Backend>,
        user: Option<Uuid>,
    ) -> FocusService {
        FocusService::new(
            backend,
            clock(),
            Arc::new(NoopNotifier),
            user,
            TimerSettings::default(),
        )
    }

    /// Backend that fails every write but lets loads through.
    struct WriteFailingBackend(MemoryBackend);

    #[async_trait]
    impl Backend for WriteFailingBackend {
        async fn create_focus_session(
            &self,
            _user: Uuid,
            _draft: SessionDraft,
            _at: DateTime<Utc>,
        ) -> Result<FocusSession, BackendError> {
            Err(BackendError::Provider("insert rejected".into()))
        }

        async fn complete_focus_session(
            &self,
            _id: Uuid,
            _completed_at: DateTime<Utc>,
        ) -> Result<(), BackendError> {
            Err(BackendError::Provider("update rejected".into()))
        }

        async fn load_focus_sessions(
            &self,
            user: Uuid,
        ) -> Result<Vec<FocusSession>, BackendError> {
            self.0.load_focus_sessions(user).await
        }

        async fn create_emotion(
            &self,
            user: Uuid,
            draft: crate::backend::EmotionDraft,
            at: DateTime<Utc>,
        ) -> Result<crate::model::EmotionEntry, BackendError> {
            self.0.create_emotion(user, draft, at).await
        }

        async fn delete_emotion(&self, id: Uuid) -> Result<(), BackendError> {
            self.0.delete_emotion(id).await
        }

        async fn load_emotions(
            &self,
            user: Uuid,
        ) -> Result<Vec<crate::model::EmotionEntry>, BackendError> {
            self.0.load_emotions(user).await
        }

        async fn create_task(
            &self,
            user: Uuid,
            draft: crate::backend::TaskDraft,
            at: DateTime<Utc>,
        ) -> Result<crate::model::TaskItem, BackendError> {
            self.0.create_task(user, draft, at).await
        }

        async fn update_task(&self, task: &crate::model::TaskItem) -> Result<(), BackendError> {
            self.0.update_task(task).await
        }

        async fn delete_task(&self, id: Uuid) -> Result<(), BackendError> {
            self.0.delete_task(id).await
        }

        async fn load_tasks(
            &self,
            user: Uuid,
        ) -> Result<Vec<crate::model::TaskItem>, BackendError> {
            self.0.load_tasks(user).await
        }

        async fn create_journal_entry(
            &self,
            user: Uuid,
            draft: crate::backend::JournalDraft,
            at: DateTime<Utc>,
        ) -> Result<crate::model::JournalEntry, BackendError> {
            self.0.create_journal_entry(user, draft, at).await
        }

        async fn update_journal_entry(
            &self,
            entry: &crate::model::JournalEntry,
        ) -> Result<(), BackendError> {
            self.0.update_journal_entry(entry).await
        }

        async fn delete_journal_entry(&self, id: Uuid) -> Result<(), BackendError> {
            self.0.delete_journal_entry(id).await
        }

        async fn load_journal_entries(
            &self,
            user: Uuid,
        ) -> Result<Vec<crate::model::JournalEntry>, BackendError> {
            self.0.load_journal_entries(user).await
        }
    }

    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn permitted(&self) -> bool {
            true
        }

        fn request_permission(&self) -> bool {
            true
        }

        fn notify(&self, title: &str, body: &str) -> Result<(), Box<dyn std::error::Error>> {
            self.sent
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn double_start_creates_exactly_one_session() {
        let backend = Arc::new(MemoryBackend::new());
        let mut svc = service(backend.clone(), Some(Uuid::new_v4()));
        assert!(svc.start().await.is_some());
        assert!(svc.start().await.is_none());
        assert_eq!(backend.session_count(), 1);
    }

    #[tokio::test]
    async fn completing_a_focus_session_persists_and_switches_to_short_break() {
        let backend = Arc::new(MemoryBackend::new());
        let user = Uuid::new_v4();
        let mut svc = service(backend.clone(), Some(user));
        svc.start().await;

        let event = svc.complete().await;
        match event {
            TimerEvent::ModeSwitched { from, to, .. } => {
                assert_eq!(from, TimerMode::Focus);
                assert_eq!(to, TimerMode::ShortBreak);
            }
            other => panic!("expected mode switch, got {other:?}"),
        }
        let stored = backend.load_focus_sessions(user).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].completed);
    }

    #[tokio::test]
    async fn fourth_completion_earns_a_long_break() {
        let backend = Arc::new(MemoryBackend::new());
        let user = Uuid::new_v4();
        let mut svc = service(backend.clone(), Some(user));

        for expected in [
            TimerMode::ShortBreak,
            TimerMode::ShortBreak,
            TimerMode::ShortBreak,
            TimerMode::LongBreak,
        ] {
            svc.start().await;
            svc.complete().await;
            assert_eq!(svc.timer().mode(), expected);
            // Break completion returns to focus without touching the store.
            svc.start().await;
            svc.complete().await;
            assert_eq!(svc.timer().mode(), TimerMode::Focus);
        }
        assert_eq!(backend.session_count(), 4);
    }

    #[tokio::test]
    async fn completing_a_break_persists_nothing() {
        let backend = Arc::new(MemoryBackend::new());
        let mut svc = service(backend.clone(), Some(Uuid::new_v4()));
        svc.switch_mode(TimerMode::ShortBreak);
        svc.start().await;
        let event = svc.complete().await;
        assert!(matches!(
            event,
            TimerEvent::ModeSwitched {
                to: TimerMode::Focus,
                ..
            }
        ));
        assert_eq!(backend.session_count(), 0);
    }

    #[tokio::test]
    async fn persistence_failure_still_switches_modes() {
        let backend = Arc::new(WriteFailingBackend(MemoryBackend::new()));
        let mut svc = service(backend, Some(Uuid::new_v4()));
        assert!(svc.start().await.is_some(), "countdown must run unpersisted");
        let event = svc.complete().await;
        assert!(matches!(
            event,
            TimerEvent::ModeSwitched {
                to: TimerMode::ShortBreak,
                ..
            }
        ));
        // Nothing persisted, so nothing counted.
        assert_eq!(svc.completed_count(), 0);
    }

    #[tokio::test]
    async fn without_a_user_the_timer_runs_but_nothing_persists() {
        let backend = Arc::new(MemoryBackend::new());
        let mut svc = service(backend.clone(), None);
        assert!(svc.load().await.is_ok(), "load is a no-op without a user");
        assert!(svc.start().await.is_some());
        svc.complete().await;
        assert_eq!(backend.session_count(), 0);
    }

    #[tokio::test]
    async fn reset_discards_linkage_and_next_start_opens_a_new_record() {
        let backend = Arc::new(MemoryBackend::new());
        let user = Uuid::new_v4();
        let mut svc = service(backend.clone(), Some(user));
        svc.start().await;
        svc.reset();
        assert_eq!(svc.timer().active_session(), None);

        svc.start().await;
        let stored = backend.load_focus_sessions(user).await.unwrap();
        assert_eq!(stored.len(), 2);
        // The abandoned record stays uncompleted.
        assert!(stored.iter().all(|s| !s.completed));
    }

    #[tokio::test]
    async fn pause_preserves_remaining_across_resume() {
        let backend = Arc::new(MemoryBackend::new());
        let mut svc = service(backend, Some(Uuid::new_v4()));
        svc.start().await;
        for _ in 0..42 {
            svc.tick().await;
        }
        let remaining = svc.timer().remaining_secs();
        svc.pause();
        svc.start().await;
        assert_eq!(svc.timer().remaining_secs(), remaining);
    }

    #[tokio::test]
    async fn notification_fires_with_the_completed_mode() {
        let notifier = Arc::new(RecordingNotifier {
            sent: Mutex::new(Vec::new()),
        });
        let mut svc = FocusService::new(
            Arc::new(MemoryBackend::new()),
            clock(),
            notifier.clone(),
            Some(Uuid::new_v4()),
            TimerSettings::default(),
        );
        svc.start().await;
        svc.complete().await;
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, "Focus completed!");
    }

    #[tokio::test]
    async fn summary_counts_only_completed_sessions() {
        let backend = Arc::new(MemoryBackend::new());
        let mut svc = service(backend, Some(Uuid::new_v4()));
        svc.start().await;
        svc.complete().await;
        svc.switch_mode(TimerMode::Focus);
        svc.start().await; // second session left incomplete
        let summary = svc.summary();
        assert_eq!(summary.total_sessions, 1);
        assert_eq!(summary.total_minutes, 25);
    }
}
