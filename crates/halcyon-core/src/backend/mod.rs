//! Backend access layer.
//!
//! Persistence, authentication, and sync live in a hosted backend; the core
//! only ever talks to it through the [`Backend`] trait. Implementations must
//! catch connectivity failures and surface them as
//! [`BackendError::Connection`] instead of panicking across the boundary.
//! There is no retry or backoff: every call is fire-and-await.

pub mod credentials;
mod memory;
mod rest;

pub use memory::MemoryBackend;
pub use rest::RestBackend;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BackendError;
use crate::model::{
    EmotionEntry, FocusSession, JournalEntry, Mood, Priority, TaskCategory, TaskItem,
};

/// Fields the client chooses when opening a focus session; the backend owns
/// the id and the completion state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionDraft {
    pub duration_min: u32,
    pub break_duration_min: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionDraft {
    pub mood: Mood,
    pub intensity: u8,
    pub note: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub category: TaskCategory,
    pub due_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalDraft {
    pub title: String,
    pub body: String,
    pub prompt: Option<String>,
    pub mood: Option<Mood>,
}

/// CRUD against the hosted tables, one method set per record kind.
///
/// `at` parameters carry the caller's clock so record timestamps stay
/// deterministic under test.
#[async_trait]
pub trait Backend: Send + Sync {
    // ── Focus sessions ───────────────────────────────────────────────

    async fn create_focus_session(
        &self,
        user: Uuid,
        draft: SessionDraft,
        at: DateTime<Utc>,
    ) -> Result<FocusSession, BackendError>;

    async fn complete_focus_session(
        &self,
        id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<(), BackendError>;

    async fn load_focus_sessions(&self, user: Uuid) -> Result<Vec<FocusSession>, BackendError>;

    // ── Emotions ─────────────────────────────────────────────────────

    async fn create_emotion(
        &self,
        user: Uuid,
        draft: EmotionDraft,
        at: DateTime<Utc>,
    ) -> Result<EmotionEntry, BackendError>;

    async fn delete_emotion(&self, id: Uuid) -> Result<(), BackendError>;

    async fn load_emotions(&self, user: Uuid) -> Result<Vec<EmotionEntry>, BackendError>;

    // ── Tasks ────────────────────────────────────────────────────────

    async fn create_task(
        &self,
        user: Uuid,
        draft: TaskDraft,
        at: DateTime<Utc>,
    ) -> Result<TaskItem, BackendError>;

    async fn update_task(&self, task: &TaskItem) -> Result<(), BackendError>;

    async fn delete_task(&self, id: Uuid) -> Result<(), BackendError>;

    async fn load_tasks(&self, user: Uuid) -> Result<Vec<TaskItem>, BackendError>;

    // ── Journal ──────────────────────────────────────────────────────

    async fn create_journal_entry(
        &self,
        user: Uuid,
        draft: JournalDraft,
        at: DateTime<Utc>,
    ) -> Result<JournalEntry, BackendError>;

    async fn update_journal_entry(&self, entry: &JournalEntry) -> Result<(), BackendError>;

    async fn delete_journal_entry(&self, id: Uuid) -> Result<(), BackendError>;

    async fn load_journal_entries(&self, user: Uuid) -> Result<Vec<JournalEntry>, BackendError>;
}
