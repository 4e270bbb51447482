//! In-memory backend for tests and offline use.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::BackendError;
use crate::model::{EmotionEntry, FocusSession, JournalEntry, TaskItem};

use super::{Backend, EmotionDraft, JournalDraft, SessionDraft, TaskDraft};

#[derive(Debug, Default)]
struct Tables {
    sessions: Vec<FocusSession>,
    emotions: Vec<EmotionEntry>,
    tasks: Vec<TaskItem>,
    entries: Vec<JournalEntry>,
}

/// Mutex-guarded in-memory tables implementing the full [`Backend`]
/// contract. The lock is never held across an await point.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: Mutex<Tables>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored focus sessions, completed or not.
    pub fn session_count(&self) -> usize {
        self.tables.lock().unwrap().sessions.len()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn create_focus_session(
        &self,
        user: Uuid,
        draft: SessionDraft,
        at: DateTime<Utc>,
    ) -> Result<FocusSession, BackendError> {
        let session = FocusSession {
            id: Uuid::new_v4(),
            user_id: user,
            duration_min: draft.duration_min,
            break_duration_min: draft.break_duration_min,
            completed: false,
            started_at: at,
            completed_at: None,
            created_at: at,
        };
        self.tables.lock().unwrap().sessions.push(session.clone());
        Ok(session)
    }

    async fn complete_focus_session(
        &self,
        id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<(), BackendError> {
        let mut tables = self.tables.lock().unwrap();
        let session = tables
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(BackendError::NotFound)?;
        session.completed = true;
        session.completed_at = Some(completed_at);
        Ok(())
    }

    async fn load_focus_sessions(&self, user: Uuid) -> Result<Vec<FocusSession>, BackendError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .sessions
            .iter()
            .filter(|s| s.user_id == user)
            .cloned()
            .collect())
    }

    async fn create_emotion(
        &self,
        user: Uuid,
        draft: EmotionDraft,
        at: DateTime<Utc>,
    ) -> Result<EmotionEntry, BackendError> {
        let entry = EmotionEntry {
            id: Uuid::new_v4(),
            user_id: user,
            mood: draft.mood,
            intensity: draft.intensity,
            note: draft.note,
            tags: draft.tags,
            logged_at: at,
        };
        self.tables.lock().unwrap().emotions.push(entry.clone());
        Ok(entry)
    }

    async fn delete_emotion(&self, id: Uuid) -> Result<(), BackendError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.emotions.len();
        tables.emotions.retain(|e| e.id != id);
        if tables.emotions.len() == before {
            return Err(BackendError::NotFound);
        }
        Ok(())
    }

    async fn load_emotions(&self, user: Uuid) -> Result<Vec<EmotionEntry>, BackendError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .emotions
            .iter()
            .filter(|e| e.user_id == user)
            .cloned()
            .collect())
    }

    async fn create_task(
        &self,
        user: Uuid,
        draft: TaskDraft,
        at: DateTime<Utc>,
    ) -> Result<TaskItem, BackendError> {
        let task = TaskItem {
            id: Uuid::new_v4(),
            user_id: user,
            title: draft.title,
            description: draft.description,
            completed: false,
            priority: draft.priority,
            category: draft.category,
            due_at: draft.due_at,
            completed_at: None,
            created_at: at,
            updated_at: at,
        };
        self.tables.lock().unwrap().tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, task: &TaskItem) -> Result<(), BackendError> {
        let mut tables = self.tables.lock().unwrap();
        let slot = tables
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or(BackendError::NotFound)?;
        *slot = task.clone();
        Ok(())
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), BackendError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.tasks.len();
        tables.tasks.retain(|t| t.id != id);
        if tables.tasks.len() == before {
            return Err(BackendError::NotFound);
        }
        Ok(())
    }

    async fn load_tasks(&self, user: Uuid) -> Result<Vec<TaskItem>, BackendError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .tasks
            .iter()
            .filter(|t| t.user_id == user)
            .cloned()
            .collect())
    }

    async fn create_journal_entry(
        &self,
        user: Uuid,
        draft: JournalDraft,
        at: DateTime<Utc>,
    ) -> Result<JournalEntry, BackendError> {
        let entry = JournalEntry {
            id: Uuid::new_v4(),
            user_id: user,
            title: draft.title,
            body: draft.body,
            prompt: draft.prompt,
            mood: draft.mood,
            favorite: false,
            created_at: at,
            updated_at: at,
        };
        self.tables.lock().unwrap().entries.push(entry.clone());
        Ok(entry)
    }

    async fn update_journal_entry(&self, entry: &JournalEntry) -> Result<(), BackendError> {
        let mut tables = self.tables.lock().unwrap();
        let slot = tables
            .entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or(BackendError::NotFound)?;
        *slot = entry.clone();
        Ok(())
    }

    async fn delete_journal_entry(&self, id: Uuid) -> Result<(), BackendError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.entries.len();
        tables.entries.retain(|e| e.id != id);
        if tables.entries.len() == before {
            return Err(BackendError::NotFound);
        }
        Ok(())
    }

    async fn load_journal_entries(&self, user: Uuid) -> Result<Vec<JournalEntry>, BackendError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .entries
            .iter()
            .filter(|e| e.user_id == user)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mood;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn session_round_trip() {
        let backend = MemoryBackend::new();
        let user = Uuid::new_v4();
        let draft = SessionDraft {
            duration_min: 25,
            break_duration_min: 5,
        };

        let session = backend.create_focus_session(user, draft, at()).await.unwrap();
        assert!(!session.completed);

        backend
            .complete_focus_session(session.id, at())
            .await
            .unwrap();
        let loaded = backend.load_focus_sessions(user).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].completed);
        assert_eq!(loaded[0].completed_at, Some(at()));
    }

    #[tokio::test]
    async fn loads_are_scoped_to_the_user() {
        let backend = MemoryBackend::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let draft = EmotionDraft {
            mood: Mood::Happy,
            intensity: 4,
            note: None,
            tags: Vec::new(),
        };
        backend.create_emotion(alice, draft, at()).await.unwrap();
        assert!(backend.load_emotions(bob).await.unwrap().is_empty());
        assert_eq!(backend.load_emotions(alice).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_records_report_not_found() {
        let backend = MemoryBackend::new();
        let missing = Uuid::new_v4();
        assert!(matches!(
            backend.complete_focus_session(missing, at()).await,
            Err(BackendError::NotFound)
        ));
        assert!(matches!(
            backend.delete_task(missing).await,
            Err(BackendError::NotFound)
        ));
    }
}
