//! Hosted-backend client.
//!
//! Talks to a PostgREST-style REST API: `/rest/v1/<table>` routes,
//! `apikey` plus bearer headers, `Prefer: return=representation` on inserts,
//! and `id=eq.<uuid>` filters. Calls are fire-and-await; there is no retry
//! or backoff, callers receive the provider's message when one exists and a
//! generic connection error otherwise.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use url::Url;
use uuid::Uuid;

use crate::error::BackendError;
use crate::model::{EmotionEntry, FocusSession, JournalEntry, TaskItem};

use super::{Backend, EmotionDraft, JournalDraft, SessionDraft, TaskDraft};

const SESSIONS: &str = "focus_sessions";
const EMOTIONS: &str = "emotions";
const TASKS: &str = "tasks";
const JOURNAL: &str = "journal_entries";

/// Error body shape the provider returns on rejected requests.
#[derive(Debug, Deserialize)]
struct ProviderMessage {
    message: String,
}

pub struct RestBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestBackend {
    /// Validates and stores the base URL; no request is made until the
    /// first operation.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, BackendError> {
        let parsed =
            Url::parse(base_url).map_err(|e| BackendError::Decode(format!("base URL: {e}")))?;
        Ok(Self {
            client: Client::new(),
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(resp: Response) -> Result<Response, BackendError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound);
        }
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ProviderMessage>(&body)
            .map(|m| m.message)
            .unwrap_or_else(|_| format!("HTTP {status}"));
        Err(BackendError::Provider(message))
    }

    /// Inserts return a one-element array of the created row.
    async fn insert_returning<T: for<'de> Deserialize<'de>>(
        &self,
        table: &str,
        body: serde_json::Value,
    ) -> Result<T, BackendError> {
        let resp = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await?;
        let mut rows: Vec<T> = Self::check(resp).await?.json().await?;
        if rows.is_empty() {
            return Err(BackendError::Decode("insert returned no rows".into()));
        }
        Ok(rows.remove(0))
    }

    async fn patch_by_id(
        &self,
        table: &str,
        id: Uuid,
        body: serde_json::Value,
    ) -> Result<(), BackendError> {
        let resp = self
            .request(reqwest::Method::PATCH, table)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(&body)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn delete_by_id(&self, table: &str, id: Uuid) -> Result<(), BackendError> {
        let resp = self
            .request(reqwest::Method::DELETE, table)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn load_for_user<T: for<'de> Deserialize<'de>>(
        &self,
        table: &str,
        user: Uuid,
        order: &str,
    ) -> Result<Vec<T>, BackendError> {
        let resp = self
            .request(reqwest::Method::GET, table)
            .query(&[
                ("user_id", format!("eq.{user}")),
                ("order", format!("{order}.desc")),
            ])
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn create_focus_session(
        &self,
        user: Uuid,
        draft: SessionDraft,
        at: DateTime<Utc>,
    ) -> Result<FocusSession, BackendError> {
        self.insert_returning(
            SESSIONS,
            json!({
                "user_id": user,
                "duration_min": draft.duration_min,
                "break_duration_min": draft.break_duration_min,
                "completed": false,
                "started_at": at,
                "created_at": at,
            }),
        )
        .await
    }

    async fn complete_focus_session(
        &self,
        id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<(), BackendError> {
        self.patch_by_id(
            SESSIONS,
            id,
            json!({ "completed": true, "completed_at": completed_at }),
        )
        .await
    }

    async fn load_focus_sessions(&self, user: Uuid) -> Result<Vec<FocusSession>, BackendError> {
        self.load_for_user(SESSIONS, user, "started_at").await
    }

    async fn create_emotion(
        &self,
        user: Uuid,
        draft: EmotionDraft,
        at: DateTime<Utc>,
    ) -> Result<EmotionEntry, BackendError> {
        self.insert_returning(
            EMOTIONS,
            json!({
                "user_id": user,
                "mood": draft.mood,
                "intensity": draft.intensity,
                "note": draft.note,
                "tags": draft.tags,
                "logged_at": at,
            }),
        )
        .await
    }

    async fn delete_emotion(&self, id: Uuid) -> Result<(), BackendError> {
        self.delete_by_id(EMOTIONS, id).await
    }

    async fn load_emotions(&self, user: Uuid) -> Result<Vec<EmotionEntry>, BackendError> {
        self.load_for_user(EMOTIONS, user, "logged_at").await
    }

    async fn create_task(
        &self,
        user: Uuid,
        draft: TaskDraft,
        at: DateTime<Utc>,
    ) -> Result<TaskItem, BackendError> {
        self.insert_returning(
            TASKS,
            json!({
                "user_id": user,
                "title": draft.title,
                "description": draft.description,
                "completed": false,
                "priority": draft.priority,
                "category": draft.category,
                "due_at": draft.due_at,
                "created_at": at,
                "updated_at": at,
            }),
        )
        .await
    }

    async fn update_task(&self, task: &TaskItem) -> Result<(), BackendError> {
        self.patch_by_id(TASKS, task.id, serde_json::to_value(task)?)
            .await
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), BackendError> {
        self.delete_by_id(TASKS, id).await
    }

    async fn load_tasks(&self, user: Uuid) -> Result<Vec<TaskItem>, BackendError> {
        self.load_for_user(TASKS, user, "created_at").await
    }

    async fn create_journal_entry(
        &self,
        user: Uuid,
        draft: JournalDraft,
        at: DateTime<Utc>,
    ) -> Result<JournalEntry, BackendError> {
        self.insert_returning(
            JOURNAL,
            json!({
                "user_id": user,
                "title": draft.title,
                "body": draft.body,
                "prompt": draft.prompt,
                "mood": draft.mood,
                "favorite": false,
                "created_at": at,
                "updated_at": at,
            }),
        )
        .await
    }

    async fn update_journal_entry(&self, entry: &JournalEntry) -> Result<(), BackendError> {
        self.patch_by_id(JOURNAL, entry.id, serde_json::to_value(entry)?)
            .await
    }

    async fn delete_journal_entry(&self, id: Uuid) -> Result<(), BackendError> {
        self.delete_by_id(JOURNAL, id).await
    }

    async fn load_journal_entries(&self, user: Uuid) -> Result<Vec<JournalEntry>, BackendError> {
        self.load_for_user(JOURNAL, user, "created_at").await
    }
}
