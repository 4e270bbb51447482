//! Task CRUD and the pending-task views.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::{Backend, TaskDraft};
use crate::clock::Clock;
use crate::error::{CoreError, Result, ValidationError};
use crate::model::{Priority, TaskItem};
use crate::stats::{sorted_tasks, task_summary, TaskSummary};

use super::require_user;

pub struct TaskService {
    backend: Arc<dyn Backend>,
    clock: Arc<dyn Clock>,
    user: Option<Uuid>,
    /// Tasks for the current user, newest first.
    tasks: Vec<TaskItem>,
}

impl TaskService {
    pub fn new(backend: Arc<dyn Backend>, clock: Arc<dyn Clock>, user: Option<Uuid>) -> Self {
        Self {
            backend,
            clock,
            user,
            tasks: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[TaskItem] {
        &self.tasks
    }

    pub fn pending(&self) -> Vec<&TaskItem> {
        self.tasks.iter().filter(|t| !t.completed).collect()
    }

    pub fn completed(&self) -> Vec<&TaskItem> {
        self.tasks.iter().filter(|t| t.completed).collect()
    }

    pub fn overdue(&self) -> Vec<&TaskItem> {
        let now = self.clock.now();
        self.tasks
            .iter()
            .filter(|t| !t.completed && t.due_at.is_some_and(|due| due < now))
            .collect()
    }

    pub fn high_priority(&self) -> Vec<&TaskItem> {
        self.tasks
            .iter()
            .filter(|t| !t.completed && t.priority == Priority::High)
            .collect()
    }

    /// Pending tasks ordered for display: priority, then due date (absent
    /// last), then newest first.
    pub fn sorted(&self) -> Vec<TaskItem> {
        sorted_tasks(&self.tasks)
    }

    pub fn summary(&self) -> TaskSummary {
        task_summary(&self.tasks, self.clock.now())
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub async fn load(&mut self) -> Result<()> {
        let Some(user) = self.user else {
            return Ok(());
        };
        let mut tasks = self.backend.load_tasks(user).await?;
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.tasks = tasks;
        Ok(())
    }

    /// Create a task. Empty titles are rejected before any backend call.
    pub async fn create(
        &mut self,
        title: &str,
        description: Option<String>,
        priority: Priority,
        category: crate::model::TaskCategory,
        due_at: Option<DateTime<Utc>>,
    ) -> Result<TaskItem> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyField { field: "title" }.into());
        }
        let user = require_user(self.user)?;
        let draft = TaskDraft {
            title: title.to_string(),
            description,
            priority,
            category,
            due_at,
        };
        let task = self
            .backend
            .create_task(user, draft, self.clock.now())
            .await?;
        self.tasks.insert(0, task.clone());
        Ok(task)
    }

    /// Mark a task done; records the completion instant.
    pub async fn complete(&mut self, id: Uuid) -> Result<TaskItem> {
        require_user(self.user)?;
        let now = self.clock.now();
        let mut updated = self
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| CoreError::Custom(format!("no task with id {id}")))?;
        updated.completed = true;
        updated.completed_at = Some(now);
        updated.updated_at = now;

        self.backend.update_task(&updated).await?;
        self.replace(updated.clone());
        Ok(updated)
    }

    /// Push an edited task to the backend, then into the local store.
    pub async fn update(&mut self, mut task: TaskItem) -> Result<TaskItem> {
        require_user(self.user)?;
        if task.title.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "title" }.into());
        }
        task.updated_at = self.clock.now();
        self.backend.update_task(&task).await?;
        self.replace(task.clone());
        Ok(task)
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<()> {
        require_user(self.user)?;
        self.backend.delete_task(id).await?;
        self.tasks.retain(|t| t.id != id);
        Ok(())
    }

    fn replace(&mut self, task: TaskItem) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        }
    }
}
