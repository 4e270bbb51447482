//! Journal entries and reflection prompts.

use std::sync::Arc;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::{Backend, JournalDraft};
use crate::clock::Clock;
use crate::error::{CoreError, Result, ValidationError};
use crate::model::{JournalEntry, Mood};
use crate::stats::{journal_summary, streak_days, JournalSummary};

use super::require_user;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptCategory {
    Gratitude,
    Growth,
    Emotions,
    Goals,
    Relationships,
}

/// A writing prompt offered when the page is blank.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReflectionPrompt {
    pub question: &'static str,
    pub category: PromptCategory,
    pub description: &'static str,
}

pub const REFLECTION_PROMPTS: &[ReflectionPrompt] = &[
    ReflectionPrompt {
        question: "What three things am I grateful for today?",
        category: PromptCategory::Gratitude,
        description: "Practice daily gratitude",
    },
    ReflectionPrompt {
        question: "What special moment did I live today?",
        category: PromptCategory::Gratitude,
        description: "Recognize the good moments",
    },
    ReflectionPrompt {
        question: "What did I learn about myself today?",
        category: PromptCategory::Growth,
        description: "Reflect on your development",
    },
    ReflectionPrompt {
        question: "What challenge did I face and how did I handle it?",
        category: PromptCategory::Growth,
        description: "Examine your resilience",
    },
    ReflectionPrompt {
        question: "How do I really feel right now?",
        category: PromptCategory::Emotions,
        description: "Connect with your emotions",
    },
    ReflectionPrompt {
        question: "What stressed me today, and why?",
        category: PromptCategory::Emotions,
        description: "Identify your stress sources",
    },
    ReflectionPrompt {
        question: "What small step can I take tomorrow toward my goals?",
        category: PromptCategory::Goals,
        description: "Plan concrete actions",
    },
    ReflectionPrompt {
        question: "Who would I like to connect with more?",
        category: PromptCategory::Relationships,
        description: "Nurture your relationships",
    },
];

/// Pick a prompt, optionally constrained to a category.
pub fn random_prompt(category: Option<PromptCategory>) -> ReflectionPrompt {
    let mut rng = rand::thread_rng();
    let pool: Vec<ReflectionPrompt> = match category {
        Some(cat) => REFLECTION_PROMPTS
            .iter()
            .filter(|p| p.category == cat)
            .copied()
            .collect(),
        None => REFLECTION_PROMPTS.to_vec(),
    };
    *pool
        .choose(&mut rng)
        .unwrap_or(&REFLECTION_PROMPTS[0])
}

pub struct JournalService {
    backend: Arc<dyn Backend>,
    clock: Arc<dyn Clock>,
    user: Option<Uuid>,
    /// Entries for the current user, newest first.
    entries: Vec<JournalEntry>,
}

impl JournalService {
    pub fn new(backend: Arc<dyn Backend>, clock: Arc<dyn Clock>, user: Option<Uuid>) -> Self {
        Self {
            backend,
            clock,
            user,
            entries: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn recent(&self) -> &[JournalEntry] {
        &self.entries[..self.entries.len().min(10)]
    }

    pub fn favorites(&self) -> Vec<&JournalEntry> {
        self.entries.iter().filter(|e| e.favorite).collect()
    }

    /// Consecutive days with at least one entry, ending today.
    pub fn streak(&self) -> u32 {
        streak_days(&self.entries, |e| e.created_at, self.clock.now().date_naive())
    }

    pub fn summary(&self) -> JournalSummary {
        journal_summary(&self.entries, self.clock.now())
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub async fn load(&mut self) -> Result<()> {
        let Some(user) = self.user else {
            return Ok(());
        };
        let mut entries = self.backend.load_journal_entries(user).await?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.entries = entries;
        Ok(())
    }

    /// Create an entry. Empty title or body is rejected before any backend
    /// call.
    pub async fn create(
        &mut self,
        title: &str,
        body: &str,
        prompt: Option<String>,
        mood: Option<Mood>,
    ) -> Result<JournalEntry> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyField { field: "title" }.into());
        }
        if body.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "body" }.into());
        }
        let user = require_user(self.user)?;
        let draft = JournalDraft {
            title: title.to_string(),
            body: body.to_string(),
            prompt,
            mood,
        };
        let entry = self
            .backend
            .create_journal_entry(user, draft, self.clock.now())
            .await?;
        self.entries.insert(0, entry.clone());
        Ok(entry)
    }

    pub async fn toggle_favorite(&mut self, id: Uuid) -> Result<JournalEntry> {
        require_user(self.user)?;
        let mut updated = self
            .entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| CoreError::Custom(format!("no journal entry with id {id}")))?;
        updated.favorite = !updated.favorite;
        updated.updated_at = self.clock.now();

        self.backend.update_journal_entry(&updated).await?;
        self.replace(updated.clone());
        Ok(updated)
    }

    pub async fn update(&mut self, mut entry: JournalEntry) -> Result<JournalEntry> {
        require_user(self.user)?;
        if entry.title.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "title" }.into());
        }
        if entry.body.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "body" }.into());
        }
        entry.updated_at = self.clock.now();
        self.backend.update_journal_entry(&entry).await?;
        self.replace(entry.clone());
        Ok(entry)
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<()> {
        require_user(self.user)?;
        self.backend.delete_journal_entry(id).await?;
        self.entries.retain(|e| e.id != id);
        Ok(())
    }

    fn replace(&mut self, entry: JournalEntry) {
        if let Some(slot) = self.entries.iter_mut().find(|e| e.id == entry.id) {
            *slot = entry;
        }
    }
}
