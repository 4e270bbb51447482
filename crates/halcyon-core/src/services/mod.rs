//! Per-domain services.
//!
//! One explicit service per record kind, constructed with the backend, the
//! clock, and the signed-in user id; no ambient global lookup. Each service
//! keeps a local collection that is updated only after a confirmed backend
//! success (the timer-completion path in [`FocusService`] is the documented
//! exception).

mod emotions;
mod focus;
mod journal;
mod tasks;

pub use emotions::EmotionService;
pub use focus::FocusService;
pub use journal::{random_prompt, JournalService, PromptCategory, ReflectionPrompt, REFLECTION_PROMPTS};
pub use tasks::TaskService;

use uuid::Uuid;

use crate::error::{CoreError, Result};

/// Mutations require a signed-in user; loads without one are no-ops.
pub(crate) fn require_user(user: Option<Uuid>) -> Result<Uuid> {
    user.ok_or(CoreError::NotAuthenticated)
}
