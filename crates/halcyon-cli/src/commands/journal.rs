use std::sync::Arc;

use clap::Subcommand;
use uuid::Uuid;

use halcyon_core::services::{random_prompt, JournalService, PromptCategory};
use halcyon_core::{Mood, SystemClock};

use super::CliResult;

#[derive(Subcommand)]
pub enum JournalAction {
    /// Write an entry
    Create {
        title: String,
        body: String,
        /// Mood at time of writing
        #[arg(long)]
        mood: Option<String>,
        /// The reflection prompt this entry answers
        #[arg(long)]
        prompt: Option<String>,
    },
    /// List entries as JSON, newest first
    List {
        /// Only favorites
        #[arg(long)]
        favorites: bool,
    },
    /// Toggle an entry's favorite flag
    Favorite { id: Uuid },
    /// Remove an entry
    Delete { id: Uuid },
    /// Print a reflection prompt
    Prompt {
        /// Category: gratitude, growth, emotions, goals or relationships
        #[arg(long)]
        category: Option<String>,
    },
}

fn parse_category(s: &str) -> CliResult<PromptCategory> {
    match s.to_ascii_lowercase().as_str() {
        "gratitude" => Ok(PromptCategory::Gratitude),
        "growth" => Ok(PromptCategory::Growth),
        "emotions" => Ok(PromptCategory::Emotions),
        "goals" => Ok(PromptCategory::Goals),
        "relationships" => Ok(PromptCategory::Relationships),
        other => Err(format!("unknown prompt category '{other}'").into()),
    }
}

pub async fn run(action: JournalAction) -> CliResult {
    // Prompts need no backend.
    if let JournalAction::Prompt { category } = &action {
        let category = category.as_deref().map(parse_category).transpose()?;
        let prompt = random_prompt(category);
        println!("{}", prompt.question);
        println!("  ({})", prompt.description);
        return Ok(());
    }

    let session = super::session()?;
    let mut service =
        JournalService::new(session.backend, Arc::new(SystemClock), Some(session.user));
    service.load().await?;

    match action {
        JournalAction::Create {
            title,
            body,
            mood,
            prompt,
        } => {
            let mood = mood.as_deref().map(str::parse::<Mood>).transpose()?;
            let entry = service.create(&title, &body, prompt, mood).await?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        JournalAction::List { favorites } => {
            if favorites {
                println!("{}", serde_json::to_string_pretty(&service.favorites())?);
            } else {
                println!("{}", serde_json::to_string_pretty(&service.entries())?);
            }
        }
        JournalAction::Favorite { id } => {
            let entry = service.toggle_favorite(id).await?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        JournalAction::Delete { id } => {
            service.delete(id).await?;
            println!("deleted {id}");
        }
        JournalAction::Prompt { .. } => unreachable!(),
    }
    Ok(())
}
