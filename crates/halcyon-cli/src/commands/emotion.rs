use std::sync::Arc;

use clap::Subcommand;
use uuid::Uuid;

use halcyon_core::daterange::range_for;
use halcyon_core::services::EmotionService;
use halcyon_core::{Clock, Mood, Period, SystemClock};

use super::CliResult;

#[derive(Subcommand)]
pub enum EmotionAction {
    /// Log how you feel right now
    Log {
        /// Mood: happy, calm, excited, tired, anxious, sad or angry
        mood: String,
        /// Intensity on the 1-5 scale
        #[arg(long, default_value = "3")]
        intensity: u8,
        /// Free-form note
        #[arg(long)]
        note: Option<String>,
        /// Tags, repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List logged emotions as JSON
    List {
        /// Period: week, month, 3months, 6months, year or all
        #[arg(long, default_value = "month")]
        period: String,
    },
    /// Remove an entry by id
    Delete { id: Uuid },
    /// Mood trend over the last entries
    Trend,
}

pub async fn run(action: EmotionAction) -> CliResult {
    let session = super::session()?;
    let clock = Arc::new(SystemClock);
    let mut service = EmotionService::new(session.backend, clock.clone(), Some(session.user));
    service.load().await?;

    match action {
        EmotionAction::Log {
            mood,
            intensity,
            note,
            tags,
        } => {
            let mood: Mood = mood.parse()?;
            let entry = service.log(mood, intensity, note, tags).await?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        EmotionAction::List { period } => {
            let period: Period = period.parse()?;
            let range = range_for(period, clock.now(), None);
            let entries = service.by_range(&range);
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        EmotionAction::Delete { id } => {
            service.delete(id).await?;
            println!("deleted {id}");
        }
        EmotionAction::Trend => {
            println!("{:?}", service.trend());
        }
    }
    Ok(())
}
