use std::sync::Arc;

use clap::Subcommand;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use halcyon_core::services::TaskService;
use halcyon_core::{Priority, SystemClock, TaskCategory};

use super::CliResult;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task
    Create {
        title: String,
        /// Priority: low, medium or high
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Category: personal, work, study, health, social or other
        #[arg(long, default_value = "other")]
        category: String,
        /// Due date, RFC 3339
        #[arg(long)]
        due: Option<DateTime<Utc>>,
        /// Longer description
        #[arg(long)]
        description: Option<String>,
    },
    /// List tasks as JSON, priority first
    List {
        /// Only unfinished tasks
        #[arg(long)]
        pending: bool,
        /// Only tasks past their due date
        #[arg(long)]
        overdue: bool,
    },
    /// Mark a task done
    Complete { id: Uuid },
    /// Remove a task
    Delete { id: Uuid },
}

pub async fn run(action: TaskAction) -> CliResult {
    let session = super::session()?;
    let mut service = TaskService::new(session.backend, Arc::new(SystemClock), Some(session.user));
    service.load().await?;

    match action {
        TaskAction::Create {
            title,
            priority,
            category,
            due,
            description,
        } => {
            let priority: Priority = priority.parse()?;
            let category: TaskCategory = category.parse()?;
            let task = service
                .create(&title, description, priority, category, due)
                .await?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { pending, overdue } => {
            let tasks = if overdue {
                service.overdue().into_iter().cloned().collect()
            } else if pending {
                service.pending().into_iter().cloned().collect()
            } else {
                service.sorted()
            };
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Complete { id } => {
            let task = service.complete(id).await?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Delete { id } => {
            service.delete(id).await?;
            println!("deleted {id}");
        }
    }
    Ok(())
}
