use std::sync::Arc;

use clap::Subcommand;

use halcyon_core::services::{EmotionService, FocusService, JournalService, TaskService};
use halcyon_core::stats::{emotion_summary, journal_summary, session_summary, task_summary};
use halcyon_core::{filter_by_range, Clock, Config, DateFilter, NoopNotifier, Period, SystemClock};

use super::CliResult;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Focus session totals
    Sessions {
        /// Period: week, month, 3months, 6months, year or all
        #[arg(long, default_value = "all")]
        period: String,
    },
    /// Mood counts and polarity shares
    Emotions {
        #[arg(long, default_value = "all")]
        period: String,
    },
    /// Task completion rate and backlog
    Tasks {
        #[arg(long, default_value = "all")]
        period: String,
    },
    /// Journal totals and streak
    Journal {
        #[arg(long, default_value = "all")]
        period: String,
    },
}

fn filter(period: &str) -> CliResult<DateFilter> {
    let period: Period = period.parse()?;
    let mut filter = DateFilter::default();
    filter.set_period(period);
    Ok(filter)
}

pub async fn run(action: StatsAction) -> CliResult {
    let session = super::session()?;
    let clock = Arc::new(SystemClock);
    let now = clock.now();

    match action {
        StatsAction::Sessions { period } => {
            let config = Config::load()?;
            let mut service = FocusService::new(
                session.backend,
                clock,
                Arc::new(NoopNotifier),
                Some(session.user),
                config.timer_settings(),
            );
            service.load().await?;
            let range = filter(&period)?.current_range(now);
            let completed =
                filter_by_range(&service.completed_sessions(), |s| s.started_at, &range);
            println!(
                "{}",
                serde_json::to_string_pretty(&session_summary(&completed, now))?
            );
        }
        StatsAction::Emotions { period } => {
            let mut service = EmotionService::new(session.backend, clock, Some(session.user));
            service.load().await?;
            let range = filter(&period)?.current_range(now);
            let entries = service.by_range(&range);
            println!(
                "{}",
                serde_json::to_string_pretty(&emotion_summary(&entries))?
            );
        }
        StatsAction::Tasks { period } => {
            let mut service = TaskService::new(session.backend, clock, Some(session.user));
            service.load().await?;
            let range = filter(&period)?.current_range(now);
            let tasks = filter_by_range(service.tasks(), |t| t.created_at, &range);
            println!("{}", serde_json::to_string_pretty(&task_summary(&tasks, now))?);
        }
        StatsAction::Journal { period } => {
            let mut service = JournalService::new(session.backend, clock, Some(session.user));
            service.load().await?;
            let range = filter(&period)?.current_range(now);
            let entries = filter_by_range(service.entries(), |e| e.created_at, &range);
            println!(
                "{}",
                serde_json::to_string_pretty(&journal_summary(&entries, now))?
            );
        }
    }
    Ok(())
}
