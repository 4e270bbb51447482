use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "halcyon", version, about = "Halcyon wellness CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Focus timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Emotion logging
    Emotion {
        #[command(subcommand)]
        action: commands::emotion::EmotionAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Journal entries and reflection prompts
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Summaries and streaks
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Backend credentials
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action).await,
        Commands::Emotion { action } => commands::emotion::run(action).await,
        Commands::Task { action } => commands::task::run(action).await,
        Commands::Journal { action } => commands::journal::run(action).await,
        Commands::Stats { action } => commands::stats::run(action).await,
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
