use std::sync::Arc;

use clap::Subcommand;
use tokio::time::{interval, Duration};

use halcyon_core::config::data_dir;
use halcyon_core::services::FocusService;
use halcyon_core::{
    Config, FocusTimer, MemoryBackend, NoopNotifier, Notifier, SystemClock, TimerEvent, TimerMode,
};

use super::CliResult;

const STATE_FILE: &str = "timer.json";

/// Notifier for interactive terminal sessions: BEL plus a line on stderr.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn permitted(&self) -> bool {
        true
    }

    fn request_permission(&self) -> bool {
        true
    }

    fn notify(&self, title: &str, body: &str) -> Result<(), Box<dyn std::error::Error>> {
        eprintln!("\x07{title}: {body}");
        Ok(())
    }
}

/// The `notifications.enabled` config knob picks the notifier.
fn notifier_from(config: &Config) -> Arc<dyn Notifier> {
    if config.notifications.enabled {
        Arc::new(TerminalNotifier)
    } else {
        Arc::new(NoopNotifier)
    }
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown, keeping the remaining time
    Pause,
    /// Restore the full duration for the current mode
    Reset,
    /// Tick once and print the current state as JSON
    Status,
    /// Switch mode: focus, short or long
    Switch {
        mode: String,
    },
    /// Run the countdown live, one tick per second, until completion
    Run,
    /// Change a duration, in minutes
    Set {
        /// Which duration: focus, short or long
        mode: String,
        minutes: u32,
    },
}

fn parse_mode(s: &str) -> CliResult<TimerMode> {
    match s.to_ascii_lowercase().as_str() {
        "focus" => Ok(TimerMode::Focus),
        "short" | "short-break" => Ok(TimerMode::ShortBreak),
        "long" | "long-break" => Ok(TimerMode::LongBreak),
        other => Err(format!("unknown mode '{other}' (expected focus, short or long)").into()),
    }
}

fn load_timer(config: &Config) -> FocusTimer {
    if let Ok(dir) = data_dir() {
        if let Ok(json) = std::fs::read_to_string(dir.join(STATE_FILE)) {
            if let Ok(timer) = serde_json::from_str::<FocusTimer>(&json) {
                return timer;
            }
        }
    }
    FocusTimer::new(config.timer_settings())
}

fn save_timer(timer: &FocusTimer) -> CliResult {
    let json = serde_json::to_string(timer)?;
    std::fs::write(data_dir()?.join(STATE_FILE), json)?;
    Ok(())
}

fn print_event(event: &TimerEvent) -> CliResult {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub async fn run(action: TimerAction) -> CliResult {
    let config = Config::load()?;

    if let TimerAction::Run = action {
        return run_live(&config).await;
    }

    let mut timer = load_timer(&config);

    match action {
        TimerAction::Start => match timer.start() {
            Some(event) => print_event(&event)?,
            None => print_event(&timer.snapshot())?,
        },
        TimerAction::Pause => match timer.pause() {
            Some(event) => print_event(&event)?,
            None => print_event(&timer.snapshot())?,
        },
        TimerAction::Reset => {
            let event = timer.reset();
            print_event(&event)?;
        }
        TimerAction::Status => {
            if let Some(event) = timer.tick() {
                print_event(&event)?;
            }
            print_event(&timer.snapshot())?;
        }
        TimerAction::Switch { mode } => {
            let event = timer.switch_mode(parse_mode(&mode)?);
            print_event(&event)?;
        }
        TimerAction::Set { mode, minutes } => {
            match parse_mode(&mode)? {
                TimerMode::Focus => timer.set_focus_duration(minutes)?,
                TimerMode::ShortBreak => timer.set_short_break_duration(minutes)?,
                TimerMode::LongBreak => timer.set_long_break_duration(minutes)?,
            }
            print_event(&timer.snapshot())?;
        }
        TimerAction::Run => unreachable!(),
    }

    save_timer(&timer)?;
    Ok(())
}

/// Drive a full countdown in the foreground. Uses the hosted backend when
/// signed in; otherwise the countdown runs without persistence.
async fn run_live(config: &Config) -> CliResult {
    let notifier = notifier_from(config);
    let mut service = match super::session() {
        Ok(s) => FocusService::new(
            s.backend,
            Arc::new(SystemClock),
            notifier,
            Some(s.user),
            config.timer_settings(),
        ),
        Err(_) => {
            eprintln!("not signed in; this session will not be recorded");
            FocusService::new(
                Arc::new(MemoryBackend::new()),
                Arc::new(SystemClock),
                notifier,
                None,
                config.timer_settings(),
            )
        }
    };
    service.load().await?;

    service.start().await;
    println!("{} started ({})", service.timer().mode().label(), service.timer().display());

    let mut ticker = interval(Duration::from_secs(1));
    loop {
        ticker.tick().await;
        match service.tick().await {
            Some(TimerEvent::ModeSwitched { from, to, .. }) => {
                println!("\n{} completed, next up: {}", from.label(), to.label());
                break;
            }
            _ => {
                print!("\r{}  {}", service.timer().mode().label(), service.timer().display());
                use std::io::Write;
                std::io::stdout().flush()?;
            }
        }
    }
    Ok(())
}
