use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerMode;

/// Every timer state change produces an event. The view layer (and the CLI)
/// render these; nothing in the core depends on anyone consuming them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TimerEvent {
    TimerStarted {
        mode: TimerMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero for the current mode.
    TimerCompleted {
        mode: TimerMode,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        from: TimerMode,
        to: TimerMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        running: bool,
        remaining_secs: u32,
        total_secs: u32,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}
