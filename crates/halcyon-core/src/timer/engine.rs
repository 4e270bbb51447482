//! Focus timer state machine.
//!
//! The timer is a caller-ticked state machine: it owns mode, remaining
//! seconds, and the running flag, but no thread or interval of its own.
//! Whoever drives it (the CLI loop, a GUI task) calls `tick()` once per
//! second while it is running; [`FocusService`](crate::services::FocusService)
//! wires completion to persistence, mode auto-switching, and notification.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Running -> (Idle | Completed)
//! ```
//!
//! Completion is transient: the service immediately switches mode, which
//! lands the machine back in Idle for the next mode.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::events::TimerEvent;

use super::settings::TimerSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerMode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Focus => "Focus",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, TimerMode::Focus)
    }
}

/// Core countdown state machine.
///
/// Invariant: `remaining_secs` stays within `[0, duration(mode) * 60]`.
/// The active-session id is a weak reference to the persisted record the
/// service created for the countdown in progress; only focus mode carries
/// one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    settings: TimerSettings,
    mode: TimerMode,
    remaining_secs: u32,
    running: bool,
    #[serde(default)]
    active_session: Option<Uuid>,
}

impl FocusTimer {
    /// Idle, focus mode, full focus duration on the clock.
    pub fn new(settings: TimerSettings) -> Self {
        let remaining_secs = settings.duration_secs(TimerMode::Focus);
        Self {
            settings,
            mode: TimerMode::Focus,
            remaining_secs,
            running: false,
            active_session: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn active_session(&self) -> Option<Uuid> {
        self.active_session
    }

    /// Whether starting now requires a new persisted session.
    pub fn needs_session(&self) -> bool {
        !self.running && self.mode == TimerMode::Focus && self.active_session.is_none()
    }

    pub fn total_secs(&self) -> u32 {
        self.settings.duration_secs(self.mode)
    }

    /// 0.0 .. 100.0 progress within the current countdown.
    pub fn progress_pct(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        f64::from(total - self.remaining_secs) / f64::from(total) * 100.0
    }

    /// `MM:SS` rendering of the remaining time.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> TimerEvent {
        TimerEvent::StateSnapshot {
            mode: self.mode,
            running: self.running,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or resume) the countdown. No-op while already running.
    ///
    /// Resuming after `pause()` keeps the exact remaining value.
    pub fn start(&mut self) -> Option<TimerEvent> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(TimerEvent::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Link the countdown to a persisted session record.
    pub fn attach_session(&mut self, id: Uuid) {
        self.active_session = Some(id);
    }

    /// One serialized 1-second step. Only meaningful while running.
    ///
    /// Returns `TimerCompleted` on the tick that finds the countdown at
    /// zero; the caller is expected to finish and switch mode in response.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            None
        } else {
            Some(TimerEvent::TimerCompleted {
                mode: self.mode,
                at: Utc::now(),
            })
        }
    }

    /// Stop ticking without resetting remaining time.
    pub fn pause(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(TimerEvent::TimerPaused {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop ticking, restore the full duration for the current mode, and
    /// drop the session linkage. The persisted record, if one was created,
    /// is left uncompleted.
    pub fn reset(&mut self) -> TimerEvent {
        self.running = false;
        self.remaining_secs = self.total_secs();
        self.active_session = None;
        TimerEvent::TimerReset {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Stop ticking and detach the session that just finished, if the
    /// completed countdown was a focus one.
    pub fn finish(&mut self) -> Option<Uuid> {
        self.running = false;
        match self.mode {
            TimerMode::Focus => self.active_session.take(),
            _ => None,
        }
    }

    /// Pick the next mode after a completion.
    ///
    /// `completed_focus` is the completed-focus-session count read after the
    /// just-finished session was persisted, so it includes that session on
    /// success. Every fourth completed focus earns a long break.
    pub fn auto_switch(&mut self, completed_focus: u64) -> TimerEvent {
        let next = if self.mode == TimerMode::Focus {
            if completed_focus > 0 && completed_focus % 4 == 0 {
                TimerMode::LongBreak
            } else {
                TimerMode::ShortBreak
            }
        } else {
            TimerMode::Focus
        };
        self.switch_mode(next)
    }

    /// Pause, change mode, and reset remaining time for the new mode.
    pub fn switch_mode(&mut self, mode: TimerMode) -> TimerEvent {
        let from = self.mode;
        self.running = false;
        self.mode = mode;
        self.reset();
        TimerEvent::ModeSwitched {
            from,
            to: mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    // ── Duration setters ─────────────────────────────────────────────
    //
    // A valid update to the currently active mode recomputes the remaining
    // time: an idle countdown restarts at the new full duration (dropping
    // any session linkage, as reset does), a running one is clamped so it
    // never exceeds the new total.

    pub fn set_focus_duration(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.settings.set_focus(minutes)?;
        self.recompute_remaining(TimerMode::Focus);
        Ok(())
    }

    pub fn set_short_break_duration(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.settings.set_short_break(minutes)?;
        self.recompute_remaining(TimerMode::ShortBreak);
        Ok(())
    }

    pub fn set_long_break_duration(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.settings.set_long_break(minutes)?;
        self.recompute_remaining(TimerMode::LongBreak);
        Ok(())
    }

    fn recompute_remaining(&mut self, changed: TimerMode) {
        if self.mode != changed {
            return;
        }
        if self.running {
            self.remaining_secs = self.remaining_secs.min(self.total_secs());
        } else {
            self.remaining_secs = self.total_secs();
            self.active_session = None;
        }
    }
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}
