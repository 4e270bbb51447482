use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::TimerMode;

/// Focus and long-break durations are valid in `[1, 60]` minutes.
pub const FOCUS_BOUNDS: (u32, u32) = (1, 60);
pub const LONG_BREAK_BOUNDS: (u32, u32) = (1, 60);
/// Short breaks are capped lower, `[1, 30]` minutes.
pub const SHORT_BREAK_BOUNDS: (u32, u32) = (1, 30);

/// Per-mode countdown durations, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub focus_min: u32,
    pub short_break_min: u32,
    pub long_break_min: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_min: 25,
            short_break_min: 5,
            long_break_min: 15,
        }
    }
}

impl TimerSettings {
    pub fn duration_min(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Focus => self.focus_min,
            TimerMode::ShortBreak => self.short_break_min,
            TimerMode::LongBreak => self.long_break_min,
        }
    }

    pub fn duration_secs(&self, mode: TimerMode) -> u32 {
        self.duration_min(mode).saturating_mul(60)
    }

    /// Out-of-range values are rejected and leave the settings untouched.
    pub fn set_focus(&mut self, minutes: u32) -> Result<(), ValidationError> {
        check_bounds("focus", FOCUS_BOUNDS, minutes)?;
        self.focus_min = minutes;
        Ok(())
    }

    pub fn set_short_break(&mut self, minutes: u32) -> Result<(), ValidationError> {
        check_bounds("short break", SHORT_BREAK_BOUNDS, minutes)?;
        self.short_break_min = minutes;
        Ok(())
    }

    pub fn set_long_break(&mut self, minutes: u32) -> Result<(), ValidationError> {
        check_bounds("long break", LONG_BREAK_BOUNDS, minutes)?;
        self.long_break_min = minutes;
        Ok(())
    }
}

fn check_bounds(
    mode: &'static str,
    (min, max): (u32, u32),
    value: u32,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::DurationOutOfRange {
            mode,
            min,
            max,
            value,
        });
    }
    Ok(())
}
