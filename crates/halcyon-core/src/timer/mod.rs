mod engine;
mod settings;

pub use engine::{FocusTimer, TimerMode};
pub use settings::{TimerSettings, FOCUS_BOUNDS, LONG_BREAK_BOUNDS, SHORT_BREAK_BOUNDS};
