//! # Halcyon Core Library
//!
//! This library provides the core business logic for the Halcyon wellness
//! tracker. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI shell being a thin
//! layer over the same core library.
//!
//! ## Architecture
//!
//! - **Focus Timer**: A caller-ticked state machine; the host invokes
//!   `tick()` once per second and reacts to the events it returns
//! - **Stats**: Pure aggregation over in-memory records (streaks, mood
//!   distribution and trend, session/task/journal summaries)
//! - **Backend**: An async trait with an in-memory implementation for tests
//!   and a PostgREST-style HTTP implementation for the hosted service
//! - **Services**: Stateful orchestrators that tie the timer, the backend
//!   and the clock together per domain (focus, emotions, tasks, journal)
//!
//! ## Key Components
//!
//! - [`FocusTimer`]: Core timer state machine
//! - [`Backend`]: Persistence seam with [`MemoryBackend`] and [`RestBackend`]
//! - [`Config`]: Application configuration management
//! - [`DateFilter`]: Reusable period selection for history views

pub mod backend;
pub mod clock;
pub mod config;
pub mod daterange;
pub mod error;
pub mod events;
pub mod model;
pub mod notify;
pub mod services;
pub mod stats;
pub mod timer;

pub use backend::{Backend, MemoryBackend, RestBackend};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use daterange::{filter_by_range, DateFilter, DateRange, Period};
pub use error::{BackendError, ConfigError, CoreError, ValidationError};
pub use events::TimerEvent;
pub use model::{EmotionEntry, FocusSession, JournalEntry, Mood, Priority, TaskCategory, TaskItem};
pub use notify::{NoopNotifier, Notifier};
pub use services::{EmotionService, FocusService, JournalService, TaskService};
pub use stats::{mood_trend, streak_days, Trend};
pub use timer::{FocusTimer, TimerMode, TimerSettings};
