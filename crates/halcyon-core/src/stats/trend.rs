//! Mood trend classification over the most recent entries.

use serde::{Deserialize, Serialize};

use crate::model::EmotionEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

/// Classify the mood direction from entries ordered newest first.
///
/// Averages the scores of the three most recent entries against the three
/// preceding ones; a delta above +0.5 is improving, below -0.5 declining.
/// Fewer than three entries is stable by definition, not an error. When the
/// older window is short, its sum is still divided by three, matching how
/// the dashboard has always weighed sparse history.
pub fn mood_trend(recent: &[EmotionEntry]) -> Trend {
    let window = &recent[..recent.len().min(7)];
    if window.len() < 3 {
        return Trend::Stable;
    }

    let avg_of = |entries: &[EmotionEntry]| -> f64 {
        entries.iter().map(|e| f64::from(e.mood.score())).sum::<f64>() / 3.0
    };

    let recent_avg = avg_of(&window[..3]);
    let older_avg = avg_of(&window[3..window.len().min(6)]);
    let delta = recent_avg - older_avg;

    if delta > 0.5 {
        Trend::Improving
    } else if delta < -0.5 {
        Trend::Declining
    } else {
        Trend::Stable
    }
}
