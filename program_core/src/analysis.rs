//! Performance analysis over recent session logs.
//!
//! Reduces a lookback window of logs into a `PerformanceAnalysis`:
//! average rating, average difficulty, completion rate, consistency and a
//! recommended intensity adjustment in [-0.2, 0.2].

use crate::{PerformanceAnalysis, SessionLog};
use chrono::{DateTime, Duration, Utc};

/// Bound on the recommended intensity adjustment, in both directions
pub const MAX_ADJUSTMENT: f64 = 0.2;

/// Longest supported lookback window
pub const MAX_WINDOW_WEEKS: u32 = 52;

/// Sessions per week that count as fully consistent
const TARGET_SESSIONS_PER_WEEK: f64 = 4.0;

/// Stateless analyzer configured with a lookback window
#[derive(Clone, Copy, Debug)]
pub struct PerformanceAnalyzer {
    window_weeks: u32,
}

impl Default for PerformanceAnalyzer {
    fn default() -> Self {
        Self { window_weeks: 2 }
    }
}

impl PerformanceAnalyzer {
    pub fn new(window_weeks: u32) -> Self {
        Self {
            window_weeks: window_weeks.clamp(1, MAX_WINDOW_WEEKS),
        }
    }

    pub fn window_weeks(&self) -> u32 {
        self.window_weeks
    }

    /// Analyze logs dated within the window ending at `now`
    pub fn analyze(&self, logs: &[SessionLog], now: DateTime<Utc>) -> PerformanceAnalysis {
        let cutoff = now - Duration::weeks(i64::from(self.window_weeks));
        let recent: Vec<&SessionLog> = logs.iter().filter(|l| l.date >= cutoff).collect();

        if recent.is_empty() {
            tracing::debug!(
                "No sessions in the last {} weeks, using baseline performance",
                self.window_weeks
            );
            return PerformanceAnalysis::baseline();
        }

        let ratings: Vec<f64> = recent
            .iter()
            .filter_map(|l| l.rating)
            .map(f64::from)
            .collect();
        let average_rating = mean(&ratings).unwrap_or(3.5);

        let difficulties: Vec<f64> = recent
            .iter()
            .filter_map(|l| l.difficulty_feedback)
            .map(|d| d.score())
            .collect();
        let average_difficulty = mean(&difficulties).unwrap_or(2.0);

        let total_records: usize = recent.iter().map(|l| l.exercises.len()).sum();
        let completed_records: usize = recent
            .iter()
            .flat_map(|l| l.exercises.iter())
            .filter(|r| r.any_completed())
            .count();
        let completion_rate = if total_records == 0 {
            1.0
        } else {
            completed_records as f64 / total_records as f64
        };

        let sessions_per_week = recent.len() as f64 / f64::from(self.window_weeks);
        let consistency_score = (sessions_per_week / TARGET_SESSIONS_PER_WEEK).min(1.0);

        let recommended_intensity_adjustment =
            recommended_adjustment(average_difficulty, average_rating, completion_rate);

        tracing::info!(
            "Analyzed {} sessions: difficulty {:.2}, rating {:.2}, completion {:.2}, adjustment {:+.2}",
            recent.len(),
            average_difficulty,
            average_rating,
            completion_rate,
            recommended_intensity_adjustment
        );

        PerformanceAnalysis {
            average_rating,
            average_difficulty,
            completion_rate,
            consistency_score,
            recommended_intensity_adjustment,
            session_count: recent.len(),
        }
    }
}

/// Intensity adjustment from averaged feedback
///
/// Contributions are summed in a fixed order (difficulty, rating,
/// completion) and the total is clamped to `[-MAX_ADJUSTMENT, MAX_ADJUSTMENT]`.
pub fn recommended_adjustment(
    average_difficulty: f64,
    average_rating: f64,
    completion_rate: f64,
) -> f64 {
    let mut adjustment: f64 = 0.0;

    if average_difficulty < 1.5 {
        adjustment += 0.15;
    } else if average_difficulty > 2.5 {
        adjustment -= 0.15;
    }

    if average_rating >= 4.5 {
        adjustment += 0.05;
    } else if average_rating < 2.5 {
        adjustment -= 0.10;
    }

    if completion_rate < 0.7 {
        adjustment -= 0.10;
    } else if completion_rate >= 0.95 {
        adjustment += 0.05;
    }

    adjustment.clamp(-MAX_ADJUSTMENT, MAX_ADJUSTMENT)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
