//! Intensity adjustment, difficulty tiers and duration estimates.
//!
//! Two passes run over every exercise of a generated week:
//! - Goal pass: fixed rep/rest changes per fitness goal
//! - Performance pass: scaled by the recommended adjustment, skipped when
//!   there is no recent history

use crate::{DifficultyTier, Exercise, FitnessGoal, PerformanceAnalysis, Workout};

/// Rest bounds every exercise is kept within
pub const MIN_REST_SECONDS: u32 = 30;
pub const MAX_REST_SECONDS: u32 = 120;

/// Ceiling on sets after a positive performance adjustment
pub const MAX_SETS: u32 = 6;

/// Seconds assumed per working set
const SECONDS_PER_SET: u32 = 45;

/// Fixed warm-up allowance in minutes
const WARM_UP_MINUTES: u32 = 5;

/// Estimated session length: `floor(Σ sets·(45 + rest) / 60) + 5`
pub fn duration_minutes(exercises: &[Exercise]) -> u32 {
    let seconds: u32 = exercises
        .iter()
        .map(|e| e.sets * (SECONDS_PER_SET + e.rest_seconds))
        .sum();
    seconds / 60 + WARM_UP_MINUTES
}

/// Difficulty tier for a week, nudged at most one step by performance
///
/// Weeks 1-2 are beginner, 3-5 intermediate, 6+ advanced. With three or
/// more recent sessions, easy and complete work steps up; hard or
/// incomplete work steps down.
pub fn difficulty_tier(week: u32, analysis: &PerformanceAnalysis) -> DifficultyTier {
    let base = match week {
        0..=2 => DifficultyTier::Beginner,
        3..=5 => DifficultyTier::Intermediate,
        _ => DifficultyTier::Advanced,
    };

    if analysis.session_count < 3 {
        return base;
    }

    if analysis.average_difficulty < 1.5 && analysis.completion_rate > 0.9 {
        base.step_up()
    } else if analysis.average_difficulty > 2.5 || analysis.completion_rate < 0.6 {
        base.step_down()
    } else {
        base
    }
}

/// Apply the fixed per-goal changes to one exercise
pub fn adjust_for_goal(exercise: &Exercise, goal: FitnessGoal) -> Exercise {
    let mut adjusted = exercise.clone();
    match goal {
        FitnessGoal::WeightLoss => {
            adjusted.reps = (exercise.reps + 5).min(20);
            adjusted.rest_seconds = exercise.rest_seconds.saturating_sub(15).max(30);
        }
        FitnessGoal::Recomposition => {
            adjusted.reps = (exercise.reps + 2).min(15);
            adjusted.rest_seconds = exercise.rest_seconds.saturating_sub(10).max(45);
        }
        FitnessGoal::MuscleGain | FitnessGoal::Maintenance => {}
    }
    adjusted
}

/// Scale one exercise by the recommended adjustment `a`
pub fn adjust_for_performance(exercise: &Exercise, a: f64) -> Exercise {
    let mut adjusted = exercise.clone();
    let reps = exercise.reps as i64;
    let delta = (exercise.reps as f64 * a).round() as i64;

    if a > 0.0 {
        if a > 0.1 {
            adjusted.sets = (exercise.sets + 1).min(MAX_SETS);
        }
        adjusted.reps = (reps + delta).min(reps + 5) as u32;
        adjusted.rest_seconds = exercise.rest_seconds.saturating_sub(10).max(MIN_REST_SECONDS);
    } else if a < 0.0 {
        adjusted.reps = (reps + delta).max(reps - 3).max(1) as u32;
        adjusted.rest_seconds = (exercise.rest_seconds + 15).min(MAX_REST_SECONDS);
    }
    adjusted
}

/// Goal pass then performance pass over every exercise of every workout
pub fn apply(
    workouts: Vec<Workout>,
    goal: FitnessGoal,
    analysis: &PerformanceAnalysis,
) -> Vec<Workout> {
    let a = analysis.recommended_intensity_adjustment;
    let performance_pass = analysis.session_count > 0;

    if !performance_pass {
        tracing::debug!("No session history, skipping performance adjustment");
    }

    workouts
        .into_iter()
        .map(|mut workout| {
            workout.exercises = workout
                .exercises
                .iter()
                .map(|e| adjust_for_goal(e, goal))
                .map(|e| {
                    if performance_pass {
                        adjust_for_performance(&e, a)
                    } else {
                        e
                    }
                })
                .collect();
            workout.recompute_duration();
            workout
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Equipment, ExerciseKind, MuscleGroup};

    fn exercise(sets: u32, reps: u32, rest: u32) -> Exercise {
        Exercise {
            name: "goblet_squat".into(),
            muscle_groups: vec![MuscleGroup::Legs],
            equipment: Equipment::Dumbbells,
            kind: ExerciseKind::Compound,
            sets,
            reps,
            tempo: None,
            rest_seconds: rest,
            notes: None,
        }
    }

    fn analysis(session_count: usize, difficulty: f64, completion: f64) -> PerformanceAnalysis {
        PerformanceAnalysis {
            average_difficulty: difficulty,
            completion_rate: completion,
            session_count,
            ..PerformanceAnalysis::baseline()
        }
    }

    #[test]
    fn test_duration_formula() {
        // 4*(45+90) + 3*(45+60) = 540 + 315 = 855s -> 14 min + 5
        let exercises = vec![exercise(4, 10, 90), exercise(3, 12, 60)];
        assert_eq!(duration_minutes(&exercises), 19);
        assert_eq!(duration_minutes(&[]), 5);
    }

    #[test]
    fn test_weight_loss_goal() {
        let e = adjust_for_goal(&exercise(3, 12, 60), FitnessGoal::WeightLoss);
        assert_eq!(e.reps, 17);
        assert_eq!(e.rest_seconds, 45);

        let capped = adjust_for_goal(&exercise(3, 18, 40), FitnessGoal::WeightLoss);
        assert_eq!(capped.reps, 20);
        assert_eq!(capped.rest_seconds, 30);
    }

    #[test]
    fn test_recomposition_goal() {
        let e = adjust_for_goal(&exercise(3, 10, 90), FitnessGoal::Recomposition);
        assert_eq!(e.reps, 12);
        assert_eq!(e.rest_seconds, 80);

        let floored = adjust_for_goal(&exercise(3, 15, 45), FitnessGoal::Recomposition);
        assert_eq!(floored.reps, 15);
        assert_eq!(floored.rest_seconds, 45);
    }

    #[test]
    fn test_muscle_gain_and_maintenance_unchanged() {
        let base = exercise(4, 10, 90);
        assert_eq!(adjust_for_goal(&base, FitnessGoal::MuscleGain), base);
        assert_eq!(adjust_for_goal(&base, FitnessGoal::Maintenance), base);
    }

    #[test]
    fn test_large_positive_adjustment_adds_set() {
        let e = adjust_for_performance(&exercise(4, 10, 90), 0.2);
        assert_eq!(e.sets, 5);
        assert_eq!(e.reps, 12);
        assert_eq!(e.rest_seconds, 80);

        let capped = adjust_for_performance(&exercise(6, 10, 35), 0.2);
        assert_eq!(capped.sets, 6);
        assert_eq!(capped.rest_seconds, 30);
    }

    #[test]
    fn test_small_positive_adjustment_keeps_sets() {
        let e = adjust_for_performance(&exercise(3, 10, 60), 0.05);
        assert_eq!(e.sets, 3);
        // round(0.5) rounds away from zero
        assert_eq!(e.reps, 11);
        assert_eq!(e.rest_seconds, 50);
    }

    #[test]
    fn test_negative_adjustment() {
        let e = adjust_for_performance(&exercise(3, 20, 110), -0.2);
        assert_eq!(e.sets, 3);
        // -4 limited to -3
        assert_eq!(e.reps, 17);
        assert_eq!(e.rest_seconds, 120);

        let small = adjust_for_performance(&exercise(3, 2, 60), -0.2);
        assert_eq!(small.reps, 2);
    }

    #[test]
    fn test_base_tiers() {
        let none = PerformanceAnalysis::baseline();
        assert_eq!(difficulty_tier(1, &none), DifficultyTier::Beginner);
        assert_eq!(difficulty_tier(2, &none), DifficultyTier::Beginner);
        assert_eq!(difficulty_tier(3, &none), DifficultyTier::Intermediate);
        assert_eq!(difficulty_tier(5, &none), DifficultyTier::Intermediate);
        assert_eq!(difficulty_tier(6, &none), DifficultyTier::Advanced);
    }

    #[test]
    fn test_tier_ignores_thin_history() {
        // Easy and complete, but only two sessions
        assert_eq!(difficulty_tier(1, &analysis(2, 1.0, 1.0)), DifficultyTier::Beginner);
    }

    #[test]
    fn test_tier_moves_one_step() {
        assert_eq!(difficulty_tier(1, &analysis(3, 1.2, 0.95)), DifficultyTier::Intermediate);
        assert_eq!(difficulty_tier(6, &analysis(3, 1.2, 0.95)), DifficultyTier::Advanced);
        assert_eq!(difficulty_tier(6, &analysis(4, 2.8, 1.0)), DifficultyTier::Intermediate);
        assert_eq!(difficulty_tier(4, &analysis(4, 2.0, 0.5)), DifficultyTier::Beginner);
        assert_eq!(difficulty_tier(1, &analysis(4, 3.0, 0.5)), DifficultyTier::Beginner);
    }

    #[test]
    fn test_tier_monotonic_in_week() {
        let input = analysis(5, 2.0, 0.8);
        let tiers: Vec<_> = (1..=10).map(|w| difficulty_tier(w, &input)).collect();
        assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    }
}
