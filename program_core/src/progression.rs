//! Week-over-week progressive overload.
//!
//! Independent of performance feedback: on even weeks after the first,
//! every exercise gains one rep.

use crate::Workout;

/// Most reps a single progression step may add
const MAX_REP_STEP: u32 = 3;

/// Apply the week's progression nudge to every exercise
///
/// Week 1 and odd weeks are returned unchanged.
pub fn apply_progression(mut workouts: Vec<Workout>, week: u32) -> Vec<Workout> {
    if week <= 1 || week % 2 != 0 {
        tracing::debug!("Week {}: no progression step", week);
        return workouts;
    }

    for workout in &mut workouts {
        for exercise in &mut workout.exercises {
            exercise.reps = exercise
                .reps
                .saturating_add(1)
                .min(exercise.reps.saturating_add(MAX_REP_STEP));
        }
    }

    tracing::debug!("Week {}: added one rep to every exercise", week);
    workouts
}
