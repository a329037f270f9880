//! Challenge workout injection.
//!
//! The last workout of each week becomes a harder variant: one more set
//! (capped at 5), three more reps, shorter rest and an equipment-specific
//! finisher at the end.

use crate::catalog::ExerciseCatalog;
use crate::{DifficultyTier, Equipment, Workout, CHALLENGE_TITLE};

/// Upgrade the chronologically last workout of the week
///
/// An empty week is returned unchanged.
pub fn inject_challenge(
    mut workouts: Vec<Workout>,
    equipment: Equipment,
    catalog: &ExerciseCatalog,
) -> Vec<Workout> {
    let Some(last) = workouts.iter_mut().max_by_key(|w| w.day) else {
        return workouts;
    };

    for exercise in &mut last.exercises {
        exercise.sets = (exercise.sets + 1).min(5);
        exercise.reps += 3;
        exercise.rest_seconds = exercise.rest_seconds.saturating_sub(15).max(30);
    }
    last.exercises.push(catalog.finisher(equipment));
    last.recompute_duration();
    last.is_challenge = true;
    last.difficulty = DifficultyTier::Advanced;
    last.title = CHALLENGE_TITLE.into();

    tracing::info!(
        "Day {} of week {} is the challenge workout ({} min)",
        last.day,
        last.week,
        last.duration_minutes
    );

    workouts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_catalog;
    use crate::random::seeded;
    use crate::split::SplitPlanner;
    use crate::{ExerciseKind, FitnessGoal, UserProfile};

    fn week(equipment: Equipment, sessions: u32) -> Vec<Workout> {
        let catalog = build_default_catalog();
        let profile = UserProfile {
            equipment,
            sessions_per_week: sessions,
            goal: FitnessGoal::Maintenance,
            current_week: 1,
        };
        SplitPlanner::new(&catalog).plan_week(&profile, 1, DifficultyTier::Beginner, &mut seeded(1))
    }

    #[test]
    fn test_only_last_workout_upgraded() {
        let catalog = build_default_catalog();
        let before = week(Equipment::Dumbbells, 4);
        let after = inject_challenge(before.clone(), Equipment::Dumbbells, &catalog);

        assert_eq!(after.iter().filter(|w| w.is_challenge).count(), 1);
        assert!(after.last().unwrap().is_challenge);
        assert_eq!(&after[..3], &before[..3]);
    }

    #[test]
    fn test_challenge_prescription() {
        let catalog = build_default_catalog();
        let before = week(Equipment::None, 3);
        let after = inject_challenge(before.clone(), Equipment::None, &catalog);

        let old = &before[2];
        let new = &after[2];
        assert_eq!(new.exercises.len(), old.exercises.len() + 1);
        for (o, n) in old.exercises.iter().zip(&new.exercises) {
            assert_eq!(n.sets, (o.sets + 1).min(5));
            assert_eq!(n.reps, o.reps + 3);
            assert_eq!(n.rest_seconds, o.rest_seconds.saturating_sub(15).max(30));
        }

        let finisher = new.exercises.last().unwrap();
        assert_eq!(finisher.name, "burpees");
        assert_eq!(finisher.kind, ExerciseKind::Finisher);
        assert_eq!(new.difficulty, DifficultyTier::Advanced);
        assert_eq!(new.title, CHALLENGE_TITLE);
        assert_eq!(new.duration_minutes, crate::intensity::duration_minutes(&new.exercises));
    }

    #[test]
    fn test_sets_capped_at_five() {
        let catalog = build_default_catalog();
        let mut workouts = week(Equipment::Dumbbells, 3);
        for e in &mut workouts[2].exercises {
            e.sets = 6;
        }

        let after = inject_challenge(workouts, Equipment::Dumbbells, &catalog);
        let upgraded = &after[2].exercises;
        assert!(upgraded[..upgraded.len() - 1].iter().all(|e| e.sets == 5));
        assert_eq!(upgraded.last().unwrap().name, "dumbbell_complex");
    }

    #[test]
    fn test_empty_week_untouched() {
        let catalog = build_default_catalog();
        assert!(inject_challenge(vec![], Equipment::None, &catalog).is_empty());
    }
}
