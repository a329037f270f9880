//! Default exercise catalog.
//!
//! One table per equipment class, each mapping a muscle group to its
//! ordered exercise templates. The catalog is built once and only read.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<ExerciseCatalog> = Lazy::new(build_default_catalog_internal);

/// Muscle groups every equipment table must cover
pub const MAJOR_GROUPS: [MuscleGroup; 8] = [
    MuscleGroup::Chest,
    MuscleGroup::Back,
    MuscleGroup::Shoulders,
    MuscleGroup::Legs,
    MuscleGroup::PosteriorChain,
    MuscleGroup::Biceps,
    MuscleGroup::Triceps,
    MuscleGroup::Core,
];

/// Exercise templates keyed by equipment class, then muscle group
#[derive(Clone, Debug, Default)]
pub struct ExerciseCatalog {
    pub tables: HashMap<Equipment, HashMap<MuscleGroup, Vec<Exercise>>>,
}

/// Get a reference to the cached default catalog
pub fn default_catalog() -> &'static ExerciseCatalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// **Note**: prefer `default_catalog()` outside of tests; this rebuilds
/// every table on each call.
pub fn build_default_catalog() -> ExerciseCatalog {
    build_default_catalog_internal()
}

#[allow(clippy::too_many_arguments)]
fn template(
    name: &str,
    groups: &[MuscleGroup],
    equipment: Equipment,
    kind: ExerciseKind,
    sets: u32,
    reps: u32,
    rest_seconds: u32,
    tempo: Option<&str>,
    notes: Option<&str>,
) -> Exercise {
    Exercise {
        name: name.into(),
        muscle_groups: groups.to_vec(),
        equipment,
        kind,
        sets,
        reps,
        tempo: tempo.map(Into::into),
        rest_seconds,
        notes: notes.map(Into::into),
    }
}

fn build_default_catalog_internal() -> ExerciseCatalog {
    use Equipment::{Dumbbells as DB, None as BW};
    use ExerciseKind::{Compound, Core as CoreKind, Isolation};
    use MuscleGroup::*;

    let mut tables = HashMap::new();

    // ========================================================================
    // Dumbbell table
    // ========================================================================

    let mut dumbbell = HashMap::new();

    dumbbell.insert(
        Chest,
        vec![
            template("dumbbell_bench_press", &[Chest, Triceps, Shoulders], DB, Compound, 4, 10, 90, Some("3-1-1"), None),
            template("dumbbell_incline_press", &[Chest, Shoulders], DB, Compound, 3, 10, 90, None, None),
            template("dumbbell_floor_press", &[Chest, Triceps], DB, Compound, 3, 12, 75, None, Some("notes.floor_press_elbows")),
            template("dumbbell_fly", &[Chest], DB, Isolation, 3, 12, 60, Some("3-0-1"), None),
        ],
    );

    dumbbell.insert(
        Back,
        vec![
            template("dumbbell_bent_over_row", &[Back, Biceps], DB, Compound, 4, 10, 90, None, Some("notes.flat_back")),
            template("single_arm_dumbbell_row", &[Back, Biceps], DB, Compound, 3, 10, 75, None, None),
            template("renegade_row", &[Back, Core], DB, Compound, 3, 8, 90, None, None),
            template("dumbbell_pullover", &[Back, Chest], DB, Isolation, 3, 12, 60, Some("3-0-1"), None),
        ],
    );

    dumbbell.insert(
        Shoulders,
        vec![
            template("dumbbell_shoulder_press", &[Shoulders, Triceps], DB, Compound, 3, 10, 90, None, None),
            template("arnold_press", &[Shoulders], DB, Compound, 3, 10, 90, Some("2-0-1"), None),
            template("lateral_raise", &[Shoulders], DB, Isolation, 3, 12, 60, None, None),
            template("rear_delt_fly", &[Shoulders, Back], DB, Isolation, 3, 12, 60, None, None),
            template("incline_y_raise", &[Shoulders, Back], DB, Isolation, 3, 12, 60, Some("2-1-2"), Some("notes.light_weight")),
        ],
    );

    dumbbell.insert(
        Legs,
        vec![
            template("goblet_squat", &[Legs, Core], DB, Compound, 4, 10, 90, Some("3-1-1"), None),
            template("dumbbell_reverse_lunge", &[Legs, PosteriorChain], DB, Compound, 3, 10, 90, None, Some("notes.per_leg")),
            template("bulgarian_split_squat", &[Legs], DB, Compound, 3, 8, 90, None, Some("notes.per_leg")),
            template("dumbbell_step_up", &[Legs, PosteriorChain], DB, Compound, 3, 10, 75, None, Some("notes.per_leg")),
        ],
    );

    dumbbell.insert(
        PosteriorChain,
        vec![
            template("dumbbell_romanian_deadlift", &[PosteriorChain, Back], DB, Compound, 4, 10, 90, Some("3-0-1"), Some("notes.flat_back")),
            template("dumbbell_hip_thrust", &[PosteriorChain], DB, Compound, 3, 12, 75, None, None),
            template("single_leg_dumbbell_rdl", &[PosteriorChain, Core], DB, Compound, 3, 8, 75, None, Some("notes.per_leg")),
        ],
    );

    dumbbell.insert(
        Biceps,
        vec![
            template("dumbbell_curl", &[Biceps], DB, Isolation, 3, 12, 60, None, None),
            template("hammer_curl", &[Biceps], DB, Isolation, 3, 12, 60, None, None),
            template("concentration_curl", &[Biceps], DB, Isolation, 3, 10, 60, Some("2-1-2"), None),
        ],
    );

    dumbbell.insert(
        Triceps,
        vec![
            template("overhead_tricep_extension", &[Triceps], DB, Isolation, 3, 12, 60, None, None),
            template("dumbbell_kickback", &[Triceps], DB, Isolation, 3, 12, 60, None, None),
            template("close_grip_dumbbell_press", &[Triceps, Chest], DB, Isolation, 3, 10, 60, None, None),
        ],
    );

    dumbbell.insert(
        Core,
        vec![
            template("dumbbell_russian_twist", &[Core], DB, CoreKind, 3, 15, 45, None, Some("notes.per_side")),
            template("dumbbell_side_bend", &[Core], DB, CoreKind, 3, 12, 45, None, Some("notes.per_side")),
            template("dead_bug", &[Core], BW, CoreKind, 3, 10, 45, Some("2-1-2"), None),
            template("plank_shoulder_tap", &[Core, Shoulders], BW, CoreKind, 3, 12, 45, None, None),
        ],
    );

    tables.insert(DB, dumbbell);

    // ========================================================================
    // Bodyweight table
    // ========================================================================

    let mut bodyweight = HashMap::new();

    bodyweight.insert(
        Chest,
        vec![
            template("push_up", &[Chest, Triceps, Shoulders], BW, Compound, 3, 12, 75, None, None),
            template("incline_push_up", &[Chest, Triceps], BW, Compound, 3, 12, 60, None, None),
            template("decline_push_up", &[Chest, Shoulders], BW, Compound, 3, 10, 75, None, None),
            template("wide_push_up", &[Chest], BW, Compound, 3, 12, 75, None, None),
        ],
    );

    bodyweight.insert(
        Back,
        vec![
            template("inverted_table_row", &[Back, Biceps], BW, Compound, 3, 10, 90, None, Some("notes.sturdy_table")),
            template("towel_door_row", &[Back, Biceps], BW, Compound, 3, 12, 75, None, None),
            template("superman", &[Back, PosteriorChain], BW, Isolation, 3, 12, 60, Some("2-2-1"), None),
            template("reverse_snow_angel", &[Back, Shoulders], BW, Isolation, 3, 12, 60, None, None),
        ],
    );

    bodyweight.insert(
        Shoulders,
        vec![
            template("pike_push_up", &[Shoulders, Triceps], BW, Compound, 3, 8, 90, None, None),
            template("plank_to_down_dog", &[Shoulders, Core], BW, Compound, 3, 10, 60, None, None),
            template("prone_t_raise", &[Shoulders, Back], BW, Isolation, 3, 12, 45, None, None),
            template("prone_y_raise", &[Shoulders, Back], BW, Isolation, 3, 12, 45, Some("2-1-2"), None),
            template("arm_circle_pulse", &[Shoulders], BW, Isolation, 3, 15, 45, None, None),
        ],
    );

    bodyweight.insert(
        Legs,
        vec![
            template("bodyweight_squat", &[Legs], BW, Compound, 3, 15, 60, Some("3-1-1"), None),
            template("reverse_lunge", &[Legs, PosteriorChain], BW, Compound, 3, 12, 60, None, Some("notes.per_leg")),
            template("split_squat", &[Legs], BW, Compound, 3, 10, 60, None, Some("notes.per_leg")),
            template("jump_squat", &[Legs], BW, Compound, 3, 10, 90, None, None),
        ],
    );

    bodyweight.insert(
        PosteriorChain,
        vec![
            template("glute_bridge", &[PosteriorChain], BW, Compound, 3, 15, 60, Some("2-2-1"), None),
            template("single_leg_glute_bridge", &[PosteriorChain], BW, Compound, 3, 10, 60, None, Some("notes.per_leg")),
            template("bodyweight_good_morning", &[PosteriorChain, Back], BW, Compound, 3, 15, 60, None, Some("notes.flat_back")),
        ],
    );

    bodyweight.insert(
        Biceps,
        vec![
            template("towel_curl", &[Biceps], BW, Isolation, 3, 12, 60, Some("2-2-2"), None),
            template("doorframe_curl", &[Biceps, Back], BW, Isolation, 3, 12, 60, None, None),
        ],
    );

    bodyweight.insert(
        Triceps,
        vec![
            template("diamond_push_up", &[Triceps, Chest], BW, Isolation, 3, 10, 75, None, None),
            template("chair_dip", &[Triceps, Shoulders], BW, Isolation, 3, 12, 60, None, Some("notes.sturdy_chair")),
            template("floor_tricep_extension", &[Triceps], BW, Isolation, 3, 10, 60, None, None),
        ],
    );

    bodyweight.insert(
        Core,
        vec![
            template("dead_bug", &[Core], BW, CoreKind, 3, 10, 45, Some("2-1-2"), None),
            template("plank_shoulder_tap", &[Core, Shoulders], BW, CoreKind, 3, 12, 45, None, None),
            template("bicycle_crunch", &[Core], BW, CoreKind, 3, 15, 45, None, Some("notes.per_side")),
            template("mountain_climber", &[Core, Legs], BW, CoreKind, 3, 15, 45, None, Some("notes.per_side")),
        ],
    );

    tables.insert(BW, bodyweight);

    ExerciseCatalog { tables }
}

impl ExerciseCatalog {
    /// All templates for a muscle group, in catalog order
    ///
    /// Unknown equipment or groups yield an empty slice.
    pub fn exercises(&self, equipment: Equipment, group: MuscleGroup) -> &[Exercise] {
        self.tables
            .get(&equipment)
            .and_then(|t| t.get(&group))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Templates for a muscle group filtered by role
    pub fn exercises_of_kind(
        &self,
        equipment: Equipment,
        group: MuscleGroup,
        kind: ExerciseKind,
    ) -> Vec<Exercise> {
        self.exercises(equipment, group)
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }

    /// Finisher appended to the week's challenge workout
    pub fn finisher(&self, equipment: Equipment) -> Exercise {
        match equipment {
            Equipment::Dumbbells => template(
                "dumbbell_complex",
                &[MuscleGroup::FullBody],
                Equipment::Dumbbells,
                ExerciseKind::Finisher,
                3,
                6,
                60,
                None,
                Some("notes.dumbbell_complex_sequence"),
            ),
            Equipment::None => template(
                "burpees",
                &[MuscleGroup::FullBody],
                Equipment::None,
                ExerciseKind::Finisher,
                3,
                10,
                45,
                None,
                Some("notes.max_effort"),
            ),
        }
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for equipment in [Equipment::Dumbbells, Equipment::None] {
            let Some(table) = self.tables.get(&equipment) else {
                errors.push(format!("Catalog has no table for {:?}", equipment));
                continue;
            };

            for group in MAJOR_GROUPS {
                if table.get(&group).map_or(true, Vec::is_empty) {
                    errors.push(format!("{:?} table has no {:?} exercises", equipment, group));
                }
            }

            for (group, exercises) in table {
                for exercise in exercises {
                    let id = &exercise.name;
                    if id.is_empty() {
                        errors.push(format!("{:?}/{:?} has an exercise with empty name", equipment, group));
                    }
                    if !exercise.muscle_groups.contains(group) {
                        errors.push(format!(
                            "Exercise '{}' listed under {:?} but does not train it",
                            id, group
                        ));
                    }
                    if exercise.sets == 0 || exercise.reps == 0 {
                        errors.push(format!("Exercise '{}' has zero sets or reps", id));
                    }
                    if !(30..=120).contains(&exercise.rest_seconds) {
                        errors.push(format!(
                            "Exercise '{}': rest {}s outside 30..=120",
                            id, exercise.rest_seconds
                        ));
                    }
                    if exercise.equipment == Equipment::Dumbbells && equipment == Equipment::None {
                        errors.push(format!(
                            "Exercise '{}' needs dumbbells but is in the bodyweight table",
                            id
                        ));
                    }
                }
            }
        }

        errors
    }
}
