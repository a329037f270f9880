//! Core domain types for weekly program generation.
//!
//! This module defines the fundamental types used throughout the system:
//! - User profile (equipment, frequency, goal, current week)
//! - Session logs and their per-exercise records
//! - Exercises, workouts and week programs
//! - Performance analysis and difficulty tiers

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Profile Types
// ============================================================================

/// Equipment class available to the user
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    None,
    Dumbbells,
}

impl Equipment {
    /// Whether a user with this equipment can perform an exercise needing `required`
    pub fn supports(self, required: Equipment) -> bool {
        required == Equipment::None || required == self
    }
}

/// Training goal driving the goal pass of intensity adjustment
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Maintenance,
    Recomposition,
}

/// User profile, read-only input to the engine
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub equipment: Equipment,
    pub sessions_per_week: u32,
    pub goal: FitnessGoal,
    pub current_week: u32,
}

// ============================================================================
// Session Log Types
// ============================================================================

/// Subjective difficulty reported after a session
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyFeedback {
    TooEasy,
    JustRight,
    TooHard,
}

impl DifficultyFeedback {
    /// Numeric score used when averaging feedback
    pub fn score(self) -> f64 {
        match self {
            DifficultyFeedback::TooEasy => 1.0,
            DifficultyFeedback::JustRight => 2.0,
            DifficultyFeedback::TooHard => 3.0,
        }
    }
}

/// A single logged set
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetRecord {
    pub reps: u32,
    #[serde(default)]
    pub weight: Option<f64>,
    pub completed: bool,
}

/// All sets logged for one exercise in a session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseRecord {
    pub exercise: String,
    pub sets: Vec<SetRecord>,
}

impl ExerciseRecord {
    /// True when at least one set was completed
    pub fn any_completed(&self) -> bool {
        self.sets.iter().any(|s| s.completed)
    }
}

/// A recorded training session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionLog {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub exercises: Vec<ExerciseRecord>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub difficulty_feedback: Option<DifficultyFeedback>,
}

/// Score bundle computed from a window of session logs
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PerformanceAnalysis {
    pub average_rating: f64,
    pub average_difficulty: f64,
    pub completion_rate: f64,
    pub consistency_score: f64,
    pub recommended_intensity_adjustment: f64,
    pub session_count: usize,
}

impl PerformanceAnalysis {
    /// Assumptions used when there is no recent history
    pub fn baseline() -> Self {
        Self {
            average_rating: 3.5,
            average_difficulty: 2.0,
            completion_rate: 1.0,
            consistency_score: 1.0,
            recommended_intensity_adjustment: 0.0,
            session_count: 0,
        }
    }
}

// ============================================================================
// Exercise Types
// ============================================================================

/// Muscle groups used to bucket the catalog
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Legs,
    PosteriorChain,
    Biceps,
    Triceps,
    Core,
    FullBody,
}

/// Role of an exercise within a day, used for ordering
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Compound,
    Isolation,
    Core,
    Finisher,
}

/// An exercise prescription inside a workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub muscle_groups: Vec<MuscleGroup>,
    pub equipment: Equipment,
    pub kind: ExerciseKind,
    pub sets: u32,
    pub reps: u32,
    #[serde(default)]
    pub tempo: Option<String>,
    pub rest_seconds: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

// ============================================================================
// Workout and Program Types
// ============================================================================

/// Difficulty tier of a workout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyTier {
    /// One tier harder, saturating at advanced
    pub fn step_up(self) -> Self {
        match self {
            DifficultyTier::Beginner => DifficultyTier::Intermediate,
            DifficultyTier::Intermediate | DifficultyTier::Advanced => DifficultyTier::Advanced,
        }
    }

    /// One tier easier, saturating at beginner
    pub fn step_down(self) -> Self {
        match self {
            DifficultyTier::Advanced => DifficultyTier::Intermediate,
            DifficultyTier::Intermediate | DifficultyTier::Beginner => DifficultyTier::Beginner,
        }
    }
}

/// Training focus of a single day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayFocus {
    FullBody,
    Push,
    Pull,
    Legs,
}

impl DayFocus {
    /// Display key for the day's title
    pub fn title_key(self) -> &'static str {
        match self {
            DayFocus::FullBody => "workout.full_body",
            DayFocus::Push => "workout.push",
            DayFocus::Pull => "workout.pull",
            DayFocus::Legs => "workout.legs",
        }
    }
}

/// Title key given to the upgraded final workout of a week
pub const CHALLENGE_TITLE: &str = "workout.challenge";

/// A single training day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub title: String,
    pub focus: DayFocus,
    pub week: u32,
    pub day: u32,
    pub exercises: Vec<Exercise>,
    pub duration_minutes: u32,
    pub difficulty: DifficultyTier,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_challenge: bool,
}

impl Workout {
    /// Recompute `duration_minutes` from the current exercise list
    pub fn recompute_duration(&mut self) {
        self.duration_minutes = crate::intensity::duration_minutes(&self.exercises);
    }
}

/// Where the day contents of a program came from
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgramSource {
    Local,
    Remote,
}

/// One generated week of training
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeekProgram {
    pub id: Uuid,
    pub week: u32,
    pub workouts: Vec<Workout>,
    pub generated_at: DateTime<Utc>,
    pub source: ProgramSource,
}

impl WeekProgram {
    /// Latest scheduled date among this program's workouts
    pub fn last_scheduled_date(&self) -> Option<NaiveDate> {
        self.workouts.iter().filter_map(|w| w.scheduled_date).max()
    }

    /// Earliest scheduled date among this program's workouts
    pub fn first_scheduled_date(&self) -> Option<NaiveDate> {
        self.workouts.iter().filter_map(|w| w.scheduled_date).min()
    }
}

// ============================================================================
// Generation Context
// ============================================================================

/// Runtime context for the program generator
#[derive(Clone, Debug)]
pub struct PlanContext {
    pub now: DateTime<Utc>,
    pub profile: UserProfile,
    pub session_logs: Vec<SessionLog>,
    pub existing_programs: Vec<WeekProgram>,
}
