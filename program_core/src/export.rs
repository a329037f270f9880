//! CSV export of a week program, one row per exercise.

use crate::{Result, WeekProgram};
use std::io::Write;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    week: u32,
    day: u32,
    date: Option<String>,
    title: &'a str,
    exercise: &'a str,
    sets: u32,
    reps: u32,
    rest_seconds: u32,
    tempo: Option<&'a str>,
    duration_minutes: u32,
    challenge: bool,
}

/// Write `program` as CSV with a header row
pub fn write_program_csv<W: Write>(program: &WeekProgram, out: W) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(out);
    let mut rows = 0;

    for workout in &program.workouts {
        for exercise in &workout.exercises {
            writer.serialize(CsvRow {
                week: program.week,
                day: workout.day,
                date: workout.scheduled_date.map(|d| d.to_string()),
                title: &workout.title,
                exercise: &exercise.name,
                sets: exercise.sets,
                reps: exercise.reps,
                rest_seconds: exercise.rest_seconds,
                tempo: exercise.tempo.as_deref(),
                duration_minutes: workout.duration_minutes,
                challenge: workout.is_challenge,
            })?;
            rows += 1;
        }
    }

    writer.flush()?;
    Ok(rows)
}

/// Export `program` to a CSV file, creating parent directories as needed
pub fn export_program(program: &WeekProgram, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    let rows = write_program_csv(program, file)?;
    tracing::info!("Exported {} rows for week {} to {:?}", rows, program.week, path);
    Ok(rows)
}
