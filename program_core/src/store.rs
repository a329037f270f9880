//! File-backed profile store with file locking.
//!
//! Layout under the data directory:
//! - `profile.json`   - the user profile
//! - `programs.json`  - every generated week program
//! - `sessions.jsonl` - append-only session logs
//!
//! JSON documents are replaced atomically (temp file, lock, fsync, rename).

use crate::history::{self, JsonlSink, SessionLogSink};
use crate::{Error, Result, SessionLog, UserProfile, WeekProgram};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Supported range for weekly sessions
pub const SESSIONS_PER_WEEK: std::ops::RangeInclusive<u32> = 3..=6;

impl UserProfile {
    /// Check the profile before it is stored
    pub fn validate(&self) -> Result<()> {
        if !SESSIONS_PER_WEEK.contains(&self.sessions_per_week) {
            return Err(Error::InvalidProfile(format!(
                "sessions_per_week must be between {} and {}, got {}",
                SESSIONS_PER_WEEK.start(),
                SESSIONS_PER_WEEK.end(),
                self.sessions_per_week
            )));
        }
        if self.current_week == 0 {
            return Err(Error::InvalidProfile("current_week starts at 1".into()));
        }
        Ok(())
    }
}

/// Accepted session rating range
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

impl SessionLog {
    /// Check a session log before it is recorded
    pub fn validate(&self) -> Result<()> {
        if let Some(rating) = self.rating {
            if !RATING_RANGE.contains(&rating) {
                return Err(Error::InvalidSessionLog(format!(
                    "rating must be between {} and {}, got {}",
                    RATING_RANGE.start(),
                    RATING_RANGE.end(),
                    rating
                )));
            }
        }
        if let Some(record) = self.exercises.iter().find(|r| r.exercise.trim().is_empty()) {
            return Err(Error::InvalidSessionLog(format!(
                "exercise record with {} sets has no exercise name",
                record.sets.len()
            )));
        }
        Ok(())
    }
}

/// Source of the generator's inputs
pub trait ProfileStore {
    fn profile(&self) -> Result<UserProfile>;

    /// Session logs, newest first, optionally capped to the most recent `limit`
    fn session_logs(&self, limit: Option<usize>) -> Result<Vec<SessionLog>>;

    fn programs(&self) -> Result<Vec<WeekProgram>>;
}

/// `ProfileStore` rooted at a data directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn profile_path(&self) -> PathBuf {
        self.dir.join("profile.json")
    }

    pub fn programs_path(&self) -> PathBuf {
        self.dir.join("programs.json")
    }

    pub fn sessions_path(&self) -> PathBuf {
        self.dir.join("sessions.jsonl")
    }

    /// Validate and persist the profile
    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        profile.validate()?;
        write_json_atomic(&self.profile_path(), profile)
    }

    /// Store a program, replacing any stored program for the same week
    pub fn save_program(&self, program: &WeekProgram) -> Result<()> {
        let mut programs = self.programs()?;
        programs.retain(|p| p.week != program.week);
        programs.push(program.clone());
        programs.sort_by_key(|p| p.week);
        write_json_atomic(&self.programs_path(), &programs)?;
        tracing::info!("Stored program for week {}", program.week);
        Ok(())
    }

    /// Stored program for `week`, if any
    pub fn program(&self, week: u32) -> Result<Option<WeekProgram>> {
        Ok(self.programs()?.into_iter().find(|p| p.week == week))
    }

    /// Validate and append a session log
    pub fn append_session(&self, log: &SessionLog) -> Result<()> {
        log.validate()?;
        JsonlSink::new(self.sessions_path()).append(log)
    }

    /// Load, modify and save the profile
    pub fn update_profile<F>(&self, f: F) -> Result<UserProfile>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut profile = self.profile()?;
        f(&mut profile);
        self.save_profile(&profile)?;
        Ok(profile)
    }
}

impl ProfileStore for FileStore {
    fn profile(&self) -> Result<UserProfile> {
        let path = self.profile_path();
        if !path.exists() {
            return Err(Error::Store(format!(
                "no profile at {:?}; run `liftplan init` first",
                path
            )));
        }
        let profile: UserProfile = read_json_locked(&path)?;
        profile.validate()?;
        Ok(profile)
    }

    fn session_logs(&self, limit: Option<usize>) -> Result<Vec<SessionLog>> {
        let logs = history::read_logs(&self.sessions_path())?;
        Ok(history::most_recent(&logs, limit))
    }

    fn programs(&self) -> Result<Vec<WeekProgram>> {
        let path = self.programs_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        match read_json_locked::<Vec<WeekProgram>>(&path) {
            Ok(programs) => Ok(programs),
            Err(Error::Json(e)) => {
                tracing::warn!(
                    "Failed to parse programs file {:?}: {}. Treating as empty.",
                    path,
                    e
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

/// Read a JSON document under a shared lock
fn read_json_locked<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    file.lock_shared()?;

    let mut contents = String::new();
    let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
    file.unlock()?;
    read?;

    let value = serde_json::from_str(&contents)?;
    tracing::debug!("Loaded {:?}", path);
    Ok(value)
}

/// Atomically replace `path` with the JSON encoding of `value`
///
/// 1. Write to a temp file in the same directory
/// 2. Sync to disk
/// 3. Rename over the original
fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::Store(format!("{:?} has no parent directory", path)))?;
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Saved {:?}", path);
    Ok(())
}
