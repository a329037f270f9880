#![forbid(unsafe_code)]

//! Core domain model and business logic for liftplan.
//!
//! This crate provides:
//! - Domain types (profiles, session logs, exercises, workouts, week programs)
//! - The exercise catalog
//! - Performance analysis and the generation pipeline
//! - Optional remote generation with local fallback
//! - Persistence (profile store, JSONL history, CSV export)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod random;
pub mod analysis;
pub mod split;
pub mod intensity;
pub mod challenge;
pub mod schedule;
pub mod progression;
pub mod engine;
pub mod remote;
pub mod store;
pub mod history;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, default_catalog, ExerciseCatalog};
pub use config::Config;
pub use random::StdRng;
pub use analysis::PerformanceAnalyzer;
pub use engine::ProgramGenerator;
pub use remote::{HttpProgramGenerator, RemoteProgramGenerator};
pub use store::{FileStore, ProfileStore};
pub use history::{JsonlSink, SessionLogSink};
pub use export::export_program;
