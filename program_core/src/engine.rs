//! Program generation engine.
//!
//! Composes the pipeline that turns a profile and its session history into
//! a scheduled `WeekProgram`:
//!
//! 1. Analyze recent performance
//! 2. Plan the split from the catalog
//! 3. Adjust intensity (goal, then performance)
//! 4. Upgrade the last day into the challenge workout
//! 5. Resolve the start date
//! 6. Spread workouts over the week
//! 7. Apply progression
//!
//! Steps 2-4 may come from a `RemoteProgramGenerator`; on any remote
//! failure the local steps run instead, so generation never fails.

use crate::analysis::PerformanceAnalyzer;
use crate::catalog::ExerciseCatalog;
use crate::remote::{validate_remote_program, RemoteProgramGenerator};
use crate::{
    challenge, intensity, progression, schedule, split::SplitPlanner, PerformanceAnalysis,
    PlanContext, ProgramSource, Workout, WeekProgram,
};
use chrono::NaiveDate;
use rand::RngCore;
use std::time::Duration;
use uuid::Uuid;

/// Orchestrates the local generation pipeline
pub struct ProgramGenerator<'a> {
    catalog: &'a ExerciseCatalog,
    analyzer: PerformanceAnalyzer,
}

impl<'a> ProgramGenerator<'a> {
    pub fn new(catalog: &'a ExerciseCatalog, analyzer: PerformanceAnalyzer) -> Self {
        Self { catalog, analyzer }
    }

    /// Analyze the context's session logs at `ctx.now`
    pub fn analyze(&self, ctx: &PlanContext) -> PerformanceAnalysis {
        self.analyzer.analyze(&ctx.session_logs, ctx.now)
    }

    /// Generate `week` for the context's profile
    ///
    /// `start_date` overrides start-date derivation from existing programs.
    pub fn generate_week_program(
        &self,
        ctx: &PlanContext,
        week: u32,
        start_date: Option<NaiveDate>,
        rng: &mut dyn RngCore,
    ) -> WeekProgram {
        let analysis = self.analyze(ctx);
        let workouts = self.build_days(ctx, week, &analysis, rng);
        self.finish(ctx, week, start_date, workouts, ProgramSource::Local)
    }

    /// Generate the profile's current week, starting after existing programs
    pub fn generate_next_week(&self, ctx: &PlanContext, rng: &mut dyn RngCore) -> WeekProgram {
        self.generate_week_program(ctx, ctx.profile.current_week, None, rng)
    }

    /// Rebuild the profile's current week in place
    ///
    /// A stored program for the same week keeps its calendar slot: the new
    /// program starts on that program's first scheduled date. Otherwise the
    /// start date is derived from the other weeks.
    pub fn regenerate_current_week(
        &self,
        ctx: &PlanContext,
        rng: &mut dyn RngCore,
    ) -> WeekProgram {
        let week = ctx.profile.current_week;
        let previous_start = ctx
            .existing_programs
            .iter()
            .filter(|p| p.week == week)
            .find_map(WeekProgram::first_scheduled_date);

        let mut others = ctx.clone();
        others.existing_programs.retain(|p| p.week != week);

        tracing::info!(
            "Regenerating week {} (previous start: {:?})",
            week,
            previous_start
        );
        self.generate_week_program(&others, week, previous_start, rng)
    }

    /// Like `generate_week_program`, but sources the days remotely first
    ///
    /// The remote call is bounded by `timeout`. A timeout, transport error,
    /// malformed payload or invariant violation logs a warning and the
    /// local pipeline produces the days instead.
    pub async fn generate_with_remote(
        &self,
        ctx: &PlanContext,
        week: u32,
        start_date: Option<NaiveDate>,
        remote: &dyn RemoteProgramGenerator,
        timeout: Duration,
        rng: &mut dyn RngCore,
    ) -> WeekProgram {
        let analysis = self.analyze(ctx);
        let call = remote.generate(&ctx.profile, week, &ctx.session_logs, start_date);

        let remote_days = match tokio::time::timeout(timeout, call).await {
            Ok(Ok(program)) => match validate_remote_program(&program, &ctx.profile) {
                Ok(()) => Some(program.workouts),
                Err(e) => {
                    tracing::warn!("Discarding remote program: {}", e);
                    None
                }
            },
            Ok(Err(e)) => {
                tracing::warn!("Remote generation failed: {}. Using local pipeline.", e);
                None
            }
            Err(_) => {
                tracing::warn!(
                    "Remote generation timed out after {:?}. Using local pipeline.",
                    timeout
                );
                None
            }
        };

        match remote_days {
            Some(workouts) => self.finish(ctx, week, start_date, workouts, ProgramSource::Remote),
            None => {
                let workouts = self.build_days(ctx, week, &analysis, rng);
                self.finish(ctx, week, start_date, workouts, ProgramSource::Local)
            }
        }
    }

    /// Steps 2-4: split, intensity, challenge
    fn build_days(
        &self,
        ctx: &PlanContext,
        week: u32,
        analysis: &PerformanceAnalysis,
        rng: &mut dyn RngCore,
    ) -> Vec<Workout> {
        let profile = &ctx.profile;
        let tier = intensity::difficulty_tier(week, analysis);

        let planned = SplitPlanner::new(self.catalog).plan_week(profile, week, tier, rng);
        let adjusted = intensity::apply(planned, profile.goal, analysis);
        challenge::inject_challenge(adjusted, profile.equipment, self.catalog)
    }

    /// Steps 5-8: start date, schedule, progression, assemble
    fn finish(
        &self,
        ctx: &PlanContext,
        week: u32,
        start_date: Option<NaiveDate>,
        workouts: Vec<Workout>,
        source: ProgramSource,
    ) -> WeekProgram {
        let today = ctx.now.date_naive();
        let start = schedule::effective_start_date(start_date, &ctx.existing_programs, today);

        let scheduled = schedule::distribute(workouts, ctx.profile.sessions_per_week, start);
        let workouts = progression::apply_progression(scheduled, week);

        tracing::info!(
            "Generated week {} ({:?}): {} workouts starting {}",
            week,
            source,
            workouts.len(),
            start
        );

        WeekProgram {
            id: Uuid::new_v4(),
            week,
            workouts,
            generated_at: ctx.now,
            source,
        }
    }
}
