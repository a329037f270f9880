use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use program_core::*;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "liftplan")]
#[command(about = "Adaptive home strength program generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or replace the user profile
    Init {
        #[arg(long, value_enum)]
        equipment: EquipmentArg,

        /// Training sessions per week (3-6)
        #[arg(long)]
        sessions: u32,

        #[arg(long, value_enum)]
        goal: GoalArg,

        /// Starting program week
        #[arg(long, default_value_t = 1)]
        week: u32,
    },

    /// Generate and store a week program
    Generate {
        /// Program week (defaults to the profile's current week)
        #[arg(long)]
        week: Option<u32>,

        /// First scheduled date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Seed for reproducible exercise selection
        #[arg(long)]
        seed: Option<u64>,

        /// Dry run - show the program without storing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate the current week after the stored ones, then advance the week
    Next {
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        dry_run: bool,
    },

    /// Rebuild the current week in its existing calendar slot
    Regenerate {
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        dry_run: bool,
    },

    /// Record a completed session from a JSON file
    Log {
        #[arg(long)]
        file: PathBuf,
    },

    /// Show the performance analysis of recent sessions
    Analyze,

    /// Export a stored program to CSV
    Export {
        /// Program week (defaults to the latest stored week)
        #[arg(long)]
        week: Option<u32>,

        #[arg(long)]
        out: PathBuf,
    },

    /// Print a stored program
    Show {
        /// Program week (defaults to the latest stored week)
        #[arg(long)]
        week: Option<u32>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EquipmentArg {
    None,
    Dumbbells,
}

impl From<EquipmentArg> for Equipment {
    fn from(arg: EquipmentArg) -> Self {
        match arg {
            EquipmentArg::None => Equipment::None,
            EquipmentArg::Dumbbells => Equipment::Dumbbells,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GoalArg {
    WeightLoss,
    MuscleGain,
    Maintenance,
    Recomposition,
}

impl From<GoalArg> for FitnessGoal {
    fn from(arg: GoalArg) -> Self {
        match arg {
            GoalArg::WeightLoss => FitnessGoal::WeightLoss,
            GoalArg::MuscleGain => FitnessGoal::MuscleGain,
            GoalArg::Maintenance => FitnessGoal::Maintenance,
            GoalArg::Recomposition => FitnessGoal::Recomposition,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    program_core::logging::init(cli.verbose);

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let store = FileStore::new(data_dir);

    match cli.command {
        Commands::Init {
            equipment,
            sessions,
            goal,
            week,
        } => cmd_init(&store, equipment.into(), sessions, goal.into(), week),
        Commands::Generate {
            week,
            start,
            seed,
            dry_run,
        } => cmd_generate(&store, &config, week, start, seed, dry_run),
        Commands::Next { seed, dry_run } => cmd_next(&store, &config, seed, dry_run),
        Commands::Regenerate { seed, dry_run } => cmd_regenerate(&store, &config, seed, dry_run),
        Commands::Log { file } => cmd_log(&store, file),
        Commands::Analyze => cmd_analyze(&store, &config),
        Commands::Export { week, out } => cmd_export(&store, week, out),
        Commands::Show { week } => cmd_show(&store, week),
    }
}

fn cmd_init(
    store: &FileStore,
    equipment: Equipment,
    sessions_per_week: u32,
    goal: FitnessGoal,
    current_week: u32,
) -> Result<()> {
    let profile = UserProfile {
        equipment,
        sessions_per_week,
        goal,
        current_week,
    };
    store.save_profile(&profile)?;

    println!("✓ Profile saved");
    println!(
        "  {:?}, {} sessions/week, goal {:?}, week {}",
        profile.equipment, profile.sessions_per_week, profile.goal, profile.current_week
    );
    Ok(())
}

fn cmd_generate(
    store: &FileStore,
    config: &Config,
    week: Option<u32>,
    start: Option<NaiveDate>,
    seed: Option<u64>,
    dry_run: bool,
) -> Result<()> {
    let ctx = load_context(store, config)?;
    let week = week.unwrap_or(ctx.profile.current_week);
    if week == 0 {
        return Err(Error::InvalidWeek(week));
    }

    let mut rng = rng_for(seed);
    let program = generate(config, &ctx, week, start, &mut rng)?;

    display_program(&program);
    store_program(store, &program, dry_run)
}

fn cmd_next(store: &FileStore, config: &Config, seed: Option<u64>, dry_run: bool) -> Result<()> {
    let ctx = load_context(store, config)?;
    let mut rng = rng_for(seed);

    let program = if config.remote.enabled {
        generate(config, &ctx, ctx.profile.current_week, None, &mut rng)?
    } else {
        generator(config).generate_next_week(&ctx, &mut rng)
    };

    display_program(&program);
    store_program(store, &program, dry_run)?;

    if !dry_run {
        let profile = store.update_profile(|p| p.current_week += 1)?;
        println!("  Current week is now {}", profile.current_week);
    }
    Ok(())
}

fn cmd_regenerate(
    store: &FileStore,
    config: &Config,
    seed: Option<u64>,
    dry_run: bool,
) -> Result<()> {
    let ctx = load_context(store, config)?;
    let mut rng = rng_for(seed);

    let program = generator(config).regenerate_current_week(&ctx, &mut rng);

    display_program(&program);
    store_program(store, &program, dry_run)
}

fn cmd_log(store: &FileStore, file: PathBuf) -> Result<()> {
    let contents = std::fs::read_to_string(&file)?;
    let log: SessionLog = serde_json::from_str(&contents)?;
    store.append_session(&log)?;

    println!("✓ Session logged ({} exercises)", log.exercises.len());
    Ok(())
}

fn cmd_analyze(store: &FileStore, config: &Config) -> Result<()> {
    let ctx = load_context(store, config)?;
    let analysis = generator(config).analyze(&ctx);

    println!("Performance ({} week window)", config.analysis.window_weeks);
    println!("  Sessions:     {}", analysis.session_count);
    println!("  Rating:       {:.2}", analysis.average_rating);
    println!("  Difficulty:   {:.2}", analysis.average_difficulty);
    println!("  Completion:   {:.0}%", analysis.completion_rate * 100.0);
    println!("  Consistency:  {:.0}%", analysis.consistency_score * 100.0);
    println!(
        "  Adjustment:   {:+.2}",
        analysis.recommended_intensity_adjustment
    );
    Ok(())
}

fn cmd_export(store: &FileStore, week: Option<u32>, out: PathBuf) -> Result<()> {
    let Some(program) = stored_program(store, week)? else {
        println!("No stored program - nothing to export.");
        return Ok(());
    };

    let rows = program_core::export::export_program(&program, &out)?;
    println!("✓ Exported {} exercises for week {}", rows, program.week);
    println!("  CSV: {}", out.display());
    Ok(())
}

fn cmd_show(store: &FileStore, week: Option<u32>) -> Result<()> {
    match stored_program(store, week)? {
        Some(program) => display_program(&program),
        None => println!("No stored program."),
    }
    Ok(())
}

fn load_context(store: &FileStore, config: &Config) -> Result<PlanContext> {
    let catalog = default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    Ok(PlanContext {
        now: Utc::now(),
        profile: store.profile()?,
        session_logs: store.session_logs(Some(config.analysis.history_limit))?,
        existing_programs: store.programs()?,
    })
}

fn generator(config: &Config) -> ProgramGenerator<'static> {
    ProgramGenerator::new(
        default_catalog(),
        PerformanceAnalyzer::new(config.analysis.window_weeks),
    )
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => program_core::random::seeded(seed),
        None => program_core::random::from_entropy(),
    }
}

fn remote_generator(config: &Config) -> Option<HttpProgramGenerator> {
    if !config.remote.enabled {
        return None;
    }
    match HttpProgramGenerator::from_config(&config.remote) {
        Ok(remote) => Some(remote),
        Err(e) => {
            tracing::warn!("Remote generation unavailable: {}", e);
            None
        }
    }
}

/// Generate `week`, through the remote service when it is configured
fn generate(
    config: &Config,
    ctx: &PlanContext,
    week: u32,
    start: Option<NaiveDate>,
    rng: &mut StdRng,
) -> Result<WeekProgram> {
    let generator = generator(config);
    let Some(remote) = remote_generator(config) else {
        return Ok(generator.generate_week_program(ctx, week, start, rng));
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let timeout = Duration::from_secs(config.remote.timeout_secs);
    Ok(runtime.block_on(generator.generate_with_remote(ctx, week, start, &remote, timeout, rng)))
}

fn store_program(store: &FileStore, program: &WeekProgram, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("\n[Dry run - program not stored]");
        return Ok(());
    }
    store.save_program(program)?;
    println!("\n✓ Program stored for week {}", program.week);
    Ok(())
}

fn stored_program(store: &FileStore, week: Option<u32>) -> Result<Option<WeekProgram>> {
    match week {
        Some(week) => store.program(week),
        None => Ok(store.programs()?.into_iter().max_by_key(|p| p.week)),
    }
}

fn display_program(program: &WeekProgram) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  Week {} ({:?})", program.week, program.source);
    println!("╰─────────────────────────────────────────╯");

    for workout in &program.workouts {
        let date = workout
            .scheduled_date
            .map(|d| d.format("%a %Y-%m-%d").to_string())
            .unwrap_or_else(|| "unscheduled".into());
        println!();
        println!(
            "  Day {}  {}  {}{}",
            workout.day,
            date,
            workout.title,
            if workout.is_challenge { "  ★" } else { "" }
        );
        println!(
            "  {:?}, ~{} min",
            workout.difficulty, workout.duration_minutes
        );

        for exercise in &workout.exercises {
            println!(
                "    → {}  {}x{}  rest {}s",
                exercise.name, exercise.sets, exercise.reps, exercise.rest_seconds
            );
        }
    }
    println!();
}
