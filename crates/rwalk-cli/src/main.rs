//! rwalk CLI - lattice random walk simulator.
//!
//! Single binary that provides:
//! - `rwalk walk` - run one walk, optionally streaming step events as JSON lines
//! - `rwalk stats` - average end-to-end distance over many walks
//! - `rwalk generate` - print raw values from a generator

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use rwalk_core::{
    distance, event_channel, sweep, GeneratorConfig, NullSink, Point, RandomSource,
    SimulationConfig, WalkKind, WalkOutcome,
};

#[derive(Parser)]
#[command(name = "rwalk")]
#[command(about = "Random walks on the integer lattice", version)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single walk
    Walk {
        #[command(flatten)]
        overrides: Overrides,

        /// Stream step events as JSON lines before the result
        #[arg(long)]
        events: bool,
    },

    /// Average end-to-end distance for every walk kind
    Stats {
        #[command(flatten)]
        overrides: Overrides,

        /// Largest step count sampled
        #[arg(long)]
        max_steps: Option<usize>,

        /// Gap between sampled step counts
        #[arg(long)]
        stride: Option<usize>,

        /// Successful walks averaged per step count
        #[arg(long)]
        walks: Option<usize>,

        /// Print rows as JSON lines instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print values in [0, 1) from a generator
    Generate {
        #[arg(long, value_enum)]
        generator: Option<GeneratorArg>,

        #[arg(long)]
        seed: Option<u64>,

        /// How many values to print
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },
}

/// Command line values that take precedence over the config file.
#[derive(Args)]
struct Overrides {
    /// Walk policy
    #[arg(long, value_enum)]
    kind: Option<KindArg>,

    /// Number of accepted steps
    #[arg(long, allow_negative_numbers = true)]
    steps: Option<i64>,

    /// Start point as `x,y`
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    start: Option<Point>,

    /// Backtrack instead of abandoning self-avoiding walks
    #[arg(long)]
    backtrack: bool,

    #[arg(long, value_enum)]
    generator: Option<GeneratorArg>,

    /// Generator seed (both recurrence terms for the two-term generator)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Random,
    NonReversing,
    SelfAvoiding,
}

impl From<KindArg> for WalkKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Random => WalkKind::Random,
            KindArg::NonReversing => WalkKind::NonReversing,
            KindArg::SelfAvoiding => WalkKind::SelfAvoiding,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GeneratorArg {
    Native,
    OneTerm,
    TwoTerm,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Point::new(x, y))
}

fn select_generator(
    current: &GeneratorConfig,
    arg: Option<GeneratorArg>,
    seed: Option<u64>,
) -> GeneratorConfig {
    let mut generator = match arg {
        None => current.clone(),
        Some(GeneratorArg::Native) => GeneratorConfig::Native { seed: None },
        Some(GeneratorArg::OneTerm) => GeneratorConfig::one_term(),
        Some(GeneratorArg::TwoTerm) => GeneratorConfig::two_term(),
    };
    if let Some(value) = seed {
        match &mut generator {
            GeneratorConfig::Native { seed } => *seed = Some(value),
            GeneratorConfig::OneTerm { seed, .. } => *seed = value,
            GeneratorConfig::TwoTerm {
                seed_n2, seed_n1, ..
            } => {
                *seed_n2 = value;
                *seed_n1 = value;
            }
        }
    }
    generator
}

impl Overrides {
    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(kind) = self.kind {
            config.kind = kind.into();
        }
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(start) = self.start {
            config.start = start;
        }
        if self.backtrack {
            config.backtrack = true;
        }
        config.generator = select_generator(&config.generator, self.generator, self.seed);
    }
}

#[derive(Serialize)]
struct WalkReport {
    kind: WalkKind,
    steps: usize,
    start: Point,
    outcome: WalkOutcome,
    distance: Option<f64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout carries results only.
    // RUST_LOG wins when set.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = SimulationConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Walk { overrides, events }) => {
            overrides.apply(&mut config);
            run_walk(&config, events)
        }
        Some(Commands::Stats {
            overrides,
            max_steps,
            stride,
            walks,
            json,
        }) => {
            overrides.apply(&mut config);
            if let Some(max_steps) = max_steps {
                config.stats.max_steps = max_steps;
            }
            if let Some(stride) = stride {
                config.stats.stride = stride;
            }
            if let Some(walks) = walks {
                config.stats.walks = walks;
            }
            run_stats(&config, json)
        }
        Some(Commands::Generate {
            generator,
            seed,
            count,
        }) => {
            config.generator = select_generator(&config.generator, generator, seed);
            run_generate(&config, count)
        }
        None => {
            println!("rwalk - Random walks on the integer lattice");
            println!();
            println!("Usage: rwalk <COMMAND>");
            println!();
            println!("Commands:");
            println!("  walk      Run a single walk");
            println!("  stats     Average end-to-end distance for every walk kind");
            println!("  generate  Print values from a generator");
            println!();
            println!("Run 'rwalk --help' for more information.");
            Ok(())
        }
    }
}

fn run_walk(config: &SimulationConfig, stream_events: bool) -> Result<()> {
    let walker = config.walker()?;
    let start = config.start;
    let steps = walker.check(start, config.steps)?;
    let mut source = config.build_source()?;

    tracing::info!(
        kind = %walker.kind,
        steps = steps,
        start = %start,
        generator = config.generator.name(),
        backtrack = walker.options.backtrack,
        "Starting walk"
    );

    let outcome = if stream_events {
        let (mut sink, receiver) = event_channel();
        let worker = thread::spawn(move || walker.run(start, steps, &mut sink, &mut source));

        let interval = Duration::from_millis(config.poll_interval_ms);
        let delivered = receiver.poll_every(interval, |event| {
            if let Ok(line) = serde_json::to_string(&event) {
                println!("{line}");
            }
        });
        tracing::debug!(events = delivered, "Event stream closed");

        worker
            .join()
            .map_err(|_| anyhow::anyhow!("Walk worker panicked"))?
    } else {
        walker.run(start, steps, &mut NullSink, &mut source)
    };

    match outcome {
        WalkOutcome::Arrived(end) => tracing::info!(end = %end, "Walk arrived"),
        WalkOutcome::Abandoned(reason) => tracing::info!(reason = ?reason, "Walk abandoned"),
    }

    let report = WalkReport {
        kind: walker.kind,
        steps,
        start,
        outcome,
        distance: outcome.arrival().map(|end| distance(start, end)),
    };
    println!(
        "{}",
        serde_json::to_string(&report).context("Failed to encode walk report")?
    );
    Ok(())
}

fn run_stats(config: &SimulationConfig, json: bool) -> Result<()> {
    let options = config.walk_options()?;
    let mut source = config.build_source()?;
    let stats = &config.stats;

    let rows = sweep(&options, stats.max_steps, stats.stride, stats.walks, &mut source)?;

    if json {
        for row in &rows {
            println!("{}", serde_json::to_string(row)?);
        }
        return Ok(());
    }

    println!(
        "{:>6}  {:>12}  {:>14}  {:>14}",
        "steps", "random", "non_reversing", "self_avoiding"
    );
    for row in &rows {
        println!(
            "{:>6}  {:>12.3}  {:>14.3}  {:>14.3}",
            row.nb_steps,
            row.random.mean_square_distance,
            row.non_reversing.mean_square_distance,
            row.self_avoiding.mean_square_distance,
        );
    }
    Ok(())
}

fn run_generate(config: &SimulationConfig, count: usize) -> Result<()> {
    let mut source = config.build_source()?;
    for _ in 0..count {
        println!("{}", source.generate());
    }
    Ok(())
}
