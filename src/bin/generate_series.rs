//! Generate a synthetic observation series and save it as CSV
//!
//! A random linear model of the requested dimension is driven through
//! `--cycles` noisy reference loops; every row of the output holds the
//! state followed by the control (2n columns).
//!
//! Usage: cargo run --bin generate_series -- [OPTIONS]

use clap::Parser;
use std::path::PathBuf;

use lti_cycle_synth::logging::init_logging;
use lti_cycle_synth::output::save_csv;
use lti_cycle_synth::{generate_time_series, GeneratorConfig, SynthResult};

#[derive(Parser, Debug)]
#[command(name = "generate_series")]
#[command(about = "Generate a synthetic LTI cycle series as CSV", long_about = None)]
struct Args {
    /// JSON configuration file (flags below override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// State dimension n (even); the CSV has 2n columns
    #[arg(long)]
    dim: Option<usize>,

    /// Number of cycles
    #[arg(long)]
    cycles: Option<usize>,

    /// Standard deviation of waypoint noise
    #[arg(long)]
    noise: Option<f64>,

    /// Sub-steps between consecutive waypoints
    #[arg(long)]
    steps: Option<usize>,

    /// RNG seed for a reproducible series
    #[arg(long)]
    seed: Option<u64>,

    /// Output CSV path
    #[arg(long, default_value = "test.csv")]
    output: PathBuf,
}

fn main() -> SynthResult<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig {
            dimension: 160,
            num_cycles: 50,
            ..GeneratorConfig::default()
        },
    };
    if let Some(dim) = args.dim {
        config.dimension = dim;
    }
    if let Some(cycles) = args.cycles {
        config.num_cycles = cycles;
    }
    if let Some(noise) = args.noise {
        config.noise = noise;
    }
    if let Some(steps) = args.steps {
        config.steps_per_segment = lti_cycle_synth::Steps::Uniform(steps);
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    init_logging(&config.log);

    println!("═══════════════════════════════════════════════════════════════");
    println!("  LTI Cycle Series Generator");
    println!("═══════════════════════════════════════════════════════════════\n");
    println!("Parameters:");
    println!("  Dimension n  = {}", config.dimension);
    println!("  Cycles       = {}", config.num_cycles);
    println!("  Noise σ      = {:.3}", config.noise);
    println!("  Steps        = {:?}", config.steps_per_segment);
    println!("  Policy       = {:?}", config.policy);
    match config.seed {
        Some(seed) => println!("  Seed         = {}", seed),
        None => println!("  Seed         = (entropy)"),
    }

    let series = generate_time_series(&config)?;
    save_csv(&series, &args.output)?;

    tracing::info!(
        rows = series.nrows(),
        cols = series.ncols(),
        path = %args.output.display(),
        "series written"
    );

    println!("\nGenerated:");
    println!("  {} rows × {} columns", series.nrows(), series.ncols());
    println!("  {}", args.output.display());

    Ok(())
}
