//! Stream synthetic sensor records as JSON lines
//!
//! One random model and one tag set (one tag per observation column) are
//! fixed for the lifetime of the process. Cycles are synthesized one at a
//! time; every row is split into tagged data points written to stdout, and
//! rows are paced at `--rate` rows per second. Pipe stdout into a broker
//! client to publish on the raw data topic.
//!
//! Usage: cargo run --bin stream_series -- [OPTIONS]

use clap::Parser;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::thread::sleep;
use std::time::Duration;

use lti_cycle_synth::logging::init_logging;
use lti_cycle_synth::output::{
    row_to_datapoints, unix_timestamp, DataPointSink, JsonLinesSink, TagSet, RAW_DATA_TOPIC,
};
use lti_cycle_synth::{GeneratorConfig, LinearSystem, SeriesSynthesizer, SynthResult};

/// Parse a rows-per-second rate into the pause between rows
fn parse_rate(s: &str) -> Result<Duration, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(value.is_finite() && value > 0.0) {
        return Err(format!("rate must be positive, got {}", value));
    }
    Duration::try_from_secs_f64(1.0 / value)
        .map_err(|_| format!("rate {} gives a period too long to sleep", value))
}

#[derive(Parser, Debug)]
#[command(name = "stream_series")]
#[command(about = "Stream synthetic LTI cycle records as JSON lines", long_about = None)]
struct Args {
    /// JSON configuration file (flags below override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// State dimension n (even); 2n tags are generated
    #[arg(long)]
    dim: Option<usize>,

    /// Standard deviation of waypoint noise
    #[arg(long)]
    noise: Option<f64>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Rows per second
    #[arg(long = "rate", default_value = "1.0", value_parser = parse_rate)]
    period: Duration,

    /// Stop after this many cycles (runs forever when omitted)
    #[arg(long)]
    cycles: Option<usize>,
}

fn main() -> SynthResult<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(dim) = args.dim {
        config.dimension = dim;
    }
    if let Some(noise) = args.noise {
        config.noise = noise;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;

    init_logging(&config.log);

    let mut rng = config.rng();
    let system = LinearSystem::random(config.dimension, &mut rng)?;
    let synthesizer = SeriesSynthesizer::new(system, config.synthesis())?;
    let tags = TagSet::random(synthesizer.observation_width(), &mut rng)?;

    tracing::info!(
        topic = RAW_DATA_TOPIC,
        tags = tags.len(),
        period_ms = args.period.as_secs_f64() * 1e3,
        "start publishing"
    );

    let mut sink = JsonLinesSink::new(BufWriter::new(io::stdout().lock()));
    let mut cycle = 0usize;

    while args.cycles.map_or(true, |limit| cycle < limit) {
        let observations = synthesizer.create_cycle(&mut rng)?;

        for row in observations.rows() {
            let points = row_to_datapoints(row, &tags, unix_timestamp());
            sink.send_all(&points)?;
            sink.flush()?;
            tracing::debug!(records = points.len(), "sent row");
            sleep(args.period);
        }

        cycle += 1;
        tracing::info!(cycle, sent = sink.sent(), "cycle published");
    }

    sink.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("1.0"), Ok(Duration::from_secs(1)));
        assert_eq!(parse_rate("4"), Ok(Duration::from_millis(250)));
    }

    #[test]
    fn test_parse_rate_rejects_unsleepable() {
        assert!(parse_rate("0").is_err());
        assert!(parse_rate("-2").is_err());
        assert!(parse_rate("inf").is_err());
        assert!(parse_rate("NaN").is_err());
        assert!(parse_rate("fast").is_err());
        // Period 1e300 s overflows Duration
        assert!(parse_rate("1e-300").is_err());
    }

    #[test]
    fn test_default_rate() {
        let args = Args::try_parse_from(["stream_series"]).unwrap();
        assert_eq!(args.period, Duration::from_secs(1));

        assert!(Args::try_parse_from(["stream_series", "--rate", "1e-300"]).is_err());
    }
}
