use beacon::{driver, Config, Error, Format};
use beacon_cryptography::bls12381::primitives::{group::Element, variant::MinPk};
use beacon_utils::hex;
use clap::Parser;
use rand::{
    rngs::{OsRng, StdRng},
    SeedableRng,
};
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info, Level};

/// Generate publicly verifiable randomness with a simulated threshold group.
#[derive(Parser)]
#[command(name = "beacon", version, about)]
struct Args {
    /// YAML configuration file (flags override its values).
    #[arg(long)]
    config: Option<PathBuf>,

    /// The number of participants in the group.
    #[arg(long)]
    participants: Option<u32>,

    /// The number of partial signatures required to produce a round.
    #[arg(long)]
    threshold: Option<u32>,

    /// The number of rounds to attempt.
    #[arg(long)]
    rounds: Option<u64>,

    /// The file produced randomness is appended to.
    #[arg(long)]
    output: Option<PathBuf>,

    /// The encoding of output records.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Participants (comma-separated indices) that never sign.
    #[arg(long, value_delimiter = ',')]
    offline: Option<Vec<u32>>,

    /// The number of threads used to collect partial signatures.
    #[arg(long)]
    concurrency: Option<usize>,

    /// Seed for deterministic key generation.
    #[arg(long)]
    rng_seed: Option<u64>,

    /// The log level for traces. opts: (error, debug, info, warn, trace)
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

impl Args {
    /// Loads the configuration file (if any) and applies flag overrides.
    fn config(&self) -> Result<Config, Error> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(participants) = self.participants {
            config.participants = participants;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(offline) = &self.offline {
            config.offline = offline.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if self.rng_seed.is_some() {
            config.rng_seed = self.rng_seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Create logger
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    // Load config
    let config = match args.config() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    info!(?config, "loaded config");

    // Run beacon
    let result = match config.rng_seed {
        Some(seed) => driver::run::<_, MinPk>(&config, &mut StdRng::seed_from_u64(seed)),
        None => driver::run::<_, MinPk>(&config, &mut OsRng),
    };
    match result {
        Ok(summary) => {
            info!(
                produced = summary.produced,
                failed = summary.failed,
                public = %hex(&summary.public.serialize()),
                "finished"
            );
            if let Some(err) = summary.halted {
                error!(%err, "beacon halted");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "beacon failed");
            ExitCode::FAILURE
        }
    }
}
