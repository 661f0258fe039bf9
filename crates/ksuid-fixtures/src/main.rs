#![doc = include_str!("../README.md")]

mod linspace;
mod record;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use ksuid::{Ksuid, MAX_UNIX_SECS, MIN_UNIX_SECS, to_epoch_secs};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::linspace::lin_space;
use crate::record::FixtureRecord;

/// Runtime configuration for the fixture generator.
///
/// All values are parsed from CLI arguments or environment variables. The
/// defaults reproduce the canonical 1000-entry fixture layout: timestamps
/// evenly spaced across the entire valid KSUID time range, endpoints
/// included.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ksuid-fixtures",
    version,
    about = "Generates KSUID conformance fixtures as line-delimited JSON"
)]
pub struct CliArgs {
    /// Path of the fixture file to write.
    ///
    /// Environment variable: `FIXTURE_PATH`
    #[arg(long, env = "FIXTURE_PATH", default_value = "test_ksuids.txt")]
    pub path: PathBuf,

    /// Number of fixture entries to generate.
    ///
    /// Timestamps are evenly spaced over the valid range with the first
    /// entry pinned to the minimum and the last to the maximum.
    ///
    /// Environment variable: `FIXTURE_COUNT`
    #[arg(long, env = "FIXTURE_COUNT", default_value_t = 1000)]
    pub count: usize,

    /// Seed for the payload RNG.
    ///
    /// When set, runs are bit-for-bit reproducible. When unset, payloads
    /// come from OS entropy.
    ///
    /// Environment variable: `FIXTURE_SEED`
    #[arg(long, env = "FIXTURE_SEED")]
    pub seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    run(&args)
}

fn run(args: &CliArgs) -> anyhow::Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let file = File::create(&args.path)?;
    let mut out = BufWriter::new(file);

    let stamps = lin_space(MIN_UNIX_SECS, MAX_UNIX_SECS, args.count);
    for stamp in &stamps {
        let payload: [u8; Ksuid::PAYLOAD_LEN] = rng.random();
        let id = Ksuid::from_parts(to_epoch_secs(*stamp)?, payload);

        serde_json::to_writer(&mut out, &FixtureRecord::new(&id))?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    tracing::info!(
        entries = stamps.len(),
        path = %args.path.display(),
        seeded = args.seed.is_some(),
        "wrote fixture file"
    );
    Ok(())
}
