//! Word Benchmark
//!
//! Boots a script runtime with the `Word` class and times set/get round
//! trips against a plain `Uint8Array` copy.

mod bench;
mod samples;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use word_script::ScriptRuntime;

use crate::settings::BenchSettings;

#[derive(Parser)]
#[command(name = "word-bench", version, about = "Word set/get micro-benchmark")]
struct Cli {
    #[arg(long, help = "JSON settings file; flags override its values")]
    config: Option<PathBuf>,
    #[arg(short, long, help = "Iterations (default 1 000 000)")]
    rounds: Option<u32>,
    #[arg(short, long, help = "Payload bytes (default 64)")]
    size: Option<u32>,
    #[arg(short, long, help = "Warm-up iterations (default 10 000)")]
    warmup: Option<u32>,
    #[arg(long, help = "Timing windows per path (default 100)")]
    batches: Option<u32>,
}

impl Cli {
    fn settings(&self) -> Result<BenchSettings> {
        let mut settings = match &self.config {
            Some(path) => BenchSettings::load(path)?,
            None => BenchSettings::default(),
        };
        if let Some(rounds) = self.rounds {
            settings.rounds = rounds;
        }
        if let Some(size) = self.size {
            settings.size = size;
        }
        if let Some(warmup) = self.warmup {
            settings.warmup = warmup;
        }
        if let Some(batches) = self.batches {
            settings.batches = batches;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let settings = cli.settings().context("invalid benchmark settings")?;

    tracing::info!("Word benchmark v{} started", word_core::VERSION);
    tracing::debug!(?settings, "resolved settings");

    let runtime = ScriptRuntime::new().context("failed to start script runtime")?;
    let report = bench::run(&runtime, &settings).context("benchmark failed")?;
    report.log();

    Ok(())
}
