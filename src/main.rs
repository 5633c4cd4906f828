use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use ringmask::analysis::ChannelSink;
use ringmask::config::{ConfigError, SessionConfig};
use ringmask::consts::{DEFAULT_DEBOUNCE_MS, DEFAULT_RUN_QUEUE_CAPACITY};
use ringmask::replay::{self, ReplayError, Script};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to open script {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to encode run request: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("run request printer failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Parser, Debug)]
#[command(name = "ringmask", about = "Replay FFT mask handle gestures and print the resulting run requests")]
struct Cli {
    /// Replay script (JSON). Reads stdin when omitted or `-`.
    script: Option<PathBuf>,

    /// Debounce window in milliseconds.
    #[arg(long, env = "RINGMASK_DEBOUNCE_MS")]
    debounce_ms: Option<u64>,

    /// Run-request queue capacity.
    #[arg(long, env = "RINGMASK_RUN_QUEUE_CAPACITY")]
    queue_capacity: Option<usize>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let cli = Cli::parse();

    let config = SessionConfig::new(
        cli.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS),
        cli.queue_capacity.unwrap_or(DEFAULT_RUN_QUEUE_CAPACITY),
    )?;

    let script = match cli.script.as_deref() {
        None => Script::from_reader(io::stdin().lock())?,
        Some(path) if path.as_os_str() == "-" => Script::from_reader(io::stdin().lock())?,
        Some(path) => {
            let file = File::open(path).map_err(|source| CliError::Open { path: path.to_path_buf(), source })?;
            Script::from_reader(BufReader::new(file))?
        }
    };

    let (sink, mut rx) = ChannelSink::new(config.run_queue_capacity);
    let printer = tokio::spawn(async move {
        let mut printed = 0_usize;
        while let Some(run) = rx.recv().await {
            println!("{}", serde_json::to_string(&run)?);
            printed += 1;
        }
        Ok::<_, serde_json::Error>(printed)
    });

    let outcome = replay::replay(&script, &config, Arc::new(sink)).await?;
    let printed = printer.await??;

    tracing::info!(
        analysis_id = %outcome.analysis_id,
        printed,
        ring_in = outcome.shapes.ring.rad_in,
        ring_out = outcome.shapes.ring.rad_out,
        disk_radius = outcome.shapes.disk.radius,
        "done"
    );
    Ok(())
}
