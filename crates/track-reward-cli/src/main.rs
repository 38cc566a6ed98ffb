//! track-reward: score one telemetry snapshot
//!
//! Reads a snapshot as JSON (simulator parameter names) from a file or stdin,
//! runs the reward composer and prints the reward with its decomposition.
//!
//! Usage: `track-reward [--describe] [--compact] [SNAPSHOT_PATH | -]`

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use track_reward_core::{
    RewardComponentDef, RewardComposer, RewardConfig, RewardFunction, TelemetrySnapshot,
};

/// Where the snapshot comes from
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    describe: bool,
    compact: bool,
    source: Source,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Options> {
    let mut options = Options {
        describe: false,
        compact: false,
        source: Source::Stdin,
    };
    let mut path_seen = false;

    for arg in args {
        match arg.as_str() {
            "--describe" => options.describe = true,
            "--compact" => options.compact = true,
            flag if flag.starts_with("--") => bail!("Unknown flag: {}", flag),
            path => {
                if path_seen {
                    bail!("Only one snapshot path may be given");
                }
                path_seen = true;
                options.source = match path {
                    "-" => Source::Stdin,
                    _ => Source::File(PathBuf::from(path)),
                };
            }
        }
    }
    Ok(options)
}

/// Scored snapshot as printed on stdout
#[derive(Debug, Serialize)]
struct ScoreReport {
    reward: f64,
    components: BTreeMap<String, f64>,
}

/// Component definitions and effective thresholds
#[derive(Debug, Serialize)]
struct Description<'a> {
    components: Vec<RewardComponentDef>,
    config: &'a RewardConfig,
}

async fn read_snapshot<R: AsyncRead + Unpin>(mut reader: R) -> Result<TelemetrySnapshot> {
    let mut json = String::new();
    reader
        .read_to_string(&mut json)
        .await
        .context("Failed to read snapshot")?;
    let snapshot = TelemetrySnapshot::from_json(&json).context("Invalid telemetry snapshot")?;
    Ok(snapshot)
}

async fn load_snapshot(source: &Source) -> Result<TelemetrySnapshot> {
    match source {
        Source::Stdin => read_snapshot(tokio::io::stdin()).await,
        Source::File(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            read_snapshot(file).await
        }
    }
}

fn score(composer: &RewardComposer, snapshot: &TelemetrySnapshot) -> Result<ScoreReport> {
    let reward = composer
        .compute(snapshot)
        .context("Snapshot violates the reward contract")?;
    Ok(ScoreReport {
        reward: reward.value,
        components: reward.components.into_iter().collect(),
    })
}

fn render<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

async fn write_stdout(text: &str) -> Result<()> {
    let mut out = tokio::io::stdout();
    out.write_all(text.as_bytes())
        .await
        .context("Failed to write stdout")?;
    out.write_all(b"\n").await.context("Failed to write newline")?;
    out.flush().await.context("Failed to flush stdout")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = parse_args(std::env::args().skip(1))?;
    let composer = RewardComposer::default();

    if options.describe {
        let description = Description {
            components: composer.components(),
            config: composer.config(),
        };
        write_stdout(&render(&description, options.compact)?).await?;
        return Ok(());
    }

    debug!("Reading snapshot from {:?}", options.source);
    let snapshot = load_snapshot(&options.source).await?;
    let report = score(&composer, &snapshot)?;
    info!(
        steps = snapshot.steps,
        progress = snapshot.progress,
        reward = report.reward,
        "Scored snapshot"
    );

    write_stdout(&render(&report, options.compact)?).await?;
    Ok(())
}
