//! Horizon Replay - Main entry point
//!
//! Replays a JSONL recording of orientation-bearing messages through an
//! attitude panel, rendering the indicators to the terminal.

mod config;
mod recording;
mod render;

use anyhow::Result;
use clap::Parser;
use horizon_core::PanelState;
use horizon_panel::{AttitudePanel, MessageFrame, PanelHost};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "horizon-replay")]
#[command(about = "Replay a recorded message log through an attitude panel")]
#[command(version)]
struct Args {
    /// Path to a JSONL recording of {topic, schema, message} frames
    recording: PathBuf,

    /// Path to configuration file
    #[arg(short, long, default_value = "horizon.toml")]
    config: PathBuf,

    /// Override frames-per-second delivery rate
    #[arg(short, long)]
    rate: Option<f64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,
}

/// Host implementation backed by a state file on disk.
struct FileHost {
    state_path: PathBuf,
}

impl PanelHost for FileHost {
    fn set_subscriptions(&mut self, topics: Vec<String>) {
        info!(count = topics.len(), "Subscription set updated");
    }

    fn save_state(&mut self, state: &PanelState) {
        let content = match serde_json::to_string_pretty(state) {
            Ok(content) => content,
            Err(e) => {
                warn!(error = %e, "Failed to serialize panel state");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.state_path, content) {
            warn!(path = %self.state_path.display(), error = %e, "Failed to save panel state");
        }
    }
}

/// Load persisted panel state, tolerating a missing or unreadable file.
fn load_state(path: &Path) -> Option<serde_json::Value> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(value) => {
            info!(path = %path.display(), "Loaded persisted panel state");
            Some(value)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unparseable panel state");
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Horizon Replay v{}", env!("CARGO_PKG_VERSION"));

    let mut config = config::load_config(&args.config)?;
    if let Some(rate) = args.rate {
        config.replay.rate_hz = rate;
    }

    let frames = recording::read_recording(&args.recording)?;
    let catalog = recording::catalog_of(&frames);
    info!(
        frames = frames.len(),
        topics = catalog.len(),
        "Loaded recording"
    );

    let state_path = PathBuf::from(&config.replay.state_path);
    let persisted = load_state(&state_path);
    let mut panel = AttitudePanel::new(persisted.as_ref());
    panel.update_catalog(&catalog);

    let mut host = FileHost { state_path };

    // Enable topics the persisted state has never seen; configured topics
    // keep their saved enablement.
    let unseen: Vec<String> = panel
        .catalog()
        .iter()
        .filter(|topic| !panel.state().topics.contains_key(&topic.name))
        .map(|topic| topic.name.clone())
        .collect();
    for topic in &unseen {
        panel.set_topic_enabled(topic, true, &mut host);
    }
    panel.sync_subscriptions(&mut host);

    let mut renderer = render::TermRenderer::new(!args.no_color);
    let period = Duration::from_secs_f64(1.0 / config.replay.rate_hz.max(0.1));
    let batch_size = config.replay.batch_size.max(1);

    for batch in frames.chunks(batch_size) {
        let batch: Vec<MessageFrame> = batch
            .iter()
            .map(|frame| MessageFrame::new(frame.topic.clone(), frame.message.clone()))
            .collect();
        panel.deliver(&batch, Instant::now(), &mut renderer, || {});
        tokio::time::sleep(period).await;
    }

    panel.teardown(&mut host, &mut renderer);
    info!("Replay finished");

    Ok(())
}
