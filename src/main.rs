use anyhow::{Context, Result};
use clap::Parser;
use stagelens::app::cli::Args;
use stagelens::app::config::{AppPaths, LensConfig};
use stagelens::app::events::LensEvent;
use stagelens::app::inputs::commands::{parse_command, Command};
use stagelens::app::lyrics::{self, LyricCue};
use stagelens::host::{
    FileStore, HeadlessCamera, HeadlessScene, HostBindings, MockDetector, RecordingStrings,
};
use stagelens::Lens;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Log to a daily-rolling file so stdout stays a clean JSON event stream.
/// Filter comes from `STAGELENS_LOG`, defaulting to `info`.
fn init_logging() -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(AppPaths::get_log_dir(), "stagelens.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter =
        EnvFilter::try_from_env("STAGELENS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

fn load_cues(config: &LensConfig) -> Vec<LyricCue> {
    let Some(path) = &config.lyrics.lrc_path else {
        return lyrics::sample_cues();
    };
    match lyrics::load_lrc_file(Path::new(path), config.lyrics.display_duration_ms) {
        Ok(cues) if !cues.is_empty() => cues,
        Ok(_) => {
            warn!(path = %path, "LRC file has no timed lines, using built-in captions");
            lyrics::sample_cues()
        }
        Err(e) => {
            warn!(path = %path, error = %e, "could not read LRC file, using built-in captions");
            lyrics::sample_cues()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    let args = Args::parse();

    if args.generate_config {
        println!("{}", LensConfig::default().to_toml()?);
        return Ok(());
    }

    let _log_guard = init_logging();

    // 1. Config (CLI overrides win)
    let config_path = args.config.clone().unwrap_or_else(AppPaths::get_config_path);
    let mut config = LensConfig::load(&config_path);
    if let Some(confidence) = args.mock_confidence {
        config.detection.mock_confidence = confidence.clamp(0.0, 1.0);
    }
    info!(path = %config_path.display(), "🎤 stagelens starting");

    // 2. Headless host
    let state_dir = args.state_dir.clone().unwrap_or_else(AppPaths::get_state_dir);
    let scene = Arc::new(HeadlessScene::with_lens_nodes(config.transition.viewport_width));
    let store = FileStore::new(state_dir);
    info!(dir = %store.dir().display(), "settings store");
    let hosts = HostBindings {
        scene: scene.clone(),
        camera: Arc::new(HeadlessCamera::new(config.camera.default_fov)),
        strings: Arc::new(RecordingStrings::new()),
        store: Arc::new(store),
        detector: Arc::new(MockDetector::new(config.detection.mock_confidence)),
    };
    let cues = load_cues(&config);

    let (tx, rx) = mpsc::channel(100);
    let lens = Lens::new(config, hosts, cues, tx.clone()).context("lens initialization failed")?;

    // 3. Notification printer: one JSON object per line
    let mut notes = lens.subscribe();
    tokio::spawn(async move {
        loop {
            match notes.recv().await {
                Ok(note) => match serde_json::to_string(&note) {
                    Ok(line) => println!("{}", line),
                    Err(e) => warn!(error = %e, "could not encode notification"),
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "notification printer lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // 4. Stdin commands. End of input quits.
    let input_tx = tx.clone();
    let screen = lens.watch_screen();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let origin = *screen.borrow();
            match parse_command(&line, scene.as_ref(), origin) {
                Ok(Some(Command::Event(event))) => {
                    if input_tx.send(event).await.is_err() {
                        return;
                    }
                }
                Ok(Some(Command::Wait(pause))) => tokio::time::sleep(pause).await,
                Ok(None) => {}
                Err(e) => eprintln!("⚠️ {}", e),
            }
        }
        let _ = input_tx.send(LensEvent::Quit).await;
    });
    drop(tx);

    lens.start_settings_load();
    lens.run(rx).await;
    info!("stagelens stopped");
    Ok(())
}
