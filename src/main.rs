//! kadi-gestures - replay recorded interactions through the gesture recognizer
//!
//! Prints the resulting gesture tallies as JSON, the same counters the
//! KadiBoss gesture demo screen displays.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kadi_gestures::{GestureCallbacks, InteractionScript, RecognizerConfig, SurfaceHost};

#[derive(Parser, Debug)]
#[command(name = "kadi-gestures")]
#[command(about = "Touch gesture recognizer for the KadiBoss point-of-sale app", long_about = None)]
struct Args {
    /// Enable verbose debug output
    #[arg(short, long)]
    debug: bool,

    /// Gesture config file (defaults to ~/.config/kadi-gestures/gestures.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON interaction script and print gesture counts
    Replay {
        script: PathBuf,

        /// Wait out real time on an event loop instead of a virtual clock
        #[arg(long)]
        realtime: bool,
    },

    /// Print the effective configuration
    Config,
}

fn log_dir() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".local/state")))
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
        .join("kadi-gestures")
}

fn main() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir).ok();

    let crash_log = log_dir.join("crash.log");
    std::panic::set_hook(Box::new(move |panic_info| {
        eprintln!("PANIC: {}", panic_info);
        if let Ok(mut f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&crash_log)
        {
            use std::io::Write;
            let _ = writeln!(f, "[{}] PANIC: {}", chrono::Local::now(), panic_info);
        }
    }));

    let args = Args::parse();

    let file_appender = rolling::daily(&log_dir, "gestures.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let default_filter = if args.debug {
        "debug,kadi_gestures=debug"
    } else {
        "warn,kadi_gestures=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    let config = match &args.config {
        Some(path) => RecognizerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RecognizerConfig::load_or_default(),
    };

    match args.command {
        Command::Replay { script, realtime } => {
            let script = InteractionScript::load(&script)
                .with_context(|| format!("failed to load script {}", script.display()))?;
            info!(events = script.events.len(), realtime, "Replaying interaction script");

            let mut host = SurfaceHost::new(config, GestureCallbacks::new());
            let emitted = if realtime {
                host.replay_realtime(&script).context("real-time replay failed")?
            } else {
                host.replay(&script)
            };
            info!(gestures = emitted.len(), "Replay finished");

            println!("{}", serde_json::to_string_pretty(host.stats())?);
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}
