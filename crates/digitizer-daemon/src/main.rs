//! HID digitizer service entry point.
//!
//! Opens the HID gadget nodes, resets the device, and serves commands from the
//! serial gadget port until SIGINT or SIGTERM.
//!
//! # Usage
//!
//! ```text
//! hid-digitizer [OPTIONS] [COMMAND]
//!
//! Commands:
//!   run           Serve commands (default)
//!   descriptor    Print the HID report descriptor as hex
//!   print-config  Print the effective configuration as TOML
//!
//! Options:
//!   --config <PATH>           Config file [default: /etc/hid-digitizer/config.toml]
//!   --pointer-device <PATH>   Gadget node for pointer reports
//!   --consumer-device <PATH>  Gadget node for media-key reports
//!   --serial-port <PATH>      Serial port carrying the commands
//!   --baud-rate <BAUD>        Serial baud rate
//!   --hold-ms <MS>            Press-to-release delay for CLICK and MEDIA_*
//!   --log-level <LEVEL>       error | warn | info | debug | trace
//! ```
//!
//! # Precedence
//!
//! Command-line flag, then environment variable, then config file, then the
//! built-in default.  `RUST_LOG` overrides the log level entirely.
//!
//! | Variable                  | Flag                |
//! |---------------------------|---------------------|
//! | `HID_DIGITIZER_CONFIG`    | `--config`          |
//! | `HID_DIGITIZER_POINTER`   | `--pointer-device`  |
//! | `HID_DIGITIZER_CONSUMER`  | `--consumer-device` |
//! | `HID_DIGITIZER_SERIAL`    | `--serial-port`     |
//! | `HID_DIGITIZER_BAUD`      | `--baud-rate`       |
//! | `HID_DIGITIZER_HOLD_MS`   | `--hold-ms`         |
//! | `HID_DIGITIZER_LOG_LEVEL` | `--log-level`       |

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use digitizer_core::report::descriptor::{to_hex, REPORT_DESCRIPTOR};
use digitizer_daemon::application::process_command::{CommandProcessor, ProcessorSettings};
use digitizer_daemon::infrastructure::hid_gadget::open_device_writer;
use digitizer_daemon::infrastructure::serial::{SerialSettings, SerialSupervisor};
use digitizer_daemon::infrastructure::storage::config::{
    load_config, AppConfig, DEFAULT_CONFIG_PATH,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Serial-to-USB-HID digitizer.
#[derive(Debug, Parser)]
#[command(
    name = "hid-digitizer",
    about = "Translate serial text commands into USB HID pointer and media-key reports",
    version
)]
struct Cli {
    /// Path of the TOML configuration file.  A missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH, env = "HID_DIGITIZER_CONFIG")]
    config: PathBuf,

    /// Gadget node for Report ID 1 (pointer).
    #[arg(long, env = "HID_DIGITIZER_POINTER")]
    pointer_device: Option<PathBuf>,

    /// Gadget node for Report ID 2 (consumer control).  May equal the pointer node.
    #[arg(long, env = "HID_DIGITIZER_CONSUMER")]
    consumer_device: Option<PathBuf>,

    /// Serial port the host sends commands on.
    #[arg(long, env = "HID_DIGITIZER_SERIAL")]
    serial_port: Option<PathBuf>,

    #[arg(long, env = "HID_DIGITIZER_BAUD")]
    baud_rate: Option<u32>,

    /// Press-to-release delay for CLICK and MEDIA_* in milliseconds.
    #[arg(long, env = "HID_DIGITIZER_HOLD_MS")]
    hold_ms: Option<u64>,

    #[arg(long, env = "HID_DIGITIZER_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Command {
    /// Serve commands from the serial port (default).
    Run,
    /// Print the HID report descriptor the gadget must be provisioned with.
    Descriptor,
    /// Print the effective configuration as TOML.
    PrintConfig,
}

impl Cli {
    /// Loads the config file and applies the flag / environment overrides.
    fn into_app_config(self) -> anyhow::Result<(AppConfig, Command)> {
        let mut config = load_config(&self.config)
            .with_context(|| format!("loading config from {}", self.config.display()))?;

        if let Some(path) = self.pointer_device {
            config.devices.pointer_path = path;
        }
        if let Some(path) = self.consumer_device {
            config.devices.consumer_path = path;
        }
        if let Some(path) = self.serial_port {
            config.devices.serial_path = path;
        }
        if let Some(baud) = self.baud_rate {
            config.devices.baud_rate = baud;
        }
        if let Some(hold_ms) = self.hold_ms {
            config.timing.hold_ms = hold_ms;
        }
        if let Some(level) = self.log_level {
            config.service.log_level = level;
        }
        config.validate().context("invalid configuration")?;

        Ok((config, self.command.unwrap_or(Command::Run)))
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Single-threaded runtime: commands run strictly one after another.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let (config, command) = Cli::parse().into_app_config()?;

    match command {
        Command::Descriptor => {
            println!("{}", to_hex(REPORT_DESCRIPTOR));
            Ok(())
        }
        Command::PrintConfig => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        Command::Run => {
            init_tracing(&config.service.log_level);
            serve(config).await
        }
    }
}

/// `RUST_LOG` wins; otherwise the configured level.
fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    info!(
        pointer = %config.devices.pointer_path.display(),
        consumer = %config.devices.consumer_path.display(),
        serial = %config.devices.serial_path.display(),
        hold_ms = config.timing.hold_ms,
        "HID digitizer starting"
    );

    let writer = open_device_writer(&config.devices)
        .await
        .context("opening HID gadget nodes")?;
    let mut processor = CommandProcessor::new(
        writer,
        ProcessorSettings {
            hold: config.timing.hold(),
            initial_position: config.pointer.initial_position,
        },
    );

    // The host may not have enumerated the gadget yet; commands can still succeed later.
    if config.pointer.reset_on_start {
        if let Err(e) = processor.reset().await {
            warn!("initial device reset failed: {e}");
        }
    }

    // ── Shutdown signal ───────────────────────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_termination().await;
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    // ── Serial sessions ───────────────────────────────────────────────────────
    let mut supervisor = SerialSupervisor::new(
        SerialSettings {
            path: config.devices.serial_path.clone(),
            baud_rate: config.devices.baud_rate,
            reconnect_delay: config.timing.reconnect_delay(),
        },
        shutdown_rx,
    );
    supervisor.run(&mut processor).await;

    if config.pointer.reset_on_shutdown {
        if let Err(e) = processor.reset().await {
            error!("device reset on shutdown failed: {e}");
        }
    }

    info!("HID digitizer stopped");
    Ok(())
}

/// Resolves on SIGINT, or on SIGTERM where available.
async fn wait_for_termination() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
                return;
            }
            Err(e) => warn!("failed to install SIGTERM handler: {e}"),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for Ctrl+C signal: {e}");
        std::future::pending::<()>().await;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
