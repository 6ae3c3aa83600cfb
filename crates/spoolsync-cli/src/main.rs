//! SpoolSync - cloud profile sync for slicer configuration directories
//!
//! Keeps the filament and printer profiles managed in the cloud datastore
//! reconciled against a local OrcaSlicer-style configuration directory,
//! writing one vendor-format JSON file per profile.

mod source;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use source::ExportFile;
use spoolsync_config::{Config, ConfigLoader, JsonPreferenceStore, LoggingConfig};
use spoolsync_engine::{subscription, SyncOrchestrator, SyncSummary};
use spoolsync_sync::{LocalFileSystem, Reconciler};
use spoolsync_types::ProfileCategory;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// SpoolSync - cloud profile sync for slicer configuration directories
#[derive(Parser)]
#[command(
    name = "spoolsync",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sync cloud filament and printer profiles into your slicer",
    long_about = "SpoolSync reconciles the profiles held in your cloud workspace against\n\
                  a local slicer configuration directory, creating, updating, and\n\
                  removing its own profile files while never touching anyone else's."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a profile export against the slicer directory once
    Sync {
        /// Profile export file (JSON object with "filaments" and "printers")
        profiles: PathBuf,
    },
    /// Watch a profile export and reconcile automatically on change
    Watch {
        /// Profile export file to watch
        profiles: PathBuf,
        /// Poll interval in seconds
        #[arg(long, default_value = "2")]
        interval: u64,
    },
    /// Show sync state and the owned files currently on disk
    Status,
    /// Set the slicer configuration directory
    SetDir {
        /// Base directory of the slicer configuration tree
        path: PathBuf,
    },
    /// Turn automatic background sync on or off
    AutoSync {
        /// Desired mode
        mode: Toggle,
    },
    /// Write a starter profile export with one default record per category
    InitExport {
        /// Destination export file
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Toggle {
    /// Enable
    On,
    /// Disable
    Off,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load_default()?,
    };

    init_logging(cli.debug, cli.quiet, &config.logging);
    info!("SpoolSync v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Sync { profiles } => sync_command(&config, profiles).await?,
        Commands::Watch { profiles, interval } => {
            watch_command(&config, profiles, interval).await?;
        }
        Commands::Status => status_command(&config).await?,
        Commands::SetDir { path } => set_dir_command(&config, path).await?,
        Commands::AutoSync { mode } => auto_sync_command(&config, mode).await?,
        Commands::InitExport { path } => init_export_command(&path)?,
    }

    Ok(())
}

fn init_logging(debug: bool, quiet: bool, logging: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if debug {
        "debug"
    } else if quiet {
        "error"
    } else {
        logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_ansi(logging.colored_output)
        .with_target(false)
        .init();
}

async fn build_orchestrator(config: &Config) -> Result<SyncOrchestrator> {
    let prefs = Arc::new(JsonPreferenceStore::open(preferences_path()).await?);
    let orchestrator =
        SyncOrchestrator::new(config, Arc::new(LocalFileSystem::new()), prefs).await?;
    Ok(orchestrator)
}

async fn sync_command(config: &Config, profiles: PathBuf) -> Result<()> {
    let export = ExportFile::new(profiles).load()?;
    let mut orchestrator = build_orchestrator(config).await?;

    println!(
        "{} Syncing {} filament and {} printer profiles",
        style("⟲").blue().bold(),
        style(export.filaments.len()).cyan(),
        style(export.printers.len()).cyan()
    );

    orchestrator.on_filament_snapshot(export.filaments);
    orchestrator.on_machine_snapshot(export.printers);
    let summary = orchestrator.sync_now().await?;
    print_summary(&summary);
    Ok(())
}

async fn watch_command(config: &Config, profiles: PathBuf, interval: u64) -> Result<()> {
    let mut orchestrator = build_orchestrator(config).await?;
    if !orchestrator.state().enabled {
        println!(
            "{} Automatic sync is disabled; run {} first",
            style("ℹ").yellow(),
            style("spoolsync auto-sync on").cyan()
        );
        return Ok(());
    }

    let export_file = ExportFile::new(&profiles);
    let (filaments_tx, filaments) = subscription::channel();
    let (machines_tx, machines) = subscription::channel();

    // Poll the export file and publish a full replacement snapshot on
    // every modification
    let poller = tokio::spawn(async move {
        let mut last_modified = None;
        let mut ticker = tokio::time::interval(Duration::from_secs(interval.max(1)));
        loop {
            ticker.tick().await;
            let modified = match export_file.modified() {
                Ok(modified) => modified,
                Err(error) => {
                    warn!(%error, "profile export unavailable");
                    continue;
                }
            };
            if last_modified == Some(modified) {
                continue;
            }
            match export_file.load() {
                Ok(export) => {
                    last_modified = Some(modified);
                    if !filaments_tx.publish(export.filaments)
                        || !machines_tx.publish(export.printers)
                    {
                        break;
                    }
                }
                Err(error) => warn!(%error, "ignoring unreadable profile export"),
            }
        }
    });

    println!(
        "{} Watching {} (Ctrl-C to stop)",
        style("→").green().bold(),
        style(profiles.display()).cyan()
    );

    tokio::select! {
        result = orchestrator.run(filaments, machines) => result?,
        _ = tokio::signal::ctrl_c() => info!("interrupted, stopping watch"),
    }
    poller.abort();
    Ok(())
}

async fn status_command(config: &Config) -> Result<()> {
    let orchestrator = build_orchestrator(config).await?;
    let state = orchestrator.state();
    let fs = Arc::new(LocalFileSystem::new());

    println!("{}", style("Sync Status:").bold().underlined());
    println!(
        "  Auto sync: {}",
        if state.enabled {
            style("enabled").green()
        } else {
            style("disabled").yellow()
        }
    );
    match state.last_sync {
        Some(timestamp) => println!(
            "  Last sync: {}",
            style(timestamp.format("%Y-%m-%d %H:%M:%S UTC")).cyan()
        ),
        None => println!("  Last sync: {}", style("never").yellow()),
    }

    let Some(base) = state.effective_base_dir(fs.as_ref()) else {
        println!("  Slicer directory: {}", style("not configured").yellow());
        return Ok(());
    };
    println!("  Slicer directory: {}", style(base.display()).cyan());

    let reconciler = Reconciler::new(fs);
    for category in [ProfileCategory::Filament, ProfileCategory::Machine] {
        match reconciler.list_owned(&base, category).await {
            Ok(files) => {
                println!("  Owned {} profiles: {}", category, style(files.len()).green());
                for file in files {
                    println!("    {file}");
                }
            }
            Err(error) => println!(
                "  Owned {} profiles: {}",
                category,
                style(format!("unavailable ({error})")).red()
            ),
        }
    }
    Ok(())
}

async fn set_dir_command(config: &Config, path: PathBuf) -> Result<()> {
    let mut orchestrator = build_orchestrator(config).await?;
    orchestrator.set_base_dir(Some(path.clone())).await?;
    println!(
        "{} Slicer directory set to {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
    Ok(())
}

async fn auto_sync_command(config: &Config, mode: Toggle) -> Result<()> {
    let mut orchestrator = build_orchestrator(config).await?;
    let enabled = matches!(mode, Toggle::On);
    orchestrator.set_enabled(enabled).await?;
    println!(
        "{} Automatic sync {}",
        style("✓").green(),
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}

fn init_export_command(path: &std::path::Path) -> Result<()> {
    let export = source::ProfileExport::starter();
    std::fs::write(path, export.to_json_pretty()?)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    println!(
        "{} Wrote starter export to {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
    Ok(())
}

fn print_summary(summary: &SyncSummary) {
    println!("  Files written: {}", style(summary.total_written()).green());
    println!("  Orphans deleted: {}", style(summary.total_deleted()).green());
    if let Some(report) = &summary.machine {
        if report.was_skipped() {
            println!(
                "{} Machine directory missing, printer profiles skipped this pass",
                style("ℹ").yellow()
            );
        }
    }
    if summary.is_clean() {
        println!("{} Sync completed", style("✓").green());
    } else {
        println!(
            "{} Sync completed with file errors, see log output",
            style("⚠").red()
        );
    }
}

/// Location of the durable preference file
fn preferences_path() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spoolsync")
        .join("preferences.json")
}

// Cross-platform config directory detection
fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA").ok().map(PathBuf::from)
    }
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join("Library")
                .join("Application Support")
        })
    }
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        None
    }
}
