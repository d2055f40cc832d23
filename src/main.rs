//! lazywire - Lazy Service Registry
//!
//! Command-line entry point: validates configuration and runs the wiring demo.

mod cli;
mod demo;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lazywire_config::{ConfigLoader, ConfigValidator, LoggingConfig, ValidationResult};

use cli::{Cli, Commands};

/// Initialize tracing with console output and, when configured, a daily
/// rolling log file.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = match &logging.log_dir {
        Some(dir) => {
            let log_dir = PathBuf::from(ConfigLoader::expand_path(dir));
            std::fs::create_dir_all(&log_dir)?;

            let mut builder = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("lazywire")
                .filename_suffix("log");
            if logging.max_log_files > 0 {
                builder = builder.max_log_files(logging.max_log_files);
            }
            let file_appender = builder.build(&log_dir)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            // Keeps the background writer alive until exit
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(logging.ansi)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(ConfigLoader::default_path);
    let config = ConfigLoader::load_or_default(&config_path)?;

    init_tracing(&config.logging)?;

    match cli.command.unwrap_or(Commands::Demo { ordering: None }) {
        Commands::Check => run_check(&config_path),
        Commands::Demo { ordering } => {
            ensure_valid(&config_path, &ConfigValidator::validate(&config))?;
            let mut settings = config.registry.clone();
            if let Some(ordering) = ordering {
                settings = settings.with_ordering(ordering.into());
            }
            run_demo(settings)
        }
    }
}

/// Validate the configuration file, printing every problem found.
fn run_check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load(path)?;
    let result = ConfigValidator::validate(&config);

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }

    ensure_valid(path, &result)?;
    println!("{}: ok", path.display());
    Ok(())
}

/// Log validation findings and fail if any of them is an error.
fn ensure_valid(path: &Path, result: &ValidationResult) -> Result<(), Box<dyn std::error::Error>> {
    for warning in &result.warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        error!("{}: {}", error.path, error.message);
    }

    if !result.is_valid() {
        return Err(format!(
            "{} has {} error(s)",
            path.display(),
            result.errors.len()
        )
        .into());
    }
    Ok(())
}

/// Wire the sample graph and print the walk.
fn run_demo(settings: lazywire_core::RegistrySettings) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting lazywire demo v{}", env!("CARGO_PKG_VERSION"));
    info!("Ordering policy: {:?}", settings.ordering);

    let steps = demo::run(settings)?;
    for (position, step) in steps.iter().enumerate() {
        let origin = if step.constructed { "constructed" } else { "cached" };
        println!("{:>2}. {:<12} {:<12} {}", position, step.id, origin, step.summary);
    }
    Ok(())
}
