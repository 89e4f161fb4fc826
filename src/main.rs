//! pager-settings - manage per content type pager settings
//!
//! Shows, validates and applies the pager settings held in the settings
//! store, prints the settings form definition, and can watch the store for
//! changes made by other writers.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio_stream::StreamExt;

use tracing::{error, info, warn};
use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

use pager_settings::{
    config::ConfigManager,
    form::SettingsForm,
    settings::{validate_submission, FormValues, Submission},
    store::SettingsWatcher,
    Config, FileStore, SettingsError, SettingsService, StaticRegistry,
};

/// CLI arguments for pager-settings
#[derive(Parser, Debug)]
#[command(name = "pager-settings")]
#[command(about = "Manage next/previous pager settings per content type")]
#[command(version)]
#[command(long_about = "
Manage next/previous pager settings per content type.

Configuration priority (highest to lowest):
1. Command-line arguments
2. Configuration file
3. Environment variables
4. Built-in defaults

Environment variables:
  PAGER_SETTINGS_STORE_PATH     - Settings store file
  PAGER_SETTINGS_LOG_LEVEL      - Log level (trace, debug, info, warn, error)
  PAGER_SETTINGS_CONTENT_TYPES  - Content types, e.g. article:Article,page:Basic page
")]
pub struct CliArgs {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "pager-settings.toml",
        help = "Path to configuration file"
    )]
    pub config: PathBuf,

    /// Settings store file (overrides config file)
    #[arg(short, long, help = "Settings store file")]
    pub store: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, help = "Log level")]
    pub log_level: Option<String>,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the stored settings for every configured content type
    Show {
        #[arg(long, value_enum, default_value_t = OutputFormat::Toml)]
        format: OutputFormat,
    },
    /// Print the settings form definition
    Form {
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Validate a submission of form values and save it
    Apply {
        /// Form values as TOML or JSON (by extension)
        submission: PathBuf,
    },
    /// Validate a submission of form values without saving it
    Validate { submission: PathBuf },
    /// List stored settings of content types that are no longer configured
    Orphans,
    /// Watch the settings store and log every change until interrupted
    Watch,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Toml,
    Json,
    Yaml,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Initialize tracing
    let log_filter = init_tracing(&args)?;

    // Load configuration with priority: CLI args > config file > environment > defaults
    let mut config = if args.config.exists() {
        ConfigManager::load_from_file(&args.config)?
    } else {
        info!("Config file not found, checking environment variables");
        ConfigManager::load_from_env()?
    };

    config.merge_with_cli_args(args.store.as_deref(), args.log_level.as_deref());
    config
        .validate()
        .context("Final configuration validation failed")?;

    // RUST_LOG and --verbose win over the configured level
    if !args.verbose && std::env::var_os("RUST_LOG").is_none() {
        log_filter
            .reload(EnvFilter::new(&config.logging.level))
            .context("Failed to apply configured log level")?;
    }

    info!(
        "pager-settings v{}: store {}, {} content types",
        env!("CARGO_PKG_VERSION"),
        config.store.path.display(),
        config.content_types.len()
    );
    if config.content_types.is_empty() {
        warn!("No content types configured, only global settings are available");
    }

    let service = SettingsService::new(config.registry(), config.file_store());

    match args.command {
        Command::Show { format } => {
            let settings = service.load_settings()?;
            print_as(&settings, format)?;
        }
        Command::Form { format } => {
            let form = SettingsForm::new(service);
            print_as(&form.definition()?, format)?;
        }
        Command::Apply { submission } => {
            let submission = read_submission(&service, &submission)?;
            let mut form = SettingsForm::new(service);
            match form.submit(submission) {
                Ok(()) => info!("Pager settings saved to {}", config.store.path.display()),
                Err(e) => return Err(report(e)),
            }
        }
        Command::Validate { submission } => {
            let submission = read_submission(&service, &submission)?;
            match validate_submission(&submission) {
                Ok(settings) => info!(
                    "Submission is valid: pager enabled on {} of {} content types",
                    settings.enabled_content_types().count(),
                    settings.content_types.len()
                ),
                Err(e) => return Err(report(e.into())),
            }
        }
        Command::Orphans => {
            for id in service.orphaned_content_types()? {
                println!("{}", id);
            }
        }
        Command::Watch => watch(service, &config).await?,
    }

    Ok(())
}

/// Read posted form values from a TOML or JSON file
fn read_submission(
    service: &SettingsService<StaticRegistry, FileStore>,
    path: &Path,
) -> Result<Submission> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read submission: {}", path.display()))?;

    let values: FormValues = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse submission: {}", path.display()))?,
        _ => toml::from_str(&content)
            .with_context(|| format!("Failed to parse submission: {}", path.display()))?,
    };

    let content_types = service.content_types()?;
    Submission::from_form_values(&values, &content_types).map_err(|e| report(e.into()))
}

/// Log each rejected field and turn the failure into the process error
fn report(err: SettingsError) -> anyhow::Error {
    if let Some(validation) = err.validation() {
        for violation in &validation.violations {
            error!("{}", violation);
        }
        return anyhow!("Submission rejected, nothing was saved");
    }
    anyhow::Error::new(err)
}

fn print_as<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    let output = match format {
        OutputFormat::Toml => toml::to_string_pretty(value).context("Failed to render TOML")?,
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to render JSON")?
        }
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to render YAML")?,
    };
    println!("{}", output);
    Ok(())
}

async fn watch(service: SettingsService<StaticRegistry, FileStore>, config: &Config) -> Result<()> {
    let watcher = SettingsWatcher::new(service, config.watch.debounce)?;
    let mut changes = watcher.subscribe();

    let settings = watcher.get_settings().await;
    info!(
        "Watching {} (debounce {}): pager enabled on {} content types. Press Ctrl+C to stop",
        watcher.path().display(),
        humantime::format_duration(config.watch.debounce),
        settings.enabled_content_types().count()
    );

    loop {
        tokio::select! {
            change = changes.next() => match change {
                Some(Ok(event)) => {
                    let enabled: Vec<_> = event
                        .settings
                        .enabled_content_types()
                        .map(|id| id.to_string())
                        .collect();
                    info!(
                        "Settings changed: previous \"{}\", next \"{}\", enabled on [{}]",
                        event.settings.global.previous_text,
                        event.settings.global.next_text,
                        enabled.join(", ")
                    );
                }
                Some(Err(e)) => warn!("Missed settings changes: {}", e),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping settings watcher");
                break;
            }
        }
    }

    Ok(())
}

/// Initialize tracing/logging
///
/// The returned handle swaps the filter once the configured level is known.
fn init_tracing(args: &CliArgs) -> Result<reload::Handle<EnvFilter, Registry>> {
    let log_level = if args.verbose {
        "debug"
    } else {
        args.log_level.as_deref().unwrap_or("info")
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let (filter_layer, handle) = reload::Layer::new(env_filter);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_level(true),
        )
        .init();

    Ok(handle)
}
