use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use termsync_config::Settings;
use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod commands;
mod confirm;
mod ui;

use commands::OutputFormat;

#[derive(Parser)]
#[command(
    name = "termsync",
    version,
    about = "Extract translatable terms and keep per-language translation files in sync"
)]
struct Cli {
    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    /// Only log warnings and errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Project directory holding termsync.toml (defaults to the current directory)
    #[arg(long, global = true)]
    project_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan message declarations and rewrite the term registry
    Extract {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Print every added, updated and removed term
        #[arg(long, default_value_t = false)]
        list: bool,
    },

    /// Reconcile translation files against the term registry
    Update {
        /// Restrict the run to these configured languages
        #[arg(long = "lang")]
        languages: Vec<String>,
        /// Overwrite up-to-date files without asking
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Write JSON Schemas for the registry, declaration files and summaries
    Schema {
        #[arg(long, default_value = "schemas")]
        out_dir: PathBuf,
    },
}

trait Runnable {
    fn run(self, settings: &Settings, use_color: bool) -> Result<()>;
}

impl Runnable for Commands {
    fn run(self, settings: &Settings, use_color: bool) -> Result<()> {
        let cmd_name = format!("{:?}", self);
        info!("▶ Starting command: {}", cmd_name);

        let result = match self {
            Commands::Extract { format, list } => {
                commands::extract::run_extract(settings, format, list, use_color)
            }
            Commands::Update {
                languages,
                yes,
                format,
            } => commands::update::run_update(settings, languages, yes, format, use_color),
            Commands::Schema { out_dir } => {
                let out_dir = if out_dir.is_absolute() {
                    out_dir
                } else {
                    settings.project_dir.join(out_dir)
                };
                commands::schema::run_schema(out_dir)
            }
        };

        match &result {
            Ok(_) => info!("✔ Finished command: {}", cmd_name),
            Err(e) => error!("✖ Command {} failed: {:?}", cmd_name, e),
        }

        result
    }
}

fn init_tracing(quiet: bool, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let default_level = if quiet { "warn" } else { "info" };
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        );

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "termsync.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(file_writer)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    guard
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let settings = termsync_config::load_settings(&project_dir);
    let log_dir = settings.as_ref().ok().and_then(|s| s.log_dir.clone());
    let _guard = init_tracing(cli.quiet, log_dir.as_deref());
    let settings = settings?;
    debug!(
        event = "settings_resolved",
        project_dir = %settings.project_dir.display(),
        languages = ?settings.languages,
        default_language = %settings.default_language
    );

    let use_color = !cli.no_color
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();

    cli.cmd.run(&settings, use_color)
}
