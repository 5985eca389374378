//! `fontafirma`: apartment inspection tracker.
//!
//! Each subcommand stands in for one widget of the data-entry form: tower,
//! floor and unit selectors, the edit/save action, the building map and the
//! CSV download.

mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use fontafirma_core::ServiceError;
use units::service::export::CSV_FILE_NAME;
use units::service::selection::Selection;

use commands::edit::EditArgs;
use commands::select::Target;
use config::ClientConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Apartment inspection tracker.
#[derive(Parser, Debug)]
#[command(name = "fontafirma", about = "Track inspection and signature status of building units")]
struct Cli {
    /// Path to config file (default: ~/.fontafirma/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format.
    #[arg(long = "output", short = 'o', global = true, value_enum, default_value = "table")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List towers.
    Towers,

    /// List floors of a tower.
    Floors {
        #[arg(long, short = 't')]
        tower: String,
    },

    /// List units on a tower floor.
    Units {
        #[arg(long, short = 't')]
        tower: String,
        #[arg(long, short = 'f')]
        floor: i64,
    },

    /// Show one unit's record.
    Show {
        /// Unit id (e.g. A-101).
        unit_id: Option<String>,
        /// Tower, used with --floor and --number instead of a unit id.
        #[arg(long, short = 't', requires_all = ["floor", "number"], conflicts_with = "unit_id")]
        tower: Option<String>,
        #[arg(long, short = 'f')]
        floor: Option<i64>,
        #[arg(long, short = 'n')]
        number: Option<i64>,
    },

    /// Edit a unit's record and save the table.
    Edit {
        /// Unit id (e.g. A-101).
        unit_id: String,
        /// no-contact, dampness, signed, no-dampness, refused-to-sign, vacant.
        #[arg(long, short = 's')]
        state: Option<String>,
        /// Occupant name.
        #[arg(long)]
        name: Option<String>,
        /// unspecified, owner, tenant.
        #[arg(long = "type")]
        occupant_type: Option<String>,
        /// Free-text notes.
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show the color-coded building map.
    Grid {
        /// Write an HTML page instead of printing to the terminal.
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Export the full table as CSV.
    Export {
        /// Output file, or "-" for stdout.
        #[arg(long, default_value = CSV_FILE_NAME)]
        out: PathBuf,
    },

    /// Count units per state.
    Summary,

    /// Client configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write a default config file.
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration.
    Show,
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.output == OutputFormat::Json;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e, json),
    }
}

fn report(err: &anyhow::Error, json: bool) -> ExitCode {
    let Some(service) = err.downcast_ref::<ServiceError>() else {
        eprintln!("error: {:#}", err);
        return ExitCode::FAILURE;
    };

    if json {
        println!("{}", service.to_json());
    } else if service.is_warning() {
        eprintln!("warning: {}", service);
    } else {
        eprintln!("error: {}", service);
    }
    u8::try_from(service.exit_code())
        .map(ExitCode::from)
        .unwrap_or(ExitCode::FAILURE)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(ClientConfig::default_path);
    let json = cli.output == OutputFormat::Json;

    let mut client_config = ClientConfig::load(&config_path)?;
    client_config.apply_env();

    // Commands that do not touch the store.
    match &cli.command {
        Commands::Version => {
            println!("fontafirma v{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Commands::Config { action } => {
            return match action {
                ConfigAction::Init { force } => commands::config::init(&config_path, *force),
                ConfigAction::Show => commands::config::show(&client_config, json),
            };
        }
        _ => {}
    }

    let service_config = client_config.resolve()?;
    let mut session = commands::open_session(&service_config)?;

    match cli.command {
        Commands::Towers => commands::select::towers(&session, json)?,

        Commands::Floors { tower } => commands::select::floors(&session, &tower, json)?,

        Commands::Units { tower, floor } => {
            commands::select::units(&session, &tower, floor, json)?
        }

        Commands::Show {
            unit_id,
            tower,
            floor,
            number,
        } => {
            let target = match (unit_id, tower, floor, number) {
                (Some(id), _, _, _) => Target::Id(id),
                (None, Some(tower), Some(floor), Some(number)) => Target::Selection(Selection {
                    tower,
                    floor,
                    number,
                }),
                _ => anyhow::bail!("Provide a unit id or --tower, --floor and --number."),
            };
            commands::select::show(&session, &target, json)?;
        }

        Commands::Edit {
            unit_id,
            state,
            name,
            occupant_type,
            notes,
        } => {
            let args = EditArgs {
                state,
                name,
                occupant_type,
                notes,
            };
            commands::edit::edit(&mut session, &unit_id, &args)?;
        }

        Commands::Grid { html } => commands::grid::grid(&session, html.as_deref(), json)?,

        Commands::Export { out } => commands::export::export(&session, &out)?,

        Commands::Summary => commands::select::summary(&session, json)?,

        Commands::Version | Commands::Config { .. } => {}
    }

    Ok(())
}
