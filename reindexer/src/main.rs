use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reindexer::{Configuration, Dependencies, ReindexError};
use reindexer_pipeline::ReindexCommand;
use reindexer_source::DeltaField;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reindexer")]
#[command(about = "Rebuild the geo, users and trips search collections from MySQL", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the JSON configuration file
    #[arg(long, default_value = "config.json", global = true)]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Reindex countries, regions and cities
    Geo,
    /// Reindex every searchable user profile
    Users,
    /// Reindex every trip
    Trips,
    /// Reindex the most recently changed users
    UsersDelta {
        /// Timestamp to order by (signup, last_login or modified)
        #[arg(long)]
        field: DeltaField,

        /// Number of users to reindex
        #[arg(long)]
        total: u64,
    },
}

impl From<Commands> for ReindexCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Geo => ReindexCommand::Geo,
            Commands::Users => ReindexCommand::Users,
            Commands::Trips => ReindexCommand::Trips,
            Commands::UsersDelta { field, total } => ReindexCommand::UsersDelta {
                field,
                max_total: total,
            },
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), ReindexError> {
    let configuration = Configuration::load(&cli.config)?;
    let command = ReindexCommand::from(cli.command);
    command
        .validate()
        .map_err(|e| ReindexError::config(e.to_string()))?;

    let dependencies = Dependencies::new(&configuration, &command).await?;
    let orchestrator = dependencies.orchestrator;

    match orchestrator.run(command).await {
        Ok(snapshot) => {
            info!(
                fetched = snapshot.fetched,
                sent = snapshot.sent,
                "Reindex completed"
            );
            Ok(())
        }
        Err(e) => {
            let snapshot = orchestrator.progress().snapshot();
            error!(
                fetched = snapshot.fetched,
                sent = snapshot.sent,
                "Reindex aborted"
            );
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Reindexer failed");
            ExitCode::FAILURE
        }
    }
}
