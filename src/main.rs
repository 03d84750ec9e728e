//! Method Audit - method-level audit logging with declarative interception rules.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use method_audit::app::{App, AppError};
use method_audit::config::ConfigLoader;
use method_audit::display;
use method_audit::http::ApiServer;

#[derive(Parser)]
#[command(
    name = "method-audit",
    about = "Method-level audit logging for a user service",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file to use instead of the default search paths.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the user API with auditing enabled.
    Serve {
        /// Host address to bind to.
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on.
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Load the sample users into an empty database.
    Seed,
    /// Show the most recent audit records.
    Audit {
        /// Maximum number of records to show.
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
        /// Print records as JSON lines.
        #[arg(long)]
        json: bool,
    },
    /// Show which operations are audited and under which rules.
    Rules,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let loader = cli.config.map_or_else(ConfigLoader::new, ConfigLoader::with_path);
    let mut config = loader.load()?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let app = App::open(&config).await?;
            if config.seed.enabled {
                app.seed().await?;
            }

            let cancel = CancellationToken::new();
            let shutdown = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("Received ctrl-c");
                }
                shutdown.cancel();
            });

            ApiServer::new(app.state())
                .with_config(config.server)
                .run(cancel)
                .await?;
        }
        Commands::Seed => {
            let app = App::open(&config).await?;
            let inserted = app.seed().await?;
            println!("Seeded {inserted} users");
        }
        Commands::Audit { limit, json } => {
            let app = App::open(&config).await?;
            for record in app.audit.recent(limit).await? {
                if json {
                    println!("{}", serde_json::to_string(&record)?);
                } else {
                    display::print_record(&record);
                }
            }
        }
        Commands::Rules => {
            let registry = config
                .audit
                .policy()
                .register(method_audit::users::operations::OPERATIONS);
            display::print_rules(&registry);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
