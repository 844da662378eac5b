use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tp_calculator::config::AppConfig;
use tp_calculator::estimator::Estimator;
use tp_calculator::models::Selection;
use tp_calculator::{api, db, mcp, render};

#[derive(Parser)]
#[command(name = "tpcalc")]
#[command(about = "Dashboard time and price calculator")]
struct Cli {
    /// Reference database to use instead of the configured one
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the calculator UI server
    Serve {
        /// Port for the UI and HTTP API
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Replace the reference tables with CSV exports of the workbook sheets
    Import {
        /// Directory containing pages.csv, etl_tasks.csv, deployment_tasks.csv,
        /// managers.csv and developers.csv
        dir: PathBuf,
    },
    /// List pages with their share of total build time
    Pages {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Estimate time and cost for a selection
    Estimate {
        /// Page name (repeatable)
        #[arg(long = "page")]
        pages: Vec<String>,
        /// Deployment task name (repeatable)
        #[arg(long = "deploy")]
        deployment_tasks: Vec<String>,
        #[arg(long)]
        manager: Option<String>,
        #[arg(long)]
        developer: Option<String>,
    },
    /// Start MCP server via stdio
    Mcp,
}

/// Initialize tracing with output to stderr (for MCP mode) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "tp_calculator=debug,tower_http=debug".into()),
    );

    if use_stderr {
        // MCP mode: stdout is the protocol channel
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn open_database(cli_path: Option<PathBuf>, config: &AppConfig) -> anyhow::Result<db::Database> {
    let database = match cli_path.or_else(|| config.database_path.clone()) {
        Some(path) => db::Database::open(path)?,
        None => db::Database::open_default()?,
    };
    database.migrate()?;
    Ok(database)
}

fn load_estimator(database: &db::Database, config: &AppConfig) -> anyhow::Result<Estimator> {
    let reference = database
        .load_reference_data()
        .context("Reference dataset is invalid; fix it and re-run import")?;
    Ok(Estimator::new(reference).with_modeling_hours(config.modeling_hours))
}

async fn serve(estimator: Estimator, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting calculator server on port {}", port);

    let app = api::create_router(estimator);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Calculator listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = matches!(cli.command, Some(Commands::Mcp));
    init_tracing(use_stderr);

    let config = AppConfig::load();
    let database = open_database(cli.database, &config)?;

    match cli.command {
        Some(Commands::Serve { port }) => {
            let estimator = load_estimator(&database, &config)?;
            serve(estimator, port.unwrap_or(config.port)).await?;
        }
        Some(Commands::Import { dir }) => {
            let counts = database
                .import_workbook_dir(&dir)
                .with_context(|| format!("Failed to import {}", dir.display()))?;
            println!("Imported {}", counts);
        }
        Some(Commands::Pages { category }) => {
            let estimator = load_estimator(&database, &config)?;
            print!(
                "{}",
                render::render_page_table(&estimator.page_overview(category.as_deref()))
            );
        }
        Some(Commands::Estimate {
            pages,
            deployment_tasks,
            manager,
            developer,
        }) => {
            let estimator = load_estimator(&database, &config)?;
            let selection = Selection {
                pages: pages.into_iter().collect(),
                deployment_tasks: deployment_tasks.into_iter().collect(),
                manager,
                developer,
            };
            let outcome = estimator.estimate(&selection)?;
            print!("{}", render::render_outcome(&outcome));
        }
        Some(Commands::Mcp) => {
            let estimator = load_estimator(&database, &config)?;
            mcp::run_stdio_server(estimator).await?;
        }
        None => {
            let estimator = load_estimator(&database, &config)?;
            serve(estimator, config.port).await?;
        }
    }

    Ok(())
}
