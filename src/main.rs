use anyhow::Result;
use clap::{Parser, Subcommand};
use portfolio_core::{Config, EmployeeStore};
use tracing_appender::non_blocking::WorkerGuard;

mod app;
mod employees;
mod handler;
mod tui;
mod ui;

use app::App;
use employees::EmployeeCommand;

#[derive(Parser)]
#[command(name = "portfolio")]
#[command(about = "Portfolio assistant widget and employee table in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the assistant widget (default)
    Chat,
    /// Manage the employee table
    Employees {
        #[command(subcommand)]
        command: EmployeeCommand,
    },
}

/// Log to a file next to the config; the terminal belongs to the UI.
fn init_logging() -> Result<WorkerGuard> {
    let log_dir = Config::get_config_path()?
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(std::env::temp_dir);
    std::fs::create_dir_all(&log_dir)?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        log_dir,
        "portfolio.log",
    ));

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging()?;

    let config = Config::load()?.with_env_overrides();

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(&config).await,
        Commands::Employees { command } => {
            let store = EmployeeStore::new(config.employees_url());
            employees::run(&store, command).await
        }
    }
}

async fn run_chat(config: &Config) -> Result<()> {
    let mut app = App::new(config);
    tracing::info!(endpoint = %config.completion_url(), "starting assistant widget");

    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new(tui::TICK_RATE);

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&app, frame))?;

            match events.next().await {
                Some(event) => handler::handle_event(&mut app, event).await,
                None => break,
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    tui::restore()?;
    result
}
