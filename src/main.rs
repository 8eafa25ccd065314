//! tix - a terminal user interface for a ticket tracking service.
//!
//! Connects to the ticket service's HTTP API and provides a keyboard-driven
//! list/detail workflow: browse and filter tickets, create new ones, toggle
//! completion, and change assignees.

mod api;
mod app;
mod config;
mod controllers;
mod error;
mod events;
mod logging;
mod tasks;
mod ui;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use crate::api::TicketClient;
use crate::app::App;
use crate::config::Config;
use crate::error::AppError;
use crate::events::EventHandler;
use crate::tasks::create_task_channel;

#[derive(Debug, Parser)]
#[command(name = "tix", version, about = "A terminal UI for ticket tracking")]
struct Cli {
    /// Ticket service URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Path to an alternative config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init()?;

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => load_or_init_config(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(err) => {
            let err = AppError::from(err);
            error!(error = %err, "Failed to load configuration");
            eprintln!("{}", err.user_message());
            std::process::exit(1);
        }
    };

    if let Some(server) = cli.server {
        config.settings.server_url = server;
        if let Err(err) = config.validate() {
            let err = AppError::from(err);
            eprintln!("{}", err.user_message());
            std::process::exit(1);
        }
    }

    let client = TicketClient::new(&config.settings.server_url).map_err(AppError::from)?;
    info!(server_url = %client.base_url(), "Configuration loaded");

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &client, &config).await;
    restore_terminal(&mut terminal)?;

    if let Err(ref err) = result {
        error!(error = %err, "Application exited with an error");
        eprintln!("Error: {err:#}");
    }

    logging::shutdown();
    result
}

/// Load the config from the default location, writing the defaults out on
/// first run so there is a file to edit.
fn load_or_init_config() -> config::Result<Config> {
    let path = config::default_config_path()?;
    if !path.exists() {
        let config = Config::default();
        config.save_to(&path)?;
        return Ok(config);
    }
    Config::load()
}

/// The main event loop.
async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: &TicketClient,
    config: &Config,
) -> anyhow::Result<()> {
    let (mut rx, spawner) = create_task_channel();
    let handler = EventHandler::with_tick_rate(config.settings.tick_rate_ms);

    let mut app = App::new();
    spawner.run(client, app.begin_initial_load());

    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;

        // Apply any settled task results before blocking on input
        while let Ok(message) = rx.try_recv() {
            if let Some(command) = app.apply_message(message) {
                spawner.run(client, command);
            }
        }

        let event = handler.next()?;
        if let Some(command) = app.update(event) {
            spawner.run(client, command);
        }
    }

    Ok(())
}

/// Put the terminal into raw mode on the alternate screen.
fn setup_terminal() -> error::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
    execute!(io::stdout(), EnterAlternateScreen)
        .map_err(|e| AppError::terminal(format!("Failed to enter the alternate screen: {e}")))?;

    // Restore the terminal even if we panic mid-draw
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let backend = CrosstermBackend::new(io::stdout());
    Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to create the terminal: {e}")))
}

/// Leave the alternate screen and disable raw mode.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> error::Result<()> {
    disable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to disable raw mode: {e}")))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| AppError::terminal(format!("Failed to leave the alternate screen: {e}")))?;
    terminal
        .show_cursor()
        .map_err(|e| AppError::terminal(format!("Failed to show the cursor: {e}")))?;
    Ok(())
}
