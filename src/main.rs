//! PopcornTUI - terminal movie search, rating and watch list
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! popcorntui
//!
//! # CLI mode (for automation)
//! popcorntui search "blade runner" --limit 5
//! popcorntui info tt0083658 --json
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};

use popcorntui::cli::{Cli, Command, ExitCode, Output};
use popcorntui::title::TerminalTitle;
use popcorntui::{commands, logging, ui, App, Config};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<std::process::ExitCode> {
    let cli = Cli::parse();
    let (config, config_error) = match cli.config {
        Some(ref path) => match Config::try_load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        },
        None => (Config::load(), None),
    };

    if cli.is_tui() {
        logging::init_tui(&config);
        warn_config(config_error);
        run_tui(&config).await?;
        Ok(std::process::ExitCode::SUCCESS)
    } else {
        logging::init_cli(&config);
        warn_config(config_error);
        Ok(run_cli(cli, &config).await.into())
    }
}

/// An explicit `--config` that cannot be used falls back to defaults, loudly
fn warn_config(error: Option<anyhow::Error>) {
    if let Some(e) = error {
        warn!("ignoring config file, using defaults: {:#}", e);
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, config, &output).await,
        Some(Command::Info(cmd)) => commands::info_cmd(cmd, config, &output).await,
        // handled by is_tui check
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: &Config) -> Result<()> {
    info!(base_url = config.base_url(), "starting tui");
    let mut terminal = init_terminal()?;

    let mut app = App::with_omdb(config.omdb_client(), Box::new(TerminalTitle));

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Dropping the app cancels in-flight fetches and restores the title
    drop(app);

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    if let Err(ref e) = result {
        error!("event loop failed: {:#}", e);
    }
    result
}

/// Main event loop - handles input, applies fetch completions, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(50);

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Key input blocks at most one tick so completions are picked up promptly
        let ready = tokio::task::block_in_place(|| event::poll(TICK_RATE))?;
        if ready {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.drain_events();
    }

    Ok(())
}
