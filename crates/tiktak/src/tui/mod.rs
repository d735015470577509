//! Terminal UI for TikTak.
//!
//! The TUI is the input and rendering collaborator of a [`MatchSession`]: it
//! turns key presses into session commands and redraws from match events.

mod app;
mod input;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tiktak::{GameConfig, MatchEvent, MatchHandle, MatchSession};
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, instrument};

use app::{App, AppAction};

/// Runs the TUI until the player quits.
pub async fn run_tui(config: GameConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create("tiktak.log").context("Failed to create tiktak.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!("Starting TikTak TUI");

    let (handle, mut events) = MatchSession::spawn(&config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &handle, &mut events).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    let _ = handle.shutdown();

    if let Err(err) = res {
        error!(error = ?err, "TUI loop error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Event loop: apply match events, draw, forward key presses.
#[instrument(skip_all)]
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    handle: &MatchHandle,
    events: &mut mpsc::UnboundedReceiver<MatchEvent>,
) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    let mut app = App::new();

    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        // Poll for input with short timeout to keep the loop responsive.
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release).
            if key.kind == KeyEventKind::Release {
                continue;
            }

            match app.handle_key(key.code) {
                AppAction::None => {}
                AppAction::Quit => {
                    info!("User quit");
                    return Ok(());
                }
                AppAction::StartMatch { single_player } => {
                    handle.start_match(single_player).await?;
                }
                AppAction::Place(cell) => {
                    let outcome = handle.submit_placement(cell).await?;
                    debug!(%cell, %outcome, "Placement submitted");
                }
            }
        }

        sleep(Duration::from_millis(10)).await;
    }
}
