//! Headless match driven by random moves.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tiktak::{GameConfig, MatchEvent, MatchSession, PlacementOutcome, pick_random_cell};
use tracing::{debug, info, instrument};

/// Plays one match to completion, printing every event.
///
/// Human seats are filled by random moves; with `single_player` the second
/// seat is the built-in AI.
#[instrument(skip(config))]
pub async fn run_demo(config: GameConfig, single_player: bool, seed: Option<u64>) -> Result<()> {
    let (handle, mut events) = MatchSession::spawn(&config)?;
    let mut rng = StdRng::seed_from_u64(seed.unwrap_or_else(|| rand::rng().random()));

    handle.start_match(single_player).await?;
    info!(single_player, "Demo match started");

    while let Some(event) = events.recv().await {
        println!("{}", describe(&event));
        match event {
            MatchEvent::ActivePlayerChanged(player) if !player.is_ai() => {
                let vacant = handle.vacant_cells().await?;
                let cell = pick_random_cell(&vacant, &mut rng)
                    .context("Human turn with no vacant cell")?;
                let outcome = handle.submit_placement(cell).await?;
                debug!(%cell, %outcome, "Demo move submitted");
                anyhow::ensure!(
                    outcome == PlacementOutcome::Placed,
                    "Demo move at {} was {}",
                    cell,
                    outcome
                );
            }
            MatchEvent::MatchEnded { .. } => break,
            _ => {}
        }
    }

    handle.shutdown()?;
    Ok(())
}

fn describe(event: &MatchEvent) -> String {
    match event {
        MatchEvent::MatchStarted => "Match started".to_string(),
        MatchEvent::BoardReset { size } => format!("Board is {size}x{size}"),
        MatchEvent::ActivePlayerChanged(player) => {
            format!("{}'s turn ({})", player.name(), player.symbol())
        }
        MatchEvent::PiecePlaced { cell, symbol } => format!("{symbol} placed at {cell}"),
        MatchEvent::AiTurnChanged { pending: true } => "AI is thinking...".to_string(),
        MatchEvent::AiTurnChanged { pending: false } => "AI is done thinking".to_string(),
        MatchEvent::MatchEnded { winner: Some(winner), .. } => format!("{} wins!", winner.name()),
        MatchEvent::MatchEnded { winner: None, .. } => "Draw!".to_string(),
    }
}
