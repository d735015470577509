//! Session behaviour on virtual time.

use std::time::Duration;
use tiktak::{Cell, GameConfig, MatchEvent, MatchSession, MatchState, PlacementOutcome, Symbol};
use tokio::sync::mpsc::UnboundedReceiver;

fn config() -> GameConfig {
    GameConfig::default().with_ai_seed(5)
}

fn drain(rx: &mut UnboundedReceiver<MatchEvent>) -> Vec<MatchEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Receives events until one matches `stop`, returning all of them.
async fn recv_until(
    rx: &mut UnboundedReceiver<MatchEvent>,
    stop: impl Fn(&MatchEvent) -> bool,
) -> Vec<MatchEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        let done = stop(&event);
        events.push(event);
        if done {
            return events;
        }
    }
    panic!("event channel closed early: {events:?}");
}

#[tokio::test(start_paused = true)]
async fn test_placement_before_start() {
    let (handle, _events) = MatchSession::spawn(&config()).unwrap();
    assert_eq!(
        handle.submit_placement(Cell::new(0, 0)).await.unwrap(),
        PlacementOutcome::NotRunning
    );
    assert_eq!(handle.snapshot().await.unwrap().state, MatchState::NotStarted);
}

#[tokio::test(start_paused = true)]
async fn test_ai_replies_after_delay() {
    let (handle, mut events) = MatchSession::spawn(&config()).unwrap();
    handle.start_match(true).await.unwrap();
    drain(&mut events);

    assert!(handle.submit_placement(Cell::new(1, 1)).await.unwrap().is_placed());
    assert!(handle.is_ai_turn_pending().await.unwrap());
    let vacant_at_schedule = handle.vacant_cells().await.unwrap();

    let started = tokio::time::Instant::now();
    let events = recv_until(&mut events, |e| {
        matches!(e, MatchEvent::ActivePlayerChanged(p) if !p.is_ai())
    })
    .await;
    assert!(started.elapsed() >= Duration::from_millis(1000));

    let pending: Vec<bool> = events
        .iter()
        .filter_map(|e| match e {
            MatchEvent::AiTurnChanged { pending } => Some(*pending),
            _ => None,
        })
        .collect();
    assert_eq!(pending, vec![true, false]);

    let ai_cells: Vec<Cell> = events
        .iter()
        .filter_map(|e| match e {
            MatchEvent::PiecePlaced { cell, symbol: Symbol::O } => Some(*cell),
            _ => None,
        })
        .collect();
    assert_eq!(ai_cells.len(), 1);
    assert!(vacant_at_schedule.contains(&ai_cells[0]));

    // The gate drops once the AI has moved.
    let snapshot = handle.snapshot().await.unwrap();
    assert!(!snapshot.ai_turn_pending);
    assert_eq!(snapshot.vacant_cells().len(), 7);
    assert_eq!(snapshot.symbol_at(ai_cells[0]), Some(Symbol::O));
}

#[tokio::test(start_paused = true)]
async fn test_input_refused_while_ai_thinks() {
    let (handle, _events) = MatchSession::spawn(&config()).unwrap();
    handle.start_match(true).await.unwrap();
    handle.submit_placement(Cell::new(0, 0)).await.unwrap();

    let outcome = handle.submit_placement(Cell::new(2, 2)).await.unwrap();
    assert_eq!(outcome, PlacementOutcome::AiThinking);
    // Nothing landed at (2, 2).
    assert_eq!(handle.symbol_at(Cell::new(2, 2)).await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_restart_discards_pending_ai_move() {
    let (handle, mut events) = MatchSession::spawn(&config()).unwrap();
    handle.start_match(true).await.unwrap();
    handle.submit_placement(Cell::new(1, 1)).await.unwrap();
    assert!(handle.is_ai_turn_pending().await.unwrap());

    handle.start_match(true).await.unwrap();
    drain(&mut events);

    tokio::time::sleep(Duration::from_secs(5)).await;

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.vacant_cells().len(), 9);
    assert!(!snapshot.ai_turn_pending);
    assert!(snapshot.is_running());
    assert!(
        !drain(&mut events)
            .iter()
            .any(|e| matches!(e, MatchEvent::PiecePlaced { .. }))
    );
}

#[tokio::test(start_paused = true)]
async fn test_rejected_placement_outcome() {
    let (handle, mut events) = MatchSession::spawn(&config()).unwrap();
    handle.start_match(false).await.unwrap();
    handle.submit_placement(Cell::new(1, 1)).await.unwrap();
    drain(&mut events);

    assert_eq!(
        handle.submit_placement(Cell::new(1, 1)).await.unwrap(),
        PlacementOutcome::Rejected
    );
    assert_eq!(
        handle.submit_placement(Cell::new(9, 9)).await.unwrap(),
        PlacementOutcome::Rejected
    );
    assert!(drain(&mut events).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_full_single_player_match_finishes() {
    let (handle, mut events) = MatchSession::spawn(&config()).unwrap();
    handle.start_match(true).await.unwrap();

    loop {
        let snapshot = handle.snapshot().await.unwrap();
        if !snapshot.is_running() {
            break;
        }
        if snapshot.ai_turn_pending {
            recv_until(&mut events, |e| {
                matches!(
                    e,
                    MatchEvent::ActivePlayerChanged(_) | MatchEvent::MatchEnded { .. }
                )
            })
            .await;
            continue;
        }
        let cell = snapshot.vacant_cells()[0];
        assert!(handle.submit_placement(cell).await.unwrap().is_placed());
    }

    let snapshot = handle.snapshot().await.unwrap();
    assert!(matches!(snapshot.state, MatchState::Ended { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_closes_handle() {
    let (handle, mut events) = MatchSession::spawn(&config()).unwrap();
    handle.shutdown().unwrap();
    // Session drops its event sink on exit.
    assert!(events.recv().await.is_none());
    assert!(handle.snapshot().await.is_err());
}

#[tokio::test]
async fn test_spawn_rejects_invalid_board() {
    let config = GameConfig::default().with_board_size(-3);
    assert!(MatchSession::spawn(&config).is_err());
}
