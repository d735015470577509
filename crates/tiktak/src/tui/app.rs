//! Application state and logic.
//!
//! The app mirrors the match from [`MatchEvent`]s alone; it never reaches into
//! the session for state. Key presses become [`AppAction`]s that the event
//! loop forwards to the [`MatchHandle`](tiktak::MatchHandle).

use crossterm::event::KeyCode;
use tiktak::{BoardState, Cell, MatchEvent, Player};
use tracing::{debug, instrument, warn};

use super::input::{digit_to_cell, move_cursor};

/// Which screen is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Mode selection.
    MainMenu,
    /// A match is being played.
    InMatch,
    /// The match finished.
    Results {
        /// The winner, or `None` on a draw.
        winner: Option<Player>,
    },
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Nothing to forward.
    None,
    /// Start a match in the given mode.
    StartMatch {
        /// Play against the AI.
        single_player: bool,
    },
    /// Place the active player's mark.
    Place(Cell),
    /// Leave the application.
    Quit,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    screen: Screen,
    single_player: bool,
    board: BoardState,
    cursor: Cell,
    active_player: Option<Player>,
    ai_thinking: bool,
    running: bool,
    status_message: String,
}

impl App {
    /// Creates a new application on the main menu.
    pub fn new() -> Self {
        Self {
            screen: Screen::MainMenu,
            single_player: true,
            board: BoardState::default(),
            cursor: Cell::default(),
            active_player: None,
            ai_thinking: false,
            running: false,
            status_message: "Choose a mode to begin".to_string(),
        }
    }

    /// Current screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Mirrored board.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Cursor position.
    pub fn cursor(&self) -> Cell {
        self.cursor
    }

    /// Player whose turn it is.
    pub fn active_player(&self) -> Option<&Player> {
        self.active_player.as_ref()
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Whether a click would be forwarded right now.
    pub fn can_place(&self) -> bool {
        self.screen == Screen::InMatch && self.running && !self.ai_thinking
    }

    /// Whether to draw the placement preview under the cursor.
    pub fn shows_preview(&self) -> bool {
        self.can_place()
            && self.board.contains(self.cursor)
            && self.board.symbol_at(self.cursor).is_none()
    }

    /// Handles a notification from the match.
    #[instrument(skip(self))]
    pub fn handle_event(&mut self, event: MatchEvent) {
        match event {
            MatchEvent::MatchStarted => {
                self.screen = Screen::InMatch;
                self.running = true;
                self.ai_thinking = false;
            }
            MatchEvent::BoardReset { size } => match BoardState::new(size) {
                Ok(board) => {
                    self.board = board;
                    self.cursor = Cell::new(size / 2, size / 2);
                }
                Err(e) => warn!(error = %e, "Ignoring board reset"),
            },
            MatchEvent::ActivePlayerChanged(player) => {
                self.status_message = format!("{}'s turn ({})", player.name(), player.symbol());
                self.active_player = Some(player);
            }
            MatchEvent::PiecePlaced { cell, symbol } => {
                if !self.board.try_place(cell, symbol) {
                    warn!(%cell, "Mirror board disagrees with match");
                }
            }
            MatchEvent::AiTurnChanged { pending } => {
                self.ai_thinking = pending;
                if pending && let Some(player) = &self.active_player {
                    self.status_message = format!("{} is thinking...", player.name());
                }
            }
            MatchEvent::MatchEnded { winner, is_draw } => {
                self.running = false;
                self.ai_thinking = false;
                if self.screen != Screen::InMatch {
                    debug!("Match ended after leaving it");
                    return;
                }
                self.status_message = if is_draw {
                    "Draw!".to_string()
                } else {
                    match &winner {
                        Some(player) => format!("{} wins!", player.name()),
                        None => "Match over".to_string(),
                    }
                };
                self.screen = Screen::Results { winner };
            }
        }
    }

    /// Maps a key press on the current screen to an action.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) -> AppAction {
        let screen = self.screen.clone();
        match (&screen, key) {
            (_, KeyCode::Char('q') | KeyCode::Char('Q')) => AppAction::Quit,

            (Screen::MainMenu, KeyCode::Char('1')) => self.choose_mode(true),
            (Screen::MainMenu, KeyCode::Char('2')) => self.choose_mode(false),
            (Screen::MainMenu, _) => AppAction::None,

            (Screen::InMatch, KeyCode::Esc) => self.back_to_menu(),
            (Screen::InMatch, KeyCode::Enter | KeyCode::Char(' ')) => self.place_at(self.cursor),
            (Screen::InMatch, KeyCode::Char(c)) => {
                match digit_to_cell(c, self.board.size()) {
                    Some(cell) => {
                        self.cursor = cell;
                        self.place_at(cell)
                    }
                    None => AppAction::None,
                }
            }
            (Screen::InMatch, code) => {
                self.cursor = move_cursor(self.cursor, code, self.board.size());
                AppAction::None
            }

            (Screen::Results { .. }, KeyCode::Char('r') | KeyCode::Char('R')) => {
                AppAction::StartMatch {
                    single_player: self.single_player,
                }
            }
            (Screen::Results { .. }, KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc) => {
                self.back_to_menu()
            }
            (Screen::Results { .. }, _) => AppAction::None,
        }
    }

    fn choose_mode(&mut self, single_player: bool) -> AppAction {
        debug!(single_player, "Mode selected");
        self.single_player = single_player;
        AppAction::StartMatch { single_player }
    }

    fn place_at(&self, cell: Cell) -> AppAction {
        if self.can_place() {
            AppAction::Place(cell)
        } else {
            AppAction::None
        }
    }

    fn back_to_menu(&mut self) -> AppAction {
        self.screen = Screen::MainMenu;
        self.running = false;
        self.status_message = "Choose a mode to begin".to_string();
        AppAction::None
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiktak::Symbol;

    fn started(single_player: bool) -> App {
        let mut app = App::new();
        assert_eq!(
            app.handle_key(KeyCode::Char(if single_player { '1' } else { '2' })),
            AppAction::StartMatch { single_player }
        );
        app.handle_event(MatchEvent::MatchStarted);
        app.handle_event(MatchEvent::BoardReset { size: 3 });
        app.handle_event(MatchEvent::ActivePlayerChanged(Player::new(
            0,
            "Player 1",
            Symbol::X,
            false,
        )));
        app
    }

    #[test]
    fn test_menu_ignores_other_keys() {
        let mut app = App::new();
        assert_eq!(app.handle_key(KeyCode::Enter), AppAction::None);
        assert_eq!(app.screen(), &Screen::MainMenu);
    }

    #[test]
    fn test_enter_places_at_cursor() {
        let mut app = started(false);
        assert_eq!(app.cursor(), Cell::new(1, 1));
        assert_eq!(app.handle_key(KeyCode::Enter), AppAction::Place(Cell::new(1, 1)));
        assert_eq!(app.status_message(), "Player 1's turn (X)");
    }

    #[test]
    fn test_input_gated_while_ai_thinks() {
        let mut app = started(true);
        app.handle_event(MatchEvent::ActivePlayerChanged(Player::new(
            1,
            "Player 2",
            Symbol::O,
            true,
        )));
        app.handle_event(MatchEvent::AiTurnChanged { pending: true });
        assert!(!app.can_place());
        assert!(!app.shows_preview());
        assert_eq!(app.handle_key(KeyCode::Enter), AppAction::None);
        assert_eq!(app.status_message(), "Player 2 is thinking...");

        app.handle_event(MatchEvent::AiTurnChanged { pending: false });
        assert!(app.can_place());
    }

    #[test]
    fn test_preview_hidden_on_occupied_cell() {
        let mut app = started(false);
        app.handle_event(MatchEvent::PiecePlaced {
            cell: Cell::new(1, 1),
            symbol: Symbol::X,
        });
        assert!(!app.shows_preview());
        app.handle_key(KeyCode::Left);
        assert!(app.shows_preview());
    }

    #[test]
    fn test_results_and_rematch() {
        let mut app = started(true);
        let winner = Player::new(0, "Player 1", Symbol::X, false);
        app.handle_event(MatchEvent::MatchEnded {
            winner: Some(winner.clone()),
            is_draw: false,
        });
        assert_eq!(app.screen(), &Screen::Results { winner: Some(winner) });
        assert_eq!(app.status_message(), "Player 1 wins!");
        assert!(!app.can_place());
        assert_eq!(
            app.handle_key(KeyCode::Char('r')),
            AppAction::StartMatch { single_player: true }
        );
        assert_eq!(app.handle_key(KeyCode::Char('m')), AppAction::None);
        assert_eq!(app.screen(), &Screen::MainMenu);
    }

    #[test]
    fn test_draw_message() {
        let mut app = started(false);
        app.handle_event(MatchEvent::MatchEnded {
            winner: None,
            is_draw: true,
        });
        assert_eq!(app.status_message(), "Draw!");
    }
}
