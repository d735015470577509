//! Stateless UI rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tiktak::{Cell, MAX_BOARD_SIZE, Symbol};

use super::app::{App, Screen};

const CELL_WIDTH: u16 = 5;
const CELL_HEIGHT: u16 = 3;

/// Renders whichever screen the app is on.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Body
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("TikTak")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    match app.screen() {
        Screen::MainMenu => draw_menu(frame, chunks[1]),
        Screen::InMatch | Screen::Results { .. } => draw_board(frame, chunks[1], app),
    }

    let status = Paragraph::new(app.status_message())
        .style(status_style(app))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new(help_text(app.screen()))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_menu(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from("1  -  Single player vs AI"),
        Line::from("2  -  Two players"),
        Line::from(""),
        Line::from("q  -  Quit"),
    ];
    let menu = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Main Menu"));
    frame.render_widget(menu, center_rect(area, 36, 6));
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    // Config validation caps the size; clamp so layout math cannot overflow.
    let size = app.board().size().clamp(1, MAX_BOARD_SIZE) as u16;
    let board_area = center_rect(
        area,
        size.saturating_mul(CELL_WIDTH).saturating_add(2),
        size.saturating_mul(CELL_HEIGHT).saturating_add(2),
    );

    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CELL_HEIGHT); size as usize])
        .split(inner);

    for (y, row) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(CELL_WIDTH); size as usize])
            .split(*row);
        for (x, col) in cols.iter().enumerate() {
            draw_cell(frame, *col, app, Cell::new(x as i32, y as i32));
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, cell: Cell) {
    let symbol = app.board().symbol_at(cell);

    let (text, base_style) = match symbol {
        Some(symbol) => (
            symbol.to_string(),
            Style::default()
                .fg(symbol_color(symbol))
                .add_modifier(Modifier::BOLD),
        ),
        None => ("·".to_string(), Style::default().fg(Color::DarkGray)),
    };

    let style = if cell == app.cursor() && app.shows_preview() {
        let preview = app
            .active_player()
            .map(|p| symbol_color(p.symbol()))
            .unwrap_or(Color::White);
        base_style.bg(preview).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!(" {text} "), style)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn status_style(app: &App) -> Style {
    let color = match app.screen() {
        Screen::MainMenu => Color::Yellow,
        Screen::InMatch => app
            .active_player()
            .map(|p| symbol_color(p.symbol()))
            .unwrap_or(Color::Yellow),
        Screen::Results { winner: Some(winner) } => symbol_color(winner.symbol()),
        Screen::Results { winner: None } => Color::Green,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn symbol_color(symbol: Symbol) -> Color {
    match symbol {
        Symbol::X => Color::Red,
        Symbol::O => Color::Blue,
    }
}

fn help_text(screen: &Screen) -> &'static str {
    match screen {
        Screen::MainMenu => "Press 1 or 2 to start",
        Screen::InMatch => "Arrows move  Enter/Space place  1-9 place  Esc menu  q quit",
        Screen::Results { .. } => "r rematch  m menu  q quit",
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
