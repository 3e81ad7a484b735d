//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::app::{App, Confirmation};
use crate::db::ScoreStore;
use crate::games::tictactoe::{GameStatus, Player, Position, Square};

const CELL_WIDTH: u16 = 9;
const CELL_HEIGHT: u16 = 3;
const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + 2;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3 + 2;

const HELP: &str = "←↑↓→/hjkl move | Enter/Space/1-9 place | r restart | s reset scores | q quit";

/// Renders the whole screen.
pub fn draw<S: ScoreStore>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();
    let chunks = screen_chunks(area);

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    draw_scores(frame, chunks[1], app);
    draw_board(frame, area, app);
    draw_status(frame, chunks[3], app);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);

    if app.confetti().is_active() {
        app.confetti().render(area, frame.buffer_mut());
    }

    if let Some(confirmation) = app.pending() {
        draw_confirmation(frame, area, confirmation);
    }
}

/// Screen areas for title, scores, board, status and help.
fn screen_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Title
            Constraint::Length(3),            // Scores
            Constraint::Min(BOARD_HEIGHT),    // Board
            Constraint::Length(3),            // Status
            Constraint::Length(1),            // Help
        ])
        .split(area)
}

/// Areas of the nine squares for a screen of size `area`, in index order.
pub fn board_cells(area: Rect) -> [Rect; 9] {
    let board = center_rect(screen_chunks(area)[2], BOARD_WIDTH, BOARD_HEIGHT);
    Position::ALL.map(|pos| {
        let cell = Rect::new(
            board.x + pos.col() as u16 * (CELL_WIDTH + 1),
            board.y + pos.row() as u16 * (CELL_HEIGHT + 1),
            CELL_WIDTH,
            CELL_HEIGHT,
        );
        cell.intersection(board)
    })
}

/// Square under the terminal coordinate (`column`, `row`), if any.
pub fn cell_at(area: Rect, column: u16, row: u16) -> Option<Position> {
    let point = ratatui::layout::Position::new(column, row);
    board_cells(area)
        .iter()
        .position(|cell| cell.contains(point))
        .and_then(Position::from_index)
}

fn draw_scores<S: ScoreStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let scores = app.scores();
    let label = Style::default().fg(Color::Gray);
    let line = Line::from(vec![
        Span::styled("Player X: ", label),
        Span::styled(scores.wins_x().to_string(), player_style(Player::X)),
        Span::raw("    "),
        Span::styled("Player O: ", label),
        Span::styled(scores.wins_o().to_string(), player_style(Player::O)),
        Span::raw("    "),
        Span::styled("Draws: ", label),
        Span::styled(
            scores.draws().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Scores"));
    frame.render_widget(paragraph, area);
}

fn draw_board<S: ScoreStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let cells = board_cells(area);
    let Some(first) = cells.first().copied() else {
        return;
    };

    let separator = Style::default().fg(Color::DarkGray);
    let width = (CELL_WIDTH * 3 + 2) as usize;
    for row in 1..3u16 {
        let y = first.y + row * (CELL_HEIGHT + 1) - 1;
        let line = Rect::new(first.x, y, BOARD_WIDTH, 1).intersection(area);
        let text: String = (0..width)
            .map(|i| if i % (CELL_WIDTH as usize + 1) == CELL_WIDTH as usize { '┼' } else { '─' })
            .collect();
        frame.render_widget(Paragraph::new(text).style(separator), line);
    }
    for col in 1..3u16 {
        let x = first.x + col * (CELL_WIDTH + 1) - 1;
        for row in 0..3u16 {
            let y = first.y + row * (CELL_HEIGHT + 1);
            let column = Rect::new(x, y, 1, CELL_HEIGHT).intersection(area);
            frame.render_widget(Paragraph::new("│\n│\n│").style(separator), column);
        }
    }

    for pos in Position::ALL {
        draw_cell(frame, cells[pos.to_index()], app, pos);
    }
}

fn draw_cell<S: ScoreStore>(frame: &mut Frame, area: Rect, app: &App<S>, pos: Position) {
    let engine = app.engine();
    let (symbol, base_style) = match engine.board().get(pos) {
        Square::Empty => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(player) => (player.to_string(), player_style(player)),
    };

    let style = match engine.status() {
        GameStatus::Won { line, .. } if line.contains(pos) => {
            base_style.bg(Color::Green).fg(Color::Black)
        }
        GameStatus::InProgress if pos == app.cursor() => base_style.bg(Color::White).fg(Color::Black),
        _ => base_style,
    };

    let paragraph = Paragraph::new(vec![Line::raw(""), Line::raw(symbol), Line::raw("")])
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_status<S: ScoreStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let style = match app.engine().status() {
        GameStatus::InProgress => Style::default().fg(Color::Yellow),
        GameStatus::Won { winner, .. } => player_style(*winner),
        GameStatus::Draw => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    };

    let mut spans = vec![Span::styled(app.turn_indicator(), style)];
    if let Some(notice) = app.notice() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice.to_string(), Style::default().fg(Color::Red)));
    }

    let status = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn draw_confirmation(frame: &mut Frame, area: Rect, confirmation: Confirmation) {
    let popup = center_rect(area, 50, 5);
    let text = vec![
        Line::raw(confirmation.prompt()),
        Line::raw(""),
        Line::styled("[y] Yes    [n] No", Style::default().fg(Color::DarkGray)),
    ];
    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Confirm")
            .style(Style::default().fg(Color::White)),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn player_style(player: Player) -> Style {
    let color = match player {
        Player::X => Color::Blue,
        Player::O => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
