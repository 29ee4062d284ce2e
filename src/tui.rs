//! TUI (Terminal User Interface) module for the Wordle game
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: renders a `Game` and turns crossterm events into `UserAction`s
//! - `PendingNotice`: the win/lose popup, shown once its delay has passed
//!
//! Layout, top to bottom: title, board, keyboard hints, event log, status, instructions.

use crate::board::{Cell, MAX_GUESSES, Row};
use crate::event_log::{EventLog, Severity};
use crate::game_state::{Game, GameInterface, Key, KeyOutcome, Notice, UserAction};
use crate::scoring::Classification;
use crate::word::WORD_LENGTH;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io;
use std::time::{Duration, Instant};

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];
const POPUP_WIDTH: u16 = 48;
const POPUP_HEIGHT: u16 = 5;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const WARNING_STYLE: Style = Style::new().fg(Color::Yellow);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const TIME_STYLE: Style = Style::new().fg(Color::DarkGray);

fn classification_colors(classification: Option<Classification>) -> (Color, Color) {
    match classification {
        None => (Color::DarkGray, Color::White),
        Some(Classification::Correct) => (Color::Green, Color::Black),
        Some(Classification::Present) => (Color::Yellow, Color::Black),
        Some(Classification::Absent) => (Color::Gray, Color::White),
    }
}

fn cell_style(cell: &Cell, active: bool) -> Style {
    let (bg, fg) = classification_colors(cell.classification);
    let style = Style::default().fg(fg).bg(bg);
    if active && cell.classification.is_none() {
        style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        style
    }
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Info => Style::default(),
        Severity::Success => SUCCESS_STYLE,
        Severity::Warning => WARNING_STYLE,
        Severity::Error => ERROR_STYLE,
    }
}

/// Win/lose popup waiting for its delay to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingNotice {
    due: Instant,
    notice: Notice,
}

impl PendingNotice {
    pub fn new(notice: Notice, delay: Duration, now: Instant) -> Self {
        Self {
            due: now + delay,
            notice,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    pub fn notice(&self) -> Notice {
        self.notice
    }
}

/// Map a key press to an action. Unrecognized keys give `None`.
pub fn map_key_event(key: KeyEvent, game_over: bool) -> Option<UserAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let has_alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Esc => Some(UserAction::Exit),
        KeyCode::Char('c') if has_ctrl => Some(UserAction::Exit),
        KeyCode::Char('n' | 'N') if has_ctrl || game_over => Some(UserAction::NewGame),
        KeyCode::Char('l' | 'L') if has_ctrl => Some(UserAction::ClearLog),
        KeyCode::Backspace => Some(UserAction::Key(Key::Backspace)),
        KeyCode::Enter => Some(UserAction::Key(Key::Enter)),
        KeyCode::Char(_) if has_ctrl || has_alt => None,
        KeyCode::Char(c) => Key::parse(c.encode_utf8(&mut [0; 4])).map(UserAction::Key),
        _ => None,
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
pub struct RenderContext<'a> {
    pub game: &'a Game,
    pub popup: Option<Notice>,
    pub message: &'a str,
    pub error_message: &'a str,
    pub status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and the deferred end-of-game popup.
pub struct TuiInterface<B: Backend = CrosstermBackend<io::Stdout>> {
    terminal: Terminal<B>,
    raw_mode: bool,
    notify_delay: Duration,
    pending_notice: Option<PendingNotice>,
    popup: Option<Notice>,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new(notify_delay: Duration) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        let mut interface = Self::with_terminal(terminal, notify_delay);
        interface.raw_mode = true;
        Ok(interface)
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        if !self.raw_mode {
            return Ok(());
        }
        self.raw_mode = false;
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn handle_input(&mut self, game: &Game) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                debug_log!(
                    "handle_input() - Key event received: code={:?}, modifiers={:?}",
                    key.code,
                    key.modifiers
                );
                let action = map_key_event(key, game.is_over());
                if action.is_none() {
                    debug_log!("handle_input() - Ignoring key: {:?}", key.code);
                }
                Ok(action)
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

impl<B: Backend> TuiInterface<B> {
    pub fn with_terminal(terminal: Terminal<B>, notify_delay: Duration) -> Self {
        Self {
            terminal,
            raw_mode: false,
            notify_delay,
            pending_notice: None,
            popup: None,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        }
    }

    pub fn popup(&self) -> Option<Notice> {
        self.popup
    }

    /// Show the pending notice once its delay has passed.
    pub fn poll_notice(&mut self, now: Instant) -> bool {
        match self.pending_notice {
            Some(pending) if pending.is_due(now) => {
                info_log!("poll_notice() - showing {:?}", pending.notice());
                self.popup = Some(pending.notice());
                self.pending_notice = None;
                true
            }
            _ => false,
        }
    }

    /// Draw the current UI state to the terminal.
    ///
    /// Returns an error if rendering fails.
    pub fn draw(&mut self, game: &Game) -> Result<(), io::Error> {
        let ctx = RenderContext {
            game,
            popup: self.popup,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            render_static(f, &ctx);
        })?;
        Ok(())
    }

    pub fn show_log_cleared(&mut self, game: &Game) {
        self.message = "Debug log cleared".to_string();
        self.error_message.clear();
        self.draw_or_log(game);
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self, game: &Game) {
        if let Err(e) = self.draw(game) {
            debug_log!("Draw error: {}", e);
        }
    }
}

/// Render the complete UI layout using the provided context.
pub fn render_static(f: &mut Frame, ctx: &RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(14), // Game board
            Constraint::Length(5),  // Keyboard
            Constraint::Min(6),     // Event log (takes remaining space)
            Constraint::Length(3),  // Status line
            Constraint::Length(3),  // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_board(f, chunks[1], ctx.game);
    render_keyboard(f, chunks[2], ctx.game);
    render_log(f, chunks[3], ctx.game.log(), ctx.message, ctx.error_message);
    render_status(f, chunks[4], ctx.status);
    render_instructions(f, chunks[5], ctx.game.is_over());

    if let Some(notice) = ctx.popup {
        render_popup(f, notice);
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("WORDLE")
        .style(HEADER_STYLE)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_board(f: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .title(format!("Guesses ({}/{MAX_GUESSES})", game.active_row()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (index, row) in game.board().rows().iter().enumerate() {
        let active = !game.is_over() && index == game.active_row();
        let active_column = active.then(|| game.active_column());
        render_row(f, inner, index, row, active_column);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_row(f: &mut Frame, area: Rect, index: usize, row: &Row, active_column: Option<usize>) {
    let y = area.y + (index as u16 * ROW_SPACING);
    if y >= area.y + area.height {
        return;
    }

    let mut spans = vec![Span::raw("  ")];
    for (column, cell) in row.cells().iter().enumerate() {
        let letter = cell.letter.unwrap_or(' ');
        let is_cursor = active_column == Some(column);
        spans.push(Span::styled(format!(" {letter} "), cell_style(cell, is_cursor)));
        spans.push(Span::raw(" "));
    }
    if active_column == Some(WORD_LENGTH) {
        spans.push(Span::styled(" <- ENTER to submit", MESSAGE_STYLE));
    }

    render_line(f, area, y, spans);
}

fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
    let paragraph = Paragraph::new(Line::from(spans));
    f.render_widget(
        paragraph,
        Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        },
    );
}

fn render_keyboard(f: &mut Frame, area: Rect, game: &Game) {
    let hints = game.letter_hints();
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|keys| {
            let spans: Vec<Span> = keys
                .chars()
                .flat_map(|c| {
                    let (bg, fg) = classification_colors(hints[(c as u8 - b'A') as usize]);
                    [
                        Span::styled(format!(" {c} "), Style::default().fg(fg).bg(bg)),
                        Span::raw(" "),
                    ]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title("Keyboard").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_log(f: &mut Frame, area: Rect, log: &EventLog, message: &str, error_message: &str) {
    let mut lines = Vec::new();

    if !message.is_empty() {
        lines.push(Line::from(vec![Span::styled(message, MESSAGE_STYLE)]));
    }
    if !error_message.is_empty() {
        lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
    }

    for entry in log.entries() {
        lines.push(Line::from(vec![
            Span::styled(entry.timestamp(), TIME_STYLE),
            Span::raw(" - "),
            Span::styled(entry.message.as_str(), severity_style(entry.severity)),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Debug Log").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, game_over: bool) {
    let text = if game_over {
        "N: New Game | CTRL+L: Clear Log | ESC: Quit"
    } else {
        "Type letters | BACKSPACE: Delete | ENTER: Submit | CTRL+N: New Game | CTRL+L: Clear Log | ESC: Quit"
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let status_text = if status.is_empty() { "Ready" } else { status };
    let paragraph = Paragraph::new(status_text)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn render_popup(f: &mut Frame, notice: Notice) {
    let area = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, f.area());
    let style = match notice {
        Notice::Won { .. } => SUCCESS_STYLE,
        Notice::Lost { .. } => ERROR_STYLE,
    };
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(notice.to_string(), style)),
        Line::from(""),
        Line::from("N: New Game | ESC: Quit"),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl GameInterface for TuiInterface {
    fn display_new_game(&mut self, game: &Game) {
        self.pending_notice = None;
        self.popup = None;
        self.error_message.clear();
        self.message = "New game started. Guess the 5-letter word!".to_string();
        self.status = format!("Row 1 of {MAX_GUESSES}");
        self.draw_or_log(game);
    }

    fn read_action(&mut self, game: &Game) -> Option<UserAction> {
        loop {
            self.poll_notice(Instant::now());
            if self.draw(game).is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input(game) {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Error handling input: {}, returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_outcome(&mut self, game: &Game, outcome: &KeyOutcome) {
        self.apply_outcome(game, outcome);
        self.draw_or_log(game);
    }

    fn announce(&mut self, notice: Notice) {
        self.pending_notice = Some(PendingNotice::new(
            notice,
            self.notify_delay,
            Instant::now(),
        ));
    }

    fn display_log_cleared(&mut self, game: &Game) {
        self.show_log_cleared(game);
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
    }
}

impl<B: Backend> TuiInterface<B> {
    /// Update status lines for a processed key.
    pub fn apply_outcome(&mut self, game: &Game, outcome: &KeyOutcome) {
        match outcome {
            KeyOutcome::Ignored => {}
            KeyOutcome::Updated => {
                self.error_message.clear();
                self.status = format!(
                    "Row {} of {MAX_GUESSES}: {}",
                    game.active_row() + 1,
                    game.current_word()
                );
            }
            KeyOutcome::Rejected(rejection) => {
                self.error_message = rejection.to_string();
            }
            KeyOutcome::Submitted(submission) => {
                self.error_message.clear();
                self.status = if game.is_over() {
                    "Game Over".to_string()
                } else {
                    format!(
                        "{} submitted - Row {} of {MAX_GUESSES}",
                        submission.guess,
                        game.active_row() + 1
                    )
                };
            }
        }
    }
}

impl<B: Backend> Drop for TuiInterface<B> {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::Rejection;
    use crate::word::Word;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn render(game: &Game, popup: Option<Notice>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 50)).unwrap();
        let ctx = RenderContext {
            game,
            popup,
            message: "hello there",
            error_message: "",
            status: "status line",
        };
        terminal.draw(|f| render_static(f, &ctx)).unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_map_letters_uppercased() {
        assert_eq!(
            map_key_event(press(KeyCode::Char('a')), false),
            Some(UserAction::Key(Key::Letter('A')))
        );
    }

    #[test]
    fn test_map_control_keys() {
        assert_eq!(
            map_key_event(press(KeyCode::Backspace), false),
            Some(UserAction::Key(Key::Backspace))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Enter), false),
            Some(UserAction::Key(Key::Enter))
        );
        assert_eq!(map_key_event(press(KeyCode::Esc), false), Some(UserAction::Exit));
    }

    #[test]
    fn test_map_ignores_other_keys() {
        assert_eq!(map_key_event(press(KeyCode::Char('1')), false), None);
        assert_eq!(map_key_event(press(KeyCode::Tab), false), None);
        assert_eq!(map_key_event(press(KeyCode::Left), false), None);
        let alt_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT);
        assert_eq!(map_key_event(alt_a, false), None);
    }

    #[test]
    fn test_map_ignores_release_events() {
        let mut key = press(KeyCode::Char('a'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key_event(key, false), None);
    }

    #[test]
    fn test_map_new_game() {
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(map_key_event(ctrl_n, false), Some(UserAction::NewGame));
        assert_eq!(
            map_key_event(press(KeyCode::Char('n')), false),
            Some(UserAction::Key(Key::Letter('N')))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('n')), true),
            Some(UserAction::NewGame)
        );
    }

    #[test]
    fn test_map_clear_log() {
        let ctrl_l = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL);
        assert_eq!(map_key_event(ctrl_l, false), Some(UserAction::ClearLog));
        assert_eq!(map_key_event(ctrl_l, true), Some(UserAction::ClearLog));
        assert_eq!(
            map_key_event(press(KeyCode::Char('l')), false),
            Some(UserAction::Key(Key::Letter('L')))
        );
    }

    #[test]
    fn test_display_log_cleared_redraws_empty_log() {
        let terminal = Terminal::new(TestBackend::new(120, 50)).unwrap();
        let mut tui = TuiInterface::with_terminal(terminal, Duration::ZERO);
        let mut game = Game::new(Word::new("WORDS").unwrap());
        game.log_mut().clear();
        tui.show_log_cleared(&game);
        let text = buffer_text(&tui.terminal);
        assert!(text.contains("Debug log cleared"));
        assert!(!text.contains("Game initialized successfully!"));
    }

    #[test]
    fn test_pending_notice_waits_for_delay() {
        let now = Instant::now();
        let pending =
            PendingNotice::new(Notice::Won { attempts: 2 }, Duration::from_millis(500), now);
        assert!(!pending.is_due(now));
        assert!(pending.is_due(now + Duration::from_millis(500)));
        assert_eq!(pending.notice(), Notice::Won { attempts: 2 });
    }

    #[test]
    fn test_poll_notice_shows_popup_once_due() {
        let terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        let mut tui = TuiInterface::with_terminal(terminal, Duration::from_millis(500));
        let now = Instant::now();
        tui.pending_notice = Some(PendingNotice::new(
            Notice::Won { attempts: 1 },
            Duration::from_millis(500),
            now,
        ));
        assert!(!tui.poll_notice(now));
        assert_eq!(tui.popup(), None);
        assert!(tui.poll_notice(now + Duration::from_secs(1)));
        assert_eq!(tui.popup(), Some(Notice::Won { attempts: 1 }));
        assert!(!tui.poll_notice(now + Duration::from_secs(2)));
    }

    #[test]
    fn test_apply_outcome_sets_error() {
        let terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        let mut tui = TuiInterface::with_terminal(terminal, Duration::ZERO);
        let game = Game::new(Word::new("WORDS").unwrap());
        tui.apply_outcome(&game, &KeyOutcome::Rejected(Rejection::NothingToDelete));
        assert_eq!(tui.error_message, "Nothing to delete");
        tui.apply_outcome(&game, &KeyOutcome::Updated);
        assert!(tui.error_message.is_empty());
        assert_eq!(tui.status, "Row 1 of 6: ");
    }

    #[test]
    fn test_render_board_and_log() {
        let mut game = Game::new(Word::new("WORDS").unwrap());
        for c in "CRANE".chars() {
            game.add_letter(c).unwrap();
        }
        game.submit_guess().unwrap();
        let text = render(&game, None);
        assert!(text.contains("WORDLE"));
        assert!(text.contains("Guesses (1/6)"));
        assert!(text.contains(" C "));
        assert!(text.contains("Debug Log"));
        assert!(text.contains("hello there"));
        assert!(text.contains("status line"));
    }

    #[test]
    fn test_render_popup() {
        let game = Game::new(Word::new("WORDS").unwrap());
        let text = render(&game, Some(Notice::Lost { secret: *game.secret() }));
        assert!(text.contains("The word was WORDS."));
    }

    #[test]
    fn test_drawing_through_interface() {
        let terminal = Terminal::new(TestBackend::new(100, 50)).unwrap();
        let mut tui = TuiInterface::with_terminal(terminal, Duration::ZERO);
        let game = Game::new(Word::new("WORDS").unwrap());
        tui.draw(&game).unwrap();
        assert!(buffer_text(&tui.terminal).contains("Keyboard"));
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 20, 4);
        let rect = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, area);
        assert_eq!(rect, Rect::new(0, 0, 20, 4));
    }
}
