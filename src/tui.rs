//! TUI (Terminal User Interface) for the puzzle, built on Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: render surface; draws the board on every mutation
//! - `run_tui`: event loop feeding keys to the session and pumping its timeline
//!
//! The loop polls for input with a timeout bounded by the next scheduled
//! event, so reveals and the heart cascade advance without a keypress.

use crate::board::{Board, MAX_ATTEMPTS, Tile, TileState, WORD_LENGTH};
use crate::clock::Clock;
use crate::game_state::{PuzzleInterface, PuzzleSession, View};
use crate::input::{InputPhase, Key};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

const IDLE_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const HINT_STYLE: Style = Style::new().fg(Color::Gray);
const HEART_STYLE: Style = Style::new()
    .fg(Color::Magenta)
    .add_modifier(Modifier::BOLD);

fn tile_colors(state: TileState) -> (Color, Color) {
    match state {
        TileState::Empty => (Color::Black, Color::DarkGray),
        TileState::Filled => (Color::DarkGray, Color::White),
        TileState::Correct => (Color::Green, Color::Black),
        TileState::Present => (Color::Yellow, Color::Black),
        TileState::Absent => (Color::Gray, Color::White),
        TileState::Heart => (Color::Magenta, Color::White),
    }
}

fn tile_span(tile: &Tile) -> Span<'static> {
    let (bg, fg) = tile_colors(tile.state);
    let mut style = Style::default().fg(fg).bg(bg);
    if tile.flipped {
        style = style.add_modifier(Modifier::BOLD);
    }
    let letter = tile.letter.unwrap_or(' ');
    Span::styled(format!(" {letter} "), style)
}

/// Translate a terminal key event. Letters with Ctrl/Alt held are dropped so
/// shortcuts never type into the grid.
#[must_use]
pub fn translate_key(key: &KeyEvent) -> Option<Key> {
    if key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Key::from_char(c),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Enter => Some(Key::Enter),
        _ => None,
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Full-screen render surface.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    navigated: bool,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            navigated: false,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    #[must_use]
    pub fn navigated(&self) -> bool {
        self.navigated
    }

    fn draw(&mut self, view: &View<'_>) -> Result<(), io::Error> {
        self.terminal.draw(|f| render_static(f, view))?;
        Ok(())
    }

    /// Log and swallow draw errors; a missed frame is redrawn on the next mutation.
    fn draw_or_log(&mut self, view: &View<'_>) {
        if let Err(e) = self.draw(view) {
            debug_log!("Draw error: {}", e);
        }
    }
}

impl PuzzleInterface for TuiInterface {
    fn render(&mut self, view: &View<'_>) {
        self.draw_or_log(view);
    }

    fn navigate(&mut self) {
        info_log!("TuiInterface::navigate() - leaving puzzle scene");
        self.navigated = true;
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn render_static(f: &mut Frame, view: &View<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(14), // Board
            Constraint::Min(3),     // Overlay / status
            Constraint::Length(3),  // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_board(f, chunks[1], view.board);
    render_status(f, chunks[2], view);
    render_instructions(f, chunks[3], view.phase);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("GUESS THE WORD")
        .style(HEADER_STYLE)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

#[allow(clippy::cast_possible_truncation)]
fn render_board(f: &mut Frame, area: Rect, board: &Board) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (row_index, row) in board.rows().enumerate() {
        let y = inner.y + (row_index as u16 * ROW_SPACING);
        if y >= inner.y + inner.height {
            return;
        }

        let mut spans = Vec::with_capacity(WORD_LENGTH * 2);
        for tile in row {
            spans.push(tile_span(tile));
            spans.push(Span::raw(" "));
        }

        let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        f.render_widget(
            paragraph,
            Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: 1,
            },
        );
    }
}

fn render_status(f: &mut Frame, area: Rect, view: &View<'_>) {
    let line = if view.celebrating {
        Line::from(Span::styled("💜", HEART_STYLE))
    } else {
        let text = match view.phase {
            InputPhase::Accepting | InputPhase::RowFull => {
                format!("Attempt {} of {MAX_ATTEMPTS}", view.cursor.row + 1)
            }
            InputPhase::Revealing => "Revealing...".to_string(),
            InputPhase::Won => "You got it!".to_string(),
            InputPhase::Exhausted => "Out of guesses".to_string(),
        };
        Line::from(Span::styled(text, HEADER_STYLE))
    };

    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, phase: InputPhase) {
    let text = match phase {
        InputPhase::Accepting => "Type letters | BACKSPACE: Erase | ESC: Quit",
        InputPhase::RowFull => "ENTER: Submit | BACKSPACE: Erase | ESC: Quit",
        InputPhase::Revealing | InputPhase::Won => "ESC: Quit",
        InputPhase::Exhausted => "No guesses left | ESC: Quit",
    };
    let paragraph = Paragraph::new(text)
        .style(HINT_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

/// Poll timeout: until the next scheduled event, or an idle tick.
fn poll_timeout<C: Clock>(session: &PuzzleSession<C>) -> Duration {
    let idle = Duration::from_millis(IDLE_POLL_TIMEOUT_MS);
    session
        .next_deadline()
        .map_or(idle, |deadline| {
            deadline.saturating_sub(session.clock().now()).min(idle)
        })
}

/// Drive `session` from the terminal until it navigates away or the player quits.
///
/// Returns whether the puzzle was solved and handed off.
///
/// # Errors
/// Propagates terminal I/O failures.
pub fn run_tui<C: Clock>(
    session: &mut PuzzleSession<C>,
    interface: &mut TuiInterface,
) -> Result<bool, io::Error> {
    interface.render(&session.view());

    while !interface.navigated() {
        if event::poll(poll_timeout(session))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if is_quit(&key) {
                        info_log!("run_tui() - quit requested");
                        break;
                    }
                    match translate_key(&key) {
                        Some(k) => {
                            session.handle_key(k, interface);
                        }
                        None => {
                            debug_log!("run_tui() - Ignoring key: {:?}", key.code);
                        }
                    }
                }
                Event::Resize(_, _) => interface.render(&session.view()),
                other => {
                    debug_log!("run_tui() - Ignoring event: {:?}", other);
                }
            }
        }
        session.pump(interface);
    }

    session.teardown();
    Ok(interface.navigated())
}
