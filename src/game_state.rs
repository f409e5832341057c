//! Puzzle session: owns the board and drives it from keys and the timeline.
//!
//! # State Machine
//! - `Accepting` → `RowFull` (row complete) → `Revealing` (Enter)
//! - `Revealing` → `Accepting` on a miss, `Won` on a match, `Exhausted` after the last row
//!
//! Keys arriving in `Revealing`, `Won` or `Exhausted` are dropped without
//! touching the board. Timed events are the only mutation source while a
//! reveal or the win sequence is in flight.

use crate::board::{Board, Cursor, MAX_ATTEMPTS, WORD_LENGTH};
use crate::clock::Clock;
use crate::config::{PuzzleConfig, Timings};
use crate::evaluator::{TargetWord, evaluate};
use crate::input::{InputPhase, Key};
use crate::reveal::schedule_reveal;
use crate::timeline::{TimedEvent, Timeline};
use crate::win::WinSequence;
use crate::{debug_log, info_log};
use std::time::Duration;

/// Read-only snapshot handed to the render surface after each mutation.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub board: &'a Board,
    pub cursor: Cursor,
    pub phase: InputPhase,
    /// The win overlay has started.
    pub celebrating: bool,
}

/// Collaborators outside the puzzle: something that draws, and something
/// that moves on to the next scene.
pub trait PuzzleInterface {
    fn render(&mut self, view: &View<'_>);

    /// Fired at most once, when the win sequence completes.
    fn navigate(&mut self);
}

pub struct PuzzleSession<C: Clock> {
    board: Board,
    cursor: Cursor,
    phase: InputPhase,
    target: TargetWord,
    timings: Timings,
    clock: C,
    timeline: Timeline,
    win: WinSequence,
    submitted: Option<[char; WORD_LENGTH]>,
    celebrating: bool,
    navigated: bool,
    closed: bool,
}

impl<C: Clock> PuzzleSession<C> {
    /// Timings that fail [`Timings::validate`] are replaced by the defaults.
    pub fn new(config: PuzzleConfig, clock: C) -> Self {
        let timings = match config.timings.validate() {
            Ok(()) => config.timings,
            Err(e) => {
                log::warn!("Rejected timings ({e}); using defaults");
                Timings::default()
            }
        };
        info_log!(
            "PuzzleSession::new() - target length {}, stagger {:?}",
            WORD_LENGTH,
            timings.stagger
        );
        Self {
            board: Board::new(),
            cursor: Cursor::default(),
            phase: InputPhase::Accepting,
            target: config.target,
            timings,
            clock,
            timeline: Timeline::new(),
            win: WinSequence::new(),
            submitted: None,
            celebrating: false,
            navigated: false,
            closed: false,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn phase(&self) -> InputPhase {
        self.phase
    }

    #[must_use]
    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    #[must_use]
    pub fn has_navigated(&self) -> bool {
        self.navigated
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Nothing further can happen: torn down, navigated, or stuck with no
    /// pending events in a terminal phase.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.closed || self.navigated || (self.phase.is_terminal() && self.timeline.is_empty())
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        if self.closed {
            None
        } else {
            self.timeline.next_deadline()
        }
    }

    #[must_use]
    pub fn pending_events(&self) -> Vec<(Duration, TimedEvent)> {
        self.timeline.pending()
    }

    #[must_use]
    pub fn view(&self) -> View<'_> {
        View {
            board: &self.board,
            cursor: self.cursor,
            phase: self.phase,
            celebrating: self.celebrating,
        }
    }

    /// Apply one key. Returns whether the board or phase changed.
    pub fn handle_key(&mut self, key: Key, ui: &mut impl PuzzleInterface) -> bool {
        if self.closed {
            return false;
        }
        // Anything already due happens before the key does.
        self.pump(ui);

        let changed = match (self.phase, key) {
            (InputPhase::Revealing | InputPhase::Won | InputPhase::Exhausted, _) => {
                debug_log!("handle_key() - Ignoring {:?} while {}", key, self.phase);
                false
            }
            (InputPhase::Accepting, Key::Letter(letter)) => self.type_letter(letter),
            (InputPhase::Accepting | InputPhase::RowFull, Key::Backspace) => self.erase(),
            (InputPhase::RowFull, Key::Enter) => self.submit(),
            (InputPhase::RowFull, Key::Letter(_)) | (InputPhase::Accepting, Key::Enter) => {
                debug_log!("handle_key() - {:?} has no effect at {:?}", key, self.cursor);
                false
            }
        };

        if changed {
            ui.render(&self.view());
        }
        changed
    }

    fn type_letter(&mut self, letter: char) -> bool {
        if !letter.is_ascii_alphabetic() {
            debug_log!("type_letter() - Dropping non-letter {:?}", letter);
            return false;
        }
        let letter = letter.to_ascii_uppercase();
        let Cursor { row, col } = self.cursor;
        if col >= WORD_LENGTH {
            return false;
        }
        self.board.fill(row, col, letter);
        self.cursor.col += 1;
        if self.cursor.is_row_full() {
            self.phase = InputPhase::RowFull;
        }
        debug_log!("type_letter() - '{}' at ({}, {})", letter, row, col);
        true
    }

    fn erase(&mut self) -> bool {
        if self.cursor.col == 0 {
            return false;
        }
        self.cursor.col -= 1;
        self.board.clear(self.cursor.row, self.cursor.col);
        self.phase = InputPhase::Accepting;
        debug_log!("erase() - cleared ({}, {})", self.cursor.row, self.cursor.col);
        true
    }

    fn submit(&mut self) -> bool {
        let row = self.cursor.row;
        let Some(guess) = self.board.row_letters(row) else {
            log::warn!("Row {row} reported full but has blank tiles; submit ignored");
            return false;
        };

        let states = evaluate(&guess, self.target.letters());
        let now = self.clock.now();
        self.phase = InputPhase::Revealing;
        self.submitted = Some(guess);
        let done = schedule_reveal(&mut self.timeline, &self.timings, row, &states, now);
        info_log!(
            "submit() - row {} guess '{}' revealing until {:?}",
            row,
            guess.iter().collect::<String>(),
            done
        );
        true
    }

    /// Apply every timeline event due at the clock's current time.
    pub fn pump(&mut self, ui: &mut impl PuzzleInterface) {
        if self.closed {
            return;
        }
        let now = self.clock.now();
        while let Some((due, event)) = self.timeline.pop_due(now) {
            self.apply(due, event, ui);
            if self.closed {
                break;
            }
        }
    }

    /// Wait out every pending event, for front-ends without their own loop.
    pub fn run_until_idle(&mut self, ui: &mut impl PuzzleInterface) {
        while let Some(deadline) = self.next_deadline() {
            self.clock.wait_until(deadline);
            self.pump(ui);
        }
    }

    fn apply(&mut self, due: Duration, event: TimedEvent, ui: &mut impl PuzzleInterface) {
        debug_log!("apply() - {:?} due {:?}", event, due);
        match event {
            TimedEvent::Flip { row, col } => self.board.mark_flipped(row, col),
            TimedEvent::Commit { row, col, state } => self.board.commit(row, col, state),
            TimedEvent::RevealDone { row } => self.finish_reveal(row, due),
            TimedEvent::WinStart => {
                self.celebrating = true;
                let navigate_at = self.win.schedule_overlay(&mut self.timeline, &self.timings, due);
                info_log!("apply() - heart overlay started, leaving at {:?}", navigate_at);
            }
            TimedEvent::Heart { row, col } => self.board.set_heart(row, col),
            TimedEvent::Navigate => {
                if self.navigated {
                    return;
                }
                self.navigated = true;
                log::info!("Puzzle solved, handing off to the next scene");
                ui.navigate();
                return;
            }
        }
        ui.render(&self.view());
    }

    fn finish_reveal(&mut self, row: usize, due: Duration) {
        let solved = self
            .submitted
            .take()
            .is_some_and(|guess| self.target.matches(&guess));

        if solved {
            self.phase = InputPhase::Won;
            self.win.trigger(&mut self.timeline, &self.timings, due);
            log::info!("Row {row} matched the target word");
        } else if row + 1 >= MAX_ATTEMPTS {
            self.phase = InputPhase::Exhausted;
            log::warn!("All {MAX_ATTEMPTS} attempts used without a match; no loss scene is defined");
        } else {
            self.cursor = Cursor { row: row + 1, col: 0 };
            self.phase = InputPhase::Accepting;
            info_log!("finish_reveal() - row {} missed, moving to row {}", row, row + 1);
        }
    }

    /// Tear the session down, cancelling pending events. The board is left
    /// as-is and no further mutation or navigation happens.
    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let cancelled = self.timeline.cancel_all();
        log::info!("Puzzle session closed, {cancelled} pending event(s) cancelled");
    }
}
