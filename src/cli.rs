use crate::board::{Board, MAX_ATTEMPTS, WORD_LENGTH};
use crate::clock::Clock;
use crate::config::PuzzleConfig;
use crate::error::ConfigError;
use crate::evaluator::DEFAULT_TARGET;
use crate::game_state::{PuzzleInterface, PuzzleSession, View};
use crate::info_log;
use crate::input::{InputPhase, Key};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Guess the five-letter word; a heart waits at the end.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Word to guess this session (5 ASCII letters)
    #[arg(short = 'w', long = "word", default_value = DEFAULT_TARGET)]
    pub word: String,

    /// Animation speed factor (2.0 plays twice as fast)
    #[arg(short = 's', long = "speed", default_value_t = 1.0)]
    pub speed: f64,

    /// Line-based play on stdin/stdout instead of the full-screen UI
    #[arg(long = "plain")]
    pub plain: bool,

    /// Where to write the log file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// # Errors
    /// Returns a [`ConfigError`] for a malformed word or speed.
    pub fn puzzle_config(&self) -> Result<PuzzleConfig, ConfigError> {
        PuzzleConfig::new(&self.word, self.speed)
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Keystrokes for one line of plain-mode input. `<` erases the previous
/// letter and the line always ends with Enter.
#[must_use]
pub fn line_keys(line: &str) -> Vec<Key> {
    line.trim()
        .chars()
        .filter_map(|c| if c == '<' { Some(Key::Backspace) } else { Key::from_char(c) })
        .chain(std::iter::once(Key::Enter))
        .collect()
}

/// Whether `keys` leave exactly one full row behind, with no letter typed
/// past the end of it.
#[must_use]
pub fn fills_one_row(keys: &[Key]) -> bool {
    let mut typed = 0usize;
    for key in keys {
        match key {
            Key::Letter(_) if typed == WORD_LENGTH => return false,
            Key::Letter(_) => typed += 1,
            Key::Backspace => typed = typed.saturating_sub(1),
            Key::Enter => {}
        }
    }
    typed == WORD_LENGTH
}

#[must_use]
pub fn format_board(board: &Board) -> String {
    let mut out = String::new();
    for row in board.rows() {
        let symbols: String = row.iter().map(|t| t.state.symbol()).collect();
        let letters: String = row.iter().map(|t| t.letter.unwrap_or('_')).collect();
        out.push_str(&format!("{symbols}  {letters}\n"));
    }
    out
}

/// Line-oriented render surface.
///
/// Prints the board each time a reveal settles rather than on every tile flip.
pub struct CliInterface<W: Write> {
    writer: W,
    last_phase: Option<InputPhase>,
    last_frame: String,
    navigated: bool,
}

impl<W: Write> CliInterface<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_phase: None,
            last_frame: String::new(),
            navigated: false,
        }
    }

    #[must_use]
    pub fn navigated(&self) -> bool {
        self.navigated
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn print(&mut self, text: &str) {
        if let Err(e) = self.writer.write_all(text.as_bytes()) {
            log::warn!("Plain output failed: {e}");
        }
    }

    fn prompt(&mut self, phase: InputPhase, row: usize) {
        let text = match phase {
            InputPhase::Accepting | InputPhase::RowFull => {
                format!("Guess {} of {MAX_ATTEMPTS} (5 letters, '<' to erase):\n", row + 1)
            }
            InputPhase::Revealing => return,
            InputPhase::Won => "You got it!\n".to_string(),
            InputPhase::Exhausted => "Out of guesses.\n".to_string(),
        };
        self.print(&text);
    }
}

impl<W: Write> PuzzleInterface for CliInterface<W> {
    fn render(&mut self, view: &View<'_>) {
        self.last_frame = format_board(view.board);
        let settled = self.last_phase == Some(InputPhase::Revealing)
            && view.phase != InputPhase::Revealing;
        self.last_phase = Some(view.phase);
        if settled {
            let frame = self.last_frame.clone();
            self.print(&frame);
            self.prompt(view.phase, view.cursor.row);
        }
    }

    fn navigate(&mut self) {
        self.navigated = true;
        let frame = std::mem::take(&mut self.last_frame);
        self.print(&frame);
        self.print("💜\n");
        if let Err(e) = self.writer.flush() {
            log::warn!("Plain output flush failed: {e}");
        }
    }
}

/// Play from `reader`, one guess per line, until the puzzle finishes or
/// input runs out. Timed events are waited out between lines.
///
/// # Errors
/// Propagates read failures.
pub fn run_plain<C: Clock, R: BufRead, W: Write>(
    session: &mut PuzzleSession<C>,
    reader: R,
    interface: &mut CliInterface<W>,
) -> io::Result<()> {
    interface.prompt(session.phase(), session.cursor().row);
    for line in reader.lines() {
        let line = line?;
        info_log!("run_plain() - line '{}'", line.trim());
        let keys = line_keys(&line);
        if !fills_one_row(&keys) {
            interface.print("Invalid guess. Please enter 5 letters.\n");
            interface.prompt(session.phase(), session.cursor().row);
            continue;
        }
        for key in keys {
            session.handle_key(key, interface);
        }
        session.run_until_idle(interface);
        if session.is_finished() {
            break;
        }
    }
    session.teardown();
    interface.writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::VirtualClock;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["wordle-heart"]).unwrap();
        assert_eq!(cli.word, "GAMMA");
        assert!((cli.speed - 1.0).abs() < f64::EPSILON);
        assert!(!cli.plain);
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn test_parse_cli_with_options() {
        let cli = Cli::try_parse_from([
            "wordle-heart",
            "-w",
            "crane",
            "--speed",
            "4",
            "--plain",
            "--log-file",
            "/tmp/heart.log",
        ])
        .unwrap();
        assert_eq!(cli.word, "crane");
        assert!(cli.plain);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/heart.log")));

        let config = cli.puzzle_config().unwrap();
        assert_eq!(config.target.to_string(), "CRANE");
        assert_eq!(config.timings.stagger, std::time::Duration::from_millis(75));
    }

    #[test]
    fn test_puzzle_config_rejects_bad_word() {
        let cli = Cli::try_parse_from(["wordle-heart", "--word", "hi"]).unwrap();
        assert!(matches!(cli.puzzle_config(), Err(ConfigError::InvalidWord { .. })));
    }

    #[test]
    fn test_line_keys() {
        assert_eq!(
            line_keys(" ab<c "),
            vec![Key::Letter('A'), Key::Letter('B'), Key::Backspace, Key::Letter('C'), Key::Enter]
        );
        assert_eq!(line_keys(""), vec![Key::Enter]);
        assert_eq!(line_keys("a1!"), vec![Key::Letter('A'), Key::Enter]);
    }

    #[test]
    fn test_fills_one_row() {
        assert!(fills_one_row(&line_keys("crane")));
        assert!(fills_one_row(&line_keys("magmx<a")));
        assert!(!fills_one_row(&line_keys("cra")));
        assert!(!fills_one_row(&line_keys("")));
        assert!(!fills_one_row(&line_keys("cranes")));
        assert!(!fills_one_row(&line_keys("cranes<")));
    }

    #[test]
    fn test_format_board_empty() {
        let text = format_board(&Board::new());
        assert_eq!(text.lines().count(), MAX_ATTEMPTS);
        assert!(text.lines().all(|l| l == "⬜⬜⬜⬜⬜  _____"));
    }

    #[test]
    fn test_run_plain_winning_game() {
        let mut session = PuzzleSession::new(PuzzleConfig::default(), VirtualClock::new());
        let mut interface = CliInterface::new(Vec::new());
        let input = Cursor::new("crane\ngamma\n");

        run_plain(&mut session, input, &mut interface).unwrap();

        assert!(interface.navigated());
        assert!(session.has_navigated());
        let output = String::from_utf8(interface.into_inner()).unwrap();
        assert!(output.contains("⬛⬛🟨⬛⬛  CRANE"));
        assert!(output.contains("🟩🟩🟩🟩🟩  GAMMA"));
        assert!(output.contains("You got it!"));
        assert!(output.trim_end().ends_with('💜'));
    }

    #[test]
    fn test_run_plain_short_line_is_rejected() {
        let mut session = PuzzleSession::new(PuzzleConfig::default(), VirtualClock::new());
        let mut interface = CliInterface::new(Vec::new());
        let input = Cursor::new("cra\ncrane\n");

        run_plain(&mut session, input, &mut interface).unwrap();

        assert_eq!(session.board().row_letters(0), Some(['C', 'R', 'A', 'N', 'E']));
        assert_eq!(session.cursor().row, 1);
        let output = String::from_utf8(interface.into_inner()).unwrap();
        assert!(output.contains("Invalid guess. Please enter 5 letters."));
        assert!(output.contains("⬛⬛🟨⬛⬛  CRANE"));
        assert!(!output.contains("CRACR"));
    }

    #[test]
    fn test_run_plain_long_line_is_rejected() {
        let mut session = PuzzleSession::new(PuzzleConfig::default(), VirtualClock::new());
        let mut interface = CliInterface::new(Vec::new());
        let input = Cursor::new("cranes\ngamma\n");

        run_plain(&mut session, input, &mut interface).unwrap();

        assert!(session.has_navigated());
        assert_eq!(session.board().row_letters(0), Some(['G', 'A', 'M', 'M', 'A']));
        let output = String::from_utf8(interface.into_inner()).unwrap();
        assert_eq!(output.matches("Invalid guess").count(), 1);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("closed"))
        }
    }

    #[test]
    fn test_navigate_survives_failing_output() {
        let mut interface = CliInterface::new(FailingWriter);
        interface.navigate();
        assert!(interface.navigated());
    }

    #[test]
    fn test_run_plain_stops_when_input_ends() {
        let mut session = PuzzleSession::new(PuzzleConfig::default(), VirtualClock::new());
        let mut interface = CliInterface::new(Vec::new());
        let input = Cursor::new("cra\n");

        run_plain(&mut session, input, &mut interface).unwrap();

        assert!(!interface.navigated());
        assert!(session.is_closed());
        assert_eq!(session.board().row_letters(0), None);
    }
}
