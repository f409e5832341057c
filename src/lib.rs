// Library interface for wordle-heart
// This allows integration tests to access internal modules

pub mod board;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod game_state;
pub mod input;
pub mod logging;
pub mod reveal;
pub mod timeline;
pub mod tui;
pub mod win;

// Re-export commonly used items for easier testing
pub use board::{Board, Cursor, HEART_PATTERN, MAX_ATTEMPTS, Tile, TileState, WORD_LENGTH};
pub use clock::{Clock, SystemClock, VirtualClock};
pub use config::{PuzzleConfig, Timings};
pub use error::ConfigError;
pub use evaluator::{TargetWord, evaluate};
pub use game_state::{PuzzleInterface, PuzzleSession, View};
pub use input::{InputPhase, Key};
pub use timeline::{TimedEvent, Timeline};
