//! Puzzle grid model: tiles, board, cursor and the heart overlay pattern.

pub const WORD_LENGTH: usize = 5;
pub const MAX_ATTEMPTS: usize = 6;

/// Cells that turn into hearts once the puzzle is won.
pub const HEART_PATTERN: [[bool; WORD_LENGTH]; MAX_ATTEMPTS] = [
    [false, true, false, true, false],
    [true, true, true, true, true],
    [true, true, true, true, true],
    [false, true, true, true, false],
    [false, false, true, false, false],
    [false, false, false, false, false],
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileState {
    #[default]
    Empty,
    Filled,
    Correct, // Green
    Present, // Yellow
    Absent,  // Gray
    Heart,
}

impl TileState {
    /// True once a reveal (or the heart overlay) has classified the tile.
    #[must_use]
    pub const fn is_revealed(self) -> bool {
        matches!(
            self,
            Self::Correct | Self::Present | Self::Absent | Self::Heart
        )
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty | Self::Filled => '⬜',
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬛',
            Self::Heart => '🟪',
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    pub letter: Option<char>,
    pub state: TileState,
    /// Set once the tile's flip animation has started. Purely a render hint.
    pub flipped: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    #[must_use]
    pub const fn is_row_full(self) -> bool {
        self.col == WORD_LENGTH
    }
}

/// Fixed-size grid of `MAX_ATTEMPTS` rows by `WORD_LENGTH` tiles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    rows: [[Tile; WORD_LENGTH]; MAX_ATTEMPTS],
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tile(&self, row: usize, col: usize) -> &Tile {
        &self.rows[row][col]
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &[Tile; WORD_LENGTH] {
        &self.rows[row]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile; WORD_LENGTH]> {
        self.rows.iter()
    }

    /// Letters of a row, or `None` while any tile in it is still blank.
    #[must_use]
    pub fn row_letters(&self, row: usize) -> Option<[char; WORD_LENGTH]> {
        let mut letters = [' '; WORD_LENGTH];
        for (slot, tile) in letters.iter_mut().zip(&self.rows[row]) {
            *slot = tile.letter?;
        }
        Some(letters)
    }

    pub fn fill(&mut self, row: usize, col: usize, letter: char) {
        self.rows[row][col] = Tile {
            letter: Some(letter),
            state: TileState::Filled,
            flipped: false,
        };
    }

    pub fn clear(&mut self, row: usize, col: usize) {
        self.rows[row][col] = Tile::default();
    }

    /// Applies a revealed state. Re-applying the same state is a no-op.
    pub fn commit(&mut self, row: usize, col: usize, state: TileState) {
        self.rows[row][col].state = state;
    }

    pub fn mark_flipped(&mut self, row: usize, col: usize) {
        self.rows[row][col].flipped = true;
    }

    /// Replaces whatever the tile held with the heart overlay, keeping its letter.
    pub fn set_heart(&mut self, row: usize, col: usize) {
        let tile = &mut self.rows[row][col];
        tile.state = TileState::Heart;
        tile.flipped = true;
    }

    #[must_use]
    pub fn count_state(&self, state: TileState) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|tile| tile.state == state)
            .count()
    }
}

/// Pattern cells with a valid row, in linear (row-major) order.
pub fn heart_cells() -> impl Iterator<Item = (usize, usize)> {
    HEART_PATTERN
        .iter()
        .enumerate()
        .filter(|(row, _)| *row < MAX_ATTEMPTS)
        .flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, is_heart)| **is_heart)
                .map(move |(col, _)| (row, col))
        })
}
