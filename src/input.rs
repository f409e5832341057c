//! Keystroke vocabulary and the phases that gate it.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// An ASCII letter in either case. Anything else is dropped by the session.
    Letter(char),
    Backspace,
    Enter,
}

impl Key {
    /// Map a raw character to a puzzle key. Anything unrecognized is dropped.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            c if c.is_ascii_alphabetic() => Some(Self::Letter(c.to_ascii_uppercase())),
            '\n' | '\r' => Some(Self::Enter),
            '\u{8}' | '\u{7f}' => Some(Self::Backspace),
            _ => None,
        }
    }
}

/// Where the puzzle is in its turn cycle.
///
/// `Accepting` → `RowFull` → `Revealing` → back to `Accepting` on a miss.
/// Terminal states: `Won`, `Exhausted`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputPhase {
    #[default]
    Accepting,
    RowFull,
    Revealing,
    Won,
    /// Every row was used without finding the word. No loss scene exists.
    Exhausted,
}

impl InputPhase {
    /// Whether letters and backspace may edit the board.
    #[must_use]
    pub const fn accepts_edits(self) -> bool {
        matches!(self, Self::Accepting | Self::RowFull)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Exhausted)
    }
}

impl fmt::Display for InputPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Accepting => "Accepting",
            Self::RowFull => "RowFull",
            Self::Revealing => "Revealing",
            Self::Won => "Won",
            Self::Exhausted => "Exhausted",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_normalized_to_uppercase() {
        assert_eq!(Key::from_char('g'), Some(Key::Letter('G')));
        assert_eq!(Key::from_char('Z'), Some(Key::Letter('Z')));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(Key::from_char('\n'), Some(Key::Enter));
        assert_eq!(Key::from_char('\r'), Some(Key::Enter));
        assert_eq!(Key::from_char('\u{8}'), Some(Key::Backspace));
        assert_eq!(Key::from_char('\u{7f}'), Some(Key::Backspace));
    }

    #[test]
    fn test_other_keys_ignored() {
        for c in ['1', ' ', '!', 'é', '\t', '\u{FFFD}'] {
            assert_eq!(Key::from_char(c), None, "expected {c:?} to be dropped");
        }
    }

    #[test]
    fn test_phase_predicates() {
        assert!(InputPhase::Accepting.accepts_edits());
        assert!(InputPhase::RowFull.accepts_edits());
        assert!(!InputPhase::Revealing.accepts_edits());
        assert!(InputPhase::Won.is_terminal());
        assert!(InputPhase::Exhausted.is_terminal());
        assert!(!InputPhase::Revealing.is_terminal());
    }
}
