//! Guess evaluation against the session's target word.

use crate::board::{TileState, WORD_LENGTH};
use crate::error::{ConfigError, Result};
use std::fmt;

pub const DEFAULT_TARGET: &str = "GAMMA";

fn is_valid_word(word: &str) -> bool {
    word.chars().count() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

/// The word the player is trying to find, normalized to uppercase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetWord([char; WORD_LENGTH]);

impl TargetWord {
    /// Parse a target word, accepting either case.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidWord`] unless `word` is exactly
    /// `WORD_LENGTH` ASCII letters.
    pub fn parse(word: &str) -> Result<Self> {
        let trimmed = word.trim();
        if !is_valid_word(trimmed) {
            return Err(ConfigError::InvalidWord {
                word: word.to_string(),
                expected: WORD_LENGTH,
            });
        }

        let mut letters = [' '; WORD_LENGTH];
        for (slot, c) in letters.iter_mut().zip(trimmed.chars()) {
            *slot = c.to_ascii_uppercase();
        }
        Ok(Self(letters))
    }

    #[must_use]
    pub const fn letters(&self) -> &[char; WORD_LENGTH] {
        &self.0
    }

    #[must_use]
    pub fn matches(&self, guess: &[char; WORD_LENGTH]) -> bool {
        &self.0 == guess
    }
}

impl Default for TargetWord {
    fn default() -> Self {
        Self(['G', 'A', 'M', 'M', 'A'])
    }
}

impl fmt::Display for TargetWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Classify every letter of `guess` against `target`.
///
/// Exact positions are settled first; only then are the remaining letters
/// matched against unused target positions, scanning left to right. Each
/// target position backs at most one mark, so duplicate letters never
/// receive more marks than the target holds.
///
/// # Panics
/// Panics if either word contains anything other than uppercase ASCII letters.
#[must_use]
pub fn evaluate(
    guess: &[char; WORD_LENGTH],
    target: &[char; WORD_LENGTH],
) -> [TileState; WORD_LENGTH] {
    assert!(
        guess.iter().chain(target).all(char::is_ascii_uppercase),
        "evaluate() requires uppercase ASCII letters, got {guess:?} vs {target:?}"
    );

    let mut result = [TileState::Absent; WORD_LENGTH];
    let mut used = [false; WORD_LENGTH];

    // First pass: exact positions
    for i in 0..WORD_LENGTH {
        if guess[i] == target[i] {
            result[i] = TileState::Correct;
            used[i] = true;
        }
    }

    // Second pass: displaced letters, first unused position wins
    for i in 0..WORD_LENGTH {
        if result[i] == TileState::Correct {
            continue;
        }
        if let Some(j) = (0..WORD_LENGTH).find(|&j| !used[j] && target[j] == guess[i]) {
            result[i] = TileState::Present;
            used[j] = true;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use TileState::{Absent, Correct, Present};

    fn word(s: &str) -> [char; WORD_LENGTH] {
        *TargetWord::parse(s).unwrap().letters()
    }

    #[test]
    fn test_exact_match_all_correct() {
        assert_eq!(evaluate(&word("GAMMA"), &word("GAMMA")), [Correct; 5]);
    }

    #[test]
    fn test_magma_against_gamma() {
        assert_eq!(
            evaluate(&word("MAGMA"), &word("GAMMA")),
            [Present, Correct, Present, Correct, Correct]
        );
    }

    #[test]
    fn test_no_shared_letters_all_absent() {
        assert_eq!(evaluate(&word("CRUST"), &word("GAMMA")), [Absent; 5]);
    }

    #[test]
    fn test_duplicate_guess_letters_capped_by_target() {
        assert_eq!(
            evaluate(&word("BBBBB"), &word("ABBEY")),
            [Absent, Correct, Correct, Absent, Absent]
        );
    }

    #[test]
    fn test_exact_match_takes_priority_over_earlier_present() {
        // The A at index 4 is exact; the A at index 0 must not steal it.
        assert_eq!(
            evaluate(&word("AXXXA"), &word("MOTTA")),
            [Absent, Absent, Absent, Absent, Correct]
        );
    }

    #[test]
    fn test_present_uses_first_available_position() {
        assert_eq!(
            evaluate(&word("MMXXX"), &word("GAMMA")),
            [Present, Present, Absent, Absent, Absent]
        );
        // Index 2 is exact, leaving a single M for the earlier slots.
        assert_eq!(
            evaluate(&word("MMMXX"), &word("GAMMA")),
            [Present, Absent, Correct, Absent, Absent]
        );
    }

    #[test]
    fn test_target_word_parse_normalizes_case() {
        let target = TargetWord::parse("gAmMa").unwrap();
        assert_eq!(target, TargetWord::default());
        assert_eq!(target.to_string(), DEFAULT_TARGET);
    }

    #[test]
    fn test_target_word_parse_rejects_bad_input() {
        for bad in ["", "GAMM", "GAMMAS", "GAM4A", "GA MA", "ÉCLAT"] {
            assert!(
                matches!(TargetWord::parse(bad), Err(ConfigError::InvalidWord { .. })),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    #[should_panic(expected = "uppercase ASCII")]
    fn test_lowercase_guess_panics() {
        let _ = evaluate(&['g', 'a', 'm', 'm', 'a'], &word("GAMMA"));
    }
}
