//! Session configuration: the target word and every animation delay.

use crate::board::{WORD_LENGTH, heart_cells};
use crate::error::{ConfigError, Result};
use crate::evaluator::TargetWord;
use std::time::Duration;

/// Delays used by the reveal and win sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    /// Offset between consecutive tiles starting to flip.
    pub stagger: Duration,
    /// How far into a flip the tile's state is committed.
    pub flip_commit: Duration,
    /// Pause after the last tile starts flipping before input resumes.
    pub settle: Duration,
    /// Pause between a winning reveal settling and the heart overlay starting.
    pub win_delay: Duration,
    /// Per-cell offset of the heart cascade.
    pub heart_step: Duration,
    /// Time from the overlay starting to leaving the scene.
    pub navigate_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            stagger: Duration::from_millis(300),
            flip_commit: Duration::from_millis(250),
            settle: Duration::from_millis(500),
            win_delay: Duration::from_millis(1000),
            heart_step: Duration::from_millis(100),
            navigate_delay: Duration::from_millis(2500),
        }
    }
}

impl Timings {
    /// Every delay divided by `speed`; 2.0 plays twice as fast.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidSpeed`] for zero, negative or non-finite factors.
    pub fn scaled(self, speed: f64) -> Result<Self> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed(speed));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let scale = |d: Duration| Duration::from_nanos((d.as_nanos() as f64 / speed).round() as u64);
        Ok(Self {
            stagger: scale(self.stagger),
            flip_commit: scale(self.flip_commit),
            settle: scale(self.settle),
            win_delay: scale(self.win_delay),
            heart_step: scale(self.heart_step),
            navigate_delay: scale(self.navigate_delay),
        })
    }

    /// Latest heart offset relative to the start of the overlay.
    #[must_use]
    pub fn last_heart_offset(&self) -> Duration {
        heart_cells()
            .map(|(row, col)| heart_offset(self.heart_step, row, col))
            .max()
            .unwrap_or_default()
    }

    /// Check the ordering constraints the schedulers rely on.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.stagger.is_zero() {
            return Err(ConfigError::ZeroStagger);
        }
        if self.flip_commit >= self.stagger {
            return Err(ConfigError::CommitAfterNextFlip);
        }
        if self.flip_commit >= self.settle {
            return Err(ConfigError::SettleBeforeLastCommit);
        }
        if self.navigate_delay <= self.last_heart_offset() {
            return Err(ConfigError::NavigateBeforeLastHeart);
        }
        Ok(())
    }
}

/// Offset of a heart cell from the start of the overlay, by linear index.
#[must_use]
pub fn heart_offset(step: Duration, row: usize, col: usize) -> Duration {
    let index = u32::try_from(row * WORD_LENGTH + col).unwrap_or(u32::MAX);
    step.saturating_mul(index)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PuzzleConfig {
    pub target: TargetWord,
    pub timings: Timings,
}

impl PuzzleConfig {
    /// Build and validate a configuration.
    ///
    /// # Errors
    /// Propagates word, speed and timing validation failures.
    pub fn new(word: &str, speed: f64) -> Result<Self> {
        let target = TargetWord::parse(word)?;
        let timings = Timings::default().scaled(speed)?;
        timings.validate()?;
        Ok(Self { target, timings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_default_timings_are_valid() {
        let timings = Timings::default();
        assert_eq!(timings.validate(), Ok(()));
        assert_eq!(timings.last_heart_offset(), ms(2200));
    }

    #[test]
    fn test_scaled_doubles_speed() {
        let timings = Timings::default().scaled(2.0).unwrap();
        assert_eq!(timings.stagger, ms(150));
        assert_eq!(timings.navigate_delay, ms(1250));
        assert_eq!(timings.validate(), Ok(()));
    }

    #[test]
    fn test_scaled_rejects_bad_speed() {
        for speed in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Timings::default().scaled(speed),
                Err(ConfigError::InvalidSpeed(_))
            ));
        }
    }

    #[test]
    fn test_validate_catches_each_constraint() {
        let base = Timings::default();

        let zero = Timings { stagger: Duration::ZERO, ..base };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroStagger));

        let late_commit = Timings { flip_commit: ms(300), ..base };
        assert_eq!(late_commit.validate(), Err(ConfigError::CommitAfterNextFlip));

        let short_settle = Timings { settle: ms(200), ..base };
        assert_eq!(short_settle.validate(), Err(ConfigError::SettleBeforeLastCommit));

        let early_nav = Timings { navigate_delay: ms(2200), ..base };
        assert_eq!(early_nav.validate(), Err(ConfigError::NavigateBeforeLastHeart));
    }

    #[test]
    fn test_heart_offset_is_linear_index() {
        assert_eq!(heart_offset(ms(100), 0, 1), ms(100));
        assert_eq!(heart_offset(ms(100), 2, 3), ms(1300));
    }

    #[test]
    fn test_puzzle_config_new() {
        let config = PuzzleConfig::new("crane", 1.0).unwrap();
        assert_eq!(config.target.to_string(), "CRANE");
        assert_eq!(config.timings, Timings::default());

        assert!(matches!(
            PuzzleConfig::new("cranes", 1.0),
            Err(ConfigError::InvalidWord { .. })
        ));
        assert_eq!(
            PuzzleConfig::new("crane", -2.0),
            Err(ConfigError::InvalidSpeed(-2.0))
        );
    }
}
