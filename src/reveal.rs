//! Staggered reveal of a submitted row.
//!
//! Every tile's offsets are measured from the submission time, not from the
//! previous tile, so a late pump still lands each event at its intended time.

use crate::board::{TileState, WORD_LENGTH};
use crate::config::Timings;
use crate::timeline::{TimedEvent, Timeline};
use std::time::Duration;

/// When tile `col` of a row submitted at `submitted_at` starts flipping.
#[must_use]
pub fn flip_at(timings: &Timings, submitted_at: Duration, col: usize) -> Duration {
    let steps = u32::try_from(col + 1).unwrap_or(u32::MAX);
    submitted_at + timings.stagger.saturating_mul(steps)
}

/// When a reveal submitted at `submitted_at` reports completion.
#[must_use]
pub fn done_at(timings: &Timings, submitted_at: Duration) -> Duration {
    flip_at(timings, submitted_at, WORD_LENGTH - 1) + timings.settle
}

/// Queue the flip, commit and completion events for `row`.
///
/// Returns the completion time.
pub fn schedule_reveal(
    timeline: &mut Timeline,
    timings: &Timings,
    row: usize,
    states: &[TileState; WORD_LENGTH],
    submitted_at: Duration,
) -> Duration {
    for (col, &state) in states.iter().enumerate() {
        let flip = flip_at(timings, submitted_at, col);
        timeline.schedule(flip, TimedEvent::Flip { row, col });
        timeline.schedule(flip + timings.flip_commit, TimedEvent::Commit { row, col, state });
    }

    let done = done_at(timings, submitted_at);
    timeline.schedule(done, TimedEvent::RevealDone { row });
    done
}
