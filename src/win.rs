//! Win sequence: heart overlay cascade followed by a single hand-off.

use crate::board::heart_cells;
use crate::config::{Timings, heart_offset};
use crate::timeline::{TimedEvent, Timeline};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct WinSequence {
    triggered: bool,
}

impl WinSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Arm the sequence after a winning reveal settles at `reveal_done_at`.
    ///
    /// Only the first call schedules anything; later calls return `false`.
    pub fn trigger(
        &mut self,
        timeline: &mut Timeline,
        timings: &Timings,
        reveal_done_at: Duration,
    ) -> bool {
        if self.triggered {
            return false;
        }
        self.triggered = true;
        timeline.schedule(reveal_done_at + timings.win_delay, TimedEvent::WinStart);
        true
    }

    /// Queue the heart cascade and the navigation event once the overlay has
    /// started at `start_at`. Returns the navigation time.
    ///
    /// Hearts cover every pattern cell, including rows the player never reached.
    pub fn schedule_overlay(
        &self,
        timeline: &mut Timeline,
        timings: &Timings,
        start_at: Duration,
    ) -> Duration {
        for (row, col) in heart_cells() {
            timeline.schedule(
                start_at + heart_offset(timings.heart_step, row, col),
                TimedEvent::Heart { row, col },
            );
        }

        let navigate_at = start_at + timings.navigate_delay;
        timeline.schedule(navigate_at, TimedEvent::Navigate);
        navigate_at
    }
}
