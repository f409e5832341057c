//! Ordered queue of timed puzzle events.
//!
//! Events fire by `(due, insertion order)`, so two events due at the same
//! instant run in the order they were scheduled.

use crate::board::TileState;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimedEvent {
    /// A tile starts flipping.
    Flip { row: usize, col: usize },
    /// A tile's revealed state lands, midway through its flip.
    Commit {
        row: usize,
        col: usize,
        state: TileState,
    },
    /// The row has settled and input may resume.
    RevealDone { row: usize },
    /// The win overlay begins.
    WinStart,
    Heart { row: usize, col: usize },
    /// Hand control to the next scene.
    Navigate,
}

#[derive(Debug)]
struct Entry {
    due: Duration,
    seq: u64,
    event: TimedEvent,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

#[derive(Debug, Default)]
pub struct Timeline {
    queue: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Duration, event: TimedEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry { due, seq, event }));
    }

    /// Remove and return the earliest event due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, TimedEvent)> {
        if self.next_deadline()? > now {
            return None;
        }
        self.queue
            .pop()
            .map(|Reverse(entry)| (entry.due, entry.event))
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(entry)| entry.due)
    }

    /// Drop every pending event, returning how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.queue.len();
        self.queue.clear();
        cancelled
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pending events in firing order, without consuming them.
    #[must_use]
    pub fn pending(&self) -> Vec<(Duration, TimedEvent)> {
        let mut entries: Vec<&Entry> = self.queue.iter().map(|Reverse(entry)| entry).collect();
        entries.sort();
        entries.into_iter().map(|e| (e.due, e.event)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_pops_in_due_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(ms(500), TimedEvent::Navigate);
        timeline.schedule(ms(100), TimedEvent::WinStart);

        assert_eq!(timeline.pop_due(ms(1000)), Some((ms(100), TimedEvent::WinStart)));
        assert_eq!(timeline.pop_due(ms(1000)), Some((ms(500), TimedEvent::Navigate)));
        assert_eq!(timeline.pop_due(ms(1000)), None);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(ms(300), TimedEvent::Flip { row: 0, col: 1 });
        timeline.schedule(ms(300), TimedEvent::Flip { row: 0, col: 0 });

        assert_eq!(
            timeline.pop_due(ms(300)).map(|(_, e)| e),
            Some(TimedEvent::Flip { row: 0, col: 1 })
        );
        assert_eq!(
            timeline.pop_due(ms(300)).map(|(_, e)| e),
            Some(TimedEvent::Flip { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_nothing_due_before_deadline() {
        let mut timeline = Timeline::new();
        timeline.schedule(ms(300), TimedEvent::WinStart);
        assert_eq!(timeline.pop_due(ms(299)), None);
        assert_eq!(timeline.next_deadline(), Some(ms(300)));
        assert_eq!(timeline.len(), 1);
    }

    #[test]
    fn test_cancel_all() {
        let mut timeline = Timeline::new();
        timeline.schedule(ms(1), TimedEvent::WinStart);
        timeline.schedule(ms(2), TimedEvent::Navigate);

        assert_eq!(timeline.cancel_all(), 2);
        assert!(timeline.is_empty());
        assert_eq!(timeline.next_deadline(), None);
        assert_eq!(timeline.pop_due(ms(10)), None);
    }

    #[test]
    fn test_pending_is_sorted_and_non_consuming() {
        let mut timeline = Timeline::new();
        timeline.schedule(ms(20), TimedEvent::Navigate);
        timeline.schedule(ms(10), TimedEvent::WinStart);

        let pending = timeline.pending();
        assert_eq!(
            pending,
            vec![(ms(10), TimedEvent::WinStart), (ms(20), TimedEvent::Navigate)]
        );
        assert_eq!(timeline.len(), 2);
    }
}
